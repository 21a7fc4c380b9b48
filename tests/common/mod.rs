#![allow(dead_code)]

use embedded_hal::delay::DelayNs;
use quadruped_walker::gait::engine::GaitEngine;
use quadruped_walker::hal::ChannelDriver;
use quadruped_walker::robot::config::CALIBRATION;

/// Driver double: keeps every `(channel, off)` write, optionally failing after `fail_after`.
#[derive(Debug, Default)]
pub struct Recorder {
    pub writes: Vec<(u8, u16)>,
    pub fail_after: Option<usize>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Fault;

impl ChannelDriver for Recorder {
    type Error = Fault;

    fn set_channel(&mut self, channel: u8, on: u16, off: u16) -> Result<(), Fault> {
        assert_eq!(on, 0);
        if self.fail_after.is_some_and(|n| self.writes.len() >= n) {
            return Err(Fault);
        }
        self.writes.push((channel, off));
        Ok(())
    }
}

impl Recorder {
    /// Off counts written to `channel`, in order.
    pub fn signals(&self, channel: u8) -> Vec<u16> {
        self.writes
            .iter()
            .filter(|(c, _)| *c == channel)
            .map(|(_, s)| *s)
            .collect()
    }
}

/// Delay double: counts pauses instead of sleeping.
#[derive(Debug, Default)]
pub struct Clock {
    pub pauses: u32,
    pub ns: u64,
}

impl DelayNs for Clock {
    fn delay_ns(&mut self, ns: u32) {
        self.pauses += 1;
        self.ns += ns as u64;
    }
}

pub type TestEngine = GaitEngine<Recorder, Clock>;

/// Engine on the deployment calibration, with the homing writes already cleared.
pub fn engine() -> TestEngine {
    let mut engine =
        GaitEngine::new(Recorder::default(), Clock::default(), &CALIBRATION).unwrap();
    assert_eq!(engine.driver().writes.len(), 12);
    engine.driver_mut().writes.clear();
    engine
}

pub fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}
