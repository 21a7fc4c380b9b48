use crate::error::Error;
use crate::hal::ChannelDriver;
use log::{error, trace};

/// Largest off-count the 12-bit PWM register accepts.
pub const SIGNAL_LIMIT: i32 = 4095;

/// Affine angle-to-signal mapping of one actuator channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calibration {
    channel: u8,
    signal_min: u16,
    signal_max: u16,
    angle_min: i16,
    angle_max: i16,
}

impl Calibration {
    /// `signal_min` is the count at `angle_min` and may be larger than `signal_max`, which
    /// flips the direction of the joint.
    pub const fn new(
        channel: u8,
        signal_min: u16,
        signal_max: u16,
        angle_min: i16,
        angle_max: i16,
    ) -> Self {
        assert!(angle_min < 0 && 0 < angle_max);
        Self {
            channel,
            signal_min,
            signal_max,
            angle_min,
            angle_max,
        }
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    /// Drive signal for `angle`, truncated towards zero.
    ///
    /// Angles outside `[angle_min, angle_max]` extrapolate the same line.
    pub fn signal(&self, angle: f32) -> i32 {
        let (a0, a1) = (self.angle_min as f32, self.angle_max as f32);
        let (s0, s1) = (self.signal_min as f32, self.signal_max as f32);
        ((angle - a0) * (s1 - s0) / (a1 - a0) + s0) as i32
    }
}

/// One joint actuator: its calibration plus the last angle commanded to it.
#[derive(Debug)]
pub struct Servo {
    calibration: Calibration,
    angle: f32,
}

impl Servo {
    /// Creates the servo and sends it home (angle 0).
    pub fn new<D: ChannelDriver>(
        driver: &mut D,
        calibration: Calibration,
    ) -> Result<Self, Error<D::Error>> {
        let mut servo = Self {
            calibration,
            angle: 0.0,
        };
        servo.set_angle(driver, 0.0)?;
        Ok(servo)
    }

    pub fn channel(&self) -> u8 {
        self.calibration.channel
    }

    /// Last commanded angle, in degrees.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Sets the servo angle in degrees.
    ///
    /// The angle is not clamped to the calibrated range. The stored angle only changes once
    /// the driver accepted the signal.
    pub fn set_angle<D: ChannelDriver>(
        &mut self,
        driver: &mut D,
        angle: f32,
    ) -> Result<(), Error<D::Error>> {
        let channel = self.channel();
        let signal = self.calibration.signal(angle);
        if !(0..=SIGNAL_LIMIT).contains(&signal) {
            error!("channel {channel}: angle {angle} maps to signal {signal}");
            return Err(Error::SignalOutOfRange { channel, signal });
        }
        trace!("channel {channel}: angle {angle} signal {signal}");
        driver
            .set_channel(channel, 0, signal as u16)
            .map_err(Error::Driver)?;
        self.angle = angle;
        Ok(())
    }

    /// Per-tick step that takes this joint to `target` in `steps` equal moves.
    pub fn increment_towards(&self, target: f32, steps: u32) -> f32 {
        (target - self.angle) / steps as f32
    }

    pub fn move_by<D: ChannelDriver>(
        &mut self,
        driver: &mut D,
        delta: f32,
    ) -> Result<(), Error<D::Error>> {
        self.set_angle(driver, self.angle + delta)
    }

    /// Cuts the drive signal. The stored angle is kept.
    pub fn disable<D: ChannelDriver>(&mut self, driver: &mut D) -> Result<(), Error<D::Error>> {
        driver.set_channel(self.channel(), 0, 0).map_err(Error::Driver)
    }
}
