//! Sensor-driven gait selection.
//!
//! Two perimeter sensors veto everything else: when either one fires, the robot backs away.
//! Otherwise the differential environment reading falls into one of four bands, one per gait.
use core::fmt::{self, Debug, Display};

use embedded_hal::delay::DelayNs;
use log::info;

use crate::gait::engine::GaitEngine;
use crate::hal::{ChannelDriver, Gain, Input, Pair, SensorSource};
use crate::robot::commands::GaitCommand;
use crate::robot::config::{ENVIRONMENT_CUTS, PERIMETER_THRESHOLD};

pub const ENVIRONMENT_PAIR: Pair = Pair::A2A3;
pub const PERIMETER_INPUTS: [Input; 2] = [Input::A0, Input::A1];
pub const SENSOR_GAIN: Gain = Gain::One;

/// One poll of all three sensors, in raw ADC counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Readings {
    pub environment: i16,
    pub perimeter: [i16; 2],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// A perimeter reading strictly above this is a hit.
    pub perimeter: i16,
    /// Upper bounds (inclusive) of the rotate cw, rotate ccw and walk forward bands.
    pub cuts: [i16; 3],
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            perimeter: PERIMETER_THRESHOLD,
            cuts: ENVIRONMENT_CUTS,
        }
    }
}

impl Thresholds {
    pub fn classify(&self, readings: &Readings) -> GaitCommand {
        if readings.perimeter.iter().any(|&r| r > self.perimeter) {
            return GaitCommand::WalkBackward;
        }
        let [cw, ccw, forward] = self.cuts;
        match readings.environment {
            e if e <= cw => GaitCommand::RotateCw,
            e if e <= ccw => GaitCommand::RotateCcw,
            e if e <= forward => GaitCommand::WalkForward,
            _ => GaitCommand::WalkBackward,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Error<S, D> {
    Sensor(S),
    Gait(crate::Error<D>),
}

impl<S: Debug, D: Debug> Display for Error<S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Sensor(e) => write!(f, "sensor error: {e:?}"),
            Error::Gait(e) => write!(f, "gait error: {e}"),
        }
    }
}

pub struct Dispatcher<S> {
    sensors: S,
    thresholds: Thresholds,
}

impl<S: SensorSource> Dispatcher<S> {
    pub fn new(sensors: S) -> Self {
        Self {
            sensors,
            thresholds: Thresholds::default(),
        }
    }

    pub fn release(self) -> S {
        self.sensors
    }

    pub fn sample(&mut self) -> Result<Readings, S::Error> {
        let environment = self
            .sensors
            .read_differential(ENVIRONMENT_PAIR, SENSOR_GAIN)?;
        let [p0, p1] = PERIMETER_INPUTS;
        let perimeter = [
            self.sensors.read_single(p0, SENSOR_GAIN)?,
            self.sensors.read_single(p1, SENSOR_GAIN)?,
        ];
        info!(
            "[DISPATCH] perimeter {} {} environment {}",
            perimeter[0], perimeter[1], environment
        );
        Ok(Readings {
            environment,
            perimeter,
        })
    }

    /// Polls the sensors and picks the gait for the readings.
    pub fn next_command(&mut self) -> Result<GaitCommand, S::Error> {
        let readings = self.sample()?;
        Ok(self.thresholds.classify(&readings))
    }

    /// Keeps polling and running `steps`-cycle gaits until `expired` says the window is over,
    /// then parks the robot. Returns the number of gaits run.
    ///
    /// `expired` is only checked between gaits; a started gait always completes.
    pub fn run_window<D, T>(
        &mut self,
        engine: &mut GaitEngine<D, T>,
        steps: u32,
        mut expired: impl FnMut() -> bool,
    ) -> Result<u32, Error<S::Error, D::Error>>
    where
        D: ChannelDriver,
        T: DelayNs,
    {
        let mut runs = 0;
        while !expired() {
            let command = self.next_command().map_err(Error::Sensor)?;
            info!("[DISPATCH] {command}");
            engine.execute(command, steps).map_err(Error::Gait)?;
            runs += 1;
        }
        engine.park().map_err(Error::Gait)?;
        Ok(runs)
    }
}
