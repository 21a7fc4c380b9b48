use fugit::{HertzU32, MillisDurationU32, MicrosDurationU32, SecsDurationU32};

use super::leg::LegMap;
use super::servo::Calibration;

// MOVEMENT
/// Number of equal increments every interpolated transition is split into.
pub const STEP_COUNT: u32 = 40;
/// Time budget of one transition.
pub const DELAY: MillisDurationU32 = MillisDurationU32::from_ticks(250);

// ACTUATORS
pub const SIGNAL_FREQUENCY: HertzU32 = HertzU32::from_raw(50);
/// Internal oscillator of the PCA9685.
pub const PCA_OSCILLATOR: HertzU32 = HertzU32::from_raw(25_000_000);
/// Counts per signal period of the PCA9685.
pub const PCA_RESOLUTION: u32 = 4096;
pub const PCA_ADDRESS: u8 = 0x41;

pub const ANGLE_MIN: i16 = -70;
pub const ANGLE_MAX: i16 = 70;

const fn cal(channel: u8, signal_min: u16, signal_max: u16) -> Calibration {
    Calibration::new(channel, signal_min, signal_max, ANGLE_MIN, ANGLE_MAX)
}

/// Bench-measured channel and signal range of every joint, `[hip, knee, ankle]` per leg.
///
/// `signal_min` is the count at `ANGLE_MIN`:
/// - hip: towards the side, away from the front or back
/// - knee: upper leg towards the ground
/// - ankle: lower leg folded towards the upper leg
pub const CALIBRATION: LegMap<[Calibration; 3]> = LegMap::new(
    [cal(0, 140, 460), cal(1, 150, 480), cal(2, 485, 170)],
    [cal(3, 490, 160), cal(4, 440, 120), cal(5, 150, 480)],
    [cal(6, 485, 160), cal(7, 460, 140), cal(8, 170, 480)],
    [cal(9, 190, 510), cal(10, 170, 480), cal(11, 470, 160)],
);

// SENSORS
pub const ADS_ADDRESS: u8 = 0x48;
/// Either perimeter reading above this sends the robot backward.
pub const PERIMETER_THRESHOLD: i16 = 1000;
/// Environment cut points: rotate cw, rotate ccw, walk forward, then walk backward above.
pub const ENVIRONMENT_CUTS: [i16; 3] = [-75, 50, 225];
/// Gait cycles run per dispatched command.
pub const DISPATCH_STEPS: u32 = 2;
pub const RUNNING_WINDOW: SecsDurationU32 = SecsDurationU32::from_ticks(240);
pub const REST_WINDOW: SecsDurationU32 = SecsDurationU32::from_ticks(120);

/// Interpolation settings shared by every slow transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Ticks per transition.
    pub steps: u32,
    /// Total delay of one transition, spread evenly over the ticks.
    pub budget: MillisDurationU32,
}

impl Timing {
    pub const fn new(steps: u32, budget: MillisDurationU32) -> Self {
        Self { steps, budget }
    }

    /// Pause after each tick.
    pub fn tick_pause(&self) -> MicrosDurationU32 {
        MicrosDurationU32::from_ticks(self.budget.to_micros() / self.steps.max(1))
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self::new(STEP_COUNT, DELAY)
    }
}

/// PCA9685 prescale register value for the given output frequency.
pub const fn pca_prescale(frequency: HertzU32) -> u8 {
    let value = PCA_OSCILLATOR.raw() / (PCA_RESOLUTION * frequency.raw());
    (value - 1) as u8
}
