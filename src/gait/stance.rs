//! Named leg targets.
use core::fmt::Display;

use crate::robot::leg::{Leg, LegMap};

/// Target angles of one leg, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stance {
    pub hip: f32,
    pub knee: f32,
    pub ankle: f32,
}

impl Stance {
    pub const fn new(hip: f32, knee: f32, ankle: f32) -> Self {
        Self { hip, knee, ankle }
    }

    /// `[hip, knee, ankle]`
    pub const fn angles(&self) -> [f32; 3] {
        [self.hip, self.knee, self.ankle]
    }

    pub const fn with_hip(self, hip: f32) -> Self {
        Self { hip, ..self }
    }
}

impl Display for Stance {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {}, {})", self.hip, self.knee, self.ankle)
    }
}

/// Turning direction seen from above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

/// The stance library every gait is composed from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StanceTable {
    pub zero: Stance,
    pub rest: Stance,
    pub side_step: Stance,
    pub reach: Stance,
    /// Only knee and ankle are driven when bending up.
    pub bent_up: Stance,
    pub high: Stance,
    /// Hip magnitude of a twist; knee and ankle stay at rest.
    pub twist_hip: f32,
}

pub const STANCES: StanceTable = StanceTable {
    zero: Stance::new(0.0, 0.0, 0.0),
    rest: Stance::new(-10.0, -30.0, 40.0),
    side_step: Stance::new(-60.0, -30.0, 40.0),
    reach: Stance::new(10.0, -25.0, 40.0),
    bent_up: Stance::new(0.0, 10.0, -10.0),
    high: Stance::new(0.0, -80.0, 80.0),
    twist_hip: 30.0,
};

impl Default for StanceTable {
    fn default() -> Self {
        STANCES
    }
}

impl StanceTable {
    /// Every leg at rest except `reaching`, which reaches forward.
    pub fn reaching(&self, reaching: Leg) -> LegMap<Stance> {
        LegMap::from_fn(|leg| if leg == reaching { self.reach } else { self.rest })
    }

    /// Twist target for turning in place. Diagonal legs share a hip sign and the two
    /// diagonals swap signs between directions.
    pub fn twist(&self, rotation: Rotation) -> LegMap<Stance> {
        let hip = match rotation {
            Rotation::Clockwise => self.twist_hip,
            Rotation::CounterClockwise => -self.twist_hip,
        };
        LegMap::new(
            self.rest.with_hip(-hip),
            self.rest.with_hip(hip),
            self.rest.with_hip(hip),
            self.rest.with_hip(-hip),
        )
    }
}
