//! Gait scripts as data.
//!
//! A [`GaitSequence`] is a setup script, a cycle repeated `repeats` times, and a closing script.
//! Nothing in it depends on sensed state, so the whole run is known before the first servo
//! moves. The [`GaitEngine`](super::engine::GaitEngine) executes the motions in order.
use core::fmt::Display;

use heapless::Vec;

use super::stance::{Stance, StanceTable};
use crate::robot::leg::{Leg, LegMap};

pub const SCRIPT_CAPACITY: usize = 12;

pub type Script = Vec<Motion, SCRIPT_CAPACITY>;

/// One transition of a gait script.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// All legs to the zero stance together.
    ZeroPose,
    /// All legs to rest together.
    RestAll,
    /// All legs to the high stance together.
    HighAll,
    BendUp(Leg),
    Rest(Leg),
    SideStep(Leg),
    Reach(Leg),
    /// All twelve joints to their per-leg targets together.
    Propel(LegMap<Stance>),
    /// Hold still for one budget.
    Settle,
    /// De-energize every channel.
    Disable,
}

impl Display for Motion {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Motion::ZeroPose => f.write_str("zero pose"),
            Motion::RestAll => f.write_str("rest all"),
            Motion::HighAll => f.write_str("high all"),
            Motion::BendUp(leg) => write!(f, "bend up {leg}"),
            Motion::Rest(leg) => write!(f, "rest {leg}"),
            Motion::SideStep(leg) => write!(f, "side step {leg}"),
            Motion::Reach(leg) => write!(f, "reach {leg}"),
            Motion::Propel(_) => f.write_str("propel"),
            Motion::Settle => f.write_str("settle"),
            Motion::Disable => f.write_str("disable"),
        }
    }
}

/// Rest, rise, power down. Every gait ends this way.
pub const CLOSING: [Motion; 3] = [Motion::RestAll, Motion::HighAll, Motion::Disable];

/// Replant order after a twist.
pub const REPLANT_ORDER: [Leg; 4] = [Leg::FrontLeft, Leg::BackLeft, Leg::BackRight, Leg::FrontRight];

#[derive(Debug, Clone, PartialEq)]
pub struct GaitSequence {
    setup: Script,
    cycle: Script,
    closing: Script,
    repeats: u32,
}

impl GaitSequence {
    /// # Panics
    /// If a script holds more than [`SCRIPT_CAPACITY`] motions.
    pub fn new(setup: &[Motion], cycle: &[Motion], closing: &[Motion], repeats: u32) -> Self {
        Self {
            setup: setup.iter().copied().collect(),
            cycle: cycle.iter().copied().collect(),
            closing: closing.iter().copied().collect(),
            repeats,
        }
    }

    pub fn setup(&self) -> &[Motion] {
        &self.setup
    }

    pub fn cycle(&self) -> &[Motion] {
        &self.cycle
    }

    pub fn closing(&self) -> &[Motion] {
        &self.closing
    }

    /// Every motion of the run, in execution order.
    pub fn motions(&self) -> impl Iterator<Item = &Motion> + '_ {
        self.setup
            .iter()
            .chain((0..self.repeats).flat_map(move |_| self.cycle.iter()))
            .chain(self.closing.iter())
    }
}

/// Four-beat crawl. Starts from a side-stepped front right leg; each cycle moves the right
/// side then the left side forward, each half ending with a body push.
pub fn walk(steps: u32, stances: &StanceTable) -> GaitSequence {
    use Motion::*;

    let setup = [ZeroPose, RestAll, SideStep(Leg::FrontRight)];
    let cycle = [
        // 1
        BendUp(Leg::BackRight),
        SideStep(Leg::BackRight),
        // 2
        BendUp(Leg::FrontRight),
        Reach(Leg::FrontRight),
        // 3
        Propel(stances.reaching(Leg::BackLeft)),
        Settle,
        // 4
        BendUp(Leg::BackLeft),
        SideStep(Leg::BackLeft),
        // 5
        BendUp(Leg::FrontLeft),
        Reach(Leg::FrontLeft),
        // 6
        Propel(stances.reaching(Leg::BackRight)),
    ];
    GaitSequence::new(&setup, &cycle, &CLOSING, steps)
}

/// Turn in place: twist the body on planted feet, then replant one foot at a time.
pub fn rotate(twist: LegMap<Stance>, steps: u32) -> GaitSequence {
    let setup = [Motion::ZeroPose, Motion::RestAll];
    let mut cycle = [Motion::Propel(twist); 5];
    for (slot, leg) in cycle[1..].iter_mut().zip(REPLANT_ORDER) {
        *slot = Motion::Rest(leg);
    }
    GaitSequence::new(&setup, &cycle, &CLOSING, steps)
}
