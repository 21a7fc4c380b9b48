use embedded_hal::delay::DelayNs;
use fugit::MillisDurationU32;
use log::{debug, info};

use super::sequence::{self, GaitSequence, Motion};
use super::stance::{Rotation, Stance, StanceTable, STANCES};
use crate::error::Error;
use crate::hal::ChannelDriver;
use crate::robot::assembly::LegAssembly;
use crate::robot::commands::GaitCommand;
use crate::robot::config::Timing;
use crate::robot::leg::{Leg, LegMap};
use crate::robot::servo::Calibration;

/// Which way the body counts as "front".
///
/// Facing backward binds every position to the physical leg on the opposite corner, so the
/// same scripts walk the other way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Heading {
    #[default]
    Forward,
    Backward,
}

impl Heading {
    /// Physical leg answering to `position`.
    pub const fn resolve(self, position: Leg) -> Leg {
        match self {
            Heading::Forward => position,
            Heading::Backward => position.opposite(),
        }
    }
}

/// Owns the twelve servos and moves them through stances and gait scripts.
///
/// Every slow transition is split into `timing.steps` ticks. All joints taking part in a
/// transition move on every tick, so they all arrive together on the last one.
pub struct GaitEngine<D, T> {
    driver: D,
    delay: T,
    legs: LegMap<LegAssembly>, // indexed by physical corner
    heading: Heading,
    stances: StanceTable,
    timing: Timing,
}

type MoveResult<E> = Result<(), Error<E>>;

impl<D, T> GaitEngine<D, T>
where
    D: ChannelDriver,
    T: DelayNs,
{
    /// Creates the servos leg by leg, sending each joint home.
    pub fn new(
        mut driver: D,
        delay: T,
        calibration: &LegMap<[Calibration; 3]>,
    ) -> Result<Self, Error<D::Error>> {
        let legs = LegMap::new(
            LegAssembly::new(&mut driver, &calibration[Leg::FrontLeft])?,
            LegAssembly::new(&mut driver, &calibration[Leg::FrontRight])?,
            LegAssembly::new(&mut driver, &calibration[Leg::BackLeft])?,
            LegAssembly::new(&mut driver, &calibration[Leg::BackRight])?,
        );
        info!("Quadruped initialized!");
        Ok(Self {
            driver,
            delay,
            legs,
            heading: Heading::Forward,
            stances: STANCES,
            timing: Timing::default(),
        })
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_stances(mut self, stances: StanceTable) -> Self {
        self.stances = stances;
        self
    }

    pub fn timing(&self) -> &Timing {
        &self.timing
    }

    pub fn stances(&self) -> &StanceTable {
        &self.stances
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn face(&mut self, heading: Heading) {
        self.heading = heading;
    }

    /// Leg currently bound to `position`.
    pub fn leg(&self, position: Leg) -> &LegAssembly {
        &self.legs[self.heading.resolve(position)]
    }

    /// Current angles per position.
    pub fn angles(&self) -> LegMap<Stance> {
        LegMap::from_fn(|position| self.leg(position).angles())
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn release(self) -> (D, T) {
        (self.driver, self.delay)
    }

    // ---- single leg ----

    /// Jumps one leg to `stance` and waits `pause`.
    pub fn pose(
        &mut self,
        position: Leg,
        stance: Stance,
        pause: MillisDurationU32,
    ) -> MoveResult<D::Error> {
        let leg = &mut self.legs[self.heading.resolve(position)];
        leg.pose(&mut self.driver, &mut self.delay, stance, pause)
    }

    pub fn slow_pose(&mut self, position: Leg, stance: Stance) -> MoveResult<D::Error> {
        debug!("[GAIT] {position} to {stance}");
        let leg = &mut self.legs[self.heading.resolve(position)];
        leg.slow_pose(&mut self.driver, &mut self.delay, stance, &self.timing)
    }

    pub fn rest(&mut self, position: Leg) -> MoveResult<D::Error> {
        self.slow_pose(position, self.stances.rest)
    }

    pub fn side_step(&mut self, position: Leg) -> MoveResult<D::Error> {
        self.slow_pose(position, self.stances.side_step)
    }

    pub fn reach(&mut self, position: Leg) -> MoveResult<D::Error> {
        self.slow_pose(position, self.stances.reach)
    }

    pub fn bend_up(&mut self, position: Leg) -> MoveResult<D::Error> {
        let leg = &mut self.legs[self.heading.resolve(position)];
        leg.bend_up(
            &mut self.driver,
            &mut self.delay,
            self.stances.bent_up,
            &self.timing,
        )
    }

    // ---- all legs ----

    /// Moves all twelve joints to their per-position targets, arriving together.
    ///
    /// Increments are fixed up front. Each tick walks the legs in [`Leg::ALL`] order, hip to
    /// ankle, pausing after every leg.
    pub fn propel_slowly(&mut self, targets: &LegMap<Stance>) -> MoveResult<D::Error> {
        let steps = self.timing.steps;
        let increments = LegMap::from_fn(|position| {
            self.leg(position)
                .increments_towards(targets[position], steps)
        });
        let pause = self.timing.tick_pause().ticks();

        let Self {
            driver,
            delay,
            legs,
            heading,
            ..
        } = self;
        for _ in 0..steps {
            for position in Leg::ALL {
                legs[heading.resolve(position)].step(driver, &increments[position])?;
                delay.delay_us(pause);
            }
        }
        Ok(())
    }

    /// Every leg to the same `stance`.
    pub fn move_joints_simultaneously(&mut self, stance: Stance) -> MoveResult<D::Error> {
        self.propel_slowly(&LegMap::splat(stance))
    }

    pub fn zero_pose(&mut self) -> MoveResult<D::Error> {
        self.move_joints_simultaneously(self.stances.zero)
    }

    pub fn rest_pose_simultaneously(&mut self) -> MoveResult<D::Error> {
        self.move_joints_simultaneously(self.stances.rest)
    }

    pub fn high_pose_simultaneously(&mut self) -> MoveResult<D::Error> {
        self.move_joints_simultaneously(self.stances.high)
    }

    /// Snaps every joint to 0 without interpolating. Every gait starts here.
    pub fn fast_zero_pose(&mut self) -> MoveResult<D::Error> {
        for position in Leg::ALL {
            self.pose(position, self.stances.zero, MillisDurationU32::from_ticks(0))?;
        }
        Ok(())
    }

    pub fn settle(&mut self) {
        self.delay.delay_ms(self.timing.budget.ticks());
    }

    /// De-energizes every channel. Stored angles are kept.
    pub fn disable(&mut self) -> MoveResult<D::Error> {
        let Self { driver, legs, .. } = self;
        for position in Leg::ALL {
            legs[position].disable(driver)?;
        }
        Ok(())
    }

    /// Rest, rise to the high stance, power down.
    pub fn park(&mut self) -> MoveResult<D::Error> {
        info!("[GAIT] park");
        self.rest_pose_simultaneously()?;
        self.high_pose_simultaneously()?;
        self.disable()
    }

    // ---- scripts ----

    pub fn perform(&mut self, motion: &Motion) -> MoveResult<D::Error> {
        debug!("[GAIT] {motion}");
        match motion {
            Motion::ZeroPose => self.zero_pose(),
            Motion::RestAll => self.rest_pose_simultaneously(),
            Motion::HighAll => self.high_pose_simultaneously(),
            Motion::BendUp(leg) => self.bend_up(*leg),
            Motion::Rest(leg) => self.rest(*leg),
            Motion::SideStep(leg) => self.side_step(*leg),
            Motion::Reach(leg) => self.reach(*leg),
            Motion::Propel(targets) => self.propel_slowly(targets),
            Motion::Settle => {
                self.settle();
                Ok(())
            }
            Motion::Disable => self.disable(),
        }
    }

    /// Runs `sequence` to the end, or until the first failing write.
    pub fn run(&mut self, sequence: &GaitSequence) -> MoveResult<D::Error> {
        for motion in sequence.motions() {
            self.perform(motion)?;
        }
        Ok(())
    }

    /// Walks `steps` cycles with the current heading, starting from a snap to zero.
    pub fn walk(&mut self, steps: u32) -> MoveResult<D::Error> {
        self.fast_zero_pose()?;
        let sequence = sequence::walk(steps, &self.stances);
        self.run(&sequence)
    }

    pub fn walk_forward(&mut self, steps: u32) -> MoveResult<D::Error> {
        info!("[GAIT] walk forward {steps}");
        self.face(Heading::Forward);
        self.walk(steps)
    }

    pub fn walk_backward(&mut self, steps: u32) -> MoveResult<D::Error> {
        info!("[GAIT] walk backward {steps}");
        self.face(Heading::Backward);
        self.walk(steps)
    }

    /// Turns in place `steps` times using the per-position `twist` targets, starting from a
    /// snap to zero.
    pub fn rotate(&mut self, twist: LegMap<Stance>, steps: u32) -> MoveResult<D::Error> {
        self.fast_zero_pose()?;
        self.run(&sequence::rotate(twist, steps))
    }

    pub fn rotate_cw(&mut self, steps: u32) -> MoveResult<D::Error> {
        info!("[GAIT] rotate clockwise {steps}");
        self.face(Heading::Forward);
        self.rotate(self.stances.twist(Rotation::Clockwise), steps)
    }

    pub fn rotate_ccw(&mut self, steps: u32) -> MoveResult<D::Error> {
        info!("[GAIT] rotate counterclockwise {steps}");
        self.face(Heading::Forward);
        self.rotate(self.stances.twist(Rotation::CounterClockwise), steps)
    }

    pub fn execute(&mut self, command: GaitCommand, steps: u32) -> MoveResult<D::Error> {
        match command {
            GaitCommand::WalkForward => self.walk_forward(steps),
            GaitCommand::WalkBackward => self.walk_backward(steps),
            GaitCommand::RotateCw => self.rotate_cw(steps),
            GaitCommand::RotateCcw => self.rotate_ccw(steps),
        }
    }
}
