//! One leg: hip, knee and ankle servos moved together.
use embedded_hal::delay::DelayNs;
use fugit::MillisDurationU32;
use log::debug;

use super::config::Timing;
use super::joint::Joint;
use super::servo::{Calibration, Servo};
use crate::error::Error;
use crate::gait::stance::Stance;
use crate::hal::ChannelDriver;

#[derive(Debug)]
pub struct LegAssembly {
    servos: [Servo; 3], // [hip, knee, ankle]
}

impl LegAssembly {
    /// Builds the three servos in joint order, homing each one.
    pub fn new<D: ChannelDriver>(
        driver: &mut D,
        calibration: &[Calibration; 3],
    ) -> Result<Self, Error<D::Error>> {
        let [hip, knee, ankle] = calibration;
        Ok(Self {
            servos: [
                Servo::new(driver, *hip)?,
                Servo::new(driver, *knee)?,
                Servo::new(driver, *ankle)?,
            ],
        })
    }

    pub fn servo(&self, joint: Joint) -> &Servo {
        &self.servos[joint as usize]
    }

    /// Current hip, knee and ankle angles.
    pub fn angles(&self) -> Stance {
        let [hip, knee, ankle] = self.servos.each_ref().map(Servo::angle);
        Stance::new(hip, knee, ankle)
    }

    /// Jumps straight to `stance`, then waits `pause`.
    pub fn pose<D: ChannelDriver, T: DelayNs>(
        &mut self,
        driver: &mut D,
        delay: &mut T,
        stance: Stance,
        pause: MillisDurationU32,
    ) -> Result<(), Error<D::Error>> {
        for (servo, angle) in self.servos.iter_mut().zip(stance.angles()) {
            servo.set_angle(driver, angle)?;
        }
        delay.delay_ms(pause.ticks());
        Ok(())
    }

    /// Interpolates all three joints to `stance`; they all arrive on the last tick.
    pub fn slow_pose<D: ChannelDriver, T: DelayNs>(
        &mut self,
        driver: &mut D,
        delay: &mut T,
        stance: Stance,
        timing: &Timing,
    ) -> Result<(), Error<D::Error>> {
        self.interpolate(driver, delay, &Joint::ALL, stance.angles(), timing)
    }

    /// Lifts the foot by folding knee and ankle to the `bent` angles. The hip stays put.
    pub fn bend_up<D: ChannelDriver, T: DelayNs>(
        &mut self,
        driver: &mut D,
        delay: &mut T,
        bent: Stance,
        timing: &Timing,
    ) -> Result<(), Error<D::Error>> {
        self.interpolate(
            driver,
            delay,
            &[Joint::Knee, Joint::Ankle],
            bent.angles(),
            timing,
        )
    }

    /// Per-joint increments towards `targets`, for the multi-leg interpolation.
    pub fn increments_towards(&self, targets: Stance, steps: u32) -> [f32; 3] {
        let targets = targets.angles();
        core::array::from_fn(|i| self.servos[i].increment_towards(targets[i], steps))
    }

    /// Applies one tick of `increments` in joint order.
    pub fn step<D: ChannelDriver>(
        &mut self,
        driver: &mut D,
        increments: &[f32; 3],
    ) -> Result<(), Error<D::Error>> {
        for (servo, delta) in self.servos.iter_mut().zip(increments) {
            servo.move_by(driver, *delta)?;
        }
        Ok(())
    }

    pub fn disable<D: ChannelDriver>(&mut self, driver: &mut D) -> Result<(), Error<D::Error>> {
        for servo in self.servos.iter_mut() {
            servo.disable(driver)?;
        }
        Ok(())
    }

    fn interpolate<D: ChannelDriver, T: DelayNs>(
        &mut self,
        driver: &mut D,
        delay: &mut T,
        joints: &[Joint],
        targets: [f32; 3],
        timing: &Timing,
    ) -> Result<(), Error<D::Error>> {
        let mut increments = [0.0; 3];
        for &joint in joints {
            let i = joint as usize;
            increments[i] = self.servos[i].increment_towards(targets[i], timing.steps);
            debug!(
                "{} {}: {} -> {}",
                self.servos[i].channel(),
                joint,
                self.servos[i].angle(),
                targets[i]
            );
        }

        let pause = timing.tick_pause().ticks();
        for _ in 0..timing.steps {
            for &joint in joints {
                let i = joint as usize;
                self.servos[i].move_by(driver, increments[i])?;
            }
            delay.delay_us(pause);
        }
        Ok(())
    }
}
