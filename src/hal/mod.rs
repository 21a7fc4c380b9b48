//! Hardware seams of the walker.
//!
//! - [`ChannelDriver`]: writes a duty-cycle pair to a numbered PWM channel. Implemented for the
//!   PCA9685 board in [`pca9685`] and by [`NullDriver`] for dry runs.
//! - [`SensorSource`]: raw single-ended and differential ADC readings. Implemented by the
//!   ADS1115 driver in [`ads1115`].
pub mod ads1115;
pub mod pca9685;

use core::convert::Infallible;
use core::fmt::Debug;

pub use ads1115::{Ads1115, Gain, Input, Pair};

/// PWM output stage shared by all joints.
pub trait ChannelDriver {
    type Error: Debug;

    /// Sets the on and off counts of `channel`. An `off` of 0 de-energizes the channel.
    fn set_channel(&mut self, channel: u8, on: u16, off: u16) -> Result<(), Self::Error>;
}

impl<T: ChannelDriver + ?Sized> ChannelDriver for &mut T {
    type Error = T::Error;

    fn set_channel(&mut self, channel: u8, on: u16, off: u16) -> Result<(), Self::Error> {
        T::set_channel(self, channel, on, off)
    }
}

/// Accepts every write and drives nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDriver;

impl ChannelDriver for NullDriver {
    type Error = Infallible;

    fn set_channel(&mut self, _channel: u8, _on: u16, _off: u16) -> Result<(), Infallible> {
        Ok(())
    }
}

/// Analog inputs read by the command dispatcher.
pub trait SensorSource {
    type Error: Debug;

    fn read_differential(&mut self, pair: Pair, gain: Gain) -> Result<i16, Self::Error>;

    fn read_single(&mut self, input: Input, gain: Gain) -> Result<i16, Self::Error>;
}
