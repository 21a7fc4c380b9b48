//! Errors raised while commanding the actuators.
use core::fmt::{self, Debug, Display};

/// Failure of a joint or gait operation.
///
/// `E` is the error type of the [`ChannelDriver`](crate::hal::ChannelDriver) in use. None of
/// these are recoverable mid-sequence: the gait that hit one stops where it is.
#[derive(Debug, PartialEq, Eq)]
pub enum Error<E> {
    /// The actuator driver refused the write.
    Driver(E),
    /// The calibration mapped an angle to a count the driver register cannot hold.
    SignalOutOfRange { channel: u8, signal: i32 },
}

impl<E: Debug> Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Driver(e) => write!(f, "actuator driver error: {e:?}"),
            Error::SignalOutOfRange { channel, signal } => {
                write!(f, "channel {channel}: signal {signal} outside driver range")
            }
        }
    }
}
