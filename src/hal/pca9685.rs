//! PCA9685 16-channel PWM board as the actuator driver.
use embedded_hal::i2c::I2c;
use log::info;
use pwm_pca9685::{Address, Channel, Error, Pca9685};

use super::ChannelDriver;
use crate::robot::config::{pca_prescale, SIGNAL_FREQUENCY};

static CHANNELS: [Channel; 16] = [
    Channel::C0,
    Channel::C1,
    Channel::C2,
    Channel::C3,
    Channel::C4,
    Channel::C5,
    Channel::C6,
    Channel::C7,
    Channel::C8,
    Channel::C9,
    Channel::C10,
    Channel::C11,
    Channel::C12,
    Channel::C13,
    Channel::C14,
    Channel::C15,
];

impl<I2C, E> ChannelDriver for Pca9685<I2C>
where
    I2C: I2c<Error = E>,
    E: core::fmt::Debug,
{
    type Error = Error<E>;

    fn set_channel(&mut self, channel: u8, on: u16, off: u16) -> Result<(), Self::Error> {
        let channel = *CHANNELS
            .get(channel as usize)
            .ok_or(Error::InvalidInputData)?;
        self.set_channel_on_off(channel, on, off)
    }
}

/// Opens the board at `address`, sets the servo frequency and wakes the oscillator.
pub fn init<I2C, E>(i2c: I2C, address: u8) -> Result<Pca9685<I2C>, Error<E>>
where
    I2C: I2c<Error = E>,
    E: core::fmt::Debug,
{
    let mut pwm = Pca9685::new(i2c, Address::from(address))?;
    pwm.set_prescale(pca_prescale(SIGNAL_FREQUENCY))?;
    pwm.enable()?;
    info!(
        "PCA9685 at {address:#04x} running at {} Hz",
        SIGNAL_FREQUENCY.raw()
    );
    Ok(pwm)
}
