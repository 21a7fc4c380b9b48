//! ADS1115 16-bit ADC driver, single-shot conversions only.
//!
//! Datasheet: https://www.ti.com/lit/ds/symlink/ads1115.pdf

use core::fmt::{self, Debug, Display};

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use super::SensorSource;

// Register pointers
mod reg {
    pub const CONVERSION: u8 = 0x00;
    pub const CONFIG: u8 = 0x01;
}

// Config register fields
mod cfg {
    pub const OS_SINGLE: u16 = 0x8000;
    pub const MODE_SINGLE: u16 = 0x0100;
    pub const COMP_QUE_DISABLE: u16 = 0x0003;
}

/// Differential input pair, named after the pins subtracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pair {
    A0A1,
    A0A3,
    A1A3,
    A2A3,
}

impl Pair {
    const fn mux(self) -> u16 {
        match self {
            Pair::A0A1 => 0x0000,
            Pair::A0A3 => 0x1000,
            Pair::A1A3 => 0x2000,
            Pair::A2A3 => 0x3000,
        }
    }
}

/// Single-ended input, measured against ground.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    A0,
    A1,
    A2,
    A3,
}

impl Input {
    const fn mux(self) -> u16 {
        match self {
            Input::A0 => 0x4000,
            Input::A1 => 0x5000,
            Input::A2 => 0x6000,
            Input::A3 => 0x7000,
        }
    }
}

/// Programmable gain; `One` is the ±4.096 V range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gain {
    TwoThirds,
    One,
    Two,
    Four,
    Eight,
    Sixteen,
}

impl Gain {
    const fn bits(self) -> u16 {
        match self {
            Gain::TwoThirds => 0x0000,
            Gain::One => 0x0200,
            Gain::Two => 0x0400,
            Gain::Four => 0x0600,
            Gain::Eight => 0x0800,
            Gain::Sixteen => 0x0A00,
        }
    }
}

/// Samples per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataRate {
    Sps8,
    Sps16,
    Sps32,
    Sps64,
    #[default]
    Sps128,
    Sps250,
    Sps475,
    Sps860,
}

impl DataRate {
    const fn bits(self) -> u16 {
        (self as u16) << 5
    }

    const fn hertz(self) -> u32 {
        match self {
            DataRate::Sps8 => 8,
            DataRate::Sps16 => 16,
            DataRate::Sps32 => 32,
            DataRate::Sps64 => 64,
            DataRate::Sps128 => 128,
            DataRate::Sps250 => 250,
            DataRate::Sps475 => 475,
            DataRate::Sps860 => 860,
        }
    }

    /// One conversion period plus margin.
    const fn conversion_us(self) -> u32 {
        1_000_000 / self.hertz() + 100
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Error<E> {
    Bus(E),
}

impl<E: Debug> Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Bus(e) => write!(f, "ADS1115 bus error: {e:?}"),
        }
    }
}

pub struct Ads1115<I2C, D> {
    i2c: I2C,
    delay: D,
    addr: u8,
    rate: DataRate,
}

impl<I2C, D, E> Ads1115<I2C, D>
where
    I2C: I2c<Error = E>,
    D: DelayNs,
{
    pub fn new(i2c: I2C, delay: D, addr: u8) -> Self {
        Self {
            i2c,
            delay,
            addr,
            rate: DataRate::default(),
        }
    }

    pub fn with_data_rate(mut self, rate: DataRate) -> Self {
        self.rate = rate;
        self
    }

    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    /// Starts a conversion on `mux`, waits it out and reads the signed result.
    fn convert(&mut self, mux: u16, gain: Gain) -> Result<i16, Error<E>> {
        let config = cfg::OS_SINGLE
            | mux
            | gain.bits()
            | cfg::MODE_SINGLE
            | self.rate.bits()
            | cfg::COMP_QUE_DISABLE;
        let [hi, lo] = config.to_be_bytes();
        self.i2c
            .write(self.addr, &[reg::CONFIG, hi, lo])
            .map_err(Error::Bus)?;

        self.delay.delay_us(self.rate.conversion_us());

        let mut buf = [0u8; 2];
        self.i2c
            .write_read(self.addr, &[reg::CONVERSION], &mut buf)
            .map_err(Error::Bus)?;
        Ok(i16::from_be_bytes(buf))
    }
}

impl<I2C, D, E> SensorSource for Ads1115<I2C, D>
where
    I2C: I2c<Error = E>,
    D: DelayNs,
    E: Debug,
{
    type Error = Error<E>;

    fn read_differential(&mut self, pair: Pair, gain: Gain) -> Result<i16, Self::Error> {
        self.convert(pair.mux(), gain)
    }

    fn read_single(&mut self, input: Input, gain: Gain) -> Result<i16, Self::Error> {
        self.convert(input.mux(), gain)
    }
}
