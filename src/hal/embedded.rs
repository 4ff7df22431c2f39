//! Adapters from `embedded-hal` 1.0 peripherals to this crate's traits.
//!
//! Any board whose HAL implements [`embedded_hal::i2c::I2c`] and
//! [`embedded_hal::delay::DelayNs`] can drive the sensor and the LCD through
//! these wrappers.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{ErrorKind, I2c};

use crate::traits::{DelayMs, I2cBus};

/// A failed transfer on an `embedded-hal` bus.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("i2c transfer failed: {kind:?}")]
pub struct BusError {
    /// Portable classification reported by the HAL.
    pub kind: ErrorKind,
}

/// [`I2cBus`] over an `embedded-hal` I2C master.
#[derive(Debug)]
pub struct EmbeddedI2c<I> {
    inner: I,
}

impl<I: I2c> EmbeddedI2c<I> {
    /// Wrap a HAL bus
    pub fn new(inner: I) -> Self {
        Self { inner }
    }

    /// Give the HAL bus back
    pub fn into_inner(self) -> I {
        self.inner
    }
}

fn classify<E: embedded_hal::i2c::Error>(error: E) -> BusError {
    BusError { kind: error.kind() }
}

impl<I: I2c> I2cBus for EmbeddedI2c<I> {
    type Error = BusError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), BusError> {
        self.inner.write(address, data).map_err(classify)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), BusError> {
        self.inner.read(address, buf).map_err(classify)
    }

    fn write_read(&mut self, address: u8, data: &[u8], buf: &mut [u8]) -> Result<(), BusError> {
        self.inner.write_read(address, data, buf).map_err(classify)
    }
}

/// [`DelayMs`] over an `embedded-hal` delay provider.
#[derive(Debug)]
pub struct EmbeddedDelay<D> {
    inner: D,
}

impl<D: DelayNs> EmbeddedDelay<D> {
    /// Wrap a HAL delay
    pub fn new(inner: D) -> Self {
        Self { inner }
    }
}

impl<D: DelayNs> DelayMs for EmbeddedDelay<D> {
    fn delay_ms(&mut self, ms: u32) {
        self.inner.delay_ms(ms);
    }
}
