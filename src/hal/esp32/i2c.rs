//! I2C master on the ESP32 using the ESP-IDF driver.

use crate::traits::I2cBus;
use esp_idf_hal::delay::BLOCK;
use esp_idf_hal::gpio::{InputPin, OutputPin};
use esp_idf_hal::i2c::{I2c, I2cConfig, I2cDriver};
use esp_idf_hal::peripheral::Peripheral;
use esp_idf_hal::prelude::*;
use esp_idf_hal::sys::EspError;

/// Blocking I2C master shared by the sensor and the LCD backpack.
///
/// # Hardware Setup
///
/// - GPIO8 → SDA (both devices)
/// - GPIO9 → SCL (both devices)
/// - 4.7k pull-ups to 3.3V (most breakout boards carry them)
///
/// # Example
///
/// ```ignore
/// use rs_tempmon::hal::esp32::{pins, Esp32I2c};
///
/// let peripherals = Peripherals::take()?;
/// let bus = Esp32I2c::new(
///     peripherals.i2c0,
///     peripherals.pins.gpio8,
///     peripherals.pins.gpio9,
///     pins::I2C_BAUD_HZ,
/// )?;
/// ```
pub struct Esp32I2c<'d> {
    driver: I2cDriver<'d>,
}

impl<'d> Esp32I2c<'d> {
    /// Configures the I2C peripheral as a master at `baud_hz`.
    ///
    /// # Errors
    ///
    /// Returns an error if the ESP-IDF driver cannot be installed.
    pub fn new<I: I2c>(
        i2c: impl Peripheral<P = I> + 'd,
        sda: impl Peripheral<P = impl InputPin + OutputPin> + 'd,
        scl: impl Peripheral<P = impl InputPin + OutputPin> + 'd,
        baud_hz: u32,
    ) -> Result<Self, EspError> {
        let config = I2cConfig::new().baudrate(baud_hz.Hz().into());
        let driver = I2cDriver::new(i2c, sda, scl, &config)?;
        Ok(Self { driver })
    }
}

impl I2cBus for Esp32I2c<'_> {
    type Error = EspError;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), EspError> {
        self.driver.write(address, data, BLOCK)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), EspError> {
        self.driver.read(address, buf, BLOCK)
    }

    fn write_read(&mut self, address: u8, data: &[u8], buf: &mut [u8]) -> Result<(), EspError> {
        self.driver.write_read(address, data, buf, BLOCK)
    }
}
