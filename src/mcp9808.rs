//! MCP9808 digital temperature sensor.
//!
//! The ambient temperature register holds a 13-bit two's complement value in
//! 1/16 °C steps. The top three bits of the upper byte are alert flags and are
//! ignored.
//!
//! ```text
//!  upper: [TCRIT TUPPER TLOWER SIGN  2^7 2^6 2^5 2^4]
//!  lower: [ 2^3   2^2    2^1   2^0  2^-1 2^-2 2^-3 2^-4]
//! ```

use crate::config::SensorSettings;
use crate::traits::{I2cBus, Measurement, TemperatureSensor, TemperatureUnit};

/// Default 7-bit address (A2..A0 tied low).
pub const DEFAULT_ADDRESS: u8 = 0x18;

/// Ambient temperature register pointer.
pub const REG_AMBIENT_TEMP: u8 = 0x05;

const SIGN_BIT: u8 = 0x10;

/// Decode the two ambient temperature bytes into degrees Celsius.
///
/// # Examples
///
/// ```
/// use rs_tempmon::mcp9808::decode_celsius;
///
/// assert_eq!(decode_celsius(0x01, 0x94), 25.25);
/// assert_eq!(decode_celsius(0x1F, 0xF0), -1.0);
/// ```
pub fn decode_celsius(upper: u8, lower: u8) -> f32 {
    let raw = u16::from_be_bytes([upper, lower]) & 0x0FFF;
    let magnitude = f32::from(raw) / 16.0;
    if upper & SIGN_BIT != 0 {
        magnitude - 256.0
    } else {
        magnitude
    }
}

/// MCP9808 on an I2C bus.
#[derive(Debug)]
pub struct Mcp9808<B> {
    bus: B,
    address: u8,
    unit: TemperatureUnit,
}

impl<B: I2cBus> Mcp9808<B> {
    /// Sensor at the default address reporting Fahrenheit
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            address: DEFAULT_ADDRESS,
            unit: TemperatureUnit::Fahrenheit,
        }
    }

    /// Sensor configured from [`SensorSettings`]
    pub fn from_settings(bus: B, settings: &SensorSettings) -> Self {
        Self {
            bus,
            address: settings.address,
            unit: settings.unit,
        }
    }

    /// Builder: report in `unit`
    pub fn with_unit(mut self, unit: TemperatureUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Reads the ambient register and returns degrees Celsius.
    pub fn read_celsius(&mut self) -> Result<f32, B::Error> {
        let mut buf = [0u8; 2];
        self.bus
            .write_read(self.address, &[REG_AMBIENT_TEMP], &mut buf)?;
        Ok(decode_celsius(buf[0], buf[1]))
    }

    /// Configured address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Release the bus
    pub fn release(self) -> B {
        self.bus
    }
}

impl<B: I2cBus> TemperatureSensor for Mcp9808<B> {
    type Error = B::Error;

    fn read(&mut self) -> Result<Measurement, Self::Error> {
        let celsius = self.read_celsius()?;
        Ok(self.unit.from_celsius(celsius))
    }

    fn unit(&self) -> TemperatureUnit {
        self.unit
    }
}
