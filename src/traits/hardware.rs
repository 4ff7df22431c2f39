//! Hardware abstraction traits for the bus, the temperature sensor and delays.
//!
//! This module defines the hardware interfaces that let rs-tempmon run on
//! different platforms (ESP32, any `embedded-hal` board, desktop mocks).
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`I2cBus`] | Raw two-wire transfers against a 7-bit address |
//! | [`TemperatureSensor`] | One temperature [`Measurement`] per call |
//! | [`DelayMs`] | Blocking millisecond delay |
//!
//! # Implementation
//!
//! For testing and desktop development, use the mock implementations
//! from [`crate::hal::mock`]. For real boards, wrap an `embedded-hal` bus in
//! `hal::EmbeddedI2c` (requires the `hal` feature).
//!
//! # Example
//!
//! ```rust
//! use rs_tempmon::traits::{TemperatureSensor, TemperatureUnit};
//! use rs_tempmon::hal::MockSensor;
//!
//! let mut sensor = MockSensor::new();
//! sensor.queue_reading(71.5);
//!
//! assert_eq!(sensor.read(), Ok(71.5));
//! assert_eq!(sensor.unit(), TemperatureUnit::Fahrenheit);
//! ```

/// A single scalar temperature reading in the sensor's [`TemperatureUnit`].
pub type Measurement = f32;

/// Unit a [`Measurement`] is expressed in.
///
/// # Default
///
/// Defaults to [`Fahrenheit`](Self::Fahrenheit), the unit shown on the LCD.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TemperatureUnit {
    /// Degrees Celsius.
    Celsius,
    /// Degrees Fahrenheit.
    #[default]
    Fahrenheit,
}

impl TemperatureUnit {
    /// Single-letter suffix used on the display.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_tempmon::TemperatureUnit;
    ///
    /// assert_eq!(TemperatureUnit::Celsius.symbol(), 'C');
    /// assert_eq!(TemperatureUnit::Fahrenheit.symbol(), 'F');
    /// ```
    #[inline]
    pub const fn symbol(&self) -> char {
        match self {
            TemperatureUnit::Celsius => 'C',
            TemperatureUnit::Fahrenheit => 'F',
        }
    }

    /// Converts a Celsius value into this unit.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_tempmon::TemperatureUnit;
    ///
    /// assert_eq!(TemperatureUnit::Celsius.from_celsius(21.5), 21.5);
    /// assert_eq!(TemperatureUnit::Fahrenheit.from_celsius(100.0), 212.0);
    /// ```
    #[inline]
    pub fn from_celsius(&self, celsius: f32) -> f32 {
        match self {
            TemperatureUnit::Celsius => celsius,
            TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    /// Parse a unit from text input.
    ///
    /// Accepts `"c"`, `"celsius"`, `"f"` and `"fahrenheit"`. Input is trimmed
    /// and case-insensitive.
    ///
    /// # Examples
    ///
    /// ```
    /// use rs_tempmon::TemperatureUnit;
    ///
    /// assert_eq!(TemperatureUnit::from_text("C"), Some(TemperatureUnit::Celsius));
    /// assert_eq!(TemperatureUnit::from_text(" fahrenheit "), Some(TemperatureUnit::Fahrenheit));
    /// assert_eq!(TemperatureUnit::from_text("kelvin"), None);
    /// ```
    pub fn from_text(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("c") || s.eq_ignore_ascii_case("celsius") {
            Some(TemperatureUnit::Celsius)
        } else if s.eq_ignore_ascii_case("f") || s.eq_ignore_ascii_case("fahrenheit") {
            Some(TemperatureUnit::Fahrenheit)
        } else {
            None
        }
    }
}

/// Two-wire (I2C) bus master.
///
/// The transport every device driver in this crate talks through. Transfers
/// are blocking; a stalled transfer stalls the caller.
///
/// # Example Implementation
///
/// ```rust,ignore
/// use rs_tempmon::traits::I2cBus;
///
/// struct MyBus { /* peripheral handle */ }
///
/// impl I2cBus for MyBus {
///     type Error = ();
///
///     fn write(&mut self, address: u8, data: &[u8]) -> Result<(), ()> { Ok(()) }
///     fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), ()> { Ok(()) }
///     fn write_read(&mut self, address: u8, data: &[u8], buf: &mut [u8]) -> Result<(), ()> {
///         Ok(())
///     }
/// }
/// ```
pub trait I2cBus {
    /// Error type for bus transfers.
    type Error;

    /// Writes `data` to the device at the 7-bit `address`.
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Reads `buf.len()` bytes from the device at `address`.
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Writes `data` then reads into `buf` with a repeated start.
    ///
    /// Used to select a register and read it back in one transaction.
    fn write_read(&mut self, address: u8, data: &[u8], buf: &mut [u8])
        -> Result<(), Self::Error>;
}

impl<B: I2cBus + ?Sized> I2cBus for &mut B {
    type Error = B::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        (**self).read(address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        data: &[u8],
        buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        (**self).write_read(address, data, buf)
    }
}

/// Temperature sensor trait.
///
/// Produces one [`Measurement`] per call. A failed transfer is reported as
/// `Err` and the monitor decides whether to skip the tick or stop.
pub trait TemperatureSensor {
    /// Error type for sensor reads.
    type Error;

    /// Takes a fresh measurement.
    fn read(&mut self) -> Result<Measurement, Self::Error>;

    /// Unit the measurements are expressed in.
    fn unit(&self) -> TemperatureUnit {
        TemperatureUnit::Fahrenheit
    }
}

/// Blocking millisecond delay.
///
/// Used for controller settle times and the pause between ticks.
pub trait DelayMs {
    /// Blocks for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

impl<T: DelayMs + ?Sized> DelayMs for &mut T {
    fn delay_ms(&mut self, ms: u32) {
        (**self).delay_ms(ms)
    }
}
