//! Hardware Abstraction Layer implementations.
//!
//! This module contains concrete implementations of the traits
//! defined in [`crate::traits`] for various platforms.
//!
//! # Available Implementations
//!
//! - `mock`: Test implementations for desktop development
//! - `bus`: One I2C bus shared by several drivers
//! - `embedded`: Adapters for any `embedded-hal` 1.0 board (requires `hal` feature)
//! - `host`: Desktop simulator pieces (requires `std` feature)
//! - `esp32`: ESP32-C3 SuperMini I2C and delay (requires `esp32` feature)

mod glass;

pub mod bus;
pub mod mock;

#[cfg(feature = "hal")]
pub mod embedded;

#[cfg(feature = "std")]
pub mod host;

#[cfg(feature = "esp32")]
pub mod esp32;

pub use bus::SharedBus;
pub use glass::Glass;
pub use mock::*;

#[cfg(feature = "hal")]
pub use embedded::{BusError, EmbeddedDelay, EmbeddedI2c};

#[cfg(feature = "std")]
pub use host::{ConsoleSink, SensorDropout, SimulatedSensor, StdDelay, TerminalDisplay};
