//! Trait definitions for hardware abstraction and diagnostics.
//!
//! This module defines the core abstractions that allow rs-tempmon to:
//! - Run on different hardware (ESP32, any `embedded-hal` board, desktop mock)
//! - Drive different character displays
//! - Report frames to whatever diagnostic output the platform has
//!
//! # Submodules
//!
//! - `hardware`: I2C bus, temperature sensor, delay
//! - `display`: Character display trait and the fixed 2x16 geometry
//! - `sink`: Diagnostic sink trait and the `tracing` sink
//!
//! # Hardware Abstraction
//!
//! The key hardware traits are:
//!
//! - [`I2cBus`]: Raw two-wire transfers
//! - [`TemperatureSensor`]: One measurement per tick
//! - [`CharacterDisplay`]: Cursor, text and backlight control
//! - [`DelayMs`]: Blocking delay for settle times and tick pacing

pub mod display;
pub mod hardware;
pub mod sink;

pub use display::*;
pub use hardware::*;
pub use sink::*;
