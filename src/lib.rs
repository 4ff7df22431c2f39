//! # rs-tempmon
//!
//! An I2C temperature monitor that shows a smoothed reading and its rate of
//! change on a 16x2 character LCD without flicker.
//!
//! ## Features
//!
//! - **Noise reduction**: Sliding-window mean blended into an exponential moving average
//! - **Rate of change**: Percent change against the oldest sample in the window
//! - **Hysteresis**: Shown values only move when the change exceeds a threshold
//! - **Flicker-free rendering**: Rows are overwritten in place, never cleared
//! - **Hardware abstraction**: Traits for the bus, sensor, display and delay
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `traits` - Hardware and diagnostic abstractions
//! - `filter` - Sliding window and exponential smoothing
//! - `hysteresis` - Update gates for displayed values
//! - `render` / `surface` - Line-diff rendering onto the display
//! - `monitor` - The control loop that ties everything together
//! - `mcp9808` / `hd44780` - Device drivers for the sensor and the LCD backpack
//! - `hal` - Concrete implementations (mock for testing, host, esp32 for hardware)
//!
//! ## Example
//!
//! ```rust
//! use rs_tempmon::{
//!     config::MonitorConfig,
//!     hal::{MockDelay, MockDisplay, MockSensor},
//!     Monitor, Row,
//! };
//!
//! let mut sensor = MockSensor::new();
//! sensor.queue_readings(&[72.0, 72.0, 72.0, 72.0, 72.0]);
//!
//! let mut monitor: Monitor<_, _, _> =
//!     Monitor::new(sensor, MockDisplay::new(), (), &MonitorConfig::default()).unwrap();
//! monitor.start().unwrap();
//!
//! // Drive the loop one tick at a time
//! let mut delay = MockDelay::new();
//! for _ in 0..5 {
//!     monitor.step(&mut delay).unwrap();
//! }
//!
//! assert_eq!(monitor.surface().line(Row::Top), "72.00 F");
//! assert_eq!(monitor.surface().line(Row::Bottom), "+0.00%");
//! assert_eq!(delay.total_ms, 5 * 250);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Shared configuration for desktop and ESP32 builds.
pub mod config;
/// Noise-reduction filter producing smoothed values and rate of change.
pub mod filter;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// HD44780 LCD driver over a PCF8574 I2C backpack.
pub mod hd44780;
/// Hysteresis gates that suppress sub-threshold changes.
pub mod hysteresis;
/// MCP9808 temperature sensor driver.
pub mod mcp9808;
/// Control loop coordinating sensor, filter, gates and display.
pub mod monitor;
/// Minimal-write row updates.
pub mod render;
/// Two-row display surface remembering what each row shows.
pub mod surface;
/// Core traits for hardware abstraction and diagnostics.
pub mod traits;

pub use config::{
    ConfigError, DisplaySettings, FilterSettings, GateSettings, MonitorConfig, SensorSettings,
    TransportPolicy,
};
pub use filter::SignalFilter;
pub use hysteresis::HysteresisGate;
pub use monitor::{Monitor, MonitorError, MonitorStats, Reading, TickError};
pub use surface::DisplaySurface;
pub use traits::{
    CharacterDisplay, DelayMs, DiagnosticSink, I2cBus, LineBuffer, Measurement, Row,
    TemperatureSensor, TemperatureUnit, TracingSink, COLUMNS, ROWS,
};
