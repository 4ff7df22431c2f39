//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for every hardware trait, so the whole
//! monitor can be exercised on a desktop.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockSensor`] | [`TemperatureSensor`] | Queued readings and injected failures |
//! | [`MockDisplay`] | [`CharacterDisplay`] | Records calls and simulates the 2x16 glass |
//! | [`MockI2c`] | [`I2cBus`] | Records bus frames, scripted reads |
//! | [`MockDelay`] | [`DelayMs`] | Accumulates requested delays |
//! | [`MemorySink`] | [`DiagnosticSink`] | Captures reported frames |
//!
//! # Example
//!
//! ```rust
//! use rs_tempmon::config::MonitorConfig;
//! use rs_tempmon::hal::{MemorySink, MockDisplay, MockSensor};
//! use rs_tempmon::{Monitor, Row};
//!
//! let mut sensor = MockSensor::new();
//! sensor.queue_reading(70.0);
//!
//! let mut monitor: Monitor<_, _, _> =
//!     Monitor::new(sensor, MockDisplay::new(), MemorySink::new(), &MonitorConfig::default())
//!         .unwrap();
//! monitor.start().unwrap();
//! monitor.tick().unwrap();
//!
//! assert_eq!(monitor.surface().display().screen_line(Row::Top), "70.00 F");
//! assert_eq!(monitor.sink().frames[0].1, "+0.00%");
//! ```

use alloc::collections::VecDeque;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use super::glass::Glass;
use crate::traits::{
    CharacterDisplay, DelayMs, DiagnosticSink, I2cBus, Measurement, Row, TemperatureSensor,
    TemperatureUnit,
};

// ============================================================================
// Sensor
// ============================================================================

/// Mock temperature sensor for testing.
///
/// Readings come out in the order they were queued. Reading from an empty
/// queue fails, like a sensor that stopped answering.
///
/// # Example
///
/// ```rust
/// use rs_tempmon::hal::MockSensor;
/// use rs_tempmon::traits::TemperatureSensor;
///
/// let mut sensor = MockSensor::new();
/// sensor.queue_readings(&[70.0, 70.5]);
/// sensor.queue_failure();
///
/// assert_eq!(sensor.read(), Ok(70.0));
/// assert_eq!(sensor.read(), Ok(70.5));
/// assert_eq!(sensor.read(), Err(()));
/// assert_eq!(sensor.read(), Err(())); // Empty
/// assert_eq!(sensor.read_count, 4);
/// ```
#[derive(Debug, Default)]
pub struct MockSensor {
    queue: VecDeque<Result<Measurement, ()>>,
    /// Unit reported by [`TemperatureSensor::unit`].
    pub unit: TemperatureUnit,
    /// Number of times read() was called.
    pub read_count: usize,
}

impl MockSensor {
    /// Creates a new mock sensor with nothing queued.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: report measurements in `unit`
    pub fn with_unit(mut self, unit: TemperatureUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Queue one reading
    pub fn queue_reading(&mut self, value: Measurement) {
        self.queue.push_back(Ok(value));
    }

    /// Queue several readings, first one read first
    pub fn queue_readings(&mut self, values: &[Measurement]) {
        self.queue.extend(values.iter().copied().map(Ok));
    }

    /// Queue a failed read
    pub fn queue_failure(&mut self) {
        self.queue.push_back(Err(()));
    }

    /// Readings (and failures) still queued
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl TemperatureSensor for MockSensor {
    type Error = ();

    fn read(&mut self) -> Result<Measurement, ()> {
        self.read_count += 1;
        self.queue.pop_front().unwrap_or(Err(()))
    }

    fn unit(&self) -> TemperatureUnit {
        self.unit
    }
}

// ============================================================================
// Display
// ============================================================================

/// One call made against a [`MockDisplay`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisplayOp {
    /// `init()`
    Init,
    /// `set_cursor(row, col)`
    SetCursor {
        /// Target row.
        row: Row,
        /// Target column.
        col: u8,
    },
    /// `write_text(text)`
    Write(String),
    /// `clear()`
    Clear,
    /// `backlight(on)`
    Backlight(bool),
}

/// Mock character display for testing.
///
/// Records every call in [`ops`](Self::ops) and keeps a simulated 2x16 screen
/// so tests can check what a user would actually see. Text past the last
/// column is dropped.
///
/// # Example
///
/// ```rust
/// use rs_tempmon::hal::{DisplayOp, MockDisplay};
/// use rs_tempmon::traits::{CharacterDisplay, Row};
///
/// let mut lcd = MockDisplay::new();
/// lcd.write_at(Row::Bottom, 2, "hi").unwrap();
///
/// assert_eq!(lcd.screen_line(Row::Bottom), "  hi");
/// assert_eq!(lcd.ops[1], DisplayOp::Write("hi".into()));
/// assert_eq!(lcd.write_count(), 1);
/// ```
#[derive(Debug)]
pub struct MockDisplay {
    /// Every successful call, in order.
    pub ops: Vec<DisplayOp>,
    /// When set, every call fails and nothing changes.
    pub fail_writes: bool,
    /// Characters `write_text` still draws before failing partway.
    /// `None` never fails.
    pub char_budget: Option<usize>,
    /// Current backlight state.
    pub backlight: bool,
    /// Whether init() was called.
    pub initialized: bool,
    glass: Glass,
}

impl MockDisplay {
    /// Creates a blank mock display with the backlight off.
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            fail_writes: false,
            char_budget: None,
            backlight: false,
            initialized: false,
            glass: Glass::new(),
        }
    }

    /// Visible text of `row` with trailing blanks trimmed.
    pub fn screen_line(&self, row: Row) -> String {
        self.glass.line(row)
    }

    /// Number of `write_text` calls so far
    pub fn write_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DisplayOp::Write(_)))
            .count()
    }

    fn check(&self) -> Result<(), ()> {
        if self.fail_writes {
            Err(())
        } else {
            Ok(())
        }
    }
}

impl Default for MockDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl CharacterDisplay for MockDisplay {
    type Error = ();

    fn init(&mut self) -> Result<(), ()> {
        self.check()?;
        self.initialized = true;
        self.ops.push(DisplayOp::Init);
        Ok(())
    }

    fn set_cursor(&mut self, row: Row, col: u8) -> Result<(), ()> {
        self.check()?;
        self.glass.set_cursor(row, col);
        self.ops.push(DisplayOp::SetCursor { row, col });
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<(), ()> {
        self.check()?;
        if let Some(budget) = self.char_budget {
            let count = text.chars().count();
            if count > budget {
                let drawn: String = text.chars().take(budget).collect();
                self.glass.write(&drawn);
                self.char_budget = Some(0);
                return Err(());
            }
            self.char_budget = Some(budget - count);
        }
        self.glass.write(text);
        self.ops.push(DisplayOp::Write(text.to_string()));
        Ok(())
    }

    fn clear(&mut self) -> Result<(), ()> {
        self.check()?;
        self.glass.clear();
        self.ops.push(DisplayOp::Clear);
        Ok(())
    }

    fn backlight(&mut self, on: bool) -> Result<(), ()> {
        self.check()?;
        self.backlight = on;
        self.ops.push(DisplayOp::Backlight(on));
        Ok(())
    }
}

// ============================================================================
// Bus and Delay
// ============================================================================

/// Mock I2C bus for testing device drivers.
///
/// Every write (including the write half of `write_read`) is recorded as
/// `(address, bytes)`. Reads are served from a FIFO of scripted replies; an
/// empty FIFO fails the transfer.
///
/// # Example
///
/// ```rust
/// use rs_tempmon::hal::MockI2c;
/// use rs_tempmon::traits::I2cBus;
///
/// let mut bus = MockI2c::new();
/// bus.queue_read(&[0x01, 0x94]);
///
/// let mut buf = [0u8; 2];
/// bus.write_read(0x18, &[0x05], &mut buf).unwrap();
/// assert_eq!(buf, [0x01, 0x94]);
/// assert_eq!(bus.writes, [(0x18, vec![0x05])]);
/// ```
#[derive(Debug, Default)]
pub struct MockI2c {
    /// Frames written, in order.
    pub writes: Vec<(u8, Vec<u8>)>,
    reads: VecDeque<Vec<u8>>,
    failures_pending: usize,
}

impl MockI2c {
    /// Creates an idle bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the bytes returned by the next read
    pub fn queue_read(&mut self, bytes: &[u8]) {
        self.reads.push_back(bytes.to_vec());
    }

    /// Make the next `count` transfers fail
    pub fn fail_next(&mut self, count: usize) {
        self.failures_pending = count;
    }

    fn take_failure(&mut self) -> Result<(), ()> {
        if self.failures_pending > 0 {
            self.failures_pending -= 1;
            Err(())
        } else {
            Ok(())
        }
    }

    fn fill(&mut self, buf: &mut [u8]) -> Result<(), ()> {
        let reply = self.reads.pop_front().ok_or(())?;
        for (dst, src) in buf.iter_mut().zip(reply.iter().chain(core::iter::repeat(&0))) {
            *dst = *src;
        }
        Ok(())
    }
}

impl I2cBus for MockI2c {
    type Error = ();

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), ()> {
        self.take_failure()?;
        self.writes.push((address, data.to_vec()));
        Ok(())
    }

    fn read(&mut self, _address: u8, buf: &mut [u8]) -> Result<(), ()> {
        self.take_failure()?;
        self.fill(buf)
    }

    fn write_read(&mut self, address: u8, data: &[u8], buf: &mut [u8]) -> Result<(), ()> {
        self.take_failure()?;
        self.writes.push((address, data.to_vec()));
        self.fill(buf)
    }
}

/// Mock delay that only keeps count.
#[derive(Debug, Default)]
pub struct MockDelay {
    /// Sum of all requested delays.
    pub total_ms: u32,
    /// Each requested delay, in order.
    pub calls: Vec<u32>,
}

impl MockDelay {
    /// Creates a delay with nothing recorded.
    pub fn new() -> Self {
        Self::default()
    }
}

impl DelayMs for MockDelay {
    fn delay_ms(&mut self, ms: u32) {
        self.total_ms += ms;
        self.calls.push(ms);
    }
}

// ============================================================================
// Diagnostics
// ============================================================================

/// Sink that keeps every report in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    /// Reported `(top, bottom)` rows.
    pub frames: Vec<(String, String)>,
    /// Rendered error messages.
    pub errors: Vec<String>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent frame, if any
    pub fn last_frame(&self) -> Option<(&str, &str)> {
        self.frames
            .last()
            .map(|(top, bottom)| (top.as_str(), bottom.as_str()))
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&mut self, top: &str, bottom: &str) {
        self.frames.push((top.to_string(), bottom.to_string()));
    }

    fn report_error(&mut self, error: &dyn fmt::Display) {
        self.errors.push(error.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // MockSensor Tests
    // =========================================================================

    #[test]
    fn mock_sensor_fifo_order() {
        let mut sensor = MockSensor::new();
        sensor.queue_reading(1.0);
        sensor.queue_reading(2.0);
        assert_eq!(sensor.pending(), 2);
        assert_eq!(sensor.read(), Ok(1.0));
        assert_eq!(sensor.read(), Ok(2.0));
        assert_eq!(sensor.read(), Err(()));
    }

    #[test]
    fn mock_sensor_unit() {
        let sensor = MockSensor::new().with_unit(TemperatureUnit::Celsius);
        assert_eq!(sensor.unit(), TemperatureUnit::Celsius);
        assert_eq!(MockSensor::new().unit(), TemperatureUnit::Fahrenheit);
    }

    // =========================================================================
    // MockDisplay Tests
    // =========================================================================

    #[test]
    fn mock_display_records_ops() {
        let mut lcd = MockDisplay::new();
        lcd.init().unwrap();
        lcd.backlight(true).unwrap();
        lcd.clear().unwrap();
        assert!(lcd.initialized);
        assert!(lcd.backlight);
        assert_eq!(
            lcd.ops,
            [DisplayOp::Init, DisplayOp::Backlight(true), DisplayOp::Clear]
        );
    }

    #[test]
    fn mock_display_overwrites_in_place() {
        let mut lcd = MockDisplay::new();
        lcd.write_at(Row::Top, 0, "120.45 F").unwrap();
        lcd.write_at(Row::Top, 0, "12.3 F").unwrap();
        // No padding was written, so stale characters remain
        assert_eq!(lcd.screen_line(Row::Top), "12.3 F F");
    }

    #[test]
    fn mock_display_drops_overflow() {
        let mut lcd = MockDisplay::new();
        lcd.write_at(Row::Bottom, 14, "abcd").unwrap();
        assert_eq!(lcd.screen_line(Row::Bottom), "              ab");
        assert_eq!(lcd.screen_line(Row::Top), "");
    }

    #[test]
    fn mock_display_clear_blanks_screen() {
        let mut lcd = MockDisplay::new();
        lcd.write_at(Row::Top, 0, "x").unwrap();
        lcd.clear().unwrap();
        assert_eq!(lcd.screen_line(Row::Top), "");
    }

    #[test]
    fn mock_display_char_budget_fails_partway() {
        let mut lcd = MockDisplay::new();
        lcd.char_budget = Some(5);
        lcd.write_at(Row::Top, 0, "abc").unwrap();
        assert!(lcd.write_text("defg").is_err());
        assert_eq!(lcd.screen_line(Row::Top), "abcde");
        assert_eq!(lcd.char_budget, Some(0));
        // Only the complete write is recorded
        assert_eq!(lcd.write_count(), 1);
        assert!(lcd.write_text("h").is_err());
    }

    #[test]
    fn mock_display_failure_changes_nothing() {
        let mut lcd = MockDisplay::new();
        lcd.fail_writes = true;
        assert!(lcd.write_at(Row::Top, 0, "x").is_err());
        assert!(lcd.backlight(true).is_err());
        assert!(lcd.ops.is_empty());
        assert!(!lcd.backlight);
    }

    // =========================================================================
    // MockI2c / MockDelay Tests
    // =========================================================================

    #[test]
    fn mock_i2c_records_writes() {
        let mut bus = MockI2c::new();
        bus.write(0x3F, &[0x08]).unwrap();
        assert_eq!(bus.writes, [(0x3F, vec![0x08])]);
    }

    #[test]
    fn mock_i2c_read_without_script_fails() {
        let mut bus = MockI2c::new();
        let mut buf = [0u8; 2];
        assert!(bus.read(0x18, &mut buf).is_err());
    }

    #[test]
    fn mock_i2c_short_reply_zero_filled() {
        let mut bus = MockI2c::new();
        bus.queue_read(&[0xAA]);
        let mut buf = [0xFFu8; 2];
        bus.read(0x18, &mut buf).unwrap();
        assert_eq!(buf, [0xAA, 0x00]);
    }

    #[test]
    fn mock_i2c_injected_failures() {
        let mut bus = MockI2c::new();
        bus.fail_next(2);
        assert!(bus.write(0x3F, &[0]).is_err());
        assert!(bus.write(0x3F, &[0]).is_err());
        assert!(bus.write(0x3F, &[0]).is_ok());
        assert_eq!(bus.writes.len(), 1);
    }

    #[test]
    fn mock_delay_accumulates() {
        let mut delay = MockDelay::new();
        delay.delay_ms(2);
        delay.delay_ms(250);
        assert_eq!(delay.total_ms, 252);
        assert_eq!(delay.calls, [2, 250]);
    }

    // =========================================================================
    // MemorySink Tests
    // =========================================================================

    #[test]
    fn memory_sink_captures() {
        let mut sink = MemorySink::new();
        assert_eq!(sink.last_frame(), None);
        sink.report("70.00 F", "+0.00%");
        sink.report_error(&"sensor read failed");
        assert_eq!(sink.last_frame(), Some(("70.00 F", "+0.00%")));
        assert_eq!(sink.errors, ["sensor read failed"]);
    }
}
