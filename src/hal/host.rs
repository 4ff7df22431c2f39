//! Desktop stand-ins for the real hardware.
//!
//! Used by the `desktop_sim` binary to run the full monitor loop on a PC:
//! a drifting, noisy [`SimulatedSensor`], a [`TerminalDisplay`] that draws the
//! 2x16 panel as text, a sleeping [`StdDelay`] and a [`ConsoleSink`] that
//! prints each frame to stdout.

use std::convert::Infallible;
use std::fmt;
use std::thread;
use std::time::Duration;

use super::glass::Glass;
use crate::traits::{
    CharacterDisplay, DelayMs, DiagnosticSink, Measurement, Row, TemperatureSensor,
    TemperatureUnit, COLUMNS,
};

/// Delay backed by [`thread::sleep`].
#[derive(Clone, Copy, Debug, Default)]
pub struct StdDelay;

impl DelayMs for StdDelay {
    fn delay_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }
}

// ============================================================================
// Sensor
// ============================================================================

/// A read the simulated sensor refused to answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("simulated sensor dropout on read {read}")]
pub struct SensorDropout {
    /// One-based index of the failed read.
    pub read: u64,
}

/// Sensor that drifts linearly and adds pseudo-random noise.
///
/// The noise comes from a fixed-seed linear congruential generator, so runs
/// are reproducible.
///
/// # Example
///
/// ```rust
/// use rs_tempmon::hal::SimulatedSensor;
/// use rs_tempmon::traits::TemperatureSensor;
///
/// let mut sensor = SimulatedSensor::new(70.0).with_noise(0.0).with_drift(0.5);
/// assert_eq!(sensor.read(), Ok(70.0));
/// assert_eq!(sensor.read(), Ok(70.5));
/// ```
#[derive(Clone, Debug)]
pub struct SimulatedSensor {
    base: f32,
    drift_per_read: f32,
    noise: f32,
    dropout_every: Option<u64>,
    unit: TemperatureUnit,
    reads: u64,
    seed: u32,
}

impl SimulatedSensor {
    /// Sensor starting at `base` with light noise and no drift
    pub fn new(base: Measurement) -> Self {
        Self {
            base,
            drift_per_read: 0.0,
            noise: 0.05,
            dropout_every: None,
            unit: TemperatureUnit::Fahrenheit,
            reads: 0,
            seed: 0x2545_F491,
        }
    }

    /// Builder: change added on every read
    pub fn with_drift(mut self, per_read: f32) -> Self {
        self.drift_per_read = per_read;
        self
    }

    /// Builder: peak noise amplitude
    pub fn with_noise(mut self, amplitude: f32) -> Self {
        self.noise = amplitude;
        self
    }

    /// Builder: fail every `n`th read
    pub fn with_dropout_every(mut self, n: u64) -> Self {
        self.dropout_every = (n > 0).then_some(n);
        self
    }

    /// Builder: report in `unit`
    pub fn with_unit(mut self, unit: TemperatureUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Next noise sample in `[-noise, noise]`.
    fn next_noise(&mut self) -> f32 {
        self.seed = self.seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        let unit = (self.seed >> 8) as f32 / (1u32 << 24) as f32;
        (unit * 2.0 - 1.0) * self.noise
    }
}

impl TemperatureSensor for SimulatedSensor {
    type Error = SensorDropout;

    fn read(&mut self) -> Result<Measurement, SensorDropout> {
        self.reads += 1;
        if let Some(n) = self.dropout_every {
            if self.reads % n == 0 {
                return Err(SensorDropout { read: self.reads });
            }
        }
        let trend = self.base + self.drift_per_read * (self.reads - 1) as f32;
        let noise = if self.noise > 0.0 { self.next_noise() } else { 0.0 };
        Ok(trend + noise)
    }

    fn unit(&self) -> TemperatureUnit {
        self.unit
    }
}

// ============================================================================
// Display
// ============================================================================

/// Character display drawn as a boxed text panel.
#[derive(Clone, Debug, Default)]
pub struct TerminalDisplay {
    glass: Glass,
    backlight: bool,
}

impl TerminalDisplay {
    /// Blank panel
    pub fn new() -> Self {
        Self::default()
    }

    /// Visible text of `row`
    pub fn line(&self, row: Row) -> String {
        self.glass.line(row)
    }

    /// Whether the backlight is lit
    pub fn backlight_on(&self) -> bool {
        self.backlight
    }
}

impl fmt::Display for TerminalDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = "-".repeat(COLUMNS);
        let edge = if self.backlight { '|' } else { ':' };
        writeln!(f, "+{border}+")?;
        for row in Row::ALL {
            writeln!(f, "{edge}{}{edge}", self.glass.raw_line(row))?;
        }
        write!(f, "+{border}+")
    }
}

impl CharacterDisplay for TerminalDisplay {
    type Error = Infallible;

    fn init(&mut self) -> Result<(), Infallible> {
        self.glass.clear();
        Ok(())
    }

    fn set_cursor(&mut self, row: Row, col: u8) -> Result<(), Infallible> {
        self.glass.set_cursor(row, col);
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<(), Infallible> {
        self.glass.write(text);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), Infallible> {
        self.glass.clear();
        Ok(())
    }

    fn backlight(&mut self, on: bool) -> Result<(), Infallible> {
        self.backlight = on;
        Ok(())
    }
}

// ============================================================================
// Sink
// ============================================================================

/// Prints every frame to stdout, failures to stderr.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleSink;

impl DiagnosticSink for ConsoleSink {
    fn report(&mut self, top: &str, bottom: &str) {
        println!("LCD Display: {top}, {bottom}");
    }

    fn report_error(&mut self, error: &dyn fmt::Display) {
        eprintln!("LCD update skipped: {error}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_stays_within_amplitude() {
        let mut sensor = SimulatedSensor::new(50.0).with_noise(0.2);
        for _ in 0..200 {
            let v = sensor.read().unwrap();
            assert!((v - 50.0).abs() <= 0.2 + 1e-4);
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SimulatedSensor::new(20.0);
        let mut b = SimulatedSensor::new(20.0);
        for _ in 0..10 {
            assert_eq!(a.read(), b.read());
        }
    }

    #[test]
    fn dropout_schedule() {
        let mut sensor = SimulatedSensor::new(20.0).with_dropout_every(3);
        assert!(sensor.read().is_ok());
        assert!(sensor.read().is_ok());
        assert_eq!(sensor.read(), Err(SensorDropout { read: 3 }));
        assert!(sensor.read().is_ok());
    }

    #[test]
    fn zero_dropout_disables() {
        let mut sensor = SimulatedSensor::new(20.0).with_dropout_every(0);
        for _ in 0..10 {
            assert!(sensor.read().is_ok());
        }
    }

    #[test]
    fn terminal_panel_rendering() {
        let mut lcd = TerminalDisplay::new();
        lcd.backlight(true).unwrap();
        lcd.write_at(Row::Top, 0, "70.00 F").unwrap();
        lcd.write_at(Row::Bottom, 0, "+0.00%").unwrap();
        let panel = lcd.to_string();
        let lines: Vec<&str> = panel.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[1], "|70.00 F         |");
        assert_eq!(lines[2], "|+0.00%          |");
        assert_eq!(lcd.line(Row::Top), "70.00 F");
    }

    #[test]
    fn terminal_backlight_off_marker() {
        let lcd = TerminalDisplay::new();
        assert!(!lcd.backlight_on());
        assert!(lcd.to_string().contains(":                :"));
    }
}
