//! The control loop tying sensor, filter, gates and display together.
//!
//! Each [`Monitor::tick`] reads one measurement, smooths it, passes the
//! smoothed temperature and the rate of change through their hysteresis
//! gates, formats the two rows, renders them flicker-free and reports them to
//! the diagnostic sink.
//!
//! # Architecture
//!
//! ```text
//! ┌────────┐   raw   ┌──────────────┐ smoothed ┌────────────┐ shown ┌─────────┐
//! │ Sensor │ ──────► │ SignalFilter │ ───────► │ Hysteresis │ ────► │ Surface │
//! └────────┘         └──────────────┘  change  │   gates    │  rows └─────────┘
//!                                              └────────────┘         │
//!                                                                     ▼
//!                                                               DiagnosticSink
//! ```
//!
//! # Example
//!
//! ```rust
//! use rs_tempmon::config::MonitorConfig;
//! use rs_tempmon::hal::{MockDisplay, MockSensor};
//! use rs_tempmon::Monitor;
//!
//! let mut sensor = MockSensor::new();
//! sensor.queue_readings(&[70.0, 70.0, 70.0, 70.0, 70.0, 71.0]);
//!
//! let mut monitor: Monitor<_, _, _> =
//!     Monitor::new(sensor, MockDisplay::new(), (), &MonitorConfig::default()).unwrap();
//! monitor.start().unwrap();
//!
//! for _ in 0..5 {
//!     monitor.tick().unwrap();
//! }
//! let reading = monitor.tick().unwrap();
//! assert_eq!(reading.top, "70.12 F");
//! assert_eq!(reading.bottom, "+0.17%");
//! ```

use core::convert::Infallible;
use core::fmt::{self, Write as _};

use crate::config::{ConfigError, MonitorConfig, TransportPolicy, DEFAULT_WINDOW_SIZE};
use crate::filter::SignalFilter;
use crate::hysteresis::HysteresisGate;
use crate::surface::DisplaySurface;
use crate::traits::{
    CharacterDisplay, DelayMs, DiagnosticSink, LineBuffer, Measurement, Row, TemperatureSensor,
    COLUMNS,
};

/// A tick that failed on the bus.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError<SE, DE> {
    /// The sensor could not be read; the filter was not fed.
    #[error("sensor read failed: {0:?}")]
    Sensor(SE),
    /// A row could not be written; the row keeps its previous text.
    #[error("display update failed: {0:?}")]
    Display(DE),
}

/// [`MonitorError`] for a given sensor and display.
pub type TickError<S, D> =
    MonitorError<<S as TemperatureSensor>::Error, <D as CharacterDisplay>::Error>;

/// Everything one successful tick computed and showed.
#[derive(Clone, Debug, PartialEq)]
pub struct Reading {
    /// Measurement as read from the sensor.
    pub raw: Measurement,
    /// Filter output.
    pub smoothed: f32,
    /// Rate of change against the oldest windowed sample, in percent.
    pub change_percent: f32,
    /// Temperature after the hysteresis gate.
    pub shown_temperature: f32,
    /// Rate of change after the hysteresis gate.
    pub shown_change: f32,
    /// Text on the top row.
    pub top: LineBuffer,
    /// Text on the bottom row.
    pub bottom: LineBuffer,
    /// Rows that actually needed a display write (0 to 2).
    pub rows_written: u8,
}

/// Running counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MonitorStats {
    /// Ticks attempted.
    pub ticks: u64,
    /// Ticks dropped under [`TransportPolicy::SkipTick`].
    pub skipped_ticks: u64,
    /// Row updates sent to the display.
    pub row_writes: u64,
}

// ============================================================================
// Row formatting
// ============================================================================

/// `fmt::Write` target that stops at the row width.
struct RowWriter {
    line: LineBuffer,
    truncated: bool,
}

impl fmt::Write for RowWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.truncated {
            return Ok(());
        }
        for ch in s.chars() {
            if self.line.push(ch).is_err() {
                self.truncated = true;
                break;
            }
        }
        Ok(())
    }
}

/// Format one row, cutting it to the display width.
///
/// Over-long text is truncated (never wrapped) and a warning is logged.
///
/// # Examples
///
/// ```
/// use rs_tempmon::monitor::format_row;
///
/// assert_eq!(format_row(format_args!("{:+.2}%", 0.171428)), "+0.17%");
/// assert_eq!(format_row(format_args!("{}", "0123456789abcdefXYZ")), "0123456789abcdef");
/// ```
pub fn format_row(args: fmt::Arguments<'_>) -> LineBuffer {
    let mut writer = RowWriter {
        line: LineBuffer::new(),
        truncated: false,
    };
    // RowWriter never reports an error
    let _ = writer.write_fmt(args);
    if writer.truncated {
        tracing::warn!(
            "row text longer than {} columns, showing '{}'",
            COLUMNS,
            writer.line
        );
    }
    writer.line
}

// ============================================================================
// Monitor
// ============================================================================

/// Temperature monitor driving a two-row character display.
///
/// # Type Parameters
///
/// - `S`: temperature sensor ([`TemperatureSensor`])
/// - `D`: character display ([`CharacterDisplay`])
/// - `K`: diagnostic sink ([`DiagnosticSink`]); `()` discards
/// - `N`: filter window size
pub struct Monitor<S, D, K, const N: usize = DEFAULT_WINDOW_SIZE>
where
    D: CharacterDisplay,
{
    sensor: S,
    surface: DisplaySurface<D>,
    sink: K,
    filter: SignalFilter<N>,
    temperature_gate: HysteresisGate,
    change_gate: HysteresisGate,
    tick_period_ms: u32,
    policy: TransportPolicy,
    backlight: bool,
    started: bool,
    stats: MonitorStats,
}

impl<S, D, K, const N: usize> Monitor<S, D, K, N>
where
    S: TemperatureSensor,
    D: CharacterDisplay,
    K: DiagnosticSink,
{
    /// Assemble a monitor from its parts.
    ///
    /// # Errors
    ///
    /// Returns the first invalid value in `config`.
    pub fn new(sensor: S, display: D, sink: K, config: &MonitorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            sensor,
            surface: DisplaySurface::new(display),
            sink,
            filter: SignalFilter::new(config.filter),
            temperature_gate: HysteresisGate::new(config.gates.temperature_threshold),
            change_gate: HysteresisGate::new(config.gates.change_threshold),
            tick_period_ms: config.tick_period_ms,
            policy: config.transport_policy,
            backlight: config.display.backlight,
            started: false,
            stats: MonitorStats::default(),
        })
    }

    /// Initialise the display: controller init, backlight, clear.
    pub fn start(&mut self) -> Result<(), D::Error> {
        self.surface.init(self.backlight)?;
        self.started = true;
        tracing::info!(
            window = N,
            period_ms = self.tick_period_ms,
            policy = ?self.policy,
            "monitor started"
        );
        Ok(())
    }

    /// Run one read, filter, gate, render and report cycle.
    ///
    /// Errors are always returned; the transport policy is applied by
    /// [`step`](Self::step) and [`run`](Self::run).
    pub fn tick(&mut self) -> Result<Reading, TickError<S, D>> {
        self.stats.ticks += 1;

        let raw = self.sensor.read().map_err(MonitorError::Sensor)?;
        let (smoothed, change_percent) = self.filter.ingest(raw);

        let shown_temperature = self.temperature_gate.apply(smoothed);
        let shown_change = self.change_gate.apply(change_percent);

        let unit = self.sensor.unit().symbol();
        let top = format_row(format_args!("{:.2} {}", shown_temperature, unit));
        let bottom = format_row(format_args!("{:+.2}%", shown_change));

        let mut rows_written = 0;
        for (row, text) in [(Row::Top, &top), (Row::Bottom, &bottom)] {
            if self
                .surface
                .set_line(row, text)
                .map_err(MonitorError::Display)?
            {
                rows_written += 1;
            }
        }
        self.stats.row_writes += u64::from(rows_written);

        self.sink.report(&top, &bottom);
        tracing::debug!(
            raw,
            smoothed,
            change_percent,
            rows_written,
            "tick: {} | {}",
            top,
            bottom
        );

        Ok(Reading {
            raw,
            smoothed,
            change_percent,
            shown_temperature,
            shown_change,
            top,
            bottom,
            rows_written,
        })
    }

    /// Tick once under the transport policy, then wait out the tick period.
    ///
    /// Returns `Ok(None)` for a tick skipped under
    /// [`TransportPolicy::SkipTick`].
    pub fn step<T>(&mut self, delay: &mut T) -> Result<Option<Reading>, TickError<S, D>>
    where
        T: DelayMs + ?Sized,
        S::Error: fmt::Debug,
        D::Error: fmt::Debug,
    {
        let outcome = match self.tick() {
            Ok(reading) => Some(reading),
            Err(error) => match self.policy {
                TransportPolicy::FailFast => {
                    tracing::error!("stopping: {}", error);
                    return Err(error);
                }
                TransportPolicy::SkipTick => {
                    self.stats.skipped_ticks += 1;
                    tracing::warn!("tick skipped: {}", error);
                    self.sink.report_error(&error);
                    None
                }
            },
        };
        delay.delay_ms(self.tick_period_ms);
        Ok(outcome)
    }

    /// Loop forever, starting the display first if needed.
    ///
    /// Only returns when a tick fails under [`TransportPolicy::FailFast`], or
    /// when the display cannot be initialised.
    pub fn run<T>(&mut self, delay: &mut T) -> Result<Infallible, TickError<S, D>>
    where
        T: DelayMs + ?Sized,
        S::Error: fmt::Debug,
        D::Error: fmt::Debug,
    {
        if !self.started {
            self.start().map_err(MonitorError::Display)?;
        }
        loop {
            self.step(delay)?;
        }
    }

    /// Counters since construction
    pub fn stats(&self) -> MonitorStats {
        self.stats
    }

    /// Whether [`start`](Self::start) has succeeded
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// The signal filter
    pub fn filter(&self) -> &SignalFilter<N> {
        &self.filter
    }

    /// Temperature gate
    pub fn temperature_gate(&self) -> &HysteresisGate {
        &self.temperature_gate
    }

    /// Rate-of-change gate
    pub fn change_gate(&self) -> &HysteresisGate {
        &self.change_gate
    }

    /// The display surface
    pub fn surface(&self) -> &DisplaySurface<D> {
        &self.surface
    }

    /// Mutable display surface
    pub fn surface_mut(&mut self) -> &mut DisplaySurface<D> {
        &mut self.surface
    }

    /// The sensor
    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    /// Mutable sensor
    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    /// The diagnostic sink
    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// Active transport policy
    pub fn policy(&self) -> TransportPolicy {
        self.policy
    }

    /// Pause between ticks
    pub fn tick_period_ms(&self) -> u32 {
        self.tick_period_ms
    }

    /// Take the monitor apart
    pub fn into_parts(self) -> (S, D, K) {
        (self.sensor, self.surface.into_inner(), self.sink)
    }
}

impl<S, D, K, const N: usize> fmt::Debug for Monitor<S, D, K, N>
where
    D: CharacterDisplay,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Monitor")
            .field("window", &N)
            .field("top", &self.surface.line(Row::Top))
            .field("bottom", &self.surface.line(Row::Bottom))
            .field("policy", &self.policy)
            .field("stats", &self.stats)
            .finish()
    }
}
