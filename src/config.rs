//! Monitor configuration shared by desktop and ESP32 builds.
//!
//! Every tunable of the filter, the hysteresis gates, the devices and the
//! loop lives here, with the firmware defaults baked into `Default`.
//!
//! # Example
//!
//! ```rust
//! use rs_tempmon::config::{FilterSettings, GateSettings, MonitorConfig};
//!
//! // Use defaults
//! let config = MonitorConfig::default();
//! assert!(config.validate().is_ok());
//!
//! // Or customize
//! let config = MonitorConfig::default()
//!     .with_filter(FilterSettings::default().with_alpha(0.3))
//!     .with_gates(GateSettings::default().with_temperature_threshold(0.05))
//!     .with_tick_period_ms(500);
//! assert_eq!(config.tick_period_ms, 500);
//! ```

use crate::hd44780;
use crate::mcp9808;
use crate::traits::TemperatureUnit;

/// Number of samples in the sliding window.
pub const DEFAULT_WINDOW_SIZE: usize = 5;

/// Exponential smoothing factor.
pub const DEFAULT_ALPHA: f32 = 0.6;

/// Percent changes smaller than this are shown as exactly zero.
pub const DEFAULT_PERCENT_CLAMP: f32 = 0.01;

/// Minimum temperature change before the shown value moves.
pub const DEFAULT_TEMPERATURE_THRESHOLD: f32 = 0.01;

/// Minimum percent-change change before the shown value moves.
pub const DEFAULT_CHANGE_THRESHOLD: f32 = 0.025;

/// Pause between ticks (4 updates per second).
pub const DEFAULT_TICK_PERIOD_MS: u32 = 250;

/// Invalid configuration value.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// Smoothing factor outside the open interval (0, 1).
    #[error("smoothing factor {0} must lie strictly between 0 and 1")]
    InvalidAlpha(f32),
    /// Percent clamp below zero.
    #[error("percent clamp {0} must not be negative")]
    NegativeClamp(f32),
    /// Hysteresis threshold below zero.
    #[error("{name} threshold {value} must not be negative")]
    NegativeThreshold {
        /// Which gate the threshold belongs to.
        name: &'static str,
        /// The rejected value.
        value: f32,
    },
    /// Tick period of zero.
    #[error("tick period must be at least 1 ms")]
    ZeroTickPeriod,
}

/// What the loop does when a bus transfer fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TransportPolicy {
    /// Stop the loop and hand the error to the caller.
    FailFast,
    /// Report the error, wait out the tick, and try again.
    #[default]
    SkipTick,
}

// ============================================================================
// Main Config
// ============================================================================

/// Complete monitor configuration
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonitorConfig {
    /// Signal filter tuning
    pub filter: FilterSettings,
    /// Hysteresis gate thresholds
    pub gates: GateSettings,
    /// Temperature sensor wiring
    pub sensor: SensorSettings,
    /// Character display wiring
    pub display: DisplaySettings,
    /// Pause between ticks in milliseconds
    pub tick_period_ms: u32,
    /// Reaction to bus failures
    pub transport_policy: TransportPolicy,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            filter: FilterSettings::default(),
            gates: GateSettings::default(),
            sensor: SensorSettings::default(),
            display: DisplaySettings::default(),
            tick_period_ms: DEFAULT_TICK_PERIOD_MS,
            transport_policy: TransportPolicy::default(),
        }
    }
}

impl MonitorConfig {
    /// Set filter settings
    pub fn with_filter(mut self, filter: FilterSettings) -> Self {
        self.filter = filter;
        self
    }

    /// Set gate thresholds
    pub fn with_gates(mut self, gates: GateSettings) -> Self {
        self.gates = gates;
        self
    }

    /// Set sensor settings
    pub fn with_sensor(mut self, sensor: SensorSettings) -> Self {
        self.sensor = sensor;
        self
    }

    /// Set display settings
    pub fn with_display(mut self, display: DisplaySettings) -> Self {
        self.display = display;
        self
    }

    /// Set the tick period
    pub fn with_tick_period_ms(mut self, ms: u32) -> Self {
        self.tick_period_ms = ms;
        self
    }

    /// Set the transport failure policy
    pub fn with_transport_policy(mut self, policy: TransportPolicy) -> Self {
        self.transport_policy = policy;
        self
    }

    /// Check every value, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.filter.validate()?;
        self.gates.validate()?;
        if self.tick_period_ms == 0 {
            return Err(ConfigError::ZeroTickPeriod);
        }
        Ok(())
    }
}

// ============================================================================
// Filter Settings
// ============================================================================

/// Signal filter tuning.
///
/// The window size is a const generic on [`SignalFilter`](crate::SignalFilter)
/// and not part of this struct.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilterSettings {
    /// Blend factor in (0, 1); higher follows new data faster
    pub alpha: f32,
    /// Percent changes with a smaller magnitude snap to zero
    pub percent_clamp: f32,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            percent_clamp: DEFAULT_PERCENT_CLAMP,
        }
    }
}

impl FilterSettings {
    /// Build validated settings.
    ///
    /// ```
    /// use rs_tempmon::config::{ConfigError, FilterSettings};
    ///
    /// assert!(FilterSettings::new(0.6, 0.01).is_ok());
    /// assert_eq!(FilterSettings::new(1.0, 0.01), Err(ConfigError::InvalidAlpha(1.0)));
    /// ```
    pub fn new(alpha: f32, percent_clamp: f32) -> Result<Self, ConfigError> {
        let settings = Self {
            alpha,
            percent_clamp,
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Set the smoothing factor
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the percent clamp
    pub fn with_percent_clamp(mut self, clamp: f32) -> Self {
        self.percent_clamp = clamp;
        self
    }

    /// Check alpha and clamp ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Written so NaN fails too
        if !(self.alpha > 0.0 && self.alpha < 1.0) {
            return Err(ConfigError::InvalidAlpha(self.alpha));
        }
        if !(self.percent_clamp >= 0.0) {
            return Err(ConfigError::NegativeClamp(self.percent_clamp));
        }
        Ok(())
    }
}

// ============================================================================
// Gate Settings
// ============================================================================

/// Hysteresis thresholds, one per displayed quantity.
///
/// The percent gate is coarser because the rate of change is noisier.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GateSettings {
    /// Temperature threshold (display units)
    pub temperature_threshold: f32,
    /// Percent-change threshold (percentage points)
    pub change_threshold: f32,
}

impl Default for GateSettings {
    fn default() -> Self {
        Self {
            temperature_threshold: DEFAULT_TEMPERATURE_THRESHOLD,
            change_threshold: DEFAULT_CHANGE_THRESHOLD,
        }
    }
}

impl GateSettings {
    /// Set the temperature threshold
    pub fn with_temperature_threshold(mut self, threshold: f32) -> Self {
        self.temperature_threshold = threshold;
        self
    }

    /// Set the percent-change threshold
    pub fn with_change_threshold(mut self, threshold: f32) -> Self {
        self.change_threshold = threshold;
        self
    }

    /// Check both thresholds are non-negative
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.temperature_threshold >= 0.0) {
            return Err(ConfigError::NegativeThreshold {
                name: "temperature",
                value: self.temperature_threshold,
            });
        }
        if !(self.change_threshold >= 0.0) {
            return Err(ConfigError::NegativeThreshold {
                name: "change",
                value: self.change_threshold,
            });
        }
        Ok(())
    }
}

// ============================================================================
// Device Settings
// ============================================================================

/// Temperature sensor configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SensorSettings {
    /// 7-bit I2C address of the MCP9808
    pub address: u8,
    /// Unit measurements are reported in
    pub unit: TemperatureUnit,
}

impl Default for SensorSettings {
    fn default() -> Self {
        Self {
            address: mcp9808::DEFAULT_ADDRESS,
            unit: TemperatureUnit::Fahrenheit,
        }
    }
}

impl SensorSettings {
    /// Set the sensor address
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Set the reporting unit
    pub fn with_unit(mut self, unit: TemperatureUnit) -> Self {
        self.unit = unit;
        self
    }
}

/// Character display configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplaySettings {
    /// 7-bit I2C address of the PCF8574 backpack
    pub address: u8,
    /// Backlight state after start-up
    pub backlight: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            address: hd44780::DEFAULT_ADDRESS,
            backlight: true,
        }
    }
}

impl DisplaySettings {
    /// Set the display address
    pub fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Set the start-up backlight state
    pub fn with_backlight(mut self, on: bool) -> Self {
        self.backlight = on;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================
