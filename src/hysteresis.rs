//! Per-quantity hysteresis gates.
//!
//! A gate remembers the last value that was actually shown and only lets a
//! new value through when it moves further than the gate's threshold. When a
//! value is rejected the remembered (stale) value keeps being shown, so
//! sub-threshold jitter never reaches the screen.
//!
//! # Example
//!
//! ```rust
//! use rs_tempmon::HysteresisGate;
//!
//! let mut gate = HysteresisGate::new(0.01);
//!
//! // Nothing shown yet: always accepted
//! assert_eq!(gate.apply(70.0), 70.0);
//!
//! // Within threshold: the stale value is kept
//! assert_eq!(gate.apply(70.005), 70.0);
//!
//! // Beyond threshold: becomes the new baseline
//! assert_eq!(gate.apply(70.02), 70.02);
//! ```

use crate::filter::magnitude;

/// Whether `new_value` should replace `last_displayed`.
///
/// True when nothing has been displayed yet, or when the difference is
/// strictly greater than `threshold`.
///
/// # Examples
///
/// ```
/// use rs_tempmon::hysteresis::should_update;
///
/// assert!(should_update(70.0, None, 0.01));
/// assert!(!should_update(70.005, Some(70.0), 0.01));
/// assert!(should_update(70.02, Some(70.0), 0.01));
/// ```
#[inline]
pub fn should_update(new_value: f32, last_displayed: Option<f32>, threshold: f32) -> bool {
    match last_displayed {
        None => true,
        Some(last) => magnitude(new_value - last) > threshold,
    }
}

/// Update gate for one displayed quantity.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HysteresisGate {
    threshold: f32,
    last_displayed: Option<f32>,
}

impl HysteresisGate {
    /// Create a gate that has not displayed anything yet
    pub const fn new(threshold: f32) -> Self {
        Self {
            threshold,
            last_displayed: None,
        }
    }

    /// Offer a new value; returns the value to display.
    ///
    /// When accepted the new value becomes the baseline. Otherwise the
    /// previous displayed value is returned unchanged.
    pub fn apply(&mut self, new_value: f32) -> f32 {
        match self.last_displayed {
            Some(last) if !should_update(new_value, Some(last), self.threshold) => last,
            _ => {
                self.last_displayed = Some(new_value);
                new_value
            }
        }
    }

    /// Would `new_value` be accepted, without changing the gate
    pub fn would_accept(&self, new_value: f32) -> bool {
        should_update(new_value, self.last_displayed, self.threshold)
    }

    /// Value currently on screen, if any
    pub fn last_displayed(&self) -> Option<f32> {
        self.last_displayed
    }

    /// Minimum change required
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Forget the displayed value
    pub fn reset(&mut self) {
        self.last_displayed = None;
    }
}
