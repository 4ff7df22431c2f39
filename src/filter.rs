//! Sliding-window and exponential smoothing filter for raw measurements.
//!
//! Each call to [`SignalFilter::ingest`] pushes one sample into a bounded
//! FIFO window, averages the window, blends that mean into the smoothed value
//! and derives a rate of change against the oldest sample still in the window.
//!
//! # Example
//!
//! ```rust
//! use rs_tempmon::{config::FilterSettings, SignalFilter};
//!
//! let mut filter: SignalFilter<5> = SignalFilter::new(FilterSettings::default());
//!
//! // Cold start: the first sample is the smoothed value
//! let (smoothed, change) = filter.ingest(70.0);
//! assert_eq!(smoothed, 70.0);
//! assert_eq!(change, 0.0);
//!
//! // No rate of change until the window has filled
//! for _ in 0..3 {
//!     filter.ingest(70.0);
//! }
//! assert!(!filter.is_full());
//! let (_, change) = filter.ingest(71.0);
//! assert!(filter.is_full());
//! assert!(change > 0.0);
//! ```

use heapless::Deque;

use crate::config::{FilterSettings, DEFAULT_WINDOW_SIZE};
use crate::traits::Measurement;

/// Magnitude of `value` without relying on `std` float methods.
#[inline]
pub(crate) fn magnitude(value: f32) -> f32 {
    if value < 0.0 {
        -value
    } else {
        value
    }
}

/// Noise-reduction filter over a stream of measurements.
///
/// # Type Parameter
///
/// - `N`: window capacity, the number of most recent samples averaged.
///
/// # Cold Start
///
/// The first sample initialises the smoothed value directly. The rate of
/// change stays at zero until `N` samples have been collected.
#[derive(Clone, Debug)]
pub struct SignalFilter<const N: usize = DEFAULT_WINDOW_SIZE> {
    window: Deque<Measurement, N>,
    smoothed: Option<f32>,
    settings: FilterSettings,
}

impl<const N: usize> SignalFilter<N> {
    /// Create an empty filter
    pub fn new(settings: FilterSettings) -> Self {
        debug_assert!(N > 0, "window must hold at least one sample");
        Self {
            window: Deque::new(),
            smoothed: None,
            settings,
        }
    }

    /// Feed one measurement, returning `(smoothed, change_percent)`.
    pub fn ingest(&mut self, measurement: Measurement) -> (f32, f32) {
        if self.window.is_full() {
            self.window.pop_front();
        }
        // A slot was freed above, so this cannot fail
        let _ = self.window.push_back(measurement);

        let mean = self.window_mean();
        let smoothed = match self.smoothed {
            None => mean,
            Some(previous) => {
                previous * (1.0 - self.settings.alpha) + mean * self.settings.alpha
            }
        };
        self.smoothed = Some(smoothed);

        (smoothed, self.change_percent(smoothed))
    }

    /// Percent difference between `smoothed` and the oldest windowed sample.
    fn change_percent(&self, smoothed: f32) -> f32 {
        if !self.window.is_full() {
            return 0.0;
        }
        let change = match self.window.front() {
            Some(&oldest) if oldest != 0.0 => (smoothed - oldest) / oldest * 100.0,
            _ => 0.0,
        };
        if magnitude(change) < self.settings.percent_clamp {
            0.0
        } else {
            change
        }
    }

    /// Arithmetic mean of the window, 0.0 while empty
    pub fn window_mean(&self) -> f32 {
        if self.window.is_empty() {
            return 0.0;
        }
        let sum: f32 = self.window.iter().sum();
        sum / self.window.len() as f32
    }

    /// Current smoothed value, `None` before the first sample
    pub fn smoothed(&self) -> Option<f32> {
        self.smoothed
    }

    /// Oldest sample still in the window
    pub fn oldest(&self) -> Option<Measurement> {
        self.window.front().copied()
    }

    /// Samples currently held
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// True before the first sample
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// True once `N` samples have been collected
    pub fn is_full(&self) -> bool {
        self.window.is_full()
    }

    /// Window capacity `N`
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Samples in insertion order, oldest first
    pub fn samples(&self) -> impl Iterator<Item = &Measurement> + '_ {
        self.window.iter()
    }

    /// Settings in use
    pub fn settings(&self) -> &FilterSettings {
        &self.settings
    }

    /// Drop all history and return to cold start
    pub fn reset(&mut self) {
        self.window.clear();
        self.smoothed = None;
    }
}

impl<const N: usize> Default for SignalFilter<N> {
    fn default() -> Self {
        Self::new(FilterSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter() -> SignalFilter<5> {
        SignalFilter::new(FilterSettings::default())
    }

    #[test]
    fn cold_start_returns_sample() {
        let mut f = filter();
        assert!(f.is_empty());
        assert_eq!(f.smoothed(), None);

        let (smoothed, change) = f.ingest(72.5);
        assert_eq!(smoothed, 72.5);
        assert_eq!(change, 0.0);
        assert_eq!(f.smoothed(), Some(72.5));
    }

    #[test]
    fn window_evicts_oldest() {
        let mut f = filter();
        for v in 1..=7 {
            f.ingest(v as f32);
        }
        assert_eq!(f.len(), 5);
        assert_eq!(f.oldest(), Some(3.0));
        let samples: heapless::Vec<f32, 5> = f.samples().copied().collect();
        assert_eq!(samples.as_slice(), &[3.0, 4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn window_mean_is_arithmetic() {
        let mut f = filter();
        f.ingest(10.0);
        f.ingest(20.0);
        assert!((f.window_mean() - 15.0).abs() < 1e-6);
    }

    #[test]
    fn exponential_blend() {
        let mut f = filter();
        f.ingest(10.0);
        // Window mean is now 15.0; 10*0.4 + 15*0.6 = 13
        let (smoothed, _) = f.ingest(20.0);
        assert!((smoothed - 13.0).abs() < 1e-4);
    }

    #[test]
    fn change_zero_until_window_full() {
        let mut f = filter();
        for v in [50.0, 60.0, 70.0, 80.0] {
            let (_, change) = f.ingest(v);
            assert_eq!(change, 0.0);
        }
        let (_, change) = f.ingest(90.0);
        assert!(change != 0.0);
    }

    #[test]
    fn zero_oldest_sample_gives_zero_change() {
        let mut f = filter();
        for v in [0.0, 1.0, 2.0, 3.0] {
            f.ingest(v);
        }
        let (smoothed, change) = f.ingest(4.0);
        assert_eq!(f.oldest(), Some(0.0));
        assert!(smoothed > 0.0);
        assert_eq!(change, 0.0);
    }

    #[test]
    fn small_change_clamped_to_zero() {
        let mut f: SignalFilter<5> =
            SignalFilter::new(FilterSettings::default().with_percent_clamp(0.01));
        for _ in 0..5 {
            f.ingest(100.0);
        }
        // 100.005 against 100.0 is 0.005%
        assert_eq!(f.change_percent(100.005), 0.0);
        assert!(f.change_percent(100.02) > 0.0);
    }

    #[test]
    fn negative_change_survives_clamp() {
        let mut f = filter();
        for _ in 0..5 {
            f.ingest(80.0);
        }
        let (_, change) = f.ingest(70.0);
        assert!(change < 0.0);
    }

    #[test]
    fn reset_returns_to_cold_start() {
        let mut f = filter();
        for _ in 0..6 {
            f.ingest(40.0);
        }
        f.reset();
        assert!(f.is_empty());
        assert_eq!(f.smoothed(), None);
        assert_eq!(f.ingest(10.0), (10.0, 0.0));
    }

    #[test]
    fn capacity_matches_const_generic() {
        let f: SignalFilter<3> = SignalFilter::default();
        assert_eq!(f.capacity(), 3);
        let f: SignalFilter = SignalFilter::default();
        assert_eq!(f.capacity(), DEFAULT_WINDOW_SIZE);
    }

    #[test]
    fn magnitude_helper() {
        assert_eq!(magnitude(-2.5), 2.5);
        assert_eq!(magnitude(2.5), 2.5);
        assert_eq!(magnitude(0.0), 0.0);
    }
}
