//! Running min/max/mean accumulator for a numeric telemetry channel.

use serde::{Deserialize, Serialize};

/// Accumulates the minimum, maximum, and mean of a stream of values.
///
/// One tracker per channel (elevation, speed, heart rate, ...) lets a
/// consumer normalize a raw value into its observed range for display.
/// Starts at sentinel extremes (`min = +inf`, `max = -inf`) until the
/// first value is fed in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RangeTracker {
    min: f64,
    max: f64,
    sum: f64,
    count: u64,
}

impl Default for RangeTracker {
    fn default() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            sum: 0.0,
            count: 0,
        }
    }
}

impl RangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker pre-fed with the two bounds of a known interval.
    pub fn spanning(lo: f64, hi: f64) -> Self {
        let mut tracker = Self::new();
        tracker.sample(lo);
        tracker.sample(hi);
        tracker
    }

    /// Feed one value into the accumulator.
    pub fn sample(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.sum += value;
        self.count += 1;
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    /// Mean of all fed values, 0.0 by convention when nothing was fed.
    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }

    /// Map `value` into [0, 1] within the observed range, clamped.
    /// A degenerate range (no samples, or a single distinct value) maps to 0.0.
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if !span.is_finite() || span <= 0.0 {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}
