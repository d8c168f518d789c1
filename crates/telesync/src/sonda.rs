//! Interpolated sample ("sonda") synthesized by track queries.

use geo::geometry::Point;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::range::RangeTracker;

/// One telemetry channel of a sonda: the interpolated value paired with a
/// snapshot of the track-wide range it came from, so a consumer can
/// normalize it for display.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Channel {
    pub value: f64,
    pub range: RangeTracker,
}

impl Channel {
    pub fn new(value: f64, range: RangeTracker) -> Self {
        Self { value, range }
    }

    /// The value mapped into [0, 1] within its range.
    pub fn normalized(&self) -> f64 {
        self.range.normalize(self.value)
    }
}

/// A synthesized sample at an arbitrary query timestamp.
///
/// Constructed fresh per query and owned solely by the caller; the track
/// is not borrowed. Cadence and heart rate are absent when either bracket
/// endpoint lacked the sensor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sonda {
    pub timestamp: OffsetDateTime,
    /// Seconds since the first sample, ranged over the whole track duration
    pub elapsed: Channel,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: Channel,
    pub grade: Channel,
    /// Meters from the track start
    pub distance: Channel,
    /// Meters per second
    pub speed: Channel,
    pub cadence: Option<Channel>,
    pub heart_rate: Option<Channel>,
    /// Index of the bracket's left sample in the track
    pub source_index: usize,
}

impl Sonda {
    /// Position as a geo point (x = longitude, y = latitude).
    pub fn point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}
