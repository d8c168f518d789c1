//! One recorded telemetry instant: position, elevation, timestamp, and
//! optional sensor metrics, plus kinematic fields derived during track
//! analysis.

use geo::geometry::Point;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Optional sensor metrics attached to a track point.
/// Each channel is independently optional per sample.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Extension {
    /// Cadence in RPM
    pub cadence: Option<f64>,
    /// Heart rate in BPM
    pub heart_rate: Option<f64>,
    /// Temperature in degrees Celsius
    pub temperature: Option<f64>,
}

impl Extension {
    pub fn has_any_data(&self) -> bool {
        self.cadence.is_some() || self.heart_rate.is_some() || self.temperature.is_some()
    }
}

/// A single track point.
///
/// The derived fields (`distance_from_start`, `segment_length`, `speed`,
/// `grade`) are zero until [`Track::analyze`](crate::track::Track::analyze)
/// has run. The last sample of a track keeps zero speed/grade/segment
/// length since it has no successor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sample {
    /// WGS-84 latitude in degrees
    pub latitude: f64,
    /// WGS-84 longitude in degrees
    pub longitude: f64,
    /// Elevation in meters (0.0 when the producer had none)
    pub elevation: f64,
    pub timestamp: OffsetDateTime,
    pub extension: Option<Extension>,

    /// Cumulative haversine distance from the first sample, meters
    pub distance_from_start: f64,
    /// Haversine distance to the next sample, meters
    pub segment_length: f64,
    /// Speed over the segment to the next sample, m/s
    pub speed: f64,
    /// Elevation delta over the segment divided by its length
    pub grade: f64,
}

impl Sample {
    pub fn new(latitude: f64, longitude: f64, elevation: f64, timestamp: OffsetDateTime) -> Self {
        Self {
            latitude,
            longitude,
            elevation,
            timestamp,
            extension: None,
            distance_from_start: 0.0,
            segment_length: 0.0,
            speed: 0.0,
            grade: 0.0,
        }
    }

    pub fn with_extension(mut self, extension: Extension) -> Self {
        self.extension = Some(extension);
        self
    }

    /// Position as a geo point (x = longitude, y = latitude).
    pub fn point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }

    pub fn cadence(&self) -> Option<f64> {
        self.extension.and_then(|e| e.cadence)
    }

    pub fn heart_rate(&self) -> Option<f64> {
        self.extension.and_then(|e| e.heart_rate)
    }

    pub fn temperature(&self) -> Option<f64> {
        self.extension.and_then(|e| e.temperature)
    }
}
