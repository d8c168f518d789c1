//! Producer-boundary adapter: turns an already-decoded GPX document into
//! the ordered sample sequence the core analyzes.
//!
//! Document decoding itself stays with the producer; this module only maps
//! `gpx::Gpx` values. A track point without a timestamp is a fatal input
//! error here and never reaches analysis.

use gpx::Gpx;
use time::OffsetDateTime;

use crate::sample::Sample;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("track point {index} has no timestamp")]
    MissingTimestamp { index: usize },
}

/// Flatten every track/segment/point of a GPX document, in document
/// order, into samples. Elevation defaults to 0.0 when absent. Sensor
/// extensions are not decoded by the gpx crate; producers with sensor
/// data attach [`Extension`](crate::sample::Extension) records themselves.
pub fn samples_from_gpx(gpx: &Gpx) -> Result<Vec<Sample>, IngestError> {
    let mut samples = Vec::new();
    let mut index = 0;

    for track in &gpx.tracks {
        for segment in &track.segments {
            for point in &segment.points {
                let time = point
                    .time
                    .ok_or(IngestError::MissingTimestamp { index })?;
                let timestamp: OffsetDateTime = time.into();
                let elevation = point.elevation.unwrap_or(0.0);
                samples.push(Sample::new(
                    point.point().y(),
                    point.point().x(),
                    elevation,
                    timestamp,
                ));
                index += 1;
            }
        }
    }

    Ok(samples)
}
