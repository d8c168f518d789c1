//! Analyzed track: the ordered sample sequence, per-channel ranges, and the
//! time-domain and space-domain interpolation queries.

use geo::{Distance as _, Haversine, geometry::Point};
use time::{Duration, OffsetDateTime};
use tracing::debug;

use crate::range::RangeTracker;
use crate::sample::Sample;
use crate::sonda::{Channel, Sonda};

/// An immutable-after-analysis sequence of samples for one recording
/// session, with running ranges for every telemetry channel.
///
/// Construct with [`Track::new`], call [`Track::analyze`] exactly once,
/// then query freely. Analysis fills the derived kinematic fields on each
/// sample; after that the track is read-only and safe to query from
/// multiple threads. Length-0 and length-1 tracks are degenerate but
/// valid: queries fall back to defined values instead of failing.
#[derive(Debug, Clone, Default)]
pub struct Track {
    samples: Vec<Sample>,
    elevation_range: RangeTracker,
    latitude_range: RangeTracker,
    longitude_range: RangeTracker,
    speed_range: RangeTracker,
    grade_range: RangeTracker,
    cadence_range: RangeTracker,
    heart_rate_range: RangeTracker,
    temperature_range: RangeTracker,
    total_distance: f64,
    center: Option<Point<f64>>,
}

impl Track {
    /// Wrap an ordered (non-decreasing timestamp) sample sequence.
    /// Ordering is the producer's responsibility and is not re-checked.
    pub fn new(samples: Vec<Sample>) -> Self {
        Self {
            samples,
            ..Self::default()
        }
    }

    /// Run the single analysis pass. Call once, before any query.
    ///
    /// Feeds every channel's range tracker and derives segment length,
    /// cumulative distance, speed, and grade for each sample pair. Tracks
    /// with fewer than two samples skip the per-segment derivation and
    /// leave the speed/grade trackers at their sentinel extremes.
    pub fn analyze(&mut self) {
        let n = self.samples.len();

        for i in 0..n {
            let sample = &self.samples[i];
            self.elevation_range.sample(sample.elevation);
            self.latitude_range.sample(sample.latitude);
            self.longitude_range.sample(sample.longitude);
            if let Some(cadence) = sample.cadence() {
                self.cadence_range.sample(cadence);
            }
            if let Some(heart_rate) = sample.heart_rate() {
                self.heart_rate_range.sample(heart_rate);
            }
            if let Some(temperature) = sample.temperature() {
                self.temperature_range.sample(temperature);
            }

            if i + 1 < n {
                let length = Haversine.distance(self.samples[i].point(), self.samples[i + 1].point());
                let elapsed = (self.samples[i + 1].timestamp - self.samples[i].timestamp)
                    .as_seconds_f64();
                let climb = self.samples[i + 1].elevation - self.samples[i].elevation;
                let speed = if elapsed > 0.0 { length / elapsed } else { 0.0 };
                let grade = if length > 0.0 { climb / length } else { 0.0 };
                let next_distance = self.samples[i].distance_from_start + length;

                let sample = &mut self.samples[i];
                sample.segment_length = length;
                sample.speed = speed;
                sample.grade = grade;
                self.samples[i + 1].distance_from_start = next_distance;

                self.speed_range.sample(speed);
                self.grade_range.sample(grade);
            }
        }

        self.total_distance = self.samples.last().map_or(0.0, |s| s.distance_from_start);
        if n > 0 {
            self.center = Some(Point::new(
                self.longitude_range.mean(),
                self.latitude_range.mean(),
            ));
        }

        debug!(
            samples = n,
            total_distance_m = self.total_distance,
            "track analysis complete"
        );
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn min_time(&self) -> Option<OffsetDateTime> {
        self.samples.first().map(|s| s.timestamp)
    }

    pub fn max_time(&self) -> Option<OffsetDateTime> {
        self.samples.last().map(|s| s.timestamp)
    }

    /// Total recorded duration; zero for degenerate tracks.
    pub fn duration(&self) -> Duration {
        match (self.min_time(), self.max_time()) {
            (Some(first), Some(last)) => last - first,
            _ => Duration::ZERO,
        }
    }

    /// Cumulative haversine length of the whole track, meters.
    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    /// Mean of all sample latitudes/longitudes, set by `analyze`.
    pub fn center_position(&self) -> Option<Point<f64>> {
        self.center
    }

    pub fn elevation_range(&self) -> &RangeTracker {
        &self.elevation_range
    }

    pub fn speed_range(&self) -> &RangeTracker {
        &self.speed_range
    }

    pub fn grade_range(&self) -> &RangeTracker {
        &self.grade_range
    }

    pub fn cadence_range(&self) -> &RangeTracker {
        &self.cadence_range
    }

    pub fn heart_rate_range(&self) -> &RangeTracker {
        &self.heart_rate_range
    }

    pub fn temperature_range(&self) -> &RangeTracker {
        &self.temperature_range
    }

    /// Linear map of `t` onto [0, 100] between the first and last sample
    /// timestamps: 0 below the first, 100 at or beyond the last. A
    /// zero-duration track reports 100 at its single instant; callers
    /// needing finer behavior must special-case such tracks.
    pub fn progress_for_time(&self, t: OffsetDateTime) -> f64 {
        match (self.min_time(), self.max_time()) {
            (Some(first), Some(last)) => progress_between(t, first, last),
            _ => 0.0,
        }
    }

    /// Inverse of [`Track::progress_for_time`], clamped to the first/last
    /// sample timestamps. `None` for an empty track.
    pub fn time_for_progress(&self, progress: f64) -> Option<OffsetDateTime> {
        let first = self.min_time()?;
        let last = self.max_time()?;
        if progress <= 0.0 {
            return Some(first);
        }
        if progress >= 100.0 {
            return Some(last);
        }
        Some(first + (last - first) * (progress / 100.0))
    }

    /// Coarse global distance map: progress percent of the total track
    /// length, clamped to [0, total]. Distinct from the per-segment
    /// interpolation used by the sonda queries.
    pub fn distance_for_progress(&self, progress: f64) -> f64 {
        if progress <= 0.0 {
            return 0.0;
        }
        if progress >= 100.0 {
            return self.total_distance;
        }
        self.total_distance * progress / 100.0
    }

    /// Interpolated sample at an absolute timestamp.
    ///
    /// Finds the adjacent sample pair bracketing `t` (binary search),
    /// linearly interpolates position, elevation, and the optional sensor
    /// channels, and takes speed/grade from the bracket's left sample as
    /// segment constants. Timestamps outside the track span clamp to the
    /// boundary samples. Tracks with fewer than two samples yield a
    /// zero-valued sonda pinned at `t`.
    pub fn sonda_at_time(&self, t: OffsetDateTime) -> Sonda {
        let n = self.samples.len();
        if n < 2 {
            return self.pinned_sonda(t);
        }

        // locate returns the floor index, so the bracket is the segment
        // starting there, capped to the last real segment
        let left_ix = self.locate(t).min(n - 2);
        let left = &self.samples[left_ix];
        let right = &self.samples[left_ix + 1];

        let f = progress_between(t, left.timestamp, right.timestamp);
        let lerp = |a: f64, b: f64| a + (b - a) * f / 100.0;
        let optional = |a: Option<f64>, b: Option<f64>, range: RangeTracker| match (a, b) {
            (Some(a), Some(b)) => Some(Channel::new(lerp(a, b), range)),
            _ => None,
        };

        let first = self.samples[0].timestamp;

        Sonda {
            timestamp: t,
            elapsed: Channel::new(
                (t - first).as_seconds_f64(),
                RangeTracker::spanning(0.0, self.duration().as_seconds_f64()),
            ),
            latitude: lerp(left.latitude, right.latitude),
            longitude: lerp(left.longitude, right.longitude),
            elevation: Channel::new(
                lerp(left.elevation, right.elevation),
                self.elevation_range,
            ),
            grade: Channel::new(left.grade, self.grade_range),
            distance: Channel::new(
                left.distance_from_start + f / 100.0 * left.segment_length,
                RangeTracker::spanning(0.0, self.total_distance),
            ),
            speed: Channel::new(left.speed, self.speed_range),
            cadence: optional(left.cadence(), right.cadence(), self.cadence_range),
            heart_rate: optional(left.heart_rate(), right.heart_rate(), self.heart_rate_range),
            source_index: left_ix,
        }
    }

    /// Interpolated sample at an offset from the track start.
    pub fn sonda_at_offset(&self, offset: Duration) -> Sonda {
        let base = self.min_time().unwrap_or(OffsetDateTime::UNIX_EPOCH);
        self.sonda_at_time(base + offset)
    }

    /// Interpolated sample nearest to a position.
    ///
    /// Scans every sample for the minimum haversine distance to `position`
    /// and delegates to the time query at that sample's timestamp. Tracks
    /// with fewer than three samples return `None`.
    pub fn sonda_near(&self, position: Point<f64>) -> Option<Sonda> {
        if self.samples.len() < 3 {
            return None;
        }
        let (nearest, _) = self
            .samples
            .iter()
            .enumerate()
            .map(|(ix, s)| (ix, Haversine.distance(position, s.point())))
            .min_by(|(_, a), (_, b)| a.total_cmp(b))?;
        Some(self.sonda_at_time(self.samples[nearest].timestamp))
    }

    /// Binary search over `[low, high)` index bounds for the last sample
    /// whose timestamp is at or before `t` (0 when `t` precedes the track).
    fn locate(&self, t: OffsetDateTime) -> usize {
        let mut low = 0;
        let mut high = self.samples.len();
        while high - low >= 2 {
            let mid = low + (high - low) / 2;
            if self.samples[mid].timestamp <= t {
                low = mid;
            } else {
                high = mid;
            }
        }
        low
    }

    // Degenerate-track sonda: every value zero, pinned at the query
    // timestamp. A defined terminal case, not an error.
    fn pinned_sonda(&self, t: OffsetDateTime) -> Sonda {
        Sonda {
            timestamp: t,
            elapsed: Channel::new(0.0, RangeTracker::spanning(0.0, 0.0)),
            latitude: 0.0,
            longitude: 0.0,
            elevation: Channel::new(0.0, self.elevation_range),
            grade: Channel::new(0.0, self.grade_range),
            distance: Channel::new(0.0, RangeTracker::spanning(0.0, self.total_distance)),
            speed: Channel::new(0.0, self.speed_range),
            cadence: None,
            heart_rate: None,
            source_index: 0,
        }
    }
}

fn progress_between(t: OffsetDateTime, first: OffsetDateTime, last: OffsetDateTime) -> f64 {
    if t < first {
        return 0.0;
    }
    if t >= last {
        return 100.0;
    }
    let span = (last - first).as_seconds_f64();
    (t - first).as_seconds_f64() / span * 100.0
}
