//! Playback pacing: keeps timeline progress in lockstep with wall-clock
//! time by telling the playback loop how long to sleep before advancing.

use std::time::{Duration, Instant};

use time::OffsetDateTime;
use tracing::trace;

/// Throttle for a playback loop that consumes timeline positions faster
/// than real time.
///
/// Each loop owns its own pacer; the state is two remembered instants
/// (timeline and wall clock) and nothing is shared. The first `advance`
/// after construction or [`PlaybackPacer::reset`] only records the
/// starting point and returns a zero delay. The pacer never asks a slow
/// consumer to catch up: the delay floors at zero.
#[derive(Debug, Default)]
pub struct PlaybackPacer {
    previous: Option<(OffsetDateTime, Instant)>,
}

impl PlaybackPacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget both remembered instants. The next `advance` starts a new
    /// playback session.
    pub fn reset(&mut self) {
        self.previous = None;
    }

    /// Record the new timeline position and return how long the caller
    /// should suspend so the timeline does not outrun the wall clock.
    pub fn advance(&mut self, timeline: OffsetDateTime) -> Duration {
        let now = Instant::now();
        let delay = match self.previous {
            None => Duration::ZERO,
            Some((previous_timeline, previous_wall)) => {
                let elapsed_timeline = (timeline - previous_timeline).as_seconds_f64();
                let elapsed_wall = now.duration_since(previous_wall).as_secs_f64();
                let lag = elapsed_timeline - elapsed_wall;
                if lag > 0.0 {
                    Duration::from_secs_f64(lag)
                } else {
                    Duration::ZERO
                }
            }
        };
        self.previous = Some((timeline, now));
        trace!(delay_ms = delay.as_millis() as u64, "pacer advance");
        delay
    }

    /// Advance and block the calling thread for the computed delay.
    ///
    /// The slept time must not count as wall-clock progress against the
    /// next frame, so the remembered wall instant is re-captured after
    /// the sleep.
    pub fn wait_if_needed(&mut self, timeline: OffsetDateTime) {
        let delay = self.advance(timeline);
        if !delay.is_zero() {
            std::thread::sleep(delay);
            self.previous = Some((timeline, Instant::now()));
        }
    }
}
