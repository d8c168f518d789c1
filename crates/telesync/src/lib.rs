//! Telemetry-to-timeline synchronization core.
//!
//! Ingests an ordered sequence of time-stamped track points, derives
//! per-sample kinematics (speed, grade, cumulative distance), answers
//! point-in-time and point-in-space interpolation queries, and paces an
//! external playback loop so telemetry consumption tracks wall-clock time
//! at recording rate. Document decoding, rendering, and the playback loop
//! itself live outside this crate; it only sees already-decoded samples
//! and hands back interpolated values plus per-frame sleep durations.

pub mod ingest;
pub mod pacer;
pub mod range;
pub mod sample;
pub mod sonda;
pub mod track;

pub use ingest::{IngestError, samples_from_gpx};
pub use pacer::PlaybackPacer;
pub use range::RangeTracker;
pub use sample::{Extension, Sample};
pub use sonda::{Channel, Sonda};
pub use track::Track;
