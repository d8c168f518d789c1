//! End-to-end flow: decode a GPX document, ingest it, analyze the track,
//! query interpolated sondas along the timeline, and pace a playback loop.

use geo::geometry::Point;
use std::time::Instant;
use telesync::{Extension, PlaybackPacer, Track, samples_from_gpx};
use time::{Duration, OffsetDateTime, macros::datetime};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

const RIDE_GPX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="telesync-tests" xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
    <name>Morning ride</name>
    <trkseg>
      <trkpt lat="50.0600000" lon="19.9400000">
        <ele>210.00</ele>
        <time>2024-06-01T10:00:00Z</time>
      </trkpt>
      <trkpt lat="50.0610000" lon="19.9400000">
        <ele>214.00</ele>
        <time>2024-06-01T10:00:10Z</time>
      </trkpt>
      <trkpt lat="50.0620000" lon="19.9400000">
        <ele>220.00</ele>
        <time>2024-06-01T10:00:20Z</time>
      </trkpt>
      <trkpt lat="50.0630000" lon="19.9400000">
        <ele>218.00</ele>
        <time>2024-06-01T10:00:30Z</time>
      </trkpt>
      <trkpt lat="50.0640000" lon="19.9400000">
        <ele>216.00</ele>
        <time>2024-06-01T10:00:40Z</time>
      </trkpt>
    </trkseg>
  </trk>
</gpx>
"#;

fn start() -> OffsetDateTime {
    datetime!(2024-06-01 10:00:00 UTC)
}

fn analyzed_ride() -> Track {
    let gpx = gpx::read(RIDE_GPX.as_bytes()).expect("valid test document");
    let mut samples = samples_from_gpx(&gpx).expect("all points carry timestamps");
    // the producer attaches sensor data; simulate a cadence/heart-rate feed
    for (ix, sample) in samples.iter_mut().enumerate() {
        sample.extension = Some(Extension {
            cadence: Some(80.0 + ix as f64),
            heart_rate: Some(140.0 + 2.0 * ix as f64),
            temperature: Some(21.0),
        });
    }
    let mut track = Track::new(samples);
    track.analyze();
    track
}

#[test]
fn test_ingested_track_metadata() {
    init_tracing();
    let track = analyzed_ride();

    assert_eq!(track.len(), 5);
    assert_eq!(track.min_time(), Some(start()));
    assert_eq!(track.max_time(), Some(start() + Duration::seconds(40)));
    assert_eq!(track.duration(), Duration::seconds(40));
    assert!(track.total_distance() > 0.0);

    let center = track.center_position().expect("non-empty track");
    assert!((center.y() - 50.062).abs() < 1e-9);
    assert!((center.x() - 19.94).abs() < 1e-9);
}

#[test]
fn test_timeline_queries_line_up() {
    init_tracing();
    let track = analyzed_ride();

    assert_eq!(track.progress_for_time(start()), 0.0);
    assert_eq!(track.progress_for_time(start() + Duration::seconds(40)), 100.0);
    assert!((track.progress_for_time(start() + Duration::seconds(10)) - 25.0).abs() < 1e-9);

    let halfway = track.sonda_at_offset(Duration::seconds(20));
    assert!((halfway.elevation.value - 220.0).abs() < 1e-6);
    assert!((halfway.distance.value - track.total_distance() / 2.0).abs() < 0.5);

    let between = track.sonda_at_time(start() + Duration::seconds(15));
    assert!((between.elevation.value - 217.0).abs() < 1e-6);
    assert!((between.latitude - 50.0615).abs() < 1e-9);
    let cadence = between.cadence.expect("cadence on both endpoints");
    assert!((cadence.value - 81.5).abs() < 1e-6);
}

#[test]
fn test_spatial_query_matches_time_query() {
    init_tracing();
    let track = analyzed_ride();

    // just off the fourth point
    let sonda = track
        .sonda_near(Point::new(19.94001, 50.06301))
        .expect("track has five samples");
    let direct = track.sonda_at_time(start() + Duration::seconds(30));
    assert!((sonda.elevation.value - direct.elevation.value).abs() < 1e-9);
    assert_eq!(sonda.timestamp, direct.timestamp);
}

#[test]
fn test_sonda_serializes_for_overlay_consumers() {
    init_tracing();
    let track = analyzed_ride();
    let sonda = track.sonda_at_offset(Duration::seconds(15));

    let json = serde_json::to_value(&sonda).expect("sonda serializes");
    assert!(json["elevation"]["value"].is_number());
    assert!(json["speed"]["range"].is_object());
    assert!(json["timestamp"].is_string() || json["timestamp"].is_array());
}

#[test]
fn test_paced_playback_tracks_wall_clock() {
    init_tracing();
    let track = analyzed_ride();
    let mut pacer = PlaybackPacer::new();

    // play the first 200 timeline milliseconds in 50 ms frames
    let started = Instant::now();
    let mut position = start();
    pacer.wait_if_needed(position);
    for _ in 0..4 {
        position += Duration::milliseconds(50);
        let sonda = track.sonda_at_time(position);
        assert!(sonda.elevation.value >= 210.0);
        pacer.wait_if_needed(position);
    }

    // four 50 ms frames should take at least ~200 ms of wall clock
    assert!(started.elapsed() >= std::time::Duration::from_millis(180));
}
