use analysis::{smooth_positions, ReferenceTracker, TrackerConfig, TrackerState};
use delta_ingest_core::{LiveContext, LiveInputSample, LivePositionSample, SessionInfo, TrackId};
use delta_io::TrajectoryStore;

#[test]
fn standstill_then_lap_records_and_saves() {
    let ctx = LiveContext::new();
    ctx.update_session(SessionInfo { track_id: Some(TrackId(12)), ..Default::default() });
    let mut tracker = ReferenceTracker::new(TrackerConfig::default());

    for i in 0..50 {
        ctx.inputs.push(LiveInputSample { speed_kph: 0.0, timestamp_ms: i, ..Default::default() });
    }
    tracker.update(&ctx);
    assert_eq!(tracker.state(), TrackerState::Recording);

    // No automatic exit once moving.
    ctx.inputs.push(LiveInputSample { speed_kph: 85.0, timestamp_ms: 50, ..Default::default() });
    tracker.update(&ctx);
    assert!(tracker.is_recording());

    for i in 0..100u64 {
        let a = i as f32 * 0.0628;
        ctx.positions.push(LivePositionSample {
            x: 500.0 * a.cos(),
            y: 1.0,
            z: 500.0 * a.sin(),
            timestamp_ms: 60 + i,
        });
        tracker.update(&ctx);
    }
    assert_eq!(tracker.lap_positions().len(), 100);
    let raw = tracker.lap_positions().to_vec();

    let dir = tempfile::tempdir().unwrap();
    let store = TrajectoryStore::new(dir.path());
    let path = tracker.save_reference_lap(&ctx, &store).unwrap();
    assert!(path.ends_with("12_reference_lap.bin"));
    assert_eq!(tracker.lap_positions().len(), 100);
    assert_eq!(tracker.lap_positions(), smooth_positions(&raw, 5).as_slice());

    let mut reloaded = ReferenceTracker::default();
    assert_eq!(reloaded.load_reference_lap(TrackId(12), &store).unwrap(), 100);
    assert_eq!(reloaded.lap_positions(), tracker.lap_positions());
}

#[test]
fn transition_track_wins_over_later_session_change() {
    let ctx = LiveContext::with_capacity(64);
    ctx.update_session(SessionInfo { track_id: Some(TrackId(3)), ..Default::default() });
    let mut tracker = ReferenceTracker::default();
    for _ in 0..50 {
        ctx.inputs.push(LiveInputSample::default());
    }
    ctx.positions.push(LivePositionSample::default());
    tracker.update(&ctx);
    ctx.update_session(SessionInfo { track_id: Some(TrackId(4)), ..Default::default() });

    let dir = tempfile::tempdir().unwrap();
    let store = TrajectoryStore::new(dir.path());
    tracker.save_reference_lap(&ctx, &store).unwrap();
    assert!(store.exists(TrackId(3)));
    assert!(!store.exists(TrackId(4)));
}
