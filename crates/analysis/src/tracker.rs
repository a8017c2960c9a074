use std::path::PathBuf;
use tracing::{debug, info, warn};

use delta_ingest_core::LiveContext;
use delta_io::{TrajectoryError, TrajectoryStore};
use model::{LiveInputSample, TrackId, TrackPoint};

use crate::smoothing::{smooth_positions, DEFAULT_HALF_WIDTH};

#[derive(Clone, Debug, PartialEq)]
pub struct TrackerConfig {
    /// Number of most recent input samples that must all be at a standstill.
    pub standstill_window: usize,
    /// Speeds at or below this (km/h) count as stopped.
    pub standstill_speed_kph: f32,
    pub smoothing_half_width: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            standstill_window: 50,
            standstill_speed_kph: 1e-3,
            smoothing_half_width: DEFAULT_HALF_WIDTH,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackerState {
    Idle,
    Recording,
}

/// Records the controlled car's path for one lap.
///
/// Starts recording once the car has been stationary for a full window of
/// input samples, then appends the latest position on every tick. There is
/// no internal end condition; the owner stops ticking and calls
/// [`save_reference_lap`](Self::save_reference_lap).
pub struct ReferenceTracker {
    cfg: TrackerConfig,
    state: TrackerState,
    track_id: Option<TrackId>,
    lap_positions: Vec<TrackPoint>,
    inputs: Vec<LiveInputSample>,
}

impl ReferenceTracker {
    pub fn new(cfg: TrackerConfig) -> Self {
        let inputs = vec![LiveInputSample::default(); cfg.standstill_window];
        Self { cfg, state: TrackerState::Idle, track_id: None, lap_positions: Vec::new(), inputs }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.cfg
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    pub fn is_recording(&self) -> bool {
        self.state == TrackerState::Recording
    }

    /// Track captured when recording started, or set by the last load.
    pub fn track_id(&self) -> Option<TrackId> {
        self.track_id
    }

    pub fn lap_positions(&self) -> &[TrackPoint] {
        &self.lap_positions
    }

    /// One tick. Never blocks.
    pub fn update(&mut self, ctx: &LiveContext) {
        if self.state == TrackerState::Idle {
            if !self.standstill(ctx) {
                return;
            }
            self.state = TrackerState::Recording;
            self.lap_positions.clear();
            self.track_id = ctx.current_track();
            info!(track = ?self.track_id, "started recording reference lap");
        }

        if let Some(p) = ctx.positions.peek_latest() {
            self.lap_positions.push(p.point());
        }
    }

    fn standstill(&mut self, ctx: &LiveContext) -> bool {
        let window = self.cfg.standstill_window;
        if window == 0 {
            return true;
        }
        let n = ctx.inputs.copy_into(&mut self.inputs);
        n == window
            && self.inputs[..n]
                .iter()
                .all(|s| s.speed_kph <= self.cfg.standstill_speed_kph)
    }

    /// Back to idle. Accumulated positions are kept until the next start.
    pub fn stop_recording(&mut self) {
        if self.is_recording() {
            debug!(points = self.lap_positions.len(), "stopped recording reference lap");
        }
        self.state = TrackerState::Idle;
    }

    /// Smooth the accumulated positions in place and persist them.
    ///
    /// The track is the one captured when recording started, falling back to
    /// the context's current track.
    pub fn save_reference_lap(
        &mut self,
        ctx: &LiveContext,
        store: &TrajectoryStore,
    ) -> Result<PathBuf, TrajectoryError> {
        let track = self
            .track_id
            .or_else(|| ctx.current_track())
            .ok_or(TrajectoryError::UnknownTrack)?;
        if self.lap_positions.is_empty() {
            warn!(track = %track, "saving empty reference lap");
        }
        self.lap_positions = smooth_positions(&self.lap_positions, self.cfg.smoothing_half_width);
        self.track_id = Some(track);
        store.save(track, &self.lap_positions)
    }

    /// Replace the accumulated positions with the stored lap for `track`.
    /// Returns the number of points loaded.
    pub fn load_reference_lap(
        &mut self,
        track: TrackId,
        store: &TrajectoryStore,
    ) -> Result<usize, TrajectoryError> {
        self.lap_positions = store.load(track)?;
        self.track_id = Some(track);
        info!(track = %track, points = self.lap_positions.len(), "loaded reference lap");
        Ok(self.lap_positions.len())
    }
}

impl Default for ReferenceTracker {
    fn default() -> Self {
        Self::new(TrackerConfig::default())
    }
}
