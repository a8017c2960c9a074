//! Live state shared between the ingest task and every consumer.

use parking_lot::RwLock;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::ring::{SampleRing, DEFAULT_CAPACITY};
use model::{LiveInputSample, LivePositionSample, SessionInfo, TrackId};

/// Built once at startup and handed (behind an `Arc`) to the ingest source,
/// the reference tracker and any live consumer. The ingest source is the
/// only writer of the rings and of the session info.
pub struct LiveContext {
    pub inputs: SampleRing<LiveInputSample>,
    pub positions: SampleRing<LivePositionSample>,
    pub stats: IngestStats,
    session: RwLock<SessionInfo>,
}

impl LiveContext {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inputs: SampleRing::new(capacity),
            positions: SampleRing::new(capacity),
            stats: IngestStats::default(),
            session: RwLock::new(SessionInfo::default()),
        }
    }

    pub fn session(&self) -> SessionInfo {
        self.session.read().clone()
    }

    pub fn current_track(&self) -> Option<TrackId> {
        self.session.read().track_id
    }

    pub fn update_session(&self, info: SessionInfo) {
        let mut s = self.session.write();
        if s.track_id != info.track_id {
            tracing::info!(
                track = ?info.track_id,
                session_uid = info.session_uid,
                "track changed"
            );
        }
        *s = info;
    }
}

impl Default for LiveContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Counters for the receive loop. Relaxed everywhere: these are diagnostics,
/// nothing synchronises on them.
#[derive(Default)]
pub struct IngestStats {
    received: AtomicU64,
    decoded: AtomicU64,
    unrecognized: AtomicU64,
    rejected: AtomicU64,
    car_index_out_of_range: AtomicU64,
    inputs_published: AtomicU64,
    positions_published: AtomicU64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct IngestStatsSnapshot {
    pub received: u64,
    pub decoded: u64,
    pub unrecognized: u64,
    pub rejected: u64,
    pub car_index_out_of_range: u64,
    pub inputs_published: u64,
    pub positions_published: u64,
}

impl IngestStats {
    pub fn record_received(&self) {
        self.received.fetch_add(1, Ordering::Relaxed);
    }
    pub fn record_decoded(&self) {
        self.decoded.fetch_add(1, Ordering::Relaxed);
    }
    pub fn record_unrecognized(&self) {
        self.unrecognized.fetch_add(1, Ordering::Relaxed);
    }
    pub fn record_rejected(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }
    pub fn record_car_index_out_of_range(&self) {
        self.car_index_out_of_range.fetch_add(1, Ordering::Relaxed);
    }
    pub fn record_input(&self) {
        self.inputs_published.fetch_add(1, Ordering::Relaxed);
    }
    pub fn record_position(&self) {
        self.positions_published.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> IngestStatsSnapshot {
        IngestStatsSnapshot {
            received: self.received.load(Ordering::Relaxed),
            decoded: self.decoded.load(Ordering::Relaxed),
            unrecognized: self.unrecognized.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
            car_index_out_of_range: self.car_index_out_of_range.load(Ordering::Relaxed),
            inputs_published: self.inputs_published.load(Ordering::Relaxed),
            positions_published: self.positions_published.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_unknown_until_session_update() {
        let ctx = LiveContext::with_capacity(8);
        assert_eq!(ctx.current_track(), None);
        ctx.update_session(SessionInfo { track_id: Some(TrackId(11)), ..Default::default() });
        assert_eq!(ctx.current_track(), Some(TrackId(11)));
        assert_eq!(ctx.inputs.capacity(), 8);
    }

    #[test]
    fn test_stats_snapshot() {
        let stats = IngestStats::default();
        stats.record_received();
        stats.record_received();
        stats.record_rejected();
        stats.record_input();
        let snap = stats.snapshot();
        assert_eq!(snap.received, 2);
        assert_eq!(snap.rejected, 1);
        assert_eq!(snap.inputs_published, 1);
        assert_eq!(snap.decoded, 0);
    }
}
