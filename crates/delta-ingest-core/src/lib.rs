//! Core live-telemetry plumbing used by Delta: the bounded sample rings,
//! the shared live context and the source trait every connector implements.

pub mod context;
pub mod ring;

use std::sync::Arc;

pub use context::{IngestStats, IngestStatsSnapshot, LiveContext};
pub use model::{LiveInputSample, LivePositionSample, SessionInfo, TrackId};
pub use ring::{RingSample, SampleRing, DEFAULT_CAPACITY};

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Trait for any live source connector. A source is the sole writer of the
/// context's sample rings for as long as `run` is executing.
#[async_trait::async_trait]
pub trait TelemetrySource: Send + Sync {
    async fn run(&self, ctx: Arc<LiveContext>) -> Result<(), IngestError>;
}
