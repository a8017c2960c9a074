use anyhow::{anyhow, Context, Result};
use crossbeam_channel::{select, tick, Receiver};
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use analysis::{input_summary, nearest_point, InputSummary, NearestPoint, ReferenceTracker, TrackerConfig};
use delta_ingest_core::{IngestStatsSnapshot, LiveContext, LiveInputSample, TelemetrySource, TrackId};
use model::TrackPoint;
use delta_ingest_f1::{F1Config, F1Source};
use iox::{TrajectoryError, TrajectoryStore};

use crate::sink::EventLogSink;

const REPORT_EVERY: Duration = Duration::from_secs(2);

#[derive(clap::Args, Clone, Debug)]
pub struct LiveArgs {
    /// Record a reference lap, starting after the car sits still
    #[arg(long)]
    pub reference_lap: bool,

    /// UDP bind address (overrides DELTA_F1_BIND)
    #[arg(long)]
    pub bind: Option<String>,

    /// Expected packet format (overrides DELTA_F1_FORMAT)
    #[arg(long)]
    pub format: Option<u16>,

    /// Poll interval in milliseconds
    #[arg(long, default_value_t = 16)]
    pub tick_ms: u64,

    /// Smoothing half-width applied when saving
    #[arg(long, default_value_t = analysis::DEFAULT_HALF_WIDTH)]
    pub smoothing: usize,
}

impl LiveArgs {
    fn f1_config(&self) -> F1Config {
        let mut cfg = F1Config::from_env();
        if let Some(bind) = &self.bind {
            cfg.bind_addr = bind.clone();
        }
        if let Some(format) = self.format {
            cfg.expected_format = format;
        }
        cfg
    }

    fn tracker_config(&self) -> TrackerConfig {
        TrackerConfig { smoothing_half_width: self.smoothing, ..TrackerConfig::default() }
    }
}

#[derive(Serialize)]
struct Status<'a> {
    track: Option<TrackId>,
    recording: bool,
    lap_points: usize,
    reference_points: usize,
    reference: Option<NearestPoint>,
    inputs: &'a InputSummary,
    stats: &'a IngestStatsSnapshot,
}

pub async fn run(args: LiveArgs, store: TrajectoryStore, json: bool) -> Result<()> {
    let ctx = Arc::new(LiveContext::new());
    let source = F1Source::new(args.f1_config()).with_sink(Arc::new(EventLogSink));

    let mut ingest = {
        let ctx = Arc::clone(&ctx);
        tokio::spawn(async move { source.run(ctx).await })
    };

    let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(1);
    let poller = {
        let ctx = Arc::clone(&ctx);
        let args = args.clone();
        std::thread::Builder::new()
            .name("delta-poll".into())
            .spawn(move || poll_loop(&ctx, &args, &store, json, stop_rx))
            .context("spawn poll thread")?
    };

    let outcome = tokio::select! {
        res = tokio::signal::ctrl_c() => res.map(|_| None).context("listen for ctrl-c"),
        res = &mut ingest => Ok(Some(res)),
    };
    ingest.abort();
    info!("shutting down");

    // The poll thread owns the tracker and saves on its way out.
    let _ = stop_tx.send(());
    let polled = tokio::task::spawn_blocking(move || poller.join())
        .await
        .context("join poll thread")?
        .map_err(|_| anyhow!("poll thread panicked"))?;

    if let Some(res) = outcome? {
        res.context("ingest task")?.context("telemetry source stopped")?;
    }
    polled
}

fn poll_loop(
    ctx: &LiveContext,
    args: &LiveArgs,
    store: &TrajectoryStore,
    json: bool,
    stop: Receiver<()>,
) -> Result<()> {
    let ticker = tick(Duration::from_millis(args.tick_ms.max(1)));
    let mut tracker = args.reference_lap.then(|| ReferenceTracker::new(args.tracker_config()));
    let mut window = vec![LiveInputSample::default(); ctx.inputs.capacity()];
    let mut overlay = Overlay::default();
    let mut last_report = Instant::now();

    if tracker.is_some() {
        info!("waiting for the car to stop before recording a reference lap");
    }

    loop {
        select! {
            recv(ticker) -> _ => {
                if let Some(t) = tracker.as_mut() {
                    t.update(ctx);
                } else {
                    overlay.refresh(ctx, store);
                }
                if last_report.elapsed() >= REPORT_EVERY {
                    last_report = Instant::now();
                    let n = ctx.inputs.copy_into(&mut window);
                    report(ctx, tracker.as_ref(), &overlay, &input_summary(&window[..n]), json);
                }
            }
            recv(stop) -> _ => break,
        }
    }

    let Some(mut tracker) = tracker else {
        return Ok(());
    };
    if !tracker.is_recording() {
        info!("no reference lap recorded");
        return Ok(());
    }
    tracker.stop_recording();
    let path = tracker.save_reference_lap(ctx, store)?;
    info!(
        points = tracker.lap_positions().len(),
        path = %path.display(),
        "reference lap written"
    );
    Ok(())
}

/// Stored reference lap for the session's current track.
#[derive(Default)]
struct Overlay {
    track: Option<TrackId>,
    points: Vec<TrackPoint>,
}

impl Overlay {
    /// Reload whenever the session moves to a new track.
    fn refresh(&mut self, ctx: &LiveContext, store: &TrajectoryStore) {
        let track = ctx.current_track();
        if track == self.track {
            return;
        }
        self.track = track;
        self.points.clear();
        let Some(track) = track else { return };
        match store.load(track) {
            Ok(points) => {
                info!(track = %track, points = points.len(), "reference lap available");
                self.points = points;
            }
            Err(TrajectoryError::NotFound(_)) => debug!(track = %track, "no reference lap for track"),
            Err(err) => warn!(track = %track, error = %err, "reference lap unreadable"),
        }
    }

    /// Where the car sits relative to the reference lap.
    fn locate(&self, ctx: &LiveContext) -> Option<NearestPoint> {
        let at = ctx.positions.peek_latest()?;
        nearest_point(&self.points, at.point())
    }
}

fn report(
    ctx: &LiveContext,
    tracker: Option<&ReferenceTracker>,
    overlay: &Overlay,
    inputs: &InputSummary,
    json: bool,
) {
    let stats = ctx.stats.snapshot();
    let status = Status {
        track: ctx.current_track(),
        recording: tracker.is_some_and(ReferenceTracker::is_recording),
        lap_points: tracker.map_or(0, |t| t.lap_positions().len()),
        reference_points: overlay.points.len(),
        reference: overlay.locate(ctx),
        inputs,
        stats: &stats,
    };
    if json {
        match serde_json::to_string(&status) {
            Ok(line) => println!("{line}"),
            Err(err) => warn!(error = %err, "status serialisation failed"),
        }
        return;
    }
    info!(
        track = ?status.track,
        recording = status.recording,
        lap_points = status.lap_points,
        reference_points = status.reference_points,
        reference_gap_m = status.reference.map(|r| r.distance_m),
        throttle_max = inputs.throttle_max,
        brake_max = inputs.brake_max,
        steer_min = inputs.steer_min,
        steer_max = inputs.steer_max,
        received = stats.received,
        rejected = stats.rejected,
        "live"
    );
}
