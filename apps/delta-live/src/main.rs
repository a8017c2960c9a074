//! delta-live: F1 UDP telemetry ingest with reference-lap recording.

mod calibrate;
mod live;
mod sink;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use iox::TrajectoryError;
use model::TrackId;

#[derive(Parser)]
#[command(name = "delta-live", version, about = "Live F1 telemetry and reference laps")]
struct Cli {
    /// Machine-readable output
    #[arg(long, global = true)]
    json: bool,

    /// More logging (-v debug, -vv trace). RUST_LOG wins when set.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Directory holding `<track_id>_reference_lap.bin` files
    #[arg(long, global = true)]
    track_paths: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Receive telemetry until Ctrl-C
    Live(live::LiveArgs),

    /// Print a stored reference lap
    Calibrate {
        track_id: TrackId,

        /// Also export the points as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // A second init (tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

fn store_for(cli: &Cli) -> iox::TrajectoryStore {
    match &cli.track_paths {
        Some(root) => iox::TrajectoryStore::new(root),
        None => iox::TrajectoryStore::from_env(),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Commands::Live(args) => run_live(args, store_for(&cli), cli.json),
        Commands::Calibrate { track_id, csv } => {
            calibrate::run(&store_for(&cli), *track_id, csv.as_deref(), cli.json)
        }
    };

    if let Err(err) = result {
        eprintln!("error: {err:#}");
        std::process::exit(exit_code(&err));
    }
}

fn run_live(args: &live::LiveArgs, store: iox::TrajectoryStore, json: bool) -> Result<()> {
    let rt = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    rt.block_on(live::run(args.clone(), store, json))
}

fn exit_code(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<TrajectoryError>() {
        Some(TrajectoryError::NotFound(_)) => 2,
        Some(TrajectoryError::Corrupt { .. }) => 3,
        Some(TrajectoryError::UnknownTrack) => 4,
        _ => 1,
    }
}
