//! Reference trajectory persistence and export.
//!
//! A trajectory file is a flat run of 12-byte records (x, y, z as
//! little-endian f32) with no header; the record count is the file length
//! divided by the record size.

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufWriter, Cursor, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use model::{TrackId, TrackPoint};

pub const DEFAULT_ROOT: &str = "track_paths";
pub const ROOT_ENV: &str = "DELTA_TRACK_PATHS";

#[derive(Debug, thiserror::Error)]
pub enum TrajectoryError {
    #[error("no reference lap at {}", .0.display())]
    NotFound(PathBuf),
    #[error("{} is {len} bytes, not a whole number of {}-byte records", path.display(), TrackPoint::RECORD_SIZE)]
    Corrupt { path: PathBuf, len: u64 },
    #[error("no track id known for this recording")]
    UnknownTrack,
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("csv export to {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl TrajectoryError {
    fn io(path: &Path, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::NotFound {
            TrajectoryError::NotFound(path.to_path_buf())
        } else {
            TrajectoryError::Io { path: path.to_path_buf(), source }
        }
    }
}

/// Directory of per-track reference laps.
#[derive(Clone, Debug)]
pub struct TrajectoryStore {
    root: PathBuf,
}

impl TrajectoryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `$DELTA_TRACK_PATHS`, falling back to `track_paths` in the working directory.
    pub fn from_env() -> Self {
        let root = std::env::var_os(ROOT_ENV)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT));
        Self::new(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, track: TrackId) -> PathBuf {
        self.root.join(format!("{}_reference_lap.bin", track.0))
    }

    /// Write `points` for `track`, replacing any previous file.
    pub fn save(&self, track: TrackId, points: &[TrackPoint]) -> Result<PathBuf, TrajectoryError> {
        fs::create_dir_all(&self.root).map_err(|e| TrajectoryError::io(&self.root, e))?;
        let path = self.path_for(track);
        let file = File::create(&path).map_err(|e| TrajectoryError::io(&path, e))?;
        let mut w = BufWriter::new(file);
        write_points(&mut w, points)
            .and_then(|_| w.flush())
            .map_err(|e| TrajectoryError::io(&path, e))?;
        info!(track = %track, points = points.len(), path = %path.display(), "saved reference lap");
        Ok(path)
    }

    pub fn load(&self, track: TrackId) -> Result<Vec<TrackPoint>, TrajectoryError> {
        let path = self.path_for(track);
        let bytes = fs::read(&path).map_err(|e| TrajectoryError::io(&path, e))?;
        let points = decode_points(&bytes)
            .ok_or(TrajectoryError::Corrupt { path: path.clone(), len: bytes.len() as u64 })?;
        debug!(track = %track, points = points.len(), "loaded reference lap");
        Ok(points)
    }

    pub fn exists(&self, track: TrackId) -> bool {
        self.path_for(track).is_file()
    }
}

impl Default for TrajectoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT)
    }
}

pub fn write_points<W: Write>(w: &mut W, points: &[TrackPoint]) -> io::Result<()> {
    for p in points {
        w.write_f32::<LittleEndian>(p.x)?;
        w.write_f32::<LittleEndian>(p.y)?;
        w.write_f32::<LittleEndian>(p.z)?;
    }
    Ok(())
}

/// `None` when `bytes` is not a whole number of records.
pub fn decode_points(bytes: &[u8]) -> Option<Vec<TrackPoint>> {
    if bytes.len() % TrackPoint::RECORD_SIZE != 0 {
        return None;
    }
    let mut c = Cursor::new(bytes);
    let mut points = Vec::with_capacity(bytes.len() / TrackPoint::RECORD_SIZE);
    for _ in 0..points.capacity() {
        points.push(TrackPoint {
            x: c.read_f32::<LittleEndian>().ok()?,
            y: c.read_f32::<LittleEndian>().ok()?,
            z: c.read_f32::<LittleEndian>().ok()?,
        });
    }
    Some(points)
}

#[derive(Serialize)]
struct CsvRow {
    index: usize,
    x: f32,
    y: f32,
    z: f32,
}

/// Dump a trajectory as `index,x,y,z` rows for offline inspection.
pub fn export_csv(points: &[TrackPoint], path: &Path) -> Result<(), TrajectoryError> {
    let csv_err = |source| TrajectoryError::Csv { path: path.to_path_buf(), source };
    let mut w = csv::Writer::from_path(path).map_err(csv_err)?;
    for (index, p) in points.iter().enumerate() {
        w.serialize(CsvRow { index, x: p.x, y: p.y, z: p.z }).map_err(csv_err)?;
    }
    w.flush().map_err(|e| TrajectoryError::io(path, e))?;
    Ok(())
}
