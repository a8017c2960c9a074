use anyhow::{Context, Result};
use std::path::Path;

use iox::TrajectoryStore;
use model::TrackId;

/// Print every point of the stored reference lap for `track`.
pub fn run(store: &TrajectoryStore, track: TrackId, csv: Option<&Path>, json: bool) -> Result<()> {
    let points = store.load(track)?;

    if let Some(path) = csv {
        iox::export_csv(&points, path)?;
    }

    if json {
        let out = serde_json::to_string_pretty(&points).context("serialise points")?;
        println!("{out}");
    } else {
        println!("{} points in {}", points.len(), store.path_for(track).display());
        for (i, p) in points.iter().enumerate() {
            println!("{i}: ({}, {}, {})", p.x, p.y, p.z);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use iox::TrajectoryError;
    use model::TrackPoint;

    #[test]
    fn test_missing_and_corrupt_are_errors() {
        let dir = tempfile::tempdir().unwrap();
        let store = TrajectoryStore::new(dir.path());

        let err = run(&store, TrackId(1), None, false).unwrap_err();
        assert!(matches!(err.downcast_ref(), Some(TrajectoryError::NotFound(_))));

        std::fs::write(store.path_for(TrackId(1)), [0u8; 13]).unwrap();
        let err = run(&store, TrackId(1), None, false).unwrap_err();
        assert!(matches!(err.downcast_ref(), Some(TrajectoryError::Corrupt { len: 13, .. })));
    }

    #[test]
    fn test_csv_export() {
        let dir = tempfile::tempdir().unwrap();
        let store = TrajectoryStore::new(dir.path());
        store.save(TrackId(2), &[TrackPoint::new(1.0, 2.0, 3.0)]).unwrap();
        let csv = dir.path().join("out.csv");
        run(&store, TrackId(2), Some(&csv), true).unwrap();
        assert!(std::fs::read_to_string(csv).unwrap().contains("0,1.0,2.0,3.0"));
    }
}
