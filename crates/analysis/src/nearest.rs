use serde::Serialize;

use model::TrackPoint;

/// Closest reference point to a live position.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct NearestPoint {
    pub index: usize,
    pub distance_m: f32,
}

/// Linear scan; reference laps are a few thousand points at most.
pub fn nearest_point(lap: &[TrackPoint], at: TrackPoint) -> Option<NearestPoint> {
    let mut best: Option<NearestPoint> = None;
    let mut bd = f32::INFINITY;
    for (index, p) in lap.iter().enumerate() {
        let (dx, dy, dz) = (p.x - at.x, p.y - at.y, p.z - at.z);
        let d2 = dx * dx + dy * dy + dz * dz;
        if d2 < bd {
            bd = d2;
            best = Some(NearestPoint { index, distance_m: d2.sqrt() });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_lap_has_no_nearest() {
        assert_eq!(nearest_point(&[], TrackPoint::default()), None);
    }

    #[test]
    fn test_picks_closest_point() {
        let lap: Vec<_> = (0..10).map(|i| TrackPoint::new(i as f32 * 10.0, 0.0, 0.0)).collect();
        let hit = nearest_point(&lap, TrackPoint::new(41.0, 0.0, 3.0)).unwrap();
        assert_eq!(hit.index, 4);
        assert!((hit.distance_m - 10f32.sqrt()).abs() < 1e-5);
    }
}
