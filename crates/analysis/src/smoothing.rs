use model::TrackPoint;

pub const DEFAULT_HALF_WIDTH: usize = 5;

/// Centred moving average over `[i - half_width, i + half_width]`.
///
/// Windows are clipped at both ends of the sequence, so edge points average
/// over fewer neighbours. `half_width == 0` returns the input unchanged.
pub fn smooth_positions(points: &[TrackPoint], half_width: usize) -> Vec<TrackPoint> {
    if half_width == 0 || points.len() < 2 {
        return points.to_vec();
    }
    (0..points.len())
        .map(|i| {
            let lo = i.saturating_sub(half_width);
            let hi = (i + half_width).min(points.len() - 1);
            let window = &points[lo..=hi];
            let n = window.len() as f32;
            let (sx, sy, sz) = window
                .iter()
                .fold((0.0f32, 0.0f32, 0.0f32), |(x, y, z), p| (x + p.x, y + p.y, z + p.z));
            TrackPoint::new(sx / n, sy / n, sz / n)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn line(n: usize) -> Vec<TrackPoint> {
        (0..n).map(|i| TrackPoint::new(i as f32, 2.0 * i as f32, 0.0)).collect()
    }

    #[test]
    fn test_zero_width_is_identity() {
        let pts = vec![TrackPoint::new(1.0, 5.0, -3.0), TrackPoint::new(0.1, 0.2, 0.3)];
        assert_eq!(smooth_positions(&pts, 0), pts);
    }

    #[test]
    fn test_edges_use_clipped_window() {
        let out = smooth_positions(&line(5), 1);
        assert_eq!(out.len(), 5);
        // i=0 averages points 0 and 1; i=2 averages 1..=3.
        assert_eq!(out[0], TrackPoint::new(0.5, 1.0, 0.0));
        assert_eq!(out[2], TrackPoint::new(2.0, 4.0, 0.0));
        assert_eq!(out[4], TrackPoint::new(3.5, 7.0, 0.0));
    }

    #[test]
    fn test_short_inputs() {
        assert!(smooth_positions(&[], 5).is_empty());
        let one = [TrackPoint::new(1.0, 1.0, 1.0)];
        assert_eq!(smooth_positions(&one, 5), one.to_vec());
    }

    fn within(v: f32, lo: f32, hi: f32) -> bool {
        let eps = 1e-3 * (1.0 + lo.abs().max(hi.abs()));
        v >= lo - eps && v <= hi + eps
    }

    proptest! {
        #[test]
        fn smoothing_stays_within_window_bounds(
            raw in proptest::collection::vec((-5000.0f32..5000.0, -100.0f32..100.0, -5000.0f32..5000.0), 0..200),
            half_width in 1usize..12,
        ) {
            let pts: Vec<TrackPoint> = raw.iter().map(|&(x, y, z)| TrackPoint::new(x, y, z)).collect();
            let out = smooth_positions(&pts, half_width);
            prop_assert_eq!(out.len(), pts.len());
            for (i, p) in out.iter().enumerate() {
                let lo = i.saturating_sub(half_width);
                let hi = (i + half_width).min(pts.len() - 1);
                let w = &pts[lo..=hi];
                let min = |f: fn(&TrackPoint) -> f32| w.iter().map(f).fold(f32::INFINITY, f32::min);
                let max = |f: fn(&TrackPoint) -> f32| w.iter().map(f).fold(f32::NEG_INFINITY, f32::max);
                prop_assert!(within(p.x, min(|q| q.x), max(|q| q.x)));
                prop_assert!(within(p.y, min(|q| q.y), max(|q| q.y)));
                prop_assert!(within(p.z, min(|q| q.z), max(|q| q.z)));
            }
        }
    }
}
