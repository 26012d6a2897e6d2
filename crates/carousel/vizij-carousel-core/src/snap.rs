//! Snap-target resolution: nearest resting position for a released track.

/// Index of the snap point nearest to `offset` by absolute distance.
///
/// Edge cases:
/// - Empty `snap_points` returns `0`. Callers still guard rendering of an
///   empty track separately.
/// - Exact ties resolve to the lowest index.
///
/// Linear scan; slide counts are small. The result for a non-finite `offset`
/// is unspecified.
pub fn resolve_snap_target(offset: f64, snap_points: &[f64]) -> usize {
    let Some(&first) = snap_points.first() else {
        return 0;
    };
    let mut best = 0;
    let mut best_dist = (offset - first).abs();
    for (i, &point) in snap_points.iter().enumerate().skip(1) {
        let dist = (offset - point).abs();
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}

/// Binary-search variant of [`resolve_snap_target`] for ascending `snap_points`.
///
/// Returns the same index as the linear scan, including the lowest-index rule
/// on ties and duplicate points. Unsorted input gives an unspecified index.
pub fn resolve_snap_target_sorted(offset: f64, snap_points: &[f64]) -> usize {
    if snap_points.is_empty() {
        return 0;
    }
    let upper = snap_points.partition_point(|p| *p < offset);
    let value = if upper == 0 {
        snap_points[0]
    } else if upper == snap_points.len() {
        snap_points[upper - 1]
    } else {
        let below = snap_points[upper - 1];
        let above = snap_points[upper];
        // Lower candidate wins the tie.
        if (offset - above).abs() < (offset - below).abs() {
            above
        } else {
            below
        }
    };
    // First occurrence of the chosen value.
    snap_points.partition_point(|p| *p < value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const POINTS: [f64; 4] = [0.0, 100.0, 200.0, 400.0];

    #[test]
    fn empty_points_fall_back_to_zero() {
        assert_eq!(resolve_snap_target(10.0, &[]), 0);
        assert_eq!(resolve_snap_target_sorted(10.0, &[]), 0);
    }

    #[test]
    fn picks_nearest_point() {
        assert_eq!(resolve_snap_target(10.0, &POINTS), 0);
        assert_eq!(resolve_snap_target(120.0, &POINTS), 1);
        assert_eq!(resolve_snap_target(380.0, &POINTS), 3);
        assert_eq!(resolve_snap_target(-500.0, &POINTS), 0);
        assert_eq!(resolve_snap_target(9000.0, &POINTS), 3);
    }

    #[test]
    fn ties_prefer_lowest_index() {
        assert_eq!(resolve_snap_target(50.0, &POINTS), 0);
        assert_eq!(resolve_snap_target(300.0, &POINTS), 2);
        assert_eq!(resolve_snap_target(5.0, &[10.0, 0.0, 10.0]), 0);
    }

    #[test]
    fn unsorted_points_are_scanned_in_order() {
        assert_eq!(resolve_snap_target(-290.0, &[0.0, -300.0, -600.0]), 1);
        assert_eq!(resolve_snap_target(90.0, &[400.0, 100.0, 0.0]), 1);
    }

    #[test]
    fn sorted_variant_matches_linear_scan() {
        let points = [0.0, 100.0, 100.0, 200.0, 400.0];
        for step in -20..=90 {
            let offset = step as f64 * 5.0;
            assert_eq!(
                resolve_snap_target_sorted(offset, &points),
                resolve_snap_target(offset, &points),
                "offset={offset}"
            );
        }
    }
}
