// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Open polyline simplification (Ramer-Douglas-Peucker).
//
// The divide-and-conquer step runs on an explicit stack of index ranges, so
// inputs whose every point deviates maximally (linear split depth) cannot
// exhaust the call stack.

use lss_core::Point;

/// Simplify an open polyline.
///
/// Interior points within `tolerance` of the segment joining their enclosing
/// anchors are dropped. The first and last points are always kept.
///
/// Inputs with fewer than 3 points, and non-positive or non-finite
/// tolerances, are returned unchanged.
#[must_use = "returns the simplified polyline"]
pub fn simplify_polyline(points: &[Point], tolerance: f64) -> Vec<Point> {
    if points.len() < 3 || !tolerance.is_finite() || tolerance <= 0.0 {
        return points.to_vec();
    }

    retained_indices(points, tolerance)
        .into_iter()
        .map(|i| points[i])
        .collect()
}

/// Indices of the points kept for `tolerance`, in ascending order.
///
/// Expects at least 2 points.
pub(crate) fn retained_indices(points: &[Point], tolerance: f64) -> Vec<usize> {
    let last = points.len() - 1;
    let mut kept = vec![false; points.len()];
    kept[0] = true;
    kept[last] = true;

    let mut pending = vec![(0, last)];
    while let Some((start, end)) = pending.pop() {
        if end <= start + 1 {
            continue;
        }

        let mut max_dist = 0.0;
        let mut max_idx = start;
        for i in (start + 1)..end {
            let d = segment_distance(points[i], points[start], points[end]);
            if d > max_dist {
                max_dist = d;
                max_idx = i;
            }
        }

        if max_dist > tolerance {
            kept[max_idx] = true;
            pending.push((max_idx, end));
            pending.push((start, max_idx));
        }
    }

    kept.iter()
        .enumerate()
        .filter_map(|(i, &k)| k.then_some(i))
        .collect()
}

/// Distance from `p` to the segment `a`-`b`.
///
/// Falls back to the distance to `a` when the segment is degenerate.
pub fn segment_distance(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length_sq = dx.mul_add(dx, dy * dy);

    if length_sq == 0.0 {
        return p.distance(a);
    }

    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / length_sq).clamp(0.0, 1.0);
    p.distance(Point::new(t.mul_add(dx, a.x), t.mul_add(dy, a.y)))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
        raw.iter().copied().map(Point::from).collect()
    }

    /// Deterministic wobbly baseline: a slope with pseudo-random vertical noise.
    pub(crate) fn noisy_line(n: usize, seed: u64) -> Vec<Point> {
        let mut state = seed;
        (0..n)
            .map(|i| {
                state = state
                    .wrapping_mul(6364136223846793005)
                    .wrapping_add(1442695040888963407);
                let noise = ((state >> 33) % 1000) as f64 / 100.0 - 5.0;
                Point::new(i as f64 * 7.0, 100.0 + i as f64 * 0.3 + noise)
            })
            .collect()
    }

    #[test]
    fn small_deviation_collapses_to_anchors() {
        // Line height 20, ratio 0.10.
        let line = pts(&[(0.0, 0.0), (5.0, 1.0), (10.0, 0.0)]);
        assert_eq!(
            simplify_polyline(&line, 0.10 * 20.0),
            pts(&[(0.0, 0.0), (10.0, 0.0)])
        );
    }

    #[test]
    fn deviation_above_tolerance_is_kept() {
        // Line height 20, ratio 0.02.
        let line = pts(&[(0.0, 0.0), (5.0, 1.0), (10.0, 0.0)]);
        assert_eq!(simplify_polyline(&line, 0.02 * 20.0), line);
    }

    #[test]
    fn short_inputs_unchanged() {
        assert!(simplify_polyline(&[], 5.0).is_empty());
        let one = pts(&[(1.0, 2.0)]);
        assert_eq!(simplify_polyline(&one, 5.0), one);
        let two = pts(&[(0.0, 0.0), (10.0, 0.0)]);
        assert_eq!(simplify_polyline(&two, 5.0), two);
    }

    #[test]
    fn zero_tolerance_is_identity_even_for_collinear_points() {
        let line = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
        assert_eq!(simplify_polyline(&line, 0.0), line);
        assert_eq!(simplify_polyline(&line, f64::NAN), line);
    }

    #[test]
    fn keeps_the_elbow_of_a_bent_baseline() {
        let line = pts(&[(5.0, 10.0), (10.0, 10.0), (15.0, 10.0), (20.0, 20.0), (25.0, 30.0)]);
        assert_eq!(
            simplify_polyline(&line, 4.0),
            pts(&[(5.0, 10.0), (15.0, 10.0), (25.0, 30.0)])
        );
    }

    #[test]
    fn endpoints_always_retained() {
        let line = noisy_line(200, 7);
        for tolerance in [0.5, 2.0, 10.0, 1e6] {
            let simplified = simplify_polyline(&line, tolerance);
            assert_eq!(simplified.first(), line.first());
            assert_eq!(simplified.last(), line.last());
            assert!(simplified.len() >= 2);
        }
    }

    #[test]
    fn point_count_is_monotonic_in_tolerance() {
        let line = noisy_line(300, 42);
        let mut previous = line.len();
        for step in 0..=40 {
            let count = simplify_polyline(&line, step as f64 * 0.25).len();
            assert!(count <= previous, "tolerance step {step}: {count} > {previous}");
            previous = count;
        }
    }

    #[test]
    fn discarded_points_stay_within_tolerance() {
        let line = noisy_line(250, 3);
        let tolerance = 1.5;
        let kept = retained_indices(&line, tolerance);
        for window in kept.windows(2) {
            let (a, b) = (line[window[0]], line[window[1]]);
            for p in &line[window[0] + 1..window[1]] {
                assert!(segment_distance(*p, a, b) <= tolerance);
            }
        }
    }

    #[test]
    fn simplification_is_idempotent() {
        let line = noisy_line(250, 11);
        let once = simplify_polyline(&line, 2.0);
        let twice = simplify_polyline(&once, 2.0);
        assert_eq!(once, twice);
    }

    #[test]
    fn long_convex_arc_keeps_its_vertices() {
        // Every vertex of a convex arc deviates from its neighbours' chord.
        let line: Vec<Point> = (0..100_000)
            .map(|i| {
                let x = i as f64;
                Point::new(x, x * x * 1e-3)
            })
            .collect();
        let simplified = simplify_polyline(&line, 1e-9);
        assert!(simplified.len() > 2);
        assert_eq!(simplified.first(), line.first());
        assert_eq!(simplified.last(), line.last());
    }

    #[test]
    fn segment_distance_clamps_to_endpoints() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert!((segment_distance(Point::new(5.0, 3.0), a, b) - 3.0).abs() < 1e-12);
        assert!((segment_distance(Point::new(13.0, 4.0), a, b) - 5.0).abs() < 1e-12);
        assert!((segment_distance(Point::new(3.0, 4.0), a, a) - 5.0).abs() < 1e-12);
    }
}
