// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Closed ring simplification for region and line masks.

use lss_core::Point;
use tracing::trace;

use crate::polyline::simplify_polyline;

/// Simplify a closed ring.
///
/// The ring is cut into two open halves at its first point and the point
/// farthest from it; each half is simplified independently and the halves
/// are re-joined, so both cut points always survive. A ring written with an
/// explicit closing point (last == first) keeps that closing point.
///
/// When the result would have fewer than 3 points the input is returned
/// unchanged. Non-positive or non-finite tolerances are the identity.
#[must_use = "returns the simplified ring"]
pub fn simplify_ring(points: &[Point], tolerance: f64) -> Vec<Point> {
    if !tolerance.is_finite() || tolerance <= 0.0 {
        return points.to_vec();
    }

    let explicitly_closed = points.len() > 1 && points.first() == points.last();
    let open = if explicitly_closed {
        &points[..points.len() - 1]
    } else {
        points
    };

    // Three vertices is already the minimal ring.
    if open.len() < 4 {
        return points.to_vec();
    }

    let Some(far) = farthest_from_first(open) else {
        return points.to_vec();
    };

    let mut first_half = simplify_polyline(&open[..=far], tolerance);
    let mut second_half: Vec<Point> = open[far..].to_vec();
    second_half.push(open[0]);
    let second_half = simplify_polyline(&second_half, tolerance);

    // Shared endpoints: `far` ends the first half, `open[0]` starts it.
    first_half.extend_from_slice(&second_half[1..second_half.len() - 1]);
    let mut ring = first_half;

    if ring.len() < 3 {
        trace!(
            points = open.len(),
            tolerance,
            "ring would collapse below 3 points, keeping original"
        );
        return points.to_vec();
    }

    if explicitly_closed {
        ring.push(ring[0]);
    }
    ring
}

/// Index of the point farthest from `open[0]` (first one on ties), or `None`
/// when every point coincides with it.
fn farthest_from_first(open: &[Point]) -> Option<usize> {
    let origin = open[0];
    let mut best = None;
    let mut best_dist = 0.0;
    for (i, p) in open.iter().enumerate().skip(1) {
        let d = origin.distance(*p);
        if d > best_dist {
            best_dist = d;
            best = Some(i);
        }
    }
    best
}
