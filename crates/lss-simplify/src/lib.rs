// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// lss-simplify — Douglas-Peucker vertex reduction for open polylines
// (baselines) and closed rings (masks). Tolerances are absolute distances in
// the coordinate space of the input; callers derive them from element heights.

pub mod polyline;
pub mod ring;

pub use polyline::{segment_distance, simplify_polyline};
pub use ring::simplify_ring;
