// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Simplification driver — applies the polyline and ring simplifiers to every
// baseline and mask of a document, in place.
//
// Tolerances are relative: each element's tolerance is the ratio times its
// own height, so small lines get small absolute tolerances. Elements with
// too few points or no usable height are skipped and counted, never fatal.

use lss_core::error::Result;
use lss_core::{Modifications, Ratio};
use lss_simplify::{simplify_polyline, simplify_ring};
use tracing::{debug, info, instrument};

use crate::page::{Coords, PageXml};

impl PageXml {
    /// Simplify every baseline with tolerance `ratio * line height`.
    ///
    /// The line height is the height of the line's own mask, falling back to
    /// the enclosing region's mask height. Fails with `InvalidRatio` outside
    /// `[0, 1]` before touching anything.
    #[instrument(skip(self), fields(namespace = %self.namespace()))]
    pub fn simplify_lines(&mut self, ratio: f64) -> Result<Modifications> {
        let ratio = Ratio::new(ratio)?;
        Ok(self.simplify_baselines(ratio))
    }

    /// Simplify every region mask and line mask with tolerance
    /// `ratio * mask height`.
    ///
    /// Elements are visited region by region: the region mask, then the
    /// masks of its lines. Fails with `InvalidRatio` outside `[0, 1]` before
    /// touching anything.
    #[instrument(skip(self), fields(namespace = %self.namespace()))]
    pub fn simplify_masks(&mut self, ratio: f64) -> Result<Modifications> {
        let ratio = Ratio::new(ratio)?;
        Ok(self.simplify_rings(ratio))
    }

    pub(crate) fn simplify_baselines(&mut self, ratio: Ratio) -> Modifications {
        let mut mods = Modifications::default();
        for region in &mut self.regions {
            let region_height = region.height();
            for line in &mut region.lines {
                let height = line.height(region_height);
                let Some(baseline) = line.baseline.as_mut() else {
                    debug!(line = line.id.as_deref(), "No baseline, skipped");
                    mods.record_skipped(0);
                    continue;
                };
                let (before, after) = reduce(baseline, ratio, height, false);
                if before == after && (before < 3 || height <= 0.0) {
                    debug!(line = line.id.as_deref(), points = before, height, "Degenerate baseline, skipped");
                    mods.record_skipped(before);
                    continue;
                }
                debug!(
                    line = line.id.as_deref(),
                    removed = before - after,
                    "Baseline reduced"
                );
                mods.record(before, after);
            }
        }
        info!(
            lines = mods.elements(),
            removed = mods.removed(),
            skipped = mods.skipped,
            "Baselines simplified"
        );
        mods
    }

    pub(crate) fn simplify_rings(&mut self, ratio: Ratio) -> Modifications {
        let mut mods = Modifications::default();
        let masks = self.regions.iter_mut().flat_map(|region| {
            region
                .mask
                .as_mut()
                .into_iter()
                .chain(region.lines.iter_mut().filter_map(|line| line.mask.as_mut()))
        });
        for (mask_no, mask) in masks.enumerate() {
            let height = mask.height();
            let (before, after) = reduce(mask, ratio, height, true);
            if before == after && (before < 3 || height <= 0.0) {
                debug!(mask = mask_no, points = before, height, "Degenerate mask, skipped");
                mods.record_skipped(before);
                continue;
            }
            debug!(
                mask = mask_no,
                reduction_pct = percent(before, after),
                "Mask reduced"
            );
            mods.record(before, after);
        }
        info!(
            masks = mods.elements(),
            removed = mods.removed(),
            skipped = mods.skipped,
            "Masks simplified"
        );
        mods
    }
}

/// Simplify one coordinate list in place, returning the point counts before
/// and after. Degenerate input (fewer than 3 points, no height) and the
/// identity ratio leave it untouched.
fn reduce(coords: &mut Coords, ratio: Ratio, height: f64, closed: bool) -> (usize, usize) {
    let before = coords.len();
    if before < 3 || height <= 0.0 || ratio.is_identity() {
        return (before, before);
    }

    let tolerance = ratio.tolerance(height);
    let simplified = if closed {
        simplify_ring(coords.points(), tolerance)
    } else {
        simplify_polyline(coords.points(), tolerance)
    };
    let after = simplified.len();
    coords.replace(simplified);
    (before, after)
}

fn percent(before: usize, after: usize) -> f64 {
    if before == 0 {
        0.0
    } else {
        (before - after) as f64 / before as f64 * 100.0
    }
}
