// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document model: regions, lines and their coordinate lists.

use std::ops::Range;

use lss_core::{Point, bbox_height};

/// One `points` attribute: its parsed value and where the raw value sits in
/// the document source.
#[derive(Debug, Clone, PartialEq)]
pub struct Coords {
    span: Range<usize>,
    points: Vec<Point>,
    modified: bool,
}

impl Coords {
    pub(crate) fn new(span: Range<usize>, points: Vec<Point>) -> Self {
        Self {
            span,
            points,
            modified: false,
        }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bounding-box height.
    pub fn height(&self) -> f64 {
        bbox_height(&self.points)
    }

    /// Whether the points differ from the source and will be re-emitted.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub(crate) fn span(&self) -> &Range<usize> {
        &self.span
    }

    /// Replace the points; a no-op when they are unchanged.
    pub(crate) fn replace(&mut self, points: Vec<Point>) {
        if points != self.points {
            self.points = points;
            self.modified = true;
        }
    }
}

/// A `TextLine`.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub(crate) id: Option<String>,
    pub(crate) baseline: Option<Coords>,
    pub(crate) mask: Option<Coords>,
}

impl Line {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn baseline(&self) -> Option<&Coords> {
        self.baseline.as_ref()
    }

    pub fn mask(&self) -> Option<&Coords> {
        self.mask.as_ref()
    }

    /// Tolerance basis for the baseline: the line mask's height, or
    /// `region_height` when the line has no mask or a flat one.
    pub fn height(&self, region_height: f64) -> f64 {
        match self.mask.as_ref().map(Coords::height) {
            Some(own) if own > 0.0 => own,
            _ => region_height,
        }
    }
}

/// Any `*Region` element (`TextRegion`, `TableRegion`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    pub(crate) id: Option<String>,
    pub(crate) kind: String,
    pub(crate) mask: Option<Coords>,
    pub(crate) lines: Vec<Line>,
}

impl Region {
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Local element name, e.g. `TextRegion`.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn mask(&self) -> Option<&Coords> {
        self.mask.as_ref()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Bounding-box height of the region mask (0 without one).
    pub fn height(&self) -> f64 {
        self.mask.as_ref().map_or(0.0, Coords::height)
    }
}

/// What a [`Shape`] outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    RegionMask,
    LineMask,
    Baseline,
}

/// Borrowed geometry for drawing.
#[derive(Debug, Clone, Copy)]
pub struct Shape<'a> {
    pub kind: ShapeKind,
    pub points: &'a [Point],
}

impl<'a> Shape<'a> {
    pub fn new(kind: ShapeKind, points: &'a [Point]) -> Self {
        Self { kind, points }
    }

    /// Masks are rings; baselines are open.
    pub fn is_closed(&self) -> bool {
        !matches!(self.kind, ShapeKind::Baseline)
    }
}
