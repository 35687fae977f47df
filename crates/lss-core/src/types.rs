// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types: points, point-list codec, simplification ratios and the
// per-call modification report.

use serde::{Deserialize, Serialize};

use crate::error::{LssError, Result};

/// A coordinate pair in document pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// PAGE-XML spelling: `x,y`. `f64`'s `Display` is the shortest round-trip
/// form, so integer coordinates are written back without a fractional part.
impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Parse a PAGE-XML `points` attribute (`"x1,y1 x2,y2 ..."`).
///
/// An empty or all-whitespace value yields an empty list.
pub fn parse_points(value: &str) -> Result<Vec<Point>> {
    value
        .split_whitespace()
        .map(|token| {
            let (x, y) = token.split_once(',').ok_or_else(|| {
                LssError::MalformedDocument(format!("point {token:?} is not of the form x,y"))
            })?;
            Ok(Point::new(parse_coordinate(x, token)?, parse_coordinate(y, token)?))
        })
        .collect()
}

fn parse_coordinate(raw: &str, token: &str) -> Result<f64> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(LssError::MalformedDocument(format!(
            "point {token:?} has a non-numeric coordinate"
        ))),
    }
}

/// Inverse of [`parse_points`].
pub fn format_points(points: &[Point]) -> String {
    points
        .iter()
        .map(Point::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Height of the axis-aligned bounding box of `points` (0 for empty input).
pub fn bbox_height(points: &[Point]) -> f64 {
    let mut ys = points.iter().map(|p| p.y);
    let Some(first) = ys.next() else {
        return 0.0;
    };
    let (min, max) = ys.fold((first, first), |(lo, hi), y| (lo.min(y), hi.max(y)));
    max - min
}

/// A simplification ratio, validated to lie in `[0, 1]`.
///
/// The absolute tolerance for an element is `ratio * element height`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Ratio(pub(crate) f64);

impl Ratio {
    pub const ZERO: Ratio = Ratio(0.0);

    pub fn new(value: f64) -> Result<Self> {
        if (0.0..=1.0).contains(&value) {
            // `-0.0 + 0.0` is `+0.0`, so negative zero never reaches a label.
            Ok(Self(value + 0.0))
        } else {
            Err(LssError::InvalidRatio(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// A ratio of zero leaves every element untouched.
    pub fn is_identity(self) -> bool {
        self.0 == 0.0
    }

    /// Absolute tolerance for an element of the given height.
    pub fn tolerance(self, height: f64) -> f64 {
        self.0 * height
    }
}

impl TryFrom<f64> for Ratio {
    type Error = LssError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Ratio> for f64 {
    fn from(ratio: Ratio) -> Self {
        ratio.0
    }
}

impl std::fmt::Display for Ratio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One sweep configuration: the ratio used for baselines and the one used
/// for masks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioPair {
    pub line: Ratio,
    pub mask: Ratio,
}

impl RatioPair {
    pub fn new(line: f64, mask: f64) -> Result<Self> {
        Ok(Self {
            line: Ratio::new(line)?,
            mask: Ratio::new(mask)?,
        })
    }

    /// Same ratio for baselines and masks.
    pub fn uniform(value: f64) -> Result<Self> {
        Self::new(value, value)
    }

    /// File-name fragment identifying this pair, e.g. `line0.1-mask0.05`.
    pub fn label(&self) -> String {
        format!("line{}-mask{}", self.line, self.mask)
    }
}

/// Point counts before and after one simplification call, in visit order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Modifications {
    /// Point count of each visited element before simplification.
    pub original: Vec<usize>,
    /// Point count of each visited element afterwards.
    pub simplified: Vec<usize>,
    /// Elements left untouched because of degenerate geometry.
    pub skipped: usize,
}

impl Modifications {
    pub fn record(&mut self, original: usize, simplified: usize) {
        self.original.push(original);
        self.simplified.push(simplified);
    }

    pub fn record_skipped(&mut self, points: usize) {
        self.record(points, points);
        self.skipped += 1;
    }

    /// Fraction of points removed for each element (0 for empty elements).
    pub fn percents(&self) -> Vec<f64> {
        self.original
            .iter()
            .zip(&self.simplified)
            .map(|(&before, &after)| {
                if before == 0 {
                    0.0
                } else {
                    (before - after) as f64 / before as f64
                }
            })
            .collect()
    }

    /// Total number of points removed.
    pub fn removed(&self) -> usize {
        self.original.iter().sum::<usize>() - self.simplified.iter().sum::<usize>()
    }

    pub fn elements(&self) -> usize {
        self.original.len()
    }
}
