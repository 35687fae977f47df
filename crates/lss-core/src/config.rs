// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tool configuration. Every section falls back to its defaults, so a JSON
// file only needs the keys it wants to change.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::{Ratio, RatioPair};

/// Persistent LSS settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LssConfig {
    pub simplify: SimplifyConfig,
    pub sweep: SweepConfig,
}

impl LssConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

/// Settings for a one-shot simplification run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimplifyConfig {
    /// Ratio of the line height used as baseline tolerance. `.25` is a bit
    /// aggressive, `.10` keeps the writing direction intact.
    pub line_ratio: Ratio,
    /// Ratio of the mask height used as mask tolerance.
    pub mask_ratio: Ratio,
    /// Inserted before the extension of the written file (`page.simple.xml`).
    pub suffix: String,
    /// Simplify baselines.
    pub lines: bool,
    /// Simplify region and line masks.
    pub masks: bool,
}

impl Default for SimplifyConfig {
    fn default() -> Self {
        Self {
            line_ratio: Ratio(0.10),
            mask_ratio: Ratio(0.15),
            suffix: "simple".into(),
            lines: true,
            masks: true,
        }
    }
}

/// Settings for the parameter sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// Ratio pairs tried, in output order.
    pub pairs: Vec<RatioPair>,
    /// Distribute pairs over a thread pool.
    pub parallel: bool,
    pub overlay: OverlayStyle,
}

impl Default for SweepConfig {
    fn default() -> Self {
        let pair = |v: f64| RatioPair {
            line: Ratio(v),
            mask: Ratio(v),
        };
        Self {
            pairs: vec![pair(0.10), pair(0.05), pair(0.15), pair(0.20)],
            parallel: false,
            overlay: OverlayStyle::default(),
        }
    }
}

/// Colours and stroke settings of the overlay artifacts (RGBA).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    pub original_color: [u8; 4],
    pub simplified_color: [u8; 4],
    /// Stroke width in pixels.
    pub stroke_width: u32,
    /// Radius of the dots marking retained vertices (0 = no dots).
    pub vertex_radius: u32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            original_color: [220, 40, 40, 255],
            simplified_color: [30, 90, 230, 255],
            stroke_width: 2,
            vertex_radius: 3,
        }
    }
}
