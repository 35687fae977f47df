// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Parameter sweep — renders one overlay per (line ratio, mask ratio) pair so
// candidate settings can be compared side by side.
//
// Every entry works on its own clone of the document; the caller's document
// is never modified. Entries are independent and may run on a rayon pool.

use std::path::{Path, PathBuf};

use lss_core::config::SweepConfig;
use lss_core::error::Result;
use lss_core::{Modifications, RatioPair};
use rayon::prelude::*;
use tracing::{debug, info, instrument};

use crate::overlay::OverlayRenderer;
use crate::page::PageXml;

/// Label of the artifact showing the unmodified geometry.
pub const REFERENCE_LABEL: &str = "original";

/// One written overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepArtifact {
    pub path: PathBuf,
    /// `None` for the reference artifact.
    pub pair: Option<RatioPair>,
    pub lines: Modifications,
    pub masks: Modifications,
}

impl SweepArtifact {
    pub fn is_reference(&self) -> bool {
        self.pair.is_none()
    }
}

/// `<dir>/<name>` + `label` → `<dir>/<name>.<label>.png`.
pub fn artifact_path(output_stem: &Path, label: &str) -> PathBuf {
    let name = output_stem
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_stem.with_file_name(format!("{name}.{label}.png"))
}

impl PageXml {
    /// Render the reference overlay and one overlay per `(line, mask)` ratio
    /// pair, returning the written paths: reference first, then the pairs in
    /// input order.
    ///
    /// Every pair is validated before anything is written.
    pub fn sweep(
        &self,
        pairs: &[(f64, f64)],
        image_path: impl AsRef<Path>,
        output_stem: impl AsRef<Path>,
    ) -> Result<Vec<PathBuf>> {
        let pairs = pairs
            .iter()
            .map(|&(line, mask)| RatioPair::new(line, mask))
            .collect::<Result<Vec<_>>>()?;
        let config = SweepConfig {
            pairs,
            ..SweepConfig::default()
        };
        let artifacts = self.sweep_with(&config, image_path, output_stem, |_| {})?;
        Ok(artifacts.into_iter().map(|artifact| artifact.path).collect())
    }

    /// [`sweep`](Self::sweep) driven by a [`SweepConfig`].
    ///
    /// Returns the reference artifact followed by one artifact per entry of
    /// `config.pairs`, in order. A repeated pair is rendered once and its
    /// artifact repeated. `on_artifact` is called once per written file,
    /// from worker threads when `config.parallel` is set.
    #[instrument(
        skip_all,
        fields(
            image = %image_path.as_ref().display(),
            pairs = config.pairs.len(),
            parallel = config.parallel
        )
    )]
    pub fn sweep_with<F>(
        &self,
        config: &SweepConfig,
        image_path: impl AsRef<Path>,
        output_stem: impl AsRef<Path>,
        on_artifact: F,
    ) -> Result<Vec<SweepArtifact>>
    where
        F: Fn(&SweepArtifact) + Sync,
    {
        let stem = output_stem.as_ref();
        let renderer = OverlayRenderer::open(image_path, config.overlay.clone())?;

        // Each distinct pair is rendered once; `slots[i]` is the rendered
        // entry answering `config.pairs[i]`.
        let mut pairs: Vec<RatioPair> = Vec::with_capacity(config.pairs.len());
        let mut slots: Vec<usize> = Vec::with_capacity(config.pairs.len());
        for pair in &config.pairs {
            match pairs.iter().position(|seen| seen == pair) {
                Some(slot) => {
                    debug!(pair = %pair.label(), "Repeated pair, reusing its overlay");
                    slots.push(slot);
                }
                None => {
                    slots.push(pairs.len());
                    pairs.push(*pair);
                }
            }
        }

        let reference = SweepArtifact {
            path: artifact_path(stem, REFERENCE_LABEL),
            pair: None,
            lines: Modifications::default(),
            masks: Modifications::default(),
        };
        OverlayRenderer::save(&renderer.render(self, None), &reference.path)?;
        on_artifact(&reference);

        let run = |pair: &RatioPair| self.sweep_entry(&renderer, *pair, stem, &on_artifact);
        let rendered: Vec<SweepArtifact> = if config.parallel {
            pairs.par_iter().map(run).collect::<Result<_>>()?
        } else {
            pairs.iter().map(run).collect::<Result<_>>()?
        };

        info!(artifacts = rendered.len() + 1, "Sweep finished");
        let mut artifacts = Vec::with_capacity(slots.len() + 1);
        artifacts.push(reference);
        artifacts.extend(slots.iter().map(|&slot| rendered[slot].clone()));
        Ok(artifacts)
    }

    fn sweep_entry<F>(
        &self,
        renderer: &OverlayRenderer,
        pair: RatioPair,
        stem: &Path,
        on_artifact: &F,
    ) -> Result<SweepArtifact>
    where
        F: Fn(&SweepArtifact),
    {
        let label = pair.label();
        let mut working = self.clone();
        let lines = working.simplify_baselines(pair.line);
        let masks = working.simplify_rings(pair.mask);

        let path = artifact_path(stem, &label);
        OverlayRenderer::save(&renderer.render(self, Some(&working)), &path)?;
        debug!(
            pair = %label,
            lines_removed = lines.removed(),
            masks_removed = masks.removed(),
            "Sweep entry written"
        );

        let artifact = SweepArtifact {
            path,
            pair: Some(pair),
            lines,
            masks,
        };
        on_artifact(&artifact);
        Ok(artifact)
    }
}
