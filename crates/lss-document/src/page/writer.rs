// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Structure-preserving output. Only the `points` values of modified
// coordinate lists are rewritten; every other byte of the source is copied.

use std::path::{Path, PathBuf};

use lss_core::error::{LssError, Result};
use lss_core::format_points;
use tracing::{info, instrument};

use super::PageXml;

impl PageXml {
    /// The document text with simplified coordinates spliced in.
    pub fn serialize(&self) -> String {
        let source = self.source();
        let mut edits: Vec<_> = self
            .coords()
            .filter(|coords| coords.is_modified())
            .map(|coords| (coords.span().clone(), format_points(coords.points())))
            .collect();
        edits.sort_by_key(|(span, _)| span.start);

        let mut out = String::with_capacity(source.len());
        let mut cursor = 0;
        for (span, points) in edits {
            out.push_str(&source[cursor..span.start]);
            out.push_str(&points);
            cursor = span.end;
        }
        out.push_str(&source[cursor..]);
        out
    }

    /// Write the serialized document to `path`.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn dump(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.serialize())?;
        info!("PAGE document written");
        Ok(())
    }

    /// Write next to the source file with `suffix` inserted before the
    /// extension, returning the path written.
    pub fn write(&self, suffix: &str) -> Result<PathBuf> {
        let source = self.path().ok_or(LssError::NoSourcePath)?;
        let target = suffixed_path(source, suffix);
        self.dump(&target)?;
        Ok(target)
    }
}

/// `page.xml` + `simple` → `page.simple.xml`. An empty suffix returns the
/// path unchanged.
pub fn suffixed_path(path: &Path, suffix: &str) -> PathBuf {
    if suffix.is_empty() {
        return path.to_path_buf();
    }
    match path.extension() {
        Some(ext) => path.with_extension(format!("{suffix}.{}", ext.to_string_lossy())),
        None => path.with_extension(suffix),
    }
}
