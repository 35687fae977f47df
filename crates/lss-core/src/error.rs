// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for LSS.

use thiserror::Error;

/// Top-level error type for all LSS operations.
///
/// Per-element geometric degeneracies (too few points, zero height) are not
/// errors: the simplification driver skips those elements and reports them
/// in its `Modifications` summary instead.
#[derive(Debug, Error)]
pub enum LssError {
    // -- Document errors --
    #[error("no namespace found on the root element and none was supplied")]
    NamespaceNotFound,

    #[error("malformed document: {0}")]
    MalformedDocument(String),

    #[error("ratio {0} is outside [0, 1]")]
    InvalidRatio(f64),

    #[error("document was not read from a file, no output path can be derived")]
    NoSourcePath,

    // -- Rendering --
    #[error("image processing failed: {0}")]
    Image(String),

    // -- Storage / configuration --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, LssError>;
