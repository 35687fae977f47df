// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plain-language messages for command-line users.
//
// Every error is mapped to a one-line summary and a concrete next step. The
// severity tells the front end whether re-running with different input can
// help.

use crate::error::LssError;

/// Who has to act to get past an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The invocation was wrong (bad ratio, missing namespace); re-run with
    /// different arguments.
    Usage,
    /// The input file itself is broken and must be fixed upstream.
    Input,
    /// The environment failed (disk, permissions, image codec).
    Environment,
}

/// A user-facing explanation of an [`LssError`].
#[derive(Debug, Clone)]
pub struct Hint {
    /// Short summary.
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
    pub severity: Severity,
}

/// Convert an [`LssError`] into a [`Hint`].
pub fn hint_for(err: &LssError) -> Hint {
    match err {
        LssError::NamespaceNotFound => Hint {
            message: "The document's root element has no XML namespace.".into(),
            suggestion: "Pass the PAGE namespace explicitly with --namespace.".into(),
            severity: Severity::Usage,
        },

        LssError::InvalidRatio(value) => Hint {
            message: format!("{value} is not a valid ratio."),
            suggestion: "Ratios are fractions of the element height between 0 and 1, e.g. 0.1."
                .into(),
            severity: Severity::Usage,
        },

        LssError::MalformedDocument(detail) => Hint {
            message: "The file is not a readable PAGE-XML document.".into(),
            suggestion: format!("Fix or regenerate the file, then try again. ({detail})"),
            severity: Severity::Input,
        },

        LssError::NoSourcePath => Hint {
            message: "There is no file to write next to.".into(),
            suggestion: "Use an explicit output path instead of a suffix.".into(),
            severity: Severity::Usage,
        },

        LssError::Image(detail) => Hint {
            message: "The page image could not be processed.".into(),
            suggestion: format!(
                "Check that the image exists and is a PNG, JPEG or TIFF file; use --basedir if it lives elsewhere. ({detail})"
            ),
            severity: Severity::Environment,
        },

        LssError::Io(io) => {
            if io.kind() == std::io::ErrorKind::NotFound {
                Hint {
                    message: "A file or directory does not exist.".into(),
                    suggestion: format!("Check the path and try again. ({io})"),
                    severity: Severity::Usage,
                }
            } else {
                Hint {
                    message: "Reading or writing a file failed.".into(),
                    suggestion: format!("Check permissions and free disk space. ({io})"),
                    severity: Severity::Environment,
                }
            }
        }

        LssError::Config(detail) => Hint {
            message: "The configuration file is invalid.".into(),
            suggestion: format!("Fix the JSON, or remove --config to use defaults. ({detail})"),
            severity: Severity::Usage,
        },
    }
}
