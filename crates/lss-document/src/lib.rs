// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// lss-document — PAGE-XML documents for LSS.
//
// Provides the document model (regions, lines, baselines and masks read from
// PAGE-XML), the simplification driver that rewrites coordinates in place,
// structure-preserving serialization, overlay rendering of original versus
// simplified geometry, and the parameter sweep harness built on top of them.

pub mod overlay;
pub mod page;
pub mod simplify;
pub mod sweep;

#[cfg(test)]
pub(crate) mod fixtures;

// Re-export the primary structs so callers can use `lss_document::PageXml` etc.
pub use overlay::OverlayRenderer;
pub use page::{Coords, Line, NamespaceSource, PageXml, Region, Shape, ShapeKind};
pub use sweep::SweepArtifact;
