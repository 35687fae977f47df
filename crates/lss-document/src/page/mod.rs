// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PAGE-XML document — loading, namespace resolution, model access and
// structure-preserving output.

pub mod model;
pub mod namespace;
pub mod reader;
pub mod writer;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use lss_core::error::{LssError, Result};
use tracing::{debug, info, instrument};

pub use model::{Coords, Line, Region, Shape, ShapeKind};
pub use namespace::NamespaceSource;

/// An in-memory PAGE-XML document.
///
/// The source text is kept verbatim and shared between clones; every
/// coordinate list records where its `points` value lives in that text, so
/// serialization only rewrites the coordinates that were simplified.
/// Cloning deep-copies all mutable state, which makes a clone an independent
/// working copy.
#[derive(Debug, Clone, PartialEq)]
pub struct PageXml {
    source: Arc<str>,
    path: Option<PathBuf>,
    namespace: String,
    namespace_source: NamespaceSource,
    image_filename: Option<String>,
    pub(crate) regions: Vec<Region>,
}

impl PageXml {
    // -- Construction ---------------------------------------------------------

    /// Parse a document from text.
    ///
    /// With `namespace = None` the namespace is resolved from the root tag and
    /// loading fails with [`LssError::NamespaceNotFound`] if it has none.
    #[instrument(skip(text), fields(text_len = text.len()))]
    pub fn from_str(text: &str, namespace: Option<&str>) -> Result<Self> {
        let xml = reader::parse_xml(text)?;
        let (namespace, namespace_source) = match namespace {
            Some(given) => (given.to_owned(), NamespaceSource::Given),
            None => (
                namespace::resolve(&xml)?,
                NamespaceSource::Resolved,
            ),
        };
        let index = reader::index(&xml, &namespace)?;

        info!(
            namespace = %namespace,
            regions = index.regions.len(),
            lines = index.regions.iter().map(|r| r.lines().len()).sum::<usize>(),
            "PAGE document loaded"
        );
        Ok(Self {
            source: Arc::from(text),
            path: None,
            namespace,
            namespace_source,
            image_filename: index.image_filename,
            regions: index.regions,
        })
    }

    /// Read and parse a document from a file.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>, namespace: Option<&str>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let mut page = Self::from_str(&text, namespace)?;
        page.path = Some(path.as_ref().to_path_buf());
        Ok(page)
    }

    // -- Namespace --------------------------------------------------------------

    /// Resolve the namespace from the root tag and make it the active one.
    ///
    /// Useful after loading with an explicit namespace that turned out to be
    /// wrong. When the resolved namespace differs from the active one the
    /// element index is rebuilt from the current serialized text, so
    /// simplifications already applied are kept.
    #[instrument(skip(self), fields(active = %self.namespace))]
    pub fn find_namespace(&mut self) -> Result<&str> {
        let text = self.serialize();
        let (resolved, index) = {
            let xml = reader::parse_xml(&text)?;
            let resolved = namespace::resolve(&xml)?;
            let index = if resolved == self.namespace {
                None
            } else {
                Some(reader::index(&xml, &resolved)?)
            };
            (resolved, index)
        };

        if let Some(index) = index {
            debug!(from = %self.namespace, to = %resolved, "Namespace changed, re-indexing");
            self.source = Arc::from(text);
            self.image_filename = index.image_filename;
            self.regions = index.regions;
        }
        self.namespace = resolved;
        self.namespace_source = NamespaceSource::Resolved;
        Ok(&self.namespace)
    }

    /// The namespace URI used for element lookups.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Whether [`namespace`](Self::namespace) was supplied or resolved.
    pub fn namespace_source(&self) -> NamespaceSource {
        self.namespace_source
    }

    // -- Accessors ------------------------------------------------------------

    /// Regions in document order (nested regions flattened).
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// File the document was read from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// The page's `imageFilename` attribute.
    pub fn image_filename(&self) -> Option<&str> {
        self.image_filename.as_deref()
    }

    /// The page image resolved against `basedir`.
    pub fn image_path(&self, basedir: impl AsRef<Path>) -> Result<PathBuf> {
        self.image_filename
            .as_deref()
            .map(|name| basedir.as_ref().join(name))
            .ok_or_else(|| {
                LssError::MalformedDocument("Page element has no imageFilename attribute".into())
            })
    }

    /// Every coordinate list in the document, regions before their lines.
    pub fn coords(&self) -> impl Iterator<Item = &Coords> {
        self.regions.iter().flat_map(|region| {
            region.mask().into_iter().chain(
                region
                    .lines()
                    .iter()
                    .flat_map(|line| line.mask().into_iter().chain(line.baseline())),
            )
        })
    }

    /// Drawable geometry, in the same order as [`coords`](Self::coords).
    pub fn shapes(&self) -> Vec<Shape<'_>> {
        let mut shapes = Vec::new();
        for region in &self.regions {
            if let Some(mask) = region.mask() {
                shapes.push(Shape::new(ShapeKind::RegionMask, mask.points()));
            }
            for line in region.lines() {
                if let Some(mask) = line.mask() {
                    shapes.push(Shape::new(ShapeKind::LineMask, mask.points()));
                }
                if let Some(baseline) = line.baseline() {
                    shapes.push(Shape::new(ShapeKind::Baseline, baseline.points()));
                }
            }
        }
        shapes
    }

    pub(crate) fn source(&self) -> &str {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{NO_NAMESPACE, PAGE_2013, SIMPLE_PAGE};
    use lss_core::Point;

    #[test]
    fn load_resolves_namespace() {
        let page = PageXml::from_str(SIMPLE_PAGE, None).unwrap();
        assert_eq!(page.namespace(), PAGE_2013);
        assert_eq!(page.namespace_source(), NamespaceSource::Resolved);
        assert_eq!(page.regions().len(), 1);
        let region = &page.regions()[0];
        assert_eq!(region.id(), Some("r1"));
        assert_eq!(region.kind(), "TextRegion");
        assert_eq!(region.lines().len(), 1);
        let line = &region.lines()[0];
        assert_eq!(line.baseline().unwrap().len(), 5);
        assert_eq!(line.mask().unwrap().len(), 9);
        assert_eq!(line.baseline().unwrap().points()[0], Point::new(5.0, 10.0));
    }

    #[test]
    fn load_without_namespace_fails() {
        let err = PageXml::from_str(NO_NAMESPACE, None).unwrap_err();
        assert!(matches!(err, LssError::NamespaceNotFound));
    }

    #[test]
    fn explicit_namespace_is_authoritative() {
        let page = PageXml::from_str(NO_NAMESPACE, Some("urn:anything")).unwrap();
        assert_eq!(page.namespace(), "urn:anything");
        assert_eq!(page.namespace_source(), NamespaceSource::Given);
        assert!(page.regions().is_empty());
    }

    #[test]
    fn find_namespace_recovers_from_wrong_given_namespace() {
        let mut page = PageXml::from_str(SIMPLE_PAGE, Some("stupid")).unwrap();
        assert!(page.regions().is_empty());
        assert_eq!(page.find_namespace().unwrap(), PAGE_2013);
        assert_eq!(page.namespace_source(), NamespaceSource::Resolved);
        assert_eq!(page.regions().len(), 1);
        let mods = page.simplify_lines(0.10).unwrap();
        assert_eq!(mods.percents(), vec![0.4]);
    }

    #[test]
    fn find_namespace_keeps_pending_simplifications() {
        let mut page = PageXml::from_str(SIMPLE_PAGE, None).unwrap();
        page.simplify_lines(0.10).unwrap();
        let before = page.serialize();
        page.find_namespace().unwrap();
        assert_eq!(page.serialize(), before);
        assert_eq!(page.regions()[0].lines()[0].baseline().unwrap().len(), 3);
    }

    #[test]
    fn find_namespace_on_document_without_one_fails() {
        let mut page = PageXml::from_str(NO_NAMESPACE, Some("urn:x")).unwrap();
        assert!(matches!(
            page.find_namespace(),
            Err(LssError::NamespaceNotFound)
        ));
        assert_eq!(page.namespace(), "urn:x");
    }

    #[test]
    fn malformed_xml_is_rejected() {
        let err = PageXml::from_str("<PcGts><Page></PcGts>", Some("x")).unwrap_err();
        assert!(matches!(err, LssError::MalformedDocument(_)));
    }

    #[test]
    fn image_path_joins_basedir() {
        let page = PageXml::from_str(SIMPLE_PAGE, None).unwrap();
        assert_eq!(page.image_filename(), Some("simple.png"));
        assert_eq!(
            page.image_path("/data/pages").unwrap(),
            PathBuf::from("/data/pages/simple.png")
        );
    }

    #[test]
    fn from_file_remembers_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("simple.xml");
        std::fs::write(&path, SIMPLE_PAGE).unwrap();
        let page = PageXml::from_file(&path, None).unwrap();
        assert_eq!(page.path(), Some(path.as_path()));
        assert_eq!(page.serialize(), SIMPLE_PAGE);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = PageXml::from_file("/definitely/not/here.xml", None).unwrap_err();
        assert!(matches!(err, LssError::Io(_)));
    }

    #[test]
    fn coords_and_shapes_follow_document_order() {
        let page = PageXml::from_str(SIMPLE_PAGE, None).unwrap();
        let lens: Vec<usize> = page.coords().map(Coords::len).collect();
        assert_eq!(lens, vec![4, 9, 5]);
        let kinds: Vec<ShapeKind> = page.shapes().iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![ShapeKind::RegionMask, ShapeKind::LineMask, ShapeKind::Baseline]
        );
    }
}
