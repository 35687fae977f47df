// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PAGE-XML reader. Builds the region/line index for one namespace on top of
// a `roxmltree` parse, remembering the byte span of every `points` value.

use lss_core::error::{LssError, Result};
use lss_core::parse_points;
use roxmltree::{Document, Node};
use tracing::warn;

use super::model::{Coords, Line, Region};

/// Elements indexed for one namespace.
#[derive(Debug, Default)]
pub(crate) struct Index {
    pub(crate) image_filename: Option<String>,
    pub(crate) regions: Vec<Region>,
}

/// Parse XML text, mapping syntax errors to [`LssError::MalformedDocument`].
pub(crate) fn parse_xml(text: &str) -> Result<Document<'_>> {
    Document::parse(text).map_err(|err| LssError::MalformedDocument(err.to_string()))
}

/// Collect every region and line of `namespace`, in document order.
///
/// Nested regions are flattened; a line belongs to its nearest region
/// ancestor. Lines outside any region are ignored.
pub(crate) fn index(xml: &Document<'_>, namespace: &str) -> Result<Index> {
    let mut index = Index::default();
    visit(xml.root_element(), namespace, None, &mut index)?;
    Ok(index)
}

fn visit(node: Node<'_, '_>, namespace: &str, region: Option<usize>, index: &mut Index) -> Result<()> {
    for child in node.children().filter(Node::is_element) {
        let mut child_region = region;

        if in_namespace(child, namespace) {
            let name = child.tag_name().name();
            if name == "Page" {
                if index.image_filename.is_none() {
                    index.image_filename = child.attribute("imageFilename").map(str::to_owned);
                }
            } else if name.ends_with("Region") {
                index.regions.push(read_region(child, namespace)?);
                child_region = Some(index.regions.len() - 1);
            } else if name == "TextLine" {
                match region {
                    Some(r) => index.regions[r].lines.push(read_line(child, namespace)?),
                    None => warn!(
                        line = child.attribute("id").unwrap_or("?"),
                        "TextLine outside any region ignored"
                    ),
                }
                // Words and glyphs carry their own Coords; they are not simplified.
                continue;
            }
        }

        visit(child, namespace, child_region, index)?;
    }
    Ok(())
}

fn in_namespace(node: Node<'_, '_>, namespace: &str) -> bool {
    node.tag_name().namespace() == Some(namespace)
}

fn child_element<'a, 'input>(
    node: Node<'a, 'input>,
    namespace: &str,
    name: &str,
) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|c| c.is_element() && c.tag_name().name() == name && in_namespace(*c, namespace))
}

fn read_region(node: Node<'_, '_>, namespace: &str) -> Result<Region> {
    Ok(Region {
        id: node.attribute("id").map(str::to_owned),
        kind: node.tag_name().name().to_owned(),
        mask: child_element(node, namespace, "Coords")
            .map(read_coords)
            .transpose()?,
        lines: Vec::new(),
    })
}

fn read_line(node: Node<'_, '_>, namespace: &str) -> Result<Line> {
    Ok(Line {
        id: node.attribute("id").map(str::to_owned),
        baseline: child_element(node, namespace, "Baseline")
            .map(read_coords)
            .transpose()?,
        mask: child_element(node, namespace, "Coords")
            .map(read_coords)
            .transpose()?,
    })
}

fn read_coords(node: Node<'_, '_>) -> Result<Coords> {
    let attr = node.attribute_node("points").ok_or_else(|| {
        let pos = node.document().text_pos_at(node.range().start);
        LssError::MalformedDocument(format!(
            "<{}> at {}:{} has no points attribute",
            node.tag_name().name(),
            pos.row,
            pos.col
        ))
    })?;
    let points = parse_points(attr.value()).map_err(|err| {
        let pos = node.document().text_pos_at(node.range().start);
        LssError::MalformedDocument(format!("{err} (at {}:{})", pos.row, pos.col))
    })?;
    Ok(Coords::new(attr.range_value(), points))
}
