// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Namespace resolution from the root element's qualified tag.

use lss_core::error::{LssError, Result};

/// How a document's active namespace was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamespaceSource {
    /// Supplied by the caller; never second-guessed.
    Given,
    /// Read from the root element's tag.
    Resolved,
}

/// Spell an element name in Clark notation: `{uri}local`, or just `local`
/// for elements outside any namespace.
pub fn clark_name(node: roxmltree::Node<'_, '_>) -> String {
    let tag = node.tag_name();
    match tag.namespace() {
        Some(uri) => format!("{{{uri}}}{}", tag.name()),
        None => tag.name().to_owned(),
    }
}

/// Extract the namespace URI from a Clark-notation tag.
pub fn namespace_of(tag: &str) -> Result<&str> {
    tag.strip_prefix('{')
        .and_then(|rest| rest.split_once('}'))
        .map(|(uri, _)| uri)
        .filter(|uri| !uri.is_empty())
        .ok_or(LssError::NamespaceNotFound)
}

/// Namespace URI of the document's root element.
pub(crate) fn resolve(xml: &roxmltree::Document<'_>) -> Result<String> {
    let tag = clark_name(xml.root_element());
    namespace_of(&tag).map(str::to_owned)
}
