//! DOM Operations Adapter
//!
//! Thin helpers over the `dom_query` crate so the scanners read in terms of
//! the wiki markup they inspect rather than raw node plumbing.

// Re-export core types for external use
pub use dom_query::{Document, Selection};

pub use tendril::StrTendril;

use crate::patterns::HIDDEN_STYLE;

/// Tags whose text never belongs to visible page content.
const NON_CONTENT_TAGS: &[&str] = &["script", "style", "noscript", "template"];

// === Attribute Operations ===

/// Get any attribute value
#[inline]
#[must_use]
pub fn get_attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

// === Tag/Node Information ===

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_ascii_lowercase())
}

// === Text Content ===

/// Get all text content of node and descendants
///
/// Returns `StrTendril` for zero-copy passing. Use `.to_string()` only when
/// you need owned storage.
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Collect every visible text node under the selection in document order.
///
/// Text inside `script`, `style`, `noscript` and `template` is skipped.
#[must_use]
pub fn text_nodes(sel: &Selection) -> Vec<StrTendril> {
    let mut out = Vec::new();

    for root in sel.nodes() {
        for node in root.descendants() {
            if !node.is_text() {
                continue;
            }
            let in_non_content = node
                .parent()
                .and_then(|p| p.node_name())
                .is_some_and(|tag| NON_CONTENT_TAGS.iter().any(|t| tag.eq_ignore_ascii_case(t)));
            if !in_non_content {
                out.push(node.text());
            }
        }
    }

    out
}

// === Visibility ===

/// Whether the element itself carries an inline style that hides it.
#[must_use]
pub fn has_hidden_style(sel: &Selection) -> bool {
    sel.attr("style").is_some_and(|style| HIDDEN_STYLE.is_match(&style))
}

/// Whether the element or any of its ancestors is hidden by inline style.
///
/// Tab widgets keep every panel in the DOM and hide the inactive ones, so
/// this is what decides which panel is currently showing.
#[must_use]
pub fn is_hidden(sel: &Selection) -> bool {
    let Some(node) = sel.nodes().first() else {
        return false;
    };

    let mut current = Some(*node);
    while let Some(n) = current {
        if n.is_element() && has_hidden_style(&Selection::from(n)) {
            return true;
        }
        current = n.parent();
    }
    false
}

// === Querying ===

/// Split a selection into one single-node selection per element, in document order.
#[must_use]
pub fn each<'a>(sel: &Selection<'a>) -> Vec<Selection<'a>> {
    sel.nodes().iter().map(|n| Selection::from(*n)).collect()
}

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}
