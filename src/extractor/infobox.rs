//! Infobox scanning.
//!
//! Fandom renders unit attributes in a "portable infobox" side panel whose
//! items carry a `data-source` key and a nested value element.

use dom_query::Selection;

use crate::dom;
use crate::patterns::{INFOBOX_CANDIDATES, INFOBOX_ITEM_SELECTOR, INFOBOX_VALUE_CANDIDATES};
use crate::selector::first_match;
use crate::text::{humanize_key, normalize};
use crate::Dataset;

/// Extract `[label, value]` rows from the first recognised infobox panel as
/// an unnamed dataset.
///
/// Returns `None` when no panel is found or the panel has no items.
#[must_use]
pub fn scan_infobox(root: &Selection) -> Option<Dataset> {
    let (_, panels) = first_match(root, INFOBOX_CANDIDATES)?;
    let panel = panels.first();

    let mut infobox = Dataset::default();
    for item in dom::each(&panel.select(INFOBOX_ITEM_SELECTOR)) {
        if let Some((label, value)) = item_pair(&item) {
            infobox.push_pair(label, value);
        }
    }

    (!infobox.is_empty()).then_some(infobox)
}

fn item_pair(item: &Selection) -> Option<(String, String)> {
    let key = dom::get_attribute(item, "data-source")?;
    let (_, value) = first_match(item, INFOBOX_VALUE_CANDIDATES)?;

    Some((
        normalize(&humanize_key(&key)),
        normalize(&dom::text_content(&value.first())),
    ))
}
