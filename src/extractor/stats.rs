//! Pattern-based recovery of unit statistics and combat multipliers.
//!
//! Used for pages that describe a unit in prose or loose markup instead of a
//! table. The whole page is flattened into one lower-cased corpus and matched
//! against the fixed dictionaries in [`crate::patterns`].

use dom_query::Selection;

use crate::dom;
use crate::patterns::{PatternEntry, PatternSet, CONTAINER_TAGS, DIGIT_RUN, STAT_KEYWORDS};
use crate::selector;
use crate::text::{normalize, title_case};
use crate::Dataset;

/// Containers longer than this are treated as layout wrappers, not stat lines.
pub const MAX_CONTAINER_CHARS: usize = 100;

/// Unnamed stats and combat datasets recovered by the pattern scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternRows {
    pub stats: Dataset,
    pub combat: Dataset,
}

impl PatternRows {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty() && self.combat.is_empty()
    }
}

/// Concatenate every visible text node, normalized and lower-cased.
#[must_use]
pub fn flatten(root: &Selection) -> String {
    dom::text_nodes(root)
        .iter()
        .map(|t| normalize(t))
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Match each dictionary entry against the corpus, first match only.
#[must_use]
pub fn match_dictionary(entries: &[PatternEntry], corpus: &str) -> Dataset {
    let mut found = Dataset::default();
    for entry in entries {
        if let Some(value) = entry.first_value(corpus) {
            found.push_pair(entry.label, normalize(value));
        }
    }
    found
}

/// Run the dictionary scan, falling back to short keyword containers when no
/// dictionary entry matches.
#[must_use]
pub fn extract_patterns(root: &Selection, patterns: &PatternSet) -> PatternRows {
    let corpus = flatten(root);

    let rows = PatternRows {
        stats: match_dictionary(&patterns.stats, &corpus),
        combat: match_dictionary(&patterns.combat, &corpus),
    };

    if rows.is_empty() {
        scan_containers(root)
    } else {
        rows
    }
}

fn is_container(sel: &Selection) -> bool {
    dom::tag_name(sel).is_some_and(|tag| CONTAINER_TAGS.contains(&tag.as_str()))
}

/// Keyword scan over short generic containers.
///
/// A container qualifies when its text mentions a stat keyword, holds a digit
/// and stays under [`MAX_CONTAINER_CHARS`]. Its first digit run becomes the
/// value and its title-cased text the label.
#[must_use]
pub fn scan_containers(root: &Selection) -> PatternRows {
    let mut rows = PatternRows::default();

    for container in selector::query_all(root, is_container) {
        let text = normalize(&dom::text_content(&container)).to_lowercase();

        if text.chars().count() >= MAX_CONTAINER_CHARS {
            continue;
        }
        if !STAT_KEYWORDS.iter().any(|k| text.contains(k)) {
            continue;
        }
        let Some(digits) = DIGIT_RUN.find(&text) else {
            continue;
        };

        let bucket = if text.contains("vs") { &mut rows.combat } else { &mut rows.stats };
        bucket.push_pair(title_case(&text), digits.as_str());
    }

    rows
}
