//! Compiled regex patterns and pattern dictionaries.
//!
//! All patterns are compiled once at first use with `LazyLock` and shared
//! read-only for the lifetime of the process.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Text Cleaning Patterns
// =============================================================================

/// Matches whitespace runs for normalization (Unicode-aware, covers `\n`, `\r`, `\t`).
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex"));

/// Characters not allowed in a tab label token.
pub static LABEL_UNSAFE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}\s-]").expect("LABEL_UNSAFE regex"));

/// Whitespace/hyphen runs collapsed into one underscore in tab label tokens.
pub static LABEL_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s-]+").expect("LABEL_SEPARATORS regex"));

/// Runs of characters that may not appear in a page name used as a file name.
pub static PAGE_NAME_UNSAFE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}\s_-]+").expect("PAGE_NAME_UNSAFE regex"));

/// First run of ASCII digits.
pub static DIGIT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("DIGIT_RUN regex"));

/// Inline styles that hide an element.
pub static HIDDEN_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)display\s*:\s*none|visibility\s*:\s*hidden").expect("HIDDEN_STYLE regex")
});

// =============================================================================
// Statistic / Combat Dictionaries
// =============================================================================

/// A named pattern recovering one field from the flattened corpus.
///
/// The regex must contain exactly one capture group holding the value.
#[derive(Debug)]
pub struct PatternEntry {
    pub label: &'static str,
    pub regex: Regex,
}

impl PatternEntry {
    fn new(label: &'static str, pattern: &str) -> Self {
        Self {
            label,
            regex: Regex::new(pattern).expect("pattern dictionary regex"),
        }
    }

    /// Value captured by the first match in `corpus`, if any.
    #[must_use]
    pub fn first_value<'t>(&self, corpus: &'t str) -> Option<&'t str> {
        self.regex
            .captures(corpus)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}

/// The ordered statistic and combat dictionaries.
#[derive(Debug)]
pub struct PatternSet {
    pub stats: Vec<PatternEntry>,
    pub combat: Vec<PatternEntry>,
}

// Corpus is lower-cased and whitespace-normalized before matching.
const NUMBER: &str = r"(\d+(?:[.,]\d+)?)";

impl Default for PatternSet {
    fn default() -> Self {
        let stat = |label, name: &str| PatternEntry::new(label, &format!(r"{name}[:\s]+{NUMBER}"));
        let versus = |label, target: &str| {
            PatternEntry::new(label, &format!(r"vs\.?\s*{target}[:\s]+{NUMBER}"))
        };

        Self {
            stats: vec![
                stat("Hitpoints", r"hit\s?points"),
                stat("Speed", r"speed"),
                stat("Attack", r"attack"),
                // "view range" and "view-range" have their own entry
                stat("Range", r"(?:^|[^w][\s-]|[^\sw-])range"),
                stat("View Range", r"view[\s-]+range"),
            ],
            combat: vec![
                versus("vs. Unarmored", "unarmou?red"),
                versus("vs. Airplane", "airplanes?"),
                versus("vs. Light Armor", r"light\s+armou?r"),
                versus("vs. Heavy Armor", r"heavy\s+armou?r"),
                versus("vs. Ship", "ships?"),
                versus("vs. Submarine", "submarines?"),
                versus("vs. Buildings", "buildings?"),
                versus("vs. Morale", "morale"),
            ],
        }
    }
}

/// Process-wide dictionaries, built on first use and never mutated.
pub static PATTERNS: LazyLock<PatternSet> = LazyLock::new(PatternSet::default);

/// Keywords that mark a short container as a stat line in the fallback scan.
pub const STAT_KEYWORDS: &[&str] = &["hitpoints", "speed", "attack", "range", "vs"];

// =============================================================================
// CSS Selectors (ordered candidates, first match wins)
// =============================================================================

/// Infobox panel, from the exact portable-infobox markup to looser class matches.
pub const INFOBOX_CANDIDATES: &[&str] = &[
    "aside.portable-infobox",
    ".portable-infobox",
    "table.infobox",
    "[class*='infobox']",
];

/// Key/value items inside an infobox panel.
pub const INFOBOX_ITEM_SELECTOR: &str = "[data-source]";

/// Value-bearing child of an infobox item.
pub const INFOBOX_VALUE_CANDIDATES: &[&str] = &[".pi-data-value", ".pi-font"];

/// Clickable tab controls of the known tab widgets.
pub const TAB_CONTROL_CANDIDATES: &[&str] = &[
    ".tabber .wds-tabs__tab",
    ".wds-tabs__tab",
    ".tabbernav li a",
    "[role='tab']",
];

/// Generic containers inspected by the keyword fallback scan.
pub const CONTAINER_TAGS: &[&str] = &["div", "span", "p", "li", "td"];
