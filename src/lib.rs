//! # wiki-unitstats
//!
//! Extracts unit statistics from wiki pages and writes them as delimited
//! tables.
//!
//! Unit pages keep their numbers in several shapes: plain `<table>`s, tables
//! hidden behind client-side tab widgets, portable infoboxes, or only as
//! prose. Each page runs through a fixed sequence of strategies and every
//! strategy that finds something contributes its own named dataset. A page
//! where nothing was found still yields one artifact: its raw markup.
//!
//! ## Quick Start
//!
//! ```rust
//! use wiki_unitstats::extract;
//!
//! let html = r#"<html><body>
//! <table><tr><th>Level</th><th>HP</th></tr><tr><td>1</td><td>15</td></tr></table>
//! </body></html>"#;
//!
//! let page = extract(html, "militia");
//! assert_eq!(page.dataset_names(), vec!["militia_table_1"]);
//! assert_eq!(page.datasets[0].rows[1], vec!["1", "15"]);
//! ```
//!
//! ## Strategies
//!
//! - **Tables**: every `<table>` with at least two non-empty rows
//! - **Tabs**: each tab of a tab widget is activated in a browser and scanned
//! - **Infobox**: portable-infobox label/value pairs
//! - **Patterns**: regex dictionaries over the page text, used when nothing
//!   else matched
//!
//! Tab activation needs a [`render::Renderer`]; the default `browser` feature
//! provides one backed by headless Chrome.

mod error;
mod options;
mod result;

/// Text cleanup shared by every scanner.
pub mod text;

/// Compiled regexes and selector tables.
pub mod patterns;

/// DOM helpers over `dom_query`.
pub mod dom;

/// Selector rules and candidate lists.
pub mod selector;

/// Extraction strategies and the per-page pipeline.
pub mod extractor;

/// Tab rendering through a browser session.
pub mod render;

/// Page download.
pub mod fetch;

/// Character encoding detection for fetched bodies.
pub mod encoding;

/// Dataset persistence.
pub mod sink;

/// URL list loading.
pub mod config;

/// Fetch, extract and write over a list of URLs.
pub mod runner;

pub use error::{Error, Result};
pub use options::{Options, DEFAULT_USER_AGENT};
pub use result::{Dataset, PageExtraction, RawDump, Row, Stage, StageOutcome};

/// Extracts every dataset from static markup with default options.
///
/// No browser is involved, so the tab stage is skipped. Dataset names are
/// prefixed with `page`.
#[must_use]
pub fn extract(html: &str, page: &str) -> PageExtraction {
    extract_with_options(html, page, &Options::default())
}

/// Extracts every dataset from static markup with custom options.
///
/// ```rust
/// use wiki_unitstats::{extract_with_options, Options};
///
/// let html = "<table><tr><td>a</td></tr><tr><td>b</td></tr></table><p>Speed: 24</p>";
/// let options = Options {
///     always_scan_patterns: true,
///     ..Options::default()
/// };
/// let page = extract_with_options(html, "tank", &options);
/// assert_eq!(page.dataset_names(), vec!["tank_table_1", "tank_stats"]);
/// ```
#[must_use]
pub fn extract_with_options(html: &str, page: &str, options: &Options) -> PageExtraction {
    let mut ctx = extractor::PageContext::offline(options, &patterns::PATTERNS);
    extractor::extract_page(page, html, &mut ctx)
}

/// Decodes raw bytes (honouring a `<meta charset>` declaration) and extracts.
#[must_use]
pub fn extract_bytes(html: &[u8], page: &str) -> PageExtraction {
    let html = encoding::decode_body(html, None);
    extract(&html, page)
}
