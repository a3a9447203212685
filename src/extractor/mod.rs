//! Structured-data extraction.
//!
//! # Module Structure
//!
//! - `tables`: `<table>` scanning with empty-row and single-row filtering
//! - `infobox`: portable-infobox key/value scanning
//! - `stats`: regex dictionaries over the flattened page text, keyword fallback
//! - `tabs`: tab activation through a [`crate::render::Renderer`]
//! - `pipeline`: stage ordering, success tracking and the raw-dump fallback
//!
//! # Usage
//!
//! ```rust
//! use wiki_unitstats::extractor::pipeline::{extract_page, PageContext};
//! use wiki_unitstats::patterns::PATTERNS;
//! use wiki_unitstats::Options;
//!
//! let html = "<table><tr><th>Level</th></tr><tr><td>1</td></tr></table>";
//! let options = Options::default();
//! let mut ctx = PageContext::offline(&options, &PATTERNS);
//!
//! let page = extract_page("militia", html, &mut ctx);
//! assert_eq!(page.dataset_names(), vec!["militia_table_1"]);
//! ```

pub mod infobox;
pub mod pipeline;
pub mod stats;
pub mod tables;
pub mod tabs;

pub use infobox::scan_infobox;
pub use pipeline::{extract_page, PageContext, STAGES};
pub use stats::{extract_patterns, PatternRows};
pub use tables::scan_tables;
pub use tabs::{resolve_tabs, RenderedTab, TabResolution};
