//! URL list configuration.
//!
//! The run is driven by a small JSON document:
//!
//! ```json
//! { "urls": ["https://call-of-war.fandom.com/wiki/Militia"] }
//! ```
//!
//! A document without the `urls` key is a valid, empty list.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Ordered list of page URLs to process.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UrlList {
    #[serde(default)]
    pub urls: Vec<String>,
}

impl UrlList {
    /// Parse a URL list from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    /// Read and parse a URL list from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::from_json(&text)
    }
}
