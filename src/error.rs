//! Error types for wiki-unitstats.
//!
//! Only the run driver treats errors as fatal. Everything that happens while
//! processing a single page is logged and recovered from.

/// Error type for fetching, rendering and persisting pages.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Network failure while fetching a page.
    #[error("Fetching {url} failed: {reason}")]
    Fetch { url: String, reason: String },

    /// The server answered with a non-success status code.
    #[error("Fetching {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// Browser session or page interaction failed.
    #[error("Renderer error: {0}")]
    Render(String),

    /// The rendered page exposes none of the known tab widgets.
    #[error("No tab controls found")]
    NoTabs,

    /// Writing a dataset or raw dump failed.
    #[error("Writing {name} failed: {source}")]
    Sink {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// The URL list could not be read or parsed.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Plain I/O failure outside of the sink (reading input files).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, Error>;
