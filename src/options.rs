//! Configuration options for page extraction and output.
//!
//! The `Options` struct controls which fallbacks run, how pages are fetched
//! and how tabs are activated. Use `Default::default()` for standard settings.

use std::time::Duration;

/// Default `User-Agent` sent by the page fetcher.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Configuration options for extraction and output.
///
/// All fields are public for easy configuration.
///
/// # Example
///
/// ```rust
/// use wiki_unitstats::Options;
///
/// let options = Options {
///     always_scan_patterns: true,
///     ..Options::default()
/// };
/// assert!(options.interactive);
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// `User-Agent` header for page requests.
    ///
    /// Default: `"Mozilla/5.0"`
    pub user_agent: String,

    /// Overall deadline for one static page request, body included.
    ///
    /// Default: 30 s
    pub fetch_timeout: Duration,

    /// Run the pattern extractor even when earlier stages found data.
    ///
    /// By default the pattern scan only runs when tables, tabs and the infobox
    /// all came up empty.
    ///
    /// Default: `false`
    pub always_scan_patterns: bool,

    /// Use a browser session to activate tab widgets.
    ///
    /// When the browser cannot be started the run continues without it.
    ///
    /// Default: `true`
    pub interactive: bool,

    /// How long to wait after clicking a tab before capturing its markup.
    ///
    /// The wiki renders tab panels asynchronously with no completion signal.
    ///
    /// Default: 1500 ms
    pub tab_settle: Duration,

    /// How long to wait for the initial page load in the browser.
    ///
    /// Default: 30 s
    pub render_timeout: Duration,

    /// Field delimiter for written datasets.
    ///
    /// Default: `','`
    pub delimiter: char,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            fetch_timeout: Duration::from_secs(30),
            always_scan_patterns: false,
            interactive: true,
            tab_settle: Duration::from_millis(1500),
            render_timeout: Duration::from_secs(30),
            delimiter: ',',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let options = Options::default();
        assert_eq!(options.user_agent, "Mozilla/5.0");
        assert!(!options.always_scan_patterns);
        assert!(options.interactive);
        assert_eq!(options.fetch_timeout, Duration::from_secs(30));
        assert_eq!(options.tab_settle, Duration::from_millis(1500));
        assert_eq!(options.render_timeout, Duration::from_secs(30));
        assert_eq!(options.delimiter, ',');
    }

    #[test]
    fn fetch_and_render_timeouts_are_independent() {
        let options = Options {
            fetch_timeout: Duration::from_secs(5),
            ..Options::default()
        };
        assert_eq!(options.fetch_timeout, Duration::from_secs(5));
        assert_eq!(options.render_timeout, Duration::from_secs(30));
    }
}
