//! Page retrieval.
//!
//! The pipeline only needs `fetch(url, user_agent) -> (status, body)`; the
//! blocking [`HttpFetcher`] is the production implementation.

use std::io::Read;
use std::time::Duration;

use crate::encoding::{charset_from_content_type, decode_body};
use crate::error::{Error, Result};

/// Upper bound on a page body. Wiki pages are a few hundred kilobytes.
const MAX_BODY_BYTES: u64 = 20 * 1024 * 1024;

/// A fetched page before any status interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Retrieves the markup of a page.
///
/// Implementations return `Ok` for any HTTP answer, including error statuses,
/// and `Err(Error::Fetch)` only for transport failures.
pub trait PageFetcher {
    fn fetch(&self, url: &str, user_agent: &str) -> Result<FetchedPage>;
}

/// Blocking HTTP fetcher backed by `ureq`.
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    #[must_use]
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self { agent }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str, user_agent: &str) -> Result<FetchedPage> {
        let response = match self.agent.get(url).set("User-Agent", user_agent).call() {
            Ok(response) => response,
            // Non-2xx answers still carry a status and a body worth reporting.
            Err(ureq::Error::Status(_, response)) => response,
            Err(ureq::Error::Transport(err)) => {
                return Err(Error::Fetch {
                    url: url.to_string(),
                    reason: err.to_string(),
                })
            }
        };

        let status = response.status();
        let charset = response
            .header("Content-Type")
            .and_then(charset_from_content_type)
            .map(ToString::to_string);

        let mut bytes = Vec::new();
        response
            .into_reader()
            .take(MAX_BODY_BYTES)
            .read_to_end(&mut bytes)
            .map_err(|e| Error::Fetch {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        log::debug!("Fetched {url}: HTTP {status}, {} bytes", bytes.len());

        Ok(FetchedPage {
            status,
            body: decode_body(&bytes, charset.as_deref()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_range_is_2xx() {
        let page = |status| FetchedPage {
            status,
            body: String::new(),
        };
        assert!(page(200).is_success());
        assert!(page(204).is_success());
        assert!(!page(304).is_success());
        assert!(!page(404).is_success());
    }

    #[test]
    fn unreachable_host_is_transient_fetch_error() {
        let fetcher = HttpFetcher::new(Duration::from_millis(500));
        let err = fetcher
            .fetch("http://127.0.0.1:9/wiki/Militia", "Mozilla/5.0")
            .unwrap_err();
        assert!(matches!(err, Error::Fetch { .. }));
    }
}
