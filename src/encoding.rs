//! Character set handling for fetched pages and saved HTML files.
//!
//! Page bodies arrive as bytes. The charset is taken from the HTTP
//! `Content-Type` header when present, then from a `<meta>` declaration in
//! the first kilobyte, and defaults to UTF-8.

use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;

/// Bytes inspected for a `<meta>` charset declaration.
const SNIFF_LEN: usize = 1024;

/// `charset=...` inside a `Content-Type` value or a `<meta>` tag.
#[allow(clippy::expect_used)]
static CHARSET_PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;>]+)"#).expect("valid regex"));

/// A `<meta ...>` tag carrying a charset, either form.
#[allow(clippy::expect_used)]
static META_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<meta[^>]+charset[^>]*>").expect("valid regex"));

/// Charset label from a `Content-Type` header value, e.g. `text/html; charset=UTF-8`.
#[must_use]
pub fn charset_from_content_type(content_type: &str) -> Option<&str> {
    CHARSET_PARAM_RE
        .captures(content_type)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

/// Charset label declared by a `<meta>` tag near the start of the document.
#[must_use]
pub fn charset_from_meta(html: &[u8]) -> Option<String> {
    let head = String::from_utf8_lossy(&html[..html.len().min(SNIFF_LEN)]);
    let tag = META_TAG_RE.find(&head)?;
    charset_from_content_type(tag.as_str()).map(ToString::to_string)
}

/// Pick the encoding for a body, preferring the transport-level label.
#[must_use]
pub fn detect_encoding(html: &[u8], header_charset: Option<&str>) -> &'static Encoding {
    header_charset
        .and_then(|label| Encoding::for_label(label.trim().as_bytes()))
        .or_else(|| charset_from_meta(html).and_then(|label| Encoding::for_label(label.as_bytes())))
        .unwrap_or(UTF_8)
}

/// Decode a page body to UTF-8.
///
/// Malformed sequences become U+FFFD instead of failing the page.
///
/// ```
/// use wiki_unitstats::encoding::decode_body;
///
/// let html = b"<meta charset=\"windows-1252\"><td>Caf\xE9</td>";
/// assert!(decode_body(html, None).contains("Café"));
/// ```
#[must_use]
pub fn decode_body(body: &[u8], header_charset: Option<&str>) -> String {
    let encoding = detect_encoding(body, header_charset);
    if encoding == UTF_8 {
        return String::from_utf8_lossy(body).into_owned();
    }

    let (decoded, _, _) = encoding.decode(body);
    decoded.into_owned()
}
