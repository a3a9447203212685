//! Text normalization and naming helpers.
//!
//! Every cell that reaches a sink passes through [`normalize`], so delimited
//! output never sees raw newlines or tabs.

use url::Url;

use crate::patterns::{LABEL_SEPARATORS, LABEL_UNSAFE, PAGE_NAME_UNSAFE, WHITESPACE_NORMALIZE};

/// Collapses every whitespace run to a single space and trims both ends.
///
/// Idempotent: `normalize(&normalize(s)) == normalize(s)`.
///
/// ```
/// use wiki_unitstats::text::normalize;
///
/// assert_eq!(normalize("a\n\tb  c"), "a b c");
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    WHITESPACE_NORMALIZE.replace_all(text, " ").trim().to_string()
}

/// [`normalize`] for values that may be missing. Absent input yields `""`.
#[must_use]
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

/// Title-cases a string: the first letter of every alphabetic run is
/// upper-cased and the rest of the run lower-cased.
///
/// `"vs. heavy armor"` becomes `"Vs. Heavy Armor"`, `"2x_damage"` becomes `"2X_Damage"`.
#[must_use]
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;

    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }

    out
}

/// Turns a machine-readable infobox key into a column label.
///
/// ```
/// use wiki_unitstats::text::humanize_key;
///
/// assert_eq!(humanize_key("view_range"), "View Range");
/// ```
#[must_use]
pub fn humanize_key(key: &str) -> String {
    title_case(&key.replace('_', " "))
}

/// Reduces a tab label to a filename-safe token.
///
/// Characters outside letters, digits, spaces and hyphens are dropped, then
/// whitespace/hyphen runs collapse into a single underscore.
#[must_use]
pub fn sanitize_label(label: &str) -> String {
    let kept = LABEL_UNSAFE.replace_all(label, "");
    let joined = LABEL_SEPARATORS.replace_all(kept.trim(), "_");
    joined.trim_matches('_').to_string()
}

/// Derives the page name from the last non-empty path segment of a URL.
///
/// The segment is percent-decoded and lower-cased, then every run of
/// characters other than letters, digits, spaces, `_` and `-` becomes a
/// single `_`, so the name is always one plain file name: an encoded `/` or
/// `..` can never reach the filesystem. Falls back to `"page"` when nothing
/// usable is left.
///
/// ```
/// use wiki_unitstats::text::page_name;
///
/// assert_eq!(page_name("https://call-of-war.fandom.com/wiki/Militia"), "militia");
/// ```
#[must_use]
pub fn page_name(url: &str) -> String {
    let segment = match Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
            .map(percent_decode),
        Err(_) => url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .map(percent_decode),
    };

    segment
        .map(|s| file_safe(&s.to_lowercase()))
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "page".to_string())
}

fn file_safe(name: &str) -> String {
    PAGE_NAME_UNSAFE
        .replace_all(name.trim(), "_")
        .trim_matches('_')
        .to_string()
}

fn percent_decode(segment: &str) -> String {
    // form decoding turns '+' into a space; path segments keep it literal
    let escaped = segment.replace('+', "%2B").replace('&', "%26");
    url::form_urlencoded::parse(format!("s={escaped}").as_bytes())
        .next()
        .map(|(_, value)| value.into_owned())
        .unwrap_or_else(|| segment.to_string())
}
