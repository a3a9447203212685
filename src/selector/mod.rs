//! Selector Infrastructure
//!
//! Two ways of locating elements: predicate rules collected over every
//! descendant, and ordered CSS candidate lists where the first candidate that
//! matches anything wins. Infobox and tab discovery both use the latter.

use dom_query::Selection;

/// A selector rule that tests if a selection matches certain criteria
pub type Rule = fn(&Selection) -> bool;

/// Query for all elements matching the rule, in document order.
#[must_use]
pub fn query_all<'a>(root: &Selection<'a>, rule: Rule) -> Vec<Selection<'a>> {
    let mut matches = Vec::new();

    for node in root.select("*").nodes() {
        let sel = Selection::from(*node);
        if rule(&sel) {
            matches.push(sel);
        }
    }

    matches
}

/// First candidate of an ordered CSS list that matches anything.
///
/// Returns the index of the winning candidate together with everything it
/// matched. Candidates are tried in order; the first one that matches at
/// least one element wins, later candidates are never evaluated.
///
/// # Example
///
/// ```rust
/// use wiki_unitstats::{dom, selector};
///
/// let doc = dom::parse(r#"<div class="portable-infobox">x</div>"#);
/// let root = doc.select("html");
///
/// let (index, found) = selector::first_match(&root, &["aside.portable-infobox", ".portable-infobox"])
///     .unwrap();
/// assert_eq!(index, 1);
/// assert_eq!(found.length(), 1);
/// ```
#[must_use]
pub fn first_match<'a>(root: &Selection<'a>, candidates: &[&str]) -> Option<(usize, Selection<'a>)> {
    candidates.iter().enumerate().find_map(|(index, candidate)| {
        let found = root.select(candidate);
        found.exists().then_some((index, found))
    })
}

/// Whether any candidate matches anything under `root`.
#[must_use]
pub fn any_match(root: &Selection, candidates: &[&str]) -> bool {
    first_match(root, candidates).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom;

    #[test]
    fn test_query_all_preserves_document_order() {
        let doc = dom::parse(r#"
            <div>
                <p class="item">1</p>
                <section>
                    <p class="item">2</p>
                </section>
                <p class="item">3</p>
            </div>
        "#);
        let root = doc.select("div");

        fn is_item(sel: &Selection) -> bool {
            sel.has_class("item")
        }

        let results = query_all(&root, is_item);
        assert_eq!(results.len(), 3);
        assert_eq!(dom::text_content(&results[0]), "1".into());
        assert_eq!(dom::text_content(&results[1]), "2".into());
        assert_eq!(dom::text_content(&results[2]), "3".into());
    }

    #[test]
    fn test_first_match_prefers_earlier_candidates() {
        let doc = dom::parse(r#"
            <div class="infobox-like">loose</div>
            <aside class="portable-infobox">exact</aside>
        "#);
        let root = doc.select("html");

        let (index, found) =
            first_match(&root, &["aside.portable-infobox", "[class*='infobox']"]).unwrap();
        assert_eq!(index, 0);
        assert_eq!(dom::text_content(&found), "exact".into());
    }

    #[test]
    fn test_first_match_falls_through_to_looser_candidates() {
        let doc = dom::parse(r#"<ul class="tabbernav"><li><a>One</a></li><li><a>Two</a></li></ul>"#);
        let root = doc.select("html");

        let (index, found) = first_match(&root, &[".wds-tabs__tab", ".tabbernav li a"]).unwrap();
        assert_eq!(index, 1);
        assert_eq!(found.length(), 2);
    }

    #[test]
    fn test_first_match_none_when_nothing_matches() {
        let doc = dom::parse("<div><p>content</p></div>");
        let root = doc.select("html");

        assert!(first_match(&root, &[".wds-tabs__tab", "[role='tab']"]).is_none());
        assert!(!any_match(&root, &[".wds-tabs__tab"]));
        assert!(first_match(&root, &[]).is_none());
    }
}
