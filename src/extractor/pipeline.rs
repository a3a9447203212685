//! Per-page extraction pipeline.
//!
//! The stages run in a fixed order and every stage that is reached runs
//! unconditionally unless its own precondition fails. Whether the page
//! succeeded is the OR of every stage's outcome; a page where nothing
//! succeeded is handed back as a raw dump so every input yields an artifact.

use dom_query::Selection;

use crate::dom;
use crate::patterns::{PatternSet, TAB_CONTROL_CANDIDATES};
use crate::render::Renderer;
use crate::selector;
use crate::{Dataset, Options, PageExtraction, RawDump, Stage, StageOutcome};

use super::infobox::scan_infobox;
use super::stats::extract_patterns;
use super::tables::scan_tables;
use super::tabs::{resolve_tabs, tab_datasets};

/// Stage order. Adding a stage means one entry here and one match arm in
/// [`run_stage`].
pub const STAGES: [Stage; 4] = [Stage::Tables, Stage::Tabs, Stage::Infobox, Stage::Patterns];

/// Column headers of the label/value datasets.
pub const INFOBOX_HEADER: [&str; 2] = ["Attribute", "Value"];
pub const STATS_HEADER: [&str; 2] = ["Stat", "Value"];
pub const COMBAT_HEADER: [&str; 2] = ["Target", "Value"];

/// Everything the stages need besides the document itself.
pub struct PageContext<'a> {
    pub options: &'a Options,
    pub patterns: &'a PatternSet,
    /// Source URL, required for the tab stage to re-render the page.
    pub url: Option<&'a str>,
    pub renderer: Option<&'a mut dyn Renderer>,
}

impl<'a> PageContext<'a> {
    /// Context for static extraction: no URL, no renderer.
    #[must_use]
    pub fn offline(options: &'a Options, patterns: &'a PatternSet) -> Self {
        Self {
            options,
            patterns,
            url: None,
            renderer: None,
        }
    }
}

/// Run every stage over one page's markup.
#[must_use]
pub fn extract_page(page: &str, html: &str, ctx: &mut PageContext) -> PageExtraction {
    let doc = dom::parse(html);
    let root = doc.select("html");

    let mut out = PageExtraction {
        page: page.to_string(),
        ..PageExtraction::default()
    };
    let mut success = false;

    for stage in STAGES {
        let outcome = match run_stage(stage, page, &root, success, ctx, &mut out.warnings) {
            None => StageOutcome::Skipped,
            Some(datasets) if datasets.is_empty() => StageOutcome::Empty,
            Some(datasets) => {
                success = true;
                let found = datasets.len();
                out.datasets.extend(datasets);
                StageOutcome::Found(found)
            }
        };
        log::debug!("{page}: {} -> {outcome:?}", stage.as_str());
        out.stages.push((stage, outcome));
    }

    if !success {
        log::info!("{page}: no structured data found, keeping raw markup");
        out.raw_fallback = Some(RawDump {
            name: format!("{page}_debug"),
            content: html.to_string(),
        });
    }

    out
}

/// `None` when the stage's precondition did not hold, otherwise its datasets.
fn run_stage(
    stage: Stage,
    page: &str,
    root: &Selection,
    success_so_far: bool,
    ctx: &mut PageContext,
    warnings: &mut Vec<String>,
) -> Option<Vec<Dataset>> {
    match stage {
        Stage::Tables => Some(table_datasets(page, root)),
        Stage::Tabs => tab_stage(page, root, ctx, warnings),
        Stage::Infobox => Some(infobox_dataset(page, root).into_iter().collect()),
        Stage::Patterns => {
            if success_so_far && !ctx.options.always_scan_patterns {
                return None;
            }
            Some(pattern_datasets(page, root, ctx.patterns))
        }
    }
}

/// One dataset per table with at least two non-empty rows.
#[must_use]
pub fn table_datasets(page: &str, root: &Selection) -> Vec<Dataset> {
    scan_tables(root, false)
        .into_iter()
        .map(|(n, table)| Dataset {
            name: format!("{page}_table_{n}"),
            ..table
        })
        .collect()
}

#[must_use]
pub fn infobox_dataset(page: &str, root: &Selection) -> Option<Dataset> {
    let infobox = scan_infobox(root)?;
    Some(
        Dataset {
            name: format!("{page}_infobox"),
            ..infobox
        }
        .with_header(&INFOBOX_HEADER),
    )
}

/// Stats and combat datasets; either is omitted when it has no rows.
#[must_use]
pub fn pattern_datasets(page: &str, root: &Selection, patterns: &PatternSet) -> Vec<Dataset> {
    let found = extract_patterns(root, patterns);

    let stats = Dataset {
        name: format!("{page}_stats"),
        ..found.stats
    }
    .with_header(&STATS_HEADER);
    let combat = Dataset {
        name: format!("{page}_combat"),
        ..found.combat
    }
    .with_header(&COMBAT_HEADER);

    [stats, combat].into_iter().filter(|d| !d.is_empty()).collect()
}

/// Whether the static markup shows any known tab widget.
#[must_use]
pub fn has_tab_controls(root: &Selection) -> bool {
    selector::any_match(root, TAB_CONTROL_CANDIDATES)
}

fn tab_stage(
    page: &str,
    root: &Selection,
    ctx: &mut PageContext,
    warnings: &mut Vec<String>,
) -> Option<Vec<Dataset>> {
    if !has_tab_controls(root) {
        return None;
    }
    let url = ctx.url?;
    let renderer = ctx.renderer.as_deref_mut()?;

    match resolve_tabs(renderer, url, ctx.options.tab_settle) {
        Ok(resolution) => {
            warnings.extend(resolution.failures);
            Some(
                resolution
                    .tabs
                    .iter()
                    .flat_map(|tab| tab_datasets(page, tab))
                    .collect(),
            )
        }
        Err(e) => {
            log::warn!("{page}: tab resolution failed, continuing without tabs: {e}");
            warnings.push(format!("tabs: {e}"));
            Some(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::PATTERNS;
    use crate::render::TabControl;

    fn offline(page: &str, html: &str) -> PageExtraction {
        let options = Options::default();
        let mut ctx = PageContext::offline(&options, &PATTERNS);
        extract_page(page, html, &mut ctx)
    }

    #[test]
    fn tables_and_infobox_both_run() {
        let out = offline(
            "militia",
            r#"
            <aside class="portable-infobox">
                <div data-source="hitpoints"><div class="pi-data-value">15</div></div>
            </aside>
            <table><tr><th>Level</th><th>Cost</th></tr><tr><td>1</td><td>100</td></tr></table>
            "#,
        );

        assert_eq!(out.dataset_names(), vec!["militia_table_1", "militia_infobox"]);
        assert!(out.raw_fallback.is_none());
        assert_eq!(
            out.stages,
            vec![
                (Stage::Tables, StageOutcome::Found(1)),
                (Stage::Tabs, StageOutcome::Skipped),
                (Stage::Infobox, StageOutcome::Found(1)),
                (Stage::Patterns, StageOutcome::Skipped),
            ]
        );
        let infobox = out.dataset("militia_infobox").unwrap();
        assert_eq!(infobox.header, Some(vec!["Attribute".to_string(), "Value".to_string()]));
    }

    #[test]
    fn patterns_run_only_when_nothing_else_found() {
        let out = offline("nuclear_rockets", "<p>Hitpoints: 30</p><p>vs. buildings 80</p>");

        assert_eq!(out.dataset_names(), vec!["nuclear_rockets_stats", "nuclear_rockets_combat"]);
        assert_eq!(
            out.dataset("nuclear_rockets_combat").unwrap().rows,
            vec![vec!["vs. Buildings".to_string(), "80".to_string()]]
        );
    }

    #[test]
    fn always_scan_patterns_adds_stats_next_to_tables() {
        let options = Options {
            always_scan_patterns: true,
            ..Options::default()
        };
        let mut ctx = PageContext::offline(&options, &PATTERNS);
        let out = extract_page(
            "tank",
            "<table><tr><td>a</td></tr><tr><td>b</td></tr></table><p>Speed 24</p>",
            &mut ctx,
        );

        assert_eq!(out.dataset_names(), vec!["tank_table_1", "tank_stats"]);
    }

    #[test]
    fn nothing_found_yields_exactly_one_raw_dump() {
        let html = "<html><body><p>Under construction.</p></body></html>";
        let out = offline("militia", html);

        assert!(out.datasets.is_empty());
        let dump = out.raw_fallback.expect("raw dump");
        assert_eq!(dump.name, "militia_debug");
        assert_eq!(dump.content, html);
    }

    #[test]
    fn tab_stage_skipped_without_renderer() {
        let out = offline(
            "tanks",
            r#"<div class="tabber"><div class="wds-tabs__tab">Light</div></div>
               <table><tr><td>a</td></tr><tr><td>b</td></tr></table>"#,
        );

        assert_eq!(out.stages[1], (Stage::Tabs, StageOutcome::Skipped));
        assert_eq!(out.dataset_names(), vec!["tanks_table_1"]);
    }

    /// Renderer whose browser never comes up.
    struct Unreachable;

    impl Renderer for Unreachable {
        fn open(&mut self, url: &str) -> crate::Result<()> {
            Err(crate::Error::Render(format!("navigation to {url} timed out")))
        }
        fn find(&mut self, _selector: &str) -> crate::Result<Vec<TabControl>> {
            Ok(Vec::new())
        }
        fn click(&mut self, _control: &TabControl) -> crate::Result<()> {
            Ok(())
        }
        fn current_markup(&mut self) -> crate::Result<String> {
            Ok(String::new())
        }
        fn close(&mut self) {}
    }

    #[test]
    fn renderer_failure_leaves_static_tables_intact() {
        let options = Options::default();
        let mut renderer = Unreachable;
        let mut ctx = PageContext {
            options: &options,
            patterns: &PATTERNS,
            url: Some("https://w.test/wiki/Tanks"),
            renderer: Some(&mut renderer),
        };

        let out = extract_page(
            "tanks",
            r#"<div class="tabber"><div class="wds-tabs__tab">Light</div></div>
               <table><tr><td>a</td></tr><tr><td>b</td></tr></table>"#,
            &mut ctx,
        );

        assert_eq!(out.stages[0], (Stage::Tables, StageOutcome::Found(1)));
        assert_eq!(out.stages[1], (Stage::Tabs, StageOutcome::Empty));
        assert_eq!(out.dataset_names(), vec!["tanks_table_1"]);
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("timed out"), "{:?}", out.warnings);
        assert!(out.raw_fallback.is_none());
    }
}
