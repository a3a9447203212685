//! Tab resolution.
//!
//! Some unit pages split their stat tables across client-side tab widgets
//! (one tab per unit level or variant). Each tab is activated through the
//! [`Renderer`], and the markup captured afterwards is scanned like a normal
//! page, with hidden panels ignored.

use std::thread;
use std::time::Duration;

use crate::dom;
use crate::error::{Error, Result};
use crate::patterns::TAB_CONTROL_CANDIDATES;
use crate::render::{Renderer, TabControl};
use crate::text::{normalize, sanitize_label};
use crate::Dataset;

use super::infobox::scan_infobox;
use super::pipeline::INFOBOX_HEADER;
use super::tables::scan_tables;

/// Markup captured after activating one tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTab {
    /// 1-based position of the tab control.
    pub index: usize,
    /// Visible label, normalized. May be empty.
    pub label: String,
    pub html: String,
}

impl RenderedTab {
    /// Filename-safe form of the label, `Tab_<index>` when nothing of the
    /// label survives sanitizing (including an empty label).
    #[must_use]
    pub fn token(&self) -> String {
        let token = sanitize_label(&self.label);
        if token.is_empty() {
            format!("Tab_{}", self.index)
        } else {
            token
        }
    }

    /// Dataset name prefix shared by everything extracted from this tab.
    #[must_use]
    pub fn prefix(&self, page: &str) -> String {
        format!("{page}_tab_{}_{}", self.index, self.token())
    }
}

/// Tabs captured from one page plus the activations that failed.
#[derive(Debug, Clone, Default)]
pub struct TabResolution {
    pub tabs: Vec<RenderedTab>,
    pub failures: Vec<String>,
}

/// Find the tab controls of the current page, first matching convention wins.
pub fn discover_controls(renderer: &mut dyn Renderer) -> Result<Vec<TabControl>> {
    for candidate in TAB_CONTROL_CANDIDATES {
        let controls = renderer.find(candidate)?;
        if !controls.is_empty() {
            log::debug!("Found {} tab controls with {candidate}", controls.len());
            return Ok(controls);
        }
    }
    Err(Error::NoTabs)
}

/// Render `url`, activate every tab in DOM order and capture its markup.
///
/// Returns `Err(Error::NoTabs)` when the page has no known tab widget. A tab
/// that fails to activate or capture is logged, recorded and skipped.
pub fn resolve_tabs(renderer: &mut dyn Renderer, url: &str, settle: Duration) -> Result<TabResolution> {
    renderer.open(url)?;
    let controls = discover_controls(renderer)?;

    let mut resolution = TabResolution::default();
    for (position, control) in controls.iter().enumerate() {
        let index = position + 1;
        let label = normalize(&control.text);

        match activate(renderer, control, settle) {
            Ok(html) => resolution.tabs.push(RenderedTab { index, label, html }),
            Err(e) => {
                log::warn!("Skipping tab {index} ({label:?}) of {url}: {e}");
                resolution.failures.push(format!("tab {index} ({label:?}): {e}"));
            }
        }
    }

    Ok(resolution)
}

fn activate(renderer: &mut dyn Renderer, control: &TabControl, settle: Duration) -> Result<String> {
    renderer.click(control)?;
    if !settle.is_zero() {
        thread::sleep(settle);
    }
    renderer.current_markup()
}

/// Tables and infobox of one tab's markup, named after the tab.
#[must_use]
pub fn tab_datasets(page: &str, tab: &RenderedTab) -> Vec<Dataset> {
    let doc = dom::parse(&tab.html);
    let root = doc.select("html");
    let prefix = tab.prefix(page);

    let mut datasets: Vec<Dataset> = scan_tables(&root, true)
        .into_iter()
        .map(|(n, table)| Dataset {
            name: format!("{prefix}_table_{n}"),
            ..table
        })
        .collect();

    if let Some(infobox) = scan_infobox(&root) {
        datasets.push(
            Dataset {
                name: format!("{prefix}_infobox"),
                ..infobox
            }
            .with_header(&INFOBOX_HEADER),
        );
    }

    datasets
}
