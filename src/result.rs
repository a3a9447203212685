//! Result types for extraction output.
//!
//! A page yields zero or more independent [`Dataset`]s, each destined for one
//! output artifact, plus a raw dump when no strategy found anything.

use serde::Serialize;

/// An ordered sequence of text cells.
pub type Row = Vec<String>;

/// A named, ordered collection of rows destined for one output artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Dataset {
    /// Artifact name without extension, e.g. `militia_table_2`.
    pub name: String,

    /// Optional header written before the rows.
    pub header: Option<Row>,

    /// Data rows in document order.
    pub rows: Vec<Row>,
}

impl Dataset {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            header: None,
            rows: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_header(mut self, header: &[&str]) -> Self {
        self.header = Some(header.iter().map(ToString::to_string).collect());
        self
    }

    /// Appends a row unless every cell is empty.
    ///
    /// Returns whether the row was kept.
    pub fn push_row(&mut self, row: Row) -> bool {
        if row.iter().all(String::is_empty) {
            return false;
        }
        self.rows.push(row);
        true
    }

    /// Convenience for two-column label/value rows.
    pub fn push_pair(&mut self, label: impl Into<String>, value: impl Into<String>) -> bool {
        self.push_row(vec![label.into(), value.into()])
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

/// The extraction stages, in the order the orchestrator runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Tables,
    Tabs,
    Infobox,
    Patterns,
}

impl Stage {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tables => "tables",
            Self::Tabs => "tabs",
            Self::Infobox => "infobox",
            Self::Patterns => "patterns",
        }
    }
}

/// What happened to one stage for one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StageOutcome {
    /// The stage produced at least one dataset.
    Found(usize),
    /// The stage ran and found nothing.
    Empty,
    /// The stage's precondition did not hold.
    Skipped,
}

/// Everything extracted from one page.
#[derive(Debug, Clone, Default)]
pub struct PageExtraction {
    /// Page name derived from the URL.
    pub page: String,

    /// Datasets in stage order.
    pub datasets: Vec<Dataset>,

    /// Raw markup to dump when no stage found anything.
    pub raw_fallback: Option<RawDump>,

    /// Per-stage trace, in the order the stages were visited.
    pub stages: Vec<(Stage, StageOutcome)>,

    /// Non-fatal problems encountered, e.g. a tab that failed to activate.
    pub warnings: Vec<String>,
}

impl PageExtraction {
    /// Whether any stage produced a dataset.
    #[must_use]
    pub fn success(&self) -> bool {
        !self.datasets.is_empty()
    }

    /// Names of every dataset, in order.
    #[must_use]
    pub fn dataset_names(&self) -> Vec<&str> {
        self.datasets.iter().map(|d| d.name.as_str()).collect()
    }

    #[must_use]
    pub fn dataset(&self, name: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|d| d.name == name)
    }
}

/// Raw page content persisted when structured extraction failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawDump {
    /// Artifact name without extension, e.g. `militia_debug`.
    pub name: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_row_drops_all_empty_rows() {
        let mut ds = Dataset::new("x");
        assert!(!ds.push_row(vec![String::new(), String::new()]));
        assert!(!ds.push_row(Vec::new()));
        assert!(ds.push_row(vec![String::new(), "1".to_string()]));
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn with_header_sets_header_row() {
        let ds = Dataset::new("x").with_header(&["Stat", "Value"]);
        assert_eq!(ds.header, Some(vec!["Stat".to_string(), "Value".to_string()]));
        assert!(ds.is_empty());
    }
}
