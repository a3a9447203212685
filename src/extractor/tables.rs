//! Table scanning.
//!
//! Every `<table>` becomes one candidate dataset. Rows with no text are
//! dropped, and a table must keep at least two rows to count: the wiki uses
//! single-row tables for decoration and navigation boxes.

use dom_query::{NodeRef, Selection};

use crate::dom;
use crate::text::normalize;
use crate::{Dataset, Row};

/// Smallest number of kept rows for a table to carry tabular information.
pub const MIN_TABLE_ROWS: usize = 2;

/// Extract the rows of every table in document order.
///
/// Returns `(index, table)` pairs of unnamed datasets, where `index` is the 1-based position of the
/// table among *all* tables of the document, so numbering stays stable even
/// when some tables are skipped. With `skip_hidden`, tables hidden by inline
/// style on themselves or an ancestor are ignored.
#[must_use]
pub fn scan_tables(root: &Selection, skip_hidden: bool) -> Vec<(usize, Dataset)> {
    let mut found = Vec::new();

    for (position, table) in dom::each(&root.select("table")).into_iter().enumerate() {
        let index = position + 1;

        if skip_hidden && dom::is_hidden(&table) {
            continue;
        }

        let rows = table_rows(&table);
        if rows.len() >= MIN_TABLE_ROWS {
            found.push((index, rows));
        }
    }

    found
}

/// Kept rows of one table as an unnamed dataset, excluding rows that belong
/// to nested tables.
#[must_use]
pub fn table_rows(table: &Selection) -> Dataset {
    let mut rows = Dataset::default();
    let Some(table_node) = table.nodes().first() else {
        return rows;
    };

    for tr in dom::each(&table.select("tr")) {
        let Some(tr_node) = tr.nodes().first() else {
            continue;
        };
        if !is_own_row(tr_node, table_node) {
            continue;
        }

        let row: Row = dom::each(&tr.select("th, td"))
            .iter()
            .filter(|cell| cell.nodes().first().is_some_and(|c| parent_row_is(c, tr_node)))
            .map(|cell| normalize(&dom::text_content(cell)))
            .collect();

        rows.push_row(row);
    }

    rows
}

/// Whether the closest enclosing table of `tr` is `table`.
fn is_own_row(tr: &NodeRef, table: &NodeRef) -> bool {
    let mut current = tr.parent();
    while let Some(node) = current {
        if node.node_name().is_some_and(|n| n.eq_ignore_ascii_case("table")) {
            return node.id == table.id;
        }
        current = node.parent();
    }
    false
}

/// Whether the closest enclosing row of `cell` is `tr`.
fn parent_row_is(cell: &NodeRef, tr: &NodeRef) -> bool {
    let mut current = cell.parent();
    while let Some(node) = current {
        if node.node_name().is_some_and(|n| n.eq_ignore_ascii_case("tr")) {
            return node.id == tr.id;
        }
        current = node.parent();
    }
    false
}
