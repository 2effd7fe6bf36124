//! Table recovery from PDF page content.
//!
//! ## Two detection modes
//!
//! PDF has no table markup: a table is just text runs plus, sometimes, the
//! lines of its grid. Recovery therefore works from one of two signals:
//!
//! * **Lattice** — gridlined tables. The ruling lines drawn on the page are
//!   clustered into column and row cut positions, and text runs are binned
//!   into the resulting cells. Reliable whenever the grid is actually drawn.
//! * **Stream** — rule-less tables. Text runs are grouped into visual rows
//!   by baseline, and column positions are inferred from the horizontal
//!   alignment of runs across consecutive rows.
//!
//! Neither heuristic is safe for the other kind of table, which is why the
//! mode is an option on `pdf2xlsx` rather than a fixed policy.
//!
//! The scanner in [`text`] deliberately ignores glyph metrics: cell
//! assignment only needs each run's *origin*, not its exact extent, and the
//! standard tolerance (a few points) absorbs the difference.

mod grid;
mod text;

use crate::config::TableMode;
use crate::error::ConvertError;
use lopdf::Document;
use tracing::debug;

/// One recovered table: rows top-to-bottom, cells left-to-right.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Widest row, used to size the spreadsheet columns.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// Detect tables on every page of `doc`, in page order.
pub fn extract_tables(doc: &Document, mode: TableMode) -> Result<Vec<Table>, ConvertError> {
    let mut tables = Vec::new();
    for (page_num, page_id) in doc.get_pages() {
        let scan = text::scan_page(doc, page_id)?;
        let found = match mode {
            TableMode::Lattice => grid::detect_lattice(&scan),
            TableMode::Stream => grid::detect_stream(&scan),
        };
        debug!(
            "page {}: {} text runs, {} rulings, {} tables ({:?})",
            page_num,
            scan.runs.len(),
            scan.rulings.len(),
            found.len(),
            mode
        );
        tables.extend(found);
    }
    Ok(tables)
}

/// Test support: the shown text of one page, in content-stream order.
#[cfg(test)]
pub(crate) fn scan_for_test(doc: &Document, page_id: lopdf::ObjectId) -> Vec<String> {
    text::scan_page(doc, page_id)
        .expect("page scan")
        .runs
        .into_iter()
        .map(|r| r.text)
        .collect()
}
