//! `pdf2xlsx`: extract tables from every page into a spreadsheet.

use crate::config::TableMode;
use crate::error::ConvertError;
use crate::ops::write_atomic;
use crate::pdf;
use crate::tables;
use rust_xlsxwriter::Workbook;
use std::path::Path;
use tracing::{info, warn};

/// Extract all detected tables from `input` into an XLSX workbook at
/// `output`, one sheet per table, named `Table_1`, `Table_2`, … in page
/// order.
///
/// Returns the number of tables written. **Zero tables is a soft outcome**:
/// no output file is created and `Ok(0)` is returned — the caller decides
/// how loudly to warn.
pub fn pdf_to_xlsx(input: &Path, output: &Path, mode: TableMode) -> Result<usize, ConvertError> {
    let doc = pdf::open_document(input)?;
    let found = tables::extract_tables(&doc, mode)?;

    if found.is_empty() {
        warn!("no tables detected in {} ({:?} mode)", input.display(), mode);
        return Ok(0);
    }

    let mut workbook = Workbook::new();
    for (i, table) in found.iter().enumerate() {
        let worksheet = workbook
            .add_worksheet()
            .set_name(format!("Table_{}", i + 1))
            .map_err(|e| ConvertError::Xlsx(e.to_string()))?;
        for (r, row) in table.rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                if !cell.is_empty() {
                    worksheet
                        .write_string(r as u32, c as u16, cell)
                        .map_err(|e| ConvertError::Xlsx(e.to_string()))?;
                }
            }
        }
    }

    let bytes = workbook
        .save_to_buffer()
        .map_err(|e| ConvertError::Xlsx(e.to_string()))?;
    write_atomic(output, &bytes)?;

    info!(
        "extracted {} tables from {} -> {}",
        found.len(),
        input.display(),
        output.display()
    );
    Ok(found.len())
}
