//! `splitpdf`: extract an inclusive 1-based page range into a new PDF.

use crate::config::PageRange;
use crate::error::ConvertError;
use crate::pdf;
use std::path::Path;
use tracing::info;

/// Write a new PDF containing only the pages in `range`, in original order.
///
/// The range is validated against the document's actual page count before
/// any pages are touched, so out-of-range requests fail with a readable
/// message instead of an index error from deep inside the PDF library.
///
/// Returns the number of pages written.
pub fn split_pdf(input: &Path, range: PageRange, output: &Path) -> Result<usize, ConvertError> {
    let mut doc = pdf::open_document(input)?;
    let total = pdf::page_count(&doc);
    range.validate_against(total)?;

    // lopdf deletes by 1-based page number; keep the range, drop the rest.
    let keep = range.to_zero_based();
    let discard: Vec<u32> = (1..=total as u32)
        .filter(|&n| !keep.contains(&(n as usize - 1)))
        .collect();
    if !discard.is_empty() {
        doc.delete_pages(&discard);
    }
    doc.prune_objects();

    pdf::save_document(&mut doc, output)?;
    info!(
        "split {}..={} of {} ({} pages) -> {}",
        range.start(),
        range.end(),
        input.display(),
        range.len(),
        output.display()
    );
    Ok(range.len())
}
