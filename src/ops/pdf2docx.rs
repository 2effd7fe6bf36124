//! `pdf2docx`: full-document PDF text extraction into a DOCX.
//!
//! Layout does not survive this direction — the PDF's text is recovered in
//! reading order, grouped into paragraphs at blank lines, and re-flowed as
//! plain DOCX paragraphs. All resources are scope-bound, so they are
//! released on the error path as well as on success.

use crate::error::ConvertError;
use crate::ops::write_atomic;
use crate::pdf;
use docx_rs::{Docx, Paragraph, Run};
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

/// Convert `input` PDF into a DOCX at `output`.
///
/// Returns the number of paragraphs written.
pub fn pdf_to_docx(input: &Path, output: &Path) -> Result<usize, ConvertError> {
    // Validate the input is a readable PDF before handing it to the
    // extractor, whose own errors are much less specific.
    let doc = pdf::open_document(input)?;
    debug!("pdf2docx: {} pages", pdf::page_count(&doc));
    drop(doc);

    let text = pdf_extract::extract_text(input).map_err(|e| ConvertError::TextExtraction {
        path: input.to_path_buf(),
        detail: e.to_string(),
    })?;
    let paragraphs = split_paragraphs(&text);

    let mut docx = Docx::new();
    for para in &paragraphs {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(para.as_str())));
    }

    let mut buf = Vec::new();
    docx.build()
        .pack(Cursor::new(&mut buf))
        .map_err(|e| ConvertError::Internal(format!("DOCX packing failed: {e}")))?;
    write_atomic(output, &buf)?;

    info!(
        "extracted {} paragraphs from {} -> {}",
        paragraphs.len(),
        input.display(),
        output.display()
    );
    Ok(paragraphs.len())
}

/// Group extracted text into paragraphs: blank lines separate paragraphs,
/// hard-wrapped lines within one paragraph re-flow into a single run.
fn split_paragraphs(text: &str) -> Vec<String> {
    text.split("\n\n")
        .map(|block| {
            block
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|p| !p.is_empty())
        .collect()
}
