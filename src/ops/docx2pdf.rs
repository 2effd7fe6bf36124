//! `docx2pdf`: render DOCX paragraph text onto typeset PDF pages.
//!
//! This is a renderer for *documents people read*, not a layout-faithful
//! converter: paragraph text is pulled from the DOCX, greedily word-wrapped
//! to the page width, and typeset top-to-bottom in 11 pt Helvetica with a
//! blank line between paragraphs. Styling, images and tables in the source
//! are out of scope for this direction.

use crate::error::ConvertError;
use crate::pdf::{self, DocumentBuilder, CHARS_PER_LINE, LINES_PER_PAGE};
use docx_rs::{DocumentChild, ParagraphChild, RunChild};
use std::path::Path;
use tracing::{debug, info};

/// Convert `input` DOCX into a PDF at `output`.
///
/// Returns the number of pages written (always at least one, so an empty
/// document still yields a valid, openable PDF).
pub fn docx_to_pdf(input: &Path, output: &Path) -> Result<usize, ConvertError> {
    let paragraphs = read_paragraphs(input)?;
    debug!("docx2pdf: {} paragraphs", paragraphs.len());

    // Flatten paragraphs into wrapped lines with a separator blank line.
    let mut lines: Vec<String> = Vec::new();
    for (i, para) in paragraphs.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.extend(wrap(para, CHARS_PER_LINE));
    }

    let mut builder = DocumentBuilder::new();
    if lines.is_empty() {
        builder.add_text_page(&[])?;
    } else {
        for chunk in lines.chunks(LINES_PER_PAGE) {
            builder.add_text_page(chunk)?;
        }
    }

    let pages = builder.page_len();
    let mut doc = builder.finish();
    pdf::save_document(&mut doc, output)?;

    info!(
        "rendered {} -> {} ({} pages)",
        input.display(),
        output.display(),
        pages
    );
    Ok(pages)
}

/// Pull the plain text of every paragraph, in document order.
fn read_paragraphs(input: &Path) -> Result<Vec<String>, ConvertError> {
    if !input.exists() {
        return Err(ConvertError::FileNotFound {
            path: input.to_path_buf(),
        });
    }
    let bytes = std::fs::read(input).map_err(|e| ConvertError::CorruptDocx {
        path: input.to_path_buf(),
        detail: e.to_string(),
    })?;
    let docx = docx_rs::read_docx(&bytes).map_err(|e| ConvertError::CorruptDocx {
        path: input.to_path_buf(),
        detail: e.to_string(),
    })?;

    let mut paragraphs = Vec::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(para) = child {
            let mut text = String::new();
            for pc in &para.children {
                if let ParagraphChild::Run(run) = pc {
                    for rc in &run.children {
                        match rc {
                            RunChild::Text(t) => text.push_str(&t.text),
                            RunChild::Tab(_) => text.push(' '),
                            _ => {}
                        }
                    }
                }
            }
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                paragraphs.push(trimmed.to_string());
            }
        }
    }
    Ok(paragraphs)
}

/// Greedy word wrap at `width` characters; words longer than a full line
/// are hard-split rather than overflowing the margin.
///
/// Width is counted in characters, not bytes — splits must land on char
/// boundaries or multi-byte text would panic the slicing.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;
    for word in text.split_whitespace() {
        let mut word = word;
        let mut word_chars = word.chars().count();
        // Hard-split oversized words.
        while word_chars > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_chars = 0;
            }
            let split = word
                .char_indices()
                .nth(width)
                .map(|(i, _)| i)
                .unwrap_or(word.len());
            let (head, tail) = word.split_at(split);
            lines.push(head.to_string());
            word = tail;
            word_chars -= width;
        }
        if current.is_empty() {
            current.push_str(word);
            current_chars = word_chars;
        } else if current_chars + 1 + word_chars <= width {
            current.push(' ');
            current.push_str(word);
            current_chars += 1 + word_chars;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_chars = word_chars;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
