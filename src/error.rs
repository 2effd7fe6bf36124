//! Error types for the docknife library.
//!
//! One enum covers every fatal error a conversion can hit. There is no
//! non-fatal tier: each CLI invocation runs exactly one conversion to
//! completion, so any failure terminates the process with a non-zero exit.
//! The only soft outcome — a PDF with no detectable tables — is modelled as
//! a successful return carrying a zero table count, not as an error.
//!
//! Error messages carry a short hint where one exists, so the CLI can print
//! them verbatim without a translation layer.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the docknife library.
#[derive(Debug, Error)]
pub enum ConvertError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("input file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF.
    #[error("file is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: [u8; 4] },

    /// The image file could not be decoded as JPEG or PNG.
    #[error("unsupported or corrupt image '{path}': {detail}\nOnly JPEG and PNG inputs are supported.")]
    UnsupportedImage { path: PathBuf, detail: String },

    /// `mergepdf` was invoked with no input documents.
    #[error("mergepdf needs at least one input PDF before the output path")]
    NoInputFiles,

    // ── Document errors ───────────────────────────────────────────────────
    /// PDF header/trailer/xref is corrupt and cannot be parsed.
    #[error("PDF '{path}' is corrupt: {detail}\nTry repairing with: qpdf --decrypt input.pdf output.pdf")]
    CorruptPdf { path: PathBuf, detail: String },

    /// The DOCX archive or its document XML cannot be parsed.
    #[error("DOCX '{path}' cannot be read: {detail}")]
    CorruptDocx { path: PathBuf, detail: String },

    /// Text extraction failed on an otherwise loadable PDF.
    #[error("failed to extract text from '{path}': {detail}")]
    TextExtraction { path: PathBuf, detail: String },

    // ── Page-range errors ─────────────────────────────────────────────────
    /// Range is malformed before ever looking at the document.
    #[error("invalid page range {start}-{end}: pages are 1-based and start must be <= end")]
    InvalidPageRange { start: usize, end: usize },

    /// Range is well-formed but exceeds the actual page count.
    #[error("page {page} is out of range (document has {total} pages)")]
    PageOutOfRange { page: usize, total: usize },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create or write an output file.
    #[error("failed to write output file '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The spreadsheet writer rejected the workbook.
    #[error("failed to build XLSX workbook: {0}")]
    Xlsx(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),
}
