//! # docknife
//!
//! Swiss-army document conversion: PDF ↔ DOCX, PDF table extraction to
//! XLSX, image-to-PDF packaging, PDF merge and page-range split.
//!
//! ## Why this crate?
//!
//! Each of these conversions exists somewhere as a separate tool with its
//! own flags and failure modes. docknife puts the six everyday ones behind
//! one binary with one argument convention, and behind one library API for
//! callers who want the conversions without the process boundary.
//!
//! ## Operations
//!
//! | Function | Direction |
//! |----------|-----------|
//! | [`pdf_to_docx`]  | PDF → DOCX (text re-flow) |
//! | [`docx_to_pdf`]  | DOCX → PDF (typeset paragraphs) |
//! | [`pdf_to_xlsx`]  | PDF → XLSX (table detection, one sheet per table) |
//! | [`image_to_pdf`] | JPEG/PNG → one-page PDF |
//! | [`merge_pdfs`]   | PDF… → PDF (argument order) |
//! | [`split_pdf`]    | PDF page range → PDF |
//!
//! Every operation is synchronous and single-shot: validate, convert, write
//! one output file, return. Failures are [`ConvertError`]; the only soft
//! outcome is table extraction finding nothing, which returns `Ok(0)`
//! without creating a file.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use docknife::{split_pdf, PageRange};
//! use std::path::Path;
//!
//! fn main() -> Result<(), docknife::ConvertError> {
//!     let range = PageRange::new(2, 4)?;
//!     let pages = split_pdf(Path::new("in.pdf"), range, Path::new("out.pdf"))?;
//!     println!("wrote {pages} pages");
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `docknife` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! docknife = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod ops;
pub mod pdf;
pub mod tables;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{PageRange, TableMode};
pub use error::ConvertError;
pub use ops::docx2pdf::docx_to_pdf;
pub use ops::img2pdf::image_to_pdf;
pub use ops::merge::{merge_pdfs, MergeStats};
pub use ops::pdf2docx::pdf_to_docx;
pub use ops::pdf2xlsx::pdf_to_xlsx;
pub use ops::split::split_pdf;
pub use tables::Table;
