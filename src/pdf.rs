//! Shared PDF plumbing: validated loading and simple page construction.
//!
//! ## Why validate before lopdf?
//!
//! lopdf reports a parse failure for anything it cannot open — a missing
//! file, a JPEG renamed to `.pdf`, and a genuinely corrupt document all
//! surface as the same opaque error. Checking existence, read permission and
//! the `%PDF` magic bytes first lets each failure get its own message.
//!
//! ## Why build pages by hand?
//!
//! `docx2pdf` and `img2pdf` need to *produce* PDFs, not just read them.
//! Rather than pulling in a layout engine for what amounts to "wrapped
//! Helvetica paragraphs" and "one image per page", [`DocumentBuilder`]
//! assembles the object graph (pages tree, font resource, content streams)
//! directly with lopdf primitives.

use crate::error::ConvertError;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use std::io::Read;
use std::path::Path;
use tracing::debug;

// A4 portrait in points, with a one-inch margin on all sides.
pub(crate) const PAGE_WIDTH: f32 = 595.0;
pub(crate) const PAGE_HEIGHT: f32 = 842.0;
pub(crate) const MARGIN: f32 = 72.0;
pub(crate) const FONT_SIZE: f32 = 11.0;
pub(crate) const LEADING: f32 = 14.0;

/// Maximum text lines that fit on one A4 page at the fixed leading.
pub(crate) const LINES_PER_PAGE: usize = ((PAGE_HEIGHT - 2.0 * MARGIN) / LEADING) as usize;

/// Maximum characters per wrapped line. Helvetica averages roughly half the
/// point size per glyph; erring low keeps lines inside the right margin.
pub(crate) const CHARS_PER_LINE: usize = 82;

/// Open a PDF, mapping each failure mode to its own error.
pub fn open_document(path: &Path) -> Result<Document, ConvertError> {
    if !path.exists() {
        return Err(ConvertError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    match std::fs::File::open(path) {
        Ok(mut f) => {
            let mut magic = [0u8; 4];
            if f.read_exact(&mut magic).is_ok() && &magic != b"%PDF" {
                return Err(ConvertError::NotAPdf {
                    path: path.to_path_buf(),
                    magic,
                });
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(ConvertError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(_) => {
            return Err(ConvertError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
    }

    let doc = Document::load(path).map_err(|e| ConvertError::CorruptPdf {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;

    debug!("loaded PDF: {} ({} pages)", path.display(), doc.get_pages().len());
    Ok(doc)
}

/// Number of pages in a loaded document.
pub fn page_count(doc: &Document) -> usize {
    doc.get_pages().len()
}

/// Save a document atomically: serialise to memory, write to a sibling temp
/// file, then rename over the target so a failed save never leaves a torn
/// output behind.
pub fn save_document(doc: &mut Document, path: &Path) -> Result<(), ConvertError> {
    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| ConvertError::Internal(format!("PDF serialisation failed: {e}")))?;
    crate::ops::write_atomic(path, &bytes)
}

// ── Page construction ────────────────────────────────────────────────────

/// Incrementally assembles a new PDF document page by page.
///
/// The pages-tree object id is allocated up front so every page can point
/// its `Parent` at it; the tree itself is only materialised in [`finish`],
/// once the full `Kids` list is known.
///
/// [`finish`]: DocumentBuilder::finish
pub struct DocumentBuilder {
    doc: Document,
    pages_id: ObjectId,
    page_ids: Vec<ObjectId>,
    font_id: Option<ObjectId>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            page_ids: Vec::new(),
            font_id: None,
        }
    }

    /// The standard-14 Helvetica font object, created once and shared by all
    /// text pages.
    fn font(&mut self) -> ObjectId {
        if let Some(id) = self.font_id {
            return id;
        }
        let id = self.doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        self.font_id = Some(id);
        id
    }

    /// Add an A4 page containing the given pre-wrapped text lines.
    ///
    /// Lines beyond [`LINES_PER_PAGE`] are the caller's problem — the
    /// operation layer paginates before calling this.
    pub fn add_text_page(&mut self, lines: &[String]) -> Result<(), ConvertError> {
        let font_id = self.font();

        let mut operations = vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), FONT_SIZE.into()]),
            Operation::new("TL", vec![LEADING.into()]),
            Operation::new(
                "Td",
                vec![MARGIN.into(), (PAGE_HEIGHT - MARGIN - FONT_SIZE).into()],
            ),
        ];
        for line in lines {
            operations.push(Operation::new(
                "Tj",
                vec![Object::string_literal(to_pdf_text(line))],
            ));
            operations.push(Operation::new("T*", vec![]));
        }
        operations.push(Operation::new("ET", vec![]));

        let content = Content { operations };
        let content_id = self.doc.add_object(Stream::new(
            dictionary! {},
            content
                .encode()
                .map_err(|e| ConvertError::Internal(format!("content stream encode: {e}")))?,
        ));

        let resources_id = self.doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        });
        self.page_ids.push(page_id);
        Ok(())
    }

    /// Add a page sized exactly to an image (1 px = 1 pt) and filled by it.
    ///
    /// `xobject` must be a complete image XObject stream — dimensions,
    /// colour space and filter already set by the caller.
    pub fn add_image_page(
        &mut self,
        xobject: Stream,
        width: u32,
        height: u32,
    ) -> Result<(), ConvertError> {
        let image_id = self.doc.add_object(xobject);

        // Scale the unit image square up to the page, then paint it.
        let operations = vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    (width as f32).into(),
                    0.into(),
                    0.into(),
                    (height as f32).into(),
                    0.into(),
                    0.into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(b"Im1".to_vec())]),
            Operation::new("Q", vec![]),
        ];

        let content = Content { operations };
        let content_id = self.doc.add_object(Stream::new(
            dictionary! {},
            content
                .encode()
                .map_err(|e| ConvertError::Internal(format!("content stream encode: {e}")))?,
        ));

        let resources_id = self.doc.add_object(dictionary! {
            "XObject" => dictionary! { "Im1" => image_id },
        });

        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => self.pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), (width as f32).into(), (height as f32).into()],
        });
        self.page_ids.push(page_id);
        Ok(())
    }

    /// Number of pages added so far.
    pub fn page_len(&self) -> usize {
        self.page_ids.len()
    }

    /// Materialise the pages tree and catalog and return the finished
    /// document, with flate compression applied to unfiltered streams.
    pub fn finish(mut self) -> Document {
        let kids: Vec<Object> = self.page_ids.iter().map(|&id| id.into()).collect();
        let count = self.page_ids.len() as i64;
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => self.pages_id,
        });
        self.doc.trailer.set("Root", catalog_id);
        self.doc.compress();
        self.doc
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a Unicode line onto the Latin-1 byte range the standard-14 fonts can
/// show. Anything outside it becomes `?` rather than garbling the stream.
fn to_pdf_text(line: &str) -> Vec<u8> {
    line.chars()
        .map(|c| {
            let cp = c as u32;
            if cp <= 0xFF {
                cp as u8
            } else {
                b'?'
            }
        })
        .collect()
}
