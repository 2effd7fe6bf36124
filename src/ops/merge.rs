//! `mergepdf`: concatenate PDFs in argument order.
//!
//! ## How lopdf merging works
//!
//! Object ids are only unique within one document, so each input is
//! renumbered into a disjoint id range before its objects are pooled.
//! The inputs' page objects are collected in argument order, their old
//! catalogs and pages trees are discarded, and a fresh pages tree and
//! catalog are built over the pooled pages. Everything else (fonts, images,
//! content streams) survives untouched because page dictionaries keep
//! referencing them by their renumbered ids.

use crate::error::ConvertError;
use crate::pdf;
use lopdf::{dictionary, Document, Object, ObjectId};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Totals for the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeStats {
    pub input_files: usize,
    pub pages: usize,
}

/// Merge `inputs` into one PDF at `output`. Page order follows argument
/// order; each input contributes all of its pages.
pub fn merge_pdfs(inputs: &[PathBuf], output: &Path) -> Result<MergeStats, ConvertError> {
    if inputs.is_empty() {
        return Err(ConvertError::NoInputFiles);
    }

    let mut max_id = 1u32;
    let mut page_ids: Vec<ObjectId> = Vec::new();
    let mut pooled: BTreeMap<ObjectId, Object> = BTreeMap::new();

    for path in inputs {
        let mut doc = pdf::open_document(path)?;
        doc.renumber_objects_with(max_id);
        max_id = doc.max_id + 1;

        // get_pages is keyed by 1-based page number, so iteration preserves
        // this document's internal page order.
        page_ids.extend(doc.get_pages().into_values());
        pooled.extend(doc.objects);
    }

    let mut merged = Document::with_version("1.5");
    // Pooled objects occupy ids 1..max_id; continue allocating above them.
    merged.max_id = max_id - 1;
    let pages_id = merged.new_object_id();

    for (id, object) in pooled {
        match object.type_name().unwrap_or("") {
            // Replaced by the fresh page tree and catalog built below.
            "Catalog" | "Pages" => {}
            // Old bookmark trees reference pages by their former tree and
            // would dangle; drop them rather than emit broken outlines.
            "Outlines" | "Outline" => {}
            "Page" => {
                if let Object::Dictionary(mut dict) = object {
                    dict.set("Parent", pages_id);
                    merged.objects.insert(id, Object::Dictionary(dict));
                }
            }
            _ => {
                merged.objects.insert(id, object);
            }
        }
    }

    let kids: Vec<Object> = page_ids.iter().map(|&id| id.into()).collect();
    let count = page_ids.len() as i64;
    merged.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = merged.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    merged.trailer.set("Root", catalog_id);
    merged.renumber_objects();
    merged.compress();

    pdf::save_document(&mut merged, output)?;
    let stats = MergeStats {
        input_files: inputs.len(),
        pages: page_ids.len(),
    };
    info!(
        "merged {} files ({} pages) -> {}",
        stats.input_files,
        stats.pages,
        output.display()
    );
    Ok(stats)
}
