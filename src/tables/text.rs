//! Content-stream scanning: positioned text runs and ruling lines.
//!
//! This is a deliberately small interpreter for the handful of operators
//! that matter to table detection. It tracks the text line origin through
//! `BT`/`Tm`/`Td`/`TD`/`T*` and records one [`TextRun`] per show operator;
//! it tracks path construction through `m`/`l`/`re` and commits straight
//! horizontal/vertical segments as [`Ruling`]s when the path is actually
//! painted. Curves, clipping, transparency and the full CTM stack are
//! ignored — none of them move a table cell by more than the clustering
//! tolerance on the documents this tool targets.

use crate::error::ConvertError;
use lopdf::content::Content;
use lopdf::{Document, Object, ObjectId};

/// A fragment of shown text anchored at its line origin, in page space.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TextRun {
    pub x: f32,
    pub y: f32,
    pub text: String,
}

/// An axis-aligned painted segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Ruling {
    /// y position, x extent.
    Horizontal { y: f32, x0: f32, x1: f32 },
    /// x position, y extent.
    Vertical { x: f32, y0: f32, y1: f32 },
}

/// Everything table detection needs to know about one page.
#[derive(Debug, Default)]
pub(crate) struct PageScan {
    pub runs: Vec<TextRun>,
    pub rulings: Vec<Ruling>,
}

// Segments thinner than this are treated as lines rather than boxes;
// deviations smaller than this count as "straight".
const LINE_EPSILON: f32 = 2.0;

/// Scan one page's content stream.
pub(crate) fn scan_page(doc: &Document, page_id: ObjectId) -> Result<PageScan, ConvertError> {
    let data = doc
        .get_page_content(page_id)
        .map_err(|e| ConvertError::Internal(format!("page content unavailable: {e}")))?;
    let content = Content::decode(&data)
        .map_err(|e| ConvertError::Internal(format!("content stream decode: {e}")))?;

    let mut scan = PageScan::default();

    // Text state
    let mut line_x = 0.0f32;
    let mut line_y = 0.0f32;
    let mut leading = 0.0f32;

    // Path state: segments built since the last path-painting operator.
    let mut pending: Vec<Ruling> = Vec::new();
    let mut current: Option<(f32, f32)> = None;

    for op in &content.operations {
        match op.operator.as_str() {
            // ── Text positioning ──────────────────────────────────────────
            "BT" => {
                line_x = 0.0;
                line_y = 0.0;
            }
            "Tm" => {
                if let (Some(e), Some(f)) = (num(op.operands.get(4)), num(op.operands.get(5))) {
                    line_x = e;
                    line_y = f;
                }
            }
            "Td" => {
                if let (Some(tx), Some(ty)) = (num(op.operands.get(0)), num(op.operands.get(1))) {
                    line_x += tx;
                    line_y += ty;
                }
            }
            "TD" => {
                if let (Some(tx), Some(ty)) = (num(op.operands.get(0)), num(op.operands.get(1))) {
                    line_x += tx;
                    line_y += ty;
                    leading = -ty;
                }
            }
            "TL" => {
                if let Some(l) = num(op.operands.get(0)) {
                    leading = l;
                }
            }
            "T*" => {
                line_y -= leading;
            }

            // ── Text showing ──────────────────────────────────────────────
            "Tj" => {
                if let Some(Object::String(bytes, _)) = op.operands.first() {
                    push_run(&mut scan.runs, line_x, line_y, decode_text(bytes));
                }
            }
            "'" => {
                line_y -= leading;
                if let Some(Object::String(bytes, _)) = op.operands.first() {
                    push_run(&mut scan.runs, line_x, line_y, decode_text(bytes));
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = op.operands.first() {
                    let mut text = String::new();
                    for item in items {
                        if let Object::String(bytes, _) = item {
                            text.push_str(&decode_text(bytes));
                        }
                    }
                    push_run(&mut scan.runs, line_x, line_y, text);
                }
            }

            // ── Path construction ─────────────────────────────────────────
            "m" => {
                if let (Some(x), Some(y)) = (num(op.operands.get(0)), num(op.operands.get(1))) {
                    current = Some((x, y));
                }
            }
            "l" => {
                if let (Some(x), Some(y)) = (num(op.operands.get(0)), num(op.operands.get(1))) {
                    if let Some((px, py)) = current {
                        if let Some(r) = segment(px, py, x, y) {
                            pending.push(r);
                        }
                    }
                    current = Some((x, y));
                }
            }
            "re" => {
                if let (Some(x), Some(y), Some(w), Some(h)) = (
                    num(op.operands.get(0)),
                    num(op.operands.get(1)),
                    num(op.operands.get(2)),
                    num(op.operands.get(3)),
                ) {
                    pending.extend(rect_rulings(x, y, w, h));
                }
            }

            // ── Path painting ─────────────────────────────────────────────
            "S" | "s" | "f" | "F" | "f*" | "B" | "B*" | "b" | "b*" => {
                scan.rulings.append(&mut pending);
                current = None;
            }
            "n" => {
                pending.clear();
                current = None;
            }

            _ => {}
        }
    }

    Ok(scan)
}

fn push_run(runs: &mut Vec<TextRun>, x: f32, y: f32, text: String) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        runs.push(TextRun {
            x,
            y,
            text: trimmed.to_string(),
        });
    }
}

/// A straight segment between two points, if it is axis-aligned.
fn segment(x0: f32, y0: f32, x1: f32, y1: f32) -> Option<Ruling> {
    if (y1 - y0).abs() <= LINE_EPSILON && (x1 - x0).abs() > LINE_EPSILON {
        Some(Ruling::Horizontal {
            y: (y0 + y1) / 2.0,
            x0: x0.min(x1),
            x1: x0.max(x1),
        })
    } else if (x1 - x0).abs() <= LINE_EPSILON && (y1 - y0).abs() > LINE_EPSILON {
        Some(Ruling::Vertical {
            x: (x0 + x1) / 2.0,
            y0: y0.min(y1),
            y1: y0.max(y1),
        })
    } else {
        None
    }
}

/// Rulings contributed by a rectangle.
///
/// A thin rectangle is a drawn line (common output of table renderers that
/// fill 1-pt boxes instead of stroking); a full-size rectangle contributes
/// its four edges, which is exactly what a cell border means to the grid.
fn rect_rulings(x: f32, y: f32, w: f32, h: f32) -> Vec<Ruling> {
    if h.abs() <= LINE_EPSILON {
        return vec![Ruling::Horizontal {
            y: y + h / 2.0,
            x0: x,
            x1: x + w,
        }];
    }
    if w.abs() <= LINE_EPSILON {
        return vec![Ruling::Vertical {
            x: x + w / 2.0,
            y0: y,
            y1: y + h,
        }];
    }
    vec![
        Ruling::Horizontal { y, x0: x, x1: x + w },
        Ruling::Horizontal {
            y: y + h,
            x0: x,
            x1: x + w,
        },
        Ruling::Vertical { x, y0: y, y1: y + h },
        Ruling::Vertical {
            x: x + w,
            y0: y,
            y1: y + h,
        },
    ]
}

fn num(obj: Option<&Object>) -> Option<f32> {
    match obj {
        Some(Object::Integer(i)) => Some(*i as f32),
        Some(Object::Real(r)) => Some(*r),
        _ => None,
    }
}

/// Decode a shown string: UTF-16BE when it carries a BOM, Latin-1 otherwise.
///
/// Font-specific encodings (Differences arrays, CID maps) are out of scope;
/// the simple fonts this tool emits and the bulk of table-bearing documents
/// use WinAnsi-compatible byte codes.
fn decode_text(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let utf16: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|c| u16::from_be_bytes([c[0], c[1]]))
            .collect();
        String::from_utf16_lossy(&utf16)
    } else {
        bytes.iter().map(|&b| b as char).collect()
    }
}
