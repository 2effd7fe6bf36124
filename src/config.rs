//! Value types shared by the conversion operations.
//!
//! There is no configuration file and no persisted state: a docknife process
//! runs one conversion and exits. What lives here are the two pieces of
//! conversion behaviour that callers can actually vary — which pages to keep
//! when splitting, and how tables are detected when extracting to XLSX.

use crate::error::ConvertError;
use std::ops::Range;

/// An inclusive, 1-based page range as typed on the command line.
///
/// The PDF layer works with 0-based half-open ranges; [`PageRange`] owns the
/// conversion so off-by-one arithmetic happens in exactly one place.
///
/// # Example
/// ```rust
/// use docknife::PageRange;
///
/// let r = PageRange::new(2, 4).unwrap();
/// assert_eq!(r.len(), 3);
/// assert_eq!(r.to_zero_based(), 1..4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRange {
    start: usize,
    end: usize,
}

impl PageRange {
    /// Build a range, rejecting `start == 0` and `start > end` up front.
    pub fn new(start: usize, end: usize) -> Result<Self, ConvertError> {
        if start < 1 || start > end {
            return Err(ConvertError::InvalidPageRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// First page, 1-based inclusive.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Last page, 1-based inclusive.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of pages selected.
    #[allow(clippy::len_without_is_empty)] // a PageRange is never empty
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Check the range against the document's actual page count.
    ///
    /// Validating up front turns an out-of-range request into a readable
    /// message instead of an opaque index error from deep inside the PDF
    /// library after pages have already been touched.
    pub fn validate_against(&self, page_count: usize) -> Result<(), ConvertError> {
        if self.end > page_count {
            return Err(ConvertError::PageOutOfRange {
                page: self.end,
                total: page_count,
            });
        }
        Ok(())
    }

    /// The equivalent 0-based half-open range.
    pub fn to_zero_based(&self) -> Range<usize> {
        (self.start - 1)..self.end
    }
}

/// How `pdf2xlsx` decides where the table cells are.
///
/// Gridlined ("lattice") tables carry their structure as ruling lines in the
/// page content, which is the most reliable signal when it exists. Tables
/// typeset without rules only reveal themselves through whitespace alignment
/// ("stream"). Neither heuristic is safe for the other kind of table, so the
/// choice is a per-invocation option rather than a hard-coded policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableMode {
    /// Detect tables from ruling lines drawn on the page. (default)
    #[default]
    Lattice,
    /// Detect tables from whitespace-aligned text columns.
    Stream,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_round_trip() {
        let r = PageRange::new(2, 4).unwrap();
        assert_eq!(r.start(), 2);
        assert_eq!(r.end(), 4);
        assert_eq!(r.len(), 3);
        assert_eq!(r.to_zero_based(), 1..4);
    }

    #[test]
    fn single_page_range() {
        let r = PageRange::new(7, 7).unwrap();
        assert_eq!(r.len(), 1);
        assert_eq!(r.to_zero_based(), 6..7);
    }

    #[test]
    fn zero_start_rejected() {
        assert!(matches!(
            PageRange::new(0, 3),
            Err(ConvertError::InvalidPageRange { start: 0, end: 3 })
        ));
    }

    #[test]
    fn inverted_range_rejected() {
        assert!(PageRange::new(5, 2).is_err());
    }

    #[test]
    fn validate_against_page_count() {
        let r = PageRange::new(2, 4).unwrap();
        assert!(r.validate_against(10).is_ok());
        assert!(r.validate_against(4).is_ok());
        assert!(matches!(
            r.validate_against(3),
            Err(ConvertError::PageOutOfRange { page: 4, total: 3 })
        ));
    }
}
