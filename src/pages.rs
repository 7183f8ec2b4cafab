//! Page selection for the slides PDF.
//!
//! Only odd-numbered pages of the rendered deck are kept. The selection is a
//! pure function of the slide count and is handed to the renderer as a
//! Chrome page-range string such as `"1,3,5"`.

use std::fmt;

/// An ordered set of 1-based page numbers to keep when printing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageRanges {
    pages: Vec<u32>,
}

impl PageRanges {
    /// Page numbers in ascending order.
    pub fn pages(&self) -> &[u32] {
        &self.pages
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }
}

impl fmt::Display for PageRanges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, page) in self.pages.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{page}")?;
        }
        Ok(())
    }
}

/// Pages 1, 3, 5, ... up to the largest odd number not exceeding `slide_count`.
///
/// A zero count yields an empty selection.
pub fn odd_pages(slide_count: usize) -> PageRanges {
    let last = u32::try_from(slide_count).unwrap_or(u32::MAX);
    PageRanges {
        pages: (1..=last).step_by(2).collect(),
    }
}
