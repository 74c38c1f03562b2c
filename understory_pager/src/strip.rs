// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Horizontal strip of equally sized pages.

use core::ops::Range;

/// A strip of `len` pages laid out side by side, each `page_width` wide.
///
/// This is the offset/index arithmetic behind the pager: page `i` starts at
/// `i * page_width`, and an offset maps back to the page at or before it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageStrip {
    len: usize,
    page_width: f64,
}

impl PageStrip {
    /// Creates a strip of `len` pages of uniform `page_width`.
    #[must_use]
    pub fn new(len: usize, page_width: f64) -> Self {
        Self {
            len,
            page_width: clamp_width(page_width),
        }
    }

    /// Returns the number of pages.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the strip has no pages.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Sets the number of pages.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
    }

    /// Returns the width of a single page.
    #[must_use]
    pub const fn page_width(&self) -> f64 {
        self.page_width
    }

    /// Sets the width of a single page.
    pub fn set_page_width(&mut self, page_width: f64) {
        debug_assert!(
            page_width.is_finite(),
            "page widths must be finite; got {page_width:?}"
        );
        self.page_width = clamp_width(page_width);
    }

    /// Total width of all pages.
    #[must_use]
    pub fn total_extent(&self) -> f64 {
        self.page_width * self.len as f64
    }

    /// Offset of the leading edge of page `index`.
    #[must_use]
    pub fn offset_of(&self, index: usize) -> f64 {
        index as f64 * self.page_width
    }

    /// Index of the page at or before `offset`, rounding toward the lower
    /// page boundary.
    ///
    /// Returns `None` when the page width is zero, where no mapping exists.
    /// Negative offsets map to page 0. The result is not clamped to `len`.
    #[must_use]
    pub fn index_at_offset(&self, offset: f64) -> Option<usize> {
        if self.page_width <= 0.0 {
            return None;
        }
        let ratio = offset / self.page_width;
        if ratio.is_nan() || ratio <= 0.0 {
            return Some(0);
        }
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Truncation of a positive ratio is the intended floor"
        )]
        let index = ratio as usize;
        Some(index)
    }

    /// If `offset` lies exactly on a page boundary, returns that page's index.
    #[must_use]
    pub fn aligned_index(&self, offset: f64) -> Option<usize> {
        if self.page_width <= 0.0 || offset < 0.0 || offset % self.page_width != 0.0 {
            return None;
        }
        self.index_at_offset(offset)
    }

    /// Returns the `(current - 1, current, current + 1)` window, clipped to
    /// the strip.
    #[must_use]
    pub fn neighborhood(&self, current: usize) -> Range<usize> {
        let start = current.saturating_sub(1);
        let end = current.saturating_add(2).min(self.len);
        start..end
    }
}

fn clamp_width(page_width: f64) -> f64 {
    // NaNs and negatives collapse to an unusable (zero) width.
    if page_width > 0.0 { page_width } else { 0.0 }
}
