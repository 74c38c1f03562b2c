// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collapsible header state consumed by layout.

/// The part of a parallax header that layout depends on.
///
/// The header's own scroll-driven resizing belongs to the host; the segmented
/// pager only needs its current extent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ParallaxHeader {
    /// Expanded height. The content scroller insets its top by this much.
    pub height: f64,
    /// Height the header keeps when fully collapsed. The page area shrinks by
    /// this much so it stays visible below the collapsed header.
    pub minimum_height: f64,
    /// Whether the header shows anything. Without content the content
    /// scroller does not scroll.
    pub has_content: bool,
}

impl ParallaxHeader {
    /// A header with content of the given heights.
    #[must_use]
    pub fn new(height: f64, minimum_height: f64) -> Self {
        Self {
            height,
            minimum_height,
            has_content: true,
        }
    }

    /// How far the header is expanded for a content offset `offset_y`, from 0
    /// (collapsed to its minimum) to 1 (at its full height).
    ///
    /// Offsets above the top (negative beyond `-height`) report more than 1.
    #[must_use]
    pub fn progress(&self, offset_y: f64) -> f64 {
        let range = self.height - self.minimum_height;
        if range <= 0.0 {
            return 1.0;
        }
        (-offset_y - self.minimum_height) / range
    }
}
