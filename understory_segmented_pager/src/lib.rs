// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Segmented Pager: a pager and a segmented control kept in sync.
//!
//! [`SegmentedPager`] composes an [`understory_pager::Pager`] with an
//! [`understory_segmented_control::SegmentedControl`], an optional toolbar, and
//! a collapsible [`ParallaxHeader`], all hosted in a vertical content scroller.
//!
//! - Pager movement selects the matching segment: animated on "will move",
//!   then again without animation on "did move", followed by the host's
//!   selection notifications (by index, by title, then by page).
//! - A tap that changes the segment shows that page, animated. Re-selecting the
//!   page the pager is already on does nothing.
//! - [`compute_frames`] places the control, toolbar, and page area for a
//!   [`ControlPosition`]; [`SegmentedPager::set_toolbar_height`] returns frame
//!   updates in a gap-free order.
//!
//! Collaborators are lent per call through a [`SegmentedHost`]. Every hook on
//! [`SegmentedPagerDataSource`], [`SegmentedPagerDelegate`], and
//! [`SegmentedPage`] beyond the page count and page factory is optional and
//! declared through capability flags.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use understory_pager::Page;
//! use understory_segmented_pager::{SegmentedHost, SegmentedPage, SegmentedPager};
//!
//! #[derive(Clone, Default)]
//! struct Screen(Option<String>);
//!
//! impl Page for Screen {
//!     fn reuse_identifier(&self) -> Option<&str> { self.0.as_deref() }
//!     fn set_reuse_identifier(&mut self, id: &str) { self.0 = Some(id.into()); }
//! }
//! impl SegmentedPage for Screen {}
//!
//! let mut segmented: SegmentedPager<Screen> = SegmentedPager::default();
//! for i in 0..3 {
//!     let id = segmented.page_identifier(i);
//!     segmented.pager_mut().reuse_mut().register_template(&id, Screen::default());
//! }
//! let mut source =
//!     segmented.identified_sections(vec!["Home".into(), "Feed".into(), "Me".into()]);
//! let mut host = SegmentedHost::detached().with_data_source(&mut source);
//!
//! segmented.layout(Size::new(300.0, 500.0), &mut host);
//! assert_eq!(segmented.frames().pager, Rect::new(0.0, 44.0, 300.0, 500.0));
//!
//! // Tap the middle segment; the pager follows.
//! segmented.tap_control(150.0, &mut host);
//! assert_eq!(segmented.current_index(), 1);
//! assert_eq!(segmented.control().selected_index(), Some(1));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod header;
mod host;
mod layout;
mod segmented;
mod source;
mod sync;

pub use header::ParallaxHeader;
pub use host::{
    DEFAULT_CONTROL_HEIGHT, PageCapabilities, SectionCapabilities, SegmentedHost, SegmentedPage,
    SegmentedPagerCapabilities, SegmentedPagerDataSource, SegmentedPagerDelegate, SubScrollView,
};
pub use layout::{
    ControlPosition, Frames, LayoutInput, Region, RegionFrame, compute_frames, toolbar_relayout,
};
pub use segmented::{ContentScroller, SegmentedPager, SegmentedPagerConfig};
pub use source::IdentifiedSections;
