// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Segmented Control: headless state for a segmented tab bar.
//!
//! A [`SegmentedControl`] holds its [`Section`]s, the selected segment (or
//! none), and the horizontal geometry of its segments. It does not measure or
//! draw: the host measures each segment's content, passes the widths to
//! [`SegmentedControl::layout`], and renders from
//! [`SegmentedControl::segment_rect`], [`SegmentedControl::display_title`] and
//! [`SegmentedControl::display_image`].
//!
//! Two selection paths exist:
//!
//! - [`SegmentedControl::set_selected_index`] is display-only. It is meant for
//!   mirroring a selection owned elsewhere and never reports a change, so
//!   re-asserting the current index is harmless.
//! - [`SegmentedControl::tap`] resolves a user tap and returns a
//!   [`TapOutcome`]; [`TapOutcome::Changed`] is the "value changed" event.
//!
//! ```rust
//! use understory_segmented_control::{
//!     Section, SegmentWidthStyle, SegmentedControl, SegmentedControlConfig, TapOutcome,
//! };
//!
//! let mut control = SegmentedControl::new(SegmentedControlConfig {
//!     width_style: SegmentWidthStyle::Fixed,
//!     ..SegmentedControlConfig::default()
//! });
//! control.set_sections(vec![Section::titled("Home"), Section::titled("Feed")]);
//! control.layout(200.0, &[]);
//!
//! assert_eq!(control.tap(150.0), TapOutcome::Changed(1));
//! assert_eq!(control.tap(150.0), TapOutcome::Reselected(1));
//!
//! // Mirroring a pager: display only, no outcome.
//! control.set_selected_index(Some(0), true);
//! assert_eq!(control.selected_index(), Some(0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod control;
mod section;

pub use control::{SegmentWidthStyle, SegmentedControl, SegmentedControlConfig, TapOutcome};
pub use section::{AttributedTitle, ImageId, Section, SegmentTitle, TitleStyle};
