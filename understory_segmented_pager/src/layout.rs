// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Region layout for the segmented pager.

use kurbo::{Insets, Point, Rect, Size};
use smallvec::SmallVec;

use crate::ParallaxHeader;

/// Where the segmented control sits relative to the pages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ControlPosition {
    /// Above the pages; the page area starts below the control and toolbar.
    #[default]
    Top,
    /// Below the pages; the page area starts at the top.
    Bottom,
    /// Floating above the content's origin, overlapping the header. The page
    /// area is not shrunk for the control or toolbar.
    TopOverlapping,
}

/// Inputs to [`compute_frames`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutInput {
    /// Bounds of the whole segmented pager.
    pub bounds: Size,
    /// Height of the segmented control.
    pub control_height: f64,
    /// Height of the toolbar under the control.
    pub toolbar_height: f64,
    /// Control position.
    pub position: ControlPosition,
    /// Insets around the control: `x0` left, `y0` top, `x1` right, `y1` bottom.
    pub insets: Insets,
    /// Header extent.
    pub header: ParallaxHeader,
}

/// The rectangles of every region.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Frames {
    /// The content scroller hosting the header, control, toolbar, and pages.
    pub content: Rect,
    /// The segmented control.
    pub control: Rect,
    /// The toolbar.
    pub toolbar: Rect,
    /// The page area.
    pub pager: Rect,
}

impl Frames {
    /// The frame of `region`.
    #[must_use]
    pub fn get(&self, region: Region) -> Rect {
        match region {
            Region::Content => self.content,
            Region::Control => self.control,
            Region::Toolbar => self.toolbar,
            Region::Pager => self.pager,
        }
    }
}

/// A laid-out region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    /// The content scroller.
    Content,
    /// The segmented control.
    Control,
    /// The toolbar.
    Toolbar,
    /// The page area.
    Pager,
}

/// A new frame for one region.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RegionFrame {
    /// Which region moves.
    pub region: Region,
    /// Its new frame.
    pub frame: Rect,
}

/// Computes every region's frame.
///
/// All frames are in the content scroller's coordinate space.
#[must_use]
pub fn compute_frames(input: &LayoutInput) -> Frames {
    let LayoutInput {
        bounds,
        control_height,
        toolbar_height,
        position,
        insets,
        header,
    } = *input;

    let content = Rect::from_origin_size(Point::ZERO, bounds);

    let control_y = match position {
        ControlPosition::Top => insets.y0,
        ControlPosition::Bottom => bounds.height - control_height - insets.y1,
        ControlPosition::TopOverlapping => -control_height,
    };
    let control = Rect::from_origin_size(
        Point::new(insets.x0, control_y),
        Size::new(bounds.width - insets.x0 - insets.x1, control_height),
    );

    let toolbar = Rect::from_origin_size(
        Point::new(0.0, control_height + insets.y0 + insets.y1),
        Size::new(bounds.width, toolbar_height),
    );

    let chrome = control_height + toolbar_height + insets.y0 + insets.y1;
    let (pager_y, mut pager_height) = match position {
        ControlPosition::Top => (chrome, bounds.height - chrome),
        ControlPosition::Bottom => (0.0, bounds.height - chrome),
        ControlPosition::TopOverlapping => (0.0, bounds.height),
    };
    pager_height = (pager_height - header.minimum_height).max(0.0);
    let pager = Rect::from_origin_size(
        Point::new(0.0, pager_y),
        Size::new(bounds.width, pager_height),
    );

    Frames {
        content,
        control,
        toolbar,
        pager,
    }
}

/// The frame updates for a toolbar height change, in application order.
///
/// A growing toolbar is placed before the page area shrinks; a shrinking one
/// after the page area grows, so the two never overlap or leave a gap in
/// between. Returns nothing when the height is unchanged.
#[must_use]
pub fn toolbar_relayout(input: &LayoutInput, new_height: f64) -> SmallVec<[RegionFrame; 2]> {
    let old_height = input.toolbar_height;
    let mut updates = SmallVec::new();
    if new_height == old_height {
        return updates;
    }
    let frames = compute_frames(&LayoutInput {
        toolbar_height: new_height,
        ..*input
    });
    let toolbar = RegionFrame {
        region: Region::Toolbar,
        frame: frames.toolbar,
    };
    let pager = RegionFrame {
        region: Region::Pager,
        frame: frames.pager,
    };
    if new_height > old_height {
        updates.extend([toolbar, pager]);
    } else {
        updates.extend([pager, toolbar]);
    }
    updates
}
