// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator traits for the pager: data source and delegate.

use kurbo::{Point, Size, Vec2};

use crate::ReuseRegistry;
use crate::capability::Optional;

/// Supplies the pager with its page count and page instances.
pub trait PagerDataSource<P> {
    /// Number of pages in the pager.
    fn number_of_pages(&mut self) -> usize;

    /// Produces the page for `index`.
    ///
    /// Implementations typically call [`ReuseRegistry::dequeue`] on `reuse` to
    /// recycle retired pages.
    fn page_at(&mut self, index: usize, reuse: &mut ReuseRegistry<P>) -> P;
}

bitflags::bitflags! {
    /// Hooks a [`PagerDelegate`] implements.
    ///
    /// Only hooks whose flag is returned from [`PagerDelegate::capabilities`]
    /// are called; the pager substitutes the documented default for the rest.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PagerCapabilities: u32 {
        /// [`PagerDelegate::will_move_to_page`].
        const WILL_MOVE_TO_PAGE = 1 << 0;
        /// [`PagerDelegate::did_move_to_page`].
        const DID_MOVE_TO_PAGE = 1 << 1;
        /// [`PagerDelegate::will_display_page`].
        const WILL_DISPLAY_PAGE = 1 << 2;
        /// [`PagerDelegate::did_end_displaying_page`].
        const DID_END_DISPLAYING_PAGE = 1 << 3;
        /// [`PagerDelegate::did_scroll`].
        const DID_SCROLL = 1 << 4;
        /// [`PagerDelegate::did_zoom`].
        const DID_ZOOM = 1 << 5;
        /// [`PagerDelegate::will_begin_dragging`].
        const WILL_BEGIN_DRAGGING = 1 << 6;
        /// [`PagerDelegate::will_end_dragging`].
        const WILL_END_DRAGGING = 1 << 7;
        /// [`PagerDelegate::did_end_dragging`].
        const DID_END_DRAGGING = 1 << 8;
        /// [`PagerDelegate::will_begin_decelerating`].
        const WILL_BEGIN_DECELERATING = 1 << 9;
        /// [`PagerDelegate::did_end_decelerating`].
        const DID_END_DECELERATING = 1 << 10;
        /// [`PagerDelegate::did_end_scrolling_animation`].
        const DID_END_SCROLLING_ANIMATION = 1 << 11;
        /// [`PagerDelegate::will_begin_zooming`].
        const WILL_BEGIN_ZOOMING = 1 << 12;
        /// [`PagerDelegate::did_end_zooming`].
        const DID_END_ZOOMING = 1 << 13;
        /// [`PagerDelegate::should_scroll_to_top`].
        const SHOULD_SCROLL_TO_TOP = 1 << 14;
        /// [`PagerDelegate::did_scroll_to_top`].
        const DID_SCROLL_TO_TOP = 1 << 15;
        /// [`PagerDelegate::did_change_adjusted_content_inset`].
        const DID_CHANGE_ADJUSTED_CONTENT_INSET = 1 << 16;
    }
}

/// Snapshot of the pager's scroll container handed to scroll hooks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollMetrics {
    /// Current content offset.
    pub content_offset: Point,
    /// Size of the scrollable content (`width * count` by `height`).
    pub content_size: Size,
    /// Size of the visible viewport.
    pub bounds: Size,
}

/// Observes page lifecycle and scroll events of a pager.
///
/// Every hook is optional. Implement the ones you need and declare them in
/// [`PagerDelegate::capabilities`].
#[expect(unused_variables, reason = "Default hook bodies ignore their arguments")]
pub trait PagerDelegate<P> {
    /// The hooks this delegate implements.
    fn capabilities(&self) -> PagerCapabilities {
        PagerCapabilities::empty()
    }

    /// The pager is about to move to `page` at `index`.
    fn will_move_to_page(&mut self, page: &mut P, index: usize) {}

    /// The pager finished moving to `page` at `index`.
    fn did_move_to_page(&mut self, page: &mut P, index: usize) {}

    /// `page` is about to be attached for `index`.
    fn will_display_page(&mut self, page: &mut P, index: usize) {}

    /// `page` was detached from `index`.
    fn did_end_displaying_page(&mut self, page: &mut P, index: usize) {}

    /// The content offset changed.
    fn did_scroll(&mut self, metrics: &ScrollMetrics) {}

    /// The zoom scale changed.
    fn did_zoom(&mut self, metrics: &ScrollMetrics) {}

    /// The user started dragging.
    fn will_begin_dragging(&mut self, metrics: &ScrollMetrics) {}

    /// The user lifted their finger; `target` may be adjusted.
    fn will_end_dragging(&mut self, metrics: &ScrollMetrics, velocity: Vec2, target: &mut Point) {}

    /// Dragging ended; `decelerate` is `true` if scrolling continues.
    fn did_end_dragging(&mut self, metrics: &ScrollMetrics, decelerate: bool) {}

    /// Deceleration is starting.
    fn will_begin_decelerating(&mut self, metrics: &ScrollMetrics) {}

    /// Deceleration came to rest.
    fn did_end_decelerating(&mut self, metrics: &ScrollMetrics) {}

    /// A programmatic animated scroll finished.
    fn did_end_scrolling_animation(&mut self, metrics: &ScrollMetrics) {}

    /// Zooming is starting.
    fn will_begin_zooming(&mut self, metrics: &ScrollMetrics) {}

    /// Zooming finished at `scale`.
    fn did_end_zooming(&mut self, metrics: &ScrollMetrics, scale: f64) {}

    /// Whether a scroll-to-top gesture is allowed.
    fn should_scroll_to_top(&mut self, metrics: &ScrollMetrics) -> bool {
        false
    }

    /// A scroll-to-top gesture finished.
    fn did_scroll_to_top(&mut self, metrics: &ScrollMetrics) {}

    /// The adjusted content inset changed.
    fn did_change_adjusted_content_inset(&mut self, metrics: &ScrollMetrics) {}
}

/// The collaborators a pager operation may consult.
///
/// Collaborators are borrowed per call rather than stored, so a composite
/// widget can act as both data source and delegate while owning the pager.
pub struct PagerHost<'a, P> {
    data_source: Option<&'a mut dyn PagerDataSource<P>>,
    delegate: Option<&'a mut dyn PagerDelegate<P>>,
}

impl<'a, P> PagerHost<'a, P> {
    /// A host with neither a data source nor a delegate.
    #[must_use]
    pub fn detached() -> Self {
        Self {
            data_source: None,
            delegate: None,
        }
    }

    /// Attaches a data source.
    #[must_use]
    pub fn with_data_source(mut self, data_source: &'a mut dyn PagerDataSource<P>) -> Self {
        self.data_source = Some(data_source);
        self
    }

    /// Attaches a delegate.
    #[must_use]
    pub fn with_delegate(mut self, delegate: &'a mut dyn PagerDelegate<P>) -> Self {
        self.delegate = Some(delegate);
        self
    }

    /// Returns `true` if a data source is attached.
    #[must_use]
    pub fn has_data_source(&self) -> bool {
        self.data_source.is_some()
    }

    pub(crate) fn data_source(&mut self) -> Option<&mut (dyn PagerDataSource<P> + 'a)> {
        self.data_source.as_deref_mut()
    }

    pub(crate) fn delegate(
        &mut self,
    ) -> Optional<'_, dyn PagerDelegate<P> + 'a, PagerCapabilities> {
        Optional::new(self.delegate.as_deref_mut(), |d| d.capabilities())
    }
}

impl<P> core::fmt::Debug for PagerHost<'_, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PagerHost")
            .field("data_source", &self.data_source.is_some())
            .field("delegate", &self.delegate.is_some())
            .finish()
    }
}
