// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The paging engine.

use alloc::collections::BTreeMap;
use core::ops::Range;

use kurbo::{Point, Rect, Size, Vec2};
use smallvec::SmallVec;

use crate::host::{PagerCapabilities, PagerHost, ScrollMetrics};
use crate::{Page, PageStrip, ReuseRegistry};

/// How the pager moves between pages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TransitionStyle {
    /// Free horizontal scrolling; the current page's neighbors stay loaded.
    #[default]
    Scroll,
    /// Programmatic navigation only; just the current page stays loaded and
    /// transitions are never animated.
    Tab,
}

/// Static configuration for a [`Pager`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PagerConfig {
    /// Transition style.
    pub transition_style: TransitionStyle,
    /// Horizontal space between adjacent pages, split evenly on both sides of
    /// each page.
    pub gutter_width: f64,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            transition_style: TransitionStyle::Scroll,
            gutter_width: 0.0,
        }
    }
}

/// A programmatic animated scroll whose completion signal is still pending.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollAnimation {
    /// Offset the scroll container is animating toward.
    pub target: Point,
    /// The page change awaiting "did move", or `None` if no page change is
    /// pending behind this scroll.
    pub page: Option<usize>,
}

/// A horizontally paged container that materializes pages lazily.
///
/// The pager owns the sparse mapping from index to page, the reuse queue, and
/// the current index. It never stores its collaborators: every operation that
/// may load pages or notify takes a [`PagerHost`].
///
/// Under [`TransitionStyle::Scroll`] the current page and its immediate
/// neighbors are kept loaded; under [`TransitionStyle::Tab`] only the current
/// page is.
pub struct Pager<P> {
    config: PagerConfig,
    bounds: Size,
    strip: PageStrip,
    index: usize,
    pages: BTreeMap<usize, P>,
    reuse: ReuseRegistry<P>,
    content_offset: Point,
    content_size: Size,
    animation: Option<ScrollAnimation>,
    scrolls_to_top: bool,
}

impl<P> core::fmt::Debug for Pager<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Pager")
            .field("config", &self.config)
            .field("bounds", &self.bounds)
            .field("count", &self.strip.len())
            .field("index", &self.index)
            .field("loaded", &self.pages.keys().collect::<SmallVec<[_; 3]>>())
            .field("content_offset", &self.content_offset)
            .field("animation", &self.animation)
            .finish_non_exhaustive()
    }
}

impl<P: Page> Default for Pager<P> {
    fn default() -> Self {
        Self::new(PagerConfig::default())
    }
}

impl<P: Page> Pager<P> {
    /// Creates an empty pager with zero bounds.
    #[must_use]
    pub fn new(config: PagerConfig) -> Self {
        Self {
            config,
            bounds: Size::ZERO,
            strip: PageStrip::new(0, 0.0),
            index: 0,
            pages: BTreeMap::new(),
            reuse: ReuseRegistry::new(),
            content_offset: Point::ZERO,
            content_size: Size::ZERO,
            animation: None,
            scrolls_to_top: false,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &PagerConfig {
        &self.config
    }

    /// Returns the transition style.
    #[must_use]
    pub fn transition_style(&self) -> TransitionStyle {
        self.config.transition_style
    }

    /// Changes the transition style.
    ///
    /// Takes effect for the next load or unload; already loaded neighbors stay
    /// until the next committed page change.
    pub fn set_transition_style(&mut self, style: TransitionStyle) {
        self.config.transition_style = style;
    }

    /// Whether the host should allow user drag scrolling.
    #[must_use]
    pub fn is_scroll_enabled(&self) -> bool {
        self.config.transition_style == TransitionStyle::Scroll
    }

    /// Returns the gutter width.
    #[must_use]
    pub fn gutter_width(&self) -> f64 {
        self.config.gutter_width
    }

    /// Changes the gutter width and re-frames loaded pages.
    pub fn set_gutter_width(&mut self, gutter_width: f64) {
        self.config.gutter_width = gutter_width.max(0.0);
        self.layout_loaded_pages();
    }

    /// Whether the pager itself responds to scroll-to-top gestures.
    ///
    /// Used as the answer to [`Pager::should_scroll_to_top`] when the delegate
    /// has no opinion.
    #[must_use]
    pub fn scrolls_to_top(&self) -> bool {
        self.scrolls_to_top
    }

    /// Sets the pager's own scroll-to-top flag.
    pub fn set_scrolls_to_top(&mut self, scrolls_to_top: bool) {
        self.scrolls_to_top = scrolls_to_top;
    }

    /// Number of pages reported by the data source at the last reload.
    #[must_use]
    pub fn count(&self) -> usize {
        self.strip.len()
    }

    /// The current page index.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.index
    }

    /// Viewport size from the last layout.
    #[must_use]
    pub fn bounds(&self) -> Size {
        self.bounds
    }

    /// Current content offset of the scroll container.
    #[must_use]
    pub fn content_offset(&self) -> Point {
        self.content_offset
    }

    /// Size of the scrollable content.
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    /// The animated scroll awaiting [`Pager::did_end_scrolling_animation`].
    #[must_use]
    pub fn pending_animation(&self) -> Option<ScrollAnimation> {
        self.animation
    }

    /// Scroll position in pages, e.g. `1.5` halfway between pages 1 and 2.
    ///
    /// Returns 0 when the page width is 0.
    #[must_use]
    pub fn progress(&self) -> f64 {
        let width = self.strip.page_width();
        if width > 0.0 {
            self.content_offset.x / width
        } else {
            0.0
        }
    }

    /// The page at the current index, if loaded.
    #[must_use]
    pub fn selected_page(&self) -> Option<&P> {
        self.pages.get(&self.index)
    }

    /// Mutable access to the page at the current index, if loaded.
    pub fn selected_page_mut(&mut self) -> Option<&mut P> {
        self.pages.get_mut(&self.index)
    }

    /// The page at `index`, if loaded. Never loads.
    #[must_use]
    pub fn page(&self, index: usize) -> Option<&P> {
        self.pages.get(&index)
    }

    /// Mutable access to the page at `index`, if loaded. Never loads.
    pub fn page_mut(&mut self, index: usize) -> Option<&mut P> {
        self.pages.get_mut(&index)
    }

    /// Indices of the loaded pages, ascending.
    pub fn loaded_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.pages.keys().copied()
    }

    /// The registration table and reuse queue.
    #[must_use]
    pub fn reuse(&self) -> &ReuseRegistry<P> {
        &self.reuse
    }

    /// Mutable access to the registration table and reuse queue.
    pub fn reuse_mut(&mut self) -> &mut ReuseRegistry<P> {
        &mut self.reuse
    }

    /// Shorthand for [`ReuseRegistry::dequeue`].
    pub fn dequeue_reusable_page(&mut self, identifier: &str) -> Option<P> {
        self.reuse.dequeue(identifier)
    }

    /// Snapshot handed to the delegate's scroll hooks.
    #[must_use]
    pub fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics {
            content_offset: self.content_offset,
            content_size: self.content_size,
            bounds: self.bounds,
        }
    }

    /// The frame of page `index` within the scrollable content.
    #[must_use]
    pub fn frame_for(&self, index: usize) -> Rect {
        let width = self.strip.page_width();
        let x = self.strip.offset_of(index);
        let inset = (self.config.gutter_width * 0.5).min(width * 0.5);
        Rect::new(x + inset, 0.0, x + width - inset, self.bounds.height)
    }

    /// Discards every loaded page and rebuilds from the data source.
    ///
    /// Loaded pages are detached without being queued for reuse. The current
    /// index is clamped to the new count. Without a data source the pager
    /// becomes empty.
    pub fn reload(&mut self, host: &mut PagerHost<'_, P>) {
        for (_, mut page) in core::mem::take(&mut self.pages) {
            page.did_detach();
        }
        self.animation = None;

        let count = host.data_source().map_or(0, |ds| ds.number_of_pages());
        self.strip.set_len(count);
        if count > 0 {
            self.index = self.index.min(count - 1);
            self.load_page(self.index, host);
        } else {
            self.index = 0;
        }
        tracing::debug!(target: "understory_pager", count, index = self.index, "reloaded pager");
    }

    /// Applies new viewport bounds.
    ///
    /// Reloads first if the pager is empty. When the content size changes, the
    /// offset snaps to the current page (without lifecycle events) and loaded
    /// pages are re-framed.
    pub fn layout(&mut self, bounds: Size, host: &mut PagerHost<'_, P>) {
        self.bounds = bounds;
        self.strip.set_page_width(bounds.width);
        if self.count() == 0 {
            self.reload(host);
        }

        let size = Size::new(self.strip.total_extent(), bounds.height);
        if size != self.content_size {
            self.content_size = size;
            self.content_offset = Point::new(self.strip.offset_of(self.index), 0.0);
            self.layout_loaded_pages();
        }
    }

    /// Navigates to page `index`.
    ///
    /// Does nothing if `index` is out of range or already current. Under
    /// [`TransitionStyle::Tab`] the change is never animated.
    pub fn show_page(&mut self, index: usize, animated: bool, host: &mut PagerHost<'_, P>) {
        if index >= self.count() || index == self.index {
            return;
        }
        self.index = index;
        let animated = animated && self.config.transition_style == TransitionStyle::Scroll;
        let target = Point::new(self.strip.offset_of(index), 0.0);
        self.commit_page_change(index, target, animated, host);
    }

    /// Moves the scroll container.
    ///
    /// An offset landing exactly on a page boundary commits a page change: the
    /// target page gets "will move" (loading it first) and, unless `animated`,
    /// "did move" immediately. Animated changes defer "did move" to
    /// [`Pager::did_end_scrolling_animation`]. Any other offset is a sub-page
    /// scroll with no lifecycle events; an animated one keeps whatever page
    /// change is still awaiting its "did move".
    pub fn set_content_offset(
        &mut self,
        offset: Point,
        animated: bool,
        host: &mut PagerHost<'_, P>,
    ) {
        match self.strip.aligned_index(offset.x) {
            Some(index) if index < self.count() => {
                self.commit_page_change(index, offset, animated, host);
            }
            _ => {
                tracing::trace!(target: "understory_pager", x = offset.x, animated, "sub-page scroll");
                if animated {
                    let page = self.animation.and_then(|pending| pending.page);
                    self.animation = Some(ScrollAnimation {
                        target: offset,
                        page,
                    });
                } else {
                    self.content_offset = offset;
                }
            }
        }
    }

    fn commit_page_change(
        &mut self,
        index: usize,
        offset: Point,
        animated: bool,
        host: &mut PagerHost<'_, P>,
    ) {
        self.will_move_page(index, host);
        self.index = index;
        tracing::debug!(target: "understory_pager", index, animated, "committed page change");
        if animated {
            // Replaces any in-flight animation; its completion reports the latest index.
            self.animation = Some(ScrollAnimation {
                target: offset,
                page: Some(index),
            });
        } else {
            self.animation = None;
            self.content_offset = offset;
            self.did_move_page(index, host);
        }
    }

    fn will_move_page(&mut self, index: usize, host: &mut PagerHost<'_, P>) {
        self.load_page(index, host);
        if let Some(page) = self.pages.get_mut(&index) {
            host.delegate()
                .notify(PagerCapabilities::WILL_MOVE_TO_PAGE, |d| {
                    d.will_move_to_page(page, index);
                });
        }
    }

    fn did_move_page(&mut self, index: usize, host: &mut PagerHost<'_, P>) {
        if let Some(page) = self.pages.get_mut(&index) {
            host.delegate()
                .notify(PagerCapabilities::DID_MOVE_TO_PAGE, |d| {
                    d.did_move_to_page(page, index);
                });
        }
        self.unload_hidden_pages(host);
    }

    /// The indices kept loaded around `index`: its neighbors too when
    /// scrolling, otherwise just `index`.
    fn window(&self, index: usize) -> Range<usize> {
        match self.config.transition_style {
            TransitionStyle::Scroll => self.strip.neighborhood(index),
            TransitionStyle::Tab => index..index + 1,
        }
    }

    /// Materializes `index`, then the rest of its window.
    fn load_page(&mut self, index: usize, host: &mut PagerHost<'_, P>) {
        self.materialize(index, host);
        for neighbor in self.window(index) {
            self.materialize(neighbor, host);
        }
    }

    fn materialize(&mut self, index: usize, host: &mut PagerHost<'_, P>) {
        if index >= self.count() || self.pages.contains_key(&index) {
            return;
        }
        let Some(data_source) = host.data_source() else {
            return;
        };
        let mut page = data_source.page_at(index, &mut self.reuse);
        page.set_frame(self.frame_for(index));
        host.delegate()
            .notify(PagerCapabilities::WILL_DISPLAY_PAGE, |d| {
                d.will_display_page(&mut page, index);
            });
        page.did_attach();
        self.pages.insert(index, page);
        tracing::debug!(target: "understory_pager", index, "loaded page");
    }

    fn unload_hidden_pages(&mut self, host: &mut PagerHost<'_, P>) {
        let window = self.window(self.index);
        let hidden: SmallVec<[usize; 4]> = self
            .pages
            .keys()
            .copied()
            .filter(|index| !window.contains(index))
            .collect();

        for index in hidden {
            let Some(mut page) = self.pages.remove(&index) else {
                continue;
            };
            page.did_detach();
            host.delegate()
                .notify(PagerCapabilities::DID_END_DISPLAYING_PAGE, |d| {
                    d.did_end_displaying_page(&mut page, index);
                });
            let queued = self.reuse.recycle(page);
            tracing::debug!(target: "understory_pager", index, queued, "unloaded page");
        }
    }

    fn layout_loaded_pages(&mut self) {
        let frames: SmallVec<[(usize, Rect); 4]> = self
            .pages
            .keys()
            .map(|&index| (index, self.frame_for(index)))
            .collect();
        for (index, frame) in frames {
            if let Some(page) = self.pages.get_mut(&index) {
                page.set_frame(frame);
            }
        }
    }

    // --- Scroll container signals ---

    /// The scroll container's offset changed, typically during a drag.
    pub fn did_scroll(&mut self, offset: Point, host: &mut PagerHost<'_, P>) {
        self.content_offset = offset;
        let metrics = self.metrics();
        host.delegate()
            .notify(PagerCapabilities::DID_SCROLL, |d| d.did_scroll(&metrics));
    }

    /// The user started dragging.
    pub fn will_begin_dragging(&mut self, host: &mut PagerHost<'_, P>) {
        let metrics = self.metrics();
        host.delegate()
            .notify(PagerCapabilities::WILL_BEGIN_DRAGGING, |d| {
                d.will_begin_dragging(&metrics);
            });
    }

    /// The user lifted their finger; the container will settle at `target`.
    ///
    /// Fires "will move" for the page under `target` before forwarding to the
    /// delegate, which may still adjust `target`.
    pub fn will_end_dragging(
        &mut self,
        velocity: Vec2,
        target: &mut Point,
        host: &mut PagerHost<'_, P>,
    ) {
        if let Some(index) = self.strip.index_at_offset(target.x)
            && index < self.count()
        {
            self.will_move_page(index, host);
        }
        let metrics = self.metrics();
        host.delegate()
            .notify(PagerCapabilities::WILL_END_DRAGGING, |d| {
                d.will_end_dragging(&metrics, velocity, target);
            });
    }

    /// Dragging ended.
    pub fn did_end_dragging(&mut self, decelerate: bool, host: &mut PagerHost<'_, P>) {
        let metrics = self.metrics();
        host.delegate()
            .notify(PagerCapabilities::DID_END_DRAGGING, |d| {
                d.did_end_dragging(&metrics, decelerate);
            });
    }

    /// Deceleration is starting.
    pub fn will_begin_decelerating(&mut self, host: &mut PagerHost<'_, P>) {
        let metrics = self.metrics();
        host.delegate()
            .notify(PagerCapabilities::WILL_BEGIN_DECELERATING, |d| {
                d.will_begin_decelerating(&metrics);
            });
    }

    /// Deceleration came to rest; commits the page under the offset.
    pub fn did_end_decelerating(&mut self, host: &mut PagerHost<'_, P>) {
        if let Some(index) = self.strip.index_at_offset(self.content_offset.x)
            && index < self.count()
        {
            self.index = index;
            self.animation = None;
            self.did_move_page(index, host);
        }
        let metrics = self.metrics();
        host.delegate()
            .notify(PagerCapabilities::DID_END_DECELERATING, |d| {
                d.did_end_decelerating(&metrics);
            });
    }

    /// A programmatic animated scroll finished.
    ///
    /// Fires the deferred "did move" for the current index. If several
    /// animated changes were issued, only the latest is reported; a change
    /// committed since without animation (directly or by deceleration)
    /// cancels it. A signal with no animation pending is ignored apart from
    /// the delegate hook.
    pub fn did_end_scrolling_animation(&mut self, host: &mut PagerHost<'_, P>) {
        match self.animation.take() {
            Some(animation) => {
                self.content_offset = animation.target;
                if let Some(index) = animation.page {
                    self.did_move_page(index, host);
                }
            }
            None => {
                tracing::warn!(target: "understory_pager", "scroll animation ended with none pending");
            }
        }
        let metrics = self.metrics();
        host.delegate()
            .notify(PagerCapabilities::DID_END_SCROLLING_ANIMATION, |d| {
                d.did_end_scrolling_animation(&metrics);
            });
    }

    /// The zoom scale changed.
    pub fn did_zoom(&mut self, host: &mut PagerHost<'_, P>) {
        let metrics = self.metrics();
        host.delegate()
            .notify(PagerCapabilities::DID_ZOOM, |d| d.did_zoom(&metrics));
    }

    /// Zooming is starting.
    pub fn will_begin_zooming(&mut self, host: &mut PagerHost<'_, P>) {
        let metrics = self.metrics();
        host.delegate()
            .notify(PagerCapabilities::WILL_BEGIN_ZOOMING, |d| {
                d.will_begin_zooming(&metrics);
            });
    }

    /// Zooming finished at `scale`.
    pub fn did_end_zooming(&mut self, scale: f64, host: &mut PagerHost<'_, P>) {
        let metrics = self.metrics();
        host.delegate()
            .notify(PagerCapabilities::DID_END_ZOOMING, |d| {
                d.did_end_zooming(&metrics, scale);
            });
    }

    /// Whether a scroll-to-top gesture should be honored.
    pub fn should_scroll_to_top(&mut self, host: &mut PagerHost<'_, P>) -> bool {
        let metrics = self.metrics();
        host.delegate().invoke(
            PagerCapabilities::SHOULD_SCROLL_TO_TOP,
            self.scrolls_to_top,
            |d| d.should_scroll_to_top(&metrics),
        )
    }

    /// A scroll-to-top gesture finished.
    pub fn did_scroll_to_top(&mut self, host: &mut PagerHost<'_, P>) {
        let metrics = self.metrics();
        host.delegate()
            .notify(PagerCapabilities::DID_SCROLL_TO_TOP, |d| {
                d.did_scroll_to_top(&metrics);
            });
    }

    /// The adjusted content inset changed.
    pub fn did_change_adjusted_content_inset(&mut self, host: &mut PagerHost<'_, P>) {
        let metrics = self.metrics();
        host.delegate()
            .notify(PagerCapabilities::DID_CHANGE_ADJUSTED_CONTENT_INSET, |d| {
                d.did_change_adjusted_content_inset(&metrics);
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{PagerDataSource, PagerDelegate};
    use crate::{Misuse, MisuseHook};
    use alloc::rc::Rc;
    use alloc::string::{String, ToString};
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::RefCell;

    #[derive(Clone, Debug, Default)]
    struct TestPage {
        id: u32,
        reuse_id: Option<String>,
        frame: Rect,
        attached: bool,
        resets: u32,
    }

    impl Page for TestPage {
        fn reuse_identifier(&self) -> Option<&str> {
            self.reuse_id.as_deref()
        }
        fn set_reuse_identifier(&mut self, identifier: &str) {
            self.reuse_id = Some(identifier.to_string());
        }
        fn prepare_for_reuse(&mut self) {
            self.resets += 1;
        }
        fn set_frame(&mut self, frame: Rect) {
            self.frame = frame;
        }
        fn did_attach(&mut self) {
            self.attached = true;
        }
        fn did_detach(&mut self) {
            self.attached = false;
        }
    }

    /// Dequeues "X" pages and stamps fresh ones with a serial id.
    struct Source {
        count: usize,
        next_id: u32,
    }

    impl Source {
        fn new(count: usize) -> Self {
            Self { count, next_id: 0 }
        }
    }

    impl PagerDataSource<TestPage> for Source {
        fn number_of_pages(&mut self) -> usize {
            self.count
        }
        fn page_at(&mut self, _index: usize, reuse: &mut ReuseRegistry<TestPage>) -> TestPage {
            let mut page = reuse.dequeue("X").unwrap_or_default();
            if page.id == 0 {
                self.next_id += 1;
                page.id = self.next_id;
            }
            page
        }
    }

    #[derive(Clone, Debug, PartialEq)]
    enum Event {
        WillMove(usize),
        DidMove(usize),
        WillDisplay(usize),
        DidEndDisplaying(usize),
        Scroll,
        EndDragging(bool),
        EndAnimation,
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<Event>,
    }

    impl Recorder {
        fn take(&mut self) -> Vec<Event> {
            core::mem::take(&mut self.events)
        }
    }

    impl PagerDelegate<TestPage> for Recorder {
        fn capabilities(&self) -> PagerCapabilities {
            PagerCapabilities::all() - PagerCapabilities::SHOULD_SCROLL_TO_TOP
        }
        fn will_move_to_page(&mut self, _: &mut TestPage, index: usize) {
            self.events.push(Event::WillMove(index));
        }
        fn did_move_to_page(&mut self, _: &mut TestPage, index: usize) {
            self.events.push(Event::DidMove(index));
        }
        fn will_display_page(&mut self, _: &mut TestPage, index: usize) {
            self.events.push(Event::WillDisplay(index));
        }
        fn did_end_displaying_page(&mut self, _: &mut TestPage, index: usize) {
            self.events.push(Event::DidEndDisplaying(index));
        }
        fn did_scroll(&mut self, _: &ScrollMetrics) {
            self.events.push(Event::Scroll);
        }
        fn did_end_dragging(&mut self, _: &ScrollMetrics, decelerate: bool) {
            self.events.push(Event::EndDragging(decelerate));
        }
        fn did_end_scrolling_animation(&mut self, _: &ScrollMetrics) {
            self.events.push(Event::EndAnimation);
        }
    }

    const BOUNDS: Size = Size::new(100.0, 200.0);

    fn pager(style: TransitionStyle) -> Pager<TestPage> {
        let mut pager = Pager::new(PagerConfig {
            transition_style: style,
            ..PagerConfig::default()
        });
        pager
            .reuse_mut()
            .register_constructor("X", TestPage::default);
        pager
    }

    fn loaded(pager: &Pager<TestPage>) -> Vec<usize> {
        pager.loaded_indices().collect()
    }

    #[test]
    fn reload_loads_current_and_neighbors_when_scrolling() {
        let mut pager = pager(TransitionStyle::Scroll);
        let mut source = Source::new(5);
        let mut host = PagerHost::detached().with_data_source(&mut source);
        pager.layout(BOUNDS, &mut host);
        assert_eq!(pager.count(), 5);
        assert_eq!(loaded(&pager), [0, 1]);

        pager.show_page(2, false, &mut host);
        assert_eq!(loaded(&pager), [1, 2, 3]);
        assert_eq!(pager.content_offset(), Point::new(200.0, 0.0));
        assert!(pager.selected_page().is_some_and(|p| p.attached));
    }

    #[test]
    fn tab_style_keeps_only_the_current_page() {
        let mut pager = pager(TransitionStyle::Tab);
        let mut source = Source::new(4);
        let mut host = PagerHost::detached().with_data_source(&mut source);
        pager.layout(BOUNDS, &mut host);
        assert_eq!(loaded(&pager), [0]);
        assert!(!pager.is_scroll_enabled());

        pager.show_page(3, true, &mut host);
        assert_eq!(loaded(&pager), [3]);
        assert_eq!(pager.pending_animation(), None, "tab style never animates");
    }

    #[test]
    fn show_page_materializes_every_valid_index() {
        for style in [TransitionStyle::Scroll, TransitionStyle::Tab] {
            let mut pager = pager(style);
            let mut source = Source::new(6);
            let mut host = PagerHost::detached().with_data_source(&mut source);
            pager.layout(BOUNDS, &mut host);
            for i in [5, 0, 3, 4, 1, 2] {
                pager.show_page(i, false, &mut host);
                assert_eq!(pager.current_index(), i);
                assert!(pager.page(i).is_some(), "page {i} loaded under {style:?}");
            }
        }
    }

    #[test]
    fn same_or_out_of_range_index_is_a_no_op() {
        let mut pager = pager(TransitionStyle::Scroll);
        let mut source = Source::new(3);
        let mut recorder = Recorder::default();
        let mut host = PagerHost::detached()
            .with_data_source(&mut source)
            .with_delegate(&mut recorder);
        pager.layout(BOUNDS, &mut host);
        pager.show_page(1, false, &mut host);
        drop(host);
        recorder.take();

        let mut host = PagerHost::detached()
            .with_data_source(&mut source)
            .with_delegate(&mut recorder);
        pager.show_page(1, false, &mut host);
        pager.show_page(3, false, &mut host);
        pager.show_page(99, true, &mut host);
        drop(host);
        assert_eq!(pager.current_index(), 1);
        assert!(recorder.events.is_empty(), "{:?}", recorder.events);
    }

    #[test]
    fn lifecycle_events_are_ordered() {
        let mut pager = pager(TransitionStyle::Scroll);
        let mut source = Source::new(5);
        let mut recorder = Recorder::default();
        let mut host = PagerHost::detached()
            .with_data_source(&mut source)
            .with_delegate(&mut recorder);
        pager.layout(BOUNDS, &mut host);
        pager.show_page(3, false, &mut host);
        drop(host);
        assert_eq!(
            recorder.take(),
            [
                Event::WillDisplay(0),
                Event::WillDisplay(1),
                Event::WillDisplay(3),
                Event::WillDisplay(2),
                Event::WillDisplay(4),
                Event::WillMove(3),
                Event::DidMove(3),
                Event::DidEndDisplaying(0),
                Event::DidEndDisplaying(1),
            ]
        );
    }

    #[test]
    fn shrinking_reload_clamps_the_index() {
        let mut pager = pager(TransitionStyle::Scroll);
        let mut source = Source::new(8);
        let mut host = PagerHost::detached().with_data_source(&mut source);
        pager.layout(BOUNDS, &mut host);
        pager.show_page(7, false, &mut host);
        drop(host);

        source.count = 3;
        let mut host = PagerHost::detached().with_data_source(&mut source);
        pager.reload(&mut host);
        assert_eq!(pager.current_index(), 2);
        assert_eq!(loaded(&pager), [1, 2]);
    }

    #[test]
    fn reload_detaches_without_queueing() {
        let mut pager = pager(TransitionStyle::Scroll);
        let mut source = Source::new(4);
        let mut host = PagerHost::detached().with_data_source(&mut source);
        pager.layout(BOUNDS, &mut host);
        pager.show_page(3, false, &mut host);
        let queued = pager.reuse().queued_len();
        assert_eq!(queued, 2);

        pager.reload(&mut PagerHost::detached());
        assert_eq!(pager.count(), 0);
        assert_eq!(pager.current_index(), 0);
        assert_eq!(pager.reuse().queued_len(), queued);
    }

    #[test]
    fn missing_data_source_leaves_the_pager_empty() {
        let mut pager = pager(TransitionStyle::Scroll);
        let mut host = PagerHost::detached();
        pager.layout(BOUNDS, &mut host);
        assert_eq!(pager.count(), 0);
        assert!(pager.selected_page().is_none());
        pager.show_page(0, false, &mut host);
        assert_eq!(loaded(&pager), Vec::<usize>::new());
    }

    #[test]
    fn evicted_pages_are_reused_by_identity() {
        let mut pager = pager(TransitionStyle::Tab);
        let mut source = Source::new(3);
        let mut host = PagerHost::detached().with_data_source(&mut source);
        pager.layout(BOUNDS, &mut host);
        let first = pager.page(0).map(|p| p.id);

        pager.show_page(1, false, &mut host);
        assert!(pager.page(0).is_none());
        assert_eq!(pager.reuse().queued_len(), 1);
        assert_eq!(pager.reuse().queued().next().map(|p| p.id), first);

        let page = pager.dequeue_reusable_page("X");
        assert_eq!(page.as_ref().map(|p| p.id), first);
        assert_eq!(page.map(|p| p.resets), Some(1));
        assert_eq!(pager.reuse().queued_len(), 0);
    }

    #[test]
    fn navigation_recycles_into_new_slots() {
        let mut pager = pager(TransitionStyle::Tab);
        let mut source = Source::new(3);
        let mut host = PagerHost::detached().with_data_source(&mut source);
        pager.layout(BOUNDS, &mut host);
        let first = pager.page(0).map(|p| p.id);
        pager.show_page(1, false, &mut host);
        pager.show_page(2, false, &mut host);
        drop(host);
        assert_eq!(pager.page(2).map(|p| p.id), first, "page 2 reuses page 0");
        assert_eq!(source.next_id, 2);
    }

    #[test]
    fn unregistered_dequeue_reports_misuse() {
        let reports = Rc::new(RefCell::new(Vec::new()));
        let sink = reports.clone();
        let mut pager: Pager<TestPage> = Pager::default();
        pager
            .reuse_mut()
            .set_misuse_hook(MisuseHook::new(move |m| sink.borrow_mut().push(m.clone())));
        assert!(pager.dequeue_reusable_page("Y").is_none());
        assert_eq!(
            *reports.borrow(),
            vec![Misuse::UnregisteredIdentifier {
                identifier: "Y".into()
            }]
        );
    }

    #[test]
    fn animated_change_defers_did_move() {
        let mut pager = pager(TransitionStyle::Scroll);
        let mut source = Source::new(4);
        let mut recorder = Recorder::default();
        let mut host = PagerHost::detached()
            .with_data_source(&mut source)
            .with_delegate(&mut recorder);
        pager.layout(BOUNDS, &mut host);
        pager.show_page(1, true, &mut host);
        assert_eq!(pager.current_index(), 1);
        assert_eq!(pager.content_offset(), Point::ZERO);
        assert!(pager.pending_animation().is_some());
        drop(host);
        assert!(!recorder.take().contains(&Event::DidMove(1)));

        let mut host = PagerHost::detached()
            .with_data_source(&mut source)
            .with_delegate(&mut recorder);
        pager.did_end_scrolling_animation(&mut host);
        drop(host);
        assert_eq!(recorder.take(), [Event::DidMove(1), Event::EndAnimation]);
        assert_eq!(pager.content_offset(), Point::new(100.0, 0.0));
    }

    #[test]
    fn superseded_animation_reports_only_the_latest_index() {
        let mut pager = pager(TransitionStyle::Scroll);
        let mut source = Source::new(5);
        let mut recorder = Recorder::default();
        let mut host = PagerHost::detached()
            .with_data_source(&mut source)
            .with_delegate(&mut recorder);
        pager.layout(BOUNDS, &mut host);
        pager.show_page(1, true, &mut host);
        pager.show_page(3, true, &mut host);
        drop(host);
        recorder.take();

        let mut host = PagerHost::detached()
            .with_data_source(&mut source)
            .with_delegate(&mut recorder);
        pager.did_end_scrolling_animation(&mut host);
        pager.did_end_scrolling_animation(&mut host);
        drop(host);
        let events = recorder.take();
        let moves: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, Event::DidMove(_)))
            .collect();
        assert_eq!(moves, [&Event::DidMove(3)]);
        assert_eq!(events.last(), Some(&Event::EndAnimation));
        assert_eq!(loaded(&pager), [2, 3, 4]);
    }

    #[test]
    fn direct_change_cancels_a_pending_animation() {
        let mut pager = pager(TransitionStyle::Scroll);
        let mut source = Source::new(5);
        let mut recorder = Recorder::default();
        let mut host = PagerHost::detached()
            .with_data_source(&mut source)
            .with_delegate(&mut recorder);
        pager.layout(BOUNDS, &mut host);
        pager.show_page(2, true, &mut host);
        pager.show_page(1, false, &mut host);
        assert_eq!(pager.pending_animation(), None);
        drop(host);
        recorder.take();

        let mut host = PagerHost::detached()
            .with_data_source(&mut source)
            .with_delegate(&mut recorder);
        pager.did_end_scrolling_animation(&mut host);
        drop(host);
        assert_eq!(recorder.take(), [Event::EndAnimation]);
        assert_eq!(pager.current_index(), 1);
        assert_eq!(pager.content_offset(), Point::new(100.0, 0.0));
    }

    #[test]
    fn deceleration_cancels_a_pending_animation() {
        let mut pager = pager(TransitionStyle::Scroll);
        let mut source = Source::new(5);
        let mut recorder = Recorder::default();
        let mut host = PagerHost::detached()
            .with_data_source(&mut source)
            .with_delegate(&mut recorder);
        pager.layout(BOUNDS, &mut host);
        pager.show_page(3, true, &mut host);
        pager.did_scroll(Point::new(100.0, 0.0), &mut host);
        pager.did_end_decelerating(&mut host);
        drop(host);
        recorder.take();

        let mut host = PagerHost::detached()
            .with_data_source(&mut source)
            .with_delegate(&mut recorder);
        pager.did_end_scrolling_animation(&mut host);
        drop(host);
        assert_eq!(recorder.take(), [Event::EndAnimation]);
        assert_eq!(pager.current_index(), 1);
        assert_eq!(pager.content_offset(), Point::new(100.0, 0.0));
    }

    #[test]
    fn sub_page_animation_keeps_the_pending_page_change() {
        let mut pager = pager(TransitionStyle::Scroll);
        let mut source = Source::new(5);
        let mut recorder = Recorder::default();
        let mut host = PagerHost::detached()
            .with_data_source(&mut source)
            .with_delegate(&mut recorder);
        pager.layout(BOUNDS, &mut host);
        pager.show_page(3, true, &mut host);
        pager.set_content_offset(Point::new(350.0, 0.0), true, &mut host);
        drop(host);
        recorder.take();

        let mut host = PagerHost::detached()
            .with_data_source(&mut source)
            .with_delegate(&mut recorder);
        pager.did_end_scrolling_animation(&mut host);
        drop(host);
        assert_eq!(
            recorder.take(),
            [
                Event::DidMove(3),
                Event::DidEndDisplaying(0),
                Event::DidEndDisplaying(1),
                Event::EndAnimation,
            ]
        );
        assert_eq!(loaded(&pager), [2, 3, 4]);
        assert_eq!(pager.content_offset(), Point::new(350.0, 0.0));
    }

    #[test]
    fn sub_page_offsets_fire_no_lifecycle() {
        let mut pager = pager(TransitionStyle::Scroll);
        let mut source = Source::new(3);
        let mut recorder = Recorder::default();
        let mut host = PagerHost::detached()
            .with_data_source(&mut source)
            .with_delegate(&mut recorder);
        pager.layout(BOUNDS, &mut host);
        drop(host);
        recorder.take();

        let mut host = PagerHost::detached()
            .with_data_source(&mut source)
            .with_delegate(&mut recorder);
        pager.set_content_offset(Point::new(150.0, 0.0), false, &mut host);
        drop(host);
        assert!(recorder.events.is_empty());
        assert_eq!(pager.current_index(), 0);
        assert_eq!(pager.progress(), 1.5);
    }

    #[test]
    fn aligned_offset_commits_a_page_change() {
        let mut pager = pager(TransitionStyle::Scroll);
        let mut source = Source::new(3);
        let mut recorder = Recorder::default();
        let mut host = PagerHost::detached()
            .with_data_source(&mut source)
            .with_delegate(&mut recorder);
        pager.layout(BOUNDS, &mut host);
        pager.set_content_offset(Point::new(200.0, 0.0), false, &mut host);
        drop(host);
        assert_eq!(pager.current_index(), 2);
        let events = recorder.take();
        assert!(events.ends_with(&[Event::WillMove(2), Event::DidMove(2), Event::DidEndDisplaying(0)]));
    }

    #[test]
    fn drag_and_deceleration_commit_the_settled_page() {
        let mut pager = pager(TransitionStyle::Scroll);
        let mut source = Source::new(4);
        let mut recorder = Recorder::default();
        let mut host = PagerHost::detached()
            .with_data_source(&mut source)
            .with_delegate(&mut recorder);
        pager.layout(BOUNDS, &mut host);
        drop(host);
        recorder.take();

        let mut host = PagerHost::detached()
            .with_data_source(&mut source)
            .with_delegate(&mut recorder);
        pager.will_begin_dragging(&mut host);
        pager.did_scroll(Point::new(60.0, 0.0), &mut host);
        let mut target = Point::new(100.0, 0.0);
        pager.will_end_dragging(Vec2::new(-2.0, 0.0), &mut target, &mut host);
        pager.did_end_dragging(true, &mut host);
        pager.did_scroll(Point::new(100.0, 0.0), &mut host);
        pager.did_end_decelerating(&mut host);
        drop(host);

        assert_eq!(pager.current_index(), 1);
        assert_eq!(
            recorder.take(),
            [
                Event::Scroll,
                Event::WillDisplay(2),
                Event::WillMove(1),
                Event::EndDragging(true),
                Event::Scroll,
                Event::DidMove(1),
            ]
        );
        assert_eq!(loaded(&pager), [0, 1, 2]);
    }

    #[test]
    fn layout_sizes_content_and_snaps_offset() {
        let mut pager = pager(TransitionStyle::Scroll);
        let mut source = Source::new(4);
        let mut host = PagerHost::detached().with_data_source(&mut source);
        pager.layout(BOUNDS, &mut host);
        assert_eq!(pager.content_size(), Size::new(400.0, 200.0));
        pager.show_page(2, false, &mut host);

        pager.layout(Size::new(50.0, 80.0), &mut host);
        assert_eq!(pager.content_size(), Size::new(200.0, 80.0));
        assert_eq!(pager.content_offset(), Point::new(100.0, 0.0));
        assert_eq!(pager.page(2).map(|p| p.frame), Some(Rect::new(100.0, 0.0, 150.0, 80.0)));
        assert_eq!(pager.progress(), 2.0);
    }

    #[test]
    fn gutter_insets_each_page() {
        let mut pager = pager(TransitionStyle::Scroll);
        let mut source = Source::new(2);
        let mut host = PagerHost::detached().with_data_source(&mut source);
        pager.layout(BOUNDS, &mut host);
        pager.set_gutter_width(10.0);
        assert_eq!(pager.page(0).map(|p| p.frame), Some(Rect::new(5.0, 0.0, 95.0, 200.0)));
        assert_eq!(pager.page(1).map(|p| p.frame), Some(Rect::new(105.0, 0.0, 195.0, 200.0)));
    }

    #[test]
    fn scroll_to_top_defaults_to_the_pager_flag() {
        let mut pager: Pager<TestPage> = Pager::default();
        let mut recorder = Recorder::default();
        let mut host = PagerHost::detached().with_delegate(&mut recorder);
        assert!(!pager.should_scroll_to_top(&mut host));
        pager.set_scrolls_to_top(true);
        assert!(pager.should_scroll_to_top(&mut host));
    }
}
