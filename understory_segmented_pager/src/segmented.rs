// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The composite segmented pager.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Insets, Point, Rect, Size};
use smallvec::SmallVec;
use understory_pager::capability::invoke_optional;
use understory_pager::{
    Misuse, MisuseHook, Pager, PagerConfig, PagerHost, TransitionStyle, default_page_identifier,
};
use understory_segmented_control::{SegmentedControl, Section, TapOutcome};

use crate::host::{
    DEFAULT_CONTROL_HEIGHT, PageCapabilities, SectionCapabilities, SegmentedHost, SegmentedPage,
    SegmentedPagerCapabilities, SubScrollView,
};
use crate::layout::{
    ControlPosition, Frames, LayoutInput, Region, RegionFrame, compute_frames, toolbar_relayout,
};
use crate::sync::{IndexSynchronizer, PageSupply};
use crate::{IdentifiedSections, ParallaxHeader};

/// Configuration for a [`SegmentedPager`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentedPagerConfig {
    /// Where the segmented control sits.
    pub control_position: ControlPosition,
    /// Height of the segmented control unless the delegate overrides it.
    pub control_height: f64,
    /// Insets around the segmented control.
    pub edge_insets: Insets,
    /// Initial toolbar height. Change it at runtime with
    /// [`SegmentedPager::set_toolbar_height`].
    pub toolbar_height: f64,
    /// Transition style of the inner pager.
    pub transition_style: TransitionStyle,
    /// Gutter of the inner pager.
    pub gutter_width: f64,
    /// Whether the content scroller bounces.
    pub bounces: bool,
    /// Maps a page index to the reuse identifier its page is dequeued with.
    pub page_identifier: fn(usize) -> String,
}

impl Default for SegmentedPagerConfig {
    fn default() -> Self {
        Self {
            control_position: ControlPosition::Top,
            control_height: DEFAULT_CONTROL_HEIGHT,
            edge_insets: Insets::ZERO,
            toolbar_height: 0.0,
            transition_style: TransitionStyle::Scroll,
            gutter_width: 0.0,
            bounces: true,
            page_identifier: default_page_identifier,
        }
    }
}

/// State of the vertical scroller that hosts the header, control, toolbar, and
/// pages.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContentScroller {
    /// Frame within the segmented pager.
    pub frame: Rect,
    /// Scrollable size; equal to the frame size.
    pub content_size: Size,
    /// Top inset reserved for the header.
    pub content_inset_top: f64,
    /// Scrolling is enabled only when the header has content.
    pub scroll_enabled: bool,
    /// Current offset.
    pub offset: Point,
    /// Whether the scroller bounces.
    pub bounces: bool,
    /// Whether a scroll-to-top gesture applies when the delegate has no say.
    pub scrolls_to_top: bool,
}

impl Default for ContentScroller {
    fn default() -> Self {
        Self {
            frame: Rect::ZERO,
            content_size: Size::ZERO,
            content_inset_top: 0.0,
            scroll_enabled: false,
            offset: Point::ZERO,
            bounces: true,
            scrolls_to_top: true,
        }
    }
}

/// A pager whose current page is mirrored by a segmented control, laid out
/// under an optional collapsible header.
///
/// The segmented pager owns the inner [`Pager`], the [`SegmentedControl`], and
/// the region frames. It acts as the pager's data source and delegate,
/// forwarding to the host's [`SegmentedPagerDataSource`] and
/// [`SegmentedPagerDelegate`] through a [`SegmentedHost`] lent to each call.
///
/// Drive pager scroll signals through [`SegmentedPager::drive_pager`] so the
/// control stays in sync.
///
/// [`SegmentedPagerDataSource`]: crate::SegmentedPagerDataSource
/// [`SegmentedPagerDelegate`]: crate::SegmentedPagerDelegate
pub struct SegmentedPager<P> {
    config: SegmentedPagerConfig,
    pager: Pager<P>,
    control: SegmentedControl,
    header: ParallaxHeader,
    content: ContentScroller,
    frames: Frames,
    bounds: Size,
    count: usize,
    control_height: f64,
    segment_widths: Vec<f64>,
    misuse: MisuseHook,
}

impl<P> core::fmt::Debug for SegmentedPager<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SegmentedPager")
            .field("config", &self.config)
            .field("pager", &self.pager)
            .field("control", &self.control)
            .field("header", &self.header)
            .field("content", &self.content)
            .field("frames", &self.frames)
            .field("count", &self.count)
            .field("control_height", &self.control_height)
            .finish_non_exhaustive()
    }
}

impl<P: SegmentedPage + Default> Default for SegmentedPager<P> {
    fn default() -> Self {
        Self::new(SegmentedPagerConfig::default())
    }
}

impl<P: SegmentedPage + Default> SegmentedPager<P> {
    /// Creates an empty segmented pager.
    #[must_use]
    pub fn new(config: SegmentedPagerConfig) -> Self {
        Self {
            pager: Pager::new(PagerConfig {
                transition_style: config.transition_style,
                gutter_width: config.gutter_width,
            }),
            control: SegmentedControl::default(),
            header: ParallaxHeader::default(),
            content: ContentScroller {
                bounces: config.bounces,
                ..ContentScroller::default()
            },
            frames: Frames::default(),
            bounds: Size::ZERO,
            count: 0,
            control_height: config.control_height,
            segment_widths: Vec::new(),
            misuse: MisuseHook::default(),
            config,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &SegmentedPagerConfig {
        &self.config
    }

    /// Moves the segmented control. Applied at the next layout.
    pub fn set_control_position(&mut self, position: ControlPosition) {
        self.config.control_position = position;
    }

    /// Changes the insets around the control. Applied at the next layout.
    pub fn set_edge_insets(&mut self, insets: Insets) {
        self.config.edge_insets = insets;
    }

    /// Whether the content scroller bounces.
    pub fn set_bounces(&mut self, bounces: bool) {
        self.config.bounces = bounces;
        self.content.bounces = bounces;
    }

    /// Replaces the handler for an empty page count.
    pub fn set_misuse_hook(&mut self, hook: MisuseHook) {
        self.misuse = hook;
    }

    /// The inner pager.
    #[must_use]
    pub fn pager(&self) -> &Pager<P> {
        &self.pager
    }

    /// Mutable access to the inner pager, e.g. to register page factories.
    ///
    /// Navigating through this reference bypasses control synchronization; use
    /// [`SegmentedPager::drive_pager`] for that.
    pub fn pager_mut(&mut self) -> &mut Pager<P> {
        &mut self.pager
    }

    /// The segmented control.
    #[must_use]
    pub fn control(&self) -> &SegmentedControl {
        &self.control
    }

    /// Mutable access to the segmented control's configuration and scroll.
    pub fn control_mut(&mut self) -> &mut SegmentedControl {
        &mut self.control
    }

    /// Sets the host-measured content widths of the segments, used at the
    /// next layout.
    pub fn set_segment_widths(&mut self, widths: Vec<f64>) {
        self.segment_widths = widths;
    }

    /// The header.
    #[must_use]
    pub fn header(&self) -> &ParallaxHeader {
        &self.header
    }

    /// Replaces the header. Applied at the next layout.
    pub fn set_header(&mut self, header: ParallaxHeader) {
        self.header = header;
    }

    /// The content scroller.
    #[must_use]
    pub fn content(&self) -> &ContentScroller {
        &self.content
    }

    /// Frames from the last layout.
    #[must_use]
    pub fn frames(&self) -> &Frames {
        &self.frames
    }

    /// Page count captured at the last reload.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Effective control height: the delegate's answer at the last reload, or
    /// the configured height.
    #[must_use]
    pub fn control_height(&self) -> f64 {
        self.control_height
    }

    /// The current page index.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.pager.current_index()
    }

    /// The page at the current index, if loaded.
    #[must_use]
    pub fn selected_page(&self) -> Option<&P> {
        self.pager.selected_page()
    }

    /// The reuse identifier for page `index` under the configured mapping.
    #[must_use]
    pub fn page_identifier(&self, index: usize) -> String {
        (self.config.page_identifier)(index)
    }

    /// A data source with one page per title, dequeued through
    /// [`SegmentedPagerConfig::page_identifier`].
    #[must_use]
    pub fn identified_sections(&self, titles: Vec<String>) -> IdentifiedSections {
        IdentifiedSections::new(titles, self.config.page_identifier)
    }

    fn layout_input(&self) -> LayoutInput {
        LayoutInput {
            bounds: self.bounds,
            control_height: self.control_height,
            toolbar_height: self.config.toolbar_height,
            position: self.config.control_position,
            insets: self.config.edge_insets,
            header: self.header,
        }
    }

    /// Runs `f` against the inner pager with this segmented pager acting as its
    /// data source and delegate.
    ///
    /// Use this to forward scroll-container signals; page changes reach the
    /// segmented control and the host delegate.
    pub fn drive_pager<R>(
        &mut self,
        host: &mut SegmentedHost<'_, P>,
        f: impl FnOnce(&mut Pager<P>, &mut PagerHost<'_, P>) -> R,
    ) -> R {
        drive(&mut self.pager, &mut self.control, self.count, host, f)
    }

    /// Rebuilds sections and pages from the data source.
    ///
    /// Does nothing without a data source. A zero page count is reported to
    /// the misuse hook (panicking by default); if the hook returns, the pager
    /// is left empty.
    pub fn reload(&mut self, host: &mut SegmentedHost<'_, P>) {
        let Some(count) = host.data_source().map(|ds| ds.number_of_pages()) else {
            return;
        };
        self.count = count;
        if count == 0 {
            self.misuse.report(&Misuse::EmptyPageCount);
        }

        self.control_height = host.delegate().invoke(
            SegmentedPagerCapabilities::CONTROL_HEIGHT,
            self.config.control_height,
            |d| d.control_height(),
        );

        let mut provider = host.sections();
        let sections: Vec<Section> = (0..count)
            .map(|index| Section {
                title: provider.invoke_or_else(
                    SectionCapabilities::TITLE,
                    || format!("Page {index}"),
                    |ds| ds.title_for_section(index),
                ),
                attributed_title: provider.invoke(
                    SectionCapabilities::ATTRIBUTED_TITLE,
                    None,
                    |ds| ds.attributed_title_for_section(index),
                ),
                image: provider.invoke(SectionCapabilities::IMAGE, None, |ds| {
                    ds.image_for_section(index)
                }),
                selected_image: provider.invoke(SectionCapabilities::SELECTED_IMAGE, None, |ds| {
                    ds.selected_image_for_section(index)
                }),
            })
            .collect();
        self.control.set_sections(sections);

        self.drive_pager(host, |pager, pager_host| pager.reload(pager_host));
        if count > 0 {
            let index = self.pager.current_index();
            self.control.set_selected_index(Some(index), false);
        }
        tracing::debug!(
            target: "understory_segmented_pager",
            count,
            control_height = self.control_height,
            "reloaded segmented pager"
        );
    }

    /// Lays out every region for `bounds`, reloading first if empty.
    pub fn layout(&mut self, bounds: Size, host: &mut SegmentedHost<'_, P>) {
        self.bounds = bounds;
        if self.count == 0 {
            self.reload(host);
        }
        self.frames = compute_frames(&self.layout_input());
        self.layout_content();
        self.control
            .layout(self.frames.control.width(), &self.segment_widths);
        self.layout_pager(host);
    }

    fn layout_content(&mut self) {
        let was_at_top = self.content.offset.y == 0.0;
        self.content.frame = self.frames.content;
        self.content.content_size = self.frames.content.size();
        self.content.scroll_enabled = self.header.has_content;
        self.content.content_inset_top = self.header.height;
        if was_at_top {
            self.content.offset = Point::ZERO;
        }
    }

    fn layout_pager(&mut self, host: &mut SegmentedHost<'_, P>) {
        let size = self.frames.pager.size();
        self.drive_pager(host, |pager, pager_host| pager.layout(size, pager_host));
    }

    /// Changes the toolbar height and returns the frame updates in the order a
    /// host should apply them: toolbar first when growing, page area first
    /// when shrinking. Returns nothing if the height is unchanged.
    pub fn set_toolbar_height(
        &mut self,
        height: f64,
        host: &mut SegmentedHost<'_, P>,
    ) -> SmallVec<[RegionFrame; 2]> {
        let updates = toolbar_relayout(&self.layout_input(), height);
        if updates.is_empty() {
            return updates;
        }
        tracing::debug!(
            target: "understory_segmented_pager",
            from = self.config.toolbar_height,
            to = height,
            first = ?updates[0].region,
            "toolbar height changed"
        );
        self.config.toolbar_height = height;
        for update in &updates {
            match update.region {
                Region::Toolbar => self.frames.toolbar = update.frame,
                Region::Pager => self.frames.pager = update.frame,
                Region::Content | Region::Control => {}
            }
        }
        self.layout_pager(host);
        updates
    }

    /// Scrolls the content scroller so the header is fully expanded.
    pub fn scroll_to_top(&mut self) -> Point {
        self.content.offset = Point::new(0.0, -self.header.height);
        self.content.offset
    }

    /// Scrolls the content scroller to its bottom edge.
    pub fn scroll_to_bottom(&mut self) -> Point {
        let bottom = self.content.content_size.height - self.content.frame.height();
        self.content.offset = Point::new(0.0, bottom);
        self.content.offset
    }

    /// The content scroller moved.
    pub fn did_scroll_content(&mut self, offset: Point, host: &mut SegmentedHost<'_, P>) {
        self.content.offset = offset;
        let header = self.header;
        host.delegate()
            .notify(SegmentedPagerCapabilities::DID_SCROLL_HEADER, |d| {
                d.did_scroll_header(&header);
            });
    }

    /// Dragging the content scroller ended.
    pub fn did_end_dragging_content(&mut self, host: &mut SegmentedHost<'_, P>) {
        let header = self.header;
        host.delegate()
            .notify(SegmentedPagerCapabilities::DID_END_DRAGGING_HEADER, |d| {
                d.did_end_dragging_header(&header);
            });
    }

    /// Whether `view` should scroll together with the content scroller.
    ///
    /// Never for the pager or its scroll container. Otherwise the selected
    /// page decides, defaulting to `true`.
    pub fn should_scroll_with_sub_view(&mut self, view: SubScrollView) -> bool {
        match view {
            SubScrollView::Pager | SubScrollView::PagerScrollView => false,
            SubScrollView::Nested(_) => invoke_optional(
                self.pager.selected_page_mut(),
                |page| page.page_capabilities(),
                PageCapabilities::SHOULD_SCROLL_WITH,
                true,
                |page| page.should_scroll_with(view),
            ),
        }
    }

    /// Whether a scroll-to-top gesture should be honored.
    pub fn should_scroll_to_top(&mut self, host: &mut SegmentedHost<'_, P>) -> bool {
        host.delegate().invoke(
            SegmentedPagerCapabilities::SHOULD_SCROLL_TO_TOP,
            self.content.scrolls_to_top,
            |d| d.should_scroll_to_top(),
        )
    }

    /// Navigates to page `index`, keeping the control in sync.
    pub fn show_page(&mut self, index: usize, animated: bool, host: &mut SegmentedHost<'_, P>) {
        self.drive_pager(host, |pager, pager_host| {
            pager.show_page(index, animated, pager_host);
        });
    }

    /// The control's "value changed" event: shows the selected segment's page,
    /// animated. A no-op when the pager is already there.
    pub fn control_value_changed(&mut self, host: &mut SegmentedHost<'_, P>) {
        let Some(index) = self.control.selected_index() else {
            return;
        };
        tracing::debug!(target: "understory_segmented_pager", index, "control selected page");
        self.show_page(index, true, host);
    }

    /// Resolves a tap on the control at `x` and navigates on a change.
    pub fn tap_control(&mut self, x: f64, host: &mut SegmentedHost<'_, P>) -> TapOutcome {
        let outcome = self.control.tap(x);
        if let TapOutcome::Changed(_) = outcome {
            self.control_value_changed(host);
        }
        outcome
    }
}

fn drive<P: Default, R>(
    pager: &mut Pager<P>,
    control: &mut SegmentedControl,
    count: usize,
    host: &mut SegmentedHost<'_, P>,
    f: impl FnOnce(&mut Pager<P>, &mut PagerHost<'_, P>) -> R,
) -> R {
    let (data_source, delegate) = host.split();
    let mut supply = PageSupply::new(count, data_source);
    let mut sync = IndexSynchronizer::new(control, delegate);
    let mut pager_host = PagerHost::detached()
        .with_data_source(&mut supply)
        .with_delegate(&mut sync);
    f(pager, &mut pager_host)
}
