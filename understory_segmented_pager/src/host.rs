// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator traits for the segmented pager.

use alloc::string::String;

use understory_pager::capability::Optional;
use understory_pager::{Page, ReuseRegistry};
use understory_segmented_control::{AttributedTitle, ImageId};

use crate::ParallaxHeader;

bitflags::bitflags! {
    /// Optional section providers a [`SegmentedPagerDataSource`] implements.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct SectionCapabilities: u8 {
        /// [`SegmentedPagerDataSource::title_for_section`].
        const TITLE = 1 << 0;
        /// [`SegmentedPagerDataSource::attributed_title_for_section`].
        const ATTRIBUTED_TITLE = 1 << 1;
        /// [`SegmentedPagerDataSource::image_for_section`].
        const IMAGE = 1 << 2;
        /// [`SegmentedPagerDataSource::selected_image_for_section`].
        const SELECTED_IMAGE = 1 << 3;
    }
}

/// Supplies pages and section content to a segmented pager.
#[expect(unused_variables, reason = "Default hook bodies ignore their arguments")]
pub trait SegmentedPagerDataSource<P> {
    /// Number of pages. Must be greater than zero.
    fn number_of_pages(&mut self) -> usize;

    /// Produces the page for `index`.
    fn page_at(&mut self, index: usize, reuse: &mut ReuseRegistry<P>) -> P;

    /// The section providers this data source implements.
    fn section_capabilities(&self) -> SectionCapabilities {
        SectionCapabilities::empty()
    }

    /// Title of section `index`. Defaults to `"Page {index}"`.
    fn title_for_section(&mut self, index: usize) -> String {
        String::new()
    }

    /// Styled title of section `index`, shown instead of the plain title.
    fn attributed_title_for_section(&mut self, index: usize) -> Option<AttributedTitle> {
        None
    }

    /// Image of section `index`.
    fn image_for_section(&mut self, index: usize) -> Option<ImageId> {
        None
    }

    /// Image of section `index` while selected.
    fn selected_image_for_section(&mut self, index: usize) -> Option<ImageId> {
        None
    }
}

/// Height of the segmented control when neither the configuration nor the
/// delegate says otherwise.
pub const DEFAULT_CONTROL_HEIGHT: f64 = 44.0;

bitflags::bitflags! {
    /// Hooks a [`SegmentedPagerDelegate`] implements.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct SegmentedPagerCapabilities: u16 {
        /// [`SegmentedPagerDelegate::did_select_page`].
        const DID_SELECT_PAGE = 1 << 0;
        /// [`SegmentedPagerDelegate::did_select_page_titled`].
        const DID_SELECT_PAGE_TITLED = 1 << 1;
        /// [`SegmentedPagerDelegate::did_select_page_at`].
        const DID_SELECT_PAGE_AT = 1 << 2;
        /// [`SegmentedPagerDelegate::will_move_to_page`].
        const WILL_MOVE_TO_PAGE = 1 << 3;
        /// [`SegmentedPagerDelegate::did_move_to_page`].
        const DID_MOVE_TO_PAGE = 1 << 4;
        /// [`SegmentedPagerDelegate::will_display_page`].
        const WILL_DISPLAY_PAGE = 1 << 5;
        /// [`SegmentedPagerDelegate::did_end_displaying_page`].
        const DID_END_DISPLAYING_PAGE = 1 << 6;
        /// [`SegmentedPagerDelegate::control_height`].
        const CONTROL_HEIGHT = 1 << 7;
        /// [`SegmentedPagerDelegate::did_scroll_header`].
        const DID_SCROLL_HEADER = 1 << 8;
        /// [`SegmentedPagerDelegate::did_end_dragging_header`].
        const DID_END_DRAGGING_HEADER = 1 << 9;
        /// [`SegmentedPagerDelegate::should_scroll_to_top`].
        const SHOULD_SCROLL_TO_TOP = 1 << 10;
    }
}

/// Observes a segmented pager. Every hook is optional.
#[expect(unused_variables, reason = "Default hook bodies ignore their arguments")]
pub trait SegmentedPagerDelegate<P> {
    /// The hooks this delegate implements.
    fn capabilities(&self) -> SegmentedPagerCapabilities {
        SegmentedPagerCapabilities::empty()
    }

    /// `page` became the selected page.
    fn did_select_page(&mut self, page: &mut P) {}

    /// The page titled `title` became selected.
    fn did_select_page_titled(&mut self, title: &str) {}

    /// The page at `index` became selected.
    fn did_select_page_at(&mut self, index: usize) {}

    /// The pager is about to move to `page` at `index`.
    fn will_move_to_page(&mut self, page: &mut P, index: usize) {}

    /// The pager finished moving to `page` at `index`.
    fn did_move_to_page(&mut self, page: &mut P, index: usize) {}

    /// `page` is about to be displayed at `index`.
    fn will_display_page(&mut self, page: &mut P, index: usize) {}

    /// `page` stopped being displayed at `index`.
    fn did_end_displaying_page(&mut self, page: &mut P, index: usize) {}

    /// Height of the segmented control. Only asked when
    /// [`SegmentedPagerCapabilities::CONTROL_HEIGHT`] is declared; otherwise
    /// the configured height is used.
    fn control_height(&mut self) -> f64 {
        DEFAULT_CONTROL_HEIGHT
    }

    /// The content scroller moved the header.
    fn did_scroll_header(&mut self, header: &ParallaxHeader) {}

    /// Dragging the content scroller ended.
    fn did_end_dragging_header(&mut self, header: &ParallaxHeader) {}

    /// Whether a scroll-to-top gesture is allowed. Only asked when
    /// [`SegmentedPagerCapabilities::SHOULD_SCROLL_TO_TOP`] is declared;
    /// otherwise [`ContentScroller::scrolls_to_top`] decides. The default
    /// body matches that flag's default.
    ///
    /// [`ContentScroller::scrolls_to_top`]: crate::ContentScroller::scrolls_to_top
    fn should_scroll_to_top(&mut self) -> bool {
        true
    }
}

/// A nested scroll view asking whether it may scroll along with the header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SubScrollView {
    /// The pager itself.
    Pager,
    /// The pager's horizontal scroll container.
    PagerScrollView,
    /// A scroll view inside a page, identified by the host.
    Nested(u64),
}

bitflags::bitflags! {
    /// Optional hooks a [`SegmentedPage`] implements.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct PageCapabilities: u8 {
        /// [`SegmentedPage::should_scroll_with`].
        const SHOULD_SCROLL_WITH = 1 << 0;
    }
}

/// A page hosted by a segmented pager.
#[expect(unused_variables, reason = "Default hook bodies ignore their arguments")]
pub trait SegmentedPage: Page {
    /// The hooks this page implements.
    fn page_capabilities(&self) -> PageCapabilities {
        PageCapabilities::empty()
    }

    /// Whether `view` should scroll together with the header. Only asked of the
    /// selected page.
    fn should_scroll_with(&mut self, view: SubScrollView) -> bool {
        true
    }
}

/// The collaborators of a segmented pager, lent per call.
pub struct SegmentedHost<'a, P> {
    data_source: Option<&'a mut dyn SegmentedPagerDataSource<P>>,
    delegate: Option<&'a mut dyn SegmentedPagerDelegate<P>>,
}

impl<'a, P> SegmentedHost<'a, P> {
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
    pub fn with_data_source(
        mut self,
        data_source: &'a mut dyn SegmentedPagerDataSource<P>,
    ) -> Self {
        self.data_source = Some(data_source);
        self
    }

    /// Attaches a delegate.
    #[must_use]
    pub fn with_delegate(mut self, delegate: &'a mut dyn SegmentedPagerDelegate<P>) -> Self {
        self.delegate = Some(delegate);
        self
    }

    pub(crate) fn data_source(&mut self) -> Option<&mut (dyn SegmentedPagerDataSource<P> + 'a)> {
        self.data_source.as_deref_mut()
    }

    pub(crate) fn sections(
        &mut self,
    ) -> Optional<'_, dyn SegmentedPagerDataSource<P> + 'a, SectionCapabilities> {
        Optional::new(self.data_source.as_deref_mut(), |ds| ds.section_capabilities())
    }

    pub(crate) fn delegate(
        &mut self,
    ) -> Optional<'_, dyn SegmentedPagerDelegate<P> + 'a, SegmentedPagerCapabilities> {
        Optional::new(self.delegate.as_deref_mut(), |d| d.capabilities())
    }

    /// Both collaborators at once, for building a pager host.
    pub(crate) fn split(
        &mut self,
    ) -> (
        Option<&mut (dyn SegmentedPagerDataSource<P> + 'a)>,
        Option<&mut (dyn SegmentedPagerDelegate<P> + 'a)>,
    ) {
        (
            self.data_source.as_deref_mut(),
            self.delegate.as_deref_mut(),
        )
    }
}

impl<P> core::fmt::Debug for SegmentedHost<'_, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SegmentedHost")
            .field("data_source", &self.data_source.is_some())
            .field("delegate", &self.delegate.is_some())
            .finish()
    }
}
