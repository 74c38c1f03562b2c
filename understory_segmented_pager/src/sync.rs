// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bridges between the pager and the segmented pager's collaborators.

use understory_pager::capability::Optional;
use understory_pager::{PagerCapabilities, PagerDataSource, PagerDelegate, ReuseRegistry};
use understory_segmented_control::SegmentedControl;

use crate::host::{SegmentedPagerCapabilities, SegmentedPagerDataSource, SegmentedPagerDelegate};

/// Mirrors pager movement onto the segmented control and the host delegate.
///
/// "Will move" selects the destination segment with animation before the page
/// settles; "did move" re-selects it without animation, since the scroll has
/// finished, and then reports the selection by index, by title, and by page.
/// Both updates are display-only, so they never navigate the pager again.
pub(crate) struct IndexSynchronizer<'s, 'a, P> {
    control: &'s mut SegmentedControl,
    delegate: Option<&'s mut (dyn SegmentedPagerDelegate<P> + 'a)>,
}

impl<'s, 'a, P> IndexSynchronizer<'s, 'a, P> {
    pub(crate) fn new(
        control: &'s mut SegmentedControl,
        delegate: Option<&'s mut (dyn SegmentedPagerDelegate<P> + 'a)>,
    ) -> Self {
        Self { control, delegate }
    }

    fn delegate(
        &mut self,
    ) -> Optional<'_, dyn SegmentedPagerDelegate<P> + 'a, SegmentedPagerCapabilities> {
        Optional::new(self.delegate.as_deref_mut(), |d| d.capabilities())
    }
}

impl<P> PagerDelegate<P> for IndexSynchronizer<'_, '_, P> {
    fn capabilities(&self) -> PagerCapabilities {
        PagerCapabilities::WILL_MOVE_TO_PAGE
            | PagerCapabilities::DID_MOVE_TO_PAGE
            | PagerCapabilities::WILL_DISPLAY_PAGE
            | PagerCapabilities::DID_END_DISPLAYING_PAGE
    }

    fn will_move_to_page(&mut self, page: &mut P, index: usize) {
        self.control.set_selected_index(Some(index), true);
        self.delegate()
            .notify(SegmentedPagerCapabilities::WILL_MOVE_TO_PAGE, |d| {
                d.will_move_to_page(page, index);
            });
    }

    fn did_move_to_page(&mut self, page: &mut P, index: usize) {
        self.control.set_selected_index(Some(index), false);

        let Self { control, delegate } = self;
        let title = control.sections().get(index).map(|s| s.title.as_str());
        let mut delegate = Optional::new(delegate.as_deref_mut(), |d| d.capabilities());
        delegate.notify(SegmentedPagerCapabilities::DID_SELECT_PAGE_AT, |d| {
            d.did_select_page_at(index);
        });
        if let Some(title) = title {
            delegate.notify(SegmentedPagerCapabilities::DID_SELECT_PAGE_TITLED, |d| {
                d.did_select_page_titled(title);
            });
        }
        delegate.notify(SegmentedPagerCapabilities::DID_SELECT_PAGE, |d| {
            d.did_select_page(&mut *page);
        });
        delegate.notify(SegmentedPagerCapabilities::DID_MOVE_TO_PAGE, |d| {
            d.did_move_to_page(&mut *page, index);
        });
    }

    fn will_display_page(&mut self, page: &mut P, index: usize) {
        self.delegate()
            .notify(SegmentedPagerCapabilities::WILL_DISPLAY_PAGE, |d| {
                d.will_display_page(page, index);
            });
    }

    fn did_end_displaying_page(&mut self, page: &mut P, index: usize) {
        self.delegate()
            .notify(SegmentedPagerCapabilities::DID_END_DISPLAYING_PAGE, |d| {
                d.did_end_displaying_page(page, index);
            });
    }
}

/// Feeds the pager from the segmented data source, using the page count
/// captured at the last reload.
pub(crate) struct PageSupply<'s, 'a, P> {
    count: usize,
    data_source: Option<&'s mut (dyn SegmentedPagerDataSource<P> + 'a)>,
}

impl<'s, 'a, P> PageSupply<'s, 'a, P> {
    pub(crate) fn new(
        count: usize,
        data_source: Option<&'s mut (dyn SegmentedPagerDataSource<P> + 'a)>,
    ) -> Self {
        Self { count, data_source }
    }
}

impl<P: Default> PagerDataSource<P> for PageSupply<'_, '_, P> {
    fn number_of_pages(&mut self) -> usize {
        self.count
    }

    fn page_at(&mut self, index: usize, reuse: &mut ReuseRegistry<P>) -> P {
        match self.data_source.as_deref_mut() {
            Some(data_source) => data_source.page_at(index, reuse),
            None => P::default(),
        }
    }
}
