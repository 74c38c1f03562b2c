// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A titled, identifier-driven data source.

use alloc::string::String;
use alloc::vec::Vec;

use understory_pager::ReuseRegistry;

use crate::host::{SectionCapabilities, SegmentedPage, SegmentedPagerDataSource};

/// A [`SegmentedPagerDataSource`] with one titled section per page, where each
/// page is dequeued by an identifier derived from its index.
///
/// Pair it with one registered template or constructor per identifier. The
/// mapping usually comes from [`SegmentedPagerConfig::page_identifier`] via
/// [`SegmentedPager::identified_sections`].
///
/// [`SegmentedPagerConfig::page_identifier`]: crate::SegmentedPagerConfig::page_identifier
/// [`SegmentedPager::identified_sections`]: crate::SegmentedPager::identified_sections
#[derive(Clone, Debug)]
pub struct IdentifiedSections {
    titles: Vec<String>,
    identifier_for: fn(usize) -> String,
}

impl IdentifiedSections {
    /// Creates a source with one page per title.
    #[must_use]
    pub fn new(titles: Vec<String>, identifier_for: fn(usize) -> String) -> Self {
        Self {
            titles,
            identifier_for,
        }
    }

    /// The section titles.
    #[must_use]
    pub fn titles(&self) -> &[String] {
        &self.titles
    }
}

impl<P: SegmentedPage + Default> SegmentedPagerDataSource<P> for IdentifiedSections {
    fn number_of_pages(&mut self) -> usize {
        self.titles.len()
    }

    fn page_at(&mut self, index: usize, reuse: &mut ReuseRegistry<P>) -> P {
        reuse
            .dequeue(&(self.identifier_for)(index))
            .unwrap_or_default()
    }

    fn section_capabilities(&self) -> SectionCapabilities {
        SectionCapabilities::TITLE
    }

    fn title_for_section(&mut self, index: usize) -> String {
        self.titles.get(index).cloned().unwrap_or_default()
    }
}
