// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A data source that resolves page indices to reuse identifiers.

use alloc::format;
use alloc::string::String;

use crate::{Page, PagerDataSource, ReuseRegistry};

/// The default index-to-identifier mapping: `page_{index}`.
#[must_use]
pub fn default_page_identifier(index: usize) -> String {
    format!("page_{index}")
}

/// A [`PagerDataSource`] that dequeues each page by an identifier computed
/// from its index.
///
/// Register one template or constructor per identifier; pages are then built
/// and recycled through the pager's [`ReuseRegistry`]. The source keeps no
/// pages of its own.
#[derive(Clone, Copy, Debug)]
pub struct IdentifiedPageSource {
    /// Number of pages.
    pub count: usize,
    /// Maps a page index to the identifier it is dequeued with.
    pub identifier_for: fn(usize) -> String,
}

impl IdentifiedPageSource {
    /// A source of `count` pages using [`default_page_identifier`].
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            count,
            identifier_for: default_page_identifier,
        }
    }

    /// Replaces the index-to-identifier mapping.
    #[must_use]
    pub fn with_identifier(mut self, identifier_for: fn(usize) -> String) -> Self {
        self.identifier_for = identifier_for;
        self
    }
}

impl<P: Page + Default> PagerDataSource<P> for IdentifiedPageSource {
    fn number_of_pages(&mut self) -> usize {
        self.count
    }

    /// Falls back to `P::default()` if the misuse hook lets an unregistered
    /// identifier through.
    fn page_at(&mut self, index: usize, reuse: &mut ReuseRegistry<P>) -> P {
        let identifier = (self.identifier_for)(index);
        reuse.dequeue(&identifier).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MisuseHook, Pager, PagerConfig, PagerHost, TransitionStyle};
    use alloc::string::ToString;
    use kurbo::Size;

    #[derive(Clone, Debug, Default)]
    struct Tagged {
        identifier: Option<String>,
    }

    impl Page for Tagged {
        fn reuse_identifier(&self) -> Option<&str> {
            self.identifier.as_deref()
        }
        fn set_reuse_identifier(&mut self, identifier: &str) {
            self.identifier = Some(identifier.to_string());
        }
    }

    fn tab_pager() -> Pager<Tagged> {
        Pager::new(PagerConfig {
            transition_style: TransitionStyle::Tab,
            ..PagerConfig::default()
        })
    }

    #[test]
    fn default_identifiers_follow_the_index() {
        assert_eq!(default_page_identifier(0), "page_0");
        assert_eq!(default_page_identifier(12), "page_12");
    }

    #[test]
    fn each_index_dequeues_its_own_identifier() {
        let mut pager = tab_pager();
        for i in 0..3 {
            pager
                .reuse_mut()
                .register_template(&default_page_identifier(i), Tagged::default());
        }
        let mut source = IdentifiedPageSource::new(3);
        let mut host = PagerHost::detached().with_data_source(&mut source);
        pager.layout(Size::new(10.0, 10.0), &mut host);
        pager.show_page(2, false, &mut host);
        assert_eq!(
            pager.selected_page().and_then(|p| p.reuse_identifier()),
            Some("page_2")
        );
        assert_eq!(
            pager.reuse().queued().next().and_then(|p| p.reuse_identifier()),
            Some("page_0")
        );
    }

    #[test]
    fn injected_mapping_is_used() {
        let mut pager = tab_pager();
        pager
            .reuse_mut()
            .register_template("shared", Tagged::default());
        let mut source = IdentifiedPageSource::new(2).with_identifier(|_| "shared".into());
        let mut host = PagerHost::detached().with_data_source(&mut source);
        pager.layout(Size::new(10.0, 10.0), &mut host);
        pager.show_page(1, false, &mut host);
        pager.show_page(0, false, &mut host);
        assert_eq!(
            pager.selected_page().and_then(|p| p.reuse_identifier()),
            Some("shared")
        );
    }

    #[test]
    fn unregistered_identifier_falls_back_to_default_page() {
        let mut pager = tab_pager();
        pager.reuse_mut().set_misuse_hook(MisuseHook::new(|_| {}));
        let mut source = IdentifiedPageSource::new(1);
        let mut host = PagerHost::detached().with_data_source(&mut source);
        pager.layout(Size::new(10.0, 10.0), &mut host);
        assert!(pager.selected_page().is_some_and(|p| p.identifier.is_none()));
    }
}
