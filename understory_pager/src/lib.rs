// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Pager: a headless, horizontally paged container.
//!
//! The [`Pager`] owns a sparse mapping from page index to page instance,
//! materializes pages lazily as the current index moves, and recycles pages
//! that leave its window through a [`ReuseRegistry`]. It does not render or
//! handle input: the host reports viewport bounds and scroll-container signals
//! and places the pages wherever its toolkit wants them.
//!
//! ## Collaborators
//!
//! - [`PagerDataSource`] reports the page count and builds pages.
//! - [`PagerDelegate`] observes lifecycle and scroll events. Every hook is
//!   optional; a delegate declares the ones it implements as
//!   [`PagerCapabilities`] and the rest resolve to documented defaults (see
//!   [`capability`]).
//!
//! Collaborators are lent to each call through a [`PagerHost`], so the same
//! object can be both data source and delegate while also owning the pager.
//!
//! ## Window policy
//!
//! - [`TransitionStyle::Scroll`]: the current page and its immediate neighbors
//!   are loaded.
//! - [`TransitionStyle::Tab`]: only the current page is loaded, and navigation
//!   is never animated.
//!
//! Pages leave the window after a committed page change finishes ("did move").
//! Pages carrying a reuse identifier are then queued for reuse.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Size;
//! use understory_pager::{IdentifiedPageSource, Page, Pager, PagerConfig, PagerHost};
//!
//! #[derive(Clone, Default)]
//! struct Card(Option<String>);
//!
//! impl Page for Card {
//!     fn reuse_identifier(&self) -> Option<&str> { self.0.as_deref() }
//!     fn set_reuse_identifier(&mut self, id: &str) { self.0 = Some(id.into()); }
//! }
//!
//! let mut pager: Pager<Card> = Pager::new(PagerConfig::default());
//! pager.reuse_mut().register_template("card", Card::default());
//!
//! let mut source = IdentifiedPageSource::new(10).with_identifier(|_| "card".into());
//! let mut host = PagerHost::detached().with_data_source(&mut source);
//! pager.layout(Size::new(320.0, 480.0), &mut host);
//! assert_eq!(pager.loaded_indices().collect::<Vec<_>>(), [0, 1]);
//!
//! pager.show_page(5, false, &mut host);
//! assert_eq!(pager.current_index(), 5);
//! assert_eq!(pager.loaded_indices().collect::<Vec<_>>(), [4, 5, 6]);
//! // Pages 0 and 1 left the window and wait for reuse.
//! assert_eq!(pager.reuse().queued_len(), 2);
//! ```
//!
//! Programming errors such as dequeuing an identifier that was never registered
//! are reported through a [`MisuseHook`], which panics by default.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod capability;

mod error;
mod host;
mod page;
mod pager;
mod reuse;
mod source;
mod strip;

pub use error::{Misuse, MisuseHook};
pub use host::{PagerCapabilities, PagerDataSource, PagerDelegate, PagerHost, ScrollMetrics};
pub use page::Page;
pub use pager::{Pager, PagerConfig, ScrollAnimation, TransitionStyle};
pub use reuse::{PageFactory, ReuseRegistry};
pub use source::{IdentifiedPageSource, default_page_identifier};
pub use strip::PageStrip;
