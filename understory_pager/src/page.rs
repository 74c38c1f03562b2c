// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The page abstraction managed by the pager.

use kurbo::Rect;

/// A page instance that the pager can place, show, hide, and recycle.
///
/// The host owns what a page *is*; the pager only owns *where* it sits and
/// when it is materialized. Every method has a no-op default so simple page
/// types need only an empty `impl`.
pub trait Page {
    /// The reuse identifier this page was created under, if any.
    ///
    /// Pages without an identifier are dropped when they leave the pager's
    /// window instead of being queued for reuse.
    fn reuse_identifier(&self) -> Option<&str> {
        None
    }

    /// Tags the page with the identifier it was constructed for.
    ///
    /// Called by [`ReuseRegistry`](crate::ReuseRegistry) on freshly built
    /// pages. Types that want to be recycled must store the value and return
    /// it from [`Page::reuse_identifier`].
    fn set_reuse_identifier(&mut self, identifier: &str) {
        let _ = identifier;
    }

    /// Resets transient state before a queued page is handed out again.
    fn prepare_for_reuse(&mut self) {}

    /// Assigns the page's frame within the pager's scrollable content.
    fn set_frame(&mut self, frame: Rect) {
        let _ = frame;
    }

    /// The page was attached to the scrollable container.
    fn did_attach(&mut self) {}

    /// The page was detached from the scrollable container.
    fn did_detach(&mut self) {}
}
