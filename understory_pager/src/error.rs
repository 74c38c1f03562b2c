// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reporting of host misconfiguration.
//!
//! Some mistakes cannot be degraded into a sensible default: dequeuing a page
//! type that was never registered, or a data source that reports no pages to a
//! component that requires at least one. These are surfaced through a
//! [`MisuseHook`]. The default hook panics; tests and embedders that prefer to
//! keep running can install their own handler, after which the reporting
//! component continues in an empty state.

use alloc::boxed::Box;
use alloc::string::String;

/// A programming or configuration error made by the host.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Misuse {
    /// A page was dequeued with an identifier that has neither a registration
    /// nor a queued page.
    #[error(
        "unable to dequeue a page with identifier `{identifier}`: register a template or a constructor first"
    )]
    UnregisteredIdentifier {
        /// The identifier that was requested.
        identifier: String,
    },
    /// The data source reported zero pages where at least one is required.
    #[error("number of pages must be greater than 0")]
    EmptyPageCount,
}

/// Handler invoked when a [`Misuse`] is detected.
pub struct MisuseHook {
    handler: Box<dyn FnMut(&Misuse)>,
}

impl MisuseHook {
    /// Creates a hook that panics with the misuse message.
    #[must_use]
    pub fn panicking() -> Self {
        Self::new(|misuse| panic!("{misuse}"))
    }

    /// Creates a hook from a custom handler.
    ///
    /// The handler may return normally, in which case the caller continues in
    /// its benign empty state (for example, a dequeue yields `None`).
    pub fn new(handler: impl FnMut(&Misuse) + 'static) -> Self {
        Self {
            handler: Box::new(handler),
        }
    }

    /// Reports `misuse` to the handler.
    pub fn report(&mut self, misuse: &Misuse) {
        tracing::error!(target: "understory_pager", %misuse, "host misuse");
        (self.handler)(misuse);
    }
}

impl Default for MisuseHook {
    fn default() -> Self {
        Self::panicking()
    }
}

impl core::fmt::Debug for MisuseHook {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MisuseHook").finish_non_exhaustive()
    }
}
