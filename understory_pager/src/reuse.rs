// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page factories and the reuse queue.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::Page;
use crate::error::{Misuse, MisuseHook};

/// How to build a fresh page for a reuse identifier.
pub enum PageFactory<P> {
    /// Instantiates a copy of a template page.
    Template(Box<dyn Fn() -> P>),
    /// Calls a plain constructor.
    Constructor(fn() -> P),
}

impl<P> PageFactory<P> {
    /// A factory that clones `template` for every new page.
    pub fn template(template: P) -> Self
    where
        P: Clone + 'static,
    {
        Self::Template(Box::new(move || template.clone()))
    }

    fn instantiate(&self) -> P {
        match self {
            Self::Template(instantiate) => instantiate(),
            Self::Constructor(construct) => construct(),
        }
    }
}

impl<P> core::fmt::Debug for PageFactory<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Template(_) => f.write_str("Template"),
            Self::Constructor(_) => f.write_str("Constructor"),
        }
    }
}

/// Registration table plus a queue of retired pages awaiting reuse.
///
/// Retired pages are queued under their [`Page::reuse_identifier`]; a dequeue
/// first takes the oldest queued page with a matching identifier and only
/// builds a new one from the registration table on a miss.
pub struct ReuseRegistry<P> {
    registrations: HashMap<String, PageFactory<P>>,
    queue: Vec<P>,
    misuse: MisuseHook,
}

impl<P> Default for ReuseRegistry<P> {
    fn default() -> Self {
        Self {
            registrations: HashMap::new(),
            queue: Vec::new(),
            misuse: MisuseHook::default(),
        }
    }
}

impl<P> core::fmt::Debug for ReuseRegistry<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReuseRegistry")
            .field("registrations", &self.registrations.len())
            .field("queued", &self.queue.len())
            .finish_non_exhaustive()
    }
}

impl<P: Page> ReuseRegistry<P> {
    /// Creates an empty registry that panics on misuse.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the handler used when an unregistered identifier is dequeued.
    pub fn set_misuse_hook(&mut self, hook: MisuseHook) {
        self.misuse = hook;
    }

    /// Registers `factory` under `identifier`, or clears it when `None`.
    ///
    /// The last registration for an identifier wins. Empty identifiers are
    /// ignored.
    pub fn register(&mut self, identifier: &str, factory: Option<PageFactory<P>>) {
        if identifier.is_empty() {
            tracing::warn!(target: "understory_pager", "ignoring registration with an empty reuse identifier");
            return;
        }
        match factory {
            Some(factory) => {
                self.registrations.insert(identifier.into(), factory);
            }
            None => {
                self.registrations.remove(identifier);
            }
        }
    }

    /// Registers a template page under `identifier`.
    pub fn register_template(&mut self, identifier: &str, template: P)
    where
        P: Clone + 'static,
    {
        self.register(identifier, Some(PageFactory::template(template)));
    }

    /// Registers a constructor under `identifier`.
    pub fn register_constructor(&mut self, identifier: &str, construct: fn() -> P) {
        self.register(identifier, Some(PageFactory::Constructor(construct)));
    }

    /// Returns `true` if `identifier` has a factory.
    #[must_use]
    pub fn is_registered(&self, identifier: &str) -> bool {
        self.registrations.contains_key(identifier)
    }

    /// Returns a page for `identifier`, reusing a queued one when possible.
    ///
    /// Queued pages are reset with [`Page::prepare_for_reuse`]. Fresh pages are
    /// tagged via [`Page::set_reuse_identifier`]. If nothing is queued and the
    /// identifier was never registered, the misuse hook is invoked and `None`
    /// is returned once it comes back.
    pub fn dequeue(&mut self, identifier: &str) -> Option<P> {
        if let Some(position) = self
            .queue
            .iter()
            .position(|page| page.reuse_identifier() == Some(identifier))
        {
            let mut page = self.queue.remove(position);
            page.prepare_for_reuse();
            tracing::trace!(target: "understory_pager", identifier, "reused queued page");
            return Some(page);
        }

        let Some(factory) = self.registrations.get(identifier) else {
            self.misuse.report(&Misuse::UnregisteredIdentifier {
                identifier: identifier.into(),
            });
            return None;
        };
        let mut page = factory.instantiate();
        page.set_reuse_identifier(identifier);
        tracing::trace!(target: "understory_pager", identifier, "built new page");
        Some(page)
    }

    /// Queues `page` for reuse if it carries a reuse identifier.
    ///
    /// Returns `false` (dropping the page) otherwise.
    pub fn recycle(&mut self, page: P) -> bool {
        if page.reuse_identifier().is_none() {
            return false;
        }
        self.queue.push(page);
        true
    }

    /// Number of pages waiting in the reuse queue.
    #[must_use]
    pub fn queued_len(&self) -> usize {
        self.queue.len()
    }

    /// Iterates over queued pages, oldest first.
    pub fn queued(&self) -> impl Iterator<Item = &P> {
        self.queue.iter()
    }

    /// Drops every queued page.
    pub fn clear_queue(&mut self) {
        self.queue.clear();
    }
}
