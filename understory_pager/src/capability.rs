// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Optional-capability dispatch for collaborators.
//!
//! Delegates and data sources expose many hooks, and most hosts only care
//! about a handful. Each collaborator trait therefore pairs default-implemented
//! methods with a `capabilities()` query returning a [`bitflags`] set. A hook is
//! called only if the collaborator is attached *and* declares the matching
//! capability; otherwise the caller-supplied default is used.
//!
//! ```
//! use understory_pager::capability::Optional;
//!
//! bitflags::bitflags! {
//!     #[derive(Clone, Copy, Debug, PartialEq, Eq)]
//!     struct Caps: u8 {
//!         const HEIGHT = 1;
//!         const TITLE = 2;
//!     }
//! }
//!
//! trait Host {
//!     fn capabilities(&self) -> Caps { Caps::empty() }
//!     fn height(&mut self) -> f64 { 0.0 }
//! }
//!
//! struct Tall;
//! impl Host for Tall {
//!     fn capabilities(&self) -> Caps { Caps::HEIGHT }
//!     fn height(&mut self) -> f64 { 60.0 }
//! }
//!
//! let mut tall = Tall;
//! let mut host = Optional::new(Some(&mut tall as &mut dyn Host), |h| h.capabilities());
//! assert_eq!(host.invoke(Caps::HEIGHT, 44.0, |h| h.height()), 60.0);
//!
//! // Detached collaborators always yield the default.
//! let mut none = Optional::new(None::<&mut dyn Host>, |h| h.capabilities());
//! assert_eq!(none.invoke(Caps::HEIGHT, 44.0, |h| h.height()), 44.0);
//! ```

use bitflags::Flags;

/// A possibly-absent collaborator together with the capabilities it declares.
pub struct Optional<'a, T: ?Sized, F> {
    target: Option<&'a mut T>,
    implemented: F,
}

impl<'a, T: ?Sized, F: Flags + Copy> Optional<'a, T, F> {
    /// Wraps `target`, querying its declared capabilities once.
    pub fn new(target: Option<&'a mut T>, capabilities: impl FnOnce(&T) -> F) -> Self {
        let implemented = target.as_deref().map_or(F::empty(), capabilities);
        Self {
            target,
            implemented,
        }
    }

    /// Returns `true` if a collaborator is attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.target.is_some()
    }

    /// Returns `true` if the attached collaborator declares `capability`.
    #[must_use]
    pub fn implements(&self, capability: F) -> bool {
        self.target.is_some() && self.implemented.contains(capability)
    }

    /// Calls `call` if `capability` is implemented, otherwise returns `default`.
    pub fn invoke<R>(&mut self, capability: F, default: R, call: impl FnOnce(&mut T) -> R) -> R {
        self.invoke_or_else(capability, || default, call)
    }

    /// Like [`Optional::invoke`], computing the fallback lazily.
    pub fn invoke_or_else<R>(
        &mut self,
        capability: F,
        default: impl FnOnce() -> R,
        call: impl FnOnce(&mut T) -> R,
    ) -> R {
        if !self.implemented.contains(capability) {
            return default();
        }
        match self.target.as_deref_mut() {
            Some(target) => call(target),
            None => default(),
        }
    }

    /// Calls a hook that returns nothing; a no-op when not implemented.
    pub fn notify(&mut self, capability: F, call: impl FnOnce(&mut T)) {
        self.invoke(capability, (), call);
    }
}

impl<T: ?Sized, F: core::fmt::Debug> core::fmt::Debug for Optional<'_, T, F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Optional")
            .field("attached", &self.target.is_some())
            .field("implemented", &self.implemented)
            .finish()
    }
}

/// One-shot form of [`Optional::invoke`].
pub fn invoke_optional<T: ?Sized, F: Flags + Copy, R>(
    collaborator: Option<&mut T>,
    capabilities: impl FnOnce(&T) -> F,
    capability: F,
    default: R,
    call: impl FnOnce(&mut T) -> R,
) -> R {
    Optional::new(collaborator, capabilities).invoke(capability, default, call)
}
