// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::Subscription;
use parking_lot::RwLock;
use std::sync::Arc;
use subtrack_core::{invoke_hooks, SubscribeHook, SubscribeTarget};

type Hook = Arc<dyn SubscribeHook<Subscription>>;

/// The subscribe operation shared by every [`Observable`](crate::Observable).
///
/// All subscribe calls, including the ones operators make to their upstream
/// sources and the ones subjects receive, go through this patch point. Hooks
/// wrapped onto it see every one of them.
pub struct Prototype {
    hooks: RwLock<Vec<Hook>>,
}

static PROTOTYPE: Prototype = Prototype {
    hooks: parking_lot::const_rwlock(Vec::new()),
};

/// Returns the process-wide subscribe patch point.
///
/// ```
/// let tracker = subtrack_core::setup(subtrack_observable::prototype());
/// assert!(!tracker.is_tracking());
/// ```
#[must_use]
pub fn prototype() -> &'static Prototype {
    &PROTOTYPE
}

impl Prototype {
    pub(crate) fn subscribe<'a>(&self, original: impl FnOnce() -> Subscription + 'a) -> Subscription {
        let hooks = self.hooks.read().clone();
        invoke_hooks(&hooks, Box::new(original))
    }

    /// Number of hooks wrapped onto the subscribe operation.
    #[must_use]
    pub fn hook_count(&self) -> usize {
        self.hooks.read().len()
    }
}

impl SubscribeTarget for Prototype {
    type Subscription = Subscription;

    fn wrap_subscribe(&self, hook: Hook) {
        self.hooks.write().push(hook);
    }

    fn subscribe_frames(&self) -> &'static [&'static str] {
        &[
            "subtrack_observable::prototype::Prototype",
            "subtrack_observable::observable::Observable<",
        ]
    }
}
