// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::FakeSubscription;
use parking_lot::Mutex;
use std::sync::Arc;
use subtrack_core::{invoke_hooks, OriginalSubscribe, SubscribeHook, SubscribeTarget};

type Hook = Arc<dyn SubscribeHook<FakeSubscription>>;

/// A subscribe target with its own hook list.
///
/// Each `subscribe*` method is one subscribe call routed through every hook
/// installed on this target. Nested calls made from inside the original
/// subscribe body model operators subscribing to their upstream sources.
#[derive(Default)]
pub struct FakeTarget {
    hooks: Mutex<Vec<Hook>>,
}

impl FakeTarget {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `original` as one subscribe call on this target.
    pub fn subscribe_with<'a>(
        &self,
        original: impl FnOnce() -> FakeSubscription + 'a,
    ) -> FakeSubscription {
        let hooks = self.hooks.lock().clone();
        let original: OriginalSubscribe<'a, FakeSubscription> = Box::new(original);
        invoke_hooks(&hooks, original)
    }

    /// A plain subscribe call without inner subscriptions.
    pub fn subscribe(&self) -> FakeSubscription {
        self.subscribe_with(FakeSubscription::new)
    }

    /// A subscribe call whose source completes before it returns.
    pub fn subscribe_completed(&self) -> FakeSubscription {
        self.subscribe_with(FakeSubscription::closed)
    }

    /// One subscribe call that fans out into `stages` subscribe calls in
    /// total, each stage subscribing to the one above it. Unsubscribing the
    /// returned handle tears the whole pipeline down.
    pub fn subscribe_pipeline(&self, stages: usize) -> FakeSubscription {
        self.subscribe_with(|| {
            let subscription = FakeSubscription::new();
            if stages > 1 {
                subscription.add_child(self.subscribe_pipeline(stages - 1));
            }
            subscription
        })
    }

    /// A subscribe call whose original body panics with `message`.
    pub fn subscribe_panicking(&self, message: &'static str) -> FakeSubscription {
        self.subscribe_with(|| panic!("{message}"))
    }

    /// Number of hooks installed on this target.
    #[must_use]
    pub fn hook_count(&self) -> usize {
        self.hooks.lock().len()
    }
}

impl SubscribeTarget for FakeTarget {
    type Subscription = FakeSubscription;

    fn wrap_subscribe(&self, hook: Hook) {
        self.hooks.lock().push(hook);
    }

    fn subscribe_frames(&self) -> &'static [&'static str] {
        &["subtrack_test_utils::fake_target::FakeTarget"]
    }
}
