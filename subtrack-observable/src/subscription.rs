// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use subtrack_core::{Disposable, Teardown};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

struct SubscriptionState {
    closed: bool,
    teardowns: Vec<Teardown>,
}

struct Inner {
    id: u64,
    state: Mutex<SubscriptionState>,
}

/// Handle to a running subscription.
///
/// Clones refer to the same subscription and compare equal. The first
/// [`unsubscribe`](Self::unsubscribe) runs every registered teardown, in
/// registration order; later calls do nothing. A teardown added after that
/// runs immediately.
#[derive(Clone)]
pub struct Subscription {
    inner: Arc<Inner>,
}

impl Subscription {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Inner {
                id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
                state: Mutex::new(SubscriptionState {
                    closed: false,
                    teardowns: Vec::new(),
                }),
            }),
        }
    }

    /// Process-unique id, for diagnostics.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.inner.id
    }

    /// Registers `teardown` to run when this subscription ends.
    pub fn add(&self, teardown: impl FnOnce() + Send + 'static) {
        self.add_boxed(Box::new(teardown));
    }

    /// Ends `child` together with this subscription.
    pub fn add_child(&self, child: &Self) {
        if Arc::ptr_eq(&self.inner, &child.inner) {
            return;
        }
        let child = child.clone();
        self.add(move || child.unsubscribe());
    }

    pub fn unsubscribe(&self) {
        let teardowns = {
            let mut state = self.inner.state.lock();
            if state.closed {
                return;
            }
            state.closed = true;
            std::mem::take(&mut state.teardowns)
        };

        for teardown in teardowns {
            teardown();
        }
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.state.lock().closed
    }

    fn add_boxed(&self, teardown: Teardown) {
        {
            let mut state = self.inner.state.lock();
            if !state.closed {
                state.teardowns.push(teardown);
                return;
            }
        }
        teardown();
    }
}

impl Default for Subscription {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Subscription {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Subscription {}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.inner.id)
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl Disposable for Subscription {
    fn add_teardown(&self, teardown: Teardown) {
        self.add_boxed(teardown);
    }
}
