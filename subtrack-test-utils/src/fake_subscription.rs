// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use subtrack_core::{Disposable, Teardown};

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

struct State {
    closed: bool,
    teardowns: Vec<Teardown>,
}

/// A minimal subscription handle.
///
/// Teardowns run once, on the first [`unsubscribe`](Self::unsubscribe);
/// later calls do nothing. Teardowns added after that run immediately.
#[derive(Clone)]
pub struct FakeSubscription {
    id: u64,
    state: Arc<Mutex<State>>,
}

impl FakeSubscription {
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            state: Arc::new(Mutex::new(State {
                closed: false,
                teardowns: Vec::new(),
            })),
        }
    }

    /// A subscription that has already ended, like one whose source
    /// completed synchronously during subscribe.
    #[must_use]
    pub fn closed() -> Self {
        let subscription = Self::new();
        subscription.unsubscribe();
        subscription
    }

    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Unsubscribes `child` when this subscription ends.
    pub fn add_child(&self, child: Self) {
        self.add_teardown(Box::new(move || child.unsubscribe()));
    }

    pub fn unsubscribe(&self) {
        let teardowns = {
            let mut state = self.state.lock();
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
        self.state.lock().closed
    }

    /// Number of teardowns waiting to run.
    #[must_use]
    pub fn pending_teardowns(&self) -> usize {
        self.state.lock().teardowns.len()
    }
}

impl Default for FakeSubscription {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for FakeSubscription {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.state, &other.state)
    }
}

impl Eq for FakeSubscription {}

impl fmt::Debug for FakeSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakeSubscription")
            .field("id", &self.id)
            .field("closed", &self.is_closed())
            .finish()
    }
}

impl Disposable for FakeSubscription {
    fn add_teardown(&self, teardown: Teardown) {
        {
            let mut state = self.state.lock();
            if !state.closed {
                state.teardowns.push(teardown);
                return;
            }
        }
        teardown();
    }
}
