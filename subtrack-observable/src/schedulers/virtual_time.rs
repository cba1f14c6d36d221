// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::scheduler::{Action, Scheduler};
use crate::Subscription;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::{Arc, Weak};
use std::time::Duration;

type QueueKey = (Duration, u64);

struct VirtualState {
    now: Duration,
    next_seq: u64,
    queue: BTreeMap<QueueKey, Action>,
}

/// A scheduler whose clock only moves when told to.
///
/// Actions are queued by due time and run by [`flush`](Self::flush) or
/// [`advance_by`](Self::advance_by), in due-time order and, for equal due
/// times, in scheduling order. Actions scheduled while flushing are run by the
/// same flush.
#[derive(Clone)]
pub struct VirtualTimeScheduler {
    state: Arc<Mutex<VirtualState>>,
}

impl VirtualTimeScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(VirtualState {
                now: Duration::ZERO,
                next_seq: 0,
                queue: BTreeMap::new(),
            })),
        }
    }

    /// Runs every queued action, advancing the clock to each due time.
    pub fn flush(&self) {
        while self.run_next(None) {}
    }

    /// Runs the actions due within `duration` and moves the clock forward by it.
    pub fn advance_by(&self, duration: Duration) {
        let target = self.state.lock().now + duration;
        while self.run_next(Some(target)) {}
        let mut state = self.state.lock();
        if state.now < target {
            state.now = target;
        }
    }

    /// Number of queued actions.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.state.lock().queue.len()
    }

    fn run_next(&self, until: Option<Duration>) -> bool {
        let action = {
            let mut state = self.state.lock();
            let Some((&(due, seq), _)) = state.queue.first_key_value() else {
                return false;
            };
            if until.is_some_and(|until| due > until) {
                return false;
            }
            state.now = due;
            state.queue.remove(&(due, seq))
        };

        if let Some(action) = action {
            action();
        }
        true
    }
}

impl Default for VirtualTimeScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for VirtualTimeScheduler {
    fn now(&self) -> Duration {
        self.state.lock().now
    }

    fn schedule(&self, delay: Duration, action: Action) -> Subscription {
        let key = {
            let mut state = self.state.lock();
            let key = (state.now + delay, state.next_seq);
            state.next_seq += 1;
            state.queue.insert(key, action);
            key
        };

        let subscription = Subscription::new();
        let state: Weak<Mutex<VirtualState>> = Arc::downgrade(&self.state);
        subscription.add(move || {
            if let Some(state) = state.upgrade() {
                state.lock().queue.remove(&key);
            }
        });
        subscription
    }
}
