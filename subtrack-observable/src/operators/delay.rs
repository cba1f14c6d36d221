// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::scheduler::Scheduler;
use crate::{Observable, Observer, Subscriber, Subscription};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use subtrack_error::SubtrackError;

#[derive(Default)]
struct DelayState {
    in_flight: usize,
    upstream_done: bool,
    next_seq: u64,
    /// Scheduled actions that have not run yet. `None` until `schedule` has
    /// returned the action's handle.
    pending: HashMap<u64, Option<Subscription>>,
}

impl DelayState {
    fn cancel_pending(&mut self) -> Vec<Subscription> {
        self.pending.drain().filter_map(|(_, action)| action).collect()
    }
}

struct DelayObserver<T> {
    subscriber: Subscriber<T>,
    scheduler: Arc<dyn Scheduler>,
    due: Duration,
    state: Arc<Mutex<DelayState>>,
}

impl<T: Clone + Send + Sync + 'static> Observer<T> for DelayObserver<T> {
    fn next(&self, value: T) {
        let seq = {
            let mut state = self.state.lock();
            state.in_flight += 1;
            state.next_seq += 1;
            let seq = state.next_seq;
            state.pending.insert(seq, None);
            seq
        };

        let subscriber = self.subscriber.clone();
        let state = self.state.clone();
        let action = self.scheduler.schedule(
            self.due,
            Box::new(move || {
                state.lock().pending.remove(&seq);
                subscriber.next(value);
                let finished = {
                    let mut state = state.lock();
                    state.in_flight -= 1;
                    state.in_flight == 0 && state.upstream_done
                };
                if finished {
                    subscriber.complete();
                }
            }),
        );

        // The action may already have run on another thread.
        if let Some(slot) = self.state.lock().pending.get_mut(&seq) {
            *slot = Some(action.clone());
        }
        if self.subscriber.is_closed() {
            action.unsubscribe();
        }
    }

    fn error(&self, error: &SubtrackError) {
        self.subscriber.error(error);
    }

    fn complete(&self) {
        let finished = {
            let mut state = self.state.lock();
            state.upstream_done = true;
            state.in_flight == 0
        };
        if finished {
            self.subscriber.complete();
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Observable<T> {
    /// Shifts every value by `due` on `scheduler`.
    ///
    /// Errors pass through without delay. Completion waits for the values
    /// still in flight; with nothing in flight it is immediate.
    #[must_use]
    pub fn delay(&self, due: Duration, scheduler: impl Scheduler) -> Self {
        let source = self.clone();
        let scheduler: Arc<dyn Scheduler> = Arc::new(scheduler);

        Self::new(move |subscriber: Subscriber<T>| {
            let state = Arc::new(Mutex::new(DelayState::default()));
            let cancel = state.clone();
            subscriber.add(move || {
                let pending = cancel.lock().cancel_pending();
                for action in pending {
                    action.unsubscribe();
                }
            });

            let observer = DelayObserver {
                subscriber: subscriber.clone(),
                scheduler: scheduler.clone(),
                due,
                state,
            };
            let upstream = source.subscribe(observer);
            subscriber.add_child(&upstream);
        })
    }
}
