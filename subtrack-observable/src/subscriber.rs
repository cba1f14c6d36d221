// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Observer, Subscription};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use subtrack_error::SubtrackError;

/// The producer side of one subscription.
///
/// Forwards notifications to the subscribing observer until the subscription
/// stops. `error` and `complete` stop it and then unsubscribe, which runs the
/// teardowns the producer registered. Clones share the same state.
pub struct Subscriber<T> {
    destination: Arc<dyn Observer<T>>,
    subscription: Subscription,
    stopped: Arc<AtomicBool>,
}

impl<T> Subscriber<T> {
    pub(crate) fn new(destination: Arc<dyn Observer<T>>) -> Self {
        Self {
            destination,
            subscription: Subscription::new(),
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }

    #[must_use]
    pub fn subscription(&self) -> &Subscription {
        &self.subscription
    }

    /// Registers `teardown` to run when this subscription ends.
    pub fn add(&self, teardown: impl FnOnce() + Send + 'static) {
        self.subscription.add(teardown);
    }

    /// Ends `child` together with this subscription.
    pub fn add_child(&self, child: &Subscription) {
        self.subscription.add_child(child);
    }

    /// Whether notifications are no longer delivered.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.stopped.load(Ordering::Acquire) || self.subscription.is_closed()
    }

    pub fn next(&self, value: T) {
        if !self.is_closed() {
            self.destination.next(value);
        }
    }

    pub fn error(&self, error: &SubtrackError) {
        if self.stop() {
            self.destination.error(error);
            self.subscription.unsubscribe();
        }
    }

    pub fn complete(&self) {
        if self.stop() {
            self.destination.complete();
            self.subscription.unsubscribe();
        }
    }

    pub fn unsubscribe(&self) {
        self.stopped.store(true, Ordering::Release);
        self.subscription.unsubscribe();
    }

    /// Marks the subscriber stopped; `true` only for the call that stopped it.
    fn stop(&self) -> bool {
        !self.subscription.is_closed() && !self.stopped.swap(true, Ordering::AcqRel)
    }
}

impl<T> Clone for Subscriber<T> {
    fn clone(&self) -> Self {
        Self {
            destination: self.destination.clone(),
            subscription: self.subscription.clone(),
            stopped: self.stopped.clone(),
        }
    }
}

impl<T> Observer<T> for Subscriber<T> {
    fn next(&self, value: T) {
        Subscriber::next(self, value);
    }

    fn error(&self, error: &SubtrackError) {
        Subscriber::error(self, error);
    }

    fn complete(&self) {
        Subscriber::complete(self);
    }
}
