// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::logging::{debug, trace};
use crate::tracker::TrackerInner;
use crate::{Disposable, OriginalSubscribe, SubscribeHook, SubscriptionRecord};
use std::sync::Arc;

/// The hook a [`Tracker`](crate::Tracker) installs on its target.
///
/// Every wrapped subscribe call is attributed to a chain. While tracking is
/// enabled the returned subscription is recorded in the current session's
/// active set, and a teardown is registered that removes the record from that
/// same set once the subscription ends. The subscription itself is returned
/// untouched, and a panic from the original call propagates unchanged.
pub(crate) struct Interceptor<S> {
    inner: Arc<TrackerInner<S>>,
    target_frames: &'static [&'static str],
}

impl<S: Disposable> Interceptor<S> {
    pub(crate) fn new(
        inner: Arc<TrackerInner<S>>,
        target_frames: &'static [&'static str],
    ) -> Self {
        Self {
            inner,
            target_frames,
        }
    }
}

impl<S: Disposable> SubscribeHook<S> for Interceptor<S> {
    fn subscribe<'a>(&self, original: OriginalSubscribe<'a, S>) -> S {
        let scope = self.inner.chains.enter();
        let subscription = original();

        if let Some(active) = self.inner.registry.tracking_set() {
            let record = Arc::new(SubscriptionRecord::new(
                self.inner.next_key(),
                scope.chain(),
                subscription.clone(),
                self.inner.config.stack_capture().capture(),
                self.target_frames,
            ));
            let key = record.key();
            active.insert(record);
            subscription.add_teardown(Box::new(active.remover(key)));

            if scope.is_root() {
                debug!(chain = %scope.chain(), key = key.get(), "tracking root subscription");
            } else {
                trace!(chain = %scope.chain(), key = key.get(), "tracking inner subscription");
            }
        }

        subscription
    }
}
