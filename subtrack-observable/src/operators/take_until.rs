// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Observable, Observer, Subscriber};
use subtrack_error::SubtrackError;

struct Notifier<T> {
    subscriber: Subscriber<T>,
}

impl<T, U> Observer<U> for Notifier<T> {
    fn next(&self, _value: U) {
        self.subscriber.complete();
    }

    fn error(&self, error: &SubtrackError) {
        self.subscriber.error(error);
    }
}

impl<T: Clone + Send + Sync + 'static> Observable<T> {
    /// Mirrors this observable until `notifier` emits, then completes.
    ///
    /// Each subscribe call subscribes to `notifier` first and then, unless the
    /// notifier already fired, to this observable. A notifier that completes
    /// without emitting has no effect.
    #[must_use]
    pub fn take_until<U: Clone + Send + Sync + 'static>(&self, notifier: &Observable<U>) -> Self {
        let source = self.clone();
        let notifier = notifier.clone();

        Self::new(move |subscriber: Subscriber<T>| {
            let notifier_subscription = notifier.subscribe(Notifier {
                subscriber: subscriber.clone(),
            });
            subscriber.add_child(&notifier_subscription);

            if subscriber.is_closed() {
                return;
            }

            let source_subscription = source.subscribe(subscriber.clone());
            subscriber.add_child(&source_subscription);
        })
    }
}
