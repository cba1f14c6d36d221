// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::observer::FnObserver;
use crate::{prototype, Observer, Subscriber, Subscription};
use std::sync::Arc;
use subtrack_error::SubtrackError;

type Producer<T> = dyn Fn(Subscriber<T>) + Send + Sync;

/// A cold, push-based source of values.
///
/// The producer runs once per subscribe call and pushes notifications into
/// the [`Subscriber`] it receives. It registers its cleanup on that
/// subscriber; nothing runs after the subscription ends.
///
/// # Example
///
/// ```
/// use parking_lot::Mutex;
/// use std::sync::Arc;
/// use subtrack_observable::Observable;
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let sink = seen.clone();
///
/// let subscription = Observable::of([1, 2, 3]).subscribe_next(move |v| sink.lock().push(v));
///
/// assert_eq!(*seen.lock(), vec![1, 2, 3]);
/// assert!(subscription.is_closed());
/// ```
pub struct Observable<T> {
    producer: Arc<Producer<T>>,
}

impl<T: Clone + Send + Sync + 'static> Observable<T> {
    pub fn new(producer: impl Fn(Subscriber<T>) + Send + Sync + 'static) -> Self {
        Self {
            producer: Arc::new(producer),
        }
    }

    /// Never emits, never completes.
    #[must_use]
    pub fn never() -> Self {
        Self::new(|_| {})
    }

    /// Completes without emitting.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(|subscriber| subscriber.complete())
    }

    /// Emits `values` in order, then completes.
    pub fn of(values: impl IntoIterator<Item = T>) -> Self {
        let values: Vec<T> = values.into_iter().collect();
        Self::new(move |subscriber| {
            for value in &values {
                if subscriber.is_closed() {
                    return;
                }
                subscriber.next(value.clone());
            }
            subscriber.complete();
        })
    }

    /// Fails with a stream error carrying `context`.
    pub fn fail(context: impl Into<String>) -> Self {
        let context = context.into();
        Self::new(move |subscriber| {
            subscriber.error(&SubtrackError::stream_error(context.clone()));
        })
    }

    /// Subscribes `observer` and returns the handle of the new subscription.
    pub fn subscribe(&self, observer: impl Observer<T> + 'static) -> Subscription {
        let destination: Arc<dyn Observer<T>> = Arc::new(observer);
        prototype().subscribe(|| self.subscribe_unhooked(destination))
    }

    /// Subscribes a closure receiving each value.
    pub fn subscribe_next(&self, next: impl Fn(T) + Send + Sync + 'static) -> Subscription {
        self.subscribe(FnObserver(next))
    }

    fn subscribe_unhooked(&self, destination: Arc<dyn Observer<T>>) -> Subscription {
        let subscriber = Subscriber::new(destination);
        let subscription = subscriber.subscription().clone();
        (self.producer)(subscriber);
        subscription
    }
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            producer: self.producer.clone(),
        }
    }
}
