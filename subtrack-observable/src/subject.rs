// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Hot, multi-subscriber subjects.
//!
//! A [`Subject`] broadcasts each value to the observers subscribed at the time
//! it is sent. A [`ReplaySubject`] additionally keeps the last `buffer_size`
//! values and replays them to every new subscriber.
//!
//! ## Characteristics
//!
//! - **Hot**: a plain subject does not replay; late subscribers only see
//!   values sent after they subscribed.
//! - **Terminal**: after `error` or `complete` the subject is stopped. Further
//!   sends return [`SubtrackError::Closed`]; new subscribers immediately
//!   receive the terminal notification.
//! - **Shared**: cheap to clone; all clones share the same state.
//!
//! ## Example
//!
//! ```
//! use parking_lot::Mutex;
//! use std::sync::Arc;
//! use subtrack_observable::Subject;
//!
//! # fn main() -> subtrack_error::Result<()> {
//! let subject = Subject::<i32>::new();
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = seen.clone();
//!
//! subject.next(1)?; // nobody listening yet
//! let subscription = subject
//!     .as_observable()
//!     .subscribe_next(move |v| sink.lock().push(v));
//! subject.next(2)?;
//! subject.complete();
//!
//! assert_eq!(*seen.lock(), vec![2]);
//! assert!(subscription.is_closed());
//! # Ok(())
//! # }
//! ```

use crate::{Observable, Observer, Subscriber};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::{Arc, Weak};
use subtrack_error::{Result, SubtrackError};

enum Stop {
    Completed,
    Errored(Arc<SubtrackError>),
}

impl Stop {
    fn deliver<T>(&self, subscriber: &Subscriber<T>) {
        match self {
            Self::Completed => subscriber.complete(),
            Self::Errored(error) => subscriber.error(error),
        }
    }
}

struct Replay<T> {
    capacity: usize,
    values: VecDeque<T>,
}

struct MulticastState<T> {
    stop: Option<Arc<Stop>>,
    observers: Vec<(u64, Subscriber<T>)>,
    next_id: u64,
    replay: Option<Replay<T>>,
}

/// State shared by [`Subject`] and [`ReplaySubject`].
struct Multicast<T> {
    state: Arc<Mutex<MulticastState<T>>>,
}

impl<T: Clone + Send + Sync + 'static> Multicast<T> {
    fn new(replay: Option<Replay<T>>) -> Self {
        Self {
            state: Arc::new(Mutex::new(MulticastState {
                stop: None,
                observers: Vec::new(),
                next_id: 0,
                replay,
            })),
        }
    }

    fn next(&self, value: T) -> Result<()> {
        let observers: Vec<Subscriber<T>> = {
            let mut state = self.state.lock();
            if state.stop.is_some() {
                return Err(SubtrackError::Closed);
            }
            if let Some(replay) = state.replay.as_mut() {
                if replay.capacity > 0 {
                    if replay.values.len() == replay.capacity {
                        replay.values.pop_front();
                    }
                    replay.values.push_back(value.clone());
                }
            }
            state.observers.iter().map(|(_, o)| o.clone()).collect()
        };

        for observer in observers {
            observer.next(value.clone());
        }
        Ok(())
    }

    fn stop(&self, stop: Stop) {
        let (stop, observers) = {
            let mut state = self.state.lock();
            if state.stop.is_some() {
                return;
            }
            let stop = Arc::new(stop);
            state.stop = Some(stop.clone());
            (stop, std::mem::take(&mut state.observers))
        };

        for (_, observer) in observers {
            stop.deliver(&observer);
        }
    }

    fn register(&self, subscriber: Subscriber<T>) {
        let (replayed, stop, id) = {
            let mut state = self.state.lock();
            let replayed: Vec<T> = state
                .replay
                .as_ref()
                .map(|replay| replay.values.iter().cloned().collect())
                .unwrap_or_default();
            match state.stop.clone() {
                Some(stop) => (replayed, Some(stop), None),
                None => {
                    let id = state.next_id;
                    state.next_id += 1;
                    state.observers.push((id, subscriber.clone()));
                    (replayed, None, Some(id))
                }
            }
        };

        for value in replayed {
            subscriber.next(value);
        }

        if let Some(stop) = stop {
            stop.deliver(&subscriber);
            return;
        }

        if let Some(id) = id {
            let state: Weak<Mutex<MulticastState<T>>> = Arc::downgrade(&self.state);
            subscriber.add(move || {
                if let Some(state) = state.upgrade() {
                    state.lock().observers.retain(|(observer, _)| *observer != id);
                }
            });
        }
    }

    fn as_observable(&self) -> Observable<T> {
        let multicast = self.clone();
        Observable::new(move |subscriber| multicast.register(subscriber))
    }

    fn observer_count(&self) -> usize {
        self.state.lock().observers.len()
    }

    fn is_stopped(&self) -> bool {
        self.state.lock().stop.is_some()
    }
}

impl<T> Clone for Multicast<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

/// A hot subject that broadcasts values to all current subscribers.
///
/// See the [module documentation](self) for details.
pub struct Subject<T> {
    inner: Multicast<T>,
}

impl<T: Clone + Send + Sync + 'static> Subject<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Multicast::new(None),
        }
    }

    /// Sends `value` to every current subscriber.
    ///
    /// # Errors
    ///
    /// Returns `SubtrackError::Closed` if the subject has been stopped.
    pub fn next(&self, value: T) -> Result<()> {
        self.inner.next(value)
    }

    /// Sends `error` to every subscriber and stops the subject.
    pub fn error(&self, error: SubtrackError) {
        self.inner.stop(Stop::Errored(Arc::new(error)));
    }

    /// Completes every subscriber and stops the subject.
    ///
    /// Idempotent.
    pub fn complete(&self) {
        self.inner.stop(Stop::Completed);
    }

    /// The subject as an observable; each subscribe call registers one observer.
    #[must_use]
    pub fn as_observable(&self) -> Observable<T> {
        self.inner.as_observable()
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.inner.observer_count()
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.inner.is_stopped()
    }
}

impl<T: Clone + Send + Sync + 'static> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Subject<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Observer<T> for Subject<T> {
    fn next(&self, value: T) {
        // Values arriving after the subject stopped are dropped.
        let _ = Subject::next(self, value);
    }

    fn error(&self, error: &SubtrackError) {
        Subject::error(self, SubtrackError::stream_error(error.to_string()));
    }

    fn complete(&self) {
        Subject::complete(self);
    }
}

/// A subject that replays its last `buffer_size` values to new subscribers.
///
/// A stopped replay subject still replays its buffer before delivering the
/// terminal notification.
pub struct ReplaySubject<T> {
    inner: Multicast<T>,
}

impl<T: Clone + Send + Sync + 'static> ReplaySubject<T> {
    #[must_use]
    pub fn new(buffer_size: usize) -> Self {
        Self {
            inner: Multicast::new(Some(Replay {
                capacity: buffer_size,
                values: VecDeque::new(),
            })),
        }
    }

    /// Buffers `value` and sends it to every current subscriber.
    ///
    /// # Errors
    ///
    /// Returns `SubtrackError::Closed` if the subject has been stopped.
    pub fn next(&self, value: T) -> Result<()> {
        self.inner.next(value)
    }

    pub fn error(&self, error: SubtrackError) {
        self.inner.stop(Stop::Errored(Arc::new(error)));
    }

    pub fn complete(&self) {
        self.inner.stop(Stop::Completed);
    }

    #[must_use]
    pub fn as_observable(&self) -> Observable<T> {
        self.inner.as_observable()
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.inner.observer_count()
    }

    #[must_use]
    pub fn is_stopped(&self) -> bool {
        self.inner.is_stopped()
    }
}

impl<T> Clone for ReplaySubject<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Observer<T> for ReplaySubject<T> {
    fn next(&self, value: T) {
        let _ = ReplaySubject::next(self, value);
    }

    fn error(&self, error: &SubtrackError) {
        ReplaySubject::error(self, SubtrackError::stream_error(error.to_string()));
    }

    fn complete(&self) {
        ReplaySubject::complete(self);
    }
}
