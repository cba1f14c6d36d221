// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Observable, Observer, ReplaySubject, Subscriber, Subscription};
use parking_lot::Mutex;
use std::sync::{Arc, Weak};
use subtrack_error::SubtrackError;

/// Configuration of [`Observable::share_replay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShareReplayConfig {
    /// How many of the latest values late subscribers receive.
    pub buffer_size: usize,
    /// Disconnect from the source once the last subscriber leaves.
    pub ref_count: bool,
}

impl Default for ShareReplayConfig {
    fn default() -> Self {
        Self {
            buffer_size: usize::MAX,
            ref_count: false,
        }
    }
}

struct ShareState<T> {
    subject: Option<ReplaySubject<T>>,
    connection: Option<Subscription>,
    connecting: bool,
    subscribers: usize,
}

impl<T> ShareState<T> {
    /// Forgets the subject and hands back the source connection, if any.
    fn reset(&mut self) -> Option<Subscription> {
        self.subject = None;
        self.connection.take()
    }
}

/// Feeds source notifications into the shared subject.
struct Connection<T> {
    subject: ReplaySubject<T>,
    shared: Weak<Mutex<ShareState<T>>>,
}

impl<T: Clone + Send + Sync + 'static> Observer<T> for Connection<T> {
    fn next(&self, value: T) {
        let _ = self.subject.next(value);
    }

    fn error(&self, error: &SubtrackError) {
        // A failed source is re-subscribed by the next subscriber.
        if let Some(shared) = self.shared.upgrade() {
            let mut state = shared.lock();
            state.subject = None;
            state.connection = None;
        }
        self.subject.error(SubtrackError::stream_error(error.to_string()));
    }

    fn complete(&self) {
        self.subject.complete();
    }
}

impl<T: Clone + Send + Sync + 'static> Observable<T> {
    /// Shares one subscription to this observable among all subscribers,
    /// replaying the last `buffer_size` values to each new one.
    ///
    /// Every subscribe call subscribes to an internal [`ReplaySubject`]; the
    /// first one also connects the subject to this observable. With
    /// `ref_count` the connection is dropped when the last subscriber leaves,
    /// and the next subscriber starts over with a fresh subject.
    #[must_use]
    pub fn share_replay(&self, config: ShareReplayConfig) -> Self {
        let source = self.clone();
        let shared = Arc::new(Mutex::new(ShareState {
            subject: None,
            connection: None,
            connecting: false,
            subscribers: 0,
        }));

        Self::new(move |subscriber: Subscriber<T>| {
            let subject = {
                let mut state = shared.lock();
                state.subscribers += 1;
                state
                    .subject
                    .get_or_insert_with(|| ReplaySubject::new(config.buffer_size))
                    .clone()
            };

            let release: Weak<Mutex<ShareState<T>>> = Arc::downgrade(&shared);
            subscriber.add(move || {
                let Some(shared) = release.upgrade() else {
                    return;
                };
                let stale = {
                    let mut state = shared.lock();
                    state.subscribers -= 1;
                    if state.subscribers == 0 && config.ref_count && !subject_done(&state) {
                        state.reset()
                    } else {
                        None
                    }
                };
                if let Some(connection) = stale {
                    connection.unsubscribe();
                }
            });

            let inner = subject.as_observable().subscribe(subscriber.clone());
            subscriber.add_child(&inner);

            let connect = {
                let mut state = shared.lock();
                let connect =
                    state.connection.is_none() && !state.connecting && state.subscribers > 0;
                state.connecting |= connect;
                connect
            };
            if !connect {
                return;
            }

            let connection = source.subscribe(Connection {
                subject: subject.clone(),
                shared: Arc::downgrade(&shared),
            });
            let stale = {
                let mut state = shared.lock();
                state.connecting = false;
                if state.subscribers > 0 && !connection.is_closed() {
                    state.connection = Some(connection);
                    None
                } else {
                    Some(connection)
                }
            };
            if let Some(connection) = stale {
                connection.unsubscribe();
            }
        })
    }
}

/// A subject that already stopped keeps replaying; there is nothing to reset.
fn subject_done<T: Clone + Send + Sync + 'static>(state: &ShareState<T>) -> bool {
    state.subject.as_ref().is_some_and(ReplaySubject::is_stopped)
}
