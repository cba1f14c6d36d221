// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::LazyLock;
use subtrack::{prototype, setup, Subscribers, Subscription, Tracker};

/// The one tracker wrapped around the process-wide patch point.
static TRACKER: LazyLock<Tracker<Subscription>> = LazyLock::new(|| setup(prototype()));

/// Starts a fresh tracking session and checks it begins empty.
pub fn fresh_session() -> (Tracker<Subscription>, Subscribers<Subscription>) {
    let tracker = TRACKER.clone();
    tracker.stop();
    let subscribers = tracker.start();
    assert_eq!(subscribers.current().len(), 0);
    (tracker, subscribers)
}

/// Ends the session and checks nothing outlived it.
pub fn assert_no_leaks(tracker: &Tracker<Subscription>) {
    let left = tracker.get_subscribers().current();
    tracker.stop();
    assert_eq!(left.len(), 0, "leaked subscriptions: {left:?}");
}
