// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Disposable, RecordKey, SubscriptionRecord};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::{Arc, Weak};

type Records<S> = BTreeMap<RecordKey, Arc<SubscriptionRecord<S>>>;

/// The set of live records of one tracking session.
///
/// Clones share the same set.
pub(crate) struct ActiveSet<S> {
    records: Arc<Mutex<Records<S>>>,
}

impl<S: Disposable> ActiveSet<S> {
    pub(crate) fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(BTreeMap::new())),
        }
    }

    pub(crate) fn insert(&self, record: Arc<SubscriptionRecord<S>>) {
        self.records.lock().insert(record.key(), record);
    }

    pub(crate) fn snapshot(&self) -> Vec<Arc<SubscriptionRecord<S>>> {
        self.records.lock().values().cloned().collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.records.lock().len()
    }

    /// A handle that removes `key` from this set, and only this set.
    ///
    /// Removing an absent key, or from a set nobody holds anymore, does nothing.
    pub(crate) fn remover(&self, key: RecordKey) -> impl FnOnce() + Send + 'static {
        let records: Weak<Mutex<Records<S>>> = Arc::downgrade(&self.records);
        move || {
            if let Some(records) = records.upgrade() {
                records.lock().remove(&key);
            }
        }
    }

    pub(crate) fn same_set(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.records, &other.records)
    }
}

impl<S> Clone for ActiveSet<S> {
    fn clone(&self) -> Self {
        Self {
            records: self.records.clone(),
        }
    }
}

struct RegistryState<S> {
    tracking: bool,
    active: ActiveSet<S>,
}

/// Tracking flag plus the current session's active set.
pub(crate) struct Registry<S> {
    state: Mutex<RegistryState<S>>,
}

impl<S: Disposable> Registry<S> {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(RegistryState {
                tracking: false,
                active: ActiveSet::new(),
            }),
        }
    }

    /// Switches tracking on or off.
    ///
    /// Switching on starts a new session with a fresh, empty set. Switching
    /// off freezes the current set. Returns whether the state changed, and the
    /// set that is current afterwards.
    pub(crate) fn track(&self, enable: bool) -> (bool, ActiveSet<S>) {
        let mut state = self.state.lock();
        if state.tracking == enable {
            return (false, state.active.clone());
        }

        state.tracking = enable;
        if enable {
            state.active = ActiveSet::new();
        }
        (true, state.active.clone())
    }

    pub(crate) fn is_tracking(&self) -> bool {
        self.state.lock().tracking
    }

    pub(crate) fn active(&self) -> ActiveSet<S> {
        self.state.lock().active.clone()
    }

    /// The set new records go to, or `None` while tracking is off.
    pub(crate) fn tracking_set(&self) -> Option<ActiveSet<S>> {
        let state = self.state.lock();
        state.tracking.then(|| state.active.clone())
    }
}
