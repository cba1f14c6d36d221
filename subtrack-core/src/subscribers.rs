// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::registry::ActiveSet;
use crate::{ChainId, Disposable, SubscriptionRecord};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// A view over the active set of one tracking session.
///
/// The view is bound to the set itself, not to a moment in time: every call to
/// [`current`](Self::current) reflects the subscriptions that have been added
/// or torn down up to that call. A view obtained during an earlier session
/// keeps observing that session's set, which stops receiving new records once
/// the session ends.
pub struct Subscribers<S> {
    active: ActiveSet<S>,
}

impl<S: Disposable> Subscribers<S> {
    pub(crate) fn new(active: ActiveSet<S>) -> Self {
        Self { active }
    }

    /// Returns a point-in-time copy of every record in the set, oldest first.
    #[must_use]
    pub fn current(&self) -> Vec<Arc<SubscriptionRecord<S>>> {
        self.active.snapshot()
    }

    /// Number of live records, inner subscriptions included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.active.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Distinct chain ids among the live records, ascending.
    #[must_use]
    pub fn ids(&self) -> Vec<ChainId> {
        self.current()
            .iter()
            .map(|record| record.id())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Number of logical root subscriptions still alive.
    #[must_use]
    pub fn chain_count(&self) -> usize {
        self.ids().len()
    }

    /// Whether both views observe the same tracking session.
    #[must_use]
    pub fn same_session(&self, other: &Self) -> bool {
        self.active.same_set(&other.active)
    }
}

impl<S> Clone for Subscribers<S> {
    fn clone(&self) -> Self {
        Self {
            active: self.active.clone(),
        }
    }
}

impl<S: Disposable> fmt::Debug for Subscribers<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscribers")
            .field("len", &self.len())
            .finish()
    }
}
