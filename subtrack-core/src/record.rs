// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{ChainId, Disposable};
use std::fmt;

/// Identity of one [`SubscriptionRecord`] inside an active set.
///
/// Keys increase monotonically, so ordering by key is creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordKey(pub(crate) u64);

impl RecordKey {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// One subscribe call observed while tracking was enabled.
///
/// The record keeps a clone of the subscription handle it describes but never
/// interprets it. It is owned by the active set until that subscription tears
/// down; snapshots only hand out shared, read-only views.
pub struct SubscriptionRecord<S> {
    key: RecordKey,
    id: ChainId,
    subscription: S,
    stack: Option<String>,
    target_frames: &'static [&'static str],
}

impl<S: Disposable> SubscriptionRecord<S> {
    pub(crate) fn new(
        key: RecordKey,
        id: ChainId,
        subscription: S,
        stack: Option<String>,
        target_frames: &'static [&'static str],
    ) -> Self {
        Self {
            key,
            id,
            subscription,
            stack,
            target_frames,
        }
    }

    #[must_use]
    pub const fn key(&self) -> RecordKey {
        self.key
    }

    /// Chain id of the root subscribe call that produced this record.
    #[must_use]
    pub const fn id(&self) -> ChainId {
        self.id
    }

    /// The tracked subscription handle.
    #[must_use]
    pub const fn subscription(&self) -> &S {
        &self.subscription
    }

    /// Call stack captured when the subscription was created, if any.
    #[must_use]
    pub fn stack(&self) -> Option<&str> {
        self.stack.as_deref()
    }

    /// Subscribe plumbing frames of the target this record was taken on.
    ///
    /// See [`SubscribeTarget::subscribe_frames`](crate::SubscribeTarget::subscribe_frames).
    #[must_use]
    pub const fn target_frames(&self) -> &'static [&'static str] {
        self.target_frames
    }
}

impl<S: Disposable> fmt::Debug for SubscriptionRecord<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionRecord")
            .field("key", &self.key)
            .field("id", &self.id)
            .field("subscription", &self.subscription)
            .field("has_stack", &self.stack.is_some())
            .finish()
    }
}

/// Renders the subscription handle followed by the captured stack.
impl<S: Disposable> fmt::Display for SubscriptionRecord<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.subscription)?;
        if let Some(stack) = &self.stack {
            write!(f, "\n{stack}")?;
        }
        Ok(())
    }
}
