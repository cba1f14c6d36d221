// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt::Debug;

/// A teardown callback registered on a subscription.
pub type Teardown = Box<dyn FnOnce() + Send + 'static>;

/// The capability subtrack needs from a reactive library's subscription handle.
///
/// A subscription returned by a subscribe call must let callers register
/// teardown callbacks, and must invoke each registered callback exactly once
/// when the subscription ends, whether by completion, error or explicit
/// unsubscribe. A callback added to a subscription that has already ended
/// runs immediately.
///
/// Handles are cloned into [`SubscriptionRecord`](crate::SubscriptionRecord)s;
/// a clone must refer to the same underlying subscription.
///
/// # Example
///
/// ```
/// use parking_lot::Mutex;
/// use std::sync::Arc;
/// use subtrack_core::{Disposable, Teardown};
///
/// #[derive(Clone, Default)]
/// struct Handle {
///     #[allow(clippy::type_complexity)]
///     teardowns: Arc<Mutex<Vec<Teardown>>>,
/// }
///
/// impl std::fmt::Debug for Handle {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         f.debug_struct("Handle").finish_non_exhaustive()
///     }
/// }
///
/// impl Disposable for Handle {
///     fn add_teardown(&self, teardown: Teardown) {
///         self.teardowns.lock().push(teardown);
///     }
/// }
/// ```
pub trait Disposable: Clone + Debug + Send + Sync + 'static {
    /// Registers `teardown` to run when this subscription ends.
    fn add_teardown(&self, teardown: Teardown);
}
