// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::chain::ChainState;
use crate::interceptor::Interceptor;
use crate::logging::debug;
use crate::registry::Registry;
use crate::{Disposable, RecordKey, SubscribeTarget, Subscribers, TrackerConfig};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub(crate) struct TrackerInner<S> {
    pub(crate) registry: Registry<S>,
    pub(crate) chains: ChainState,
    pub(crate) config: TrackerConfig,
    keys: AtomicU64,
}

impl<S: Disposable> TrackerInner<S> {
    pub(crate) fn next_key(&self) -> RecordKey {
        RecordKey(self.keys.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

/// Installs a tracker on `target` with the default configuration.
///
/// Call this once per target. Every call wraps the target's subscribe
/// operation again, so a second tracker on the same target sees the
/// subscriptions too, and the same subscribe calls are counted by both.
///
/// Until [`Tracker::track`] enables tracking, subscriptions are attributed
/// to chains but not recorded.
///
/// # Example
///
/// ```
/// use subtrack_test_utils::FakeTarget;
///
/// let target = FakeTarget::new();
/// let tracker = subtrack_core::setup(&target);
///
/// tracker.track(true);
/// let subscription = target.subscribe();
/// assert_eq!(tracker.get_subscribers().len(), 1);
///
/// subscription.unsubscribe();
/// assert!(tracker.get_subscribers().is_empty());
/// ```
pub fn setup<T>(target: &T) -> Tracker<T::Subscription>
where
    T: SubscribeTarget + ?Sized,
{
    setup_with_config(target, TrackerConfig::default())
}

/// Installs a tracker on `target` with an explicit configuration.
pub fn setup_with_config<T>(target: &T, config: TrackerConfig) -> Tracker<T::Subscription>
where
    T: SubscribeTarget + ?Sized,
{
    let tracker = Tracker::new(config);
    let interceptor = Interceptor::new(tracker.inner.clone(), target.subscribe_frames());
    target.wrap_subscribe(Arc::new(interceptor));
    debug!(?config, "subscribe interceptor installed");
    tracker
}

/// Handle to one tracking context: the registry, chain counter and
/// configuration shared with the interceptor installed by [`setup`].
///
/// Cheap to clone; all clones share the same state.
pub struct Tracker<S> {
    inner: Arc<TrackerInner<S>>,
}

impl<S: Disposable> Tracker<S> {
    fn new(config: TrackerConfig) -> Self {
        Self {
            inner: Arc::new(TrackerInner {
                registry: Registry::new(),
                chains: ChainState::default(),
                config,
                keys: AtomicU64::new(0),
            }),
        }
    }

    /// Starts (`true`) or stops (`false`) recording subscriptions.
    ///
    /// Starting begins a new session with an empty set; records of the
    /// previous session are no longer counted. Stopping freezes the current
    /// set without clearing it. Asking for the state already in effect
    /// changes nothing. Returns a view over the set that is current afterwards.
    pub fn track(&self, enable: bool) -> Subscribers<S> {
        let (changed, active) = self.inner.registry.track(enable);
        if changed {
            debug!(enable, "subscription tracking toggled");
        }
        Subscribers::new(active)
    }

    /// Shorthand for `track(true)`.
    pub fn start(&self) -> Subscribers<S> {
        self.track(true)
    }

    /// Shorthand for `track(false)`.
    pub fn stop(&self) -> Subscribers<S> {
        self.track(false)
    }

    #[must_use]
    pub fn is_tracking(&self) -> bool {
        self.inner.registry.is_tracking()
    }

    /// Returns a view over the current session's set.
    #[must_use]
    pub fn get_subscribers(&self) -> Subscribers<S> {
        Subscribers::new(self.inner.registry.active())
    }

    /// The chain id most recently handed to a root subscribe call, zero if
    /// no subscribe call has been intercepted yet.
    #[must_use]
    pub fn last_chain_id(&self) -> u64 {
        self.inner.chains.last()
    }

    #[must_use]
    pub fn config(&self) -> TrackerConfig {
        self.inner.config
    }
}

impl<S> Clone for Tracker<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<S: Disposable> fmt::Debug for Tracker<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tracker")
            .field("tracking", &self.is_tracking())
            .field("last_chain_id", &self.last_chain_id())
            .field("config", &self.inner.config)
            .finish()
    }
}
