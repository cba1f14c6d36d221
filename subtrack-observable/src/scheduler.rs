// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::Subscription;
use std::time::Duration;

/// A deferred unit of work.
pub type Action = Box<dyn FnOnce() + Send + 'static>;

/// Runs actions after a delay.
///
/// Used by time-based operators such as [`delay`](crate::Observable::delay).
pub trait Scheduler: Send + Sync + 'static {
    /// Time elapsed on this scheduler's clock.
    fn now(&self) -> Duration;

    /// Runs `action` once `delay` has elapsed.
    ///
    /// Unsubscribing the returned handle before then cancels the action.
    fn schedule(&self, delay: Duration, action: Action) -> Subscription;
}
