// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::scheduler::{Action, Scheduler};
use crate::Subscription;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::{sleep, Instant};

/// Runs actions on a tokio runtime after a real (or paused-test) delay.
#[derive(Clone, Debug)]
pub struct TokioScheduler {
    handle: Handle,
    origin: Instant,
}

impl TokioScheduler {
    /// A scheduler on the runtime the caller is running in.
    ///
    /// # Panics
    ///
    /// Panics when called outside of a tokio runtime.
    #[must_use]
    pub fn current() -> Self {
        Self::from_handle(Handle::current())
    }

    #[must_use]
    pub fn from_handle(handle: Handle) -> Self {
        Self {
            handle,
            origin: Instant::now(),
        }
    }
}

impl Scheduler for TokioScheduler {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn schedule(&self, delay: Duration, action: Action) -> Subscription {
        let task = self.handle.spawn(async move {
            sleep(delay).await;
            action();
        });

        let subscription = Subscription::new();
        subscription.add(move || task.abort());
        subscription
    }
}
