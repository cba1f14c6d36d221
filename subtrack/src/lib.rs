// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Subtrack
//!
//! Find reactive-stream subscriptions that were never torn down.
//!
//! ## Overview
//!
//! Subtrack wraps the subscribe operation of a reactive library and, while
//! tracking is on, records every subscription that is still alive. Each
//! record carries the chain id of the user-initiated subscribe call that
//! caused it, so the inner subscriptions an operator pipeline makes are
//! grouped with the call that created them.
//!
//! - **[`setup`]** wraps a [`SubscribeTarget`] once and returns a [`Tracker`]
//! - **[`Tracker::track`]** starts or stops a session
//! - **[`Subscribers::current`]** lists the records still alive
//! - **[`PrintSubscribersExt::print_subscribers`]** prints them, after an
//!   optional grace period
//!
//! Subtrack does not decide what is a leak. It shows what is alive; whether
//! that is expected is up to the test that looks.
//!
//! ## Quick Start
//!
//! ```rust
//! use subtrack::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> subtrack::Result<()> {
//! let tracker = setup(prototype());
//! tracker.start();
//!
//! let source = Subject::<i32>::new();
//! let end = Subject::<()>::new();
//! let subscription = source
//!     .as_observable()
//!     .take_until(&end.as_observable())
//!     .subscribe(Ignore);
//!
//! // The subscribe call itself, plus the two subscriptions take_until makes.
//! assert_eq!(tracker.get_subscribers().len(), 3);
//! tracker
//!     .print_subscribers(PrintOptions::new().prefix("[leaks]"))
//!     .await;
//!
//! end.next(())?;
//! assert!(subscription.is_closed());
//! assert!(tracker.get_subscribers().is_empty());
//! # Ok(())
//! # }
//! ```

pub use subtrack_core::{
    setup, setup_with_config, ChainId, Disposable, StackCapture, SubscribeHook, SubscribeTarget,
    Subscribers, SubscriptionRecord, Tracker, TrackerConfig,
};
pub use subtrack_error::{Result, SubtrackError};
pub use subtrack_observable::{
    prototype, Observable, Observer, ReplaySubject, Scheduler, ShareReplayConfig, Subject,
    Subscription, VirtualTimeScheduler,
};
pub use subtrack_report::{
    render, rewrite_stack, rewrite_stack_with, write_subscribers, PrintOptions,
    PrintSubscribersExt, Report,
};

#[cfg(feature = "runtime-tokio")]
pub use subtrack_observable::TokioScheduler;

/// The bundled observable implementation.
pub mod observable {
    pub use subtrack_observable::*;
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{setup, PrintOptions, PrintSubscribersExt, Subscribers, Tracker};
    pub use subtrack_observable::prelude::*;
    pub use subtrack_observable::prototype;
}
