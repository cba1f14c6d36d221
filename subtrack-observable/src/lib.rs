// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Minimal push-based observables with a trackable subscribe operation.
//!
//! This crate provides cold [`Observable`]s, hot [`Subject`]s and a handful of
//! operators. Every subscribe call, including the ones operators and subjects
//! make internally, goes through one process-wide patch point returned by
//! [`prototype()`], which `subtrack_core::setup` can wrap.
//!
//! # Overview
//!
//! - **[`Observable`]** - Cold source; the producer runs once per subscribe
//! - **[`Subject`] / [`ReplaySubject`]** - Hot multicast sources
//! - **[`Subscription`]** - Handle ending a subscription and its children
//! - **`take_until`, `delay`, `share_replay`** - Operators on [`Observable`]
//! - **[`Scheduler`]** - Time abstraction used by `delay`
//!
//! # Runtime Support
//!
//! - [`VirtualTimeScheduler`] - Manually advanced clock, always available
//! - `runtime-tokio` (default) - [`TokioScheduler`] backed by the tokio timer
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use subtrack_observable::prelude::*;
//!
//! # fn main() -> subtrack_error::Result<()> {
//! let scheduler = VirtualTimeScheduler::new();
//! let source = Subject::<i32>::new();
//! let end = Subject::<()>::new();
//!
//! let subscription = source
//!     .as_observable()
//!     .take_until(&end.as_observable())
//!     .delay(Duration::from_millis(2000), scheduler.clone())
//!     .subscribe(Ignore);
//!
//! source.next(1)?;
//! end.next(())?;
//! scheduler.flush();
//!
//! assert!(subscription.is_closed());
//! # Ok(())
//! # }
//! ```

mod observable;
mod observer;
mod operators;
mod prototype;
mod scheduler;
mod schedulers;
mod subject;
mod subscriber;
mod subscription;

pub mod prelude;

pub use observable::Observable;
pub use observer::{FnObserver, Ignore, Observer};
pub use operators::ShareReplayConfig;
pub use prototype::{prototype, Prototype};
pub use scheduler::{Action, Scheduler};
pub use schedulers::VirtualTimeScheduler;
pub use subject::{ReplaySubject, Subject};
pub use subscriber::Subscriber;
pub use subscription::Subscription;

#[cfg(feature = "runtime-tokio")]
pub use schedulers::TokioScheduler;
