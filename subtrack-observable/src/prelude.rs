// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Prelude module re-exporting the commonly used types.
//!
//! ```
//! use subtrack_observable::prelude::*;
//!
//! let subscription = Observable::of([1, 2, 3]).subscribe(Ignore);
//! assert!(subscription.is_closed());
//! ```

pub use crate::{
    Ignore, Observable, Observer, ReplaySubject, Scheduler, ShareReplayConfig, Subject,
    Subscription, VirtualTimeScheduler,
};

#[cfg(feature = "runtime-tokio")]
pub use crate::TokioScheduler;
