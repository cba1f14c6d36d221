// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Ground truth about which reactive subscriptions are alive.
//!
//! [`setup`] wraps a reactive library's subscribe operation and returns a
//! [`Tracker`]. While tracking is enabled every subscribe call is recorded as a
//! [`SubscriptionRecord`], and removed again when its subscription tears down.
//! A [`Subscribers`] view exposes what is currently alive, so a test can assert
//! that nothing outlives a test case.
//!
//! Subscribing through an operator pipeline makes one subscribe call per
//! operator stage. All records created while one user-visible subscribe call
//! is on the stack share a [`ChainId`], which lets a report collapse them into
//! one entry.

mod chain;
mod config;
mod disposable;
mod hook;
mod interceptor;
mod logging;
mod record;
mod registry;
mod subscribers;
mod tracker;

pub use self::chain::ChainId;
pub use self::config::{StackCapture, TrackerConfig};
pub use self::disposable::{Disposable, Teardown};
pub use self::hook::{invoke_hooks, OriginalSubscribe, SubscribeHook, SubscribeTarget};
pub use self::record::{RecordKey, SubscriptionRecord};
pub use self::subscribers::Subscribers;
pub use self::tracker::{setup, setup_with_config, Tracker};
pub use subtrack_error::{Result, SubtrackError};

/// Path fragments of the frames subtrack itself adds to every captured stack:
/// the interceptor and the hook chain around it.
pub const SUBSCRIBE_FRAMES: [&str; 2] = [
    "subtrack_core::interceptor",
    "subtrack_core::hook::invoke_hooks",
];
