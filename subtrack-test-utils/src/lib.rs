// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities and fakes for the subtrack workspace.
//!
//! This crate is meant for development and testing only. It provides a
//! self-contained subscribe target so tracker behaviour can be tested without
//! a reactive library, and without touching any process-wide patch point.
//!
//! # Key Types
//!
//! - [`FakeSubscription`] - a [`Disposable`](subtrack_core::Disposable) handle
//!   that runs its teardowns exactly once
//! - [`FakeTarget`] - a [`SubscribeTarget`](subtrack_core::SubscribeTarget)
//!   owning its own hook list; each test creates its own
//!
//! # Example
//!
//! ```rust
//! use subtrack_test_utils::FakeTarget;
//!
//! let target = FakeTarget::new();
//! let tracker = subtrack_core::setup(&target);
//! tracker.track(true);
//!
//! // One user-visible subscribe call, three operator stages
//! let subscription = target.subscribe_pipeline(3);
//! let subscribers = tracker.get_subscribers();
//! assert_eq!(subscribers.len(), 3);
//! assert_eq!(subscribers.chain_count(), 1);
//!
//! subscription.unsubscribe();
//! assert!(subscribers.is_empty());
//! ```

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod fake_subscription;
pub mod fake_target;
pub mod stacks;

pub use fake_subscription::FakeSubscription;
pub use fake_target::FakeTarget;
