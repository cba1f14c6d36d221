// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Human-readable reports of the subscriptions a tracker still sees.
//!
//! # Overview
//!
//! - **[`PrintSubscribersExt`]** - `tracker.print_subscribers(options).await`
//! - **[`PrintOptions`]** - prefix, grace period, stack trimming and collapsing
//! - **[`write_subscribers`]** - the same report, written to any `io::Write`
//! - **[`render`]** - the formatting step on its own
//! - **[`rewrite_stack`]** - the stack trimming on its own
//!
//! # Output
//!
//! ```text
//! [leaks] Current subscriptions (including indirect/nested): 4
//! [leaks] #2: Subscription { id: 17, closed: false }
//!    3: app::widgets::Widget::mount
//!              at ./src/widgets.rs:10:5
//! ```
//!
//! Lines are printed at error level: through `tracing::error!` with the
//! `tracing` feature, to stderr otherwise.

mod logging;
mod options;
mod reporter;
mod stack;

pub use options::PrintOptions;
pub use reporter::{render, write_subscribers, PrintSubscribersExt, Report};
pub use stack::{rewrite_stack, rewrite_stack_with};
