// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The seam between subtrack and a reactive library.
//!
//! A reactive library that wants to be tracked exposes a [`SubscribeTarget`]:
//! a patch point that routes every subscribe call, including the ones its
//! operators make internally, through the installed [`SubscribeHook`]s.

use crate::Disposable;
use std::sync::Arc;

/// The not-yet-invoked original subscribe call, handed to a hook.
pub type OriginalSubscribe<'a, S> = Box<dyn FnOnce() -> S + 'a>;

/// Wraps a single subscribe invocation.
///
/// Implementations must call `original` exactly once and return its result
/// unchanged; they may only add bookkeeping around it.
pub trait SubscribeHook<S>: Send + Sync {
    /// Runs `original` and returns the subscription it produced.
    fn subscribe<'a>(&self, original: OriginalSubscribe<'a, S>) -> S;
}

/// Runs `original` through `hooks`, the last hook outermost.
///
/// Helper for [`SubscribeTarget`] implementations that keep their installed
/// hooks in a list.
pub fn invoke_hooks<'a, S>(
    hooks: &[Arc<dyn SubscribeHook<S>>],
    original: OriginalSubscribe<'a, S>,
) -> S {
    match hooks.split_last() {
        None => original(),
        Some((outer, rest)) => outer.subscribe(Box::new(move || invoke_hooks(rest, original))),
    }
}

/// A reactive type whose subscribe operation can be wrapped.
///
/// Wrapping is cumulative: each call wraps the already wrapped operation, with
/// the most recently installed hook outermost. Install a given hook once.
pub trait SubscribeTarget {
    /// The handle the wrapped subscribe operation returns.
    type Subscription: Disposable;

    /// Routes every subsequent subscribe call through `hook`.
    fn wrap_subscribe(&self, hook: Arc<dyn SubscribeHook<Self::Subscription>>);

    /// Path fragments naming this target's own subscribe plumbing in captured
    /// stack frames, such as the patch point and the public `subscribe`.
    ///
    /// Reports leave these frames out when trimming stacks, so the first frame
    /// left is the caller's.
    fn subscribe_frames(&self) -> &'static [&'static str] {
        &[]
    }
}
