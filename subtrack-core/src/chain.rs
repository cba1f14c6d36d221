// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Attribution of operator-level subscribe calls to one logical root call.
//!
//! Subscribing to an operator pipeline triggers several subscribe calls: the
//! one the user made, and one per upstream source the operators subscribe to
//! while that call is still on the stack. All of them share the chain id of
//! the outermost call. The outermost call on a thread is the *root*; it owns a
//! [`ChainScope`] and releases the thread's root marker when the scope drops,
//! including when the original subscribe unwinds.
//!
//! Nested calls are recognised only while they run synchronously inside the
//! root call. A subscribe deferred to a later scheduler turn starts a new chain.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, ThreadId};

/// Identifies the logical root subscribe call a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChainId(u64);

impl ChainId {
    /// Returns the raw counter value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Chain id counter plus the per-thread root marker.
#[derive(Debug, Default)]
pub(crate) struct ChainState {
    counter: AtomicU64,
    roots: Mutex<HashMap<ThreadId, ChainId>>,
}

impl ChainState {
    /// Enters a subscribe call on the current thread.
    ///
    /// Starts a new chain if no root call is in progress on this thread,
    /// otherwise joins the running one.
    pub(crate) fn enter(&self) -> ChainScope<'_> {
        let thread = thread::current().id();
        let mut roots = self.roots.lock();

        if let Some(&chain) = roots.get(&thread) {
            return ChainScope {
                state: self,
                thread,
                chain,
                root: false,
            };
        }

        let chain = ChainId(self.counter.fetch_add(1, Ordering::Relaxed) + 1);
        roots.insert(thread, chain);
        ChainScope {
            state: self,
            thread,
            chain,
            root: true,
        }
    }

    /// The id handed to the most recent root call, zero if none yet.
    pub(crate) fn last(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }

    #[cfg(test)]
    pub(crate) fn in_progress(&self) -> bool {
        self.roots.lock().contains_key(&thread::current().id())
    }
}

/// Scope of one subscribe call.
///
/// Dropping the root scope clears the thread's root marker.
#[must_use]
pub(crate) struct ChainScope<'a> {
    state: &'a ChainState,
    thread: ThreadId,
    chain: ChainId,
    root: bool,
}

impl ChainScope<'_> {
    pub(crate) fn chain(&self) -> ChainId {
        self.chain
    }

    pub(crate) fn is_root(&self) -> bool {
        self.root
    }
}

impl Drop for ChainScope<'_> {
    fn drop(&mut self) {
        if self.root {
            self.state.roots.lock().remove(&self.thread);
        }
    }
}
