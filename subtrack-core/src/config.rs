// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::backtrace::{Backtrace, BacktraceStatus};

/// When to capture a call stack for each tracked subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StackCapture {
    /// Never capture; records carry no stack.
    Disabled,
    /// Capture when `RUST_BACKTRACE`/`RUST_LIB_BACKTRACE` enable it.
    Enabled,
    /// Always capture, regardless of the environment.
    #[default]
    Force,
}

impl StackCapture {
    pub(crate) fn capture(self) -> Option<String> {
        let backtrace = match self {
            Self::Disabled => return None,
            Self::Enabled => Backtrace::capture(),
            Self::Force => Backtrace::force_capture(),
        };

        match backtrace.status() {
            BacktraceStatus::Captured => Some(backtrace.to_string()),
            _ => None,
        }
    }
}

/// Configuration of a [`Tracker`](crate::Tracker).
///
/// ```
/// use subtrack_core::{StackCapture, TrackerConfig};
///
/// let config = TrackerConfig::default().with_stack_capture(StackCapture::Disabled);
/// assert_eq!(config.stack_capture(), StackCapture::Disabled);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrackerConfig {
    stack_capture: StackCapture,
}

impl TrackerConfig {
    /// Sets the stack capture policy.
    #[must_use]
    pub const fn with_stack_capture(mut self, stack_capture: StackCapture) -> Self {
        self.stack_capture = stack_capture;
        self
    }

    #[must_use]
    pub const fn stack_capture(&self) -> StackCapture {
        self.stack_capture
    }
}
