// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use regex::Regex;
use std::fmt;
use std::time::Duration;
use subtrack_core::Subscribers;
use subtrack_error::{Result, SubtrackError};

/// What [`print_subscribers`](crate::PrintSubscribersExt::print_subscribers)
/// prints and when.
///
/// Every setting is optional; the defaults print each logical subscription
/// once, immediately, with its stack untouched.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use subtrack_report::PrintOptions;
/// use subtrack_test_utils::FakeSubscription;
///
/// # fn main() -> subtrack_error::Result<()> {
/// let options = PrintOptions::<FakeSubscription>::new()
///     .prefix("[leaks]")
///     .timeout(Duration::from_millis(2500))
///     .filter_stack_pattern(r"app::")?;
///
/// assert_eq!(options.prefix_text(), "[leaks]");
/// assert!(options.filter().is_some());
/// # Ok(())
/// # }
/// ```
pub struct PrintOptions<S> {
    prefix: String,
    timeout: Duration,
    rewrite_stack: bool,
    filter_stack: Option<Regex>,
    report_inner_subscriptions: bool,
    subscribers: Option<Subscribers<S>>,
}

impl<S> PrintOptions<S> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            prefix: String::new(),
            timeout: Duration::ZERO,
            rewrite_stack: false,
            filter_stack: None,
            report_inner_subscriptions: false,
            subscribers: None,
        }
    }

    /// Text put in front of every printed line.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Grace period before sampling, so time-based subscriptions can settle.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Drop the tracker's own frames from printed stacks.
    #[must_use]
    pub fn rewrite_stack(mut self, rewrite: bool) -> Self {
        self.rewrite_stack = rewrite;
        self
    }

    /// Keep only the stack frames matching `filter`.
    #[must_use]
    pub fn filter_stack(mut self, filter: Regex) -> Self {
        self.filter_stack = Some(filter);
        self
    }

    /// Compiles `pattern` and keeps only the stack frames matching it.
    ///
    /// # Errors
    ///
    /// Returns `SubtrackError::InvalidStackFilter` if `pattern` is not a valid regex.
    pub fn filter_stack_pattern(self, pattern: &str) -> Result<Self> {
        let filter =
            Regex::new(pattern).map_err(|e| SubtrackError::invalid_stack_filter(pattern, e))?;
        Ok(self.filter_stack(filter))
    }

    /// Print every record instead of one per chain id.
    #[must_use]
    pub fn report_inner_subscriptions(mut self, report: bool) -> Self {
        self.report_inner_subscriptions = report;
        self
    }

    /// Report from a view obtained earlier, e.g. the one `track(false)` returned.
    #[must_use]
    pub fn subscribers(mut self, subscribers: Subscribers<S>) -> Self {
        self.subscribers = Some(subscribers);
        self
    }

    #[must_use]
    pub fn prefix_text(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub const fn wait(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub const fn rewrites_stack(&self) -> bool {
        self.rewrite_stack
    }

    #[must_use]
    pub const fn filter(&self) -> Option<&Regex> {
        self.filter_stack.as_ref()
    }

    #[must_use]
    pub const fn reports_inner_subscriptions(&self) -> bool {
        self.report_inner_subscriptions
    }

    #[must_use]
    pub const fn bound_subscribers(&self) -> Option<&Subscribers<S>> {
        self.subscribers.as_ref()
    }

    /// Whether printed stacks differ from the captured ones.
    pub(crate) const fn touches_stack(&self) -> bool {
        self.rewrite_stack || self.filter_stack.is_some()
    }
}

impl<S> Default for PrintOptions<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> Clone for PrintOptions<S> {
    fn clone(&self) -> Self {
        Self {
            prefix: self.prefix.clone(),
            timeout: self.timeout,
            rewrite_stack: self.rewrite_stack,
            filter_stack: self.filter_stack.clone(),
            report_inner_subscriptions: self.report_inner_subscriptions,
            subscribers: self.subscribers.clone(),
        }
    }
}

impl<S> fmt::Debug for PrintOptions<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrintOptions")
            .field("prefix", &self.prefix)
            .field("timeout", &self.timeout)
            .field("rewrite_stack", &self.rewrite_stack)
            .field("filter_stack", &self.filter_stack.as_ref().map(Regex::as_str))
            .field("report_inner_subscriptions", &self.report_inner_subscriptions)
            .field("subscribers", &self.subscribers.is_some())
            .finish()
    }
}
