// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::logging::error;
use crate::stack::rewrite_stack_with;
use crate::PrintOptions;
use async_trait::async_trait;
use std::collections::HashSet;
use std::io::Write;
use std::sync::Arc;
use subtrack_core::{Disposable, Subscribers, SubscriptionRecord, Tracker};
use subtrack_error::{Result, ResultExt};

/// The lines printed for one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    total: usize,
    lines: Vec<String>,
}

impl Report {
    /// Number of live records in the snapshot, inner subscriptions included.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    /// The header followed by one entry per reported record; empty when
    /// nothing was live.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of records that got their own entry.
    #[must_use]
    pub fn reported(&self) -> usize {
        self.lines.len().saturating_sub(1)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

fn prefixed(prefix: &str, text: &str) -> String {
    if prefix.is_empty() {
        text.to_string()
    } else {
        format!("{prefix} {text}")
    }
}

fn describe<S: Disposable>(record: &SubscriptionRecord<S>, options: &PrintOptions<S>) -> String {
    let subscription = format!("{:?}", record.subscription());
    match record.stack() {
        Some(stack) if options.touches_stack() => format!(
            "{subscription}\n{}",
            rewrite_stack_with(
                stack,
                options.rewrites_stack(),
                options.filter(),
                record.target_frames(),
            )
        ),
        Some(stack) => format!("{subscription}\n{stack}"),
        None => subscription,
    }
}

/// Formats `snapshot` without printing it.
///
/// Records sharing a chain id collapse into the first one unless
/// `report_inner_subscriptions` is set. Records are read, never modified.
#[must_use]
pub fn render<S: Disposable>(
    snapshot: &[Arc<SubscriptionRecord<S>>],
    options: &PrintOptions<S>,
) -> Report {
    if snapshot.is_empty() {
        return Report::default();
    }

    let prefix = options.prefix_text();
    let mut lines = vec![prefixed(
        prefix,
        &format!(
            "Current subscriptions (including indirect/nested): {}",
            snapshot.len()
        ),
    )];

    let mut reported = HashSet::new();
    for record in snapshot {
        if !reported.insert(record.id()) && !options.reports_inner_subscriptions() {
            continue;
        }
        lines.push(prefixed(
            prefix,
            &format!("{}: {}", record.id(), describe(record, options)),
        ));
    }

    Report {
        total: snapshot.len(),
        lines,
    }
}

/// Writes the report for `subscribers` to `writer`, one entry per line.
///
/// Does not wait; `options.wait()` only applies to
/// [`print_subscribers`](PrintSubscribersExt::print_subscribers).
///
/// # Errors
///
/// Returns `SubtrackError::Io` if writing fails.
pub fn write_subscribers<S: Disposable>(
    writer: &mut impl Write,
    subscribers: &Subscribers<S>,
    options: &PrintOptions<S>,
) -> Result<Report> {
    let report = render(&subscribers.current(), options);
    for line in report.lines() {
        writeln!(writer, "{line}").context("writing subscription report")?;
    }
    writer.flush().context("flushing subscription report")?;
    Ok(report)
}

/// Extension trait printing the live subscriptions of a [`Tracker`].
#[async_trait]
pub trait PrintSubscribersExt<S> {
    /// Waits `options.wait()`, takes one snapshot and prints it to the
    /// error stream.
    ///
    /// The view is taken from `options` if one was bound, otherwise from the
    /// tracker's current session, before waiting. Nothing is printed when no
    /// subscription is live. The wait is a `tokio` timer and needs a runtime
    /// with time enabled when it is not zero. A zero wait still yields once,
    /// so tasks that are already ready run before the snapshot.
    ///
    /// # Example
    ///
    /// ```
    /// use subtrack_core::setup;
    /// use subtrack_report::{PrintOptions, PrintSubscribersExt};
    /// use subtrack_test_utils::FakeTarget;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let target = FakeTarget::default();
    /// let tracker = setup(&target);
    /// tracker.start();
    ///
    /// let _leaked = target.subscribe_pipeline(3);
    /// let report = tracker
    ///     .print_subscribers(PrintOptions::new().prefix("[leaks]"))
    ///     .await;
    ///
    /// assert_eq!(report.total(), 3);
    /// assert_eq!(report.reported(), 1);
    /// # }
    /// ```
    async fn print_subscribers(&self, options: PrintOptions<S>) -> Report;
}

#[async_trait]
impl<S: Disposable> PrintSubscribersExt<S> for Tracker<S> {
    async fn print_subscribers(&self, options: PrintOptions<S>) -> Report {
        let subscribers = options
            .bound_subscribers()
            .cloned()
            .unwrap_or_else(|| self.get_subscribers());

        if options.wait().is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(options.wait()).await;
        }

        let report = render(&subscribers.current(), &options);
        for line in report.lines() {
            error!("{line}");
        }
        report
    }
}
