// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use anyhow::Context;
use std::io;
use std::time::Duration;
use subtrack_core::{setup, setup_with_config, StackCapture, TrackerConfig};
use subtrack_error::SubtrackError;
use subtrack_report::{render, write_subscribers, PrintOptions, PrintSubscribersExt};
use subtrack_test_utils::{FakeSubscription, FakeTarget};

fn without_stacks() -> TrackerConfig {
    TrackerConfig::default().with_stack_capture(StackCapture::Disabled)
}

#[tokio::test]
async fn test_nothing_live_prints_nothing() {
    // Arrange
    let target = FakeTarget::new();
    let tracker = setup(&target);
    tracker.start();
    target.subscribe().unsubscribe();

    // Act
    let report = tracker.print_subscribers(PrintOptions::new()).await;

    // Assert
    assert!(report.is_empty());
    assert_eq!(report.total(), 0);
    assert_eq!(report.reported(), 0);
}

#[tokio::test]
async fn test_zero_timeout_lets_ready_tasks_run_first() {
    // Arrange
    let target = FakeTarget::new();
    let tracker = setup_with_config(&target, without_stacks());
    tracker.start();
    let subscription = target.subscribe();
    tokio::spawn(async move { subscription.unsubscribe() });

    // Act
    let report = tracker.print_subscribers(PrintOptions::new()).await;

    // Assert
    assert!(report.is_empty());
    assert!(tracker.get_subscribers().is_empty());
}

#[tokio::test]
async fn test_collapses_records_sharing_a_chain_id() {
    // Arrange
    let target = FakeTarget::new();
    let tracker = setup_with_config(&target, without_stacks());
    tracker.start();
    let _pipeline = target.subscribe_pipeline(3);
    let _plain = target.subscribe();

    // Act
    let report = tracker.print_subscribers(PrintOptions::new()).await;

    // Assert
    assert_eq!(report.total(), 4);
    assert_eq!(report.reported(), 2);
    assert_eq!(
        report.lines()[0],
        "Current subscriptions (including indirect/nested): 4"
    );
    assert!(report.lines()[1].starts_with("#1: FakeSubscription"));
    assert!(report.lines()[2].starts_with("#2: FakeSubscription"));
}

#[tokio::test]
async fn test_reports_inner_subscriptions_when_asked() {
    // Arrange
    let target = FakeTarget::new();
    let tracker = setup_with_config(&target, without_stacks());
    tracker.start();
    let _pipeline = target.subscribe_pipeline(3);

    // Act
    let report = tracker
        .print_subscribers(PrintOptions::new().report_inner_subscriptions(true))
        .await;

    // Assert
    assert_eq!(report.reported(), 3);
    assert!(report.lines()[1..].iter().all(|line| line.starts_with("#1: ")));
}

#[tokio::test]
async fn test_prefix_is_put_in_front_of_every_line() {
    // Arrange
    let target = FakeTarget::new();
    let tracker = setup_with_config(&target, without_stacks());
    tracker.start();
    let leaked = target.subscribe();

    // Act
    let report = tracker
        .print_subscribers(PrintOptions::new().prefix("[leaks]"))
        .await;

    // Assert
    assert_eq!(
        report.lines(),
        [
            "[leaks] Current subscriptions (including indirect/nested): 1".to_string(),
            format!("[leaks] #1: {leaked:?}"),
        ]
    );
}

#[tokio::test]
async fn test_reports_from_a_bound_view_of_a_previous_session() {
    // Arrange
    let target = FakeTarget::new();
    let tracker = setup_with_config(&target, without_stacks());
    tracker.start();
    let _leaked = target.subscribe();
    let previous = tracker.stop();
    tracker.start();

    // Act
    let current = tracker.print_subscribers(PrintOptions::new()).await;
    let bound = tracker
        .print_subscribers(PrintOptions::new().subscribers(previous))
        .await;

    // Assert
    assert!(current.is_empty());
    assert_eq!(bound.total(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_timeout_lets_delayed_teardowns_settle() {
    // Arrange
    let target = FakeTarget::new();
    let tracker = setup_with_config(&target, without_stacks());
    tracker.start();
    let delayed = target.subscribe();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        delayed.unsubscribe();
    });

    // Act
    let report = tracker
        .print_subscribers(PrintOptions::new().timeout(Duration::from_millis(200)))
        .await;

    // Assert
    assert!(report.is_empty());
    assert!(tracker.get_subscribers().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_without_timeout_a_pending_teardown_is_reported() {
    // Arrange
    let target = FakeTarget::new();
    let tracker = setup_with_config(&target, without_stacks());
    tracker.start();
    let delayed = target.subscribe();
    let handle = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        delayed.unsubscribe();
    });

    // Act
    let report = tracker.print_subscribers(PrintOptions::new()).await;

    // Assert
    assert_eq!(report.total(), 1);
    handle.abort();
}

#[test]
fn test_missing_stack_skips_rewriting() -> anyhow::Result<()> {
    // Arrange
    let target = FakeTarget::new();
    let tracker = setup_with_config(&target, without_stacks());
    tracker.start();
    let leaked = target.subscribe();
    let options = PrintOptions::new()
        .prefix("p")
        .rewrite_stack(true)
        .filter_stack_pattern("app::")?;

    // Act
    let report = render(&tracker.get_subscribers().current(), &options);

    // Assert
    assert_eq!(report.lines()[1], format!("p #1: {leaked:?}"));

    Ok(())
}

#[test]
fn test_unmatched_filter_falls_back_to_full_stack() -> anyhow::Result<()> {
    // Arrange
    let target = FakeTarget::new();
    let tracker = setup(&target);
    tracker.start();
    let _leaked = target.subscribe();
    let records = tracker.get_subscribers().current();
    let stack = records[0].stack().expect("stack captured by default");
    let options = PrintOptions::new().filter_stack_pattern("^matches no frame at all$")?;

    // Act
    let report = render(&records, &options);

    // Assert
    assert!(report.lines()[1].ends_with(stack));

    Ok(())
}

#[test]
fn test_rewritten_stack_starts_at_the_calling_test() -> anyhow::Result<()> {
    // Arrange
    let target = FakeTarget::new();
    let tracker = setup(&target);
    tracker.start();
    let _leaked = target.subscribe();
    let records = tracker.get_subscribers().current();
    let options = PrintOptions::new().rewrite_stack(true);

    // Act
    let report = render(&records, &options);

    // Assert
    let mut entry = report.lines()[1].lines();
    let _subscription = entry.next();
    let first_frame = entry.next().context("stack missing from report")?;
    assert!(
        first_frame.contains("test_rewritten_stack_starts_at_the_calling_test"),
        "unexpected first frame: {first_frame}"
    );

    Ok(())
}

#[test]
fn test_render_never_mutates_records() -> anyhow::Result<()> {
    // Arrange
    let target = FakeTarget::new();
    let tracker = setup(&target);
    tracker.start();
    let _leaked = target.subscribe();
    let records = tracker.get_subscribers().current();
    let before = records[0].stack().map(str::to_string);
    let options = PrintOptions::new()
        .rewrite_stack(true)
        .filter_stack_pattern("subscribe")?;

    // Act
    let _report = render(&records, &options);

    // Assert
    let after = tracker.get_subscribers().current();
    assert_eq!(after[0].stack().map(str::to_string), before);

    Ok(())
}

#[test]
fn test_invalid_filter_pattern_is_a_configuration_error() {
    // Act
    let result = PrintOptions::<FakeSubscription>::new().filter_stack_pattern("(unclosed");

    // Assert
    match result {
        Err(error @ SubtrackError::InvalidStackFilter { .. }) => {
            assert!(error.is_configuration());
            assert!(error.to_string().contains("(unclosed"));
        }
        other => panic!("expected InvalidStackFilter, got {other:?}"),
    }
}

#[test]
fn test_write_subscribers_writes_one_line_per_entry() -> anyhow::Result<()> {
    // Arrange
    let target = FakeTarget::new();
    let tracker = setup_with_config(&target, without_stacks());
    tracker.start();
    let _a = target.subscribe();
    let _b = target.subscribe_pipeline(2);
    let mut out = Vec::new();

    // Act
    let report = write_subscribers(&mut out, &tracker.get_subscribers(), &PrintOptions::new())?;

    // Assert
    let text = String::from_utf8(out)?;
    assert_eq!(text.lines().count(), 3);
    assert_eq!(text, format!("{}\n", report.lines().join("\n")));

    Ok(())
}

struct BrokenPipe;

impl io::Write for BrokenPipe {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_write_failure_becomes_io_error() {
    // Arrange
    let target = FakeTarget::new();
    let tracker = setup_with_config(&target, without_stacks());
    tracker.start();
    let _leaked = target.subscribe();

    // Act
    let result = write_subscribers(&mut BrokenPipe, &tracker.get_subscribers(), &PrintOptions::new());

    // Assert
    assert!(matches!(result, Err(SubtrackError::Io { .. })));
}
