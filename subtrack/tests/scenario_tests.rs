// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod common;

use common::{assert_no_leaks, fresh_session};
use parking_lot::Mutex;
use serial_test::serial;
use std::sync::Arc;
use std::time::Duration;
use subtrack::observable::{Ignore, Subscriber};
use subtrack::{Observable, ShareReplayConfig, Subject, VirtualTimeScheduler};

#[test]
#[serial]
fn test_cold_observable_unsubscribed_imperatively() {
    // Arrange
    let (tracker, subscribers) = fresh_session();
    let source = Observable::<()>::never();

    // Act
    let subscription = source.subscribe(Ignore);

    // Assert
    assert_eq!(subscribers.current().len(), 1);

    // Act
    subscription.unsubscribe();

    // Assert
    assert_no_leaks(&tracker);
}

#[test]
#[serial]
fn test_cold_observable_unsubscribed_on_completion() {
    // Arrange
    let (tracker, subscribers) = fresh_session();
    let slot: Arc<Mutex<Option<Subscriber<()>>>> = Arc::new(Mutex::new(None));
    let producer_slot = slot.clone();
    let source = Observable::new(move |subscriber| *producer_slot.lock() = Some(subscriber));

    // Act
    let _subscription = source.subscribe(Ignore);

    // Assert
    assert_eq!(subscribers.current().len(), 1);

    // Act
    let captured = slot.lock().take();
    if let Some(subscriber) = captured {
        subscriber.complete();
    }

    // Assert
    assert_no_leaks(&tracker);
}

#[test]
#[serial]
fn test_cold_observable_with_take_until() -> anyhow::Result<()> {
    // Arrange
    let (tracker, subscribers) = fresh_session();
    let end = Subject::<()>::new();
    let source = Observable::<()>::never().take_until(&end.as_observable());

    // Act
    let _subscription = source.subscribe(Ignore);

    // Assert
    assert_eq!(subscribers.current().len(), 3);

    // Act
    end.next(())?;

    // Assert
    assert_no_leaks(&tracker);

    Ok(())
}

#[test]
#[serial]
fn test_hot_observable_with_take_until_and_delay() -> anyhow::Result<()> {
    // Arrange
    let (tracker, subscribers) = fresh_session();
    let scheduler = VirtualTimeScheduler::new();
    let end = Subject::<()>::new();
    let source = Subject::<i32>::new()
        .as_observable()
        .take_until(&end.as_observable())
        .delay(Duration::from_millis(2000), scheduler.clone());

    // Act
    let _subscription = source.subscribe(Ignore);

    // Assert
    assert_eq!(subscribers.current().len(), 4);

    // Act
    end.next(())?;
    scheduler.flush();

    // Assert
    assert_no_leaks(&tracker);

    Ok(())
}

#[test]
#[serial]
fn test_hot_observable_with_share_replay() {
    // Arrange
    let (tracker, subscribers) = fresh_session();
    let source = Subject::<i32>::new().as_observable().share_replay(ShareReplayConfig {
        buffer_size: 1,
        ref_count: true,
    });

    // Act
    let subscription = source.subscribe(Ignore);

    // Assert
    assert_eq!(subscribers.current().len(), 3);

    // Act
    subscription.unsubscribe();

    // Assert
    assert_no_leaks(&tracker);
}

#[test]
#[serial]
fn test_pipeline_records_share_one_chain_id() {
    // Arrange
    let (tracker, subscribers) = fresh_session();
    let end = Subject::<()>::new();
    let first = Observable::<()>::never().take_until(&end.as_observable());
    let second = Observable::<()>::never().take_until(&end.as_observable());

    // Act
    let a = first.subscribe(Ignore);
    let b = second.subscribe(Ignore);

    // Assert
    assert_eq!(subscribers.len(), 6);
    assert_eq!(subscribers.chain_count(), 2);

    // Act
    a.unsubscribe();

    // Assert
    assert_eq!(subscribers.len(), 3);
    assert_eq!(subscribers.chain_count(), 1);

    b.unsubscribe();
    assert_no_leaks(&tracker);
}

#[test]
#[serial]
fn test_restarting_tracking_forgets_undisposed_records() {
    // Arrange
    let (tracker, subscribers) = fresh_session();
    let leaked = Observable::<()>::never().subscribe(Ignore);
    assert_eq!(subscribers.len(), 1);

    // Act
    let frozen = tracker.stop();
    let restarted = tracker.start();

    // Assert
    assert_eq!(restarted.len(), 0);
    assert_eq!(frozen.len(), 1);
    assert!(frozen.same_session(&subscribers));

    // Act
    leaked.unsubscribe();

    // Assert
    assert_eq!(frozen.len(), 0);
    assert_no_leaks(&tracker);
}

#[test]
#[serial]
fn test_nothing_is_recorded_while_tracking_is_off() {
    // Arrange
    let (tracker, _) = fresh_session();
    tracker.stop();

    // Act
    let subscription = Observable::<()>::never().subscribe(Ignore);

    // Assert
    assert!(tracker.get_subscribers().is_empty());
    subscription.unsubscribe();
}

#[test]
#[serial]
fn test_double_unsubscribe_is_harmless() {
    // Arrange
    let (tracker, subscribers) = fresh_session();
    let subscription = Observable::<()>::never().subscribe(Ignore);

    // Act
    subscription.unsubscribe();
    subscription.unsubscribe();

    // Assert
    assert_eq!(subscribers.len(), 0);
    assert_no_leaks(&tracker);
}

#[test]
#[serial]
fn test_synchronously_completed_source_leaves_nothing() {
    // Arrange
    let (tracker, subscribers) = fresh_session();

    // Act
    let subscription = Observable::of([1, 2, 3]).subscribe(Ignore);

    // Assert
    assert!(subscription.is_closed());
    assert!(subscribers.is_empty());
    assert_no_leaks(&tracker);
}
