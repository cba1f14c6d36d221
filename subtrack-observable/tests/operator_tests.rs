// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod common;

use common::{Event, Recorder};
use std::time::Duration;
use subtrack_error::SubtrackError;
use subtrack_observable::{Observable, ShareReplayConfig, Subject, VirtualTimeScheduler};

#[test]
fn test_take_until_mirrors_source_until_notifier_emits() -> anyhow::Result<()> {
    // Arrange
    let source = Subject::<i32>::new();
    let end = Subject::<()>::new();
    let recorder = Recorder::new();
    let subscription = source
        .as_observable()
        .take_until(&end.as_observable())
        .subscribe(recorder.clone());

    // Act
    source.next(1)?;
    end.next(())?;
    source.next(2)?;

    // Assert
    assert_eq!(recorder.events(), vec![Event::Next(1), Event::Complete]);
    assert!(subscription.is_closed());
    assert_eq!(source.observer_count(), 0);
    assert_eq!(end.observer_count(), 0);

    Ok(())
}

#[test]
fn test_take_until_with_already_fired_notifier_skips_source() {
    // Arrange
    let source = Subject::<i32>::new();
    let recorder = Recorder::new();

    // Act
    let subscription = source
        .as_observable()
        .take_until(&Observable::of([()]))
        .subscribe(recorder.clone());

    // Assert
    assert!(subscription.is_closed());
    assert_eq!(recorder.events(), vec![Event::Complete]);
    assert_eq!(source.observer_count(), 0);
}

#[test]
fn test_take_until_ignores_notifier_completion() -> anyhow::Result<()> {
    // Arrange
    let source = Subject::<i32>::new();
    let recorder = Recorder::new();
    let _subscription = source
        .as_observable()
        .take_until(&Observable::<()>::empty())
        .subscribe(recorder.clone());

    // Act
    source.next(5)?;

    // Assert
    assert_eq!(recorder.events(), vec![Event::Next(5)]);

    Ok(())
}

#[test]
fn test_take_until_forwards_notifier_error() {
    // Arrange
    let recorder = Recorder::new();

    // Act
    let subscription = Observable::<i32>::never()
        .take_until(&Observable::<()>::fail("notifier"))
        .subscribe(recorder.clone());

    // Assert
    assert!(subscription.is_closed());
    assert_eq!(
        recorder.events(),
        vec![Event::Error("Stream error: notifier".to_string())]
    );
}

#[test]
fn test_delay_shifts_values_and_waits_before_completing() -> anyhow::Result<()> {
    // Arrange
    let scheduler = VirtualTimeScheduler::new();
    let source = Subject::<i32>::new();
    let recorder = Recorder::new();
    let subscription = source
        .as_observable()
        .delay(Duration::from_millis(2000), scheduler.clone())
        .subscribe(recorder.clone());

    // Act
    source.next(1)?;
    source.complete();
    scheduler.advance_by(Duration::from_millis(1999));

    // Assert
    assert!(recorder.events().is_empty());
    assert!(!subscription.is_closed());

    // Act
    scheduler.advance_by(Duration::from_millis(1));

    // Assert
    assert_eq!(recorder.events(), vec![Event::Next(1), Event::Complete]);
    assert!(subscription.is_closed());

    Ok(())
}

#[test]
fn test_delay_with_nothing_in_flight_completes_immediately() {
    // Arrange
    let scheduler = VirtualTimeScheduler::new();
    let recorder = Recorder::<i32>::new();

    // Act
    let subscription = Observable::empty()
        .delay(Duration::from_secs(1), scheduler.clone())
        .subscribe(recorder.clone());

    // Assert
    assert!(subscription.is_closed());
    assert!(recorder.is_completed());
    assert_eq!(scheduler.pending(), 0);
}

#[test]
fn test_delay_passes_errors_through_immediately() -> anyhow::Result<()> {
    // Arrange
    let scheduler = VirtualTimeScheduler::new();
    let source = Subject::<i32>::new();
    let recorder = Recorder::new();
    let _subscription = source
        .as_observable()
        .delay(Duration::from_secs(1), scheduler.clone())
        .subscribe(recorder.clone());

    // Act
    source.next(1)?;
    source.error(SubtrackError::stream_error("late"));

    // Assert
    assert_eq!(
        recorder.events(),
        vec![Event::Error("Stream error: late".to_string())]
    );
    assert_eq!(scheduler.pending(), 0);

    Ok(())
}

#[test]
fn test_unsubscribing_delay_cancels_scheduled_values() -> anyhow::Result<()> {
    // Arrange
    let scheduler = VirtualTimeScheduler::new();
    let source = Subject::<i32>::new();
    let recorder = Recorder::new();
    let subscription = source
        .as_observable()
        .delay(Duration::from_secs(1), scheduler.clone())
        .subscribe(recorder.clone());
    source.next(1)?;

    // Act
    subscription.unsubscribe();
    scheduler.flush();

    // Assert
    assert_eq!(scheduler.pending(), 0);
    assert!(recorder.events().is_empty());
    assert_eq!(source.observer_count(), 0);

    Ok(())
}

#[test]
fn test_unsubscribing_delay_after_some_values_cancels_the_rest() -> anyhow::Result<()> {
    // Arrange
    let scheduler = VirtualTimeScheduler::new();
    let source = Subject::<i32>::new();
    let recorder = Recorder::new();
    let subscription = source
        .as_observable()
        .delay(Duration::from_millis(10), scheduler.clone())
        .subscribe(recorder.clone());
    for value in 1..=3 {
        source.next(value)?;
        scheduler.advance_by(Duration::from_millis(10));
    }
    source.next(4)?;

    // Act
    subscription.unsubscribe();
    scheduler.flush();

    // Assert
    assert_eq!(recorder.values(), vec![1, 2, 3]);
    assert_eq!(scheduler.pending(), 0);

    Ok(())
}

#[test]
fn test_share_replay_connects_once_and_replays() -> anyhow::Result<()> {
    // Arrange
    let source = Subject::<i32>::new();
    let shared = source.as_observable().share_replay(ShareReplayConfig {
        buffer_size: 1,
        ref_count: true,
    });
    let first = Recorder::new();
    let second = Recorder::new();

    // Act
    let _a = shared.subscribe(first.clone());
    source.next(1)?;
    source.next(2)?;
    let _b = shared.subscribe(second.clone());
    source.next(3)?;

    // Assert
    assert_eq!(source.observer_count(), 1);
    assert_eq!(first.values(), vec![1, 2, 3]);
    assert_eq!(second.values(), vec![2, 3]);

    Ok(())
}

#[test]
fn test_share_replay_with_ref_count_disconnects_after_last_subscriber() -> anyhow::Result<()> {
    // Arrange
    let source = Subject::<i32>::new();
    let shared = source.as_observable().share_replay(ShareReplayConfig {
        buffer_size: 1,
        ref_count: true,
    });
    let a = shared.subscribe(Recorder::new());
    let b = shared.subscribe(Recorder::new());
    source.next(1)?;

    // Act
    a.unsubscribe();
    let connected_after_first = source.observer_count();
    b.unsubscribe();

    // Assert
    assert_eq!(connected_after_first, 1);
    assert_eq!(source.observer_count(), 0);

    // Act - a new subscriber starts over with a fresh buffer
    let late = Recorder::new();
    let _c = shared.subscribe(late.clone());

    // Assert
    assert!(late.values().is_empty());
    assert_eq!(source.observer_count(), 1);

    Ok(())
}

#[test]
fn test_share_replay_without_ref_count_stays_connected() -> anyhow::Result<()> {
    // Arrange
    let source = Subject::<i32>::new();
    let shared = source.as_observable().share_replay(ShareReplayConfig::default());
    let subscription = shared.subscribe(Recorder::new());
    source.next(1)?;

    // Act
    subscription.unsubscribe();
    source.next(2)?;
    let late = Recorder::new();
    let _late = shared.subscribe(late.clone());

    // Assert
    assert_eq!(source.observer_count(), 1);
    assert_eq!(late.values(), vec![1, 2]);

    Ok(())
}

#[test]
fn test_share_replay_keeps_completed_source() {
    // Arrange
    let shared = Observable::of([1, 2, 3]).share_replay(ShareReplayConfig {
        buffer_size: 2,
        ref_count: true,
    });
    let first = Recorder::new();
    let second = Recorder::new();

    // Act
    let a = shared.subscribe(first.clone());
    let b = shared.subscribe(second.clone());

    // Assert
    assert!(a.is_closed());
    assert!(b.is_closed());
    assert_eq!(
        first.events(),
        vec![Event::Next(1), Event::Next(2), Event::Next(3), Event::Complete]
    );
    assert_eq!(
        second.events(),
        vec![Event::Next(2), Event::Next(3), Event::Complete]
    );
}

#[test]
fn test_share_replay_resubscribes_after_source_error() -> anyhow::Result<()> {
    // Arrange
    let source = Subject::<i32>::new();
    let shared = source.as_observable().share_replay(ShareReplayConfig::default());
    let first = Recorder::new();
    let _a = shared.subscribe(first.clone());

    // Act
    source.next(1)?;
    source.error(SubtrackError::stream_error("boom"));
    let source_stopped = source.is_stopped();

    // Assert
    assert!(source_stopped);
    assert!(matches!(first.events().last(), Some(Event::Error(_))));

    // Act - the next subscriber gets a fresh subject and reconnects
    let second = Recorder::new();
    let b = shared.subscribe(second.clone());

    // Assert
    assert!(b.is_closed());
    assert!(!second.values().contains(&1));

    Ok(())
}
