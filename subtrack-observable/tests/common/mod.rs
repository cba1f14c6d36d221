// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(dead_code)]

use parking_lot::Mutex;
use std::sync::Arc;
use subtrack_error::SubtrackError;
use subtrack_observable::Observer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<T> {
    Next(T),
    Error(String),
    Complete,
}

/// Records every notification it receives; clones share the log.
#[derive(Clone)]
pub struct Recorder<T> {
    events: Arc<Mutex<Vec<Event<T>>>>,
}

impl<T: Clone> Recorder<T> {
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn events(&self) -> Vec<Event<T>> {
        self.events.lock().clone()
    }

    pub fn values(&self) -> Vec<T> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                Event::Next(value) => Some(value.clone()),
                _ => None,
            })
            .collect()
    }
}

impl<T: Clone + PartialEq> Recorder<T> {
    pub fn is_completed(&self) -> bool {
        self.events.lock().contains(&Event::Complete)
    }
}

impl<T: Send> Observer<T> for Recorder<T> {
    fn next(&self, value: T) {
        self.events.lock().push(Event::Next(value));
    }

    fn error(&self, error: &SubtrackError) {
        self.events.lock().push(Event::Error(error.to_string()));
    }

    fn complete(&self) {
        self.events.lock().push(Event::Complete);
    }
}
