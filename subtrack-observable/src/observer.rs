// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use subtrack_error::SubtrackError;

/// Receives the notifications of an observable.
///
/// After `error` or `complete` no further notification is delivered.
pub trait Observer<T>: Send + Sync {
    fn next(&self, value: T);

    fn error(&self, _error: &SubtrackError) {}

    fn complete(&self) {}
}

/// An observer that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ignore;

impl<T> Observer<T> for Ignore {
    fn next(&self, _value: T) {}
}

/// Adapts a closure into an observer of values.
pub struct FnObserver<F>(pub F);

impl<T, F> Observer<T> for FnObserver<F>
where
    F: Fn(T) + Send + Sync,
{
    fn next(&self, value: T) {
        (self.0)(value);
    }
}
