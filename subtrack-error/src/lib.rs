// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Error types for the subtrack subscription tracker
//!
//! Tracking itself never fails: the interceptor only bookkeeps and lets the
//! wrapped subscribe call behave exactly as before. Errors show up at the edges,
//! when configuring the reporter, when writing a report, and while values and
//! errors travel through the bundled observable implementation.
//!
//! # Examples
//!
//! ```
//! use subtrack_error::{Result, SubtrackError};
//!
//! fn emit() -> Result<()> {
//!     Err(SubtrackError::stream_error("source failed"))
//! }
//!
//! assert!(emit().is_err());
//! ```

/// Root error type for all subtrack operations
#[derive(Debug, thiserror::Error)]
pub enum SubtrackError {
    /// A stack filter pattern could not be compiled
    #[error("Invalid stack filter pattern `{pattern}`: {source}")]
    InvalidStackFilter {
        /// The pattern as supplied by the caller
        pattern: String,
        /// Why the regex engine rejected it
        #[source]
        source: regex::Error,
    },

    /// Writing a report to its destination failed
    #[error("Failed to write report: {context}")]
    Io {
        /// What was being written
        context: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// An error signalled through an observable
    ///
    /// This is what `Observer::error` receives when a producer fails.
    #[error("Stream error: {context}")]
    Stream {
        /// Description of what went wrong in the producer
        context: String,
    },

    /// A subject was used after it completed or errored
    #[error("Subject is closed")]
    Closed,
}

impl SubtrackError {
    /// Create a stream error with the given context
    pub fn stream_error(context: impl Into<String>) -> Self {
        Self::Stream {
            context: context.into(),
        }
    }

    /// Create an invalid stack filter error
    pub fn invalid_stack_filter(pattern: impl Into<String>, source: regex::Error) -> Self {
        Self::InvalidStackFilter {
            pattern: pattern.into(),
            source,
        }
    }

    /// Create an I/O error with the given context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Check whether this error was produced by caller configuration
    /// rather than at runtime
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::InvalidStackFilter { .. })
    }
}

/// Specialized Result type for subtrack operations
pub type Result<T> = std::result::Result<T, SubtrackError>;

/// Helper trait for attaching context to I/O results
pub trait ResultExt<T> {
    /// Convert an I/O failure into [`SubtrackError::Io`] with context
    ///
    /// # Errors
    /// Returns `Err(SubtrackError::Io)` if the underlying result is `Err`.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| SubtrackError::io(context, e))
    }
}
