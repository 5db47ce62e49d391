// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Error types for fieldcheck.
//!
//! This module defines all error types used throughout the crate, with
//! proper error categorization and context propagation. A rule predicate
//! returning `false` is never an error — only configuration defects and
//! collaborator faults surface here.

use thiserror::Error;

/// The main error type for fieldcheck operations.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    // External lookup errors
    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    // Generic error with context
    #[error("{context}: {message}")]
    WithContext { context: String, message: String },
}

/// Validation-configuration defects, detected at rule resolution time,
/// before any rule predicate runs.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown rule: '{name}'")]
    UnknownRule { name: String },

    #[error("Rule '{rule}' expects {expected} argument(s), got {got}")]
    BadArity {
        rule: String,
        expected: usize,
        got: usize,
    },

    #[error("Invalid argument for rule '{rule}': {message}")]
    InvalidArgument { rule: String, message: String },

    #[error("Malformed rule spec: '{spec}'")]
    MalformedSpec { spec: String },
}

/// Faults reported by an [`ExternalLookup`](crate::lookup::ExternalLookup)
/// collaborator. Distinct from a rule predicate returning `false`.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Lookup timed out after {millis}ms")]
    Timeout { millis: u64 },

    #[error("Lookup connection failed: {message}")]
    Connection { message: String },

    #[error("Lookup backend error: {message}")]
    Backend { message: String },
}

/// Result type alias for fieldcheck operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T, E: std::error::Error + 'static> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::WithContext {
            context: context.into(),
            message: e.to_string(),
        })
    }
}
