//! # Failure Context
//!
//! Converts foreign errors into simple-kind failures while keeping the
//! original error text, so nothing raised below the core is swallowed.

use std::error::Error as StdError;
use crate::types::{Failure, Result, SimpleKind};

/// A trait for converting foreign error results into failures
pub trait FailureContext<T> {
    /// Maps the error into a failure of the given kind
    fn failure(self, kind: SimpleKind) -> Result<T>;

    /// Maps the error into a failure of the given kind, prefixed by the
    /// operation that was being performed
    fn with_failure<S, F>(self, kind: SimpleKind, operation: F) -> Result<T>
    where
        S: Into<String>,
        F: FnOnce() -> S;
}

impl<T, E> FailureContext<T> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn failure(self, kind: SimpleKind) -> Result<T> {
        self.map_err(|error| Failure::simple(kind, error.to_string()))
    }

    fn with_failure<S, F>(self, kind: SimpleKind, operation: F) -> Result<T>
    where
        S: Into<String>,
        F: FnOnce() -> S,
    {
        self.map_err(|error| {
            let operation = operation().into();
            Failure::simple(kind, format!("{}: {}", operation, error))
        })
    }
}
