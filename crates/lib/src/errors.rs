//! Structured error types for store operations.
//!
//! Lookup misses are deliberately not represented here: a read of an absent
//! path returns `Ok(None)` so callers can distinguish "present but null"
//! from "absent" without exception-style control flow. Errors are reserved
//! for caller programming mistakes (writing at the root, merging a scalar)
//! and for deferred sources that turn out to have the wrong shape at read
//! time.

use thiserror::Error;

/// Errors raised by [`SharedData`](crate::SharedData) operations.
#[non_exhaustive]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A write addressed the empty path. Reads and removals treat the empty
    /// path as the whole store, but a value cannot be written there.
    #[error("cannot write a value at the empty path")]
    EmptyPath,

    /// A keyless put was given a value that is neither a mapping nor a lazy
    /// value, so there are no keys to merge it under.
    #[error("keyless put requires a map or a lazy value, found {actual}")]
    NotMergeable { actual: &'static str },

    /// A pending keyless lazy source was resolved at read time and produced
    /// something other than a mapping.
    #[error("pending lazy source produced {actual}, expected a map")]
    LazySourceNotMap { actual: &'static str },
}

impl StoreError {
    /// Check if this error came from a malformed write.
    pub fn is_write_error(&self) -> bool {
        matches!(
            self,
            StoreError::EmptyPath | StoreError::NotMergeable { .. }
        )
    }

    /// Check if this error surfaced while resolving a deferred source.
    pub fn is_resolution_error(&self) -> bool {
        matches!(self, StoreError::LazySourceNotMap { .. })
    }
}

// Conversion from StoreError to the main Error type
impl From<StoreError> for crate::Error {
    fn from(err: StoreError) -> Self {
        crate::Error::Store(err)
    }
}
