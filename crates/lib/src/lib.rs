//!
//! shared-data: a heterogeneous-input data aggregator.
//!
//! Callers feed the store values of many shapes — plain scalars, nested
//! mappings, `Serialize` objects, and deferred producers — and it
//! accumulates them into one canonical nested mapping addressable by
//! dot-separated paths, serializable as JSON for injection into a host
//! page's JavaScript global namespace.
//!
//! ## Core concepts
//!
//! * **Store ([`SharedData`])**: owns the canonical mapping and composes
//!   normalization, lazy resolution, key transformation, and path addressing
//!   into one read/write contract.
//! * **Values ([`Value`])**: the recursive sum type every input normalizes
//!   to — leaf scalars, ordered lists, insertion-ordered maps ([`Map`]), and
//!   deferred producers ([`Lazy`]).
//! * **Dot paths ([`Path`]/[`PathBuf`](value::PathBuf))**: string addresses
//!   like `a.b.c`; writes auto-create missing intermediate maps.
//! * **Laziness**: producers are invoked fresh on every read and never
//!   cached, so reads reflect live external state.
//! * **Key transformation**: an optional `Fn(&str) -> String` applied to
//!   every key at every depth at write time, e.g. to camel-case snake_case
//!   keys before they reach JavaScript.
//!
//! ```
//! use shared_data::SharedData;
//!
//! let mut data = SharedData::new();
//! data.put("app.version", 3)?
//!     .put("user", shared_data::Value::lazy(|| "guest"))?;
//!
//! assert_eq!(
//!     data.render()?,
//!     r#"<script>window['sharedData'] = {"app":{"version":3},"user":"guest"};</script>"#
//! );
//! # Ok::<(), shared_data::Error>(())
//! ```

pub mod errors;
pub mod store;
pub mod value;

/// Re-exports for the common entry points.
pub use errors::StoreError;
pub use store::SharedData;
pub use value::{Lazy, Map, Path, Value};

/// Result type used throughout the shared-data library.
pub type Result<T> = std::result::Result<T, Error>;

/// Common error type for the shared-data library.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Structured store errors from the store engine
    #[error(transparent)]
    Store(errors::StoreError),
}

impl Error {
    /// Get the originating module for this error.
    pub fn module(&self) -> &'static str {
        match self {
            Error::Serialize(_) => "serialize",
            Error::Store(_) => "store",
        }
    }

    /// Check if this error came from a malformed write.
    pub fn is_write_error(&self) -> bool {
        match self {
            Error::Store(store_err) => store_err.is_write_error(),
            _ => false,
        }
    }

    /// Check if this error surfaced while resolving a deferred source.
    pub fn is_resolution_error(&self) -> bool {
        match self {
            Error::Store(store_err) => store_err.is_resolution_error(),
            _ => false,
        }
    }
}
