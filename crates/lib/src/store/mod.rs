//! The shared-data store.
//!
//! [`SharedData`] accumulates heterogeneous inputs into one canonical nested
//! mapping addressable by dot-separated paths, and resolves it on demand to
//! plain JSON for injection into a JavaScript global.
//!
//! # Write model
//!
//! [`put`](SharedData::put) writes a normalized value at a dot path,
//! auto-creating intermediate maps. [`merge`](SharedData::merge) takes a
//! keyless mapping and writes each top-level entry as if it had been put
//! explicitly; a keyless *lazy* value cannot be split into entries without
//! invoking it, so it is registered as a pending source instead. The key
//! transformer configured at write time is applied to every key at every
//! depth, including the explicit key argument and keys that only come into
//! existence when a lazy value later resolves.
//!
//! # Read model
//!
//! Every read materializes a fresh view: the root is cloned, all pending
//! keyless sources are invoked and merged in, and any lazy value on the
//! requested path is forced. Nothing is cached, so repeated reads observe
//! live producer state.
//!
//! ```
//! use shared_data::SharedData;
//!
//! let mut data = SharedData::new();
//! data.put("user.name", "Alice")?;
//! data.put("user.admin", false)?;
//!
//! assert_eq!(data.get("user.name")?, Some("Alice".into()));
//! assert_eq!(data.to_json()?, r#"{"user":{"name":"Alice","admin":false}}"#);
//! # Ok::<(), shared_data::Error>(())
//! ```

use std::{fmt, rc::Rc};

use tracing::{debug, trace};

use crate::errors::StoreError;
use crate::value::{KeyTransform, Lazy, Map, Path, PathBuf, Value};

pub mod render;

/// The JavaScript global the rendered script assigns to by default.
pub const DEFAULT_JS_NAMESPACE: &str = "sharedData";

/// A transient, process-local accumulation buffer for data shared with a
/// host JavaScript environment.
///
/// Created empty, mutated through [`put`](Self::put) /
/// [`merge`](Self::merge) / [`forget`](Self::forget), and discarded with its
/// owning scope. Single-threaded by design: producers and key transformers
/// are plain `Rc`-held closures, and callers needing shared access serialize
/// it externally (typically one store per request).
pub struct SharedData {
    root: Map,
    /// Keyless lazy sources, resolved (never drained) on every read.
    pending: Vec<Lazy>,
    transform: Option<Rc<KeyTransform>>,
    js_namespace: String,
}

impl SharedData {
    /// Creates an empty store with the default JS namespace.
    pub fn new() -> Self {
        Self {
            root: Map::new(),
            pending: Vec::new(),
            transform: None,
            js_namespace: DEFAULT_JS_NAMESPACE.to_string(),
        }
    }

    /// Writes a value at a dot path, creating intermediate maps as needed.
    ///
    /// The value is normalized first (so a nested collection becomes a
    /// nested map) and the configured key transformer is applied to the key
    /// argument and to every key inside the value. Writes are last-wins: a
    /// non-map value at an intermediate segment is replaced by a fresh map.
    ///
    /// Returns `&mut Self` for chaining.
    ///
    /// # Errors
    ///
    /// [`StoreError::EmptyPath`] when the key normalizes to the empty path.
    pub fn put(
        &mut self,
        key: impl AsRef<str>,
        value: impl Into<Value>,
    ) -> crate::Result<&mut Self> {
        let key = self.transform_key(key.as_ref());
        let path = PathBuf::normalize(&key);
        if path.is_empty() {
            return Err(StoreError::EmptyPath.into());
        }

        let value = value.into().transformed(self.transform.as_ref());
        debug!(path = %path, kind = value.type_name(), "put");
        self.root.set_path(&path, value)?;
        Ok(self)
    }

    /// Serializes any `Serialize` value and writes it at a dot path.
    ///
    /// Normalization happens before any mutation, so a serialization failure
    /// leaves the store untouched.
    pub fn put_serialize<T: serde::Serialize>(
        &mut self,
        key: impl AsRef<str>,
        value: &T,
    ) -> crate::Result<&mut Self> {
        let value = Value::from_serialize(value)?;
        self.put(key, value)
    }

    /// Merges a keyless value into the store root.
    ///
    /// A mapping is split into its top-level entries, each written exactly
    /// as if it had been [`put`](Self::put) under its own key (dots in entry
    /// keys nest, last write wins). A lazy value cannot be split without
    /// invoking it, so it is registered as a pending source and re-resolved
    /// on every read; its eventual top-level keys become addressable then.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotMergeable`] when the value is neither a mapping nor
    /// a lazy value; [`StoreError::EmptyPath`] when an entry key normalizes
    /// to the empty path. Both are checked before any entry is written.
    pub fn merge(&mut self, value: impl Into<Value>) -> crate::Result<&mut Self> {
        match value.into().transformed(self.transform.as_ref()) {
            Value::Map(map) => {
                if map.keys().any(|key| PathBuf::normalize(key).is_empty()) {
                    return Err(StoreError::EmptyPath.into());
                }
                debug!(entries = map.len(), "merge map");
                for (key, value) in map {
                    self.root.set_path(&PathBuf::normalize(&key), value)?;
                }
            }
            Value::Lazy(lazy) => {
                debug!(pending = self.pending.len() + 1, "merge lazy source");
                self.pending.push(lazy);
            }
            other => {
                return Err(StoreError::NotMergeable {
                    actual: other.type_name(),
                }
                .into());
            }
        }
        Ok(self)
    }

    /// Serializes any `Serialize` value and merges it keylessly.
    pub fn merge_serialize<T: serde::Serialize>(&mut self, value: &T) -> crate::Result<&mut Self> {
        let value = Value::from_serialize(value)?;
        self.merge(value)
    }

    /// Reads the resolved value at a dot path.
    ///
    /// All pending keyless sources are resolved first; any lazy value on the
    /// path or inside the addressed subtree is invoked fresh. The empty path
    /// reads the whole store. Returns `Ok(None)` on a lookup miss — an
    /// absent key, or a path through a non-map value — which keeps "absent"
    /// distinguishable from "present but null".
    ///
    /// # Errors
    ///
    /// [`StoreError::LazySourceNotMap`] when a pending keyless source
    /// produces something other than a mapping.
    pub fn get(&self, path: impl AsRef<Path>) -> crate::Result<Option<serde_json::Value>> {
        Ok(self
            .lookup(path.as_ref())?
            .map(|value| value.to_json_value()))
    }

    /// Reads the whole store as a resolved JSON object.
    pub fn all(&self) -> crate::Result<serde_json::Value> {
        Ok(serde_json::Value::Object(
            self.materialized()?.to_json_map(),
        ))
    }

    /// Returns true if a resolved value exists at the given dot path.
    pub fn contains_key(&self, path: impl AsRef<Path>) -> crate::Result<bool> {
        Ok(self.lookup(path.as_ref())?.is_some())
    }

    /// Removes the subtree at a dot path; siblings are left untouched.
    ///
    /// Removing an absent path is a no-op. The empty path clears the whole
    /// store, including pending keyless sources. Only materialized data can
    /// be removed piecemeal: a key that would come from a still-pending
    /// source has no subtree to remove yet.
    pub fn forget(&mut self, path: impl AsRef<Path>) -> &mut Self {
        let path = path.as_ref();
        if path.is_empty() {
            debug!("forget all");
            self.clear();
        } else {
            debug!(path = %path, "forget");
            let _ = self.root.remove_path(path);
        }
        self
    }

    /// Empties the store and drops all pending keyless sources.
    pub fn clear(&mut self) {
        self.root.clear();
        self.pending.clear();
    }

    /// Configures the key transformer applied to subsequent writes.
    ///
    /// Applies to every key at every depth of every later write, including
    /// keys produced by lazy values put from now on. Already-stored keys are
    /// not rewritten, and lazy values put earlier keep resolving through the
    /// transformer (or lack of one) they were written under.
    pub fn set_key_transform(&mut self, transform: impl Fn(&str) -> String + 'static) -> &mut Self {
        self.transform = Some(Rc::new(transform));
        self
    }

    /// Removes the key transformer; subsequent writes keep keys verbatim.
    pub fn forget_key_transform(&mut self) -> &mut Self {
        self.transform = None;
        self
    }

    /// The JavaScript global [`render`](Self::render) assigns to.
    pub fn js_namespace(&self) -> &str {
        &self.js_namespace
    }

    /// Replaces the JavaScript namespace. Any string is accepted; the
    /// rendered subscript syntax does not require a valid JS identifier.
    pub fn set_js_namespace(&mut self, namespace: impl Into<String>) -> &mut Self {
        self.js_namespace = namespace.into();
        self
    }

    /// Serializes the fully-resolved store as compact JSON, preserving key
    /// insertion order.
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(&self.all()?)?)
    }

    /// Renders the `<script>` snippet assigning the resolved JSON to
    /// `window['<namespace>']`.
    pub fn render(&self) -> crate::Result<String> {
        Ok(render::script_tag(&self.js_namespace, &self.to_json()?))
    }

    /// The materialized root, without pending sources. Primarily for
    /// debugging and tests; ordinary reads go through [`get`](Self::get).
    pub fn root(&self) -> &Map {
        &self.root
    }

    /// Applies the key transformer to an explicit key argument. The full
    /// key string is rewritten before dot-splitting, matching how rewritten
    /// keys inside values are then re-interpreted as paths.
    fn transform_key(&self, key: &str) -> String {
        match &self.transform {
            Some(rewrite) => rewrite(key),
            None => key.to_string(),
        }
    }

    /// Builds the read-time view: a clone of the root with every pending
    /// keyless source invoked and its produced entries merged in, in
    /// registration order. The sources stay pending — results are never
    /// written back, so the next read re-invokes them.
    fn materialized(&self) -> crate::Result<Map> {
        let mut view = self.root.clone();
        for source in &self.pending {
            trace!("resolving pending keyless source");
            match source.produce().into_produced() {
                Value::Map(map) => {
                    for (key, value) in map {
                        let path = PathBuf::normalize(&key);
                        if path.is_empty() {
                            continue;
                        }
                        view.set_path(&path, value)?;
                    }
                }
                other => {
                    return Err(StoreError::LazySourceNotMap {
                        actual: other.type_name(),
                    }
                    .into());
                }
            }
        }
        Ok(view)
    }

    /// Walks the materialized view down a dot path, forcing any lazy value
    /// encountered along the way. Returns the still-unresolved subtree.
    fn lookup(&self, path: &Path) -> crate::Result<Option<Value>> {
        let view = self.materialized()?;
        let mut current = Value::Map(view);
        for segment in path.components() {
            let Value::Map(mut map) = current.into_produced() else {
                return Ok(None);
            };
            match map.remove(segment) {
                Some(value) => current = value,
                None => return Ok(None),
            }
        }
        Ok(Some(current))
    }
}

impl Default for SharedData {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SharedData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedData")
            .field("root", &self.root)
            .field("pending", &self.pending.len())
            .field("transform", &self.transform.as_ref().map(|_| "<fn>"))
            .field("js_namespace", &self.js_namespace)
            .finish()
    }
}

/// Renders the script tag, mirroring the store's string conversion in host
/// templates. Resolution failures surface as `fmt::Error`; callers that need
/// the cause should use [`SharedData::render`].
impl fmt::Display for SharedData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered = self.render().map_err(|_| fmt::Error)?;
        f.write_str(&rendered)
    }
}
