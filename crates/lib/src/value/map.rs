//! The nested mapping at the heart of the store.
//!
//! [`Map`] is an insertion-order-preserving mapping from string keys to
//! [`Value`]s. Beyond the plain map API it implements the dot-path
//! addressing contract: reads walk existing levels and miss softly, writes
//! auto-create missing intermediate maps (replacing any non-map value found
//! mid-path), and removals of absent paths are no-ops.

use std::fmt;

use indexmap::IndexMap;

use super::{Value, path::Path};
use crate::errors::StoreError;

/// An ordered mapping of string keys to values.
///
/// Keys keep their insertion order for the lifetime of the map; overwriting
/// an existing key keeps its original position.
///
/// ```
/// use shared_data::value::{Map, Value};
///
/// let mut map = Map::new();
/// map.set("name", "Alice");
/// map.set_path("profile.bio", "hi").unwrap();
///
/// assert_eq!(map.get("name"), Some(&Value::Text("Alice".into())));
/// assert_eq!(map.get_path("profile.bio"), Some(&Value::Text("hi".into())));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Map {
    entries: IndexMap<String, Value>,
}

impl Map {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Returns the number of direct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map has no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if the map contains the given direct key.
    pub fn contains_key(&self, key: impl AsRef<str>) -> bool {
        self.entries.contains_key(key.as_ref())
    }

    /// Gets a value by direct key.
    pub fn get(&self, key: impl AsRef<str>) -> Option<&Value> {
        self.entries.get(key.as_ref())
    }

    /// Gets a mutable reference to a value by direct key.
    pub fn get_mut(&mut self, key: impl AsRef<str>) -> Option<&mut Value> {
        self.entries.get_mut(key.as_ref())
    }

    /// Sets a value at the given direct key, returning the old value if
    /// present. An existing key keeps its insertion position.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Removes a direct key, returning its value if present. The relative
    /// order of the remaining keys is preserved.
    pub fn remove(&mut self, key: impl AsRef<str>) -> Option<Value> {
        self.entries.shift_remove(key.as_ref())
    }

    /// Removes all keys.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns an iterator over all key-value pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    /// Returns an iterator over all keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Returns an iterator over all values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values()
    }

    /// Gets a value by dot path, walking nested maps.
    ///
    /// Returns `None` for the empty path, for any missing segment, and for
    /// any intermediate segment that holds a non-map value. Lazy values are
    /// opaque to this walk; resolving through them is the store's job.
    pub fn get_path(&self, path: impl AsRef<Path>) -> Option<&Value> {
        let mut segments = path.as_ref().components();
        let mut current = self.get(segments.next()?)?;
        for segment in segments {
            current = current.as_map()?.get(segment)?;
        }
        Some(current)
    }

    /// Sets a value at a dot path, creating intermediate maps as needed.
    ///
    /// Write wins on shape conflicts: a scalar, list, or lazy value sitting
    /// at an intermediate segment is replaced by a fresh map. Returns the
    /// old value at the final segment, if any.
    pub fn set_path(
        &mut self,
        path: impl AsRef<Path>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, StoreError> {
        let segments: Vec<&str> = path.as_ref().components().collect();
        let Some((leaf, parents)) = segments.split_last() else {
            return Err(StoreError::EmptyPath);
        };

        let mut current = self;
        for segment in parents {
            let entry = current
                .entries
                .entry((*segment).to_string())
                .or_insert_with(|| Value::Map(Map::new()));
            if !matches!(entry, Value::Map(_)) {
                *entry = Value::Map(Map::new());
            }
            current = match entry {
                Value::Map(map) => map,
                _ => unreachable!(),
            };
        }

        Ok(current.entries.insert((*leaf).to_string(), value.into()))
    }

    /// Removes the value at a dot path, returning it if present.
    ///
    /// Removing a path that does not exist, or whose intermediate segments
    /// are not maps, is a no-op. The empty path is also a no-op here;
    /// clearing the whole store goes through [`Map::clear`].
    pub fn remove_path(&mut self, path: impl AsRef<Path>) -> Option<Value> {
        let segments: Vec<&str> = path.as_ref().components().collect();
        let (leaf, parents) = segments.split_last()?;

        let mut current = self;
        for segment in parents {
            current = match current.get_mut(segment)? {
                Value::Map(map) => map,
                _ => return None,
            };
        }
        current.entries.shift_remove(*leaf)
    }

    /// Converts to a plain JSON object, invoking every lazy value reachable
    /// from this map. Insertion order is preserved.
    pub fn to_json_map(&self) -> serde_json::Map<String, serde_json::Value> {
        self.entries
            .iter()
            .map(|(key, value)| (key.clone(), value.to_json_value()))
            .collect()
    }
}

impl Extend<(String, Value)> for Map {
    fn extend<T: IntoIterator<Item = (String, Value)>>(&mut self, iter: T) {
        self.entries.extend(iter)
    }
}

impl FromIterator<(String, Value)> for Map {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl From<IndexMap<String, Value>> for Map {
    fn from(entries: IndexMap<String, Value>) -> Self {
        Self { entries }
    }
}

impl IntoIterator for Map {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Map {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl fmt::Display for Map {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        let mut first = true;
        for (key, value) in self.iter() {
            if !first {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {value}")?;
            first = false;
        }
        write!(f, "}}")
    }
}
