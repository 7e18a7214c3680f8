//! The canonical value model for the store.
//!
//! Every supported input shape normalizes to exactly one [`Value`]:
//!
//! - plain scalars (strings, integers, floats, booleans, null) become leaf
//!   variants via `From` impls;
//! - ordered key-value collections become [`Value::Map`], each entry
//!   normalized recursively;
//! - anything implementing `serde::Serialize` — both "as-JSON" objects and
//!   plain structs with named fields — goes through
//!   [`Value::from_serialize`], which walks the whole shape in one pass;
//! - zero-argument producers become [`Value::Lazy`] via [`Value::lazy`] and
//!   are not invoked during normalization.
//!
//! The resolved form of a value is a plain `serde_json::Value`, produced by
//! [`Value::to_json_value`]; resolution invokes every reachable producer
//! fresh and never returns one.

use std::{fmt, rc::Rc};

use indexmap::IndexMap;

// Submodules
pub mod lazy;
pub mod map;
pub mod path;

// Convenience re-exports for the core value types
pub use lazy::{KeyTransform, Lazy};
pub use map::Map;
pub use path::{Path, PathBuf};

/// A value in the store.
///
/// `Value` is a recursive sum type: leaf scalars, ordered containers, and
/// deferred producers. Maps preserve insertion order; lazy values are
/// re-invoked on every resolution.
///
/// # Direct comparisons
///
/// `Value` implements `PartialEq` with primitive types for ergonomic
/// assertions:
///
/// ```
/// # use shared_data::value::Value;
/// let text = Value::Text("hello".to_string());
/// let number = Value::Int(42);
///
/// assert!(text == "hello");
/// assert!(number == 42);
/// assert!(!(text == 42));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    // Leaf values (terminal nodes)
    /// Null/empty value
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating-point value
    Float(f64),
    /// Text string value
    Text(String),

    // Branch values (can contain other values)
    /// Ordered sequence of values
    List(Vec<Value>),
    /// Nested ordered mapping
    Map(Map),

    // Deferred values
    /// Zero-argument producer, invoked fresh on every resolution
    Lazy(Lazy),
}

impl Value {
    /// Wraps a zero-argument producer as a deferred value.
    ///
    /// The producer is not invoked here; it runs on every later resolution.
    ///
    /// ```
    /// # use shared_data::value::Value;
    /// let value = Value::lazy(|| "computed later");
    /// assert!(value.is_lazy());
    /// ```
    pub fn lazy<V, F>(producer: F) -> Self
    where
        F: Fn() -> V + 'static,
        V: Into<Value>,
    {
        Value::Lazy(Lazy::new(producer))
    }

    /// Normalizes any `Serialize` type into a value.
    ///
    /// This is the entry point for arbitrary structs: named fields become
    /// map keys, nested structs and sequences are walked recursively, and
    /// non-string keys arrive stringified. A custom `Serialize` impl acts as
    /// the "convert to JSON" capability and takes precedence over the
    /// field-by-field view, since it is what drives the serialization.
    ///
    /// # Errors
    ///
    /// Fails when the input is not JSON-representable (for example a map
    /// with non-stringifiable keys).
    pub fn from_serialize<T: serde::Serialize>(value: &T) -> crate::Result<Value> {
        Ok(serde_json::to_value(value)?.into())
    }

    /// Returns true if this is a leaf value (terminal node)
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Text(_)
        )
    }

    /// Returns true if this value defers to a producer
    pub fn is_lazy(&self) -> bool {
        matches!(self, Value::Lazy(_))
    }

    /// Returns true if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Lazy(_) => "lazy",
        }
    }

    /// Attempts to convert to a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Attempts to convert to an integer
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Attempts to convert to a float
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Attempts to convert to a string slice
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Attempts to convert to a list (returns immutable reference)
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Attempts to convert to a map (returns immutable reference)
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Attempts to convert to a mutable map reference
    pub fn as_map_mut(&mut self) -> Option<&mut Map> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Runs the write-time key-transform pass.
    ///
    /// Rewrites every map key at every depth, walks lists so mappings inside
    /// sequences are covered too, and stamps the transform snapshot onto
    /// lazy values so they rewrite their produced keys at resolution time.
    /// Leaf values pass through untouched.
    pub(crate) fn transformed(self, transform: Option<&Rc<KeyTransform>>) -> Value {
        match self {
            Value::Map(map) => Value::Map(
                map.into_iter()
                    .map(|(key, value)| {
                        let key = match transform {
                            Some(rewrite) => rewrite(&key),
                            None => key,
                        };
                        (key, value.transformed(transform))
                    })
                    .collect(),
            ),
            Value::List(items) => Value::List(
                items
                    .into_iter()
                    .map(|item| item.transformed(transform))
                    .collect(),
            ),
            Value::Lazy(mut lazy) => {
                lazy.set_transform(transform.cloned());
                Value::Lazy(lazy)
            }
            leaf => leaf,
        }
    }

    /// Forces through any chain of lazy values until a concrete value is
    /// reached. Non-lazy values pass through unchanged.
    pub(crate) fn into_produced(self) -> Value {
        match self {
            Value::Lazy(lazy) => lazy.produce().into_produced(),
            concrete => concrete,
        }
    }

    /// Resolves to a plain JSON value.
    ///
    /// Every lazy value reachable from here is invoked (fresh, as always),
    /// so the output contains no producers and is safe to hand to a JSON
    /// encoder. Non-finite floats resolve to `null`, keeping resolution
    /// total.
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(n) => serde_json::Value::Number((*n).into()),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Text(s) => serde_json::Value::String(s.clone()),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json_value).collect())
            }
            Value::Map(map) => serde_json::Value::Object(map.to_json_map()),
            Value::Lazy(lazy) => lazy.produce().to_json_value(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Map(map) => write!(f, "{map}"),
            Value::Lazy(_) => write!(f, "<lazy>"),
        }
    }
}

// Convenient From implementations for common types
impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        i64::try_from(value)
            .map(Value::Int)
            .unwrap_or_else(|_| Value::Float(value as f64))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<Map> for Value {
    fn from(value: Map) -> Self {
        Value::Map(value)
    }
}

impl From<Lazy> for Value {
    fn from(value: Lazy) -> Self {
        Value::Lazy(value)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(entries: IndexMap<String, Value>) -> Self {
        Value::Map(entries.into())
    }
}

impl<V: Into<Value>> From<Vec<V>> for Value {
    fn from(items: Vec<V>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<V: Into<Value>> From<Option<V>> for Value {
    fn from(value: Option<V>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
            },
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl FromIterator<(String, Value)> for Value {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Value::Map(iter.into_iter().collect())
    }
}

// PartialEq implementations for comparing Value with other types
impl PartialEq<str> for Value {
    fn eq(&self, other: &str) -> bool {
        match self {
            Value::Text(s) => s == other,
            _ => false,
        }
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<String> for Value {
    fn eq(&self, other: &String) -> bool {
        self == other.as_str()
    }
}

impl PartialEq<i64> for Value {
    fn eq(&self, other: &i64) -> bool {
        match self {
            Value::Int(n) => n == other,
            _ => false,
        }
    }
}

impl PartialEq<i32> for Value {
    fn eq(&self, other: &i32) -> bool {
        match self {
            Value::Int(n) => *n == *other as i64,
            _ => false,
        }
    }
}

impl PartialEq<bool> for Value {
    fn eq(&self, other: &bool) -> bool {
        match self {
            Value::Bool(b) => b == other,
            _ => false,
        }
    }
}

// Reverse implementations for symmetry
impl PartialEq<Value> for str {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for &str {
    fn eq(&self, other: &Value) -> bool {
        other == *self
    }
}

impl PartialEq<Value> for String {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for i64 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for i32 {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}

impl PartialEq<Value> for bool {
    fn eq(&self, other: &Value) -> bool {
        other == self
    }
}
