//! Dot-separated path types for addressing nested values.
//!
//! A path like `"user.profile.name"` names a chain of mapping keys starting
//! at the store root. The [`Path`]/[`PathBuf`] pair follows the same
//! borrowed/owned split as `std::path::Path`/`PathBuf`: `Path` is unsized and
//! always used behind a reference, `PathBuf` owns its storage.
//!
//! Paths are never invalid. Construction normalizes away empty segments, so
//! `".user"`, `"user."` and `"user..profile"` all address the same keys, and
//! a path made of nothing but dots is the empty path (the store root).
//!
//! ```
//! use shared_data::value::path::PathBuf;
//! use std::str::FromStr;
//!
//! let path = PathBuf::from_str("user.profile.name")?;
//! assert_eq!(path.components().collect::<Vec<_>>(), ["user", "profile", "name"]);
//!
//! let path = PathBuf::new().push("user").push("profile");
//! assert_eq!(path.as_str(), "user.profile");
//! # Ok::<(), std::convert::Infallible>(())
//! ```

use std::{borrow::Borrow, fmt, ops::Deref, str::FromStr};

/// Normalizes a dot-path string by dropping empty segments.
///
/// ```
/// # use shared_data::value::path::normalize_path;
/// assert_eq!(normalize_path(""), "");
/// assert_eq!(normalize_path(".user"), "user");
/// assert_eq!(normalize_path("user..profile"), "user.profile");
/// assert_eq!(normalize_path("..."), "");
/// ```
pub fn normalize_path(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    input
        .split('.')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join(".")
}

/// An owned dot-path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PathBuf {
    inner: String,
}

/// A borrowed dot-path.
///
/// This type is unsized and must always be used behind a reference. Any
/// `&str` coerces via `AsRef<Path>`, so store operations accept plain string
/// literals; segments are filtered lazily, so an un-normalized string still
/// addresses the right keys.
#[derive(Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Path {
    inner: str,
}

impl PathBuf {
    /// Creates an empty path, addressing the store root.
    pub fn new() -> Self {
        Self {
            inner: String::new(),
        }
    }

    /// Creates a path by normalizing an arbitrary string.
    pub fn normalize(path: &str) -> Self {
        PathBuf {
            inner: normalize_path(path),
        }
    }

    /// Appends a path fragment, normalizing it first.
    pub fn push(mut self, fragment: impl AsRef<str>) -> Self {
        let normalized = normalize_path(fragment.as_ref());
        if normalized.is_empty() {
            return self;
        }

        if self.inner.is_empty() {
            self.inner = normalized;
        } else {
            self.inner.push('.');
            self.inner.push_str(&normalized);
        }
        self
    }

    /// Returns the parent path, or `None` for root-level paths.
    pub fn parent(&self) -> Option<PathBuf> {
        self.inner.rfind('.').map(|last_dot| PathBuf {
            inner: self.inner[..last_dot].to_string(),
        })
    }
}

impl Path {
    /// Wraps a string slice as a borrowed path.
    pub fn new(s: &str) -> &Path {
        // SAFETY: Path is a repr(transparent) wrapper over str.
        unsafe { &*(s as *const str as *const Path) }
    }

    /// Returns an iterator over the non-empty segments of the path.
    pub fn components(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.inner.split('.').filter(|s| !s.is_empty())
    }

    /// Returns the number of segments.
    pub fn len(&self) -> usize {
        self.components().count()
    }

    /// Returns `true` if the path has no segments (i.e. addresses the root).
    pub fn is_empty(&self) -> bool {
        self.components().next().is_none()
    }

    /// Returns the final segment, or `None` for the empty path.
    pub fn leaf(&self) -> Option<&str> {
        self.components().next_back()
    }

    /// Returns the path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Converts this `Path` to an owned, normalized `PathBuf`.
    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf::normalize(&self.inner)
    }
}

impl Deref for PathBuf {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        Path::new(self.inner.as_str())
    }
}

impl AsRef<Path> for PathBuf {
    fn as_ref(&self) -> &Path {
        self.deref()
    }
}

impl AsRef<Path> for Path {
    fn as_ref(&self) -> &Path {
        self
    }
}

impl AsRef<Path> for str {
    fn as_ref(&self) -> &Path {
        Path::new(self)
    }
}

impl AsRef<Path> for String {
    fn as_ref(&self) -> &Path {
        Path::new(self)
    }
}

impl AsRef<str> for Path {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl AsRef<str> for PathBuf {
    fn as_ref(&self) -> &str {
        &self.inner
    }
}

impl Borrow<Path> for PathBuf {
    fn borrow(&self) -> &Path {
        self.deref()
    }
}

impl FromStr for PathBuf {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::normalize(s))
    }
}

impl From<&Path> for PathBuf {
    fn from(path: &Path) -> Self {
        path.to_path_buf()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inner.is_empty() {
            write!(f, "(root)")
        } else {
            write!(f, "{}", &self.inner)
        }
    }
}

impl fmt::Display for PathBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.deref(), f)
    }
}
