//! Deferred values backed by zero-argument producers.
//!
//! A [`Lazy`] holds a producer closure instead of data. The producer is
//! invoked fresh on every resolution and its result is never cached, so two
//! reads separated by a mutation of state the closure captures will observe
//! different values. That re-invocation behavior is the point: it lets a
//! store entry track live external state until the moment it is read.

use std::{fmt, rc::Rc};

use super::Value;

/// A key-rewriting function, applied to every mapping key at every depth.
pub type KeyTransform = dyn Fn(&str) -> String;

/// A deferred value: a zero-argument producer invoked at read time.
///
/// Cloning is shallow; clones share the same producer. The key-transform
/// snapshot is stamped on by the store at put time, so a lazy value resolves
/// its produced keys through the transformer that was configured when it was
/// written, not whatever is configured when it is read.
pub struct Lazy {
    producer: Rc<dyn Fn() -> Value>,
    transform: Option<Rc<KeyTransform>>,
}

impl Lazy {
    /// Wraps a producer closure. The closure may return anything convertible
    /// into a [`Value`], including another lazy value.
    pub fn new<V, F>(producer: F) -> Self
    where
        F: Fn() -> V + 'static,
        V: Into<Value>,
    {
        Self {
            producer: Rc::new(move || producer().into()),
            transform: None,
        }
    }

    /// Invokes the producer and runs the captured key-transform pass over
    /// whatever it returns. Never cached: each call re-invokes the producer.
    pub fn produce(&self) -> Value {
        (self.producer)().transformed(self.transform.as_ref())
    }

    /// Records the key-transform snapshot this value resolves through.
    pub(crate) fn set_transform(&mut self, transform: Option<Rc<KeyTransform>>) {
        self.transform = transform;
    }
}

impl Clone for Lazy {
    fn clone(&self) -> Self {
        Self {
            producer: Rc::clone(&self.producer),
            transform: self.transform.clone(),
        }
    }
}

/// Producer identity, not produced-value equality. Comparing would otherwise
/// have to invoke the producers, which is a read-time side effect.
impl PartialEq for Lazy {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.producer, &other.producer)
    }
}

/// Never invokes the producer.
impl fmt::Debug for Lazy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lazy")
            .field("producer", &"<fn>")
            .field("transform", &self.transform.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
