//! Type-erased instances and the binding registry.

use std::any::Any;
use std::sync::Arc;

use crate::bindings::Binding;
use crate::error::{DiError, DiResult};
use crate::key::Key;

/// Type-erased Arc for storage and transport of resolved instances.
pub type AnyArc = Arc<dyn Any + Send + Sync>;

#[cfg(feature = "ahash")]
pub(crate) type Map<K, V> = std::collections::HashMap<K, V, ahash::RandomState>;

#[cfg(not(feature = "ahash"))]
pub(crate) type Map<K, V> = std::collections::HashMap<K, V>;

/// Downcasts a resolved instance to a concrete type.
///
/// ```
/// use ferrous_autowire::{downcast, AnyArc};
/// use std::sync::Arc;
///
/// let value: AnyArc = Arc::new(42u32);
/// assert_eq!(*downcast::<u32>(value.clone()).unwrap(), 42);
/// assert!(downcast::<String>(value).is_err());
/// ```
pub fn downcast<T: Any + Send + Sync>(value: AnyArc) -> DiResult<Arc<T>> {
    value
        .downcast::<T>()
        .map_err(|_| DiError::TypeMismatch(std::any::type_name::<T>().to_string()))
}

/// Downcasts a resolved interface handle (stored as `Arc<Arc<dyn Trait>>`).
pub fn downcast_trait<T: ?Sized + Send + Sync + 'static>(value: AnyArc) -> DiResult<Arc<T>> {
    value
        .downcast::<Arc<T>>()
        .map(|handle| (*handle).clone())
        .map_err(|_| DiError::TypeMismatch(std::any::type_name::<T>().to_string()))
}

/// Binding map owned by a container. Keys are unique; the last insert wins.
#[derive(Default)]
pub(crate) struct Registry {
    items: Map<Key, Arc<dyn Binding>>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Inserts a binding, replacing any previous one for the same key
    pub(crate) fn insert(&mut self, key: Key, binding: Arc<dyn Binding>) {
        self.items.insert(key, binding);
    }

    #[inline]
    pub(crate) fn get(&self, key: &Key) -> Option<Arc<dyn Binding>> {
        self.items.get(key).cloned()
    }

    #[inline]
    pub(crate) fn contains_key(&self, key: &Key) -> bool {
        self.items.contains_key(key)
    }

    /// Iterator over all key-binding pairs
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&Key, &Arc<dyn Binding>)> {
        self.items.iter()
    }
}
