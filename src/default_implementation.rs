//! Default implementation metadata for interfaces.
//!
//! An interface may name a concrete class the autowirer falls back to when the
//! interface itself has no binding. The declarations live in a side table keyed
//! by interface, filled when interfaces are registered with a
//! [`TypeRegistry`](crate::TypeRegistry) or through explicit calls.

use crate::key::Key;
use crate::registration::Map;

/// Pairs an interface with the concrete class used when nothing is bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultImplementation {
    interface: Key,
    implementation: Key,
}

impl DefaultImplementation {
    pub fn new(interface: impl Into<Key>, implementation: impl Into<Key>) -> Self {
        Self {
            interface: interface.into(),
            implementation: implementation.into(),
        }
    }

    pub fn interface(&self) -> &Key {
        &self.interface
    }

    pub fn implementation(&self) -> &Key {
        &self.implementation
    }
}

/// Side table of default implementation declarations.
///
/// # Examples
///
/// ```
/// use ferrous_autowire::{DefaultImplementations, Key};
///
/// let mut defaults = DefaultImplementations::new();
/// defaults.declare("app::Cache", "app::MemoryCache");
///
/// let found = defaults.for_interface(&Key::from("app::Cache")).unwrap();
/// assert_eq!(found.implementation(), &Key::from("app::MemoryCache"));
/// assert!(defaults.for_interface(&Key::from("app::Queue")).is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct DefaultImplementations {
    entries: Map<Key, DefaultImplementation>,
}

impl DefaultImplementations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares (or replaces) the default implementation of `interface`.
    pub fn declare(&mut self, interface: impl Into<Key>, implementation: impl Into<Key>) {
        let declaration = DefaultImplementation::new(interface, implementation);
        self.entries.insert(declaration.interface.clone(), declaration);
    }

    /// Looks up the declaration for `interface`; absence is not an error.
    pub fn for_interface(&self, interface: &Key) -> Option<&DefaultImplementation> {
        self.entries.get(interface)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
