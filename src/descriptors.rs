//! Binding descriptors for introspection and diagnostics.

use crate::bindings::BindingKind;
use crate::key::Key;

/// Describes one binding registered in a container.
///
/// # Examples
///
/// ```rust
/// use ferrous_autowire::{BindingKind, Callable, Container, Service};
///
/// let container = Container::default();
/// container.set("port", Service::instance(8080u16));
/// container.factory("now", Callable::new(|_| Ok(0u64)));
///
/// let descriptors = container.descriptors();
/// let port = descriptors.iter().find(|d| d.key.display_name() == "port").unwrap();
/// assert_eq!(port.kind, BindingKind::Singleton);
///
/// let factories = descriptors.iter().filter(|d| d.kind == BindingKind::Factory).count();
/// assert_eq!(factories, 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingDescriptor {
    /// The key the binding is registered under
    pub key: Key,
    /// Binding variant
    pub kind: BindingKind,
}

impl BindingDescriptor {
    pub fn new(key: Key, kind: BindingKind) -> Self {
        Self { key, kind }
    }

    /// Human-readable key name.
    pub fn name(&self) -> &str {
        self.key.display_name()
    }

    /// Whether resolving this binding yields the same instance every time.
    pub fn is_shared(&self) -> bool {
        matches!(self.kind, BindingKind::Singleton | BindingKind::Container)
    }
}
