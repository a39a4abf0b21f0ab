use super::{Binding, BindingKind};
use crate::container::Container;
use crate::error::DiResult;
use crate::key::Key;
use crate::registration::AnyArc;

/// A promise of the service registered under another key, resolved lazily.
///
/// A reference caches nothing itself; whatever binding the target key
/// resolves to decides whether the instance is shared.
///
/// ```
/// use ferrous_autowire::{Container, Resolver, Service, key_of};
/// use std::sync::Arc;
///
/// struct Settings(&'static str);
///
/// let container = Container::default();
/// container.set("settings.primary", Service::instance(Settings("primary")));
/// container.set(key_of::<Settings>(), container.reference("settings.primary"));
///
/// assert_eq!(container.resolve::<Settings>().unwrap().0, "primary");
/// ```
#[derive(Debug, Clone)]
pub struct Reference {
    key: Key,
}

impl Reference {
    pub fn new(key: impl Into<Key>) -> Self {
        Self { key: key.into() }
    }

    pub fn key(&self) -> &Key {
        &self.key
    }
}

impl Binding for Reference {
    fn produce(&self, container: &Container) -> DiResult<AnyArc> {
        container.get(&self.key)
    }

    fn kind(&self) -> BindingKind {
        BindingKind::Reference
    }
}
