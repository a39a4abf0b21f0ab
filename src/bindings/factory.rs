use super::{Binding, BindingKind};
use crate::container::Container;
use crate::error::DiResult;
use crate::introspect::Callable;
use crate::registration::AnyArc;

/// Factory re-invoked through [`Container::call`] on every resolution.
#[derive(Debug)]
pub struct Factory {
    factory: Callable,
}

impl Factory {
    pub fn new(factory: Callable) -> Self {
        Self { factory }
    }

    pub fn callable(&self) -> &Callable {
        &self.factory
    }
}

impl Binding for Factory {
    fn produce(&self, container: &Container) -> DiResult<AnyArc> {
        container.call(&self.factory)
    }

    fn kind(&self) -> BindingKind {
        BindingKind::Factory
    }
}
