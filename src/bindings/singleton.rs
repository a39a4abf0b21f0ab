#[cfg(feature = "once-cell")]
use once_cell::sync::OnceCell;

use super::{Binding, BindingKind};
use crate::container::Container;
use crate::error::{DiError, DiResult};
use crate::introspect::Callable;
use crate::registration::AnyArc;

#[cfg(not(feature = "once-cell"))]
use crate::internal::sync::{lock, Mutex};

/// Memoized factory.
///
/// The factory runs through [`Container::call`], so its parameters are
/// autowired. The first successful result is cached for the binding's
/// lifetime; a failed call leaves the binding unresolved so the next request
/// retries.
///
/// ```
/// use ferrous_autowire::{Callable, Container, Resolver};
/// use std::sync::Arc;
///
/// struct Clock(u64);
///
/// let container = Container::default();
/// container.singleton_of::<Clock>(Callable::new(|_| Ok(Clock(42))));
///
/// let a = container.resolve::<Clock>().unwrap();
/// let b = container.resolve::<Clock>().unwrap();
/// assert!(Arc::ptr_eq(&a, &b));
/// ```
pub struct Singleton {
    // None for pre-resolved instances
    factory: Option<Callable>,
    #[cfg(feature = "once-cell")]
    instance: OnceCell<AnyArc>,
    #[cfg(not(feature = "once-cell"))]
    instance: Mutex<Option<AnyArc>>,
}

impl Singleton {
    pub fn new(factory: Callable) -> Self {
        Self {
            factory: Some(factory),
            #[cfg(feature = "once-cell")]
            instance: OnceCell::new(),
            #[cfg(not(feature = "once-cell"))]
            instance: Mutex::new(None),
        }
    }

    /// An already resolved singleton returning exactly `value`.
    pub fn instance(value: AnyArc) -> Self {
        Self {
            factory: None,
            #[cfg(feature = "once-cell")]
            instance: OnceCell::with_value(value),
            #[cfg(not(feature = "once-cell"))]
            instance: Mutex::new(Some(value)),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.cached().is_some()
    }

    fn cached(&self) -> Option<AnyArc> {
        #[cfg(feature = "once-cell")]
        {
            self.instance.get().cloned()
        }
        #[cfg(not(feature = "once-cell"))]
        {
            lock(&self.instance).clone()
        }
    }
}

impl Binding for Singleton {
    fn produce(&self, container: &Container) -> DiResult<AnyArc> {
        if let Some(value) = self.cached() {
            return Ok(value);
        }
        let Some(factory) = &self.factory else {
            return Err(DiError::NotFound("Singleton instance is missing".to_string()));
        };

        // The lock is not held while the factory runs: the factory may
        // resolve other bindings of the same container.
        let value = container.call(factory)?;

        #[cfg(feature = "once-cell")]
        {
            Ok(self.instance.get_or_init(|| value).clone())
        }
        #[cfg(not(feature = "once-cell"))]
        {
            Ok(lock(&self.instance).get_or_insert(value).clone())
        }
    }

    fn kind(&self) -> BindingKind {
        BindingKind::Singleton
    }
}

impl std::fmt::Debug for Singleton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Singleton")
            .field("factory", &self.factory.as_ref().map(Callable::name))
            .field("resolved", &self.is_resolved())
            .finish()
    }
}
