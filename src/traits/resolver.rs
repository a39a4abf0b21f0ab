//! Resolver traits for service resolution.

use std::any::Any;
use std::sync::Arc;

use crate::error::DiResult;
use crate::key::{key_of, Key};
use crate::registration::{downcast, downcast_trait, AnyArc};

/// Core resolver trait for object-safe service resolution.
///
/// Most users should use the [`Resolver`] trait instead, which provides
/// ergonomic generic methods built on top of this trait.
pub trait ResolverCore: Send + Sync {
    /// Resolves `key` to a type-erased instance.
    fn resolve_any(&self, key: &Key) -> DiResult<AnyArc>;
}

/// High-level resolver interface with generic methods for type-safe
/// resolution.
///
/// # Examples
///
/// ```
/// use ferrous_autowire::{Class, Container, Interface, Resolver, TypeRegistry};
/// use std::sync::Arc;
///
/// trait Logger: Send + Sync {
///     fn log(&self, msg: &str) -> String;
/// }
///
/// #[derive(Default)]
/// struct ConsoleLogger;
/// impl Logger for ConsoleLogger {
///     fn log(&self, msg: &str) -> String {
///         format!("LOG: {}", msg)
///     }
/// }
///
/// let mut types = TypeRegistry::new();
/// types
///     .register(Class::plain::<ConsoleLogger>())
///     .register_interface(
///         Interface::<dyn Logger>::new()
///             .implemented_by(|c: Arc<ConsoleLogger>| c as Arc<dyn Logger>),
///     );
///
/// let container = Container::new(types);
/// container.set_instance(42usize);
/// container.bind::<dyn Logger, ConsoleLogger>();
///
/// assert_eq!(*container.resolve_required::<usize>(), 42);
/// assert!(container.try_resolve::<String>().unwrap().is_none());
///
/// let logger = container.resolve_trait_required::<dyn Logger>();
/// assert_eq!(logger.log("ready"), "LOG: ready");
/// ```
pub trait Resolver: ResolverCore {
    /// Resolves a concrete type.
    fn resolve<T: Any + Send + Sync>(&self) -> DiResult<Arc<T>> {
        downcast(self.resolve_any(&key_of::<T>())?)
    }

    /// Resolves a concrete type, returning `Ok(None)` when nothing can
    /// provide it. Other failures still propagate.
    fn try_resolve<T: Any + Send + Sync>(&self) -> DiResult<Option<Arc<T>>> {
        match self.resolve::<T>() {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Resolves a concrete type, panicking on failure.
    fn resolve_required<T: Any + Send + Sync>(&self) -> Arc<T> {
        self.resolve::<T>()
            .unwrap_or_else(|e| panic!("Failed to resolve {}: {}", std::any::type_name::<T>(), e))
    }

    /// Resolves an interface handle, e.g. `resolve_trait::<dyn Logger>()`.
    fn resolve_trait<T: ?Sized + Send + Sync + 'static>(&self) -> DiResult<Arc<T>> {
        downcast_trait(self.resolve_any(&key_of::<T>())?)
    }

    /// Resolves an interface handle, panicking on failure.
    fn resolve_trait_required<T: ?Sized + Send + Sync + 'static>(&self) -> Arc<T> {
        self.resolve_trait::<T>().unwrap_or_else(|e| {
            panic!("Failed to resolve trait {}: {}", std::any::type_name::<T>(), e)
        })
    }
}

impl Resolver for crate::Container {}
