//! Type introspection.
//!
//! Rust has no runtime reflection, so the autowirer asks a [`TypeIntrospector`]
//! what it would otherwise ask the language: which classes and interfaces
//! exist, what a constructor's parameters are, and which default
//! implementation an interface declares. [`TypeRegistry`] is a manual
//! registration table implementing the trait; tests may provide their own.

mod callable;
mod class;
mod parameter;

pub use callable::{Arguments, Callable};
pub use class::{Class, Interface, InterfaceDescriptor, Method};
pub use parameter::{ParamType, Parameter};

use std::any::{Any, TypeId};
use std::sync::Arc;

use crate::default_implementation::{DefaultImplementation, DefaultImplementations};
use crate::key::{key_of, Key};
use crate::registration::Map;

/// Source of class, interface and default-implementation metadata.
pub trait TypeIntrospector: Send + Sync {
    /// Class registered under `key`.
    fn class(&self, key: &Key) -> Option<&Class>;

    /// Class whose instances have the given runtime type.
    fn class_of(&self, type_id: TypeId) -> Option<&Class>;

    /// Interface registered under `key`.
    fn interface(&self, key: &Key) -> Option<&InterfaceDescriptor>;

    /// Default implementation declared for the interface `key`.
    fn default_implementation(&self, key: &Key) -> Option<&DefaultImplementation>;

    /// Whether `key` names a known class or interface.
    fn exists(&self, key: &Key) -> bool {
        self.class(key).is_some() || self.interface(key).is_some()
    }

    fn is_interface(&self, key: &Key) -> bool {
        self.interface(key).is_some()
    }
}

/// Registration table of classes and interfaces.
///
/// # Examples
///
/// ```
/// use ferrous_autowire::{Class, Parameter, TypeRegistry, TypeIntrospector, key_of};
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct A;
/// struct B { a: Arc<A> }
///
/// let mut types = TypeRegistry::new();
/// types
///     .register(Class::plain::<A>())
///     .register(Class::new(|args| Ok(B { a: args.get::<A>("a")? })).param(Parameter::typed::<A>("a")));
///
/// assert!(types.exists(&key_of::<B>()));
/// assert!(!types.is_interface(&key_of::<B>()));
/// assert_eq!(types.class(&key_of::<B>()).unwrap().constructor().unwrap()[0].name(), "a");
/// ```
#[derive(Default)]
pub struct TypeRegistry {
    classes: Map<Key, Class>,
    by_type: Map<TypeId, Key>,
    interfaces: Map<Key, InterfaceDescriptor>,
    defaults: DefaultImplementations,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a class, replacing any previous class with the same key.
    pub fn register(&mut self, class: Class) -> &mut Self {
        self.by_type.insert(class.type_id(), class.key().clone());
        self.classes.insert(class.key().clone(), class);
        self
    }

    /// Registers an interface and its declared default implementation, if any.
    pub fn register_interface<I: ?Sized + Send + Sync + 'static>(&mut self, interface: Interface<I>) -> &mut Self {
        let descriptor = interface.into_descriptor();
        if let Some(implementation) = descriptor.declared_default() {
            self.defaults.declare(descriptor.key().clone(), implementation.clone());
        }
        self.interfaces.insert(descriptor.key().clone(), descriptor);
        self
    }

    /// Declares `C` as the default implementation of `I` outside of an
    /// [`Interface`] builder.
    ///
    /// Registers `I` when it is not known yet and keeps the implementations
    /// already declared for it. `C` itself must be registered as a class for
    /// the fallback to build it.
    ///
    /// ```
    /// use ferrous_autowire::{Class, Container, Parameter, Resolver, TypeRegistry};
    /// use std::sync::Arc;
    ///
    /// trait Cache: Send + Sync { fn name(&self) -> &'static str; }
    ///
    /// #[derive(Default)]
    /// struct MemoryCache;
    /// impl Cache for MemoryCache { fn name(&self) -> &'static str { "memory" } }
    ///
    /// struct Pages { cache: Arc<dyn Cache> }
    ///
    /// let mut types = TypeRegistry::new();
    /// types
    ///     .register(Class::plain::<MemoryCache>())
    ///     .register(
    ///         Class::new(|args| Ok(Pages { cache: args.interface::<dyn Cache>("cache")? }))
    ///             .param(Parameter::typed::<dyn Cache>("cache")),
    ///     )
    ///     .declare_default::<dyn Cache, MemoryCache, _>(|c| c as Arc<dyn Cache>);
    ///
    /// let container = Container::new(types);
    /// assert_eq!(container.resolve::<Pages>().unwrap().cache.name(), "memory");
    /// ```
    pub fn declare_default<I, C, F>(&mut self, upcast: F) -> &mut Self
    where
        I: ?Sized + Send + Sync + 'static,
        C: Any + Send + Sync,
        F: Fn(Arc<C>) -> Arc<I> + Send + Sync + 'static,
    {
        let interface = match self.interfaces.remove(&key_of::<I>()) {
            Some(existing) => Interface::<I>::from_descriptor(existing),
            None => Interface::<I>::new(),
        };
        self.register_interface(interface.default_implementation(upcast))
    }

    pub fn defaults(&self) -> &DefaultImplementations {
        &self.defaults
    }

    pub fn len(&self) -> usize {
        self.classes.len() + self.interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.interfaces.is_empty()
    }
}

impl TypeIntrospector for TypeRegistry {
    fn class(&self, key: &Key) -> Option<&Class> {
        self.classes.get(key)
    }

    fn class_of(&self, type_id: TypeId) -> Option<&Class> {
        self.by_type.get(&type_id).and_then(|key| self.classes.get(key))
    }

    fn interface(&self, key: &Key) -> Option<&InterfaceDescriptor> {
        self.interfaces.get(key)
    }

    fn default_implementation(&self, key: &Key) -> Option<&DefaultImplementation> {
        self.defaults.for_interface(key)
    }
}
