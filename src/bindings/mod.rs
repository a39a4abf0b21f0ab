//! Bindings: registered strategies for producing an instance for a key.
//!
//! - [`Singleton`]: memoized factory, invoked at most once successfully
//! - [`Factory`]: factory re-invoked on every resolution
//! - [`Partial`]: class plus overridable constructor arguments
//! - [`Reference`]: lazy indirection to another key

mod factory;
mod partial;
mod reference;
mod singleton;

pub use factory::Factory;
pub use partial::Partial;
pub use reference::Reference;
pub use singleton::Singleton;

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::container::Container;
use crate::error::DiResult;
use crate::key::{key_of, Key};
use crate::registration::{AnyArc, Map};

/// Binding variants, for diagnostics and descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    /// Memoized; the same instance on every resolution
    Singleton,
    /// New instance per resolution, produced by a factory function
    Factory,
    /// New instance per resolution, constructed by the autowirer
    Partial,
    /// Forwards to another key
    Reference,
    /// The container's own identity
    Container,
}

/// A resolvable unit that produces an instance given the container it is
/// resolved against.
///
/// The container passed to [`produce`](Self::produce) is the one the request
/// originated from, which may be a child of the container that owns the
/// binding.
pub trait Binding: Send + Sync {
    fn produce(&self, container: &Container) -> DiResult<AnyArc>;

    fn kind(&self) -> BindingKind;

    /// Returns the binding as a [`Partial`] if it is one.
    fn as_partial(self: Arc<Self>) -> Option<Arc<Partial>> {
        None
    }
}

/// Value supplied for a constructor or callable parameter by name.
#[derive(Clone)]
pub enum Override {
    /// Used verbatim
    Value(AnyArc),
    /// Resolved against the container at construction time
    Binding(Arc<dyn Binding>),
}

impl Override {
    /// Wraps a concrete value.
    pub fn value<T: Any + Send + Sync>(value: T) -> Self {
        Override::Value(Arc::new(value))
    }

    /// Shares an existing instance; the constructed object receives this exact `Arc`.
    pub fn shared<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Override::Value(value)
    }

    /// Supplies an interface handle for an interface-typed parameter.
    pub fn trait_object<T: ?Sized + Send + Sync + 'static>(value: Arc<T>) -> Self {
        Override::Value(Arc::new(value))
    }

    /// Uses an already type-erased instance.
    pub fn instance(value: AnyArc) -> Self {
        Override::Value(value)
    }

    /// Resolves the given binding each time the override is used.
    pub fn binding(binding: Arc<dyn Binding>) -> Self {
        Override::Binding(binding)
    }

    pub(crate) fn resolve(&self, container: &Container) -> DiResult<AnyArc> {
        match self {
            Override::Value(value) => Ok(value.clone()),
            Override::Binding(binding) => binding.produce(container),
        }
    }
}

impl<B: Binding + 'static> From<Arc<B>> for Override {
    fn from(binding: Arc<B>) -> Self {
        Override::Binding(binding)
    }
}

impl fmt::Debug for Override {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Override::Value(_) => f.write_str("Override::Value(..)"),
            Override::Binding(binding) => write!(f, "Override::Binding({:?})", binding.kind()),
        }
    }
}

/// Parameter name to [`Override`] map.
///
/// ```
/// use ferrous_autowire::{Override, Overrides};
///
/// let overrides = Overrides::new()
///     .with("host", Override::value(String::from("localhost")))
///     .with("port", Override::value(8080u16));
/// assert_eq!(overrides.len(), 2);
/// assert!(overrides.contains("port"));
/// ```
#[derive(Clone, Default, Debug)]
pub struct Overrides {
    entries: Map<String, Override>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Override>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Override>) {
        self.entries.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Override> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// What [`Container::set`] accepts: raw instances and class names are
/// normalized into bindings at registration time.
#[derive(Clone)]
pub enum Service {
    /// Registered as a [`Singleton`] returning this exact instance
    Instance(AnyArc),
    /// Registered as a [`Partial`] with no overrides
    Class(Key),
    /// Registered as is
    Binding(Arc<dyn Binding>),
}

impl Service {
    pub fn instance<T: Any + Send + Sync>(value: T) -> Self {
        Service::Instance(Arc::new(value))
    }

    pub fn shared<T: Any + Send + Sync>(value: Arc<T>) -> Self {
        Service::Instance(value)
    }

    pub fn trait_object<T: ?Sized + Send + Sync + 'static>(value: Arc<T>) -> Self {
        Service::Instance(Arc::new(value))
    }

    pub fn class(key: impl Into<Key>) -> Self {
        Service::Class(key.into())
    }

    pub fn class_of<T: ?Sized + 'static>() -> Self {
        Service::Class(key_of::<T>())
    }
}

impl<B: Binding + 'static> From<Arc<B>> for Service {
    fn from(binding: Arc<B>) -> Self {
        Service::Binding(binding)
    }
}

impl From<Key> for Service {
    fn from(key: Key) -> Self {
        Service::Class(key)
    }
}
