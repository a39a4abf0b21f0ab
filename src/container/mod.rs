//! The container: binding registry and resolution entry point.

mod builder;

pub use builder::ContainerBuilder;

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::autowire::Autowire;
use crate::bindings::{Binding, BindingKind, Factory, Override, Overrides, Partial, Reference, Service, Singleton};
use crate::config::ContainerConfig;
use crate::descriptors::BindingDescriptor;
use crate::error::{DiError, DiResult};
use crate::internal::sync::{read, write, RwLock};
use crate::internal::StackGuard;
use crate::introspect::{Callable, TypeIntrospector, TypeRegistry};
use crate::key::{key_of, Key};
use crate::observer::Observers;
use crate::registration::{downcast, AnyArc, Registry};
use crate::traits::ResolverCore;

/// Dependency injection container.
///
/// Applications request an instance of a class and the container autowires
/// it: every constructor parameter is resolved from an override, a default
/// value, a registered binding, or by recursively constructing the declared
/// type. Keys that were never registered are still assembled if the type
/// registry knows the class.
///
/// A container may have a parent ("prototype"). Keys unbound in the child are
/// looked up in the parent, but the parent's binding is resolved against the
/// child, so nested dependencies still see the child's bindings first.
///
/// `Container` is a cheap handle; clones share the same bindings.
///
/// # Examples
///
/// ```
/// use ferrous_autowire::{Class, Container, Parameter, Resolver, TypeRegistry};
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct Database;
/// struct Repository { db: Arc<Database> }
///
/// let mut types = TypeRegistry::new();
/// types
///     .register(Class::plain::<Database>())
///     .register(
///         Class::new(|args| Ok(Repository { db: args.get::<Database>("db")? }))
///             .param(Parameter::typed::<Database>("db")),
///     );
///
/// let container = Container::new(types);
/// container.set_instance(Database);
///
/// let a = container.resolve::<Repository>().unwrap();
/// let b = container.resolve::<Repository>().unwrap();
/// assert!(!Arc::ptr_eq(&a, &b));
/// assert!(Arc::ptr_eq(&a.db, &b.db));
/// ```
#[derive(Clone)]
pub struct Container {
    inner: Arc<ContainerInner>,
}

struct ContainerInner {
    types: Arc<dyn TypeIntrospector>,
    registry: RwLock<Registry>,
    parent: Option<Container>,
    config: ContainerConfig,
    observers: Observers,
}

/// Yields the container a request is resolved against.
struct ContainerBinding;

impl Binding for ContainerBinding {
    fn produce(&self, container: &Container) -> DiResult<AnyArc> {
        Ok(Arc::new(container.clone()))
    }

    fn kind(&self) -> BindingKind {
        BindingKind::Container
    }
}

impl Default for Container {
    /// A root container over an empty type registry.
    fn default() -> Self {
        Container::new(TypeRegistry::new())
    }
}

impl Container {
    /// Creates a root container over the given type metadata.
    pub fn new<T: TypeIntrospector + 'static>(types: T) -> Self {
        Self::builder(types).build()
    }

    /// Creates a child container sharing `parent`'s type metadata,
    /// configuration and observers.
    pub fn with_parent(parent: &Container) -> Self {
        ContainerBuilder::from_shared(parent.inner.types.clone())
            .parent(parent)
            .config(parent.inner.config.clone())
            .observers(parent.inner.observers.clone())
            .build()
    }

    /// Starts a [`ContainerBuilder`].
    pub fn builder<T: TypeIntrospector + 'static>(types: T) -> ContainerBuilder {
        ContainerBuilder::new(types)
    }

    pub(crate) fn from_parts(
        types: Arc<dyn TypeIntrospector>,
        parent: Option<Container>,
        config: ContainerConfig,
        observers: Observers,
    ) -> Self {
        let mut registry = Registry::new();
        registry.insert(key_of::<Container>(), Arc::new(ContainerBinding));
        Self {
            inner: Arc::new(ContainerInner {
                types,
                registry: RwLock::new(registry),
                parent,
                config,
                observers,
            }),
        }
    }

    /// Type metadata used for autowiring.
    pub fn types(&self) -> &dyn TypeIntrospector {
        self.inner.types.as_ref()
    }

    pub(crate) fn types_shared(&self) -> Arc<dyn TypeIntrospector> {
        self.inner.types.clone()
    }

    pub fn parent(&self) -> Option<&Container> {
        self.inner.parent.as_ref()
    }

    pub fn config(&self) -> &ContainerConfig {
        &self.inner.config
    }

    /// Whether both handles refer to the same container.
    pub fn ptr_eq(&self, other: &Container) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn id(&self) -> usize {
        Arc::as_ptr(&self.inner) as usize
    }

    /// Returns an instance for `key`.
    ///
    /// Lookup order: this container's bindings, then the parent chain (the
    /// parent's binding is resolved against this container), then autowiring
    /// the class named by `key` with no overrides. Fails with
    /// [`DiError::NotFound`] when `key` is neither bound nor a known class.
    ///
    /// Please note that you MUST NOT pass user input as `key`: any known class
    /// can be assembled through it.
    pub fn get(&self, key: &Key) -> DiResult<AnyArc> {
        let _guard = StackGuard::enter(self.id(), key, &self.inner.config)?;
        let started = self.inner.observers.resolving(key);
        let result = self.resolve(key);
        self.inner.observers.finish(key, started, &result);
        result
    }

    fn resolve(&self, key: &Key) -> DiResult<AnyArc> {
        let value = match self.lookup(key) {
            Some(binding) => binding.produce(self)?,
            None => Partial::new(self.types_shared(), key.clone(), Overrides::new()).produce(self)?,
        };
        self.coerce(key, value)
    }

    /// Finds the binding for `key` here or in the parent chain.
    fn lookup(&self, key: &Key) -> Option<Arc<dyn Binding>> {
        let own = read(&self.inner.registry).get(key);
        own.or_else(|| self.parent().and_then(|parent| parent.lookup(key)))
    }

    /// Converts values produced for interface keys into interface handles.
    pub(crate) fn coerce(&self, key: &Key, value: AnyArc) -> DiResult<AnyArc> {
        match self.types().interface(key) {
            Some(interface) => interface.adapt(value),
            None => Ok(value),
        }
    }

    /// Registers `item` under `key`, replacing any previous binding.
    ///
    /// Instances become singletons returning that exact instance; class keys
    /// become partials without overrides; bindings are stored as they are.
    pub fn set(&self, key: impl Into<Key>, item: impl Into<Service>) -> &Self {
        let binding: Arc<dyn Binding> = match item.into() {
            Service::Instance(value) => Arc::new(Singleton::instance(value)),
            Service::Class(class) => Arc::new(Partial::new(self.types_shared(), class, Overrides::new())),
            Service::Binding(binding) => binding,
        };
        write(&self.inner.registry).insert(key.into(), binding);
        self
    }

    /// Registers `value` as the instance for its own type.
    pub fn set_instance<T: Any + Send + Sync>(&self, value: T) -> &Self {
        self.set(key_of::<T>(), Service::instance(value))
    }

    /// Registers an existing `Arc` as the instance for its type.
    pub fn set_shared<T: Any + Send + Sync>(&self, value: Arc<T>) -> &Self {
        self.set(key_of::<T>(), Service::shared(value))
    }

    /// Registers an interface handle, e.g. `Arc<dyn Logger>`.
    pub fn set_trait<T: ?Sized + Send + Sync + 'static>(&self, value: Arc<T>) -> &Self {
        self.set(key_of::<T>(), Service::trait_object(value))
    }

    /// Binds the interface (or class) `I` to the class `C`.
    pub fn bind<I: ?Sized + 'static, C: ?Sized + 'static>(&self) -> &Self {
        self.set(key_of::<I>(), Service::class_of::<C>())
    }

    /// Whether `key` is bound here or in a parent, or names a known class or
    /// interface. A `true` answer does not guarantee [`get`](Self::get) succeeds.
    pub fn has(&self, key: &Key) -> bool {
        if read(&self.inner.registry).contains_key(key) {
            return true;
        }
        if let Some(parent) = self.parent() {
            if parent.has(key) {
                return true;
            }
        }
        self.types().exists(key)
    }

    /// Registers a factory invoked through [`call`](Self::call) on every
    /// resolution.
    pub fn factory(&self, key: impl Into<Key>, callable: Callable) -> &Self {
        self.set(key, Arc::new(Factory::new(callable)))
    }

    /// Registers a factory for the type `T`.
    pub fn factory_of<T: ?Sized + 'static>(&self, callable: Callable) -> &Self {
        self.factory(key_of::<T>(), callable)
    }

    /// Registers a factory whose first successful result is reused.
    pub fn singleton(&self, key: impl Into<Key>, callable: Callable) -> &Self {
        self.set(key, Arc::new(Singleton::new(callable)))
    }

    /// Registers a singleton factory for the type `T`.
    pub fn singleton_of<T: ?Sized + 'static>(&self, callable: Callable) -> &Self {
        self.singleton(key_of::<T>(), callable)
    }

    /// Returns the [`Partial`] registered for `key`, creating and registering
    /// one for the class of that name if nothing is bound yet.
    ///
    /// Fails with [`DiError::NotFound`] if `key` is bound to something other
    /// than a partial, or no class of that name exists.
    pub fn service(&self, key: impl Into<Key>) -> DiResult<Arc<Partial>> {
        let key = key.into();
        let mut registry = write(&self.inner.registry);

        if let Some(existing) = registry.get(&key) {
            return existing
                .as_partial()
                .ok_or_else(|| DiError::NotFound(format!("Service {} is not a partial", key)));
        }

        if self.types().class(&key).is_none() {
            return Err(DiError::not_found(&key));
        }

        let partial = Arc::new(Partial::new(self.types_shared(), key.clone(), Overrides::new()));
        registry.insert(key, partial.clone());
        Ok(partial)
    }

    /// Builds the class `key` once with the given overrides, without
    /// registering anything.
    ///
    /// The transient partial is not a binding, so it takes no entry on the
    /// resolution stack: an override that resolves `key` itself gets a fresh
    /// build without the overrides.
    pub fn assemble(&self, key: &Key, overrides: Overrides) -> DiResult<AnyArc> {
        Partial::new(self.types_shared(), key.clone(), overrides).produce(self)
    }

    /// Typed form of [`assemble`](Self::assemble).
    pub fn assemble_as<T: Any + Send + Sync>(&self, overrides: Overrides) -> DiResult<Arc<T>> {
        downcast(self.assemble(&key_of::<T>(), overrides)?)
    }

    /// Invokes `callable` with every parameter resolved by the container.
    pub fn call(&self, callable: &Callable) -> DiResult<AnyArc> {
        self.call_with(callable, &Overrides::new())
    }

    /// Invokes `callable`; `overrides` take priority per parameter name.
    pub fn call_with(&self, callable: &Callable, overrides: &Overrides) -> DiResult<AnyArc> {
        let owner = Key::new(callable.name().to_string());
        let args = Autowire::new(self).arguments(&owner, callable.parameters(), overrides)?;
        callable.invoke(&args)
    }

    /// Invokes the method `method` of `object`, resolving its parameters.
    /// `overrides` take priority per parameter name.
    ///
    /// The object's class is found by its runtime type, so it must have been
    /// registered with the type registry.
    pub fn call_method(&self, object: &AnyArc, method: &str, overrides: &Overrides) -> DiResult<AnyArc> {
        let class = self
            .types()
            .class_of((**object).type_id())
            .ok_or_else(|| DiError::NotFound("Object's class is not registered".to_string()))?;
        let target = class.get_method(method).ok_or_else(|| {
            DiError::NotFound(format!("Method {}::{} was not found", class.key(), method))
        })?;

        let owner = Key::new(format!("{}::{}", class.key(), method));
        let args = Autowire::new(self).arguments(&owner, target.parameters(), overrides)?;
        target.invoke(object, &args)
    }

    /// Typed form of [`call_method`](Self::call_method).
    pub fn call_method_on<T: Any + Send + Sync>(
        &self,
        object: &Arc<T>,
        method: &str,
        overrides: &Overrides,
    ) -> DiResult<AnyArc> {
        let object: AnyArc = object.clone();
        self.call_method(&object, method, overrides)
    }

    /// Creates a lazy reference to `key`. It is not registered; store it
    /// wherever a binding is accepted, e.g. as an override.
    pub fn reference(&self, key: impl Into<Key>) -> Arc<Reference> {
        Arc::new(Reference::new(key))
    }

    /// Lazy reference wrapped as an [`Override`].
    pub fn lazy(&self, key: impl Into<Key>) -> Override {
        Override::from(self.reference(key))
    }

    /// Describes this container's own bindings, sorted by key.
    pub fn descriptors(&self) -> Vec<BindingDescriptor> {
        let mut descriptors: Vec<BindingDescriptor> = read(&self.inner.registry)
            .iter()
            .map(|(key, binding)| BindingDescriptor::new(key.clone(), binding.kind()))
            .collect();
        descriptors.sort_by(|a, b| a.key.cmp(&b.key));
        descriptors
    }

    #[cfg(feature = "diagnostics")]
    pub fn to_debug_string(&self) -> String {
        let mut s = String::new();
        s.push_str("=== Container Debug ===\n");
        s.push_str(&format!("Parent: {}\n", self.parent().is_some()));
        s.push_str(&format!("Observers: {}\n", self.inner.observers.len()));
        s.push_str("Bindings:\n");
        for d in self.descriptors() {
            s.push_str(&format!("  {}: {:?}\n", d.key, d.kind));
        }
        s
    }
}

impl ResolverCore for Container {
    fn resolve_any(&self, key: &Key) -> DiResult<AnyArc> {
        self.get(key)
    }
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("bindings", &read(&self.inner.registry).iter().count())
            .field("has_parent", &self.inner.parent.is_some())
            .field("observers", &self.inner.observers.len())
            .field("config", &self.inner.config)
            .finish()
    }
}
