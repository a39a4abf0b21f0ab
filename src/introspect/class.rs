//! Class, method and interface descriptors.

use std::any::{Any, TypeId};
use std::marker::PhantomData;
use std::sync::Arc;

use super::callable::CallFn;
use super::{Arguments, Parameter};
use crate::error::{DiError, DiResult};
use crate::key::{key_of, Key};
use crate::registration::{downcast, AnyArc, Map};

type MethodFn = dyn Fn(&AnyArc, &Arguments) -> DiResult<AnyArc> + Send + Sync;
type UpcastFn = dyn Fn(AnyArc) -> DiResult<AnyArc> + Send + Sync;

/// Describes a constructible class: its constructor parameters, how to build
/// it from resolved arguments, and the methods callable through
/// [`Container::call_method`](crate::Container::call_method).
///
/// # Examples
///
/// ```
/// use ferrous_autowire::{Class, Parameter};
/// use std::sync::Arc;
///
/// #[derive(Default)]
/// struct Config;
/// struct Server { config: Arc<Config>, port: u16 }
///
/// let config = Class::plain::<Config>();
/// assert!(config.constructor().is_none());
///
/// let server = Class::new(|args| Ok(Server {
///         config: args.get::<Config>("config")?,
///         port: args.cloned::<u16>("port")?,
///     }))
///     .param(Parameter::typed::<Config>("config"))
///     .param(Parameter::builtin::<u16>("port").with_default(8080u16));
/// assert_eq!(server.constructor().map(|p| p.len()), Some(2));
/// ```
pub struct Class {
    key: Key,
    type_id: TypeId,
    constructor: Option<Vec<Parameter>>,
    build: Arc<CallFn>,
    methods: Map<String, Method>,
}

impl Class {
    /// A class with a declared constructor. Parameters are added with
    /// [`param`](Self::param); `build` receives them in declaration order.
    pub fn new<T, F>(build: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&Arguments) -> DiResult<T> + Send + Sync + 'static,
    {
        Self {
            key: key_of::<T>(),
            type_id: TypeId::of::<T>(),
            constructor: Some(Vec::new()),
            build: Arc::new(move |args: &Arguments| build(args).map(|value| Arc::new(value) as AnyArc)),
            methods: Map::default(),
        }
    }

    /// A class without a declared constructor, instantiated through `Default`.
    pub fn plain<T>() -> Self
    where
        T: Any + Send + Sync + Default,
    {
        Self {
            key: key_of::<T>(),
            type_id: TypeId::of::<T>(),
            constructor: None,
            build: Arc::new(|_: &Arguments| -> DiResult<AnyArc> { Ok(Arc::new(T::default()) as AnyArc) }),
            methods: Map::default(),
        }
    }

    /// Registers the class under a custom key instead of its type name.
    pub fn named(mut self, key: impl Into<Key>) -> Self {
        self.key = key.into();
        self
    }

    /// Declares the next constructor parameter.
    pub fn param(mut self, param: Parameter) -> Self {
        self.constructor.get_or_insert_with(Vec::new).push(param);
        self
    }

    /// Declares a method callable with autowired arguments.
    pub fn method(mut self, method: Method) -> Self {
        self.methods.insert(method.name.clone(), method);
        self
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Constructor parameters, or `None` when no constructor is declared.
    pub fn constructor(&self) -> Option<&[Parameter]> {
        self.constructor.as_deref()
    }

    pub fn get_method(&self, name: &str) -> Option<&Method> {
        self.methods.get(name)
    }

    /// Constructor parameters whose declared type is `dependency`.
    pub fn parameters_of_type<'a>(&'a self, dependency: &'a Key) -> impl Iterator<Item = &'a Parameter> + 'a {
        self.constructor()
            .unwrap_or(&[])
            .iter()
            .filter(move |p| p.declared_type() == Some(dependency))
    }

    pub(crate) fn instantiate(&self, args: &Arguments) -> DiResult<AnyArc> {
        (self.build)(args)
    }
}

/// A method of a class, invoked on an existing instance.
///
/// ```
/// use ferrous_autowire::{Method, Parameter};
///
/// struct Greeter { name: String }
///
/// let greet = Method::new("greet", |this: &Greeter, args| {
///         Ok(format!("{}, {}", args.cloned::<String>("salutation")?, this.name))
///     })
///     .param(Parameter::builtin::<String>("salutation"));
/// assert_eq!(greet.name(), "greet");
/// ```
pub struct Method {
    name: String,
    params: Vec<Parameter>,
    body: Arc<MethodFn>,
}

impl Method {
    pub fn new<T, R, F>(name: impl Into<String>, f: F) -> Self
    where
        T: Any + Send + Sync,
        R: Any + Send + Sync,
        F: Fn(&T, &Arguments) -> DiResult<R> + Send + Sync + 'static,
    {
        let body = move |this: &AnyArc, args: &Arguments| -> DiResult<AnyArc> {
            let this = this
                .downcast_ref::<T>()
                .ok_or_else(|| DiError::TypeMismatch(std::any::type_name::<T>().to_string()))?;
            f(this, args).map(|value| Arc::new(value) as AnyArc)
        };
        Self {
            name: name.into(),
            params: Vec::new(),
            body: Arc::new(body),
        }
    }

    pub fn param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.params
    }

    pub(crate) fn invoke(&self, this: &AnyArc, args: &Arguments) -> DiResult<AnyArc> {
        (self.body)(this, args)
    }
}

/// Builder for an interface (trait object) declaration.
///
/// Instances of an interface travel type-erased as `Arc<Arc<dyn Trait>>`.
/// Each implementation is declared with the coercion from the concrete
/// `Arc<C>` to `Arc<dyn Trait>`, so a concrete instance produced for an
/// interface key is converted transparently.
///
/// ```
/// use ferrous_autowire::{Class, Interface, TypeRegistry, TypeIntrospector, key_of};
/// use std::sync::Arc;
///
/// trait Logger: Send + Sync { fn log(&self, msg: &str); }
///
/// #[derive(Default)]
/// struct ConsoleLogger;
/// impl Logger for ConsoleLogger { fn log(&self, msg: &str) { println!("{}", msg); } }
///
/// let mut types = TypeRegistry::new();
/// types.register(Class::plain::<ConsoleLogger>());
/// types.register_interface(
///     Interface::<dyn Logger>::new()
///         .default_implementation(|c: Arc<ConsoleLogger>| c as Arc<dyn Logger>),
/// );
///
/// let default = types.default_implementation(&key_of::<dyn Logger>()).unwrap();
/// assert_eq!(default.implementation(), &key_of::<ConsoleLogger>());
/// ```
pub struct Interface<I: ?Sized> {
    descriptor: InterfaceDescriptor,
    _marker: PhantomData<fn(Arc<I>)>,
}

impl<I: ?Sized + Send + Sync + 'static> Interface<I> {
    pub fn new() -> Self {
        Self {
            descriptor: InterfaceDescriptor {
                key: key_of::<I>(),
                handle: TypeId::of::<Arc<I>>(),
                implementations: Map::default(),
                default: None,
            },
            _marker: PhantomData,
        }
    }

    /// Declares `C` as an implementation, with its upcast to `Arc<I>`.
    pub fn implemented_by<C, F>(mut self, upcast: F) -> Self
    where
        C: Any + Send + Sync,
        F: Fn(Arc<C>) -> Arc<I> + Send + Sync + 'static,
    {
        let upcast = move |value: AnyArc| -> DiResult<AnyArc> {
            let concrete = downcast::<C>(value)?;
            Ok(Arc::new(upcast(concrete)) as AnyArc)
        };
        self.descriptor.implementations.insert(
            TypeId::of::<C>(),
            Implementation {
                key: key_of::<C>(),
                upcast: Arc::new(upcast),
            },
        );
        self
    }

    /// Declares `C` as an implementation and as the fallback used when the
    /// interface has no binding.
    pub fn default_implementation<C, F>(mut self, upcast: F) -> Self
    where
        C: Any + Send + Sync,
        F: Fn(Arc<C>) -> Arc<I> + Send + Sync + 'static,
    {
        self = self.implemented_by(upcast);
        self.descriptor.default = Some(key_of::<C>());
        self
    }

    /// Reopens a registered descriptor to declare more implementations.
    pub(crate) fn from_descriptor(descriptor: InterfaceDescriptor) -> Self {
        Self {
            descriptor,
            _marker: PhantomData,
        }
    }

    pub(crate) fn into_descriptor(self) -> InterfaceDescriptor {
        self.descriptor
    }
}

impl<I: ?Sized + Send + Sync + 'static> Default for Interface<I> {
    fn default() -> Self {
        Self::new()
    }
}

struct Implementation {
    key: Key,
    upcast: Arc<UpcastFn>,
}

/// Type-erased interface metadata held by a [`TypeRegistry`](super::TypeRegistry).
pub struct InterfaceDescriptor {
    key: Key,
    handle: TypeId,
    implementations: Map<TypeId, Implementation>,
    default: Option<Key>,
}

impl InterfaceDescriptor {
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Keys of all declared implementations.
    pub fn implementations(&self) -> impl Iterator<Item = &Key> {
        self.implementations.values().map(|i| &i.key)
    }

    pub(crate) fn declared_default(&self) -> Option<&Key> {
        self.default.as_ref()
    }

    /// Converts `value` into this interface's handle. Values that already are
    /// handles pass through untouched.
    pub fn adapt(&self, value: AnyArc) -> DiResult<AnyArc> {
        let type_id = (*value).type_id();
        if type_id == self.handle {
            return Ok(value);
        }
        match self.implementations.get(&type_id) {
            Some(implementation) => (implementation.upcast)(value),
            None => Err(DiError::TypeMismatch(format!(
                "resolved value is not a declared implementation of {}",
                self.key
            ))),
        }
    }
}
