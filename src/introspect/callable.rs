//! Callables and the positional argument lists handed to them.

use std::any::Any;
use std::borrow::Cow;
use std::sync::Arc;

use super::Parameter;
use crate::error::{DiError, DiResult};
use crate::registration::{downcast, downcast_trait, AnyArc};

#[cfg(feature = "smallvec")]
type ArgVec = smallvec::SmallVec<[(String, AnyArc); 4]>;

#[cfg(not(feature = "smallvec"))]
type ArgVec = Vec<(String, AnyArc)>;

pub(crate) type CallFn = dyn Fn(&Arguments) -> DiResult<AnyArc> + Send + Sync;

/// Resolved arguments, in declaration order, addressable by parameter name.
///
/// # Examples
///
/// ```
/// use ferrous_autowire::Arguments;
/// use std::sync::Arc;
///
/// let mut args = Arguments::new();
/// args.push("port", Arc::new(8080u16));
/// args.push("host", Arc::new(String::from("localhost")));
///
/// assert_eq!(*args.get::<u16>("port").unwrap(), 8080);
/// assert_eq!(args.cloned::<String>("host").unwrap(), "localhost");
/// assert!(args.get::<u32>("port").is_err());
/// assert!(args.get::<u16>("missing").is_err());
/// ```
#[derive(Default)]
pub struct Arguments {
    values: ArgVec,
}

impl Arguments {
    pub fn new() -> Self {
        Self { values: ArgVec::new() }
    }

    /// Appends the next positional argument.
    pub fn push(&mut self, name: impl Into<String>, value: AnyArc) {
        self.values.push((name.into(), value));
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Type-erased argument by parameter name.
    pub fn raw(&self, name: &str) -> DiResult<&AnyArc> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
            .ok_or_else(|| DiError::unresolved(name, "no argument with this name was resolved"))
    }

    /// Type-erased argument by position.
    pub fn at(&self, index: usize) -> DiResult<&AnyArc> {
        self.values
            .get(index)
            .map(|(_, v)| v)
            .ok_or_else(|| DiError::unresolved(&format!("#{}", index), "argument index out of range"))
    }

    /// Argument downcast to a concrete type.
    pub fn get<T: Any + Send + Sync>(&self, name: &str) -> DiResult<Arc<T>> {
        downcast(self.raw(name)?.clone())
    }

    /// Argument cloned out of its `Arc`; convenient for scalars.
    pub fn cloned<T: Any + Send + Sync + Clone>(&self, name: &str) -> DiResult<T> {
        self.get::<T>(name).map(|v| (*v).clone())
    }

    /// Argument resolved for an interface parameter.
    pub fn interface<T: ?Sized + Send + Sync + 'static>(&self, name: &str) -> DiResult<Arc<T>> {
        downcast_trait(self.raw(name)?.clone())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AnyArc)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }
}

/// A function whose parameters are resolved by the container.
///
/// # Examples
///
/// ```
/// use ferrous_autowire::{Callable, Container, Parameter, downcast};
///
/// let greet = Callable::new(|args| Ok(format!("Hello {}", args.cloned::<String>("who")?)))
///     .param(Parameter::builtin::<String>("who").with_default(String::from("world")));
///
/// let container = Container::default();
/// let out = downcast::<String>(container.call(&greet).unwrap()).unwrap();
/// assert_eq!(*out, "Hello world");
/// ```
#[derive(Clone)]
pub struct Callable {
    name: Cow<'static, str>,
    params: Vec<Parameter>,
    body: Arc<CallFn>,
}

impl Callable {
    /// Wraps a function returning a concrete value.
    pub fn new<R, F>(f: F) -> Self
    where
        R: Any + Send + Sync,
        F: Fn(&Arguments) -> DiResult<R> + Send + Sync + 'static,
    {
        Self::erased(move |args| f(args).map(|value| Arc::new(value) as AnyArc))
    }

    /// Wraps a function that already returns a type-erased instance.
    pub fn erased<F>(f: F) -> Self
    where
        F: Fn(&Arguments) -> DiResult<AnyArc> + Send + Sync + 'static,
    {
        Self {
            name: Cow::Borrowed("{closure}"),
            params: Vec::new(),
            body: Arc::new(f),
        }
    }

    /// Declares the next parameter.
    pub fn param(mut self, param: Parameter) -> Self {
        self.params.push(param);
        self
    }

    /// Names the callable for error messages.
    pub fn named(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.params
    }

    pub(crate) fn invoke(&self, args: &Arguments) -> DiResult<AnyArc> {
        (self.body)(args)
    }
}

impl std::fmt::Debug for Callable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callable")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish()
    }
}
