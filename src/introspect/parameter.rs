//! Parameter metadata for constructors, methods and callables.

use std::any::Any;
use std::sync::Arc;

use crate::key::{key_of, Key};
use crate::registration::AnyArc;

/// Declared type of a parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    /// No declared type at all
    Untyped,
    /// A type that does not name a single class or interface (a union,
    /// an anonymous type); carries a description for error messages
    Anonymous(String),
    /// A primitive the container cannot build, e.g. `String` or `u16`
    Builtin(&'static str),
    /// A class or interface that can be looked up in the container
    Named(Key),
}

/// A single declared parameter: name, type and optional default value.
///
/// # Examples
///
/// ```
/// use ferrous_autowire::{Parameter, ParamType, key_of};
///
/// struct Database;
///
/// let db = Parameter::typed::<Database>("db");
/// assert_eq!(db.ty(), &ParamType::Named(key_of::<Database>()));
///
/// let greeting = Parameter::builtin::<String>("greeting").with_default(String::from("hello"));
/// assert!(greeting.has_default());
/// ```
#[derive(Debug, Clone)]
pub struct Parameter {
    name: String,
    ty: ParamType,
    default: Option<AnyArc>,
}

impl Parameter {
    fn new(name: impl Into<String>, ty: ParamType) -> Self {
        Self {
            name: name.into(),
            ty,
            default: None,
        }
    }

    /// Parameter typed as the class or interface `T`.
    pub fn typed<T: ?Sized + 'static>(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::Named(key_of::<T>()))
    }

    /// Parameter typed by an explicit key.
    pub fn named(name: impl Into<String>, key: impl Into<Key>) -> Self {
        Self::new(name, ParamType::Named(key.into()))
    }

    /// Parameter of a built-in type; only satisfiable by an override or default.
    pub fn builtin<T: ?Sized + 'static>(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::Builtin(std::any::type_name::<T>()))
    }

    /// Parameter without a declared type.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self::new(name, ParamType::Untyped)
    }

    /// Parameter whose type is not nominal, e.g. a union `A|B`.
    pub fn anonymous(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, ParamType::Anonymous(description.into()))
    }

    /// Declares a default value used whenever no override is supplied.
    pub fn with_default<T: Any + Send + Sync>(self, value: T) -> Self {
        self.with_default_shared(Arc::new(value))
    }

    /// Declares an already type-erased default value.
    pub fn with_default_shared(mut self, value: AnyArc) -> Self {
        self.default = Some(value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &ParamType {
        &self.ty
    }

    pub fn default_value(&self) -> Option<&AnyArc> {
        self.default.as_ref()
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// The class or interface key, for nominally typed parameters.
    pub fn declared_type(&self) -> Option<&Key> {
        match &self.ty {
            ParamType::Named(key) => Some(key),
            _ => None,
        }
    }
}
