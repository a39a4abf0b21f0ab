use std::sync::Arc;

use super::{Binding, BindingKind, Override, Overrides};
use crate::autowire::Autowire;
use crate::container::Container;
use crate::error::{DiError, DiResult};
use crate::internal::sync::{lock, Mutex};
use crate::introspect::TypeIntrospector;
use crate::key::Key;
use crate::registration::AnyArc;

/// A class together with an incomplete set of constructor arguments.
///
/// It's called partial because the arguments it holds are not enough to build
/// the class; the container supplies the missing pieces through autowiring
/// every time the partial is resolved. The override map stays mutable: use
/// [`with`](Self::with) to seed a parameter by name and
/// [`needs`](Self::needs) to seed it by dependency type.
///
/// ```
/// use ferrous_autowire::{Class, Container, Override, Parameter, Resolver, TypeRegistry, key_of};
///
/// struct Mailer { host: String }
///
/// let mut types = TypeRegistry::new();
/// types.register(
///     Class::new(|args| Ok(Mailer { host: args.cloned::<String>("host")? }))
///         .param(Parameter::builtin::<String>("host")),
/// );
///
/// let container = Container::new(types);
/// container
///     .service(key_of::<Mailer>())
///     .unwrap()
///     .with("host", Override::value(String::from("smtp.local")));
///
/// assert_eq!(container.resolve::<Mailer>().unwrap().host, "smtp.local");
/// ```
pub struct Partial {
    class: Key,
    types: Arc<dyn TypeIntrospector>,
    overrides: Mutex<Overrides>,
}

impl Partial {
    pub fn new(types: Arc<dyn TypeIntrospector>, class: impl Into<Key>, overrides: Overrides) -> Self {
        Self {
            class: class.into(),
            types,
            overrides: Mutex::new(overrides),
        }
    }

    pub fn class(&self) -> &Key {
        &self.class
    }

    /// Sets the value for the constructor parameter called `name`.
    pub fn with(&self, name: impl Into<String>, value: impl Into<Override>) -> &Self {
        lock(&self.overrides).insert(name, value);
        self
    }

    /// Sets the value for the constructor parameter declared with type
    /// `dependency`. A key that names no known type is taken as a parameter
    /// name, like [`with`](Self::with).
    pub fn needs(&self, dependency: &Key, value: impl Into<Override>) -> DiResult<&Self> {
        if !self.types.exists(dependency) {
            return Ok(self.with(dependency.display_name().to_string(), value));
        }

        let class = self
            .types
            .class(&self.class)
            .ok_or_else(|| DiError::not_found(&self.class))?;

        let names: Vec<String> = class
            .parameters_of_type(dependency)
            .map(|p| p.name().to_string())
            .collect();

        if names.is_empty() {
            return Err(DiError::NotFound(format!(
                "Class {} does not depend on {}",
                self.class, dependency
            )));
        }

        let value = value.into();
        let mut overrides = lock(&self.overrides);
        for name in names {
            overrides.insert(name, value.clone());
        }
        Ok(self)
    }

    /// Snapshot of the current overrides.
    pub fn overrides(&self) -> Overrides {
        lock(&self.overrides).clone()
    }
}

impl Binding for Partial {
    fn produce(&self, container: &Container) -> DiResult<AnyArc> {
        // Snapshot so the lock is released before recursing into the container
        let overrides = self.overrides();
        Autowire::new(container).class(&self.class, &overrides)
    }

    fn kind(&self) -> BindingKind {
        BindingKind::Partial
    }

    fn as_partial(self: Arc<Self>) -> Option<Arc<Partial>> {
        Some(self)
    }
}

impl std::fmt::Debug for Partial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Partial")
            .field("class", &self.class)
            .field("overrides", &lock(&self.overrides).names().collect::<Vec<_>>())
            .finish()
    }
}
