//! The autowiring resolver.
//!
//! Given a parameter list and a map of overrides, [`Autowire`] produces the
//! positional arguments for a constructor, method or callable. Each parameter
//! is sourced by the first rule that applies:
//!
//! 1. an override for the parameter's name (bindings inside overrides are
//!    resolved against the container);
//! 2. the parameter's declared default value;
//! 3. untyped or non-nominal parameters fail with `UnresolvedParameter`;
//! 4. built-in parameters fail with `UnresolvedParameter`;
//! 5. a nominal type unknown to both the container and the type registry
//!    fails with `NotFound`;
//! 6. otherwise the container resolves the type. An interface the container
//!    cannot resolve falls back to its declared default implementation.

use crate::bindings::Overrides;
use crate::container::Container;
use crate::error::{DiError, DiResult};
use crate::introspect::{Arguments, ParamType, Parameter};
use crate::key::Key;
use crate::registration::AnyArc;

/// Resolves parameters and constructs classes against a container.
pub struct Autowire<'a> {
    container: &'a Container,
}

impl<'a> Autowire<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Constructs the class registered under `key`.
    ///
    /// Classes without a declared constructor are instantiated with no
    /// arguments and no parameter resolution.
    pub fn class(&self, key: &Key, overrides: &Overrides) -> DiResult<AnyArc> {
        let types = self.container.types();
        let class = match types.class(key) {
            Some(class) => class,
            None if types.is_interface(key) => {
                return Err(DiError::NotFound(format!(
                    "Service {} is an interface and has no binding",
                    key
                )))
            }
            None => return Err(DiError::not_found(key)),
        };

        let args = match class.constructor() {
            Some(params) => self.arguments(key, params, overrides)?,
            None => Arguments::new(),
        };
        class.instantiate(&args)
    }

    /// Resolves `params` in declaration order. Failures are wrapped with the
    /// owner and the parameter they occurred in.
    pub fn arguments(&self, owner: &Key, params: &[Parameter], overrides: &Overrides) -> DiResult<Arguments> {
        let mut args = Arguments::new();
        for param in params {
            let value = self
                .parameter(param, overrides)
                .map_err(|e| e.within(owner, param.name()))?;
            args.push(param.name(), value);
        }
        Ok(args)
    }

    /// Resolves a single parameter, consulting `overrides` first.
    pub fn parameter(&self, param: &Parameter, overrides: &Overrides) -> DiResult<AnyArc> {
        match overrides.get(param.name()) {
            Some(value) => value.resolve(self.container),
            None => self.argument(param),
        }
    }

    /// Resolves a parameter without overrides.
    pub fn argument(&self, param: &Parameter) -> DiResult<AnyArc> {
        // An optional parameter is never forced through autowiring
        if let Some(default) = param.default_value() {
            return Ok(default.clone());
        }

        match param.ty() {
            ParamType::Untyped => Err(DiError::unresolved(
                param.name(),
                "no declared type and no default value",
            )),
            ParamType::Anonymous(description) => Err(DiError::unresolved(
                param.name(),
                format!("`{}` is not a nominal type", description),
            )),
            ParamType::Builtin(name) => Err(DiError::unresolved(
                param.name(),
                format!("built-in type `{}` cannot be autowired", name),
            )),
            ParamType::Named(key) => self.named(key),
        }
    }

    fn named(&self, key: &Key) -> DiResult<AnyArc> {
        if !self.container.has(key) {
            return Err(DiError::not_found(key));
        }

        match self.container.get(key) {
            Ok(value) => Ok(value),
            Err(err @ DiError::NotFound(_)) if self.container.types().is_interface(key) => {
                let implementation = match self.container.types().default_implementation(key) {
                    Some(declaration) => declaration.implementation().clone(),
                    None => return Err(err),
                };
                let value = self.container.get(&implementation)?;
                self.container.coerce(key, value)
            }
            Err(err) => Err(err),
        }
    }
}
