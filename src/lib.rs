//! # ferrous-autowire
//!
//! Autowiring dependency injection for Rust: the container constructs objects
//! by reading their declared constructor parameters and resolving each one.
//!
//! ## Features
//!
//! - **Autowiring**: typed constructor parameters are resolved recursively,
//!   without registering every class up front
//! - **Bindings**: singletons, factories, partials (classes with preset
//!   arguments) and lazy references
//! - **Overrides**: per-parameter values when assembling or calling
//! - **Prototypes**: child containers that fall back to a parent's bindings
//! - **Default implementations**: interfaces that resolve to a declared
//!   implementation when nothing is bound
//! - **Circular dependency detection**: fails with the offending key path
//!
//! Rust has no runtime reflection, so class and parameter metadata comes from
//! a [`TypeIntrospector`]; [`TypeRegistry`] is the shipped one.
//!
//! ## Quick Start
//!
//! ```rust
//! use ferrous_autowire::{Class, Container, Parameter, Resolver, TypeRegistry};
//! use std::sync::Arc;
//!
//! struct Database {
//!     url: String,
//! }
//!
//! struct UserService {
//!     db: Arc<Database>,
//! }
//!
//! let mut types = TypeRegistry::new();
//! types.register(
//!     Class::new(|args| Ok(UserService { db: args.get::<Database>("db")? }))
//!         .param(Parameter::typed::<Database>("db")),
//! );
//!
//! let container = Container::new(types);
//! container.set_instance(Database { url: "postgres://localhost".to_string() });
//!
//! let users = container.resolve_required::<UserService>();
//! assert_eq!(users.db.url, "postgres://localhost");
//! ```
//!
//! ## Resolution order
//!
//! For each parameter: an override for its name, then its default value, then
//! the container. Untyped and built-in parameters without either are errors.
//! See [`autowire`] for the full policy.
//!
//! ## Overrides and partials
//!
//! ```rust
//! use ferrous_autowire::{Class, Container, Override, Overrides, Parameter, TypeRegistry, key_of};
//!
//! struct Mailer {
//!     host: String,
//!     port: u16,
//! }
//!
//! let mut types = TypeRegistry::new();
//! types.register(
//!     Class::new(|args| Ok(Mailer { host: args.cloned("host")?, port: args.cloned("port")? }))
//!         .param(Parameter::builtin::<String>("host"))
//!         .param(Parameter::builtin::<u16>("port").with_default(25u16)),
//! );
//!
//! let container = Container::new(types);
//! let mailer = container
//!     .assemble_as::<Mailer>(Overrides::new().with("host", Override::value(String::from("smtp.local"))))
//!     .unwrap();
//! assert_eq!((mailer.host.as_str(), mailer.port), ("smtp.local", 25));
//!
//! // Without an override the built-in `host` cannot be autowired
//! assert!(container.get(&key_of::<Mailer>()).is_err());
//! ```

// Module declarations
pub mod autowire;
pub mod bindings;
pub mod config;
pub mod container;
pub mod default_implementation;
pub mod descriptors;
pub mod error;
pub mod introspect;
pub mod key;
pub mod observer;
pub mod traits;

// Internal modules
mod internal;
mod registration;

// Re-export core types
pub use autowire::Autowire;
pub use bindings::{Binding, BindingKind, Factory, Override, Overrides, Partial, Reference, Service, Singleton};
pub use config::{ConfigSource, ContainerConfig, EnvironmentConfigSource};
pub use container::{Container, ContainerBuilder};
pub use default_implementation::{DefaultImplementation, DefaultImplementations};
pub use descriptors::BindingDescriptor;
pub use error::{DiError, DiResult};
pub use introspect::{
    Arguments, Callable, Class, Interface, InterfaceDescriptor, Method, ParamType, Parameter, TypeIntrospector,
    TypeRegistry,
};
pub use key::{key_of, Key};
pub use observer::{DiObserver, LoggingObserver};
pub use registration::{downcast, downcast_trait, AnyArc};
pub use traits::{Resolver, ResolverCore};

#[cfg(feature = "tracing")]
pub use observer::TracingObserver;
