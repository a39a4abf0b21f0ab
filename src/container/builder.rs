use std::sync::Arc;

use super::Container;
use crate::config::ContainerConfig;
use crate::introspect::TypeIntrospector;
use crate::observer::{DiObserver, Observers};

/// Builder for [`Container`] with observers, configuration and an optional
/// parent.
///
/// # Examples
///
/// ```
/// use ferrous_autowire::{Container, ContainerConfig, LoggingObserver, TypeRegistry};
/// use std::sync::Arc;
///
/// let root = Container::new(TypeRegistry::new());
/// let child = Container::builder(TypeRegistry::new())
///     .config(ContainerConfig { max_depth: 64, ..Default::default() })
///     .observer(Arc::new(LoggingObserver::new()))
///     .parent(&root)
///     .build();
///
/// assert!(child.parent().unwrap().ptr_eq(&root));
/// assert_eq!(child.config().max_depth, 64);
/// ```
pub struct ContainerBuilder {
    types: Arc<dyn TypeIntrospector>,
    parent: Option<Container>,
    config: ContainerConfig,
    observers: Observers,
}

impl ContainerBuilder {
    pub fn new<T: TypeIntrospector + 'static>(types: T) -> Self {
        Self::from_shared(Arc::new(types))
    }

    /// Starts from type metadata that is already shared, e.g. with another
    /// container.
    pub fn from_shared(types: Arc<dyn TypeIntrospector>) -> Self {
        Self {
            types,
            parent: None,
            config: ContainerConfig::default(),
            observers: Observers::new(),
        }
    }

    /// Sets the prototype container consulted for keys this one lacks.
    pub fn parent(mut self, parent: &Container) -> Self {
        self.parent = Some(parent.clone());
        self
    }

    pub fn config(mut self, config: ContainerConfig) -> Self {
        self.config = config;
        self
    }

    /// Adds an observer notified on every [`Container::get`].
    pub fn observer(mut self, observer: Arc<dyn DiObserver>) -> Self {
        self.observers.add(observer);
        self
    }

    pub(crate) fn observers(mut self, observers: Observers) -> Self {
        self.observers = observers;
        self
    }

    pub fn build(self) -> Container {
        Container::from_parts(self.types, self.parent, self.config, self.observers)
    }
}
