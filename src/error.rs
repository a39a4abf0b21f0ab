//! Error types for the dependency injection container.

use std::fmt;

/// Dependency injection errors
///
/// Represents the error conditions that can occur while resolving services,
/// constructing classes or invoking callables through the container.
///
/// Nested failures are wrapped in [`DiError::Dependency`] at every level of
/// the object graph, so a failure deep in the graph reports the whole chain
/// from the requested service down to the parameter that could not be
/// satisfied. Use [`DiError::root_cause`] to get the leaf error.
///
/// # Examples
///
/// ```rust
/// use ferrous_autowire::{DiError, Key};
///
/// let leaf = DiError::NotFound("Service Mailer was not found".to_string());
/// let err = DiError::Dependency {
///     service: Key::from("app::Notifier"),
///     parameter: "mailer".to_string(),
///     source: Box::new(leaf),
/// };
///
/// assert!(err.is_not_found());
/// assert_eq!(
///     err.to_string(),
///     "Service app::Notifier has missing dependency `mailer`: Service Mailer was not found"
/// );
/// ```
#[derive(Debug, Clone)]
pub enum DiError {
    /// No binding and no class or interface for the requested key
    NotFound(String),
    /// A parameter has no usable type, no override and no default value
    UnresolvedParameter {
        /// Name of the parameter
        parameter: String,
        /// Why the parameter could not be autowired
        reason: String,
    },
    /// A dependency of `service` failed to resolve
    Dependency {
        /// The service being constructed
        service: crate::Key,
        /// The parameter whose value could not be produced
        parameter: String,
        /// The underlying failure
        source: Box<DiError>,
    },
    /// Downcast of a resolved value failed
    TypeMismatch(String),
    /// Circular dependency detected (includes path)
    Circular(Vec<String>),
    /// Maximum recursion depth exceeded
    DepthExceeded(usize),
    /// Container configuration could not be parsed or written
    Config(String),
}

impl DiError {
    /// Walks the `Dependency` chain and returns the innermost error.
    pub fn root_cause(&self) -> &DiError {
        let mut current = self;
        while let DiError::Dependency { source, .. } = current {
            current = source;
        }
        current
    }

    /// True when the root cause is a missing service.
    pub fn is_not_found(&self) -> bool {
        matches!(self.root_cause(), DiError::NotFound(_))
    }

    /// True when the root cause is an unresolvable parameter.
    pub fn is_unresolved(&self) -> bool {
        matches!(self.root_cause(), DiError::UnresolvedParameter { .. })
    }

    /// True when the root cause is a dependency cycle.
    pub fn is_circular(&self) -> bool {
        matches!(self.root_cause(), DiError::Circular(_))
    }

    pub(crate) fn not_found(key: &crate::Key) -> Self {
        DiError::NotFound(format!("Service {} was not found", key))
    }

    pub(crate) fn unresolved(parameter: &str, reason: impl Into<String>) -> Self {
        DiError::UnresolvedParameter {
            parameter: parameter.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn within(self, service: &crate::Key, parameter: &str) -> Self {
        DiError::Dependency {
            service: service.clone(),
            parameter: parameter.to_string(),
            source: Box::new(self),
        }
    }
}

impl fmt::Display for DiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiError::NotFound(msg) => f.write_str(msg),
            DiError::UnresolvedParameter { parameter, reason } => {
                write!(f, "Cannot resolve parameter `{}`: {}", parameter, reason)
            }
            DiError::Dependency { service, parameter, source } => {
                write!(f, "Service {} has missing dependency `{}`: {}", service, parameter, source)
            }
            DiError::TypeMismatch(name) => write!(f, "Type mismatch for: {}", name),
            DiError::Circular(path) => {
                write!(f, "Circular dependency: {}", path.join(" -> "))
            }
            DiError::DepthExceeded(depth) => write!(f, "Max depth {} exceeded", depth),
            DiError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for DiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DiError::Dependency { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Result type for DI operations
pub type DiResult<T> = Result<T, DiError>;
