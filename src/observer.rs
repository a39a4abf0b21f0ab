//! Diagnostic observers for resolution traceability.
//!
//! Observers are the container's logging hook: every call to
//! [`Container::get`](crate::Container::get) notifies them when resolution
//! starts, finishes, or fails.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::{DiError, DiResult};
use crate::key::Key;

/// Observer trait for dependency injection resolution events.
///
/// Observer calls are made synchronously during resolution. Keep
/// implementations lightweight.
///
/// # Examples
///
/// ```
/// use ferrous_autowire::{Container, DiError, DiObserver, Key, TypeRegistry};
/// use std::sync::{Arc, Mutex};
/// use std::time::Duration;
///
/// #[derive(Default)]
/// struct Recorder(Mutex<Vec<String>>);
///
/// impl DiObserver for Recorder {
///     fn resolving(&self, key: &Key) {
///         self.0.lock().unwrap().push(format!("start {}", key.short_name()));
///     }
///
///     fn resolved(&self, key: &Key, _duration: Duration) {
///         self.0.lock().unwrap().push(format!("done {}", key.short_name()));
///     }
///
///     fn failed(&self, key: &Key, _error: &DiError) {
///         self.0.lock().unwrap().push(format!("fail {}", key.short_name()));
///     }
/// }
///
/// let recorder = Arc::new(Recorder::default());
/// let container = Container::builder(TypeRegistry::new())
///     .observer(recorder.clone())
///     .build();
///
/// assert!(container.get(&Key::from("Missing")).is_err());
/// assert_eq!(*recorder.0.lock().unwrap(), vec!["start Missing", "fail Missing"]);
/// ```
pub trait DiObserver: Send + Sync {
    /// Called when starting to resolve a key.
    fn resolving(&self, key: &Key);

    /// Called when a key was resolved successfully.
    ///
    /// `duration` covers the whole subtree, nested resolutions included.
    fn resolved(&self, key: &Key, duration: Duration);

    /// Called when resolving a key failed. The error still propagates.
    fn failed(&self, _key: &Key, _error: &DiError) {}
}

/// Container for registered observers.
///
/// Designed to have minimal overhead when no observers are registered.
#[derive(Default, Clone)]
pub(crate) struct Observers {
    observers: Vec<Arc<dyn DiObserver>>,
}

impl Observers {
    pub(crate) fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    pub(crate) fn add(&mut self, observer: Arc<dyn DiObserver>) {
        self.observers.push(observer);
    }

    #[inline]
    pub(crate) fn has_observers(&self) -> bool {
        !self.observers.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.observers.len()
    }

    /// Notifies all observers that resolution is starting; returns the start
    /// time when anyone is listening.
    #[inline]
    pub(crate) fn resolving(&self, key: &Key) -> Option<Instant> {
        if !self.has_observers() {
            return None;
        }
        for observer in &self.observers {
            observer.resolving(key);
        }
        Some(Instant::now())
    }

    /// Notifies all observers of the outcome of a resolution started with
    /// [`resolving`](Self::resolving).
    #[inline]
    pub(crate) fn finish<T>(&self, key: &Key, started: Option<Instant>, result: &DiResult<T>) {
        let Some(started) = started else {
            return;
        };
        match result {
            Ok(_) => {
                let duration = started.elapsed();
                for observer in &self.observers {
                    observer.resolved(key, duration);
                }
            }
            Err(error) => {
                for observer in &self.observers {
                    observer.failed(key, error);
                }
            }
        }
    }
}

/// Built-in observer that logs events to stdout.
///
/// Useful for development and debugging. For production use, consider
/// [`TracingObserver`] (feature `tracing`) or a custom observer.
///
/// # Examples
///
/// ```
/// use ferrous_autowire::{Container, LoggingObserver, TypeRegistry};
/// use std::sync::Arc;
///
/// let container = Container::builder(TypeRegistry::new())
///     .observer(Arc::new(LoggingObserver::new()))
///     .build();
/// ```
pub struct LoggingObserver {
    prefix: String,
}

impl LoggingObserver {
    /// Creates a new logging observer with default prefix.
    pub fn new() -> Self {
        Self {
            prefix: "[ferrous-autowire]".to_string(),
        }
    }

    /// Creates a new logging observer with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl DiObserver for LoggingObserver {
    fn resolving(&self, key: &Key) {
        println!("{} Resolving: {}", self.prefix, key.display_name());
    }

    fn resolved(&self, key: &Key, duration: Duration) {
        println!("{} Resolved: {} in {:?}", self.prefix, key.display_name(), duration);
    }

    fn failed(&self, key: &Key, error: &DiError) {
        eprintln!("{} FAILED {}: {}", self.prefix, key.display_name(), error);
    }
}

/// Observer emitting `tracing` events under the `ferrous_autowire` target.
#[cfg(feature = "tracing")]
#[derive(Debug, Default)]
pub struct TracingObserver;

#[cfg(feature = "tracing")]
impl TracingObserver {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(feature = "tracing")]
impl DiObserver for TracingObserver {
    fn resolving(&self, key: &Key) {
        tracing::trace!(target: "ferrous_autowire", key = key.display_name(), "resolving");
    }

    fn resolved(&self, key: &Key, duration: Duration) {
        tracing::debug!(
            target: "ferrous_autowire",
            key = key.display_name(),
            elapsed_us = duration.as_micros() as u64,
            "resolved"
        );
    }

    fn failed(&self, key: &Key, error: &DiError) {
        tracing::warn!(target: "ferrous_autowire", key = key.display_name(), %error, "resolution failed");
    }
}
