//! Service key types for the dependency injection container.

use std::borrow::Cow;
use std::fmt;

/// Key for binding storage and lookup.
///
/// A key names a class or an interface. Keys derived from Rust types use
/// `std::any::type_name`, so `key_of::<Database>()` and `key_of::<dyn Logger>()`
/// are stable for the lifetime of the program. Free-form keys (`"app.config"`)
/// are also accepted for bindings that do not correspond to a type.
///
/// # Examples
///
/// ```rust
/// use ferrous_autowire::{Key, key_of};
///
/// struct Database;
/// trait Logger {}
///
/// let db = key_of::<Database>();
/// assert!(db.display_name().ends_with("Database"));
///
/// let logger = key_of::<dyn Logger>();
/// assert!(logger.display_name().starts_with("dyn "));
///
/// let custom = Key::from("app.config");
/// assert_eq!(custom.display_name(), "app.config");
/// assert_eq!(custom, Key::new(String::from("app.config")));
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Key(Cow<'static, str>);

impl Key {
    /// Creates a key from any string-like identifier.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Key(name.into())
    }

    /// Creates a key from a static string without allocating.
    #[inline]
    pub const fn from_static(name: &'static str) -> Self {
        Key(Cow::Borrowed(name))
    }

    /// Get the class or interface name for display
    #[inline]
    pub fn display_name(&self) -> &str {
        &self.0
    }

    /// Short name without the module path, used in error messages.
    ///
    /// ```rust
    /// use ferrous_autowire::Key;
    ///
    /// assert_eq!(Key::from("app::db::Database").short_name(), "Database");
    /// assert_eq!(Key::from("dyn app::Logger").short_name(), "dyn Logger");
    /// ```
    pub fn short_name(&self) -> String {
        let name = self.display_name();
        let (prefix, path) = match name.strip_prefix("dyn ") {
            Some(rest) => ("dyn ", rest),
            None => ("", name),
        };
        // Generic arguments may contain `::` themselves
        let head = path.split('<').next().unwrap_or(path);
        let start = head.rfind("::").map(|i| i + 2).unwrap_or(0);
        format!("{}{}", prefix, &path[start..])
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key({})", self.0)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Key {
    fn from(name: &'static str) -> Self {
        Key::from_static(name)
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key(Cow::Owned(name))
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}

// Helper function for creating type keys
#[inline(always)]
pub fn key_of<T: ?Sized + 'static>() -> Key {
    Key::from_static(std::any::type_name::<T>())
}
