//! Container configuration.
//!
//! Settings can be built in code, read from environment variables, or, with the
//! `config` feature, deserialized from JSON.

use std::env;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "config")]
use crate::{DiError, DiResult};

/// Default maximum resolution depth.
///
/// Each nested resolution costs around ten stack frames in a debug build; the
/// default keeps a runaway cycle well inside a 2 MiB thread stack.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Environment variable prefix read by [`ContainerConfig::from_env`].
pub const ENV_PREFIX: &str = "FERROUS_AUTOWIRE";

/// Runtime settings for a [`Container`](crate::Container).
///
/// # Examples
///
/// ```
/// use ferrous_autowire::ContainerConfig;
///
/// let config = ContainerConfig::default();
/// assert_eq!(config.max_depth, 128);
/// assert!(config.detect_cycles);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ContainerConfig {
    /// Maximum number of nested resolutions before failing with
    /// [`DiError::DepthExceeded`](crate::DiError::DepthExceeded).
    pub max_depth: usize,
    /// Fail with [`DiError::Circular`](crate::DiError::Circular) when a key is
    /// requested again while it is still being resolved. When disabled, a
    /// cycle runs until `max_depth` is hit.
    pub detect_cycles: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            detect_cycles: true,
        }
    }
}

impl ContainerConfig {
    /// Loads settings from `FERROUS_AUTOWIRE_MAX_DEPTH` and
    /// `FERROUS_AUTOWIRE_DETECT_CYCLES`, keeping defaults for anything unset
    /// or unparsable.
    pub fn from_env() -> Self {
        Self::load(&EnvironmentConfigSource::with_prefix(ENV_PREFIX))
    }

    /// Load configuration from a config source
    pub fn load(source: &dyn ConfigSource) -> Self {
        let defaults = Self::default();
        Self {
            max_depth: source
                .get("max_depth")
                .and_then(|v| v.parse::<usize>().ok())
                .unwrap_or(defaults.max_depth),
            detect_cycles: source
                .get("detect_cycles")
                .and_then(|v| parse_bool(&v))
                .unwrap_or(defaults.detect_cycles),
        }
    }

    /// Parses a JSON document; missing fields keep their defaults.
    ///
    /// ```
    /// # #[cfg(feature = "config")] {
    /// use ferrous_autowire::ContainerConfig;
    ///
    /// let config = ContainerConfig::from_json(r#"{ "max_depth": 64 }"#).unwrap();
    /// assert_eq!(config.max_depth, 64);
    /// assert!(config.detect_cycles);
    /// # }
    /// ```
    #[cfg(feature = "config")]
    pub fn from_json(json: &str) -> DiResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| DiError::Config(format!("invalid container config: {}", e)))
    }

    /// Serializes the settings to JSON.
    #[cfg(feature = "config")]
    pub fn to_json(&self) -> DiResult<String> {
        serde_json::to_string(self)
            .map_err(|e| DiError::Config(format!("cannot serialize container config: {}", e)))
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Trait for configuration sources
pub trait ConfigSource: Send + Sync + std::fmt::Debug {
    /// Get a raw configuration value by key
    fn get(&self, key: &str) -> Option<String>;
}

/// Environment variable configuration source
#[derive(Debug, Default)]
pub struct EnvironmentConfigSource {
    /// Prefix to filter environment variables
    prefix: Option<String>,
}

impl EnvironmentConfigSource {
    pub fn new() -> Self {
        Self { prefix: None }
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self { prefix: Some(prefix.into()) }
    }
}

impl ConfigSource for EnvironmentConfigSource {
    fn get(&self, key: &str) -> Option<String> {
        let env_key = if let Some(prefix) = &self.prefix {
            format!("{}_{}", prefix.to_uppercase(), key.to_uppercase())
        } else {
            key.to_uppercase()
        };
        env::var(env_key).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    #[derive(Debug)]
    struct MapSource(HashMap<&'static str, &'static str>);

    impl ConfigSource for MapSource {
        fn get(&self, key: &str) -> Option<String> {
            self.0.get(key).map(|v| v.to_string())
        }
    }

    #[test]
    fn load_reads_known_keys() {
        let source = MapSource(HashMap::from([("max_depth", "32"), ("detect_cycles", "off")]));
        let config = ContainerConfig::load(&source);
        assert_eq!(config.max_depth, 32);
        assert!(!config.detect_cycles);
    }

    #[test]
    fn load_keeps_defaults_for_garbage() {
        let source = MapSource(HashMap::from([("max_depth", "many"), ("detect_cycles", "maybe")]));
        assert_eq!(ContainerConfig::load(&source), ContainerConfig::default());
    }

    #[test]
    #[serial]
    fn from_env_uses_prefix() {
        env::set_var("FERROUS_AUTOWIRE_MAX_DEPTH", "77");
        env::set_var("FERROUS_AUTOWIRE_DETECT_CYCLES", "false");

        let config = ContainerConfig::from_env();
        assert_eq!(config.max_depth, 77);
        assert!(!config.detect_cycles);

        env::remove_var("FERROUS_AUTOWIRE_MAX_DEPTH");
        env::remove_var("FERROUS_AUTOWIRE_DETECT_CYCLES");
    }

    #[test]
    #[serial]
    fn from_env_without_variables_is_default() {
        env::remove_var("FERROUS_AUTOWIRE_MAX_DEPTH");
        env::remove_var("FERROUS_AUTOWIRE_DETECT_CYCLES");
        assert_eq!(ContainerConfig::from_env(), ContainerConfig::default());
    }

    #[cfg(feature = "config")]
    #[test]
    fn json_round_trip() {
        let config = ContainerConfig { max_depth: 8, detect_cycles: false };
        let json = config.to_json().unwrap();
        assert_eq!(ContainerConfig::from_json(&json).unwrap(), config);
    }

    #[cfg(feature = "config")]
    #[test]
    fn invalid_json_is_a_config_error() {
        let err = ContainerConfig::from_json("[1, 2]").unwrap_err();
        assert!(matches!(err, crate::DiError::Config(_)));
        assert!(err.to_string().starts_with("Configuration error: invalid container config"));
    }
}
