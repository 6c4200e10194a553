//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services.
//! Nothing in this crate reads environment variables during request handling, which keeps
//! behaviour consistent across multi-threaded runtimes and test harnesses.

use std::time::Duration;

pub const DEFAULT_STORE_URI: &str = "mongodb://localhost:27017";
pub const DEFAULT_DATABASE: &str = "docsys";
pub const DEFAULT_COLLECTION: &str = "prescriptions";
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(5);

/// Errors raised while resolving startup configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} cannot be empty")]
    Empty(&'static str),
    #[error("invalid store timeout value: {0:?} (expected whole seconds > 0)")]
    InvalidTimeout(String),
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    store_uri: String,
    database: String,
    collection: String,
    store_timeout: Duration,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    pub fn new(
        store_uri: String,
        database: String,
        collection: String,
        store_timeout: Duration,
    ) -> Result<Self, ConfigError> {
        if store_uri.trim().is_empty() {
            return Err(ConfigError::Empty("store URI"));
        }
        if database.trim().is_empty() {
            return Err(ConfigError::Empty("database name"));
        }
        if collection.trim().is_empty() {
            return Err(ConfigError::Empty("collection name"));
        }

        Ok(Self {
            store_uri,
            database,
            collection,
            store_timeout,
        })
    }

    /// Resolve a configuration entirely from optional environment values, applying defaults.
    pub fn from_env_values(
        store_uri: Option<String>,
        database: Option<String>,
        collection: Option<String>,
        store_timeout: Option<String>,
    ) -> Result<Self, ConfigError> {
        Self::new(
            store_uri.unwrap_or_else(|| DEFAULT_STORE_URI.into()),
            database.unwrap_or_else(|| DEFAULT_DATABASE.into()),
            collection.unwrap_or_else(|| DEFAULT_COLLECTION.into()),
            store_timeout_from_env_value(store_timeout)?,
        )
    }

    pub fn store_uri(&self) -> &str {
        &self.store_uri
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn store_timeout(&self) -> Duration {
        self.store_timeout
    }
}

/// Parse the store-call timeout from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_STORE_TIMEOUT`].
pub fn store_timeout_from_env_value(value: Option<String>) -> Result<Duration, ConfigError> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        None => Ok(DEFAULT_STORE_TIMEOUT),
        Some(raw) => match raw.parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
            _ => Err(ConfigError::InvalidTimeout(raw)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_env_values_absent() {
        let cfg = CoreConfig::from_env_values(None, None, None, None).unwrap();
        assert_eq!(cfg.store_uri(), DEFAULT_STORE_URI);
        assert_eq!(cfg.database(), DEFAULT_DATABASE);
        assert_eq!(cfg.collection(), DEFAULT_COLLECTION);
        assert_eq!(cfg.store_timeout(), DEFAULT_STORE_TIMEOUT);
    }

    #[test]
    fn empty_database_name_is_rejected() {
        let result = CoreConfig::new(
            DEFAULT_STORE_URI.into(),
            "  ".into(),
            DEFAULT_COLLECTION.into(),
            DEFAULT_STORE_TIMEOUT,
        );
        assert!(result.is_err());
    }

    #[test]
    fn timeout_parses_whole_seconds() {
        let timeout = store_timeout_from_env_value(Some("30".into())).unwrap();
        assert_eq!(timeout, Duration::from_secs(30));
    }

    #[test]
    fn blank_timeout_falls_back_to_default() {
        let timeout = store_timeout_from_env_value(Some("  ".into())).unwrap();
        assert_eq!(timeout, DEFAULT_STORE_TIMEOUT);
    }

    #[test]
    fn zero_or_garbage_timeout_is_rejected() {
        assert!(store_timeout_from_env_value(Some("0".into())).is_err());
        assert!(store_timeout_from_env_value(Some("fast".into())).is_err());
    }
}
