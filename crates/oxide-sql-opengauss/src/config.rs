//! Dialect configuration.

use serde::Deserialize;
use sqlx::PgPool;

use crate::error::{Error, Result};

/// Environment variable read first by [`Config::from_env`].
pub const DSN_ENV: &str = "OPENGAUSS_DSN";

/// Environment variable read when [`DSN_ENV`] is unset.
pub const FALLBACK_DSN_ENV: &str = "DATABASE_URL";

/// Driver name used when none is configured.
pub const DEFAULT_DRIVER: &str = "opengauss";

/// Settings of an openGauss dialect.
///
/// Everything but `conn` can be read from JSON:
///
/// ```json
/// { "dsn": "postgres://gauss@localhost/app", "without_returning": true }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Driver to connect through. Defaults to [`DEFAULT_DRIVER`].
    pub driver_name: Option<String>,
    /// Connection string, as a URL or keyword/value pairs.
    pub dsn: String,
    /// Send statements without preparing them first.
    pub prefer_simple_protocol: bool,
    /// Never render `RETURNING`.
    pub without_returning: bool,
    /// An already open pool. When set, `dsn` is ignored.
    #[serde(skip)]
    pub conn: Option<PgPool>,
}

impl Config {
    /// Creates a configuration for `dsn`.
    #[must_use]
    pub fn new(dsn: impl Into<String>) -> Self {
        Self {
            dsn: dsn.into(),
            ..Self::default()
        }
    }

    /// Creates a configuration that reuses `pool`.
    #[must_use]
    pub fn with_pool(pool: PgPool) -> Self {
        Self {
            conn: Some(pool),
            ..Self::default()
        }
    }

    /// Reads the connection string from `OPENGAUSS_DSN`, then
    /// `DATABASE_URL`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingDsn`] if neither variable is set.
    pub fn from_env() -> Result<Self> {
        std::env::var(DSN_ENV)
            .or_else(|_| std::env::var(FALLBACK_DSN_ENV))
            .map(Self::new)
            .map_err(|_| Error::MissingDsn)
    }

    /// Parses a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the document is malformed or has unknown
    /// keys.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    /// Sets the driver name.
    #[must_use]
    pub fn driver_name(mut self, name: impl Into<String>) -> Self {
        self.driver_name = Some(name.into());
        self
    }

    /// Sends statements without preparing them.
    #[must_use]
    pub fn prefer_simple_protocol(mut self, enabled: bool) -> Self {
        self.prefer_simple_protocol = enabled;
        self
    }

    /// Disables `RETURNING`.
    #[must_use]
    pub fn without_returning(mut self, enabled: bool) -> Self {
        self.without_returning = enabled;
        self
    }

    /// Returns the configured driver name or the default one.
    #[must_use]
    pub fn driver(&self) -> &str {
        self.driver_name.as_deref().unwrap_or(DEFAULT_DRIVER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new("postgres://localhost/app");
        assert_eq!(config.driver(), "opengauss");
        assert!(!config.prefer_simple_protocol);
        assert!(!config.without_returning);
        assert!(config.conn.is_none());
    }

    #[test]
    fn test_builder() {
        let config = Config::new("postgres://localhost/app")
            .driver_name("postgres")
            .prefer_simple_protocol(true)
            .without_returning(true);
        assert_eq!(config.driver(), "postgres");
        assert!(config.prefer_simple_protocol);
        assert!(config.without_returning);
    }

    #[test]
    fn test_from_json() {
        let config = Config::from_json(
            r#"{"dsn": "postgres://localhost/app", "prefer_simple_protocol": true}"#,
        )
        .unwrap();
        assert_eq!(config.dsn, "postgres://localhost/app");
        assert!(config.prefer_simple_protocol);
        assert!(config.driver_name.is_none());
    }

    #[test]
    fn test_from_json_rejects_unknown_keys() {
        let err = Config::from_json(r#"{"dsn": "x", "pool_size": 4}"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
