//! Error types for the openGauss dialect.

use std::sync::LazyLock;

use regex::Regex;

/// Errors that can occur while setting up or using an openGauss session.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The connection string could not be parsed. `dsn` has its password
    /// redacted.
    #[error("Invalid connection string '{dsn}': {source}")]
    InvalidDsn {
        /// The offending connection string, password redacted.
        dsn: String,
        /// The driver's parse error.
        source: sqlx::Error,
    },

    /// The configured driver name is not one this dialect can talk to.
    #[error("Unsupported driver '{0}', expected opengauss, postgres or postgresql")]
    UnsupportedDriver(String),

    /// Neither a connection string nor an existing pool was configured.
    #[error("No connection string configured (set OPENGAUSS_DSN or DATABASE_URL)")]
    MissingDsn,

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Invalid configuration file or value.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn invalid_dsn(dsn: &str, source: sqlx::Error) -> Self {
        Self::InvalidDsn {
            dsn: redact_dsn(dsn),
            source,
        }
    }
}

/// Result type for openGauss operations.
pub type Result<T> = std::result::Result<T, Error>;

static URL_PASSWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(://[^:/@]*:)[^@/]*@").expect("Invalid URL password regex"));

static KEYWORD_PASSWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(password=)[^\s&]*").expect("Invalid keyword password regex")
});

/// Replaces the password in a URL or keyword/value connection string with
/// `***`.
#[must_use]
pub fn redact_dsn(dsn: &str) -> String {
    let dsn = URL_PASSWORD.replace(dsn, "${1}***@");
    KEYWORD_PASSWORD.replace_all(&dsn, "${1}***").into_owned()
}
