//! Keyword/value connection strings.
//!
//! Besides URLs, openGauss clients accept libpq-style strings such as
//! `host=localhost port=5432 user=gauss dbname=app sslmode=disable`.
//! Values may be single-quoted, with `\'` and `\\` escapes inside.

use std::sync::LazyLock;

use regex::Regex;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use tracing::debug;

static KEYWORD_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\w+)\s*=\s*('(?:[^'\\]|\\.)*'|\S*)").expect("Invalid keyword pair regex")
});

/// Returns whether `dsn` is a URL rather than keyword/value pairs.
#[must_use]
pub fn is_url(dsn: &str) -> bool {
    dsn.contains("://")
}

fn configuration_error(message: String) -> sqlx::Error {
    sqlx::Error::Configuration(message.into())
}

/// Strips the quotes of a single-quoted value and resolves its escapes.
fn unquote(raw: &str) -> String {
    let Some(inner) = raw.strip_prefix('\'').and_then(|r| r.strip_suffix('\'')) else {
        return raw.to_string();
    };
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.extend(chars.next()),
            c => out.push(c),
        }
    }
    out
}

/// Applies an `options` value made of `-c key=value` settings.
fn apply_options(options: PgConnectOptions, value: &str) -> Result<PgConnectOptions, sqlx::Error> {
    let mut settings = Vec::new();
    let mut tokens = value.split_whitespace();
    while let Some(token) = tokens.next() {
        let setting = match token.strip_prefix("-c") {
            Some("") => tokens.next(),
            Some(inline) => Some(inline),
            None => None,
        };
        let (key, val) = setting
            .and_then(|s| s.split_once('='))
            .ok_or_else(|| configuration_error(format!("unsupported options entry {token:?}")))?;
        settings.push((key.to_string(), val.to_string()));
    }
    Ok(options.options(settings))
}

/// Parses a keyword/value connection string into connection options.
///
/// `time_zone` and `TimeZone` are left to the caller; other unknown
/// keywords are ignored.
///
/// # Errors
///
/// Returns [`sqlx::Error::Configuration`] for text that is not a
/// `key=value` pair, a port that is not a number, or an unknown `sslmode`.
pub fn keyword_options(dsn: &str) -> Result<PgConnectOptions, sqlx::Error> {
    let mut options = PgConnectOptions::new_without_pgpass();
    let mut cursor = 0;

    for caps in KEYWORD_PAIR.captures_iter(dsn) {
        let (Some(pair), Some(key), Some(raw)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };
        let stray = dsn[cursor..pair.start()].trim();
        if !stray.is_empty() {
            return Err(configuration_error(format!("unexpected text {stray:?}")));
        }
        cursor = pair.end();

        let value = unquote(raw.as_str());
        options = match key.as_str() {
            "host" => options.host(&value),
            "port" => options.port(value.parse::<u16>().map_err(|e| {
                configuration_error(format!("invalid port {value:?}: {e}"))
            })?),
            "user" => options.username(&value),
            "password" => options.password(&value),
            "dbname" => options.database(&value),
            "sslmode" => options.ssl_mode(value.parse::<PgSslMode>()?),
            "application_name" => options.application_name(&value),
            "options" => apply_options(options, &value)?,
            "time_zone" | "TimeZone" => options,
            other => {
                debug!(keyword = %other, "Ignoring unrecognized connection keyword");
                options
            }
        };
    }

    let stray = dsn[cursor..].trim();
    if !stray.is_empty() {
        return Err(configuration_error(format!("unexpected text {stray:?}")));
    }
    Ok(options)
}
