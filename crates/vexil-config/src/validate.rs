//! Post-coercion configuration validation.
//!
//! Coercion always yields a value; these checks reject values that parsed
//! fine but cannot be used (out-of-range integers, contradictory settings).

use crate::env::get_field;
use crate::error::{ConfigError, ConfigResult};
use crate::types::{Config, LOG_FORMATS};

/// Inclusive integer range for each numeric field.
#[allow(clippy::cast_lossless)]
const FIELD_RANGES: &[(&str, i64, i64)] = &[
    ("server.port", 1, u16::MAX as i64),
    ("server.keep_alive_timeout_ms", 1, i64::MAX),
    ("server.headers_timeout_ms", 1, i64::MAX),
    ("database.pool_min", 0, u32::MAX as i64),
    ("database.pool_max", 1, u32::MAX as i64),
    ("database.pool_idle_timeout_ms", 0, i64::MAX),
    ("rate_limits.create_user_per_minute", 0, u32::MAX as i64),
    ("rate_limits.simple_login_per_minute", 0, u32::MAX as i64),
    ("rate_limits.client_register_per_minute", 0, u32::MAX as i64),
    ("rate_limits.create_project_per_minute", 0, u32::MAX as i64),
    ("metrics.interval_ms", 1, i64::MAX),
];

/// Check every numeric field of a merged tree against its range.
///
/// # Errors
///
/// Returns the first field whose value falls outside its range.
pub fn check_ranges(merged: &toml::Value) -> ConfigResult<()> {
    for (path, min, max) in FIELD_RANGES {
        let Some(value) = get_field(merged, path).and_then(toml::Value::as_integer) else {
            continue;
        };
        if !(*min..=*max).contains(&value) {
            return Err(ConfigError::validation(
                *path,
                format!("{value} is out of range; must be between {min} and {max}"),
            ));
        }
    }
    Ok(())
}

/// Validate a fully-resolved configuration.
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_server(config)?;
    validate_database(config)?;
    validate_logging(config)?;
    Ok(())
}

fn validate_server(config: &Config) -> ConfigResult<()> {
    let s = &config.server;

    if s.headers_timeout_ms <= s.keep_alive_timeout_ms {
        return Err(ConfigError::validation(
            "server.headers_timeout_ms",
            format!(
                "headers_timeout_ms ({}) must exceed keep_alive_timeout_ms ({})",
                s.headers_timeout_ms, s.keep_alive_timeout_ms
            ),
        ));
    }

    if s.base_uri_path.chars().any(char::is_whitespace) {
        return Err(ConfigError::validation(
            "server.base_uri_path",
            "base_uri_path must not contain whitespace",
        ));
    }

    Ok(())
}

fn validate_database(config: &Config) -> ConfigResult<()> {
    let d = &config.database;

    if d.pool_min > d.pool_max {
        return Err(ConfigError::validation(
            "database.pool_min",
            format!(
                "pool_min ({}) must not exceed pool_max ({})",
                d.pool_min, d.pool_max
            ),
        ));
    }

    if d.schema.is_empty()
        || !d
            .schema
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(ConfigError::validation(
            "database.schema",
            format!("'{}' is not a valid schema name", d.schema),
        ));
    }

    Ok(())
}

fn validate_logging(config: &Config) -> ConfigResult<()> {
    let l = &config.logging;

    if !LOG_FORMATS.contains(&l.format.as_str()) {
        return Err(ConfigError::validation(
            "logging.format",
            format!(
                "unsupported format '{}'; expected one of: {}",
                l.format,
                LOG_FORMATS.join(", ")
            ),
        ));
    }

    if l.level.trim().is_empty() {
        return Err(ConfigError::validation(
            "logging.level",
            "level must not be empty",
        ));
    }

    Ok(())
}
