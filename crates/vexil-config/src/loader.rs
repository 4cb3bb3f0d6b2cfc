//! Configuration loading.
//!
//! Implements the `Config::load()` algorithm:
//! 1. Serialize `Config::default()` → base tree, every field `defaults`
//! 2. Apply programmatic options → `options`
//! 3. Apply recognized env vars → `environment`
//! 4. Range-check integer fields, deserialize the tree → `Config`
//! 5. Normalize `server.base_uri_path`
//! 6. Validate cross-field invariants
//! 7. Return `ResolvedConfig`

use tracing::{info, warn};
use vexil_env::{EnvReader, EnvSource, ProcessEnv};

use crate::env::{apply_env_values, set_field};
use crate::error::{ConfigError, ConfigResult};
use crate::overrides::ConfigOverrides;
use crate::show::ResolvedConfig;
use crate::sources::{ConfigLayer, FieldSources, record_leaves};
use crate::types::Config;
use crate::validate;

/// Load configuration from the process environment with no options.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the resolved configuration fails validation.
pub fn load() -> ConfigResult<ResolvedConfig> {
    load_from(&ProcessEnv, &ConfigOverrides::default())
}

/// Load configuration from `source`, layered over `overrides` and defaults.
///
/// # Errors
///
/// Returns a [`ConfigError`] if an integer falls outside its field's range
/// or the resolved configuration fails validation.
pub fn load_from<S: EnvSource + ?Sized>(
    source: &S,
    overrides: &ConfigOverrides,
) -> ConfigResult<ResolvedConfig> {
    let defaults =
        toml::Value::try_from(Config::default()).map_err(|e| ConfigError::Conversion(e.to_string()))?;

    let mut merged = defaults.clone();
    let mut field_sources = FieldSources::new();
    record_leaves(&defaults, "", ConfigLayer::Defaults, &mut field_sources);

    for (path, val) in overrides.entries() {
        set_field(&mut merged, path, val);
        field_sources.insert(path.to_owned(), ConfigLayer::Options);
    }

    let reader = EnvReader::new(source);
    let env_applied = apply_env_values(
        &mut merged,
        &defaults,
        overrides,
        &reader,
        &mut field_sources,
    );

    validate::check_ranges(&merged)?;

    let mut config: Config = merged
        .try_into()
        .map_err(|e: toml::de::Error| ConfigError::Conversion(e.to_string()))?;

    let normalized = normalize_base_uri_path(&config.server.base_uri_path);
    if normalized != config.server.base_uri_path {
        warn!(
            from = %config.server.base_uri_path,
            to = %normalized,
            "normalized server.base_uri_path"
        );
        config.server.base_uri_path = normalized;
    }

    validate::validate(&config)?;

    info!(
        env_applied,
        port = config.server.port,
        "configuration loaded"
    );

    Ok(ResolvedConfig {
        config,
        field_sources,
        env_applied,
    })
}

/// Normalize a proxy path prefix: one leading `/`, no trailing `/`, and `""`
/// for the root.
#[must_use]
pub fn normalize_base_uri_path(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
