//! Environment variable mappings.
//!
//! Each recognized variable maps to one dotted field path and one coercion.
//! Aliases are consulted in order after the `VEXIL_` name.

use tracing::debug;
use vexil_env::{BoundsOptions, EnvReader, EnvSource, coerce_bounded_int};

use crate::overrides::ConfigOverrides;
use crate::sources::{ConfigLayer, FieldSources};

/// How a variable's raw string becomes a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvKind {
    /// Leading-integer parse; unusable input keeps the current value.
    Int,
    /// Truthy-token match; empty input keeps the current value.
    Bool,
    /// Plain string; empty input keeps the current value.
    Str,
    /// Comma-separated list; any set value replaces the current list.
    List,
    /// Integer with an override-aware fallback and a lower clamp.
    /// A `min` of zero does not clamp.
    Bounded {
        /// Lower clamp.
        min: i64,
    },
}

/// One recognized environment variable.
#[derive(Debug, Clone, Copy)]
pub struct EnvMapping {
    /// Primary name followed by aliases.
    pub vars: &'static [&'static str],
    /// Dotted config field path.
    pub field_path: &'static str,
    /// Coercion applied to the raw value.
    pub kind: EnvKind,
}

impl EnvMapping {
    /// The primary variable name.
    #[must_use]
    pub fn primary(&self) -> &'static str {
        self.vars.first().copied().unwrap_or_default()
    }
}

const fn map(vars: &'static [&'static str], field_path: &'static str, kind: EnvKind) -> EnvMapping {
    EnvMapping {
        vars,
        field_path,
        kind,
    }
}

/// All recognized variables.
pub const ENV_MAPPINGS: &[EnvMapping] = &[
    // Server.
    map(&["VEXIL_PORT", "HTTP_PORT", "PORT"], "server.port", EnvKind::Int),
    map(&["VEXIL_HOST", "HTTP_HOST"], "server.host", EnvKind::Str),
    map(
        &["VEXIL_BASE_URI_PATH", "BASE_URI_PATH"],
        "server.base_uri_path",
        EnvKind::Str,
    ),
    map(
        &["VEXIL_KEEP_ALIVE_TIMEOUT_MS"],
        "server.keep_alive_timeout_ms",
        EnvKind::Bounded { min: 1 },
    ),
    map(
        &["VEXIL_HEADERS_TIMEOUT_MS"],
        "server.headers_timeout_ms",
        EnvKind::Bounded { min: 1 },
    ),
    map(
        &["VEXIL_REQUEST_LOGGER"],
        "server.enable_request_logger",
        EnvKind::Bool,
    ),
    map(
        &["VEXIL_GRACEFUL_SHUTDOWN"],
        "server.graceful_shutdown",
        EnvKind::Bool,
    ),
    // Database.
    map(
        &["VEXIL_DATABASE_POOL_MIN", "DATABASE_POOL_MIN"],
        "database.pool_min",
        EnvKind::Int,
    ),
    map(
        &["VEXIL_DATABASE_POOL_MAX", "DATABASE_POOL_MAX"],
        "database.pool_max",
        EnvKind::Int,
    ),
    map(
        &["VEXIL_DATABASE_POOL_IDLE_TIMEOUT_MS"],
        "database.pool_idle_timeout_ms",
        EnvKind::Int,
    ),
    map(
        &["VEXIL_DATABASE_SCHEMA", "DATABASE_SCHEMA"],
        "database.schema",
        EnvKind::Str,
    ),
    // Rate limits.
    map(
        &["VEXIL_CREATE_USER_RATE_LIMIT"],
        "rate_limits.create_user_per_minute",
        EnvKind::Bounded { min: 0 },
    ),
    map(
        &["VEXIL_SIMPLE_LOGIN_RATE_LIMIT"],
        "rate_limits.simple_login_per_minute",
        EnvKind::Bounded { min: 1 },
    ),
    map(
        &["VEXIL_CLIENT_REGISTER_RATE_LIMIT"],
        "rate_limits.client_register_per_minute",
        EnvKind::Bounded { min: 1 },
    ),
    map(
        &["VEXIL_CREATE_PROJECT_RATE_LIMIT"],
        "rate_limits.create_project_per_minute",
        EnvKind::Bounded { min: 1 },
    ),
    // Security.
    map(
        &["VEXIL_CORS_ORIGINS", "CORS_ORIGIN"],
        "security.cors_origins",
        EnvKind::List,
    ),
    map(
        &["VEXIL_SECURE_HEADERS"],
        "security.secure_headers",
        EnvKind::Bool,
    ),
    map(
        &["VEXIL_ADMIN_IP_ALLOWLIST"],
        "security.admin_ip_allowlist",
        EnvKind::List,
    ),
    // Flags.
    map(
        &["VEXIL_EXPERIMENTAL_FLAGS"],
        "flags.experimental",
        EnvKind::List,
    ),
    // Metrics.
    map(&["VEXIL_DISABLE_METRICS"], "metrics.disabled", EnvKind::Bool),
    map(
        &["VEXIL_METRICS_INTERVAL_MS"],
        "metrics.interval_ms",
        EnvKind::Bounded { min: 1000 },
    ),
    // Logging.
    map(&["VEXIL_LOG_LEVEL", "LOG_LEVEL"], "logging.level", EnvKind::Str),
    map(&["VEXIL_LOG_FORMAT"], "logging.format", EnvKind::Str),
    map(
        &["VEXIL_LOG_DIRECTIVES"],
        "logging.directives",
        EnvKind::List,
    ),
];

/// Find the mapping for a dotted field path.
#[must_use]
pub fn mapping_for(field_path: &str) -> Option<&'static EnvMapping> {
    ENV_MAPPINGS.iter().find(|m| m.field_path == field_path)
}

/// Apply every recognized variable in `reader` to `merged`.
///
/// `defaults` supplies the fallback for bounded fields and `overrides` their
/// override, so bounded fields resolve as env, then option, then default.
/// Bounded fields are always rewritten so the clamp applies to whichever
/// value won.
///
/// Returns the number of variables that supplied a value.
pub fn apply_env_values<S: EnvSource + ?Sized>(
    merged: &mut toml::Value,
    defaults: &toml::Value,
    overrides: &ConfigOverrides,
    reader: &EnvReader<'_, S>,
    sources: &mut FieldSources,
) -> usize {
    let mut count: usize = 0;

    for mapping in ENV_MAPPINGS {
        let found = reader.lookup(mapping.vars);

        let applied = match mapping.kind {
            EnvKind::Int => found.parsed_int().map(toml::Value::Integer),
            EnvKind::Bool => found.parsed_bool().map(toml::Value::Boolean),
            EnvKind::Str => found
                .raw()
                .filter(|s| !s.is_empty())
                .map(|s| toml::Value::String(s.to_owned())),
            EnvKind::List => found
                .parsed_list()
                .map(|items| toml::Value::Array(items.into_iter().map(toml::Value::String).collect())),
            EnvKind::Bounded { min } => {
                let fallback = get_field(defaults, mapping.field_path)
                    .and_then(toml::Value::as_integer)
                    .unwrap_or_default();
                let options = BoundsOptions::new(fallback)
                    .with_min(min)
                    .with_override(overrides.int_for(mapping.field_path));
                let value = coerce_bounded_int(found.raw(), &options);
                if found.parsed_int().is_some() {
                    Some(toml::Value::Integer(value))
                } else {
                    set_field(merged, mapping.field_path, toml::Value::Integer(value));
                    None
                }
            },
        };

        if let Some(val) = applied {
            debug!(
                var = found.key().unwrap_or_default(),
                field = mapping.field_path,
                "applying env var"
            );
            set_field(merged, mapping.field_path, val);
            sources.insert(mapping.field_path.to_owned(), ConfigLayer::Environment);
            count = count.saturating_add(1);
        } else if let Some(var) = found.key() {
            debug!(var, field = mapping.field_path, "env var not usable; keeping fallback");
        }
    }

    count
}

/// Read a field from a TOML tree by dotted path.
pub(crate) fn get_field<'a>(root: &'a toml::Value, path: &str) -> Option<&'a toml::Value> {
    path.split('.')
        .try_fold(root, |current, segment| current.as_table()?.get(segment))
}

/// Write a field into a TOML tree by dotted path, creating intermediate tables.
pub(crate) fn set_field(root: &mut toml::Value, path: &str, val: toml::Value) {
    let mut segments: Vec<&str> = path.split('.').collect();
    let Some(leaf) = segments.pop() else {
        return;
    };

    let mut current = root;
    for segment in segments {
        let Some(table) = current.as_table_mut() else {
            return;
        };
        current = table
            .entry(segment)
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    }

    if let Some(table) = current.as_table_mut() {
        table.insert(leaf.to_owned(), val);
    }
}
