//! Configuration types for the Vexil server.
//!
//! Every struct implements [`Default`] with production defaults, so an empty
//! environment yields a working configuration.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level Config
// ---------------------------------------------------------------------------

/// Root configuration for the Vexil server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP listener settings.
    pub server: ServerSection,
    /// Database connection pool.
    pub database: DatabaseSection,
    /// Per-minute limits on abuse-prone endpoints.
    pub rate_limits: RateLimitsSection,
    /// CORS and header hardening.
    pub security: SecuritySection,
    /// Experimental feature switches.
    pub flags: FlagsSection,
    /// Client metrics collection.
    pub metrics: MetricsSection,
    /// Logging level, format, and per-crate directives.
    pub logging: LoggingSection,
}

/// Names of the top-level sections, in serialization order.
pub const SECTIONS: &[&str] = &[
    "server",
    "database",
    "rate_limits",
    "security",
    "flags",
    "metrics",
    "logging",
];

// ---------------------------------------------------------------------------
// ServerSection
// ---------------------------------------------------------------------------

/// HTTP listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// TCP port to listen on.
    pub port: u16,
    /// Interface to bind. `None` binds all interfaces.
    pub host: Option<String>,
    /// Path prefix when served behind a proxy (e.g. `/flags`). Empty for root.
    pub base_uri_path: String,
    /// Idle keep-alive timeout in milliseconds.
    pub keep_alive_timeout_ms: u64,
    /// Header read timeout in milliseconds. Must exceed the keep-alive timeout.
    pub headers_timeout_ms: u64,
    /// Log every request.
    pub enable_request_logger: bool,
    /// Drain connections on shutdown.
    pub graceful_shutdown: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            port: 4242,
            host: None,
            base_uri_path: String::new(),
            keep_alive_timeout_ms: 15_000,
            headers_timeout_ms: 61_000,
            enable_request_logger: false,
            graceful_shutdown: true,
        }
    }
}

// ---------------------------------------------------------------------------
// DatabaseSection
// ---------------------------------------------------------------------------

/// Database pool configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    /// Connections kept open when idle.
    pub pool_min: u32,
    /// Upper bound on open connections.
    pub pool_max: u32,
    /// How long an idle connection lives, in milliseconds.
    pub pool_idle_timeout_ms: u64,
    /// Schema holding the flag tables.
    pub schema: String,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            pool_min: 0,
            pool_max: 4,
            pool_idle_timeout_ms: 30_000,
            schema: "public".to_owned(),
        }
    }
}

// ---------------------------------------------------------------------------
// RateLimitsSection
// ---------------------------------------------------------------------------

/// Requests per minute allowed on sensitive endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitsSection {
    /// User creation.
    pub create_user_per_minute: u32,
    /// Username/password login attempts.
    pub simple_login_per_minute: u32,
    /// Frontend client registrations.
    pub client_register_per_minute: u32,
    /// Project creation.
    pub create_project_per_minute: u32,
}

impl Default for RateLimitsSection {
    fn default() -> Self {
        Self {
            create_user_per_minute: 20,
            simple_login_per_minute: 10,
            client_register_per_minute: 6000,
            create_project_per_minute: 20,
        }
    }
}

// ---------------------------------------------------------------------------
// SecuritySection
// ---------------------------------------------------------------------------

/// CORS and response header policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecuritySection {
    /// Origins allowed by CORS. Empty disables cross-origin access.
    pub cors_origins: Vec<String>,
    /// Emit hardened security headers (HSTS, CSP, ...).
    pub secure_headers: bool,
    /// Addresses allowed to reach admin endpoints. Empty allows all.
    pub admin_ip_allowlist: Vec<String>,
}

// ---------------------------------------------------------------------------
// FlagsSection
// ---------------------------------------------------------------------------

/// Experimental feature switches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlagsSection {
    /// Names of enabled experiments.
    pub experimental: Vec<String>,
}

impl FlagsSection {
    /// Whether the named experiment is enabled.
    #[must_use]
    pub fn is_enabled(&self, name: &str) -> bool {
        self.experimental.iter().any(|f| f == name)
    }
}

// ---------------------------------------------------------------------------
// MetricsSection
// ---------------------------------------------------------------------------

/// Client metrics collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsSection {
    /// Stop accepting client metrics.
    pub disabled: bool,
    /// Aggregation interval in milliseconds.
    pub interval_ms: u64,
}

impl Default for MetricsSection {
    fn default() -> Self {
        Self {
            disabled: false,
            interval_ms: 60_000,
        }
    }
}

// ---------------------------------------------------------------------------
// LoggingSection
// ---------------------------------------------------------------------------

/// Logging and tracing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Global log level filter (`"trace"`, `"debug"`, `"info"`, `"warn"`,
    /// `"error"`).
    pub level: String,
    /// Output format: `"pretty"`, `"compact"` or `"json"`.
    pub format: String,
    /// Per-crate tracing directives (e.g. `["vexil_env=debug"]`).
    pub directives: Vec<String>,
}

/// Accepted values for [`LoggingSection::format`].
pub const LOG_FORMATS: &[&str] = &["pretty", "compact", "json"];

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: "pretty".to_owned(),
            directives: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 4242);
        assert!(config.server.graceful_shutdown);
        assert_eq!(config.database.schema, "public");
        assert_eq!(config.rate_limits.client_register_per_minute, 6000);
        assert!(config.security.cors_origins.is_empty());
        assert_eq!(config.metrics.interval_ms, 60_000);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_section() {
        let config: Config = toml::from_str("[server]\nport = 8080").unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.keep_alive_timeout_ms, 15_000);
    }

    #[test]
    fn test_sections_match_serialization() {
        let val = toml::Value::try_from(Config::default()).unwrap();
        let table = val.as_table().unwrap();
        for section in SECTIONS {
            assert!(table.contains_key(*section), "{section}");
        }
        assert_eq!(table.len(), SECTIONS.len());
    }

    #[test]
    fn test_flag_lookup() {
        let flags = FlagsSection {
            experimental: vec!["segmentContext".to_owned()],
        };
        assert!(flags.is_enabled("segmentContext"));
        assert!(!flags.is_enabled("segmentcontext"));
    }
}
