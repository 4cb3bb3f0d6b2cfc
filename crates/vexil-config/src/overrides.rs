//! Programmatic options supplied by an embedding host.
//!
//! Options replace compiled-in defaults. A usable environment variable for
//! the same field still wins over them.

/// Options an embedding host may set before loading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    /// `server.port`.
    pub port: Option<u16>,
    /// `server.base_uri_path`.
    pub base_uri_path: Option<String>,
    /// `database.pool_min`.
    pub database_pool_min: Option<u32>,
    /// `database.pool_max`.
    pub database_pool_max: Option<u32>,
    /// `rate_limits.create_user_per_minute`.
    pub create_user_per_minute: Option<u32>,
    /// `rate_limits.simple_login_per_minute`.
    pub simple_login_per_minute: Option<u32>,
    /// `rate_limits.client_register_per_minute`.
    pub client_register_per_minute: Option<u32>,
    /// `rate_limits.create_project_per_minute`.
    pub create_project_per_minute: Option<u32>,
    /// `security.cors_origins`.
    pub cors_origins: Option<Vec<String>>,
    /// `flags.experimental`.
    pub experimental_flags: Option<Vec<String>>,
    /// `metrics.interval_ms`.
    pub metrics_interval_ms: Option<u64>,
    /// `logging.level`.
    pub log_level: Option<String>,
}

impl ConfigOverrides {
    /// No overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `server.port`.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set `rate_limits.create_user_per_minute`.
    #[must_use]
    pub fn with_create_user_per_minute(mut self, limit: u32) -> Self {
        self.create_user_per_minute = Some(limit);
        self
    }

    /// Set `metrics.interval_ms`.
    #[must_use]
    pub fn with_metrics_interval_ms(mut self, interval_ms: u64) -> Self {
        self.metrics_interval_ms = Some(interval_ms);
        self
    }

    /// Set `security.cors_origins`.
    #[must_use]
    pub fn with_cors_origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cors_origins = Some(origins.into_iter().map(Into::into).collect());
        self
    }

    /// Set `logging.level`.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    /// Every set option as a dotted field path and TOML value.
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, toml::Value)> {
        let ints = [
            ("server.port", self.port.map(i64::from)),
            ("database.pool_min", self.database_pool_min.map(i64::from)),
            ("database.pool_max", self.database_pool_max.map(i64::from)),
            (
                "rate_limits.create_user_per_minute",
                self.create_user_per_minute.map(i64::from),
            ),
            (
                "rate_limits.simple_login_per_minute",
                self.simple_login_per_minute.map(i64::from),
            ),
            (
                "rate_limits.client_register_per_minute",
                self.client_register_per_minute.map(i64::from),
            ),
            (
                "rate_limits.create_project_per_minute",
                self.create_project_per_minute.map(i64::from),
            ),
            (
                "metrics.interval_ms",
                self.metrics_interval_ms
                    .map(|v| i64::try_from(v).unwrap_or(i64::MAX)),
            ),
        ];
        let strings = [
            ("server.base_uri_path", self.base_uri_path.as_ref()),
            ("logging.level", self.log_level.as_ref()),
        ];
        let lists = [
            ("security.cors_origins", self.cors_origins.as_ref()),
            ("flags.experimental", self.experimental_flags.as_ref()),
        ];

        let mut out = Vec::new();
        out.extend(
            ints.into_iter()
                .filter_map(|(path, v)| Some((path, toml::Value::Integer(v?)))),
        );
        out.extend(
            strings
                .into_iter()
                .filter_map(|(path, v)| Some((path, toml::Value::String(v?.clone())))),
        );
        out.extend(lists.into_iter().filter_map(|(path, v)| {
            let items = v?.iter().cloned().map(toml::Value::String).collect();
            Some((path, toml::Value::Array(items)))
        }));
        out
    }

    /// The integer option for `path`, if set.
    #[must_use]
    pub fn int_for(&self, path: &str) -> Option<i64> {
        self.entries()
            .into_iter()
            .find(|(p, _)| *p == path)
            .and_then(|(_, v)| v.as_integer())
    }
}
