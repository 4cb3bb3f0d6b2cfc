//! Logging configuration and setup.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};
use vexil_env::{EnvReader, EnvSource};

use crate::error::{TelemetryError, TelemetryResult};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// `VEXIL_LOG_TIMESTAMPS`: include timestamps (bool).
pub const ENV_LOG_TIMESTAMPS: &str = "VEXIL_LOG_TIMESTAMPS";
/// `VEXIL_LOG_ANSI`: use ANSI colors (bool).
pub const ENV_LOG_ANSI: &str = "VEXIL_LOG_ANSI";
/// `VEXIL_LOG_FILE_INFO`: include file/line (bool).
pub const ENV_LOG_FILE_INFO: &str = "VEXIL_LOG_FILE_INFO";
/// `VEXIL_LOG_DIR`: log to daily-rotated files in this directory (string).
pub const ENV_LOG_DIR: &str = "VEXIL_LOG_DIR";

/// Every variable read by [`LogConfig::with_env`], with its kind.
pub const LOG_ENV_VARS: &[(&str, &str)] = &[
    (ENV_LOG_TIMESTAMPS, "bool"),
    (ENV_LOG_ANSI, "bool"),
    (ENV_LOG_FILE_INFO, "bool"),
    (ENV_LOG_DIR, "string"),
];

/// Log format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-line format with colors (default).
    #[default]
    Pretty,
    /// Compact single-line format.
    Compact,
    /// JSON lines for log shippers.
    Json,
}

impl LogFormat {
    /// Map a format name to a format, defaulting to [`LogFormat::Compact`]
    /// for unrecognized names.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "pretty" => Self::Pretty,
            "json" => Self::Json,
            _ => Self::Compact,
        }
    }
}

/// Log output target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogTarget {
    /// Log to stdout.
    Stdout,
    /// Log to stderr.
    #[default]
    Stderr,
    /// Log to daily-rotated files in this directory.
    File(PathBuf),
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    #[serde(default = "default_level")]
    pub level: String,
    /// Log format.
    #[serde(default)]
    pub format: LogFormat,
    /// Log target.
    #[serde(default)]
    pub target: LogTarget,
    /// File name prefix when logging to files.
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,
    /// Whether to include timestamps.
    #[serde(default = "default_true")]
    pub timestamps: bool,
    /// Whether to include file/line info.
    #[serde(default)]
    pub file_info: bool,
    /// Whether to use ANSI colors.
    #[serde(default = "default_true")]
    pub ansi: bool,
    /// Directive overrides (e.g., `vexil_env=debug`).
    #[serde(default)]
    pub directives: Vec<String>,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_file_prefix() -> String {
    "vexil.log".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            target: LogTarget::default(),
            file_prefix: default_file_prefix(),
            timestamps: true,
            file_info: false,
            ansi: true,
            directives: Vec::new(),
        }
    }
}

impl LogConfig {
    /// Create a new log config with the specified level.
    #[must_use]
    pub fn new(level: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            ..Default::default()
        }
    }

    /// Set the log format.
    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the log target.
    #[must_use]
    pub fn with_target(mut self, target: LogTarget) -> Self {
        self.target = target;
        self
    }

    /// Log to daily-rotated files under `directory`.
    #[must_use]
    pub fn with_file_logging(mut self, directory: impl Into<PathBuf>) -> Self {
        self.target = LogTarget::File(directory.into());
        // Escape codes are noise in files.
        self.ansi = false;
        self
    }

    /// Add a directive override.
    #[must_use]
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directives.push(directive.into());
        self
    }

    /// Disable timestamps.
    #[must_use]
    pub fn without_timestamps(mut self) -> Self {
        self.timestamps = false;
        self
    }

    /// Disable ANSI colors.
    #[must_use]
    pub fn without_ansi(mut self) -> Self {
        self.ansi = false;
        self
    }

    /// Apply output tweaks from the environment.
    ///
    /// | Variable | Effect |
    /// |---|---|
    /// | `VEXIL_LOG_TIMESTAMPS` | include timestamps |
    /// | `VEXIL_LOG_ANSI` | use ANSI colors |
    /// | `VEXIL_LOG_FILE_INFO` | include file/line |
    /// | `VEXIL_LOG_DIR` | log to files in this directory |
    ///
    /// Unset variables keep the current value.
    #[must_use]
    pub fn with_env<S: EnvSource + ?Sized>(mut self, source: &S) -> Self {
        let reader = EnvReader::new(source);
        self.timestamps = reader.bool(&[ENV_LOG_TIMESTAMPS], self.timestamps);
        self.ansi = reader.bool(&[ENV_LOG_ANSI], self.ansi);
        self.file_info = reader.bool(&[ENV_LOG_FILE_INFO], self.file_info);
        if let Some(dir) = reader.string(&[ENV_LOG_DIR]) {
            self = self.with_file_logging(dir);
        }
        self
    }

    /// Build the env filter from config.
    fn build_filter(&self) -> TelemetryResult<EnvFilter> {
        let mut filter =
            EnvFilter::try_new(&self.level).map_err(|e| TelemetryError::InvalidFilter {
                directive: self.level.clone(),
                message: e.to_string(),
            })?;

        for directive in &self.directives {
            let parsed = directive.parse().map_err(
                |e: tracing_subscriber::filter::ParseError| TelemetryError::InvalidFilter {
                    directive: directive.clone(),
                    message: e.to_string(),
                },
            )?;
            filter = filter.add_directive(parsed);
        }

        Ok(filter)
    }

    fn build_layer<W>(&self, writer: W) -> BoxedLayer
    where
        W: for<'a> fmt::MakeWriter<'a> + Send + Sync + 'static,
    {
        let base = fmt::layer()
            .with_writer(writer)
            .with_ansi(self.ansi)
            .with_file(self.file_info)
            .with_line_number(self.file_info);

        match (self.format, self.timestamps) {
            (LogFormat::Json, true) => base.json().boxed(),
            (LogFormat::Json, false) => base.json().without_time().boxed(),
            (LogFormat::Pretty, true) => base.pretty().boxed(),
            (LogFormat::Pretty, false) => base.pretty().without_time().boxed(),
            (LogFormat::Compact, true) => base.compact().boxed(),
            (LogFormat::Compact, false) => base.compact().without_time().boxed(),
        }
    }
}

/// Set up logging with the given configuration.
///
/// # Errors
///
/// Returns an error if the filter is invalid, the log directory cannot be
/// created, or a subscriber is already installed.
pub fn setup_logging(config: &LogConfig) -> TelemetryResult<()> {
    let filter = config.build_filter()?;

    let layer = match &config.target {
        LogTarget::Stdout => config.build_layer(std::io::stdout),
        LogTarget::Stderr => config.build_layer(std::io::stderr),
        LogTarget::File(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = RollingFileAppender::new(Rotation::DAILY, dir, &config.file_prefix);
            config.build_layer(appender)
        },
    };

    tracing_subscriber::registry()
        .with(layer.with_filter(filter))
        .try_init()
        .map_err(|e| TelemetryError::InitError(e.to_string()))?;

    tracing::debug!(
        level = %config.level,
        format = ?config.format,
        target = ?config.target,
        "log subscriber installed"
    );
    Ok(())
}

/// Set up default logging (info level, stderr, pretty format).
///
/// # Errors
///
/// Returns an error if logging cannot be initialized.
pub fn setup_default_logging() -> TelemetryResult<()> {
    setup_logging(&LogConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vexil_test::env_map;

    #[test]
    fn test_log_config_default() {
        let config = LogConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.target, LogTarget::Stderr);
        assert!(config.timestamps);
        assert!(config.ansi);
    }

    #[test]
    fn test_log_config_builder() {
        let config = LogConfig::new("debug")
            .with_format(LogFormat::Json)
            .without_timestamps()
            .with_directive("vexil_env=trace");

        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);
        assert!(!config.timestamps);
        assert_eq!(config.directives, vec!["vexil_env=trace"]);
    }

    #[test]
    fn test_file_logging_disables_ansi() {
        let config = LogConfig::default().with_file_logging("/var/log/vexil");
        assert_eq!(config.target, LogTarget::File(PathBuf::from("/var/log/vexil")));
        assert!(!config.ansi);
    }

    #[test]
    fn test_with_env() {
        let env = env_map(&[
            ("VEXIL_LOG_TIMESTAMPS", "false"),
            ("VEXIL_LOG_FILE_INFO", "1"),
            ("VEXIL_LOG_DIR", "/tmp/vexil-logs"),
        ]);
        let config = LogConfig::default().with_env(&env);

        assert!(!config.timestamps);
        assert!(config.file_info);
        assert!(!config.ansi);
        assert_eq!(
            config.target,
            LogTarget::File(PathBuf::from("/tmp/vexil-logs"))
        );
    }

    #[test]
    fn test_with_env_unset_keeps_values() {
        let config = LogConfig::default().without_ansi().with_env(&env_map(&[]));
        assert!(config.timestamps);
        assert!(!config.ansi);
        assert_eq!(config.target, LogTarget::Stderr);
    }

    #[test]
    fn test_format_from_name() {
        assert_eq!(LogFormat::from_name("json"), LogFormat::Json);
        assert_eq!(LogFormat::from_name("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::from_name("full"), LogFormat::Compact);
    }

    #[test]
    fn test_log_config_serialization() {
        let config = LogConfig::new("warn").with_format(LogFormat::Compact);

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"level\":\"warn\""));
        assert!(json.contains("\"format\":\"compact\""));

        let parsed: LogConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.format, LogFormat::Compact);
    }

    #[test]
    fn test_build_filter() {
        let config = LogConfig::new("debug").with_directive("vexil_config=trace");
        assert!(config.build_filter().is_ok());
    }

    #[test]
    fn test_build_filter_invalid() {
        // EnvFilter is permissive with unknown targets, so we test invalid syntax
        let config = LogConfig::new("debug").with_directive("[invalid=syntax");

        match config.build_filter() {
            Err(TelemetryError::InvalidFilter { directive, .. }) => {
                assert_eq!(directive, "[invalid=syntax");
            },
            other => panic!("expected InvalidFilter, got {other:?}"),
        }
    }

    #[test]
    fn test_setup_file_logging_creates_directory() {
        let dir = vexil_test::test_dir();
        let log_dir = dir.path().join("nested").join("logs");
        let config = LogConfig::new("info").with_file_logging(&log_dir);

        // Another test may already own the global subscriber; the directory
        // is created either way.
        let _ = setup_logging(&config);
        assert!(log_dir.is_dir());
    }
}
