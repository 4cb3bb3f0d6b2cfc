//! Vexil Telemetry - Logging setup for the Vexil feature-flag server.
//!
//! Installs a `tracing` subscriber with a pretty, compact, or JSON formatter,
//! writing to stdout, stderr, or daily-rotated files.
//!
//! # Example
//!
//! ```rust,no_run
//! use vexil_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), vexil_telemetry::TelemetryError> {
//! let config = LogConfig::new("debug")
//!     .with_format(LogFormat::Compact)
//!     .with_directive("vexil_env=trace");
//!
//! setup_logging(&config)?;
//! tracing::info!("logging ready");
//! # Ok(())
//! # }
//! ```
//!
//! With the `config` feature, a [`LogConfig`] can be built straight from the
//! resolved `[logging]` section of `vexil-config`.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

#[cfg(feature = "config")]
mod bridge;
mod error;
mod logging;

#[cfg(feature = "config")]
pub use bridge::to_log_config;
pub use error::{TelemetryError, TelemetryResult};
pub use logging::{
    ENV_LOG_ANSI, ENV_LOG_DIR, ENV_LOG_FILE_INFO, ENV_LOG_TIMESTAMPS, LOG_ENV_VARS, LogConfig,
    LogFormat, LogTarget, setup_default_logging, setup_logging,
};
