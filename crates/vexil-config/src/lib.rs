#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Environment-driven configuration for the Vexil feature-flag server.
//!
//! The whole configuration is resolved once at startup into an immutable
//! [`ResolvedConfig`] and handed to consumers by reference.
//!
//! # Usage
//!
//! ```rust,no_run
//! use vexil_config::Config;
//!
//! let resolved = Config::load().unwrap();
//! println!("Listening on port {}", resolved.config.server.port);
//! ```
//!
//! # Precedence
//!
//! From highest to lowest priority:
//!
//! 1. **Environment variables** (`VEXIL_*`, plus legacy aliases such as `PORT`)
//! 2. **Options** passed by an embedding host ([`ConfigOverrides`])
//! 3. **Defaults** compiled into each section's `Default` impl
//!
//! Every raw value goes through one of the total coercions in `vexil-env`, so
//! an unset or garbled variable falls back instead of failing. Only values
//! that parse but cannot be used (a port of `70000`, `pool_min > pool_max`)
//! produce a [`ConfigError`].

/// Environment variable mappings.
pub mod env;
/// Configuration error types.
pub mod error;
/// Layered loading.
pub mod loader;
/// Programmatic options.
pub mod overrides;
/// Resolved configuration display and serialization.
pub mod show;
/// Field source tracking.
pub mod sources;
/// Configuration struct definitions.
pub mod types;
/// Configuration validation rules.
pub mod validate;

pub use error::{ConfigError, ConfigResult};
pub use overrides::ConfigOverrides;
pub use show::{ResolvedConfig, ShowFormat};
pub use sources::{ConfigLayer, FieldSources};
pub use types::*;

impl Config {
    /// Load configuration from the process environment.
    ///
    /// See [`loader::load_from`] for the full algorithm.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the resolved configuration fails validation.
    pub fn load() -> ConfigResult<ResolvedConfig> {
        loader::load()
    }

    /// Load configuration from any [`vexil_env::EnvSource`] with host options.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the resolved configuration fails validation.
    pub fn load_from<S: vexil_env::EnvSource + ?Sized>(
        source: &S,
        overrides: &ConfigOverrides,
    ) -> ConfigResult<ResolvedConfig> {
        loader::load_from(source, overrides)
    }
}
