//! Vexil Test - Shared test utilities for the Vexil workspace.
//!
//! Tests never mutate the real process environment. They build an in-memory
//! map with [`env_map`] and hand it to whatever reads configuration.
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! vexil-test.workspace = true
//! ```
//!
//! ```rust,ignore
//! use vexil_test::env_map;
//!
//! let env = env_map(&[("VEXIL_PORT", "8080")]);
//! let resolved = vexil_config::loader::load_from(&env, &Default::default()).unwrap();
//! assert_eq!(resolved.config.server.port, 8080);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod fixtures;
pub mod harness;

pub use fixtures::*;
pub use harness::*;
