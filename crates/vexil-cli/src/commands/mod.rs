//! CLI commands.

pub(crate) mod config;
