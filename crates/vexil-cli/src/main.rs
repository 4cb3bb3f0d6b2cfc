//! Vexil CLI - inspect and validate environment-driven configuration.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use anyhow::Result;
use clap::{Parser, Subcommand};
use vexil_config::{ConfigResult, ResolvedConfig};

mod commands;
mod theme;

use commands::config;

/// Vexil - feature-flag server configuration
#[derive(Parser)]
#[command(name = "vexil")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// View and check configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show resolved configuration with source annotations
    Show {
        /// Output format (toml or json)
        #[arg(short, long, default_value = "toml")]
        format: String,
        /// Show only a specific section (e.g. server, database, metrics)
        #[arg(short, long)]
        section: Option<String>,
    },
    /// Validate the current environment
    Validate,
    /// List recognized environment variables and which are set
    Env {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = vexil_config::Config::load();

    // Set up logging from the resolved config, with --verbose override.
    let log_config = match &loaded {
        Ok(resolved) => {
            let mut lc = vexil_telemetry::to_log_config(&resolved.config.logging);
            if cli.verbose {
                "debug".clone_into(&mut lc.level);
            }
            lc
        },
        Err(_) => {
            // `config validate` reports the error itself.
            let level = if cli.verbose { "debug" } else { "warn" };
            vexil_telemetry::LogConfig::new(level)
                .with_format(vexil_telemetry::LogFormat::Compact)
        },
    };
    if let Err(e) = vexil_telemetry::setup_logging(&log_config) {
        eprintln!("Failed to initialize logging: {e}");
    }
    tracing::debug!(verbose = cli.verbose, "vexil cli started");

    match cli.command {
        Commands::Config { command } => handle_config(command, loaded),
    }
}

fn handle_config(command: ConfigCommands, loaded: ConfigResult<ResolvedConfig>) -> Result<()> {
    match command {
        ConfigCommands::Show { format, section } => {
            config::show_config(loaded, &format, section.as_deref())
        },
        ConfigCommands::Validate => config::validate_config(&loaded),
        ConfigCommands::Env { json } => config::show_env(json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_config_show() {
        let cli = Cli::try_parse_from(["vexil", "config", "show", "-f", "json", "-s", "server"])
            .unwrap();
        match cli.command {
            Commands::Config {
                command: ConfigCommands::Show { format, section },
            } => {
                assert_eq!(format, "json");
                assert_eq!(section.as_deref(), Some("server"));
            },
            _ => panic!("expected config show"),
        }
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["vexil", "config", "validate", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }
}
