//! CLI handlers for the `vexil config` subcommand.
//!
//! `main` resolves the configuration once and hands the result to these
//! handlers.

use anyhow::{Result, ensure};
use vexil_config::env::{ENV_MAPPINGS, EnvKind};
use vexil_config::{ConfigResult, ResolvedConfig, SECTIONS, ShowFormat};
use vexil_env::{EnvReader, EnvSource, ProcessEnv};
use vexil_telemetry::LOG_ENV_VARS;

use crate::theme::Theme;

/// Show the resolved configuration with source annotations.
pub(crate) fn show_config(
    loaded: ConfigResult<ResolvedConfig>,
    format: &str,
    section: Option<&str>,
) -> Result<()> {
    let output = render_config(loaded, format, section)?;
    println!("{output}");
    Ok(())
}

fn render_config(
    loaded: ConfigResult<ResolvedConfig>,
    format: &str,
    section: Option<&str>,
) -> Result<String> {
    let show_format: ShowFormat = format.parse().map_err(anyhow::Error::msg)?;
    if let Some(name) = section {
        ensure!(
            SECTIONS.contains(&name),
            "unknown section '{name}'; expected one of: {}",
            SECTIONS.join(", ")
        );
    }
    let resolved = loaded?;

    resolved
        .show(show_format, section)
        .map_err(|e| anyhow::anyhow!("failed to format config: {e}"))
}

/// Validate the configuration resolved from the current environment.
#[allow(clippy::unnecessary_wraps)]
pub(crate) fn validate_config(loaded: &ConfigResult<ResolvedConfig>) -> Result<()> {
    match loaded {
        Ok(resolved) => {
            println!("{}", Theme::success("Configuration is valid."));
            println!(
                "{}",
                Theme::dimmed(&format!(
                    "{} environment variable(s) applied",
                    resolved.env_applied
                ))
            );
            Ok(())
        },
        Err(e) => {
            eprintln!("{}", Theme::error(&format!("Configuration error: {e}")));
            std::process::exit(1);
        },
    }
}

/// List every recognized variable with the name currently supplying it.
pub(crate) fn show_env(json: bool) -> Result<()> {
    let rows = env_rows(&ProcessEnv);

    if json {
        let value: Vec<serde_json::Value> = rows
            .iter()
            .map(|row| {
                serde_json::json!({
                    "field": row.field,
                    "vars": row.vars,
                    "kind": row.kind,
                    "set_by": row.set_by,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{}\n", Theme::header("Recognized environment variables"));
    for row in &rows {
        let status = match row.set_by {
            Some(var) => Theme::success(&format!("set by {var}")),
            None => Theme::dimmed("unset"),
        };
        println!(
            "  {:<40} {:<38} {:<8} {status}",
            row.vars.join(" | "),
            row.field,
            row.kind,
        );
    }
    Ok(())
}

/// Field shown for the logging output variables, which tune the subscriber
/// rather than a config field.
const LOG_OUTPUT_FIELD: &str = "(log output)";

struct EnvRow {
    vars: &'static [&'static str],
    field: &'static str,
    kind: &'static str,
    set_by: Option<&'static str>,
}

fn env_rows<S: EnvSource + ?Sized>(source: &S) -> Vec<EnvRow> {
    let reader = EnvReader::new(source);
    let config_rows = ENV_MAPPINGS.iter().map(|mapping| EnvRow {
        vars: mapping.vars,
        field: mapping.field_path,
        kind: kind_label(mapping.kind),
        set_by: reader.lookup(mapping.vars).key(),
    });
    let log_rows = LOG_ENV_VARS.iter().map(|(name, kind)| {
        let vars = std::slice::from_ref(name);
        EnvRow {
            vars,
            field: LOG_OUTPUT_FIELD,
            kind: *kind,
            set_by: reader.lookup(vars).key(),
        }
    });
    config_rows.chain(log_rows).collect()
}

fn kind_label(kind: EnvKind) -> &'static str {
    match kind {
        EnvKind::Int => "int",
        EnvKind::Bool => "bool",
        EnvKind::Str => "string",
        EnvKind::List => "list",
        EnvKind::Bounded { .. } => "bounded",
    }
}
