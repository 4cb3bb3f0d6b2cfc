//! Source-annotated display for `config show`.
//!
//! Prints the resolved configuration with a comment on each field naming the
//! layer (defaults, options, environment) that set it.

use std::fmt::{self, Write as _};

use crate::env::mapping_for;
use crate::sources::FieldSources;
use crate::types::Config;

/// A resolved configuration together with source annotations.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The final configuration.
    pub config: Config,
    /// Dotted field path → which layer set the value.
    pub field_sources: FieldSources,
    /// Number of environment variables that supplied a value.
    pub env_applied: usize,
}

/// Output format for `config show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowFormat {
    /// TOML with inline comments showing source.
    Toml,
    /// JSON (for programmatic consumption).
    Json,
}

impl std::str::FromStr for ShowFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown format '{other}'; expected toml or json")),
        }
    }
}

impl ResolvedConfig {
    /// Render the configuration, optionally restricted to one section.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or `section` does not exist.
    pub fn show(&self, format: ShowFormat, section: Option<&str>) -> Result<String, fmt::Error> {
        match format {
            ShowFormat::Toml => self.show_toml(section),
            ShowFormat::Json => self.show_json(section),
        }
    }

    fn section_value(&self, section: &str) -> Result<toml::Value, fmt::Error> {
        let val = toml::Value::try_from(&self.config).map_err(|_| fmt::Error)?;
        let table = val.as_table().ok_or(fmt::Error)?;
        table.get(section).cloned().ok_or(fmt::Error)
    }

    fn show_toml(&self, section: Option<&str>) -> Result<String, fmt::Error> {
        let toml_str = if let Some(section_name) = section {
            toml::to_string_pretty(&self.section_value(section_name)?).map_err(|_| fmt::Error)?
        } else {
            toml::to_string_pretty(&self.config).map_err(|_| fmt::Error)?
        };

        let mut output = String::new();
        output.push_str("# Resolved Vexil Configuration\n");
        output.push_str("# Source annotations: [defaults] [options] [environment: VAR]\n");
        let _ = writeln!(output, "# Environment variables applied: {}", self.env_applied);
        output.push('\n');

        // Top-level keys of a single-section dump belong to that section.
        let mut current_table = section.unwrap_or_default().to_owned();
        for line in toml_str.lines() {
            let trimmed = line.trim();
            if let Some(header) = trimmed.strip_prefix('[').and_then(|h| h.strip_suffix(']')) {
                current_table = match section {
                    Some(s) => format!("{s}.{header}"),
                    None => header.to_owned(),
                };
            }

            if let Some(annotation) = self.annotate_line(trimmed, &current_table) {
                writeln!(output, "{line}  # {annotation}")?;
            } else {
                output.push_str(line);
                output.push('\n');
            }
        }

        Ok(output)
    }

    fn show_json(&self, section: Option<&str>) -> Result<String, fmt::Error> {
        if let Some(section_name) = section {
            serde_json::to_string_pretty(&self.section_value(section_name)?).map_err(|_| fmt::Error)
        } else {
            serde_json::to_string_pretty(&self.config).map_err(|_| fmt::Error)
        }
    }

    /// Source annotation for a `key = value` line inside `table`.
    fn annotate_line(&self, trimmed: &str, table: &str) -> Option<String> {
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('[') {
            return None;
        }

        let key = trimmed.split('=').next()?.trim();
        let field_path = if table.is_empty() {
            key.to_owned()
        } else {
            format!("{table}.{key}")
        };

        let layer = self.field_sources.get(&field_path)?;
        let annotation = match (layer, mapping_for(&field_path)) {
            (crate::ConfigLayer::Environment, Some(mapping)) => {
                format!("[{layer}: {}]", mapping.primary())
            },
            _ => format!("[{layer}]"),
        };
        Some(annotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigLayer;

    fn resolved() -> ResolvedConfig {
        let mut field_sources = FieldSources::new();
        field_sources.insert("server.port".to_owned(), ConfigLayer::Environment);
        field_sources.insert("logging.level".to_owned(), ConfigLayer::Options);
        field_sources.insert("database.schema".to_owned(), ConfigLayer::Defaults);
        ResolvedConfig {
            config: Config::default(),
            field_sources,
            env_applied: 1,
        }
    }

    #[test]
    fn test_show_toml_annotates_by_section() {
        let output = resolved().show(ShowFormat::Toml, None).unwrap();

        assert!(output.contains("Resolved Vexil Configuration"));
        assert!(output.contains("port = 4242  # [environment: VEXIL_PORT]"));
        assert!(output.contains("level = \"info\"  # [options]"));
        assert!(output.contains("schema = \"public\"  # [defaults]"));
    }

    #[test]
    fn test_show_json_default() {
        let output = resolved().show(ShowFormat::Json, None).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["server"]["port"], 4242);
    }

    #[test]
    fn test_show_section() {
        let output = resolved().show(ShowFormat::Toml, Some("server")).unwrap();
        assert!(output.contains("port = 4242  # [environment: VEXIL_PORT]"));
        assert!(!output.contains("schema"));
    }

    #[test]
    fn test_show_json_section() {
        let output = resolved().show(ShowFormat::Json, Some("metrics")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["interval_ms"], 60_000);
    }

    #[test]
    fn test_show_unknown_section() {
        assert!(resolved().show(ShowFormat::Toml, Some("nope")).is_err());
    }

    #[test]
    fn test_show_format_from_str() {
        assert_eq!("json".parse::<ShowFormat>(), Ok(ShowFormat::Json));
        assert!("yaml".parse::<ShowFormat>().is_err());
    }
}
