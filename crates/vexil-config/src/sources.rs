//! Which layer supplied each field.

use std::collections::BTreeMap;

/// Identifies which layer supplied a configuration value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigLayer {
    /// Compiled-in defaults.
    Defaults,
    /// Programmatic options passed by the embedding host.
    Options,
    /// Environment variable.
    Environment,
}

impl std::fmt::Display for ConfigLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Defaults => write!(f, "defaults"),
            Self::Options => write!(f, "options"),
            Self::Environment => write!(f, "environment"),
        }
    }
}

/// Dotted field path to the layer that set it.
pub type FieldSources = BTreeMap<String, ConfigLayer>;

/// Record `layer` for every leaf under `val`.
///
/// Arrays count as leaves; a list is always replaced whole.
pub(crate) fn record_leaves(
    val: &toml::Value,
    prefix: &str,
    layer: ConfigLayer,
    sources: &mut FieldSources,
) {
    if let toml::Value::Table(table) = val {
        for (key, child) in table {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };
            record_leaves(child, &path, layer, sources);
        }
    } else if !prefix.is_empty() {
        sources.insert(prefix.to_owned(), layer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_leaves() {
        let val: toml::Value =
            toml::from_str("[server]\nport = 1\n[security]\ncors_origins = [\"a\"]").unwrap();
        let mut sources = FieldSources::new();
        record_leaves(&val, "", ConfigLayer::Defaults, &mut sources);

        assert_eq!(sources.get("server.port"), Some(&ConfigLayer::Defaults));
        assert_eq!(
            sources.get("security.cors_origins"),
            Some(&ConfigLayer::Defaults)
        );
        assert_eq!(sources.len(), 2);
    }

    #[test]
    fn test_display() {
        assert_eq!(ConfigLayer::Environment.to_string(), "environment");
        assert_eq!(ConfigLayer::Options.to_string(), "options");
    }
}
