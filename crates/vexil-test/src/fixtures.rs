//! Environment fixtures.

use std::collections::HashMap;

/// Build an in-memory environment from key/value pairs.
#[must_use]
pub fn env_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

/// A production-like environment touching every section.
#[must_use]
pub fn production_env() -> HashMap<String, String> {
    env_map(&[
        ("VEXIL_PORT", "8080"),
        ("VEXIL_BASE_URI_PATH", "/flags/"),
        ("VEXIL_REQUEST_LOGGER", "true"),
        ("VEXIL_DATABASE_POOL_MIN", "2"),
        ("VEXIL_DATABASE_POOL_MAX", "16"),
        ("VEXIL_CREATE_USER_RATE_LIMIT", "50"),
        ("VEXIL_CORS_ORIGINS", "https://app.example.com, https://admin.example.com"),
        ("VEXIL_EXPERIMENTAL_FLAGS", "newStrategies,segmentContext"),
        ("VEXIL_METRICS_INTERVAL_MS", "30000"),
        ("VEXIL_LOG_LEVEL", "warn"),
        ("VEXIL_LOG_FORMAT", "json"),
    ])
}

/// An environment where every value is malformed for its field.
#[must_use]
pub fn garbled_env() -> HashMap<String, String> {
    env_map(&[
        ("VEXIL_PORT", "http"),
        ("VEXIL_REQUEST_LOGGER", "YES"),
        ("VEXIL_DATABASE_POOL_MAX", "lots"),
        ("VEXIL_CREATE_USER_RATE_LIMIT", "unlimited"),
        ("VEXIL_METRICS_INTERVAL_MS", "-1"),
        ("VEXIL_CORS_ORIGINS", " , ,"),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_map_keeps_empty_values() {
        let env = env_map(&[("A", ""), ("B", "1")]);
        assert_eq!(env.get("A").map(String::as_str), Some(""));
        assert_eq!(env.len(), 2);
    }

    #[test]
    fn test_fixture_envs_are_prefixed() {
        for key in production_env().keys().chain(garbled_env().keys()) {
            assert!(key.starts_with("VEXIL_"), "{key}");
        }
    }
}
