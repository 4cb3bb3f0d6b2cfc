//! Keyed lookups over an [`EnvSource`].
//!
//! A setting may be known under several names (a prefixed primary name plus
//! legacy aliases). The first name that is *set* wins, even when it is set to
//! the empty string, so an operator can blank out a list without a legacy
//! alias leaking through.

use tracing::debug;

use crate::bounds::{BoundsOptions, coerce_bounded_int};
use crate::coerce::{coerce_bool, coerce_int, coerce_string_list, parse_leading_int};
use crate::source::EnvSource;

/// Result of resolving a key (or alias list) against a source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup<'k> {
    key: Option<&'k str>,
    raw: Option<String>,
}

impl<'k> Lookup<'k> {
    /// The name that supplied the value, if any.
    #[must_use]
    pub fn key(&self) -> Option<&'k str> {
        self.key
    }

    /// The raw value, if any name was set.
    #[must_use]
    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// Whether any name was set (possibly to `""`).
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.raw.is_some()
    }

    /// The integer this value contributes, or `None` when integer coercion
    /// would fall back.
    #[must_use]
    pub fn parsed_int(&self) -> Option<i64> {
        self.raw()
            .filter(|s| !s.is_empty())
            .and_then(parse_leading_int)
    }

    /// The boolean this value contributes, or `None` when boolean coercion
    /// would fall back.
    #[must_use]
    pub fn parsed_bool(&self) -> Option<bool> {
        self.raw()
            .filter(|s| !s.is_empty())
            .map(|s| coerce_bool(Some(s), false))
    }

    /// The list this value contributes, or `None` when it is unset.
    #[must_use]
    pub fn parsed_list(&self) -> Option<Vec<String>> {
        self.raw().map(|s| coerce_string_list(Some(s), Vec::new()))
    }
}

/// Typed reads against an [`EnvSource`].
///
/// Values are never logged, only the key and whether the fallback was used.
#[derive(Debug)]
pub struct EnvReader<'a, S: ?Sized> {
    source: &'a S,
}

impl<'a, S: EnvSource + ?Sized> EnvReader<'a, S> {
    /// Wrap a source.
    #[must_use]
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Resolve the first set name in `keys`.
    #[must_use]
    pub fn lookup<'k>(&self, keys: &[&'k str]) -> Lookup<'k> {
        for key in keys {
            if let Some(raw) = self.source.get(key) {
                return Lookup {
                    key: Some(*key),
                    raw: Some(raw),
                };
            }
        }
        Lookup { key: None, raw: None }
    }

    /// Read an integer. See [`coerce_int`].
    #[must_use]
    pub fn int(&self, keys: &[&str], fallback: i64) -> i64 {
        let found = self.lookup(keys);
        trace_fallback(keys, &found, found.parsed_int().is_none());
        coerce_int(found.raw(), fallback)
    }

    /// Read a boolean. See [`coerce_bool`].
    #[must_use]
    pub fn bool(&self, keys: &[&str], fallback: bool) -> bool {
        let found = self.lookup(keys);
        trace_fallback(keys, &found, found.parsed_bool().is_none());
        coerce_bool(found.raw(), fallback)
    }

    /// Read a comma-separated list. See [`coerce_string_list`].
    #[must_use]
    pub fn string_list(&self, keys: &[&str], fallback: Vec<String>) -> Vec<String> {
        let found = self.lookup(keys);
        trace_fallback(keys, &found, !found.is_present());
        coerce_string_list(found.raw(), fallback)
    }

    /// Read a bounded integer. See [`coerce_bounded_int`].
    #[must_use]
    pub fn bounded_int(&self, keys: &[&str], options: &BoundsOptions) -> i64 {
        let found = self.lookup(keys);
        trace_fallback(keys, &found, found.parsed_int().is_none());
        coerce_bounded_int(found.raw(), options)
    }

    /// Read a plain string, treating `""` as unset.
    #[must_use]
    pub fn string(&self, keys: &[&str]) -> Option<String> {
        let found = self.lookup(keys);
        trace_fallback(keys, &found, found.raw().is_none_or(str::is_empty));
        found.raw.filter(|s| !s.is_empty())
    }
}

fn trace_fallback(keys: &[&str], found: &Lookup<'_>, used_fallback: bool) {
    let primary = keys.first().copied().unwrap_or_default();
    match found.key() {
        Some(key) if used_fallback => {
            debug!(key, primary, "env value not usable; using fallback");
        },
        Some(key) => debug!(key, primary, "env value applied"),
        None => debug!(primary, "env value unset; using fallback"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vexil_test::env_map;

    #[test]
    fn test_first_set_alias_wins() {
        let env = env_map(&[("HTTP_PORT", "9000"), ("PORT", "9001")]);
        let reader = EnvReader::new(&env);
        assert_eq!(reader.int(&["VEXIL_PORT", "HTTP_PORT", "PORT"], 4242), 9000);
        assert_eq!(
            reader.lookup(&["VEXIL_PORT", "HTTP_PORT", "PORT"]).key(),
            Some("HTTP_PORT")
        );
    }

    #[test]
    fn test_empty_primary_shadows_alias() {
        let env = env_map(&[("VEXIL_CORS_ORIGINS", ""), ("CORS_ORIGIN", "https://a")]);
        let reader = EnvReader::new(&env);
        let origins = reader.string_list(&["VEXIL_CORS_ORIGINS", "CORS_ORIGIN"], vec!["*".into()]);
        assert!(origins.is_empty());
    }

    #[test]
    fn test_unset_uses_fallback() {
        let env = env_map(&[]);
        let reader = EnvReader::new(&env);
        assert_eq!(reader.int(&["X"], 3), 3);
        assert!(reader.bool(&["X"], true));
        assert_eq!(reader.string_list(&["X"], vec!["d".into()]), vec!["d".to_owned()]);
        assert_eq!(reader.string(&["X"]), None);
        assert_eq!(reader.bounded_int(&["X"], &BoundsOptions::new(5).with_min(8)), 8);
    }

    #[test]
    fn test_typed_reads() {
        let env = env_map(&[
            ("N", "12ms"),
            ("B", "yes"),
            ("L", "a,,b"),
            ("S", "public"),
            ("E", ""),
        ]);
        let reader = EnvReader::new(&env);
        assert_eq!(reader.int(&["N"], 0), 12);
        assert!(!reader.bool(&["B"], true));
        assert_eq!(reader.string_list(&["L"], Vec::new()), vec!["a", "b"]);
        assert_eq!(reader.string(&["S"]).as_deref(), Some("public"));
        assert_eq!(reader.string(&["E"]), None);
    }

    #[test]
    fn test_lookup_parsed_views() {
        let env = env_map(&[("N", "abc"), ("B", ""), ("L", "")]);
        let reader = EnvReader::new(&env);
        assert_eq!(reader.lookup(&["N"]).parsed_int(), None);
        assert_eq!(reader.lookup(&["B"]).parsed_bool(), None);
        assert_eq!(reader.lookup(&["L"]).parsed_list(), Some(Vec::new()));
        assert_eq!(reader.lookup(&["missing"]).parsed_list(), None);
    }

    #[test]
    fn test_reads_log_without_panicking() {
        vexil_test::setup_test_logging("debug");
        let env = env_map(&[("N", "x")]);
        let reader = EnvReader::new(&env);
        assert_eq!(reader.int(&["N"], 1), 1);
        assert_eq!(reader.int(&[], 2), 2);
    }
}
