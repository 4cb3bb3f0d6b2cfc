//! Raw value sources.
//!
//! A source answers one question: what string, if any, is bound to a key.
//! Values that are not valid Unicode count as unset.

use std::collections::{BTreeMap, HashMap};
use std::ffi::OsString;
use std::hash::BuildHasher;

/// Something that maps variable names to raw string values.
pub trait EnvSource {
    /// Return the raw value for `key`, or `None` when it is not set.
    fn get(&self, key: &str) -> Option<String>;
}

/// The live process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var_os(key).and_then(os_to_string)
    }
}

impl<S: BuildHasher> EnvSource for HashMap<String, String, S> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}

impl<T: EnvSource + ?Sized> EnvSource for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// Snapshot the process environment into a map, skipping non-Unicode entries.
#[must_use]
pub fn collect_env_vars() -> HashMap<String, String> {
    std::env::vars_os()
        .filter_map(|(k, v)| Some((os_to_string(k)?, os_to_string(v)?)))
        .collect()
}

/// Non-Unicode values count as unset.
fn os_to_string(value: OsString) -> Option<String> {
    value.into_string().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashmap_source() {
        let env = vexil_test::env_map(&[("VEXIL_PORT", "8080"), ("EMPTY", "")]);
        assert_eq!(EnvSource::get(&env, "VEXIL_PORT").as_deref(), Some("8080"));
        assert_eq!(EnvSource::get(&env, "EMPTY").as_deref(), Some(""));
        assert_eq!(EnvSource::get(&env, "MISSING"), None);
    }

    #[test]
    fn test_btreemap_source() {
        let env: BTreeMap<String, String> = [("A".to_owned(), "1".to_owned())].into();
        assert_eq!(EnvSource::get(&env, "A").as_deref(), Some("1"));
    }

    #[test]
    fn test_reference_forwards() {
        let env = vexil_test::env_map(&[("A", "x")]);
        let by_ref = &env;
        assert_eq!(EnvSource::get(&by_ref, "A").as_deref(), Some("x"));
    }

    #[test]
    fn test_process_env_missing_key() {
        assert_eq!(
            ProcessEnv.get("VEXIL_TEST_SURELY_UNSET_7F3A9C1B"),
            None
        );
    }

    #[test]
    fn test_collect_env_vars_matches_process() {
        let snapshot = collect_env_vars();
        for (key, value) in snapshot.iter().take(5) {
            assert_eq!(ProcessEnv.get(key).as_ref(), Some(value));
        }
    }

    #[test]
    fn test_os_to_string_unicode() {
        assert_eq!(os_to_string(OsString::from("8080")).as_deref(), Some("8080"));
        assert_eq!(os_to_string(OsString::new()).as_deref(), Some(""));
    }

    #[cfg(unix)]
    #[test]
    fn test_os_to_string_rejects_invalid_utf8() {
        use std::os::unix::ffi::OsStringExt;

        let garbled = OsString::from_vec(vec![0x66, 0x6f, 0x80]);
        assert_eq!(os_to_string(garbled), None);
    }
}
