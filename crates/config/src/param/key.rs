//! Environment key derivation shared by every descriptor.
//!
//! Invariants:
//! - An override replaces the derived key entirely; the prefix is then ignored.
//! - A required key that is absent fails with the computed key in the error.
//! - A key holding non-unicode data fails even when optional; it is not unset.

use std::env::VarError;

use crate::env::Environment;
use crate::loader::ConfigError;

/// Name override, prefix and requiredness of one descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeySpec {
    pub(crate) override_key: Option<String>,
    pub(crate) prefix: Option<String>,
    pub(crate) required: bool,
}

impl KeySpec {
    /// Compute the environment key for a field declared as `name`.
    pub fn env_key(&self, name: &str) -> String {
        match (&self.override_key, &self.prefix) {
            (Some(key), _) => key.clone(),
            (None, Some(prefix)) => format!("{prefix}{name}"),
            (None, None) => name.to_string(),
        }
    }

    /// Read the raw value for `key`.
    ///
    /// Returns `Ok(None)` when an optional key is unset; the caller then
    /// falls back to its typed default.
    pub fn lookup(&self, key: &str, env: &dyn Environment) -> Result<Option<String>, ConfigError> {
        match env.var(key) {
            Ok(raw) => Ok(Some(raw)),
            Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode(key.to_string())),
            Err(VarError::NotPresent) if self.required => {
                Err(ConfigError::MissingEnvVar(key.to_string()))
            }
            Err(VarError::NotPresent) => Ok(None),
        }
    }

    pub fn override_key(&self) -> Option<&str> {
        self.override_key.as_deref()
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn is_required(&self) -> bool {
        self.required
    }
}

/// Adds the shared key builder methods to a descriptor struct with a `key: KeySpec` field.
macro_rules! key_builders {
    ($ty:ty) => {
        impl $ty {
            /// Read this exact variable instead of deriving one from the field name.
            pub fn with_override(mut self, key: impl Into<String>) -> Self {
                self.key.override_key = Some(key.into());
                self
            }

            /// Prepend `prefix` to the field name when no override is set.
            pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
                self.key.prefix = Some(prefix.into());
                self
            }

            /// Fail resolution instead of falling back to the default.
            pub fn required(mut self) -> Self {
                self.key.required = true;
                self
            }

            pub fn key_spec(&self) -> &$crate::param::KeySpec {
                &self.key
            }
        }
    };
}

pub(crate) use key_builders;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnv;

    fn spec(override_key: Option<&str>, prefix: Option<&str>, required: bool) -> KeySpec {
        KeySpec {
            override_key: override_key.map(String::from),
            prefix: prefix.map(String::from),
            required,
        }
    }

    #[test]
    fn test_env_key_plain_name() {
        assert_eq!(spec(None, None, false).env_key("HOST"), "HOST");
    }

    #[test]
    fn test_env_key_prefix() {
        assert_eq!(spec(None, Some("MY_APP_"), false).env_key("SERVICE"), "MY_APP_SERVICE");
    }

    #[test]
    fn test_env_key_override_beats_prefix() {
        assert_eq!(
            spec(Some("THIS_ONE"), Some("MY_APP_"), false).env_key("HOST"),
            "THIS_ONE"
        );
    }

    #[test]
    fn test_lookup_required_missing_reports_computed_key() {
        let env = MapEnv::new();
        let key = spec(None, Some("MY_FIRST_"), true).env_key("APP");
        let err = spec(None, Some("MY_FIRST_"), true)
            .lookup(&key, &env)
            .unwrap_err();

        assert!(matches!(err, ConfigError::MissingEnvVar(ref k) if k == "MY_FIRST_APP"));
        assert!(err.to_string().contains("MY_FIRST_APP"));
    }

    #[test]
    fn test_lookup_optional_missing_is_none() {
        let env = MapEnv::new();
        assert!(spec(None, None, false).lookup("HOST", &env).unwrap().is_none());
    }

    #[test]
    fn test_lookup_empty_value_is_present() {
        let env = MapEnv::new().with("HOST", "");
        assert_eq!(
            spec(None, None, true).lookup("HOST", &env).unwrap().as_deref(),
            Some("")
        );
    }
}
