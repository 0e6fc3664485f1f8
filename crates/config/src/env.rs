//! Environment variable sources.
//!
//! Responsibilities:
//! - Abstract reading environment variables behind the `Environment` trait.
//! - Merge a dotenv file into a source, honoring the override flag.
//!
//! Does NOT handle:
//! - Parsing dotenv syntax (delegated to `dotenvy`).
//! - Casting raw values (see `param`).
//!
//! Invariants:
//! - With `override_existing == false`, a key already present in the source
//!   keeps its value and the file's entry for that key is ignored.
//! - `MapEnv` never writes to the process environment. Its dotenv merge still
//!   reads it: `dotenvy` resolves `${VAR}` references in the file against the
//!   process environment first, then against earlier entries of the same file,
//!   and never against the map itself.
//! - A value that is set but not valid unicode is reported as
//!   `VarError::NotUnicode`, never as unset.

use std::collections::HashMap;
use std::env::VarError;
use std::path::Path;

/// A source of environment variables that fields are resolved against.
pub trait Environment {
    /// Get a variable's raw value, with the same error cases as [`std::env::var`].
    fn var(&self, key: &str) -> Result<String, VarError>;

    /// Merge the `KEY=VALUE` entries of a dotenv file into this source.
    fn apply_dotenv(&mut self, path: &Path, override_existing: bool)
    -> Result<(), dotenvy::Error>;
}

/// The process-wide environment table.
///
/// Dotenv merging writes into global process state. Constructing two
/// configs against `ProcessEnv` from different threads at the same time is
/// not supported; callers must synchronize around construction themselves.
/// Prefer [`MapEnv`] when that matters (tests in particular).
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl Environment for ProcessEnv {
    fn var(&self, key: &str) -> Result<String, VarError> {
        std::env::var(key)
    }

    fn apply_dotenv(
        &mut self,
        path: &Path,
        override_existing: bool,
    ) -> Result<(), dotenvy::Error> {
        if override_existing {
            dotenvy::from_path_override(path)
        } else {
            dotenvy::from_path(path)
        }
    }
}

/// An owned, injected set of environment variables.
///
/// Dotenv files merged into a `MapEnv` are parsed by `dotenvy`, which expands
/// `${VAR}` from the process environment and earlier lines of the file. Keys
/// that only exist in the map are not visible to that expansion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current process environment.
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.vars.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl Environment for MapEnv {
    fn var(&self, key: &str) -> Result<String, VarError> {
        self.vars.get(key).cloned().ok_or(VarError::NotPresent)
    }

    fn apply_dotenv(
        &mut self,
        path: &Path,
        override_existing: bool,
    ) -> Result<(), dotenvy::Error> {
        for item in dotenvy::from_path_iter(path)? {
            let (key, value) = item?;
            if override_existing || !self.vars.contains_key(&key) {
                self.vars.insert(key, value);
            }
        }
        Ok(())
    }
}
