//! Explicit field registration for configuration types.
//!
//! Responsibilities:
//! - Collect `(name, Param)` pairs declared for one configuration type.
//! - Merge inherited schemas into the effective field set.
//! - Define the `EnvConfig` trait for typed configuration structs.
//!
//! Invariants:
//! - Fields declared on a schema shadow same-named inherited fields.
//! - Between two parents, the one inherited first wins.
//! - Re-declaring a field on the same schema replaces the earlier declaration.

use std::path::Path;

use crate::config::Config;
use crate::env::Environment;
use crate::loader::{ConfigError, ConfigLoader};
use crate::param::Param;

/// The declared fields of one configuration type.
#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    parents: Vec<Schema>,
    fields: Vec<(String, Param)>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parents: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Inherit every field of `parent` that this schema does not redeclare.
    pub fn inherit(mut self, parent: Schema) -> Self {
        self.parents.push(parent);
        self
    }

    /// Declare a field.
    pub fn field(mut self, name: impl Into<String>, param: impl Into<Param>) -> Self {
        let name = name.into();
        let param = param.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = param,
            None => self.fields.push((name, param)),
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parents(&self) -> &[Schema] {
        &self.parents
    }

    /// Fields declared directly on this schema.
    pub fn own_fields(&self) -> impl Iterator<Item = (&str, &Param)> {
        self.fields.iter().map(|(name, param)| (name.as_str(), param))
    }

    /// The effective fields, inherited ones included.
    pub fn fields(&self) -> Vec<(&str, &Param)> {
        let mut merged: Vec<(&str, &Param)> = Vec::new();
        for parent in self.parents.iter().rev() {
            for (name, param) in parent.fields() {
                upsert(&mut merged, name, param);
            }
        }
        for (name, param) in self.own_fields() {
            upsert(&mut merged, name, param);
        }
        merged
    }

    /// Look up the effective descriptor for `name`.
    pub fn get(&self, name: &str) -> Option<&Param> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, param)| param)
            .or_else(|| self.parents.iter().find_map(|parent| parent.get(name)))
    }
}

fn upsert<'a>(merged: &mut Vec<(&'a str, &'a Param)>, name: &'a str, param: &'a Param) {
    match merged.iter_mut().find(|(existing, _)| *existing == name) {
        Some(slot) => slot.1 = param,
        None => merged.push((name, param)),
    }
}

/// A typed configuration struct backed by a [`Schema`].
///
/// `from_config` copies resolved values into plain struct fields, which is
/// what gives attribute-style access (`config.host`) on top of the
/// key-style access [`Config`] offers.
pub trait EnvConfig: Sized {
    fn schema() -> Schema;

    fn from_config(config: &Config) -> Result<Self, ConfigError>;

    /// Load from the process environment.
    fn from_env() -> Result<Self, ConfigError> {
        Self::from_loader(ConfigLoader::new(Self::schema()))
    }

    /// Merge a dotenv file into the process environment, then load.
    fn from_env_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_loader(ConfigLoader::new(Self::schema()).with_env_file(path))
    }

    fn from_loader<E: Environment>(loader: ConfigLoader<E>) -> Result<Self, ConfigError> {
        Self::from_config(&loader.load()?)
    }
}
