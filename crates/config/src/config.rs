//! The resolved configuration container.
//!
//! Responsibilities:
//! - Resolve every effective field of a schema against an environment.
//! - Offer key-style lookup and typed extraction of resolved values.
//!
//! Does NOT handle:
//! - Dotenv loading (see `loader`).
//!
//! Invariants:
//! - Fields that resolve to nothing are dropped: they get no value and their
//!   descriptor is removed from `fields()`. Falsy values (0, "", false) are kept.
//! - Resolution is all-or-nothing; the first error aborts construction.
//! - Equality compares the schema name and resolved values, not descriptors.

use std::collections::BTreeMap;
use std::ops::Index;
use std::path::Path;
use std::str::FromStr;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::env::Environment;
use crate::loader::{ConfigError, ConfigLoader};
use crate::param::{Param, ParamType, Resolve};
use crate::schema::Schema;
use crate::value::{FromValue, Value};

#[derive(Debug, Clone)]
pub struct Config {
    name: String,
    fields: Vec<(String, Param)>,
    values: BTreeMap<String, Value>,
}

impl Config {
    /// Load `schema` from the process environment.
    pub fn load(schema: Schema) -> Result<Self, ConfigError> {
        ConfigLoader::new(schema).load()
    }

    /// Merge a dotenv file into the process environment, then load `schema`.
    pub fn from_env_file(schema: Schema, path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        ConfigLoader::new(schema).with_env_file(path).load()
    }

    /// Resolve every field of `schema` against `env`.
    pub fn resolve(schema: &Schema, env: &dyn Environment) -> Result<Self, ConfigError> {
        Self::resolve_with(schema, env, false)
    }

    /// Like [`Config::resolve`], logging each field at `debug` instead of `trace`
    /// when `verbose` is set.
    pub fn resolve_with(
        schema: &Schema,
        env: &dyn Environment,
        verbose: bool,
    ) -> Result<Self, ConfigError> {
        let mut fields = Vec::new();
        let mut values = BTreeMap::new();

        for (name, param) in schema.fields() {
            let resolved = param.resolve(name, env)?;
            log_field(verbose, schema.name(), name, resolved.is_some());
            if let Some(value) = resolved {
                values.insert(name.to_string(), value);
                fields.push((name.to_string(), param.clone()));
            }
        }

        Ok(Self {
            name: schema.name().to_string(),
            fields,
            values,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The descriptors of fields that resolved to a value.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Param)> {
        self.fields.iter().map(|(name, param)| (name.as_str(), param))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.values.contains_key(field)
    }

    pub fn get_opt(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    pub fn get(&self, field: &str) -> Result<&Value, ConfigError> {
        self.values
            .get(field)
            .ok_or_else(|| ConfigError::UnknownField {
                config: self.name.clone(),
                field: field.to_string(),
            })
    }

    /// Read a field back as `T`.
    pub fn get_as<T: FromValue>(&self, field: &str) -> Result<T, ConfigError> {
        let value = self.get(field)?;
        T::from_value(value).ok_or_else(|| ConfigError::TypeMismatch {
            field: field.to_string(),
            expected: T::EXPECTED,
            actual: value.param_type(),
        })
    }

    /// Read an enum field back as the enum type it was declared with.
    pub fn get_enum<T>(&self, field: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.get(field)? {
            Value::Enum(member) => member
                .variant
                .parse()
                .map_err(|e| ConfigError::invalid(field, ParamType::Enum, e)),
            other => Err(ConfigError::TypeMismatch {
                field: field.to_string(),
                expected: std::any::type_name::<T>(),
                actual: other.param_type(),
            }),
        }
    }

    /// Borrow a nested config field.
    pub fn nested(&self, field: &str) -> Result<&Config, ConfigError> {
        match self.get(field)? {
            Value::Nested(config) => Ok(config),
            other => Err(ConfigError::TypeMismatch {
                field: field.to_string(),
                expected: "Config",
                actual: other.param_type(),
            }),
        }
    }

    /// Export resolved values as a JSON object, nested configs as nested objects.
    pub fn to_json(&self) -> Result<serde_json::Value, ConfigError> {
        Ok(serde_json::to_value(self)?)
    }
}

impl PartialEq for Config {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.values == other.values
    }
}

/// Panics if `field` was never resolved; use [`Config::get`] to handle that case.
impl Index<&str> for Config {
    type Output = Value;

    fn index(&self, field: &str) -> &Value {
        match self.values.get(field) {
            Some(value) => value,
            None => panic!("Config '{}' has no field '{}'", self.name, field),
        }
    }
}

impl Serialize for Config {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

fn log_field(verbose: bool, config: &str, field: &str, resolved: bool) {
    match (verbose, resolved) {
        (true, true) => tracing::debug!(config, field, "Resolved field"),
        (true, false) => tracing::debug!(config, field, "Field unset, dropped"),
        (false, true) => tracing::trace!(config, field, "Resolved field"),
        (false, false) => tracing::trace!(config, field, "Field unset, dropped"),
    }
}
