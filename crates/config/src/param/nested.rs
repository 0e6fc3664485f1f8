//! Nested config descriptor: a field whose value is a whole config of another schema.

use super::Resolve;
use super::key::KeySpec;
use crate::config::Config;
use crate::env::Environment;
use crate::loader::ConfigError;
use crate::schema::{EnvConfig, Schema};
use crate::value::Value;

/// Resolves by loading another schema against the same environment.
///
/// The declared field name plays no part in the lookup. When the nested
/// config fails to load, an optional descriptor logs the failure and falls
/// back to its default (or absence); a `required()` one propagates it.
#[derive(Debug, Clone)]
pub struct Nested {
    key: KeySpec,
    schema: fn() -> Schema,
    default: Option<Box<Config>>,
}

impl Nested {
    pub fn of<T: EnvConfig>() -> Self {
        Self::from_schema(T::schema)
    }

    pub fn from_schema(schema: fn() -> Schema) -> Self {
        Self {
            key: KeySpec::default(),
            schema,
            default: None,
        }
    }

    pub fn with_default(mut self, config: Config) -> Self {
        self.default = Some(Box::new(config));
        self
    }

    /// Propagate nested load failures instead of falling back.
    pub fn required(mut self) -> Self {
        self.key.required = true;
        self
    }

    pub fn is_required(&self) -> bool {
        self.key.required
    }

    pub fn schema(&self) -> Schema {
        (self.schema)()
    }
}

impl Resolve for Nested {
    fn resolve(&self, name: &str, env: &dyn Environment) -> Result<Option<Value>, ConfigError> {
        let schema = self.schema();
        match Config::resolve(&schema, env) {
            Ok(config) => Ok(Some(Value::Nested(config))),
            Err(e) if self.key.required => Err(e),
            Err(e) => {
                tracing::warn!(
                    field = name,
                    config = schema.name(),
                    error = %e,
                    "Nested config failed to load, using default"
                );
                Ok(self.default.as_deref().cloned().map(Value::Nested))
            }
        }
    }
}
