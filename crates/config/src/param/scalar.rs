//! Descriptors for single-value types: string, integer, float, boolean and path.

use std::path::PathBuf;

use super::key::{KeySpec, key_builders};
use super::{ParamType, Resolve};
use crate::constants::TRUTHY_VALUES;
use crate::env::Environment;
use crate::loader::ConfigError;
use crate::value::Value;

/// Cast a raw value to a boolean.
///
/// Case-insensitive membership in `true`, `1`, `t`, `y`, `yes`. Anything
/// else, including `false` and unrecognized text, is `false`.
pub fn boolean(raw: &str) -> bool {
    TRUTHY_VALUES
        .iter()
        .any(|truthy| raw.eq_ignore_ascii_case(truthy))
}

fn cast_str(_field: &str, raw: &str) -> Result<String, ConfigError> {
    Ok(raw.to_string())
}

fn cast_int(field: &str, raw: &str) -> Result<i64, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|e| ConfigError::invalid(field, ParamType::Int, e))
}

fn cast_float(field: &str, raw: &str) -> Result<f64, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|e| ConfigError::invalid(field, ParamType::Float, e))
}

fn cast_bool(_field: &str, raw: &str) -> Result<bool, ConfigError> {
    Ok(boolean(raw))
}

fn cast_path(_field: &str, raw: &str) -> Result<PathBuf, ConfigError> {
    Ok(PathBuf::from(raw))
}

macro_rules! scalar_param {
    ($(#[$meta:meta])* $name:ident, $value:ty, $variant:ident, $cast:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default)]
        pub struct $name {
            key: KeySpec,
            default: Option<$value>,
        }

        impl $name {
            pub fn new() -> Self {
                Self::default()
            }

            /// Value used when the variable is unset. Returned as-is, never cast.
            pub fn with_default(mut self, value: impl Into<$value>) -> Self {
                self.default = Some(value.into());
                self
            }

            pub fn default_value(&self) -> Option<&$value> {
                self.default.as_ref()
            }
        }

        key_builders!($name);

        impl Resolve for $name {
            fn resolve(
                &self,
                name: &str,
                env: &dyn Environment,
            ) -> Result<Option<Value>, ConfigError> {
                let key = self.key.env_key(name);
                match self.key.lookup(&key, env)? {
                    Some(raw) => $cast(name, &raw).map(|v| Some(Value::$variant(v))),
                    None => Ok(self.default.clone().map(Value::$variant)),
                }
            }
        }
    };
}

scalar_param!(
    /// A string field. The raw value is used unchanged.
    Str,
    String,
    Str,
    cast_str
);

scalar_param!(
    /// A signed integer field.
    Int,
    i64,
    Int,
    cast_int
);

scalar_param!(
    /// A floating point field.
    Float,
    f64,
    Float,
    cast_float
);

scalar_param!(
    /// A boolean field, see [`boolean`] for the accepted spellings of `true`.
    Bool,
    bool,
    Bool,
    cast_bool
);

scalar_param!(
    /// A filesystem path field. The path is not checked for existence.
    PathParam,
    PathBuf,
    Path,
    cast_path
);
