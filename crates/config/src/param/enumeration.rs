//! Enum descriptor: the raw value must name a member of a caller-supplied enum.
//!
//! The enum type is described by its `strum::VariantNames`, so the accepted
//! spellings follow the type's own `#[strum(serialize...)]` attributes.

use strum::VariantNames;

use super::key::{KeySpec, key_builders};
use super::{ParamType, Resolve};
use crate::env::Environment;
use crate::loader::ConfigError;
use crate::value::{EnumValue, Value};

#[derive(Debug, Clone)]
pub struct Enum {
    key: KeySpec,
    type_name: &'static str,
    variants: &'static [&'static str],
    default: Option<String>,
}

impl Enum {
    /// Descriptor for the enum type `T`.
    pub fn of<T: VariantNames>() -> Self {
        Self {
            key: KeySpec::default(),
            type_name: short_type_name::<T>(),
            variants: T::VARIANTS,
            default: None,
        }
    }

    /// Member used when the variable is unset, e.g. `Colour::Red` with `AsRefStr`.
    ///
    /// A default that names no variant fails resolution like a bad raw value.
    pub fn with_default(mut self, member: impl AsRef<str>) -> Self {
        self.default = Some(member.as_ref().to_string());
        self
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn variants(&self) -> &'static [&'static str] {
        self.variants
    }

    fn member(&self, field: &str, variant: &str) -> Result<Value, ConfigError> {
        if !self.variants.contains(&variant) {
            return Err(ConfigError::invalid(
                field,
                ParamType::Enum,
                format!("'{variant}' is not a valid {}", self.type_name),
            ));
        }
        Ok(Value::Enum(EnumValue {
            type_name: self.type_name,
            variant: variant.to_string(),
        }))
    }
}

key_builders!(Enum);

impl Resolve for Enum {
    fn resolve(&self, name: &str, env: &dyn Environment) -> Result<Option<Value>, ConfigError> {
        let key = self.key.env_key(name);
        let variant = match (self.key.lookup(&key, env)?, &self.default) {
            (Some(raw), _) => raw,
            (None, Some(default)) => default.clone(),
            (None, None) => return Ok(None),
        };
        self.member(name, &variant).map(Some)
    }
}

fn short_type_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
