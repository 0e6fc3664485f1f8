//! Parameter descriptors.
//!
//! Responsibilities:
//! - Describe how one configuration field is located in the environment and cast.
//! - Provide one `Resolve` implementation per field type, wrapped in the `Param` enum.
//!
//! Does NOT handle:
//! - Collecting fields into a config (see `schema` and `config`).
//! - Loading dotenv files (see `loader`).
//!
//! Invariants:
//! - Lookup key: override if set, else `prefix + name` if a prefix is set, else `name`.
//! - Required fields never fall back to a default.
//! - Defaults are already typed and are returned without casting.
//! - Descriptors are immutable once declared and may be shared between schemas.

mod datetime;
mod enumeration;
mod key;
mod nested;
mod scalar;
mod timedelta;

use std::fmt;

use crate::env::Environment;
use crate::loader::ConfigError;
use crate::value::Value;

pub use datetime::{Datetime, DatetimeDefault, parse_datetime};
pub use enumeration::Enum;
pub use key::KeySpec;
pub use nested::Nested;
pub use scalar::{Bool, Float, Int, PathParam, Str, boolean};
pub use timedelta::{Count, TimeUnit, Timedelta, TimedeltaDefault};

/// Resolve a field declared as `name` to its typed value.
///
/// `Ok(None)` means the field is optional, unset and has no default.
pub trait Resolve {
    fn resolve(&self, name: &str, env: &dyn Environment) -> Result<Option<Value>, ConfigError>;
}

/// The type category of a descriptor or a resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    Str,
    Int,
    Float,
    Bool,
    Enum,
    Datetime,
    Timedelta,
    Path,
    Nested,
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParamType::Str => "Str",
            ParamType::Int => "Int",
            ParamType::Float => "Float",
            ParamType::Bool => "Bool",
            ParamType::Enum => "Enum",
            ParamType::Datetime => "Datetime",
            ParamType::Timedelta => "Timedelta",
            ParamType::Path => "Path",
            ParamType::Nested => "Nested",
        };
        f.write_str(name)
    }
}

/// A declared configuration field.
#[derive(Debug, Clone)]
pub enum Param {
    Str(Str),
    Int(Int),
    Float(Float),
    Bool(Bool),
    Enum(Enum),
    Datetime(Datetime),
    Timedelta(Timedelta),
    Path(PathParam),
    Nested(Nested),
}

impl Param {
    pub fn param_type(&self) -> ParamType {
        match self {
            Param::Str(_) => ParamType::Str,
            Param::Int(_) => ParamType::Int,
            Param::Float(_) => ParamType::Float,
            Param::Bool(_) => ParamType::Bool,
            Param::Enum(_) => ParamType::Enum,
            Param::Datetime(_) => ParamType::Datetime,
            Param::Timedelta(_) => ParamType::Timedelta,
            Param::Path(_) => ParamType::Path,
            Param::Nested(_) => ParamType::Nested,
        }
    }

    /// The environment key this field reads. Nested fields read none.
    pub fn env_key(&self, name: &str) -> Option<String> {
        let key = match self {
            Param::Str(p) => p.key_spec(),
            Param::Int(p) => p.key_spec(),
            Param::Float(p) => p.key_spec(),
            Param::Bool(p) => p.key_spec(),
            Param::Enum(p) => p.key_spec(),
            Param::Datetime(p) => p.key_spec(),
            Param::Timedelta(p) => p.key_spec(),
            Param::Path(p) => p.key_spec(),
            Param::Nested(_) => return None,
        };
        Some(key.env_key(name))
    }

    fn inner(&self) -> &dyn Resolve {
        match self {
            Param::Str(p) => p,
            Param::Int(p) => p,
            Param::Float(p) => p,
            Param::Bool(p) => p,
            Param::Enum(p) => p,
            Param::Datetime(p) => p,
            Param::Timedelta(p) => p,
            Param::Path(p) => p,
            Param::Nested(p) => p,
        }
    }
}

impl Resolve for Param {
    fn resolve(&self, name: &str, env: &dyn Environment) -> Result<Option<Value>, ConfigError> {
        self.inner().resolve(name, env)
    }
}

/// Descriptors compare by type category only.
impl PartialEq for Param {
    fn eq(&self, other: &Self) -> bool {
        self.param_type() == other.param_type()
    }
}

impl PartialEq<ParamType> for Param {
    fn eq(&self, other: &ParamType) -> bool {
        self.param_type() == *other
    }
}

macro_rules! param_from {
    ($($ty:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Param {
                fn from(param: $ty) -> Self {
                    Param::$variant(param)
                }
            }
        )*
    };
}

param_from!(
    Str => Str,
    Int => Int,
    Float => Float,
    Bool => Bool,
    Enum => Enum,
    Datetime => Datetime,
    Timedelta => Timedelta,
    PathParam => Path,
    Nested => Nested,
);
