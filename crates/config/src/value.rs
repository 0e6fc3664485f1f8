//! Resolved field values and typed extraction.

use std::path::PathBuf;

use chrono::{DateTime, FixedOffset, TimeDelta};
use serde::{Serialize, Serializer};

use crate::config::Config;
use crate::param::ParamType;

/// A member of a caller-supplied enum, by its serialized name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub type_name: &'static str,
    pub variant: String,
}

/// The typed value of one resolved field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Enum(EnumValue),
    Datetime(DateTime<FixedOffset>),
    Timedelta(TimeDelta),
    Path(PathBuf),
    Nested(Config),
}

impl Value {
    pub fn param_type(&self) -> ParamType {
        match self {
            Value::Str(_) => ParamType::Str,
            Value::Int(_) => ParamType::Int,
            Value::Float(_) => ParamType::Float,
            Value::Bool(_) => ParamType::Bool,
            Value::Enum(_) => ParamType::Enum,
            Value::Datetime(_) => ParamType::Datetime,
            Value::Timedelta(_) => ParamType::Timedelta,
            Value::Path(_) => ParamType::Path,
            Value::Nested(_) => ParamType::Nested,
        }
    }
}

/// Datetimes serialize as RFC 3339, timedeltas as fractional seconds and
/// enum members as their serialized name.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Str(s) => serializer.serialize_str(s),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Enum(member) => serializer.serialize_str(&member.variant),
            Value::Datetime(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            Value::Timedelta(td) => {
                let secs = td.num_seconds() as f64 + f64::from(td.subsec_nanos()) / 1e9;
                serializer.serialize_f64(secs)
            }
            Value::Path(path) => serializer.serialize_str(&path.to_string_lossy()),
            Value::Nested(config) => config.serialize(serializer),
        }
    }
}

/// Rust types a resolved [`Value`] can be read back as.
pub trait FromValue: Sized {
    /// Human-readable type name used in mismatch errors.
    const EXPECTED: &'static str;

    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for String {
    const EXPECTED: &'static str = "String";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Str(s) => Some(s.clone()),
            Value::Enum(member) => Some(member.variant.clone()),
            _ => None,
        }
    }
}

macro_rules! int_from_value {
    ($($ty:ty),*) => {
        $(
            impl FromValue for $ty {
                const EXPECTED: &'static str = stringify!($ty);

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::Int(n) => <$ty>::try_from(*n).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

int_from_value!(i64, i32, u16, u32, u64, usize);

impl FromValue for f64 {
    const EXPECTED: &'static str = "f64";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }
}

impl FromValue for bool {
    const EXPECTED: &'static str = "bool";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl FromValue for PathBuf {
    const EXPECTED: &'static str = "PathBuf";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Path(path) => Some(path.clone()),
            _ => None,
        }
    }
}

impl FromValue for DateTime<FixedOffset> {
    const EXPECTED: &'static str = "DateTime<FixedOffset>";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Datetime(dt) => Some(*dt),
            _ => None,
        }
    }
}

impl FromValue for TimeDelta {
    const EXPECTED: &'static str = "TimeDelta";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Timedelta(td) => Some(*td),
            _ => None,
        }
    }
}

impl FromValue for Config {
    const EXPECTED: &'static str = "Config";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Nested(config) => Some(config.clone()),
            _ => None,
        }
    }
}
