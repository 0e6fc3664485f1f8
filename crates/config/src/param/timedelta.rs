//! Timedelta descriptor.
//!
//! The duration unit comes from the last `_`-delimited segment of the
//! declared field name: a field named `CACHE_TTL_MINUTES` holding `5` is five
//! minutes. The raw value is an integer or, failing that, a float; fractional
//! counts are rounded to the microsecond.

use chrono::TimeDelta;
use strum::{AsRefStr, EnumString};

use super::key::{KeySpec, key_builders};
use super::{ParamType, Resolve};
use crate::env::Environment;
use crate::loader::ConfigError;
use crate::value::Value;

/// Unit named by the trailing segment of a timedelta field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TimeUnit {
    Weeks,
    Days,
    Hours,
    Minutes,
    Seconds,
    Milliseconds,
    Microseconds,
}

impl TimeUnit {
    /// Infer the unit from a declared field name, e.g. `RETENTION_DAYS`.
    pub fn from_field_name(name: &str) -> Option<Self> {
        name.rsplit('_').next().and_then(|segment| segment.parse().ok())
    }

    fn micros(self) -> i64 {
        match self {
            TimeUnit::Weeks => 7 * 24 * 3_600_000_000,
            TimeUnit::Days => 24 * 3_600_000_000,
            TimeUnit::Hours => 3_600_000_000,
            TimeUnit::Minutes => 60_000_000,
            TimeUnit::Seconds => 1_000_000,
            TimeUnit::Milliseconds => 1_000,
            TimeUnit::Microseconds => 1,
        }
    }
}

/// A count of units, as read from the environment or a numeric default.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Count {
    Int(i64),
    Float(f64),
}

impl Count {
    fn parse(field: &str, raw: &str) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        if let Ok(n) = raw.parse::<i64>() {
            return Ok(Count::Int(n));
        }
        raw.parse::<f64>()
            .map(Count::Float)
            .map_err(|e| ConfigError::invalid(field, ParamType::Timedelta, e))
    }

    fn to_duration(self, field: &str, unit: TimeUnit) -> Result<TimeDelta, ConfigError> {
        let micros = match self {
            Count::Int(n) => n.checked_mul(unit.micros()),
            Count::Float(f) => {
                let micros = (f * unit.micros() as f64).round();
                (micros.is_finite() && micros.abs() < i64::MAX as f64).then_some(micros as i64)
            }
        };
        micros.map(TimeDelta::microseconds).ok_or_else(|| {
            ConfigError::invalid(
                field,
                ParamType::Timedelta,
                format!("{self:?} {} is out of range", unit.as_ref()),
            )
        })
    }
}

/// Fallback for a timedelta field whose variable is unset.
#[derive(Debug, Clone, PartialEq)]
pub enum TimedeltaDefault {
    /// Returned unchanged, whatever unit the field name carries.
    Duration(TimeDelta),
    /// Interpreted in the unit named by the field.
    Count(Count),
}

#[derive(Debug, Clone, Default)]
pub struct Timedelta {
    key: KeySpec,
    default: Option<TimedeltaDefault>,
}

impl Timedelta {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default(mut self, value: TimeDelta) -> Self {
        self.default = Some(TimedeltaDefault::Duration(value));
        self
    }

    /// A plain number of whatever unit the field name carries.
    pub fn with_default_count(mut self, count: impl Into<f64>) -> Self {
        self.default = Some(TimedeltaDefault::Count(Count::Float(count.into())));
        self
    }
}

key_builders!(Timedelta);

impl Resolve for Timedelta {
    fn resolve(&self, name: &str, env: &dyn Environment) -> Result<Option<Value>, ConfigError> {
        let key = self.key.env_key(name);
        let count = match (self.key.lookup(&key, env)?, &self.default) {
            (Some(raw), _) => Count::parse(name, &raw)?,
            (None, Some(TimedeltaDefault::Duration(value))) => {
                return Ok(Some(Value::Timedelta(*value)));
            }
            (None, Some(TimedeltaDefault::Count(count))) => *count,
            (None, None) => return Ok(None),
        };

        let unit = TimeUnit::from_field_name(name).ok_or_else(|| {
            ConfigError::invalid(
                name,
                ParamType::Timedelta,
                format!("no duration unit in field name '{name}'"),
            )
        })?;
        count
            .to_duration(name, unit)
            .map(|value| Some(Value::Timedelta(value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MapEnv;

    fn resolve(param: &Timedelta, name: &str, env: &MapEnv) -> Option<TimeDelta> {
        match param.resolve(name, env).unwrap() {
            Some(Value::Timedelta(value)) => Some(value),
            None => None,
            other => panic!("expected a timedelta, got {other:?}"),
        }
    }

    #[test]
    fn test_unit_from_field_name() {
        assert_eq!(TimeUnit::from_field_name("TIMEDELTA_DAYS"), Some(TimeUnit::Days));
        assert_eq!(TimeUnit::from_field_name("HOURS"), Some(TimeUnit::Hours));
        assert_eq!(
            TimeUnit::from_field_name("poll_interval_milliseconds"),
            Some(TimeUnit::Milliseconds)
        );
        assert_eq!(TimeUnit::from_field_name("TIMEOUT"), None);
    }

    #[test]
    fn test_timedelta() {
        let env = MapEnv::new().with("TIMEDELTA_DAYS", "1");
        let value = resolve(&Timedelta::new(), "TIMEDELTA_DAYS", &env).unwrap();
        assert_eq!(value.num_seconds(), 86400);
    }

    #[test]
    fn test_timedelta_float_value() {
        let env = MapEnv::new().with("BACKOFF_SECONDS", "1.5");
        let value = resolve(&Timedelta::new(), "BACKOFF_SECONDS", &env).unwrap();
        assert_eq!(value.num_milliseconds(), 1500);
    }

    #[test]
    fn test_timedelta_default_int() {
        let param = Timedelta::new().with_default_count(7);
        let value = resolve(&param, "TIMEDELTA_NOT_DEFINED_HOURS", &MapEnv::new()).unwrap();
        assert_eq!(value.num_seconds(), 7 * 3600);
    }

    #[test]
    fn test_timedelta_default_float() {
        let param = Timedelta::new().with_default_count(7.0);
        let value = resolve(&param, "TIMEDELTA_NOT_DEFINED_MINUTES", &MapEnv::new()).unwrap();
        assert_eq!(value.num_seconds(), 7 * 60);
    }

    #[test]
    fn test_timedelta_default_timedelta_ignores_unit() {
        let param = Timedelta::new().with_default(TimeDelta::seconds(30));
        let value = resolve(&param, "TIMEDELTA_NOT_DEFINED_HOURS", &MapEnv::new()).unwrap();
        assert_eq!(value.num_seconds(), 30);
    }

    #[test]
    fn test_timedelta_no_default_is_absent() {
        assert!(resolve(&Timedelta::new(), "TTL_SECONDS", &MapEnv::new()).is_none());
    }

    #[test]
    fn test_timedelta_unit_uses_declared_name_not_override() {
        let env = MapEnv::new().with("LEGACY_TTL", "2");
        let param = Timedelta::new().with_override("LEGACY_TTL");
        let value = resolve(&param, "CACHE_TTL_MINUTES", &env).unwrap();
        assert_eq!(value.num_seconds(), 120);
    }

    #[test]
    fn test_timedelta_unknown_unit_is_error() {
        let env = MapEnv::new().with("TIMEOUT", "5");
        let err = Timedelta::new().resolve("TIMEOUT", &env).unwrap_err();
        assert!(err.to_string().contains("no duration unit"));
    }

    #[test]
    fn test_timedelta_non_numeric_is_error() {
        let env = MapEnv::new().with("TTL_SECONDS", "soon");
        let err = Timedelta::new().resolve("TTL_SECONDS", &env).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                expected: ParamType::Timedelta,
                ..
            }
        ));
    }

    #[test]
    fn test_timedelta_weeks_and_microseconds() {
        let env = MapEnv::new()
            .with("RETENTION_WEEKS", "2")
            .with("JITTER_MICROSECONDS", "250");

        let weeks = resolve(&Timedelta::new(), "RETENTION_WEEKS", &env).unwrap();
        assert_eq!(weeks, TimeDelta::weeks(2));
        let micros = resolve(&Timedelta::new(), "JITTER_MICROSECONDS", &env).unwrap();
        assert_eq!(micros, TimeDelta::microseconds(250));
    }

    #[test]
    fn test_timedelta_out_of_range_is_error() {
        let env = MapEnv::new()
            .with("RETENTION_WEEKS", i64::MAX.to_string())
            .with("HUGE_DAYS", "1e300");

        for name in ["RETENTION_WEEKS", "HUGE_DAYS"] {
            let err = Timedelta::new().resolve(name, &env).unwrap_err();
            assert!(
                matches!(
                    err,
                    ConfigError::InvalidValue {
                        expected: ParamType::Timedelta,
                        ..
                    }
                ),
                "{name}: {err}"
            );
            assert!(err.to_string().contains("out of range"), "{name}: {err}");
        }
    }
}
