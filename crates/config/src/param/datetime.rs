//! Datetime descriptor.
//!
//! Responsibilities:
//! - Find the parse format in a companion variable (`<KEY>_FORMAT` by default).
//! - Parse the raw value, or a textual default, with that format.
//!
//! Invariants:
//! - Without a companion variable the format is ISO-8601 with offset.
//! - A format with no offset directive yields a timestamp interpreted as UTC.
//! - A typed default is returned unchanged when the variable is unset.

use std::env::VarError;

use chrono::format::ParseErrorKind;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

use super::key::{KeySpec, key_builders};
use super::{ParamType, Resolve};
use crate::constants::{DEFAULT_DATETIME_FORMAT, DEFAULT_FORMAT_SUFFIX};
use crate::env::Environment;
use crate::loader::ConfigError;
use crate::value::Value;

/// Fallback for a datetime field whose variable is unset.
#[derive(Debug, Clone, PartialEq)]
pub enum DatetimeDefault {
    /// Parsed with the field's format, like a raw value would be.
    Text(String),
    /// Returned unchanged.
    Value(DateTime<FixedOffset>),
}

#[derive(Debug, Clone)]
pub struct Datetime {
    key: KeySpec,
    default: Option<DatetimeDefault>,
    format_suffix: String,
    format_key: Option<String>,
}

impl Default for Datetime {
    fn default() -> Self {
        Self {
            key: KeySpec::default(),
            default: None,
            format_suffix: DEFAULT_FORMAT_SUFFIX.to_string(),
            format_key: None,
        }
    }
}

impl Datetime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default(mut self, value: DateTime<FixedOffset>) -> Self {
        self.default = Some(DatetimeDefault::Value(value));
        self
    }

    pub fn with_default_str(mut self, value: impl Into<String>) -> Self {
        self.default = Some(DatetimeDefault::Text(value.into()));
        self
    }

    /// Suffix appended to the resolved key to find the format variable.
    pub fn with_format_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.format_suffix = suffix.into();
        self
    }

    /// Read the format from this exact variable instead.
    pub fn with_format_key(mut self, key: impl Into<String>) -> Self {
        self.format_key = Some(key.into());
        self
    }

    /// The variable holding the format for a field resolved to `key`.
    pub fn format_env_key(&self, key: &str) -> String {
        match &self.format_key {
            Some(format_key) => format_key.clone(),
            None => format!("{key}{}", self.format_suffix),
        }
    }
}

key_builders!(Datetime);

impl Resolve for Datetime {
    fn resolve(&self, name: &str, env: &dyn Environment) -> Result<Option<Value>, ConfigError> {
        let key = self.key.env_key(name);
        let text = match (self.key.lookup(&key, env)?, &self.default) {
            (Some(raw), _) => raw,
            (None, Some(DatetimeDefault::Text(text))) => text.clone(),
            (None, Some(DatetimeDefault::Value(value))) => return Ok(Some(Value::Datetime(*value))),
            (None, None) => return Ok(None),
        };

        let format_key = self.format_env_key(&key);
        let format = match env.var(&format_key) {
            Ok(format) => format,
            Err(VarError::NotPresent) => DEFAULT_DATETIME_FORMAT.to_string(),
            Err(VarError::NotUnicode(_)) => return Err(ConfigError::NotUnicode(format_key)),
        };
        parse_datetime(name, &text, &format).map(|value| Some(Value::Datetime(value)))
    }
}

/// Parse `raw` with a strptime-style `format`.
///
/// Formats lacking an offset fall back to a naive datetime (or a bare date at
/// midnight) interpreted as UTC.
pub fn parse_datetime(
    field: &str,
    raw: &str,
    format: &str,
) -> Result<DateTime<FixedOffset>, ConfigError> {
    let invalid = |e: chrono::ParseError| ConfigError::invalid(field, ParamType::Datetime, e);

    let naive = match DateTime::parse_from_str(raw, format) {
        Ok(value) => return Ok(value),
        Err(e) if e.kind() == ParseErrorKind::NotEnough => {
            NaiveDateTime::parse_from_str(raw, format)
        }
        Err(e) => return Err(invalid(e)),
    };
    let naive = match naive {
        Ok(value) => value,
        Err(e) if e.kind() == ParseErrorKind::NotEnough => NaiveDate::parse_from_str(raw, format)
            .map(|date| date.and_time(NaiveTime::MIN))
            .map_err(invalid)?,
        Err(e) => return Err(invalid(e)),
    };
    Ok(naive.and_utc().fixed_offset())
}
