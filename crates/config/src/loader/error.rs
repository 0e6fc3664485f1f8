//! Error types for configuration loading.
//!
//! Responsibilities:
//! - Define error variants for all field resolution and container lookup failures.
//! - Map `dotenvy` failures onto variants that never carry raw file contents.
//!
//! Invariants:
//! - All error variants include context for debugging (variable names, field names).
//! - `MissingEnvVar` always carries the exact computed key that was searched,
//!   prefix included.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::io::ErrorKind;
use thiserror::Error;

use crate::param::ParamType;

/// Errors that can occur while resolving or reading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required field's environment variable is absent.
    #[error("Could not find '{0}' in environment.")]
    MissingEnvVar(String),

    /// The variable is set, but its value is not valid unicode.
    #[error("Environment variable '{0}' is set but is not valid unicode.")]
    NotUnicode(String),

    /// A raw value could not be cast to the field's declared type.
    #[error("Config param '{field}' expected '{expected}', received {message}")]
    InvalidValue {
        field: String,
        expected: ParamType,
        message: String,
    },

    /// A field was requested that the container never resolved.
    #[error("Config '{config}' has no field '{field}'")]
    UnknownField { config: String, field: String },

    /// A field was read back as a Rust type that does not match its resolved value.
    #[error("Config field '{field}' holds a {actual} value, not {expected}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        actual: ParamType,
    },

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,

    #[error("Failed to serialize config: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    pub(crate) fn invalid(field: &str, expected: ParamType, message: impl ToString) -> Self {
        ConfigError::InvalidValue {
            field: field.to_string(),
            expected,
            message: message.to_string(),
        }
    }
}

impl From<dotenvy::Error> for ConfigError {
    fn from(error: dotenvy::Error) -> Self {
        match error {
            dotenvy::Error::LineParse(_, idx) => ConfigError::DotenvParse { error_index: idx },
            dotenvy::Error::Io(io_err) => ConfigError::DotenvIo {
                kind: io_err.kind(),
            },
            _ => ConfigError::DotenvUnknown,
        }
    }
}
