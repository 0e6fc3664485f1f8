//! Centralized constants for the envconfig crate.
//!
//! This module contains default values used across modules to avoid
//! magic string duplication.

// =============================================================================
// Casting
// =============================================================================

/// Raw values (compared case-insensitively) that cast to `true`.
/// Everything else casts to `false`.
pub const TRUTHY_VALUES: &[&str] = &["true", "1", "t", "y", "yes"];

/// Default strptime-style format for datetime fields (ISO-8601 with offset).
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Suffix appended to a datetime field's key to find its companion format variable.
pub const DEFAULT_FORMAT_SUFFIX: &str = "_FORMAT";

// =============================================================================
// Dotenv
// =============================================================================

/// Setting this variable to `1` or `true` skips `.env` file loading.
pub const DOTENV_DISABLED_VAR: &str = "DOTENV_DISABLED";
