//! Configuration loader for environment variables and dotenv files.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` that merges an optional dotenv
//!   file into an environment source, then resolves a schema against it.
//! - Enforce the `DOTENV_DISABLED` gate.
//!
//! Does NOT handle:
//! - Casting raw values (see `param`).
//! - Parsing dotenv syntax (delegated to `dotenvy`).
//!
//! Invariants / Assumptions:
//! - Dotenv entries never replace already-set variables unless override is enabled.
//! - A missing dotenv file is not an error.
//! - Construction is all-or-nothing.

mod builder;
mod error;

#[cfg(test)]
mod tests;

pub use builder::ConfigLoader;
pub use error::ConfigError;
