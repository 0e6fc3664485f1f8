//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Collect the construction options: dotenv path, override flag, verbosity
//!   and the environment source.
//! - Run dotenv merging, then resolve the schema into a `Config`.
//!
//! Invariants / Assumptions:
//! - The `DOTENV_DISABLED` variable is checked in the target environment
//!   before any file is read.
//! - Values are never logged, only keys and counts.

use std::path::{Path, PathBuf};

use super::error::ConfigError;
use crate::config::Config;
use crate::constants::DOTENV_DISABLED_VAR;
use crate::env::{Environment, ProcessEnv};
use crate::schema::Schema;

/// Builds a [`Config`] from a schema, an environment and an optional dotenv file.
#[derive(Debug, Clone)]
pub struct ConfigLoader<E = ProcessEnv> {
    schema: Schema,
    env: E,
    env_file: Option<PathBuf>,
    override_existing: bool,
    verbose: bool,
}

impl ConfigLoader {
    /// Create a loader reading the process environment.
    pub fn new(schema: Schema) -> Self {
        Self {
            schema,
            env: ProcessEnv,
            env_file: None,
            override_existing: false,
            verbose: false,
        }
    }
}

impl<E: Environment> ConfigLoader<E> {
    /// Resolve against `env` instead.
    pub fn with_env<F: Environment>(self, env: F) -> ConfigLoader<F> {
        ConfigLoader {
            schema: self.schema,
            env,
            env_file: self.env_file,
            override_existing: self.override_existing,
            verbose: self.verbose,
        }
    }

    /// Merge this dotenv file into the environment before resolving.
    pub fn with_env_file(mut self, path: impl AsRef<Path>) -> Self {
        self.env_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Let dotenv entries replace variables that are already set.
    pub fn with_override_existing(mut self, override_existing: bool) -> Self {
        self.override_existing = override_existing;
        self
    }

    /// Log dotenv and resolution progress at a higher level.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    /// Check if dotenv loading is disabled in the target environment.
    fn dotenv_disabled(&self) -> bool {
        matches!(
            self.env.var(DOTENV_DISABLED_VAR).as_deref(),
            Ok("true") | Ok("1")
        )
    }

    /// Merge the configured dotenv file into the environment.
    ///
    /// Missing files are silently ignored (logged at `warn` when verbose).
    ///
    /// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
    pub fn load_dotenv(&mut self) -> Result<(), ConfigError> {
        let Some(path) = self.env_file.as_deref() else {
            return Ok(());
        };
        if self.dotenv_disabled() {
            tracing::debug!(path = %path.display(), "Dotenv loading disabled");
            return Ok(());
        }

        match self.env.apply_dotenv(path, self.override_existing) {
            Ok(()) => {
                tracing::debug!(
                    path = %path.display(),
                    override_existing = self.override_existing,
                    "Loaded dotenv file"
                );
                Ok(())
            }
            Err(e) if is_not_found(&e) => {
                if self.verbose {
                    tracing::warn!(path = %path.display(), "Dotenv file not found");
                } else {
                    tracing::debug!(path = %path.display(), "Dotenv file not found");
                }
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Merge the dotenv file, then resolve every field.
    pub fn load(mut self) -> Result<Config, ConfigError> {
        self.load_dotenv()?;
        let config = Config::resolve_with(&self.schema, &self.env, self.verbose)?;

        let declared = self.schema.fields().len();
        if self.verbose {
            tracing::info!(
                config = config.name(),
                resolved = config.len(),
                dropped = declared - config.len(),
                "Loaded config"
            );
        } else {
            tracing::debug!(
                config = config.name(),
                resolved = config.len(),
                dropped = declared - config.len(),
                "Loaded config"
            );
        }
        Ok(config)
    }
}

/// Check if a dotenv error indicates the file was not found.
fn is_not_found(err: &dotenvy::Error) -> bool {
    matches!(
        err,
        dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
    )
}
