//! Tests for the configuration loader.
//!
//! Responsibilities:
//! - Test dotenv merging, override behavior and the `DOTENV_DISABLED` gate.
//! - Test schema inheritance and nesting through the full load path.
//!
//! Invariants:
//! - Tests use an injected `MapEnv` unless they exercise the process environment,
//!   in which case they are `#[serial]` and use `temp_env`.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

pub mod dotenv_tests;

/// Write a dotenv file with the contents the inheritance tests expect.
pub fn create_test_env_file(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("test.env");
    fs::write(
        &path,
        "# test environment\nTEST_VAR=123\nSET_THIS_VAR=env\nSERVICE_VAR=my-app\n",
    )
    .unwrap();
    path
}
