//! Declarative environment configuration.
//!
//! A configuration type declares its fields as typed parameter descriptors
//! in a [`Schema`]. Loading resolves each field from an environment source,
//! optionally after merging a dotenv file into it, and collects the typed
//! values into a [`Config`].
//!
//! ```no_run
//! use envconfig::{Config, Int, Schema, Str};
//!
//! let schema = Schema::new("AppConfig")
//!     .field("HOST", Str::new().required())
//!     .field("PORT", Int::new().with_default(8080))
//!     .field("PASSWORD", Str::new().with_override("SECRET_REDIS_PW"));
//!
//! let config = Config::from_env_file(schema, ".env")?;
//! let port: u16 = config.get_as("PORT")?;
//! # Ok::<(), envconfig::ConfigError>(())
//! ```

mod config;
pub mod constants;
pub mod env;
mod loader;
pub mod param;
mod schema;
mod value;

pub use config::Config;
pub use env::{Environment, MapEnv, ProcessEnv};
pub use loader::{ConfigError, ConfigLoader};
pub use param::{
    Bool, Datetime, Enum, Float, Int, Nested, Param, ParamType, PathParam, Resolve, Str,
    Timedelta, boolean,
};
pub use schema::{EnvConfig, Schema};
pub use value::{EnumValue, FromValue, Value};
