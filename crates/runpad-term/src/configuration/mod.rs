//! Runtime configuration.
//!
//! Values are resolved once at startup from built-in defaults, the TOML config file and
//! command line flags or environment variables, then read through [`Config::get`].

mod config;

pub use config::*;
