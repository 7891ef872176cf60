//! Infrastructure - configuration
//!
//! - `config` - transport configuration (TOML loading, defaults)

pub mod config;

pub use config::Config;
