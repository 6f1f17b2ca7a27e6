//! Startup: configuration and logging.
//!
//! # Components
//!
//! - [`config`] - [`AppConfig`] read from the environment
//! - [`logging`] - file-based `tracing` subscriber
//!
//! # Usage
//!
//! ```ignore
//! use gpt_term::startup::{init_tracing, AppConfig};
//!
//! let config = AppConfig::from_env()?;
//! init_tracing(&config);
//! ```

pub mod config;
pub mod logging;

pub use config::{AppConfig, ConfigError};
pub use logging::init_tracing;
