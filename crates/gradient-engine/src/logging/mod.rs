//! Logging utilities.
//!
//! This module centralizes logger initialization. Everything else logs through
//! the `log` facade; `env_logger` is the only backend wired here.

mod init;

pub use init::{init_logging, LoggingConfig, DEFAULT_FILTER};
