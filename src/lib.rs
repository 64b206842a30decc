//! modlog - per-module text log files with a severity threshold
//!
//! This library provides the logger, its configuration and the supporting
//! utilities used by the `modlog` binary.

pub mod config;
pub mod logging;
pub mod record;
