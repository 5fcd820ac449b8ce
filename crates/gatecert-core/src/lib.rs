//! # gatecert Core
//!
//! Configuration management, logging, and common functionality for the
//! gatecert provisioning tool.
//!
//! This crate provides:
//!
//! - **Configuration**: Layered configuration (defaults, file, overrides, environment)
//! - **Logging**: `tracing` subscriber setup with file and JSON output
//! - **Data Utilities**: YAML loading, deep merging, dotted-path access

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod log;
pub mod util;

// Re-export commonly used items
pub use config::{render_template, Config, GatecertConfig};
pub use gatecert_types::{GatecertError, Result};
