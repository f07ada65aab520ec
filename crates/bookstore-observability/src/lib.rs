//! Observability infrastructure for the bookstore tools.
//!
//! This crate provides:
//! - `LogLevel` / `LogFormat` - configurable verbosity and output shape
//! - `LoggingConfig` - the `[logging]` configuration section
//! - `init_logging` - installs the global `tracing` subscriber

mod logging;

pub use logging::*;
