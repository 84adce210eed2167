//! Tracing setup for the console runtime.
//!
//! Structured diagnostics flow through the `tracing` macros used across the
//! crate into a `tracing-subscriber` pipeline writing to stderr. This is
//! operator-facing diagnostics only; the user-facing activity feed lives in
//! the application layer.
//!
//! # Configuration
//!
//! Filter level is resolved in priority order:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`

mod init;

pub use init::init_tracing;
