//! Rosterdeck: the roster engine behind an admin review console.
//!
//! Rosterdeck manages fetched roster records (students, coordinators,
//! schools, callback requests) and provides:
//! - Search, grade filtering, and score-based sorting over the fetched
//!   collection, derived as a pure pipeline
//! - Cursor-based pagination against the admin API
//! - A confirmation-gated moderation workflow (approve/delete) with
//!   optimistic updates and rollback on rejection
//! - Display-ready view models with placeholder rendering for sparse records
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Console Runtime (main.rs)                          │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │  ← Business logic
//! │  - Filter/sort pipeline, pagination                 │
//! │  - Moderation workflow, row menus                   │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Store Layer   │   │ Remote Layer  │
//! │ (ui/)         │   │ (store/)      │   │ (remote/)     │
//! │ - View models │   │ - Records     │   │ - Fetch/decode│
//! │ - Placeholders│   │ - Patching    │   │ - Mutations   │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Session Layers                            │
//! │  - Record traits and models (domain/)               │
//! │  - Score extraction (domain/score)                  │
//! │  - Injected credential (session/)                   │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Concurrency Model
//!
//! All state lives in [`RosterState`] and is mutated only by [`handle_event`]
//! on one thread. Network calls run elsewhere; their results come back as
//! [`app::RosterEvent::Remote`] events and are applied in arrival order.
//! Mutations resolve by target identifier, so responses arriving out of issue
//! order still land on the right record.
//!
//! # Example
//!
//! ```rust
//! use rosterdeck::{handle_event, Config, RosterEvent, RosterState, Session};
//! use rosterdeck::domain::Student;
//!
//! let config = Config::default();
//! let mut state: RosterState<Student> = rosterdeck::initialize(&config);
//! let session = Session::from_env();
//!
//! let (redraw, actions) = handle_event(
//!     &mut state,
//!     &session,
//!     RosterEvent::SearchChanged("ana".to_string()),
//! )?;
//! assert!(redraw);
//! // Execute actions against a record source / mutation sink...
//! # let _ = actions;
//! # Ok::<(), rosterdeck::RosterError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod domain;
pub mod observability;
pub mod remote;
pub mod session;
pub mod store;
pub mod ui;

pub use app::{
    handle_event, ModerationAction, RosterAction, RosterEvent, RosterState, SortOrder,
    StandardFilter,
};
pub use domain::{Result, RosterError, ScoreBasis};
pub use remote::{HttpRemote, MutationSink, PageQuery, RecordSource, RemoteResponse};
pub use session::Session;
pub use store::ResourceStore;

use std::path::Path;

use serde::Deserialize;

use crate::domain::record::RosterRecord;

/// Console configuration, loaded from a TOML file or built in code.
///
/// # Example
///
/// ```toml
/// # rosterdeck.toml
/// base_url = "https://admin.example.org"
/// page_size = 10
/// request_timeout_secs = 30
/// log_capacity = 64
/// trace_level = "debug"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the admin API. All endpoints hang off
    /// `{base_url}/api/admin/`. Default: `http://localhost:5002`
    pub base_url: String,

    /// Records per page for paginated resources. Default: 10
    pub page_size: usize,

    /// Overall per-request timeout in seconds. Default: 30
    pub request_timeout_secs: u64,

    /// Capacity of the bounded activity feed. Default: 64
    pub log_capacity: usize,

    /// Tracing filter level, overridden by `RUST_LOG`.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5002".to_string(),
            page_size: 10,
            request_timeout_secs: 30,
            log_capacity: 64,
            trace_level: None,
        }
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// Missing keys take their defaults, so a partial file is valid.
    ///
    /// # Errors
    ///
    /// Returns [`RosterError::Io`] when the file cannot be read and
    /// [`RosterError::Config`] when it is not valid TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| RosterError::Config(e.to_string()))
    }
}

/// Creates an empty roster state for one resource type from configuration.
pub fn initialize<R: RosterRecord>(config: &Config) -> RosterState<R> {
    tracing::debug!(
        resource = R::RESOURCE,
        page_size = config.page_size,
        "initializing roster state"
    );
    RosterState::new(config.page_size, config.log_capacity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn partial_config_file_takes_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"https://admin.example.org/\"").unwrap();
        writeln!(file, "page_size = 25").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.base_url, "https://admin.example.org/");
        assert_eq!(config.page_size, 25);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.trace_level, None);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "page_size = ").unwrap();

        match Config::from_file(file.path()) {
            Err(RosterError::Config(_)) => {}
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        match Config::from_file("/definitely/not/here.toml") {
            Err(RosterError::Io(_)) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
