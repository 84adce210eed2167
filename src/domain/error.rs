//! Error types for the roster engine.
//!
//! This module defines the centralized error type [`RosterError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! # Recovery policy
//!
//! None of these errors are fatal to the console:
//!
//! - [`RosterError::Fetch`] falls back to an empty view plus a dismissible banner
//! - [`RosterError::Mutation`] triggers the moderation rollback path plus a banner
//! - [`RosterError::Shape`] is logged and treated as empty data
//! - [`RosterError::MissingCredential`] blocks the mutation before any request
//!   is attempted

use thiserror::Error;

/// The main error type for roster engine operations.
///
/// This enum consolidates all error conditions that can occur while fetching,
/// decoding, and moderating records. String payloads carry a human-readable
/// description suitable for the error banner.
#[derive(Debug, Error)]
pub enum RosterError {
    /// Network or transport failure while talking to the record source.
    ///
    /// Recovered locally by falling back to an empty view; never fatal.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// The mutation sink rejected an approve/delete/update request.
    ///
    /// Triggers the optimistic-update rollback in the moderation workflow and
    /// surfaces a user-visible message; never silently dropped.
    #[error("Mutation rejected: {0}")]
    Mutation(String),

    /// An upstream response was missing an expected field or collection.
    ///
    /// Logged and treated as empty data; does not block the rest of the UI.
    #[error("Malformed payload: {0}")]
    Shape(String),

    /// No bearer credential is present in the session.
    ///
    /// A hard precondition failure: the workflow must not attempt the call.
    #[error("No admin credential present; sign in again")]
    MissingCredential,

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed (configuration file reads).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized `Result` type for roster engine operations.
pub type Result<T> = std::result::Result<T, RosterError>;
