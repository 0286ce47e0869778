//! Error types for the fileshift-client library.
//!
//! Two distinct error types reflect two distinct failure planes:
//!
//! * [`ValidationError`] — **Local**: the submission never left the form.
//!   Produced by the input resolver before any network traffic, fully
//!   recovered in place, and surfaced as an error-kind feedback message with
//!   the same wording the web front end uses.
//!
//! * [`ConvertError`] — **Remote or terminal**: the transfer failed at the
//!   network level, the server rejected the conversion, the conversion
//!   semantically produced nothing, or the result could not be saved.
//!
//! The separation keeps the resolver's contract honest: a `ValidationError`
//! guarantees that no request was sent, so callers can re-prompt without
//! worrying about half-finished uploads. Every failure is terminal for its
//! submission — there is no retry — and none is fatal to the caller.

use crate::request::OperationKind;
use std::path::PathBuf;
use thiserror::Error;

/// A submission rejected before any transfer was attempted.
///
/// Display strings are the exact user-facing texts rendered into the
/// feedback surface.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The form holds nothing usable for this operation kind.
    #[error("{}", .kind.missing_input_message())]
    NoInput { kind: OperationKind },

    /// The image URL field is non-blank but not a well-formed http/https URL.
    #[error("Please enter a valid URL.")]
    InvalidUrl { url: String },

    /// The remote image existed as a URL but its bytes could not be fetched.
    ///
    /// Reported distinctly from transfer errors: the conversion request was
    /// never sent, only the pre-transfer materialisation failed.
    #[error("Failed to fetch image from URL: {reason}")]
    RemoteFetchFailed { url: String, reason: String },
}

/// All errors that can terminate a submission after validation passed.
#[derive(Debug, Error)]
pub enum ConvertError {
    // ── Validation (lifted when a resolver error crosses an API boundary) ──
    #[error(transparent)]
    Validation(#[from] ValidationError),

    // ── Transfer errors ───────────────────────────────────────────────────
    /// The host was unreachable, the connection dropped, or the request
    /// timed out. The server never produced a response.
    #[error("An error occurred: {message}")]
    Network { message: String },

    // ── Server errors ─────────────────────────────────────────────────────
    /// The server answered with a non-success status. `message` is the
    /// parsed JSON `error` field when present, else the raw status text.
    #[error("Conversion failed: {message}")]
    Server { message: String },

    // ── Semantic failures ─────────────────────────────────────────────────
    /// A base conversion returned HTTP 200 but an empty `result`.
    /// Success at the transport level does not imply success at the
    /// conversion level.
    #[error("No result from conversion")]
    NoResult,

    // ── I/O errors ────────────────────────────────────────────────────────
    /// The converted attachment could not be written to disk.
    #[error("Failed to save '{path}': {source}")]
    SaveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
