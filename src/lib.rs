//! # fileshift-client
//!
//! Client-side orchestration for the FileShift conversion service: submit
//! an image, a document, or a numeric string, and receive a converted file
//! or result back.
//!
//! ## Why this crate?
//!
//! The conversion server exposes three small HTTP routes, but driving them
//! correctly involves more than a POST: deciding what the form state means
//! (file beats URL; blank fields are rejected before any traffic),
//! materialising remote images, decoding a response that is either a binary
//! attachment with a suggested filename or a JSON result/error, keeping a
//! loading indicator and transient status messages honest, and resetting
//! input state after every terminal outcome. This crate packages that
//! orchestration once, for CLI and library callers alike.
//!
//! ## Submission Overview
//!
//! ```text
//! form state
//!  │
//!  ├─ 1. Resolve   file / URL / numeric triple → exactly one request
//!  ├─ 2. Fetch     (optional) materialise a remote image as bytes
//!  ├─ 3. Transfer  POST to the kind's fixed route (multipart or JSON)
//!  ├─ 4. Decode    attachment + filename, numeric result, or failure
//!  ├─ 5. Deliver   atomic save to disk; bytes released immediately
//!  └─ 6. Reset     feedback message shown, form widgets pristine again
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fileshift_client::{
//!     submit, ApiClient, ClientConfig, FormState, NoopFeedback, OperationKind,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::builder()
//!         .base_url("http://127.0.0.1:5000")
//!         .build()?;
//!     let client = ApiClient::new(&config)?;
//!
//!     let mut form = FormState::new();
//!     form.enter_base_input("255");
//!
//!     let report = submit(
//!         OperationKind::Base,
//!         &mut form,
//!         &client,
//!         &config,
//!         &NoopFeedback,
//!     )
//!     .await;
//!     println!("{:?}", report.state);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `fileshift` binary (clap + anyhow + tracing-subscriber + indicatif) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only
//! deps:
//! ```toml
//! fileshift-client = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod feedback;
pub mod outcome;
pub mod pipeline;
pub mod request;
pub mod submit;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{
    ClientConfig, ClientConfigBuilder, Presentation, RemoteImageStrategy,
    DEFAULT_MESSAGE_LIFETIME_SECS,
};
pub use error::{ConvertError, ValidationError};
pub use feedback::{FeedbackSink, FeedbackState, MessageBoard, MessageKind, NoopFeedback};
pub use outcome::{BinaryAttachment, ConversionOutcome, NumericResult, SubmissionReport};
pub use pipeline::resolve::FormState;
pub use pipeline::transfer::{ApiClient, RawResponse};
pub use request::{
    BaseQuery, ConversionRequest, FileHandle, ImageSource, NumberBase, OperationKind,
};
pub use submit::submit;
