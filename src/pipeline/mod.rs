//! Pipeline stages for one conversion submission.
//!
//! Each submodule implements exactly one step of the submission flow.
//! Keeping stages separate makes each independently testable and keeps
//! network I/O confined to two well-marked places (the optional remote
//! image fetch and the transfer itself).
//!
//! ## Data Flow
//!
//! ```text
//! resolve ──▶ transfer ──▶ decode ──▶ deliver
//! (form)      (HTTP)       (pure)     (save to disk)
//! ```
//!
//! 1. [`resolve`]  — read the form state into exactly one
//!    `ConversionRequest`, or a validation error; may materialise a remote
//!    image as bytes first (the one allowed pre-transfer side effect)
//! 2. [`transfer`] — POST the request to its fixed route and collect the
//!    raw transport response; the only stage that talks to the server
//! 3. [`decode`]   — interpret status, headers, and body into a
//!    `ConversionOutcome`; pure, no I/O
//! 4. [`deliver`]  — write a binary attachment to disk atomically and
//!    release the bytes

pub mod decode;
pub mod deliver;
pub mod resolve;
pub mod transfer;
