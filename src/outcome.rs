//! Outcome data model: what a completed transfer decodes into.
//!
//! A [`ConversionOutcome`] is built from exactly one transport response and
//! consumed immediately — a binary attachment is handed to the save flow
//! (which releases the bytes once the save is initiated), a numeric result
//! is rendered, a failure is rendered. No history is kept.

use crate::feedback::FeedbackState;
use crate::request::OperationKind;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// A converted file returned by the server, with the name it should be
/// saved under.
///
/// Ownership is transient: the attachment exists only long enough to drive
/// a save action, then the bytes are released.
#[derive(Clone, PartialEq, Eq)]
pub struct BinaryAttachment {
    pub bytes: Bytes,
    pub suggested_filename: String,
}

impl fmt::Debug for BinaryAttachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryAttachment")
            .field("suggested_filename", &self.suggested_filename)
            .field("bytes", &format_args!("{} bytes", self.bytes.len()))
            .finish()
    }
}

/// Body of a successful base-conversion response.
///
/// `result` may legitimately arrive empty — the response handler treats
/// that as a semantic failure, not as a result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumericResult {
    #[serde(default)]
    pub result: String,
    /// Step-by-step working produced by the server, for display only.
    #[serde(default)]
    pub solution: String,
}

/// What one transfer decoded into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// A binary blob to save under `suggested_filename`.
    Attachment(BinaryAttachment),
    /// A numeric conversion result to render.
    Numeric(NumericResult),
    /// A terminal failure message, already worded for display.
    Failure { message: String },
}

/// The orchestrator's account of one finished submission.
///
/// `state` is always terminal ([`FeedbackState::Success`] or
/// [`FeedbackState::Error`]); the attachment bytes themselves are gone by
/// the time the report exists — only the saved path remains.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionReport {
    pub kind: OperationKind,
    pub state: FeedbackState,
    /// Where the converted file was written, for binary outcomes.
    pub saved_to: Option<PathBuf>,
    /// The numeric result, for base outcomes.
    pub numeric: Option<NumericResult>,
    pub duration_ms: u64,
}

impl SubmissionReport {
    pub fn is_success(&self) -> bool {
        matches!(self.state, FeedbackState::Success(_))
    }

    /// The terminal message text, if any.
    pub fn message(&self) -> Option<&str> {
        self.state.message()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attachment_debug_hides_payload() {
        let att = BinaryAttachment {
            bytes: Bytes::from_static(b"binary"),
            suggested_filename: "x.png".into(),
        };
        let debug = format!("{att:?}");
        assert!(debug.contains("x.png"));
        assert!(!debug.contains("binary"));
    }

    #[test]
    fn numeric_result_tolerates_missing_fields() {
        let n: NumericResult = serde_json::from_str(r#"{"result":"FF"}"#).unwrap();
        assert_eq!(n.result, "FF");
        assert_eq!(n.solution, "");
    }

    #[test]
    fn report_success_matches_state() {
        let report = SubmissionReport {
            kind: OperationKind::Base,
            state: FeedbackState::Success("Result: FF".into()),
            saved_to: None,
            numeric: Some(NumericResult {
                result: "FF".into(),
                solution: String::new(),
            }),
            duration_ms: 12,
        };
        assert!(report.is_success());
        assert_eq!(report.message(), Some("Result: FF"));

        let report = SubmissionReport {
            state: FeedbackState::Error("Conversion failed: bad file".into()),
            ..report
        };
        assert!(!report.is_success());
    }
}
