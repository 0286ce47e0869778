//! The submission orchestrator: one cooperative task per user action.
//!
//! `submit` walks a single submission through the pipeline —
//!
//! ```text
//! Idle → Resolving → Loading → transfer → Handling → Success | Error
//!             └─ validation error ───────────────────────────┘
//! ```
//!
//! — driving the feedback sink at every step and resetting the operation's
//! form widgets on entry to either terminal state. Two ordering guarantees
//! hold: the loading indicator is shown before the network call begins, and
//! it is hidden before the terminal Success/Error message appears.
//!
//! ## Known limitation
//!
//! Nothing stops a caller from submitting the same operation kind again
//! before the previous submission settles. That race is accepted, as in
//! the front end this layer reimplements: the last response wins, and a
//! stale submission may briefly flip the shared loading indicator. There
//! is no cancellation — once a transfer begins it runs to completion or
//! network failure.

use crate::config::{ClientConfig, RemoteImageStrategy};
use crate::feedback::{FeedbackSink, FeedbackState, MessageKind};
use crate::outcome::{ConversionOutcome, NumericResult, SubmissionReport};
use crate::pipeline::{decode, deliver, resolve, transfer::ApiClient};
use crate::request::{ConversionRequest, ImageSource, OperationKind};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

use resolve::FormState;

/// Run one submission to its terminal state.
///
/// Never returns an error: every failure is rendered into the feedback
/// sink and reported as a terminal [`FeedbackState::Error`], and the form
/// is left pristine for the next attempt either way.
pub async fn submit(
    kind: OperationKind,
    form: &mut FormState,
    client: &ApiClient,
    config: &ClientConfig,
    feedback: &dyn FeedbackSink,
) -> SubmissionReport {
    let start = Instant::now();
    info!("Submitting {kind} conversion");

    // ── Step 1: Resolve input ────────────────────────────────────────────
    let request = match resolve::resolve(kind, form) {
        Ok(request) => request,
        Err(e) => {
            warn!("{kind} submission rejected: {e}");
            return finish(kind, form, feedback, FeedbackState::Error(e.to_string()))
                .report(start);
        }
    };

    // ── Step 2: Materialise a remote image if the strategy says so ───────
    let request = match request {
        ConversionRequest::Image(ImageSource::Url(url))
            if config.remote_image == RemoteImageStrategy::Materialize =>
        {
            feedback.show(kind, MessageKind::Info, "Fetching image from URL...");
            match resolve::fetch_remote_image(&url, config.remote_fetch_timeout_secs).await {
                Ok(file) => ConversionRequest::Image(ImageSource::File(file)),
                Err(e) => {
                    warn!("Remote image fetch failed: {e}");
                    return finish(kind, form, feedback, FeedbackState::Error(e.to_string()))
                        .report(start);
                }
            }
        }
        other => other,
    };

    // ── Step 3: Loading — always shown before the network call begins ────
    feedback.show(kind, MessageKind::Info, kind.converting_message());
    feedback.show_loading();

    // ── Step 4: Transfer ─────────────────────────────────────────────────
    let response = match client.send(request).await {
        Ok(response) => response,
        Err(e) => {
            feedback.hide_loading();
            warn!("{kind} transfer failed: {e}");
            return finish(kind, form, feedback, FeedbackState::Error(e.to_string()))
                .report(start);
        }
    };

    // ── Step 5: Interpret the response ───────────────────────────────────
    let outcome = decode::interpret(kind, response, config.presentation);

    // Loading is cleared before any terminal message is shown.
    feedback.hide_loading();

    // ── Step 6: Deliver / render ─────────────────────────────────────────
    match outcome {
        ConversionOutcome::Attachment(attachment) => {
            let filename = attachment.suggested_filename.clone();
            match deliver::save_attachment(attachment, &config.download_dir).await {
                Ok(path) => {
                    let message =
                        format!("{} converted and downloaded as \"{filename}\".", kind.noun());
                    finish(kind, form, feedback, FeedbackState::Success(message))
                        .saved_to(path)
                        .report(start)
                }
                Err(e) => {
                    warn!("{kind} save failed: {e}");
                    finish(kind, form, feedback, FeedbackState::Error(e.to_string()))
                        .report(start)
                }
            }
        }
        ConversionOutcome::Numeric(numeric) => {
            let message = format!("Result: {}", numeric.result);
            finish(kind, form, feedback, FeedbackState::Success(message))
                .numeric(numeric)
                .report(start)
        }
        ConversionOutcome::Failure { message } => {
            finish(kind, form, feedback, FeedbackState::Error(message)).report(start)
        }
    }
}

/// Enter a terminal state: render the message, reset the operation's form
/// widgets (success and failure alike), and start assembling the report.
fn finish(
    kind: OperationKind,
    form: &mut FormState,
    feedback: &dyn FeedbackSink,
    state: FeedbackState,
) -> ReportBuilder {
    match &state {
        FeedbackState::Success(message) => feedback.show(kind, MessageKind::Success, message),
        FeedbackState::Error(message) => feedback.show(kind, MessageKind::Error, message),
        _ => {}
    }
    form.reset(kind);
    ReportBuilder {
        kind,
        state,
        saved_to: None,
        numeric: None,
    }
}

struct ReportBuilder {
    kind: OperationKind,
    state: FeedbackState,
    saved_to: Option<PathBuf>,
    numeric: Option<NumericResult>,
}

impl ReportBuilder {
    fn saved_to(mut self, path: PathBuf) -> Self {
        self.saved_to = Some(path);
        self
    }

    fn numeric(mut self, numeric: NumericResult) -> Self {
        self.numeric = Some(numeric);
        self
    }

    fn report(self, start: Instant) -> SubmissionReport {
        let report = SubmissionReport {
            kind: self.kind,
            state: self.state,
            saved_to: self.saved_to,
            numeric: self.numeric,
            duration_ms: start.elapsed().as_millis() as u64,
        };
        info!(
            "{} submission finished: {:?} in {}ms",
            report.kind, report.state, report.duration_ms
        );
        report
    }
}
