//! Response interpretation: from raw transport response to outcome.
//!
//! Everything here is a pure function of the response, so the whole
//! contract — filename extraction, error-body parsing, the base-conversion
//! empty-result rule — is unit-testable without a server.
//!
//! ## The empty-result rule
//!
//! A base conversion can answer HTTP 200 with an empty `result`. That is a
//! deliberate part of the backend contract: success at the transport level
//! does not imply success at the conversion level, and this layer turns it
//! into the fixed failure message rather than presenting an empty result.

use crate::config::Presentation;
use crate::error::ConvertError;
use crate::outcome::{BinaryAttachment, ConversionOutcome, NumericResult};
use crate::pipeline::transfer::RawResponse;
use crate::request::OperationKind;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::{HeaderMap, CONTENT_DISPOSITION};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

/// `filename=` parameter of a content-disposition header, quotes optional.
static RE_DISPOSITION_FILENAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"filename=\s*"?([^";]+)"?"#).unwrap());

/// JSON error body the server sends alongside 4xx/5xx statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: String,
}

/// Interpret one completed transfer into an outcome.
pub fn interpret(
    kind: OperationKind,
    response: RawResponse,
    presentation: Presentation,
) -> ConversionOutcome {
    if !response.is_success() {
        return failure_from_error_body(&response);
    }

    match kind {
        OperationKind::Base => interpret_base(&response),
        OperationKind::Image | OperationKind::Document => {
            interpret_binary(kind, response, presentation)
        }
    }
}

/// Successful binary response: body is the converted blob, name comes from
/// the content-disposition header or the per-kind default.
fn interpret_binary(
    kind: OperationKind,
    response: RawResponse,
    presentation: Presentation,
) -> ConversionOutcome {
    let suggested_filename = filename_from_headers(&response.headers)
        .unwrap_or_else(|| kind.default_filename(presentation).to_string());
    debug!(
        "{kind} result: {} bytes as '{suggested_filename}'",
        response.body.len()
    );
    ConversionOutcome::Attachment(BinaryAttachment {
        bytes: response.body,
        suggested_filename,
    })
}

/// Successful base response: `{result, solution}`, where an absent or empty
/// `result` (including an unparseable body) is a semantic failure.
fn interpret_base(response: &RawResponse) -> ConversionOutcome {
    match serde_json::from_slice::<NumericResult>(&response.body) {
        Ok(numeric) if !numeric.result.is_empty() => ConversionOutcome::Numeric(numeric),
        _ => ConversionOutcome::Failure {
            message: ConvertError::NoResult.to_string(),
        },
    }
}

/// Failed transport status: prefer the server's JSON `error` field, fall
/// back to the status' own text.
fn failure_from_error_body(response: &RawResponse) -> ConversionOutcome {
    let detail = serde_json::from_slice::<ErrorBody>(&response.body)
        .ok()
        .map(|body| body.error)
        .filter(|error| !error.is_empty())
        .unwrap_or_else(|| status_text(response.status));
    ConversionOutcome::Failure {
        message: ConvertError::Server { message: detail }.to_string(),
    }
}

/// Extract the suggested filename from a content-disposition style header:
/// split on `filename=`, strip quotes and surrounding whitespace.
pub(crate) fn filename_from_headers(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(CONTENT_DISPOSITION)?.to_str().ok()?;
    let captures = RE_DISPOSITION_FILENAME.captures(value)?;
    let name = captures[1].trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.to_string())
}
