//! Input resolution: turn the current form state into exactly one request.
//!
//! ## Why an explicit form struct?
//!
//! The original front end read input widgets from wherever it happened to
//! need them, which scattered the priority and mutual-exclusion rules
//! across event handlers. [`FormState`] centralises those rules: choosing a
//! file clears the URL field, typing a URL clears the chosen file, and
//! [`resolve`] is a pure read that cannot observe an inconsistent mix.
//!
//! Resolution itself never performs I/O. The single exception in the whole
//! pre-transfer phase is [`fetch_remote_image`], used when the configured
//! strategy materialises a remote image into bytes — its failures are
//! reported as [`ValidationError::RemoteFetchFailed`], distinct from
//! transfer errors, because the conversion request was never sent.

use crate::error::ValidationError;
use crate::request::{
    BaseQuery, ConversionRequest, FileHandle, ImageSource, NumberBase, OperationKind,
};
use std::time::Duration;
use tracing::{debug, info};

/// Filename given to a remote image materialised into bytes.
const REMOTE_IMAGE_NAME: &str = "remote_image.jpg";

/// Transient per-page input state for all three operations.
///
/// Constructed empty, mutated by user-action methods, reset per scope after
/// every terminal outcome. Base selections default to decimal → hexadecimal
/// but are always explicit selections as far as [`resolve`] is concerned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    image_file: Option<FileHandle>,
    image_url: String,
    document_file: Option<FileHandle>,
    base_input: String,
    source_base: NumberBase,
    target_base: NumberBase,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            image_file: None,
            image_url: String::new(),
            document_file: None,
            base_input: String::new(),
            source_base: NumberBase::Decimal,
            target_base: NumberBase::Hexadecimal,
        }
    }
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Choose a local image file. Clears the URL field — the two image
    /// sources are mutually exclusive.
    pub fn choose_image_file(&mut self, file: FileHandle) {
        self.image_url.clear();
        self.image_file = Some(file);
    }

    /// Type into the image URL field. Clears any chosen image file.
    pub fn enter_image_url(&mut self, url: impl Into<String>) {
        self.image_file = None;
        self.image_url = url.into();
    }

    pub fn choose_document_file(&mut self, file: FileHandle) {
        self.document_file = Some(file);
    }

    pub fn enter_base_input(&mut self, value: impl Into<String>) {
        self.base_input = value.into();
    }

    pub fn select_bases(&mut self, source: NumberBase, target: NumberBase) {
        self.source_base = source;
        self.target_base = target;
    }

    pub fn image_file(&self) -> Option<&FileHandle> {
        self.image_file.as_ref()
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn document_file(&self) -> Option<&FileHandle> {
        self.document_file.as_ref()
    }

    pub fn base_input(&self) -> &str {
        &self.base_input
    }

    /// Reset the widgets belonging to one operation to their pristine
    /// state. Called on entry to a terminal outcome, success or failure
    /// alike.
    pub fn reset(&mut self, kind: OperationKind) {
        match kind {
            OperationKind::Image => {
                self.image_file = None;
                self.image_url.clear();
            }
            OperationKind::Document => {
                self.document_file = None;
            }
            OperationKind::Base => {
                self.base_input.clear();
            }
        }
    }

    /// Whether the widgets belonging to one operation hold no input.
    pub fn is_pristine(&self, kind: OperationKind) -> bool {
        match kind {
            OperationKind::Image => self.image_file.is_none() && self.image_url.is_empty(),
            OperationKind::Document => self.document_file.is_none(),
            OperationKind::Base => self.base_input.is_empty(),
        }
    }
}

/// Resolve the form into exactly one request for the given operation kind.
///
/// Pure read of the form state:
/// - Image: a chosen file wins outright (the URL field is ignored, not
///   fetched); otherwise a non-blank URL is validated syntactically;
///   otherwise there is no input.
/// - Document: a chosen file is required.
/// - Base: non-blank numeric text is required; the base selections are
///   whatever the form holds.
pub fn resolve(kind: OperationKind, form: &FormState) -> Result<ConversionRequest, ValidationError> {
    match kind {
        OperationKind::Image => {
            if let Some(file) = form.image_file() {
                debug!("Resolved image submission from file '{}'", file.name);
                return Ok(ConversionRequest::Image(ImageSource::File(file.clone())));
            }
            let url = form.image_url().trim();
            if url.is_empty() {
                return Err(ValidationError::NoInput { kind });
            }
            validate_http_url(url)?;
            debug!("Resolved image submission from URL '{url}'");
            Ok(ConversionRequest::Image(ImageSource::Url(url.to_string())))
        }
        OperationKind::Document => match form.document_file() {
            Some(file) => {
                debug!("Resolved document submission from file '{}'", file.name);
                Ok(ConversionRequest::Document(file.clone()))
            }
            None => Err(ValidationError::NoInput { kind }),
        },
        OperationKind::Base => {
            let value = form.base_input().trim();
            if value.is_empty() {
                return Err(ValidationError::NoInput { kind });
            }
            Ok(ConversionRequest::Base(BaseQuery {
                input_value: value.to_string(),
                source_base: form.source_base,
                target_base: form.target_base,
            }))
        }
    }
}

/// Check that the string parses as an absolute http/https URL.
fn validate_http_url(url: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::InvalidUrl {
        url: url.to_string(),
    };
    let parsed = reqwest::Url::parse(url).map_err(|_| invalid())?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid());
    }
    Ok(())
}

/// Fetch a remote image and wrap its bytes as if it were a locally chosen
/// file, named `remote_image.jpg` with the origin's declared media type.
///
/// This is the one pre-transfer side effect the resolver layer is allowed:
/// it runs only when [`crate::config::RemoteImageStrategy::Materialize`] is
/// configured. Any failure — bad client, unreachable host, non-success
/// status, truncated body — is a [`ValidationError::RemoteFetchFailed`] and
/// the conversion request is never sent.
pub async fn fetch_remote_image(
    url: &str,
    timeout_secs: u64,
) -> Result<FileHandle, ValidationError> {
    info!("Fetching remote image: {url}");

    let failed = |reason: String| ValidationError::RemoteFetchFailed {
        url: url.to_string(),
        reason,
    };

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| failed(e.to_string()))?;

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| failed(e.to_string()))?;

    if !response.status().is_success() {
        return Err(failed(format!("HTTP {}", response.status())));
    }

    let media_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(';').next().unwrap_or(v).trim().to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());

    let bytes = response.bytes().await.map_err(|e| failed(e.to_string()))?;

    info!("Fetched {} bytes ({media_type}) from remote image", bytes.len());

    Ok(FileHandle::new(REMOTE_IMAGE_NAME, media_type, bytes))
}
