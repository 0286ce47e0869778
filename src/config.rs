//! Configuration types for the conversion client.
//!
//! All client behaviour is controlled through [`ClientConfig`], built via
//! its [`ClientConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share a config between the transfer client and the
//! orchestrator, and to diff two runs to understand why their outcomes
//! differ.
//!
//! # Design choice: builder over constructor
//! Callers usually care about one or two fields (the server URL, maybe the
//! output directory). The builder lets them set only those and rely on
//! documented defaults for the rest, with validation in one place.

use crate::error::ConvertError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How long a non-idle feedback message stays visible before auto-reverting
/// to idle, in seconds.
pub const DEFAULT_MESSAGE_LIFETIME_SECS: u64 = 7;

/// Configuration for a conversion client.
///
/// Built via [`ClientConfig::builder()`] or [`ClientConfig::default()`].
///
/// # Example
/// ```rust
/// use fileshift_client::ClientConfig;
///
/// let config = ClientConfig::builder()
///     .base_url("https://convert.example.com")
///     .request_timeout_secs(30)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Origin of the conversion server. Default: `http://127.0.0.1:5000`.
    ///
    /// The three conversion routes are joined onto this URL, so it should
    /// be a bare origin (scheme + host + port) without a trailing path.
    pub base_url: String,

    /// Timeout for one conversion request in seconds. Default: 60.
    ///
    /// Document conversion on the server can take tens of seconds for large
    /// files; images and base conversions finish in well under one.
    pub request_timeout_secs: u64,

    /// Timeout for materialising a remote image in seconds. Default: 120.
    ///
    /// This fetch talks to an arbitrary third-party host, not the
    /// conversion server, so it gets its own (more generous) budget.
    pub remote_fetch_timeout_secs: u64,

    /// Feedback message lifetime in seconds. Default: 7.
    ///
    /// Non-idle messages auto-revert to idle after this long unless a newer
    /// message supersedes them first.
    pub message_lifetime_secs: u64,

    /// Which of the two front-end presentation modes to mirror.
    /// Affects only the default image filename. Default: [`Presentation::Classic`].
    pub presentation: Presentation,

    /// How image URLs are submitted. Default: [`RemoteImageStrategy::Materialize`].
    pub remote_image: RemoteImageStrategy,

    /// Directory converted attachments are saved into. Default: `"."`.
    pub download_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            request_timeout_secs: 60,
            remote_fetch_timeout_secs: 120,
            message_lifetime_secs: DEFAULT_MESSAGE_LIFETIME_SECS,
            presentation: Presentation::default(),
            remote_image: RemoteImageStrategy::default(),
            download_dir: PathBuf::from("."),
        }
    }
}

impl ClientConfig {
    /// Create a new builder for `ClientConfig`.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = secs.max(1);
        self
    }

    pub fn remote_fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.config.remote_fetch_timeout_secs = secs.max(1);
        self
    }

    pub fn message_lifetime_secs(mut self, secs: u64) -> Self {
        self.config.message_lifetime_secs = secs.max(1);
        self
    }

    pub fn presentation(mut self, presentation: Presentation) -> Self {
        self.config.presentation = presentation;
        self
    }

    pub fn remote_image(mut self, strategy: RemoteImageStrategy) -> Self {
        self.config.remote_image = strategy;
        self
    }

    pub fn download_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.download_dir = dir.into();
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ClientConfig, ConvertError> {
        let url = reqwest::Url::parse(&self.config.base_url).map_err(|e| {
            ConvertError::InvalidConfig(format!(
                "base URL '{}' is not a valid URL: {e}",
                self.config.base_url
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConvertError::InvalidConfig(format!(
                "base URL '{}' must use http or https",
                self.config.base_url
            )));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// The two shipped front-end variants, folded into one core.
///
/// The variants differ only in surface details; the one that matters to
/// this layer is the default filename applied to an image result when the
/// server does not suggest one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presentation {
    /// The original page: image results default to `converted_image.jpg`.
    #[default]
    Classic,
    /// The reworked page: image results default to `converted_image.png`.
    Modern,
}

impl Presentation {
    /// Default filename for an image result without a server suggestion.
    pub fn image_default_filename(&self) -> &'static str {
        match self {
            Presentation::Classic => "converted_image.jpg",
            Presentation::Modern => "converted_image.png",
        }
    }
}

/// How an image URL in the form is turned into a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteImageStrategy {
    /// Fetch the remote bytes before transfer and upload them as a file
    /// named `remote_image.jpg` (what the reference front end does).
    #[default]
    Materialize,
    /// Send the URL itself as a form field and let the server fetch it.
    Reference,
}
