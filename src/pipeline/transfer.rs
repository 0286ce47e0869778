//! The transfer client: one fixed route per operation kind.
//!
//! This module is intentionally thin — it maps a resolved
//! [`ConversionRequest`] onto the backend contract (multipart upload for the
//! binary kinds, JSON body for base conversion), performs the exchange, and
//! hands back the transport response *uninterpreted*. What a status code or
//! body means belongs to [`crate::pipeline::decode`].
//!
//! Network-level failures (unreachable host, dropped connection, timeout)
//! surface as [`ConvertError::Network`]; a non-success HTTP status is not an
//! error here, because the response body still carries the server's own
//! error message.

use crate::config::ClientConfig;
use crate::error::ConvertError;
use crate::request::{ConversionRequest, FileHandle, ImageSource, OperationKind};
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::multipart::{Form, Part};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, info};

/// Multipart field name the server expects the binary payload under.
const FILE_FIELD: &str = "file";
/// Multipart field name for the URL-reference image variant.
const URL_FIELD: &str = "url";

/// The raw transport-level response: status, headers, and collected body.
///
/// Interpretation is deferred so the response handler can be tested as a
/// pure function.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// HTTP client bound to one conversion server.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: reqwest::Url,
}

impl ApiClient {
    /// Build a client from the configuration.
    ///
    /// The base URL is parsed once here so every later `send` can join
    /// routes infallibly in practice.
    pub fn new(config: &ClientConfig) -> Result<Self, ConvertError> {
        let base_url = reqwest::Url::parse(&config.base_url).map_err(|e| {
            ConvertError::InvalidConfig(format!(
                "base URL '{}' is not a valid URL: {e}",
                config.base_url
            ))
        })?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ConvertError::Network {
                message: e.to_string(),
            })?;

        Ok(Self { http, base_url })
    }

    /// Absolute URL of the route for one operation kind.
    pub fn endpoint(&self, kind: OperationKind) -> Result<reqwest::Url, ConvertError> {
        self.base_url.join(kind.endpoint_path()).map_err(|e| {
            ConvertError::InvalidConfig(format!(
                "cannot join '{}' onto base URL '{}': {e}",
                kind.endpoint_path(),
                self.base_url
            ))
        })
    }

    /// Perform the exchange for one resolved request.
    ///
    /// Consumes the request — it is built fresh per submission and the
    /// uploaded bytes are released once the transfer completes.
    pub async fn send(&self, request: ConversionRequest) -> Result<RawResponse, ConvertError> {
        let kind = request.kind();
        let url = self.endpoint(kind)?;
        info!("POST {url}");

        let builder = self.http.post(url);
        let builder = match request {
            ConversionRequest::Image(ImageSource::File(file))
            | ConversionRequest::Document(file) => {
                debug!(
                    "Uploading '{}' ({}, {} bytes) as multipart field '{FILE_FIELD}'",
                    file.name,
                    file.media_type,
                    file.len()
                );
                builder.multipart(file_form(file)?)
            }
            ConversionRequest::Image(ImageSource::Url(remote_url)) => {
                debug!("Sending image URL reference as multipart field '{URL_FIELD}'");
                builder.multipart(Form::new().text(URL_FIELD, remote_url))
            }
            ConversionRequest::Base(query) => builder.json(&query),
        };

        let response = builder.send().await.map_err(map_network_error)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(map_network_error)?;

        debug!("{kind} response: {status}, {} body bytes", body.len());

        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}

/// Build the multipart form carrying one file under the fixed field name.
fn file_form(file: FileHandle) -> Result<Form, ConvertError> {
    let FileHandle {
        name,
        media_type,
        bytes,
    } = file;
    let part = Part::stream(reqwest::Body::from(bytes))
        .file_name(name)
        .mime_str(&media_type)
        .map_err(|e| ConvertError::Network {
            message: format!("invalid media type '{media_type}': {e}"),
        })?;
    Ok(Form::new().part(FILE_FIELD, part))
}

fn map_network_error(err: reqwest::Error) -> ConvertError {
    let message = if err.is_timeout() {
        format!("request timed out: {err}")
    } else {
        err.to_string()
    };
    ConvertError::Network { message }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_for(base: &str) -> ClientConfig {
        ClientConfig::builder().base_url(base).build().unwrap()
    }

    #[test]
    fn endpoints_join_onto_the_base_origin() {
        let client = ApiClient::new(&config_for("http://convert.example.com")).unwrap();
        assert_eq!(
            client.endpoint(OperationKind::Image).unwrap().as_str(),
            "http://convert.example.com/api/convert-image"
        );
        assert_eq!(
            client.endpoint(OperationKind::Document).unwrap().as_str(),
            "http://convert.example.com/api/convert-document"
        );
        assert_eq!(
            client.endpoint(OperationKind::Base).unwrap().as_str(),
            "http://convert.example.com/api/convert-base"
        );
    }

    #[test]
    fn client_construction_rejects_bad_base_url() {
        let mut config = ClientConfig::default();
        config.base_url = "definitely not a url".to_string();
        assert!(matches!(
            ApiClient::new(&config),
            Err(ConvertError::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_host_surfaces_as_network_error() {
        // Port 1 on localhost: nothing listens there, the connection is
        // refused immediately.
        let client = ApiClient::new(&config_for("http://127.0.0.1:1")).unwrap();
        let err = client
            .send(ConversionRequest::Image(ImageSource::Url(
                "https://example.com/a.png".into(),
            )))
            .await
            .unwrap_err();
        assert!(matches!(err, ConvertError::Network { .. }));
        assert!(err.to_string().starts_with("An error occurred:"));
    }
}
