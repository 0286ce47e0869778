//! Request data model: what a single submission sends to the server.
//!
//! A [`ConversionRequest`] is built fresh per user action from the current
//! [`crate::pipeline::resolve::FormState`] and consumed by the transfer —
//! exactly one variant is active per submission, and nothing is retained
//! afterwards.

use crate::config::Presentation;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// One of the three supported operations.
///
/// The kind determines the endpoint route, the payload shape (multipart
/// upload vs. JSON body), how the response is interpreted, and the feedback
/// message texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    /// Re-encode an image (local file or remote URL).
    Image,
    /// Convert a document between PDF and DOC/DOCX.
    Document,
    /// Convert a numeric string between bases.
    Base,
}

impl OperationKind {
    /// Route below the server base URL.
    pub fn endpoint_path(&self) -> &'static str {
        match self {
            OperationKind::Image => "api/convert-image",
            OperationKind::Document => "api/convert-document",
            OperationKind::Base => "api/convert-base",
        }
    }

    /// Info message shown while the transfer is in flight.
    pub fn converting_message(&self) -> &'static str {
        match self {
            OperationKind::Image => "Converting image...",
            OperationKind::Document => "Converting document...",
            OperationKind::Base => "Converting number...",
        }
    }

    /// Error message when the form holds no usable input for this kind.
    pub fn missing_input_message(&self) -> &'static str {
        match self {
            OperationKind::Image => "Please upload an image file OR paste an image URL.",
            OperationKind::Document => "Please upload a document file.",
            OperationKind::Base => "Please enter a number to convert.",
        }
    }

    /// Capitalised noun for success messages ("Image converted and …").
    pub fn noun(&self) -> &'static str {
        match self {
            OperationKind::Image => "Image",
            OperationKind::Document => "Document",
            OperationKind::Base => "Number",
        }
    }

    /// Fallback attachment filename when the server suggests none.
    ///
    /// Only meaningful for the binary kinds; the image default diverges
    /// between the two presentation modes.
    pub fn default_filename(&self, presentation: Presentation) -> &'static str {
        match self {
            OperationKind::Image => presentation.image_default_filename(),
            _ => "converted_document.pdf",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OperationKind::Image => "image",
            OperationKind::Document => "document",
            OperationKind::Base => "base",
        };
        f.write_str(s)
    }
}

/// An owned binary file: name, media type, and bytes.
///
/// Cloning is cheap — the bytes are reference-counted.
#[derive(Clone, PartialEq, Eq)]
pub struct FileHandle {
    pub name: String,
    pub media_type: String,
    pub bytes: Bytes,
}

impl FileHandle {
    pub fn new(
        name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk into a handle, guessing the media type from
    /// the extension (`application/octet-stream` when unknown).
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let media_type = mime_guess::from_path(path).first_or_octet_stream();
        Ok(Self::new(name, media_type.essence_str(), bytes))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileHandle")
            .field("name", &self.name)
            .field("media_type", &self.media_type)
            .field("bytes", &format_args!("{} bytes", self.bytes.len()))
            .finish()
    }
}

/// Where an image submission gets its pixels from.
///
/// The two sources are mutually exclusive; when both are present in the
/// form, the resolver picks the file and ignores the URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageSource {
    /// A locally chosen file.
    File(FileHandle),
    /// A remote URL, either sent as a reference or materialised into bytes
    /// before transfer depending on the configured strategy.
    Url(String),
}

/// A fully resolved submission, ready for the transfer client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionRequest {
    Image(ImageSource),
    Document(FileHandle),
    Base(BaseQuery),
}

impl ConversionRequest {
    pub fn kind(&self) -> OperationKind {
        match self {
            ConversionRequest::Image(_) => OperationKind::Image,
            ConversionRequest::Document(_) => OperationKind::Document,
            ConversionRequest::Base(_) => OperationKind::Base,
        }
    }
}

/// Numeral systems accepted by the base-conversion endpoint.
///
/// Serialises lowercase to match the wire contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberBase {
    Binary,
    #[default]
    Decimal,
    Octal,
    Hexadecimal,
}

impl NumberBase {
    pub fn as_str(&self) -> &'static str {
        match self {
            NumberBase::Binary => "binary",
            NumberBase::Decimal => "decimal",
            NumberBase::Octal => "octal",
            NumberBase::Hexadecimal => "hexadecimal",
        }
    }
}

impl fmt::Display for NumberBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON body of a base-conversion request.
///
/// Field names are camelCase on the wire: `inputValue`, `sourceBase`,
/// `targetBase`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseQuery {
    pub input_value: String,
    pub source_base: NumberBase,
    pub target_base: NumberBase,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_paths_match_backend_contract() {
        assert_eq!(OperationKind::Image.endpoint_path(), "api/convert-image");
        assert_eq!(
            OperationKind::Document.endpoint_path(),
            "api/convert-document"
        );
        assert_eq!(OperationKind::Base.endpoint_path(), "api/convert-base");
    }

    #[test]
    fn base_query_serialises_camel_case_with_lowercase_bases() {
        let query = BaseQuery {
            input_value: "255".into(),
            source_base: NumberBase::Decimal,
            target_base: NumberBase::Hexadecimal,
        };
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "inputValue": "255",
                "sourceBase": "decimal",
                "targetBase": "hexadecimal",
            })
        );
    }

    #[test]
    fn number_base_round_trips_through_serde() {
        for base in [
            NumberBase::Binary,
            NumberBase::Decimal,
            NumberBase::Octal,
            NumberBase::Hexadecimal,
        ] {
            let json = serde_json::to_string(&base).unwrap();
            assert_eq!(json, format!("\"{base}\""));
            let back: NumberBase = serde_json::from_str(&json).unwrap();
            assert_eq!(back, base);
        }
    }

    #[test]
    fn file_handle_debug_hides_payload() {
        let handle = FileHandle::new("photo.png", "image/png", vec![0u8; 2048]);
        let debug = format!("{handle:?}");
        assert!(debug.contains("photo.png"));
        assert!(debug.contains("2048 bytes"));
    }

    #[test]
    fn request_kind_matches_variant() {
        let req = ConversionRequest::Image(ImageSource::Url("https://example.com/x.png".into()));
        assert_eq!(req.kind(), OperationKind::Image);

        let req = ConversionRequest::Base(BaseQuery {
            input_value: "1010".into(),
            source_base: NumberBase::Binary,
            target_base: NumberBase::Decimal,
        });
        assert_eq!(req.kind(), OperationKind::Base);
    }
}
