//! The save-file flow: write a binary attachment to disk and let it go.
//!
//! The browser front end creates a temporary object URL, clicks a synthetic
//! link, and revokes the URL immediately. The equivalent contract here:
//! write the bytes atomically (temp name + rename, so no partial files are
//! ever observable) and consume the attachment, releasing the bytes as soon
//! as the save is done. Repeated conversions therefore never accumulate
//! buffers.

use crate::error::ConvertError;
use crate::outcome::BinaryAttachment;
use std::path::{Path, PathBuf};
use tracing::info;

/// Fallback name when the suggested filename sanitises down to nothing.
const FALLBACK_NAME: &str = "converted_file";

/// Save the attachment under its suggested (sanitised) name inside `dir`.
///
/// Returns the final path. The attachment is consumed; its bytes are
/// released when this function returns.
pub async fn save_attachment(
    attachment: BinaryAttachment,
    dir: &Path,
) -> Result<PathBuf, ConvertError> {
    let filename = sanitize_filename(&attachment.suggested_filename);
    let path = dir.join(&filename);

    let save_failed = |source: std::io::Error| ConvertError::SaveFailed {
        path: path.clone(),
        source,
    };

    tokio::fs::create_dir_all(dir).await.map_err(save_failed)?;

    // Atomic write: temp name in the same directory, then rename.
    let tmp_path = dir.join(format!("{filename}.part"));
    tokio::fs::write(&tmp_path, &attachment.bytes)
        .await
        .map_err(save_failed)?;
    tokio::fs::rename(&tmp_path, &path)
        .await
        .map_err(save_failed)?;

    info!(
        "Saved {} bytes to {}",
        attachment.bytes.len(),
        path.display()
    );

    Ok(path)
}

/// Make a server-suggested filename safe to create locally.
///
/// Path separators, control characters, and other characters that are
/// forbidden on common filesystems become underscores; leading/trailing
/// dots and spaces are stripped so the name cannot escape `dir` or hide
/// itself.
fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim_matches(&['_', ' ', '.'][..]);
    if cleaned.is_empty() {
        FALLBACK_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn attachment(name: &str) -> BinaryAttachment {
        BinaryAttachment {
            bytes: Bytes::from_static(b"converted bytes"),
            suggested_filename: name.to_string(),
        }
    }

    #[test]
    fn sanitize_replaces_separators_and_strips_dots() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "etc_passwd");
        assert_eq!(sanitize_filename("a:b*c.png"), "a_b_c.png");
        assert_eq!(sanitize_filename("  .hidden.  "), "hidden");
        assert_eq!(sanitize_filename("///"), "converted_file");
        assert_eq!(sanitize_filename("report.pdf"), "report.pdf");
    }

    #[tokio::test]
    async fn save_writes_bytes_under_suggested_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_attachment(attachment("x.png"), dir.path())
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("x.png"));
        assert_eq!(std::fs::read(&path).unwrap(), b"converted bytes");
        // No .part leftover from the atomic write.
        assert!(!dir.path().join("x.png.part").exists());
    }

    #[tokio::test]
    async fn save_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("downloads/today");
        let path = save_attachment(attachment("doc.pdf"), &nested)
            .await
            .unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn save_neutralises_traversal_attempts() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_attachment(attachment("../escape.bin"), dir.path())
            .await
            .unwrap();
        assert!(path.starts_with(dir.path()));
        assert_eq!(path.file_name().unwrap(), "escape.bin");
    }
}
