// src/image.rs
//! Image intake: data-URL parsing for the HTTP path, file loading for the
//! CLI path. Both end in the same [`EncodedImage`] the analysis and relay
//! clients consume.

use anyhow::{Context, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use std::path::Path;
use thiserror::Error;

/// Why a submitted data URL could not be turned into an image.
#[derive(Error, Debug)]
pub enum DataUrlError {
    #[error("not a data: URL")]
    MissingScheme,
    #[error("data URL has no ;base64, marker")]
    MissingBase64Marker,
    #[error("invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// One uploaded image: MIME type plus base64 payload.
///
/// Immutable once built; a new upload builds a new value. The MIME string is
/// passed through untouched — whatever the browser or `mime_guess` claims is
/// what the upstream services get.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub mime_type: String,
    /// Standard-alphabet base64, validated at construction.
    pub payload: String,
}

impl EncodedImage {
    /// Parse a `data:<mime>;base64,<payload>` URL.
    ///
    /// The payload is decoded once here so malformed input fails at intake
    /// instead of surfacing as a confusing upstream rejection.
    pub fn from_data_url(url: &str) -> Result<Self, DataUrlError> {
        let rest = url.strip_prefix("data:").ok_or(DataUrlError::MissingScheme)?;
        let (mime_type, payload) = rest
            .split_once(";base64,")
            .ok_or(DataUrlError::MissingBase64Marker)?;
        BASE64.decode(payload)?;
        Ok(Self {
            mime_type: mime_type.to_string(),
            payload: payload.to_string(),
        })
    }

    /// Wrap raw bytes, encoding them for transport.
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            mime_type: mime_type.into(),
            payload: BASE64.encode(bytes),
        }
    }

    /// Decode the payload back to raw bytes (for multipart uploads).
    pub fn decode(&self) -> Result<Vec<u8>, DataUrlError> {
        Ok(BASE64.decode(&self.payload)?)
    }

    /// Re-assemble the browser-style data URL.
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.payload)
    }

    /// A plausible file extension for this MIME type, for upload filenames.
    pub fn file_extension(&self) -> &str {
        mime_guess::get_mime_extensions_str(&self.mime_type)
            .and_then(|exts| exts.first())
            .copied()
            .unwrap_or("bin")
    }
}

/// Load an image file from disk, guessing its MIME type from the extension.
/// Unrecognized extensions fall back to `application/octet-stream` and let
/// the upstream service decide whether it can cope.
pub async fn read_image(path: &Path) -> Result<EncodedImage> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read image file: {}", path.display()))?;
    let mime_type = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream");
    Ok(EncodedImage::from_bytes(mime_type, &bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_data_url_splits_mime_and_payload() {
        let image = EncodedImage::from_data_url("data:image/png;base64,aGVsbG8=").unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.payload, "aGVsbG8=");
        assert_eq!(image.decode().unwrap(), b"hello");
    }

    #[test]
    fn test_from_data_url_rejects_other_schemes() {
        let err = EncodedImage::from_data_url("https://example.com/cat.png").unwrap_err();
        assert!(matches!(err, DataUrlError::MissingScheme));
    }

    #[test]
    fn test_from_data_url_rejects_missing_marker() {
        // URL-encoded (non-base64) data URLs are not accepted
        let err = EncodedImage::from_data_url("data:text/plain,hello").unwrap_err();
        assert!(matches!(err, DataUrlError::MissingBase64Marker));
    }

    #[test]
    fn test_from_data_url_rejects_bad_base64() {
        let err = EncodedImage::from_data_url("data:image/png;base64,@@not-base64@@").unwrap_err();
        assert!(matches!(err, DataUrlError::Decode(_)));
    }

    #[test]
    fn test_data_url_round_trip() {
        let image = EncodedImage::from_bytes("image/jpeg", &[0xFF, 0xD8, 0xFF, 0xE0]);
        let parsed = EncodedImage::from_data_url(&image.to_data_url()).unwrap();
        assert_eq!(parsed, image);
        assert_eq!(parsed.decode().unwrap(), vec![0xFF, 0xD8, 0xFF, 0xE0]);
    }

    #[test]
    fn test_file_extension_for_known_and_unknown_types() {
        let png = EncodedImage::from_bytes("image/png", b"x");
        assert_eq!(png.file_extension(), "png");
        let blob = EncodedImage::from_bytes("application/x-made-up", b"x");
        assert_eq!(blob.file_extension(), "bin");
    }

    #[tokio::test]
    async fn test_read_image_guesses_mime_from_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        tokio::fs::write(&path, b"\x89PNG\r\n").await.unwrap();

        let image = read_image(&path).await.unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.decode().unwrap(), b"\x89PNG\r\n");
    }

    #[tokio::test]
    async fn test_read_image_unknown_extension_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.rawdump");
        tokio::fs::write(&path, b"data").await.unwrap();

        let image = read_image(&path).await.unwrap();
        assert_eq!(image.mime_type, "application/octet-stream");
    }

    #[tokio::test]
    async fn test_read_image_missing_file_is_contextual_error() {
        let err = read_image(Path::new("/nonexistent/photo.png"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/photo.png"));
    }
}
