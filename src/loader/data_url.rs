//! Binary image to `data:` URL conversion

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use tracing::{debug, instrument};

use crate::constants::mime;
use crate::error::AppError;

/// Guesses an image MIME type from its leading magic bytes.
pub fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some(mime::JPEG)
    } else if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        Some(mime::PNG)
    } else if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        Some(mime::GIF)
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some(mime::WEBP)
    } else {
        None
    }
}

/// Picks the MIME type for the data URL: the response's `image/*` content
/// type (parameters dropped), else the sniffed type, else octet-stream.
pub fn resolve_mime(content_type: Option<&str>, bytes: &[u8]) -> String {
    let declared = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase())
        .filter(|ct| ct.starts_with("image/"));

    declared.unwrap_or_else(|| {
        sniff_image_mime(bytes)
            .unwrap_or(mime::OCTET_STREAM)
            .to_string()
    })
}

/// Formats `data:<mime>;base64,<payload>`.
pub fn encode_data_url(mime_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes))
}

/// Splits a base64 data URL into its MIME type and decoded bytes.
pub fn decode_data_url(data_url: &str) -> Result<(String, Vec<u8>), AppError> {
    let rest = data_url
        .strip_prefix("data:")
        .ok_or_else(|| AppError::image_decode("missing data: prefix"))?;
    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| AppError::image_decode("missing ',' separator"))?;
    let mime_type = header
        .strip_suffix(";base64")
        .ok_or_else(|| AppError::image_decode("data URL is not base64 encoded"))?;

    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| AppError::image_decode(format!("invalid base64 payload: {e}")))?;

    Ok((mime_type.to_string(), bytes))
}

/// Converts a webcam response body into a data URL.
///
/// Encoding runs on the blocking pool so a large snapshot does not stall the
/// runtime; the caller just awaits the finished string.
#[instrument(skip(bytes), fields(len = bytes.len()))]
pub async fn image_bytes_to_data_url(
    content_type: Option<String>,
    bytes: Bytes,
) -> Result<String, AppError> {
    let data_url = tokio::task::spawn_blocking(move || {
        let mime_type = resolve_mime(content_type.as_deref(), &bytes);
        encode_data_url(&mime_type, &bytes)
    })
    .await
    .map_err(|e| AppError::image_decode(format!("encoding task failed: {e}")))?;

    debug!("Encoded image into {} byte data URL", data_url.len());
    Ok(data_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    const JPEG_HEADER: [u8; 4] = [0xFF, 0xD8, 0xFF, 0xE0];

    #[test]
    fn test_sniff_image_mime() {
        assert_eq!(sniff_image_mime(&JPEG_HEADER), Some("image/jpeg"));
        assert_eq!(
            sniff_image_mime(b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR"),
            Some("image/png")
        );
        assert_eq!(sniff_image_mime(b"GIF89a\x01\x00"), Some("image/gif"));
        assert_eq!(sniff_image_mime(b"RIFF\0\0\0\0WEBPVP8 "), Some("image/webp"));
        assert_eq!(sniff_image_mime(b"<html>"), None);
        assert_eq!(sniff_image_mime(&[]), None);
    }

    #[test]
    fn test_resolve_mime_prefers_declared_image_type() {
        assert_eq!(
            resolve_mime(Some("image/png; charset=binary"), &JPEG_HEADER),
            "image/png"
        );
        assert_eq!(resolve_mime(Some("IMAGE/JPEG"), b"xx"), "image/jpeg");
    }

    #[test]
    fn test_resolve_mime_falls_back_to_sniffing() {
        assert_eq!(
            resolve_mime(Some("application/octet-stream"), &JPEG_HEADER),
            "image/jpeg"
        );
        assert_eq!(resolve_mime(None, &JPEG_HEADER), "image/jpeg");
        assert_eq!(resolve_mime(None, b"plain"), "application/octet-stream");
    }

    #[test]
    fn test_encode_data_url() {
        assert_eq!(
            encode_data_url("image/jpeg", &JPEG_HEADER),
            "data:image/jpeg;base64,/9j/4A=="
        );
    }

    #[test]
    fn test_decode_data_url_returns_original_bytes() {
        let bytes: Vec<u8> = (0..=255).collect();
        let (mime_type, decoded) =
            decode_data_url(&encode_data_url("image/jpeg", &bytes)).unwrap();
        assert_eq!(mime_type, "image/jpeg");
        assert_eq!(decoded, bytes);
    }

    #[test]
    fn test_decode_data_url_rejects_malformed_input() {
        assert!(decode_data_url("image/jpeg;base64,AAAA").is_err());
        assert!(decode_data_url("data:image/jpeg;base64").is_err());
        assert!(decode_data_url("data:text/plain,hello").is_err());
        assert!(matches!(
            decode_data_url("data:image/jpeg;base64,***"),
            Err(AppError::ImageDecode(_))
        ));
    }

    #[tokio::test]
    async fn test_image_bytes_to_data_url() {
        let data_url =
            image_bytes_to_data_url(Some("image/jpeg".to_string()), Bytes::from_static(&JPEG_HEADER))
                .await
                .unwrap();
        assert_eq!(data_url, "data:image/jpeg;base64,/9j/4A==");
    }

    #[tokio::test]
    async fn test_image_bytes_to_data_url_empty_body_round_trips() {
        let data_url = image_bytes_to_data_url(Some("image/jpeg".to_string()), Bytes::new())
            .await
            .unwrap();
        assert_eq!(data_url, "data:image/jpeg;base64,");

        let (mime_type, decoded) = decode_data_url(&data_url).unwrap();
        assert_eq!(mime_type, "image/jpeg");
        assert!(decoded.is_empty());
    }
}
