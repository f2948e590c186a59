//! Base64 data URIs, the text form images travel in both directions.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::Serialize;

const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Request body for the predict endpoint: `{ "image": "<data uri>" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedPayload {
    #[serde(rename = "image")]
    pub data_url: String,
}

/// Encode raw bytes as `data:<media_type>;base64,<payload>`.
pub fn encode(bytes: &[u8], media_type: &str) -> EncodedPayload {
    let media_type = if media_type.trim().is_empty() {
        FALLBACK_MEDIA_TYPE
    } else {
        media_type.trim()
    };
    EncodedPayload {
        data_url: format!("data:{media_type};base64,{}", STANDARD.encode(bytes)),
    }
}

/// A data URI split into its media type and decoded bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedDataUrl {
    pub media_type: String,
    pub bytes: Vec<u8>,
}

/// Decode a base64 data URI returned by the service.
///
/// Returns `None` for anything that is not a base64 `data:` URI.
pub fn decode(data_url: &str) -> Option<DecodedDataUrl> {
    let rest = data_url.trim().strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let media_type = header.strip_suffix(";base64")?;
    let bytes = STANDARD.decode(payload.trim()).ok()?;
    Some(DecodedDataUrl {
        media_type: media_type.to_string(),
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_uses_declared_media_type() {
        let payload = encode(b"abc", "image/png");
        assert_eq!(payload.data_url, "data:image/png;base64,YWJj");
    }

    #[test]
    fn encode_falls_back_when_type_is_missing() {
        let payload = encode(&[0xff, 0xd8], "");
        assert_eq!(payload.data_url, "data:application/octet-stream;base64,/9g=");
    }

    #[test]
    fn payload_serializes_under_image_key() {
        let payload = encode(b"abc", "image/png");
        let body = serde_json::to_value(&payload).unwrap();
        assert_eq!(body, serde_json::json!({ "image": "data:image/png;base64,YWJj" }));
    }

    #[test]
    fn decode_rejects_non_base64_uris() {
        assert!(decode("data:image/svg+xml,<svg/>").is_none());
        assert!(decode("https://example.org/a.png").is_none());
        assert!(decode("data:image/png;base64,@@@").is_none());
    }

    #[test]
    fn decode_reads_media_type_and_bytes() {
        let decoded = decode("data:image/jpeg;base64,/9g=").unwrap();
        assert_eq!(decoded.media_type, "image/jpeg");
        assert_eq!(decoded.bytes, vec![0xff, 0xd8]);
    }
}
