//! Image payload preparation: base64 encoding and MIME detection.

use crate::utils::error::{AuditError, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use std::path::Path;

/// Encode raw image bytes as standard base64, safe for a JSON request body.
pub fn encode_image(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Drop a `data:<mime>;base64,` prefix if present, so a payload pasted from a
/// browser data URL is accepted verbatim.
pub fn strip_data_uri(payload: &str) -> &str {
    if payload.starts_with("data:") {
        if let Some(idx) = payload.find(',') {
            return &payload[idx + 1..];
        }
    }
    payload
}

/// Detect the MIME type of an image file by extension.
///
/// Restricted to the formats the analysis service accepts; anything else is
/// rejected before a request is built.
pub fn detect_mime(path: &Path) -> Result<&'static str> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "jpg" | "jpeg" => Ok("image/jpeg"),
        "png" => Ok("image/png"),
        "gif" => Ok("image/gif"),
        "webp" => Ok("image/webp"),
        other => Err(AuditError::ValidationError {
            field: "image".to_string(),
            value: path.display().to_string(),
            reason: if other.is_empty() {
                "File has no extension".to_string()
            } else {
                format!("Unsupported image extension: {}", other)
            },
        }),
    }
}
