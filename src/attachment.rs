//! Attachment encoding.
//!
//! Notes embed at most one image, stored inline as a data URL so the
//! collection stays a single self-contained blob with no external file
//! references.

use std::{fs, path::Path};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::debug;

use crate::{MemoError, Result};

/// Image extensions accepted for attachments, with their MIME types.
const IMAGE_TYPES: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
    ("svg", "image/svg+xml"),
    ("bmp", "image/bmp"),
];

/// Encodes an image file into a `data:` URL.
///
/// Fails on unreadable files and on extensions outside the accepted image
/// set; both are surfaced to the caller rather than silently dropped.
pub fn encode_data_url(path: &Path) -> Result<String> {
    let mime = mime_for(path).ok_or_else(|| MemoError::Attachment {
        message: format!(
            "unsupported attachment type: {} (expected an image file)",
            path.display()
        ),
    })?;

    let bytes = fs::read(path).map_err(|e| MemoError::Attachment {
        message: format!("failed to read {}: {}", path.display(), e),
    })?;

    debug!(
        "Encoded attachment {} ({} bytes, {})",
        path.display(),
        bytes.len(),
        mime
    );
    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(&bytes)))
}

fn mime_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    IMAGE_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map(|(_, mime)| *mime)
}
