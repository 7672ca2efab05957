//! Employee photo uploads.
//!
//! Photos are embedded in the record as base64 data URIs. Uploads are
//! checked for size and declared media type before anything is read.

use std::path::Path;

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use tracing::debug;

use crate::error::{Error, Result};

/// Media type assumed when the file extension is unknown.
const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Check an upload against the size limit and media type.
///
/// # Errors
///
/// Returns [`Error::PhotoTooLarge`] when `size` exceeds `max`, otherwise
/// [`Error::NotAnImage`] when `media_type` is not `image/*`.
pub fn validate(size: u64, media_type: &str, max: u64) -> Result<()> {
    if size > max {
        return Err(Error::photo_too_large(size, max));
    }
    if !media_type.starts_with("image/") {
        return Err(Error::not_an_image(media_type));
    }
    Ok(())
}

/// Encode bytes as a `data:` URI.
#[must_use]
pub fn encode_data_uri(media_type: &str, bytes: &[u8]) -> String {
    format!("data:{media_type};base64,{}", B64.encode(bytes))
}

/// The media type declared by a file's extension.
#[must_use]
pub fn media_type_for(path: &Path) -> String {
    mime_guess::from_path(path)
        .first()
        .map_or_else(|| FALLBACK_MEDIA_TYPE.to_string(), |mime| mime.to_string())
}

/// Read and encode a photo file.
///
/// The size is taken from file metadata so oversized files are rejected
/// without being read.
///
/// # Errors
///
/// Returns a validation error for oversized or non-image files, or an I/O
/// error if the file cannot be read.
pub async fn read_photo(path: impl AsRef<Path>, max: u64) -> Result<String> {
    let path = path.as_ref();
    let media_type = media_type_for(path);
    let size = tokio::fs::metadata(path).await?.len();
    validate(size, &media_type, max)?;

    let bytes = tokio::fs::read(path).await?;
    debug!("Encoded {} ({} bytes, {})", path.display(), bytes.len(), media_type);
    Ok(encode_data_uri(&media_type, &bytes))
}

/// Edit-photo dialog state.
///
/// The preview starts at the employee's current photo. Each finished upload
/// replaces it, so when uploads overlap the last one to complete wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhotoDraft {
    original: String,
    preview: String,
}

impl PhotoDraft {
    /// Start editing from the current photo, if any.
    #[must_use]
    pub fn new(current: Option<&str>) -> Self {
        let current = current.unwrap_or_default().to_string();
        Self {
            original: current.clone(),
            preview: current,
        }
    }

    /// The photo that would be saved. Empty means none.
    #[must_use]
    pub fn preview(&self) -> &str {
        &self.preview
    }

    /// Whether a photo is showing.
    #[must_use]
    pub fn has_preview(&self) -> bool {
        !self.preview.is_empty()
    }

    /// An upload finished encoding.
    pub fn complete_upload(&mut self, data_uri: String) {
        self.preview = data_uri;
    }

    /// Clear the preview.
    pub fn remove(&mut self) {
        self.preview.clear();
    }

    /// Discard changes, restoring the original photo.
    pub fn cancel(&mut self) {
        self.preview.clone_from(&self.original);
    }

    /// Finish editing, yielding the value for the directory's photo update.
    #[must_use]
    pub fn save(self) -> String {
        self.preview
    }
}
