//! Multipart form handling and validation for the admin panels.
//!
//! Every panel follows the same shape: parse the multipart body into text
//! fields and file fields, run the required-field checks before any upload
//! or query is issued, then upload and persist.

use std::collections::HashMap;

use axum::extract::Multipart;

use crate::error::AppError;

/// Upload cap for installer files, in bytes (50 MB).
///
/// Larger binaries must be linked via a direct-download URL instead of
/// uploaded.
pub const MAX_INSTALLER_SIZE_BYTES: usize = 50 * 1024 * 1024;

/// A file selected in an admin form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    /// The file size in whole bytes.
    #[must_use]
    pub const fn size_bytes(&self) -> usize {
        self.bytes.len()
    }
}

/// Parsed multipart form: text fields and non-empty file fields.
#[derive(Debug, Default)]
pub struct AdminForm {
    texts: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl AdminForm {
    /// Drain a multipart request body.
    ///
    /// File inputs left empty by the browser arrive as zero-byte parts and
    /// are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if the multipart stream is malformed
    /// or exceeds the request body limit.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("invalid form upload: {e}")))?
        {
            let Some(name) = field.name().map(ToString::to_string) else {
                continue;
            };

            if let Some(filename) = field.file_name().map(ToString::to_string) {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("invalid form upload: {e}")))?
                    .to_vec();

                if filename.is_empty() || bytes.is_empty() {
                    continue;
                }

                form.files.insert(
                    name,
                    UploadedFile {
                        filename,
                        content_type,
                        bytes,
                    },
                );
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("invalid form upload: {e}")))?;
                form.texts.insert(name, value);
            }
        }

        Ok(form)
    }

    /// A text field, trimmed; empty string if absent.
    #[must_use]
    pub fn text(&self, name: &str) -> &str {
        self.texts.get(name).map_or("", |v| v.trim())
    }

    /// A text field, trimmed; `None` if absent or blank.
    #[must_use]
    pub fn optional_text(&self, name: &str) -> Option<&str> {
        Some(self.text(name)).filter(|v| !v.is_empty())
    }

    /// A file field, if one was selected.
    #[must_use]
    pub fn file(&self, name: &str) -> Option<&UploadedFile> {
        self.files.get(name)
    }

    #[cfg(test)]
    fn with_entries(texts: &[(&str, &str)], files: &[(&str, UploadedFile)]) -> Self {
        Self {
            texts: texts
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            files: files
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.clone()))
                .collect(),
        }
    }
}

// =============================================================================
// Validation (runs before any upload or query)
// =============================================================================

/// Validate the service form.
///
/// Create mode requires both a title and an image; edits keep the existing
/// image when no replacement is selected.
///
/// # Errors
///
/// Returns the message to show the admin.
pub fn validate_service_form(
    title: &str,
    has_new_image: bool,
    is_edit: bool,
) -> Result<(), String> {
    if title.is_empty() || (!is_edit && !has_new_image) {
        return Err("The title and image are required.".to_string());
    }
    Ok(())
}

/// Validate the software form.
///
/// # Errors
///
/// Returns the message to show the admin.
pub fn validate_software_form(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("The software name is required.".to_string());
    }
    Ok(())
}

/// Validate the carousel form.
///
/// # Errors
///
/// Returns the message to show the admin.
pub fn validate_carousel_form(has_image: bool) -> Result<(), String> {
    if !has_image {
        return Err("Please select an image file.".to_string());
    }
    Ok(())
}

/// Reject an installer over the upload cap before any upload attempt.
///
/// # Errors
///
/// Returns a message naming the 50 MB limit and the file's actual size.
pub fn validate_installer_size(filename: &str, size_bytes: usize) -> Result<(), String> {
    if size_bytes > MAX_INSTALLER_SIZE_BYTES {
        #[allow(clippy::cast_precision_loss)] // File sizes stay far below f64 precision
        let size_mb = size_bytes as f64 / 1024.0 / 1024.0;
        return Err(format!(
            "The installer \"{filename}\" is {size_mb:.2} MB, which exceeds the 50 MB upload \
             limit. Paste a direct-download URL instead."
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn file(bytes: &[u8]) -> UploadedFile {
        UploadedFile {
            filename: "a.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: bytes.to_vec(),
        }
    }

    #[test]
    fn test_text_fields_are_trimmed() {
        let form = AdminForm::with_entries(&[("title", "  Spatial Analysis  ")], &[]);
        assert_eq!(form.text("title"), "Spatial Analysis");
        assert_eq!(form.text("missing"), "");
    }

    #[test]
    fn test_optional_text_skips_blank() {
        let form = AdminForm::with_entries(&[("video_url", "   ")], &[]);
        assert_eq!(form.optional_text("video_url"), None);

        let form = AdminForm::with_entries(&[("video_url", "https://youtu.be/x")], &[]);
        assert_eq!(form.optional_text("video_url"), Some("https://youtu.be/x"));
    }

    #[test]
    fn test_service_create_requires_title_and_image() {
        // Empty form in create mode: rejected before anything is uploaded
        let err = validate_service_form("", false, false).unwrap_err();
        assert_eq!(err, "The title and image are required.");

        assert!(validate_service_form("Spatial Analysis", false, false).is_err());
        assert!(validate_service_form("", true, false).is_err());
        assert!(validate_service_form("Spatial Analysis", true, false).is_ok());
    }

    #[test]
    fn test_service_edit_keeps_existing_image() {
        assert!(validate_service_form("Spatial Analysis", false, true).is_ok());
        assert!(validate_service_form("", false, true).is_err());
    }

    #[test]
    fn test_software_requires_name() {
        assert!(validate_software_form("").is_err());
        assert!(validate_software_form("TerraMapper").is_ok());
    }

    #[test]
    fn test_carousel_requires_image() {
        assert!(validate_carousel_form(false).is_err());
        assert!(validate_carousel_form(true).is_ok());
    }

    #[test]
    fn test_installer_at_limit_is_accepted() {
        assert!(validate_installer_size("setup.exe", MAX_INSTALLER_SIZE_BYTES).is_ok());
    }

    #[test]
    fn test_oversized_installer_message_names_limit_and_size() {
        let size = 51 * 1024 * 1024;
        let err = validate_installer_size("setup.exe", size).unwrap_err();
        assert!(err.contains("50 MB"), "must name the limit: {err}");
        assert!(err.contains("51.00 MB"), "must name the actual size: {err}");
        assert!(err.contains("setup.exe"), "must name the file: {err}");
    }

    #[test]
    fn test_uploaded_file_size() {
        assert_eq!(file(&[0u8; 1024]).size_bytes(), 1024);
    }
}
