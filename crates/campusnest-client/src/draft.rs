//! Multipart payloads for property create/update.

use std::path::Path;

use campusnest_core::PropertyStatus;
use reqwest::multipart::{Form, Part};
use rust_decimal::Decimal;

use crate::error::ApiError;

/// A new image attached to a property draft.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Reads an image from disk, inferring the content type from the extension.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::ImageRead`] if the file cannot be read and
    /// [`ApiError::InvalidDraft`] if the extension is not a supported image type.
    pub async fn from_path(path: &Path) -> Result<Self, ApiError> {
        let content_type = content_type_for(path).ok_or_else(|| {
            ApiError::InvalidDraft(format!("unsupported image type: {}", path.display()))
        })?;
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ApiError::ImageRead {
                path: path.display().to_string(),
                source,
            })?;
        let file_name = path
            .file_name()
            .map_or_else(|| "image".to_owned(), |n| n.to_string_lossy().into_owned());
        Ok(Self {
            file_name,
            content_type: content_type.to_owned(),
            bytes,
        })
    }
}

fn content_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

/// Editable listing fields sent as `multipart/form-data`.
///
/// `existing_images` are the backend paths to keep (in order) on update;
/// `uploads` are appended after them by the backend.
#[derive(Debug, Clone, Default)]
pub struct PropertyDraft {
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub location: String,
    pub university_id: Option<String>,
    pub room_type: Option<String>,
    pub amenities: Vec<String>,
    pub furnished: Option<bool>,
    pub status: Option<PropertyStatus>,
    pub existing_images: Vec<String>,
    pub uploads: Vec<ImageUpload>,
}

impl PropertyDraft {
    /// Checks the fields the backend would reject, before any network call.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidDraft`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.title.trim().is_empty() {
            return Err(ApiError::InvalidDraft("title is required".into()));
        }
        if self.location.trim().is_empty() {
            return Err(ApiError::InvalidDraft("location is required".into()));
        }
        if self.price <= Decimal::ZERO {
            return Err(ApiError::InvalidDraft(format!(
                "price must be positive, got {}",
                self.price
            )));
        }
        Ok(())
    }

    /// Builds the multipart form.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidDraft`] if validation fails and
    /// [`ApiError::Http`] if an upload's content type is not a valid MIME string.
    pub(crate) fn to_form(&self) -> Result<Form, ApiError> {
        self.validate()?;

        let encode = |values: &[String]| {
            serde_json::to_string(values).map_err(|e| ApiError::Encode {
                context: "property draft list field".to_owned(),
                source: e,
            })
        };

        let mut form = Form::new()
            .text("title", self.title.trim().to_owned())
            .text("description", self.description.clone())
            .text("price", self.price.to_string())
            .text("location", self.location.trim().to_owned())
            .text("amenities", encode(&self.amenities)?)
            .text("existingImages", encode(&self.existing_images)?);

        if let Some(university_id) = &self.university_id {
            form = form.text("universityId", university_id.clone());
        }
        if let Some(room_type) = &self.room_type {
            form = form.text("roomType", room_type.clone());
        }
        if let Some(furnished) = self.furnished {
            form = form.text("furnished", furnished.to_string());
        }
        if let Some(status) = self.status {
            form = form.text("status", status.as_wire());
        }

        for upload in &self.uploads {
            let part = Part::bytes(upload.bytes.clone())
                .file_name(upload.file_name.clone())
                .mime_str(&upload.content_type)?;
            form = form.part("images", part);
        }

        Ok(form)
    }
}
