use std::collections::HashMap;

use actix_multipart::Multipart;
use futures_util::TryStreamExt;

use crate::errors::AppError;

/// One multipart field, fully buffered.
#[derive(Debug, Clone, Default)]
pub struct FormField {
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl FormField {
    pub fn text(value: impl Into<String>) -> Self {
        FormField { bytes: value.into().into_bytes(), ..Default::default() }
    }

    pub fn file(content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        FormField {
            content_type: Some(content_type.into()),
            bytes,
        }
    }
}

/// A buffered multipart form. When a name repeats, the first value is kept.
#[derive(Debug, Default)]
pub struct FormData {
    fields: HashMap<String, FormField>,
}

impl FormData {
    /// Drains the multipart stream, failing once more than `limit` bytes of
    /// field content have been read.
    pub async fn read(mut payload: Multipart, limit: usize) -> Result<Self, AppError> {
        let mut form = FormData::default();
        let mut total = 0usize;

        while let Some(mut field) = payload.try_next().await? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };
            let content_type = field.content_type().map(|mime| mime.essence_str().to_owned());

            let mut bytes = Vec::new();
            while let Some(chunk) = field.try_next().await? {
                total += chunk.len();
                if total > limit {
                    return Err(AppError::PayloadTooLarge(limit));
                }
                bytes.extend_from_slice(&chunk);
            }

            form.insert(name, FormField { content_type, bytes });
        }

        tracing::debug!(fields = form.fields.len(), bytes = total, "Read multipart form");
        Ok(form)
    }

    pub fn insert(&mut self, name: impl Into<String>, field: FormField) {
        self.fields.entry(name.into()).or_insert(field);
    }

    pub fn with(mut self, name: impl Into<String>, field: FormField) -> Self {
        self.insert(name, field);
        self
    }

    /// The field decoded as text, if present.
    pub fn text(&self, name: &str) -> Option<String> {
        self.fields
            .get(name)
            .map(|field| String::from_utf8_lossy(&field.bytes).into_owned())
    }

    /// Text that must be present and not blank.
    pub fn required_text(&self, name: &'static str) -> Result<String, AppError> {
        self.text(name)
            .filter(|value| !value.trim().is_empty())
            .ok_or(AppError::MissingField(name))
    }

    /// A non-empty binary field, removed from the form.
    pub fn take_file(&mut self, name: &'static str) -> Result<FormField, AppError> {
        self.fields
            .remove(name)
            .filter(|field| !field.bytes.is_empty())
            .ok_or(AppError::MissingField(name))
    }
}
