//! `multipart/form-data` encoding of a form's fields.
//!
//! Bodies are produced by reqwest's blocking multipart writer: one part per
//! field in field order, files with a `filename` parameter and their own
//! `Content-Type`. Quotes and line breaks in names and filenames are
//! escaped by reqwest.

use std::io::Read;

use reqwest::blocking::multipart::{Form as MultipartForm, Part};

use crate::error::FormError;
use crate::form::{FieldValue, FormField};

/// An encoded body and the `Content-Type` header that goes with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub content_type: String,
    pub body: Vec<u8>,
}

/// Encode `fields` as a complete multipart body under a fresh boundary.
pub fn encode(fields: &[FormField]) -> Result<Encoded, FormError> {
    let mut form = MultipartForm::new();
    for field in fields {
        form = match &field.value {
            FieldValue::Text(value) => form.text(field.name.clone(), value.clone()),
            FieldValue::File(file) => {
                let part = Part::bytes(file.data.clone())
                    .file_name(file.filename.clone())
                    .mime_str(&file.content_type)
                    .map_err(|e| FormError::Encode {
                        field: field.name.clone(),
                        reason: e.to_string(),
                    })?;
                form.part(field.name.clone(), part)
            }
        };
    }

    let content_type = format!("multipart/form-data; boundary={}", form.boundary());
    let mut body = Vec::new();
    form.into_reader()
        .read_to_end(&mut body)
        .map_err(|e| FormError::Encode {
            field: String::new(),
            reason: e.to_string(),
        })?;
    Ok(Encoded { content_type, body })
}
