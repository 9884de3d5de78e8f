//! Form-like entities handed to the submitter.
//!
//! A `Form` is a snapshot of a page form taken by the caller right before
//! submission: where it posts to, how, and the ordered field set. It is
//! borrowed by the submitter for the duration of one submission and passed
//! back to every hook.

use crate::http::HttpMethod;

/// A form snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    /// Element id of the form on the page, if it has one.
    pub id: Option<String>,
    /// Target URL, absolute or relative to the page base URL. Empty means
    /// the base URL itself.
    pub action: String,
    pub method: HttpMethod,
    pub fields: Vec<FormField>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub value: FieldValue,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    File(FilePart),
}

/// Contents of a file input.
///
/// An input with nothing selected is represented by `FilePart::empty()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl FilePart {
    pub fn new(filename: impl Into<String>, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            data,
        }
    }

    pub fn empty() -> Self {
        Self::new("", "application/octet-stream", Vec::new())
    }
}

impl Form {
    pub fn new(action: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            id: None,
            action: action.into(),
            method,
            fields: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Append a text field. Repeated names are kept in order.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(FormField {
            name: name.into(),
            value: FieldValue::Text(value.into()),
        });
        self
    }

    pub fn file(mut self, name: impl Into<String>, part: FilePart) -> Self {
        self.fields.push(FormField {
            name: name.into(),
            value: FieldValue::File(part),
        });
        self
    }

    /// Value of the first text field called `name`.
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.fields.iter().find_map(|f| match &f.value {
            FieldValue::Text(v) if f.name == name => Some(v.as_str()),
            _ => None,
        })
    }

    /// Number of non-empty files under `name`.
    pub fn file_count(&self, name: &str) -> usize {
        self.fields
            .iter()
            .filter(|f| f.name == name)
            .filter(|f| matches!(&f.value, FieldValue::File(p) if !p.filename.is_empty()))
            .count()
    }
}
