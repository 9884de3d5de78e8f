//! Error types for form submission and page wiring.
//!
//! # Design
//! HTTP statuses and lost connections are not errors here: they are
//! `SubmissionOutcome` values routed to the caller's hooks. The types below
//! cover what happens before a request exists (`FormError`), inside a
//! transport (`TransportError`, converted into an outcome by the submitter),
//! a rejected second submission (`SubmitError`), and lookups of page
//! elements that are not there (`DomError`, logged and skipped).

use thiserror::Error;

/// The form cannot be turned into a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("invalid base url {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("invalid form action {action:?}: {reason}")]
    InvalidAction { action: String, reason: String },

    /// A field could not be encoded, usually a malformed file content type.
    #[error("cannot encode field {field:?}: {reason}")]
    Encode { field: String, reason: String },
}

/// The transport could not obtain a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection, TLS, timeout or I/O failure while talking to `url`.
    #[error("request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    /// The task running the transport did not finish.
    #[error("transport aborted: {0}")]
    Aborted(String),
}

/// A submission was refused before any hook ran.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("a submission is already in flight")]
    AlreadyInFlight,

    #[error(transparent)]
    Form(#[from] FormError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("no element with id '{0}'")]
    ElementNotFound(String),
}
