//! I/O-free core of the httpdrop page client.
//!
//! # Overview
//! Builds multipart form submissions as plain `HttpRequest` values,
//! classifies responses into a `SubmissionOutcome`, and routes that outcome
//! to caller-supplied hooks. The network is reached only through the
//! `Transport` trait and the page only through the `Document` trait, so
//! everything here runs deterministically under test.
//!
//! # Design
//! - `FormSubmitter` holds the page base URL; each submission is split into
//!   `build_request` and `complete`, with `submit` as the blocking driver.
//! - Exactly one completion hook fires per submission; HTTP statuses and
//!   lost connections are outcomes, never errors.
//! - `page` holds the drop-box page's handlers and hooks, written against
//!   `dom::Document` rather than a live browser.

pub mod dom;
pub mod error;
pub mod form;
pub mod hooks;
pub mod http;
pub mod multipart;
pub mod page;
pub mod progress;
pub mod submitter;

pub use dom::{Document, Element, MemoryDocument, MemoryElement};
pub use error::{DomError, FormError, SubmitError, TransportError};
pub use form::{FieldValue, FilePart, Form, FormField};
pub use hooks::{dispatch, Callbacks, NoHooks, SubmitHooks};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use page::{Binding, EventResult, PageEvent};
pub use progress::{percent, ProgressTracker};
pub use submitter::{FormSubmitter, InFlight, SubmissionOutcome, SubmissionState};
