//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The
//! submitter builds `HttpRequest` values and classifies `HttpResponse`
//! values; a `Transport` implementation owned by the host performs the
//! actual I/O. Progress is reported by the transport as raw
//! `(loaded, total)` byte counts and turned into percentages by the core.

use crate::error::TransportError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Parse a form `method` attribute. Matching is case-insensitive and
    /// surrounding whitespace is ignored.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "GET" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            "PUT" => Some(HttpMethod::Put),
            "DELETE" => Some(HttpMethod::Delete),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether a request body is sent with this method.
    pub fn allows_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }
}

/// An HTTP request described as plain data.
///
/// Built by `FormSubmitter::build_request`. `url` is always absolute.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Number of body bytes the transport will upload.
    pub fn content_length(&self) -> u64 {
        self.body.as_ref().map_or(0, |b| b.len() as u64)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
///
/// Only `status` and `body` take part in outcome classification.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Executes one `HttpRequest` on behalf of the submitter.
///
/// Implementations block until the response is complete. While the body is
/// uploaded they call `progress(loaded, total)` with the bytes sent so far;
/// `total` is zero when the size is not known up front.
pub trait Transport {
    fn send(
        &self,
        request: HttpRequest,
        progress: &mut dyn FnMut(u64, u64),
    ) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn send(
        &self,
        request: HttpRequest,
        progress: &mut dyn FnMut(u64, u64),
    ) -> Result<HttpResponse, TransportError> {
        (**self).send(request, progress)
    }
}
