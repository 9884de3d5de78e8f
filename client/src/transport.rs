//! Blocking HTTP transport backed by ureq.
//!
//! # Design
//! The request body is streamed from a `ProgressReader`, which reports the
//! running byte count every time ureq pulls the next chunk. Reads are capped
//! at `CHUNK_SIZE` so large uploads produce a steady series of progress
//! events. HTTP statuses are never turned into errors; only a missing or
//! truncated response is a `TransportError`.

use std::io::{self, Cursor, Read};

use httpdrop_core::{HttpMethod, HttpRequest, HttpResponse, Transport, TransportError};
use tracing::debug;
use ureq::http::Response;
use ureq::typestate::WithBody;
use ureq::{Agent, Body, RequestBuilder, SendBody};

use crate::config::ClientConfig;

pub const CHUNK_SIZE: usize = 16 * 1024;

/// Wraps a body reader and reports `(loaded, total)` after each read.
pub struct ProgressReader<'a, R> {
    inner: R,
    loaded: u64,
    total: u64,
    progress: &'a mut dyn FnMut(u64, u64),
}

impl<'a, R: Read> ProgressReader<'a, R> {
    pub fn new(inner: R, total: u64, progress: &'a mut dyn FnMut(u64, u64)) -> Self {
        Self {
            inner,
            loaded: 0,
            total,
            progress,
        }
    }

    pub fn loaded(&self) -> u64 {
        self.loaded
    }
}

impl<R: Read> Read for ProgressReader<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let max = buf.len().min(CHUNK_SIZE);
        let n = self.inner.read(&mut buf[..max])?;
        if n > 0 {
            self.loaded += n as u64;
            (self.progress)(self.loaded, self.total);
        }
        Ok(n)
    }
}

#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new(config: &ClientConfig) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(config.timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(&ClientConfig::default())
    }
}

fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

/// Send `bytes` through a `ProgressReader` so every chunk is reported.
fn send_streamed(
    builder: RequestBuilder<WithBody>,
    bytes: Vec<u8>,
    progress: &mut dyn FnMut(u64, u64),
) -> Result<Response<Body>, ureq::Error> {
    let total = bytes.len() as u64;
    let mut reader = ProgressReader::new(Cursor::new(bytes), total, progress);
    builder.send(SendBody::from_reader(&mut reader))
}

fn request_error(url: &str, e: impl std::fmt::Display) -> TransportError {
    TransportError::Request {
        url: url.to_string(),
        reason: e.to_string(),
    }
}

impl Transport for UreqTransport {
    fn send(
        &self,
        request: HttpRequest,
        progress: &mut dyn FnMut(u64, u64),
    ) -> Result<HttpResponse, TransportError> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;
        debug!(method = method.as_str(), %url, "sending");

        let result = match (method, body) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(&url), &headers).call(),
            (HttpMethod::Delete, _) => with_headers(self.agent.delete(&url), &headers).call(),
            (HttpMethod::Post, Some(bytes)) => {
                send_streamed(with_headers(self.agent.post(&url), &headers), bytes, progress)
            }
            (HttpMethod::Post, None) => with_headers(self.agent.post(&url), &headers).send_empty(),
            (HttpMethod::Put, Some(bytes)) => {
                send_streamed(with_headers(self.agent.put(&url), &headers), bytes, progress)
            }
            (HttpMethod::Put, None) => with_headers(self.agent.put(&url), &headers).send_empty(),
        };

        let mut response = result.map_err(|e| request_error(&url, e))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| request_error(&url, e))?;
        debug!(%url, status, "response received");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
