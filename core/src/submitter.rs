//! Request building, outcome classification and the synchronous
//! submission path.
//!
//! # Design
//! `FormSubmitter` holds the page base URL and an in-flight flag. A
//! submission is split the way the rest of the crate splits I/O:
//! `build_request` turns a `Form` into an `HttpRequest`, the host's
//! `Transport` executes it, and `complete` classifies whatever came back
//! into a `SubmissionOutcome`. `submit` strings those steps together for
//! blocking callers; the async path in `httpdrop-client` reuses the same
//! pieces.
//!
//! Lifecycle: `Idle -> Sending -> {Success | HttpFailure | NetworkFailure}`.
//! The flag makes `Sending` exclusive per submitter, so a double submit is
//! refused instead of racing two requests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};
use url::Url;

use crate::error::{FormError, SubmitError, TransportError};
use crate::form::Form;
use crate::hooks::{dispatch, SubmitHooks};
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::multipart;
use crate::progress::ProgressTracker;

/// How a submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Status 200 with the response body.
    Success(String),
    /// Any other status.
    HttpFailure(u16),
    /// No response at all.
    NetworkFailure(String),
}

impl SubmissionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionOutcome::Success(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Sending,
}

/// Submits forms relative to a page base URL.
#[derive(Debug)]
pub struct FormSubmitter {
    base_url: Url,
    in_flight: Arc<AtomicBool>,
}

/// Marks the owning submitter as `Sending` until dropped.
///
/// The guard owns a handle to the flag, so it can travel with a request
/// to whichever thread performs it.
#[derive(Debug)]
pub struct InFlight {
    flag: Arc<AtomicBool>,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl FormSubmitter {
    pub fn new(base_url: &str) -> Result<Self, FormError> {
        let base_url = Url::parse(base_url).map_err(|e| FormError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            base_url,
            in_flight: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn state(&self) -> SubmissionState {
        if self.in_flight.load(Ordering::Acquire) {
            SubmissionState::Sending
        } else {
            SubmissionState::Idle
        }
    }

    /// Enter `Sending`, or fail if another submission holds it.
    pub fn begin(&self) -> Result<InFlight, SubmitError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| SubmitError::AlreadyInFlight)?;
        Ok(InFlight {
            flag: Arc::clone(&self.in_flight),
        })
    }

    /// Resolve the form action and encode its fields.
    ///
    /// Methods without a body send the request with no fields at all.
    pub fn build_request(&self, form: &Form) -> Result<HttpRequest, FormError> {
        let url = self
            .base_url
            .join(&form.action)
            .map_err(|e| FormError::InvalidAction {
                action: form.action.clone(),
                reason: e.to_string(),
            })?;

        let (headers, body) = if form.method.allows_body() {
            let encoded = multipart::encode(&form.fields)?;
            (
                vec![("content-type".to_string(), encoded.content_type)],
                Some(encoded.body),
            )
        } else {
            if !form.fields.is_empty() {
                debug!(method = form.method.as_str(), %url, "fields not sent without a body");
            }
            (Vec::new(), None)
        };

        let request = HttpRequest {
            method: form.method,
            url: url.to_string(),
            headers,
            body,
        };
        debug!(
            method = request.method.as_str(),
            url = %request.url,
            bytes = request.content_length(),
            "built form request"
        );
        Ok(request)
    }

    /// Only status 200 counts as success.
    pub fn parse_response(&self, url: &str, response: HttpResponse) -> SubmissionOutcome {
        if response.status == 200 {
            info!(%url, "submission succeeded");
            SubmissionOutcome::Success(response.body)
        } else {
            warn!(%url, status = response.status, "submission failed");
            SubmissionOutcome::HttpFailure(response.status)
        }
    }

    pub fn complete(
        &self,
        url: &str,
        result: Result<HttpResponse, TransportError>,
    ) -> SubmissionOutcome {
        match result {
            Ok(response) => self.parse_response(url, response),
            Err(e) => {
                warn!(%url, error = %e, "submission got no response");
                SubmissionOutcome::NetworkFailure(e.to_string())
            }
        }
    }

    /// Submit `form` through `transport`, blocking until it completes.
    ///
    /// On `Err` no hook has run. On `Ok` the hooks have seen `setup`, any
    /// progress, and exactly one completion event matching the returned
    /// outcome.
    pub fn submit<T, H>(
        &self,
        transport: &T,
        form: &Form,
        hooks: &mut H,
    ) -> Result<SubmissionOutcome, SubmitError>
    where
        T: Transport + ?Sized,
        H: SubmitHooks + ?Sized,
    {
        let _guard = self.begin()?;
        let request = self.build_request(form)?;
        let url = request.url.clone();

        hooks.setup(form);

        let mut tracker = ProgressTracker::new();
        let result = transport.send(request, &mut |loaded: u64, total: u64| {
            if let Some(pct) = tracker.observe(loaded, total) {
                hooks.on_progress(pct);
            }
        });

        let outcome = self.complete(&url, result);
        dispatch(form, &outcome, hooks);
        Ok(outcome)
    }
}
