//! Asynchronous form submission.
//!
//! # Design
//! The blocking transport runs on tokio's blocking pool. Its progress sink
//! forwards raw byte counts over an unbounded channel; the caller's task
//! drains that channel, turns counts into percentages and calls
//! `on_progress`. The sender lives inside the blocking closure, so the
//! channel closes exactly when the transport returns, and only then is the
//! outcome dispatched. Hooks therefore always run on the caller's task and
//! need not be `Send`.
//!
//! The in-flight guard rides along with the blocking task and comes back
//! with its result. Dropping the returned future therefore leaves the
//! submitter `Sending` until the transport has actually returned.

use std::sync::Arc;

use httpdrop_core::{
    dispatch, Form, FormError, FormSubmitter, ProgressTracker, SubmissionOutcome, SubmitError,
    SubmitHooks, Transport, TransportError,
};
use tokio::sync::mpsc;

use crate::config::ClientConfig;
use crate::transport::UreqTransport;

pub struct AsyncSubmitter<T> {
    core: FormSubmitter,
    transport: Arc<T>,
}

impl AsyncSubmitter<UreqTransport> {
    /// Submitter for `config.base_url` using the ureq transport.
    pub fn from_config(config: &ClientConfig) -> Result<Self, FormError> {
        Ok(Self::new(
            FormSubmitter::new(&config.base_url)?,
            UreqTransport::new(config),
        ))
    }
}

impl<T> AsyncSubmitter<T>
where
    T: Transport + Send + Sync + 'static,
{
    pub fn new(core: FormSubmitter, transport: T) -> Self {
        Self {
            core,
            transport: Arc::new(transport),
        }
    }

    pub fn core(&self) -> &FormSubmitter {
        &self.core
    }

    /// Submit `form`, reporting lifecycle events to `hooks`.
    ///
    /// Same contract as `FormSubmitter::submit`: `Err` means no hook ran;
    /// `Ok` means exactly one completion hook ran for the returned outcome.
    pub async fn submit<H>(&self, form: &Form, hooks: &mut H) -> Result<SubmissionOutcome, SubmitError>
    where
        H: SubmitHooks + ?Sized,
    {
        let guard = self.core.begin()?;
        let request = self.core.build_request(form)?;
        let url = request.url.clone();

        hooks.setup(form);

        let (tx, mut rx) = mpsc::unbounded_channel();
        let transport = Arc::clone(&self.transport);
        let task = tokio::task::spawn_blocking(move || {
            let mut report = |loaded: u64, total: u64| {
                // The receiver only goes away if the caller was dropped.
                let _ = tx.send((loaded, total));
            };
            let result = transport.send(request, &mut report);
            (result, guard)
        });

        let mut tracker = ProgressTracker::new();
        while let Some((loaded, total)) = rx.recv().await {
            if let Some(pct) = tracker.observe(loaded, total) {
                hooks.on_progress(pct);
            }
        }

        let (result, _guard) = match task.await {
            Ok((result, guard)) => (result, Some(guard)),
            Err(e) => (Err(TransportError::Aborted(e.to_string())), None),
        };
        let outcome = self.core.complete(&url, result);
        dispatch(form, &outcome, hooks);
        Ok(outcome)
    }
}
