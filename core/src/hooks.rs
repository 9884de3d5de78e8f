//! Lifecycle hooks for one submission.
//!
//! # Design
//! `SubmitHooks` has a no-op default for every method, so implementors
//! only override the events they care about. `Callbacks` covers the
//! closure style: each hook is an optional boxed closure and a missing one
//! is simply skipped.

use crate::form::Form;
use crate::submitter::SubmissionOutcome;

/// Receives the events of a single submission.
///
/// Order: `setup` once before any network activity, `on_progress` zero or
/// more times with increasing values, then exactly one of `on_success`,
/// `on_error` or `on_network_failure`.
pub trait SubmitHooks {
    fn setup(&mut self, _form: &Form) {}

    fn on_progress(&mut self, _percent: u8) {}

    /// The server answered 200.
    fn on_success(&mut self, _form: &Form, _body: &str) {}

    /// The server answered with any status other than 200.
    fn on_error(&mut self, _form: &Form, _status: u16) {}

    /// No response was obtained.
    fn on_network_failure(&mut self, _form: &Form, _reason: &str) {}
}

/// Hooks that ignore every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl SubmitHooks for NoHooks {}

type FormFn<'a> = Box<dyn FnMut(&Form) + 'a>;
type ProgressFn<'a> = Box<dyn FnMut(u8) + 'a>;
type SuccessFn<'a> = Box<dyn FnMut(&Form, &str) + 'a>;
type ErrorFn<'a> = Box<dyn FnMut(&Form, u16) + 'a>;
type FailureFn<'a> = Box<dyn FnMut(&Form, &str) + 'a>;

/// Optional closures, one per event.
#[derive(Default)]
pub struct Callbacks<'a> {
    setup: Option<FormFn<'a>>,
    progress: Option<ProgressFn<'a>>,
    success: Option<SuccessFn<'a>>,
    error: Option<ErrorFn<'a>>,
    network_failure: Option<FailureFn<'a>>,
}

impl<'a> Callbacks<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_setup(mut self, f: impl FnMut(&Form) + 'a) -> Self {
        self.setup = Some(Box::new(f));
        self
    }

    pub fn with_progress(mut self, f: impl FnMut(u8) + 'a) -> Self {
        self.progress = Some(Box::new(f));
        self
    }

    pub fn with_success(mut self, f: impl FnMut(&Form, &str) + 'a) -> Self {
        self.success = Some(Box::new(f));
        self
    }

    pub fn with_error(mut self, f: impl FnMut(&Form, u16) + 'a) -> Self {
        self.error = Some(Box::new(f));
        self
    }

    pub fn with_network_failure(mut self, f: impl FnMut(&Form, &str) + 'a) -> Self {
        self.network_failure = Some(Box::new(f));
        self
    }
}

impl SubmitHooks for Callbacks<'_> {
    fn setup(&mut self, form: &Form) {
        if let Some(f) = self.setup.as_mut() {
            f(form);
        }
    }

    fn on_progress(&mut self, percent: u8) {
        if let Some(f) = self.progress.as_mut() {
            f(percent);
        }
    }

    fn on_success(&mut self, form: &Form, body: &str) {
        if let Some(f) = self.success.as_mut() {
            f(form, body);
        }
    }

    fn on_error(&mut self, form: &Form, status: u16) {
        if let Some(f) = self.error.as_mut() {
            f(form, status);
        }
    }

    fn on_network_failure(&mut self, form: &Form, reason: &str) {
        if let Some(f) = self.network_failure.as_mut() {
            f(form, reason);
        }
    }
}

impl<H: SubmitHooks + ?Sized> SubmitHooks for &mut H {
    fn setup(&mut self, form: &Form) {
        (**self).setup(form);
    }

    fn on_progress(&mut self, percent: u8) {
        (**self).on_progress(percent);
    }

    fn on_success(&mut self, form: &Form, body: &str) {
        (**self).on_success(form, body);
    }

    fn on_error(&mut self, form: &Form, status: u16) {
        (**self).on_error(form, status);
    }

    fn on_network_failure(&mut self, form: &Form, reason: &str) {
        (**self).on_network_failure(form, reason);
    }
}

/// Route a finished submission to exactly one completion hook.
pub fn dispatch<H: SubmitHooks + ?Sized>(form: &Form, outcome: &SubmissionOutcome, hooks: &mut H) {
    match outcome {
        SubmissionOutcome::Success(body) => hooks.on_success(form, body),
        SubmissionOutcome::HttpFailure(status) => hooks.on_error(form, *status),
        SubmissionOutcome::NetworkFailure(reason) => hooks.on_network_failure(form, reason),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::http::HttpMethod;

    fn form() -> Form {
        Form::new("/upload", HttpMethod::Post)
    }

    #[test]
    fn dispatch_success_calls_only_on_success() {
        let log = RefCell::new(Vec::new());
        let mut hooks = Callbacks::new()
            .with_success(|_, body| log.borrow_mut().push(format!("success {body}")))
            .with_error(|_, status| log.borrow_mut().push(format!("error {status}")));
        dispatch(&form(), &SubmissionOutcome::Success("ok".to_string()), &mut hooks);
        drop(hooks);
        assert_eq!(log.into_inner(), ["success ok"]);
    }

    #[test]
    fn dispatch_failure_passes_status() {
        let log = RefCell::new(Vec::new());
        let mut hooks = Callbacks::new()
            .with_success(|_, body| log.borrow_mut().push(format!("success {body}")))
            .with_error(|_, status| log.borrow_mut().push(format!("error {status}")));
        dispatch(&form(), &SubmissionOutcome::HttpFailure(403), &mut hooks);
        drop(hooks);
        assert_eq!(log.into_inner(), ["error 403"]);
    }

    #[test]
    fn missing_callbacks_are_skipped() {
        let mut hooks = Callbacks::new();
        hooks.setup(&form());
        hooks.on_progress(10);
        dispatch(&form(), &SubmissionOutcome::NetworkFailure("refused".to_string()), &mut hooks);
        dispatch(&form(), &SubmissionOutcome::HttpFailure(500), &mut NoHooks);
    }

    #[test]
    fn hook_methods_run_registered_closures() {
        let log = RefCell::new(Vec::new());
        let mut hooks = Callbacks::new()
            .with_setup(|form| log.borrow_mut().push(format!("setup {}", form.action)))
            .with_progress(|pct| log.borrow_mut().push(format!("{pct}%")));
        hooks.setup(&form());
        hooks.on_progress(40);
        hooks.on_success(&form(), "ok");
        drop(hooks);
        assert_eq!(log.into_inner(), ["setup /upload", "40%"]);
    }

    #[test]
    fn network_failure_is_distinct_from_http_failure() {
        let log = RefCell::new(Vec::new());
        let mut hooks = Callbacks::new()
            .with_error(|_, status| log.borrow_mut().push(format!("error {status}")))
            .with_network_failure(|_, reason| log.borrow_mut().push(format!("network {reason}")));
        dispatch(&form(), &SubmissionOutcome::NetworkFailure("reset".to_string()), &mut hooks);
        drop(hooks);
        assert_eq!(log.into_inner(), ["network reset"]);
    }
}
