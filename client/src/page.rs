//! The drop-box page: a document plus a submitter.
//!
//! `Page` is what a host wires its event loop to. `init` prepares the
//! indicators and returns the handlers to attach; each `on_*` method is one
//! handler and returns what to do with the event's default action. The
//! submit handlers always prevent the native navigating submission and run
//! the asynchronous one instead.

use httpdrop_core::page::{self, ChpassHooks, UploaderHooks};
use httpdrop_core::{Binding, Document, EventResult, Form, SubmitHooks, Transport};
use tracing::warn;

use crate::submit::AsyncSubmitter;

pub struct Page<D, T> {
    doc: D,
    submitter: AsyncSubmitter<T>,
}

impl<D, T> Page<D, T>
where
    D: Document,
    T: Transport + Send + Sync + 'static,
{
    pub fn new(doc: D, submitter: AsyncSubmitter<T>) -> Self {
        Self { doc, submitter }
    }

    pub fn document(&self) -> &D {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.doc
    }

    pub fn into_document(self) -> D {
        self.doc
    }

    /// Prepare the page and list the handlers to attach.
    pub fn init(&mut self) -> Vec<Binding> {
        let bound = page::bindings(&mut self.doc);
        page::init_file_name(&mut self.doc);
        bound
    }

    pub fn on_file_change(&mut self) -> EventResult {
        page::on_file_change(&mut self.doc)
    }

    pub fn on_logout_click(&mut self) -> EventResult {
        page::on_logout_click(&mut self.doc)
    }

    pub fn on_chpass_click(&mut self) -> EventResult {
        page::on_chpass_click(&mut self.doc)
    }

    pub async fn on_upload_submit(&mut self, form: &Form) -> EventResult {
        let mut hooks = UploaderHooks::new(&mut self.doc);
        send(&self.submitter, form, &mut hooks).await
    }

    pub async fn on_chpass_submit(&mut self, form: &Form) -> EventResult {
        let mut hooks = ChpassHooks::new(&mut self.doc);
        send(&self.submitter, form, &mut hooks).await
    }
}

async fn send<T, H>(submitter: &AsyncSubmitter<T>, form: &Form, hooks: &mut H) -> EventResult
where
    T: Transport + Send + Sync + 'static,
    H: SubmitHooks,
{
    if let Err(e) = submitter.submit(form, hooks).await {
        warn!(form = form.id.as_deref().unwrap_or(&form.action), error = %e, "form not submitted");
    }
    EventResult::PreventDefault
}
