//! Event handlers and submit hooks for the drop-box page.
//!
//! Every handler takes the `Document` it works on. Missing elements are
//! logged by `dom::find` and the affected step is skipped.

use crate::dom::{self, Document, Element, HIDDEN_CLASS};
use crate::form::Form;
use crate::hooks::SubmitHooks;

pub const UPLOADER_FORM: &str = "file-uploader";
pub const UPLOADER_BUTTON: &str = "file-uploader-button";
pub const FILE_INPUT: &str = "file-name-input";
pub const FILE_NAME_NONE: &str = "file-name-no-file";
pub const FILE_NAME_SOME: &str = "file-name-has-file";
pub const LOGOUT_BUTTON: &str = "btn-logout";
pub const LOGOUT_FORM: &str = "form-logout";
pub const CHPASS_BUTTON_CLASS: &str = "btn-chpass";
pub const CHPASS_MODAL: &str = "chpass-modal";
pub const CHPASS_FORM: &str = "form-chpass";
pub const CHPASS_FAIL_MESSAGE: &str = "message-chpass-fail";
pub const MODAL_ACTIVE_CLASS: &str = "is-active";

/// What the page should do with the event's default action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Proceed,
    PreventDefault,
}

/// Page events that have a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    LogoutClick,
    ChpassClick,
    FileChange,
    UploadSubmit,
    ChpassSubmit,
}

/// A handler attached to an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub element: String,
    pub event: PageEvent,
}

/// Handlers to attach, one per element present on the page.
///
/// Elements that are missing are logged and get no handler.
pub fn bindings<D: Document>(doc: &mut D) -> Vec<Binding> {
    let mut out = Vec::new();
    let mut bind = |doc: &mut D, id: &str, event| {
        if dom::find(doc, id).is_some() {
            out.push(Binding {
                element: id.to_string(),
                event,
            });
        }
    };
    bind(doc, LOGOUT_BUTTON, PageEvent::LogoutClick);
    for id in chpass_buttons(doc) {
        bind(doc, &id, PageEvent::ChpassClick);
    }
    bind(doc, UPLOADER_FORM, PageEvent::UploadSubmit);
    bind(doc, CHPASS_FORM, PageEvent::ChpassSubmit);
    bind(doc, FILE_INPUT, PageEvent::FileChange);
    out
}

fn upload_label(percent: u8) -> String {
    format!("Uploading: {percent}%")
}

/// Show the "no file" indicator and hide the "has file" one.
pub fn init_file_name<D: Document>(doc: &mut D) {
    if let Some(e) = dom::find(doc, FILE_NAME_NONE) {
        e.set_class_name("");
    }
    if let Some(e) = dom::find(doc, FILE_NAME_SOME) {
        e.set_class_name(HIDDEN_CLASS);
    }
}

/// Swap the indicators once the file input holds at least one file.
pub fn on_file_change<D: Document>(doc: &mut D) -> EventResult {
    let selected = dom::find(doc, FILE_INPUT).map_or(0, |e| e.selected_files());
    if selected == 0 {
        return EventResult::Proceed;
    }
    if let Some(e) = dom::find(doc, FILE_NAME_SOME) {
        e.set_class_name("");
    }
    if let Some(e) = dom::find(doc, FILE_NAME_NONE) {
        e.set_class_name(HIDDEN_CLASS);
    }
    EventResult::Proceed
}

/// Natively submit the logout form.
pub fn on_logout_click<D: Document>(doc: &mut D) -> EventResult {
    if dom::find(doc, LOGOUT_FORM).is_some() {
        doc.submit_form(LOGOUT_FORM);
    }
    EventResult::Proceed
}

/// Open or close the change-password modal.
pub fn on_chpass_click<D: Document>(doc: &mut D) -> EventResult {
    dom::toggle(doc, CHPASS_MODAL, MODAL_ACTIVE_CLASS);
    EventResult::PreventDefault
}

/// Ids of every element that opens the change-password modal.
pub fn chpass_buttons<D: Document>(doc: &D) -> Vec<String> {
    doc.ids_by_class_name(CHPASS_BUTTON_CLASS)
}

/// Hooks for the file upload form.
///
/// The submit button is disabled for the rest of the page's life; every
/// completion reloads the page, which re-enables it.
pub struct UploaderHooks<'d, D> {
    doc: &'d mut D,
}

impl<'d, D: Document> UploaderHooks<'d, D> {
    pub fn new(doc: &'d mut D) -> Self {
        Self { doc }
    }
}

impl<D: Document> SubmitHooks for UploaderHooks<'_, D> {
    fn setup(&mut self, _form: &Form) {
        if let Some(e) = dom::find(self.doc, UPLOADER_BUTTON) {
            e.set_disabled(true);
            e.set_text_content(&upload_label(0));
        }
    }

    fn on_progress(&mut self, percent: u8) {
        if let Some(e) = dom::find(self.doc, UPLOADER_BUTTON) {
            e.set_text_content(&upload_label(percent));
        }
    }

    fn on_success(&mut self, _form: &Form, _body: &str) {
        self.doc.reload();
    }

    fn on_error(&mut self, _form: &Form, _status: u16) {
        self.doc.reload();
    }

    fn on_network_failure(&mut self, _form: &Form, _reason: &str) {
        self.doc.reload();
    }
}

/// Hooks for the change-password form.
pub struct ChpassHooks<'d, D> {
    doc: &'d mut D,
}

impl<'d, D: Document> ChpassHooks<'d, D> {
    pub fn new(doc: &'d mut D) -> Self {
        Self { doc }
    }
}

impl<D: Document> SubmitHooks for ChpassHooks<'_, D> {
    fn setup(&mut self, _form: &Form) {
        dom::hide(self.doc, CHPASS_FAIL_MESSAGE);
    }

    fn on_success(&mut self, _form: &Form, _body: &str) {
        self.doc.reload();
    }

    fn on_error(&mut self, _form: &Form, _status: u16) {
        dom::show(self.doc, CHPASS_FAIL_MESSAGE);
    }

    fn on_network_failure(&mut self, _form: &Form, _reason: &str) {
        dom::show(self.doc, CHPASS_FAIL_MESSAGE);
    }
}
