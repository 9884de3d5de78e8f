//! Page element access for the wiring code.
//!
//! # Design
//! Handlers never reach for a global document. They receive a `Document`
//! and look elements up by id through `find`, which logs and returns
//! `None` when the id is missing so the caller can skip the operation.
//! Visibility is a single `hide` class: present means hidden.
//!
//! `MemoryDocument` is a plain in-memory page that records reloads and
//! native form submissions, usable by hosts without a browser and by tests.

use tracing::warn;

use crate::error::DomError;

/// Class that marks an element as hidden.
pub const HIDDEN_CLASS: &str = "hide";

pub trait Element {
    fn id(&self) -> &str;
    fn has_class(&self, class: &str) -> bool;
    fn add_class(&mut self, class: &str);
    fn remove_class(&mut self, class: &str);
    /// Replace the whole class attribute. An empty string clears it.
    fn set_class_name(&mut self, value: &str);
    fn set_text_content(&mut self, text: &str);
    fn set_disabled(&mut self, disabled: bool);
    fn is_disabled(&self) -> bool;
    /// Files chosen in a file input; zero for anything else.
    fn selected_files(&self) -> usize;

    /// Flip `class` and report whether it is now present.
    fn toggle_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            self.remove_class(class);
            false
        } else {
            self.add_class(class);
            true
        }
    }
}

pub trait Document {
    type Element: Element;

    fn element_by_id(&mut self, id: &str) -> Option<&mut Self::Element>;

    /// Ids of all elements carrying `class`, in document order.
    fn ids_by_class_name(&self, class: &str) -> Vec<String>;

    /// Native, navigating submission of the form with `id`.
    fn submit_form(&mut self, id: &str);

    fn reload(&mut self);
}

/// Look up `id`, failing with `DomError::ElementNotFound`.
pub fn lookup<'d, D: Document>(doc: &'d mut D, id: &str) -> Result<&'d mut D::Element, DomError> {
    doc.element_by_id(id)
        .ok_or_else(|| DomError::ElementNotFound(id.to_string()))
}

/// Look up `id`, logging a warning when it is missing.
pub fn find<'d, D: Document>(doc: &'d mut D, id: &str) -> Option<&'d mut D::Element> {
    match lookup(doc, id) {
        Ok(element) => Some(element),
        Err(e) => {
            warn!(error = %e, "find");
            None
        }
    }
}

/// Remove the hidden class from `id`. No-op if already visible or missing.
pub fn show<D: Document>(doc: &mut D, id: &str) {
    if let Some(e) = find(doc, id) {
        if e.has_class(HIDDEN_CLASS) {
            e.remove_class(HIDDEN_CLASS);
        }
    }
}

/// Add the hidden class to `id`. No-op if already hidden or missing.
pub fn hide<D: Document>(doc: &mut D, id: &str) {
    if let Some(e) = find(doc, id) {
        if !e.has_class(HIDDEN_CLASS) {
            e.add_class(HIDDEN_CLASS);
        }
    }
}

/// Flip `class` on `id`. Returns the new state, or `None` if missing.
pub fn toggle<D: Document>(doc: &mut D, id: &str, class: &str) -> Option<bool> {
    find(doc, id).map(|e| e.toggle_class(class))
}

pub fn is_hidden<D: Document>(doc: &mut D, id: &str) -> Option<bool> {
    doc.element_by_id(id).map(|e| e.has_class(HIDDEN_CLASS))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryElement {
    id: String,
    classes: Vec<String>,
    text: String,
    disabled: bool,
    files: usize,
}

impl MemoryElement {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_files(mut self, files: usize) -> Self {
        self.files = files;
        self
    }

    pub fn set_selected_files(&mut self, files: usize) {
        self.files = files;
    }

    pub fn text_content(&self) -> &str {
        &self.text
    }

    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }
}

impl Element for MemoryElement {
    fn id(&self) -> &str {
        &self.id
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    fn set_class_name(&mut self, value: &str) {
        self.classes = value.split_whitespace().map(str::to_string).collect();
    }

    fn set_text_content(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    fn is_disabled(&self) -> bool {
        self.disabled
    }

    fn selected_files(&self) -> usize {
        self.files
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    elements: Vec<MemoryElement>,
    reloads: usize,
    submitted: Vec<String>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, element: MemoryElement) -> Self {
        self.insert(element);
        self
    }

    /// Add `element`, replacing any element with the same id.
    pub fn insert(&mut self, element: MemoryElement) {
        match self.elements.iter_mut().find(|e| e.id == element.id) {
            Some(existing) => *existing = element,
            None => self.elements.push(element),
        }
    }

    pub fn get(&self, id: &str) -> Option<&MemoryElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn reloads(&self) -> usize {
        self.reloads
    }

    /// Ids of natively submitted forms, oldest first.
    pub fn submitted_forms(&self) -> &[String] {
        &self.submitted
    }
}

impl Document for MemoryDocument {
    type Element = MemoryElement;

    fn element_by_id(&mut self, id: &str) -> Option<&mut MemoryElement> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    fn ids_by_class_name(&self, class: &str) -> Vec<String> {
        self.elements
            .iter()
            .filter(|e| e.has_class(class))
            .map(|e| e.id.clone())
            .collect()
    }

    fn submit_form(&mut self, id: &str) {
        self.submitted.push(id.to_string());
    }

    fn reload(&mut self) {
        self.reloads += 1;
    }
}
