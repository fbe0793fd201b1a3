//! Document access seam.
//!
//! The engine only ever sees an element handle and its paint stack through
//! this trait; it never reaches into a live scene graph. Hosts adapt their
//! document API behind it, and [`InMemoryDocument`] serves tests and
//! headless embedding.

use std::collections::HashMap;

use crate::fills::FillEntry;

/// Opaque handle to a resolved element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementHandle(String);

impl ElementHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

/// Host-side document access.
pub trait DocumentService {
    /// Resolve an element identifier, or `None` when it no longer exists.
    fn resolve_element(&self, id: &str) -> Option<ElementHandle>;

    /// Read the element's paint stack, bottom-most first.
    fn read_fills(&self, handle: &ElementHandle) -> Vec<FillEntry>;

    /// Replace the element's entire paint stack in one write.
    fn write_fills(&mut self, handle: &ElementHandle, fills: Vec<FillEntry>);
}

/// In-memory document for tests and hosts without a live document.
#[derive(Debug, Default)]
pub struct InMemoryDocument {
    elements: HashMap<String, Vec<FillEntry>>,
}

impl InMemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an element with its paint stack, returning its handle.
    pub fn insert(&mut self, id: &str, fills: Vec<FillEntry>) -> ElementHandle {
        self.elements.insert(id.to_string(), fills);
        ElementHandle::new(id)
    }

    /// Current stack of an element, if it exists.
    pub fn fills(&self, id: &str) -> Option<&[FillEntry]> {
        self.elements.get(id).map(Vec::as_slice)
    }
}

impl DocumentService for InMemoryDocument {
    fn resolve_element(&self, id: &str) -> Option<ElementHandle> {
        self.elements.contains_key(id).then(|| ElementHandle::new(id))
    }

    fn read_fills(&self, handle: &ElementHandle) -> Vec<FillEntry> {
        self.elements.get(handle.id()).cloned().unwrap_or_default()
    }

    fn write_fills(&mut self, handle: &ElementHandle, fills: Vec<FillEntry>) {
        self.elements.insert(handle.id().to_string(), fills);
    }
}
