//! Node-type dispatch table.
//!
//! Maps an element's type tag to the handler a presentation layer uses for
//! it. Lookups never fail: tags without an entry resolve to the fallback, so
//! new node types render like plain paragraphs until a handler is
//! registered for them.

use std::collections::HashMap;

use crate::document::{Element, NodeType};

/// Presentation handlers known to the built-in renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    /// Single-line input widget
    TextInput,
    /// Drop-down widget
    Select,
    /// One radio button with its label
    RadioOption,
    /// Multi-line input widget
    TextArea,
    /// Plain block of flowing content
    Paragraph,
}

/// A total mapping from node type to handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchTable<H = HandlerKind> {
    entries: HashMap<NodeType, H>,
    fallback: H,
}

impl<H> DispatchTable<H> {
    /// Create a table with no entries; every type resolves to `fallback`.
    pub fn new(fallback: H) -> Self {
        Self {
            entries: HashMap::new(),
            fallback,
        }
    }

    /// Builder-style [`DispatchTable::insert`].
    #[must_use]
    pub fn with_entry(mut self, node_type: impl Into<NodeType>, handler: H) -> Self {
        self.insert(node_type, handler);
        self
    }

    /// Register a handler, returning the one it replaces.
    pub fn insert(&mut self, node_type: impl Into<NodeType>, handler: H) -> Option<H> {
        self.entries.insert(node_type.into(), handler)
    }

    /// Handler for `node_type`, or the fallback.
    pub fn resolve(&self, node_type: &NodeType) -> &H {
        self.entries.get(node_type).unwrap_or(&self.fallback)
    }

    /// Handler for a raw tag, or the fallback.
    pub fn resolve_tag(&self, tag: &str) -> &H {
        self.resolve(&NodeType::from_tag(tag))
    }

    pub fn resolve_element(&self, element: &Element) -> &H {
        self.resolve(&element.node_type)
    }

    pub const fn fallback(&self) -> &H {
        &self.fallback
    }

    /// Whether `node_type` has its own entry.
    pub fn contains(&self, node_type: &NodeType) -> bool {
        self.entries.contains_key(node_type)
    }

    /// Number of explicit entries, not counting the fallback.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DispatchTable<HandlerKind> {
    /// One entry per field type; everything else renders as a paragraph.
    fn default() -> Self {
        Self::new(HandlerKind::Paragraph)
            .with_entry(NodeType::TextField, HandlerKind::TextInput)
            .with_entry(NodeType::Select, HandlerKind::Select)
            .with_entry(NodeType::Radio, HandlerKind::RadioOption)
            .with_entry(NodeType::TextArea, HandlerKind::TextArea)
    }
}
