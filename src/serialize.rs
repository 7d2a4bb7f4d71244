//! Plain-text serialization with live field values.
//!
//! Rules, applied at each node in order:
//! 1. A text leaf yields its literal string.
//! 2. An element whose `name` resolves in the value store yields that value;
//!    its placeholder children are not visited.
//! 3. Any other element yields its children's output, joined with `""` when
//!    the children form an inline run and `"\n"` otherwise.
//!
//! Top-level nodes are always joined with `"\n"`. No escaping is applied.

use crate::classify::classify_node;
use crate::document::{Document, Node};
use crate::store::{FieldStore, FieldValues};

const BLOCK_SEPARATOR: &str = "\n";

/// Serialize a single node.
pub fn serialize<V: FieldValues + ?Sized>(node: &Node, values: &V) -> String {
    let mut out = String::new();
    write_node(node, values, &mut out);
    out
}

/// Serialize a list of block-level nodes, one per line.
pub fn serialize_nodes<V: FieldValues + ?Sized>(nodes: &[Node], values: &V) -> String {
    let mut out = String::new();
    for (index, node) in nodes.iter().enumerate() {
        if index > 0 {
            out.push_str(BLOCK_SEPARATOR);
        }
        write_node(node, values, &mut out);
    }
    out
}

/// Serialize a whole document against one set of values.
pub fn serialize_document<V: FieldValues + ?Sized>(document: &Document, values: &V) -> String {
    let text = serialize_nodes(document.nodes(), values);
    tracing::debug!(
        nodes = document.len(),
        chars = text.len(),
        "serialization pass complete"
    );
    text
}

/// Serialize a document against the store's latest committed values.
///
/// The snapshot is taken once, before the walk starts.
pub fn serialize_with_store(document: &Document, store: &FieldStore) -> String {
    let snapshot = store.snapshot();
    tracing::debug!(version = store.version(), "serialization pass start");
    serialize_document(document, &*snapshot)
}

impl Document {
    /// Plain-text rendering of this document. See [`serialize_document`].
    pub fn plain_text<V: FieldValues + ?Sized>(&self, values: &V) -> String {
        serialize_document(self, values)
    }
}

fn write_node<V: FieldValues + ?Sized>(node: &Node, values: &V, out: &mut String) {
    let element = match node {
        Node::Text(leaf) => {
            out.push_str(&leaf.text);
            return;
        }
        Node::Element(element) => element,
    };

    if let Some(name) = element.name.as_deref() {
        if let Some(value) = values.resolve(name) {
            out.push_str(value);
            return;
        }
        tracing::trace!(field = name, "unresolved field, using placeholder");
    }

    let separator = if children_are_inline(&element.children) {
        ""
    } else {
        BLOCK_SEPARATOR
    };
    for (index, child) in element.children.iter().enumerate() {
        if index > 0 {
            out.push_str(separator);
        }
        write_node(child, values, out);
    }
}

/// Whether a child list is an inline run, judged from its first child.
///
/// An inline element decides for itself. A text leaf has no tag of its own:
/// it is part of an inline run when the list holds an inline element, and a
/// plain block line otherwise.
fn children_are_inline(children: &[Node]) -> bool {
    match children.first() {
        None => false,
        Some(Node::Element(_)) => classify_node(&children[0]).inline,
        Some(Node::Text(_)) => children.iter().any(|child| classify_node(child).inline),
    }
}
