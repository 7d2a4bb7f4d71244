//! Core document types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Type tag of an element node.
///
/// The set of tags with dedicated behavior is closed; anything else is kept
/// verbatim as [`NodeType::Other`] and treated as a plain block container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeType {
    /// Single-line text input (`text`, also accepted as `text-field`)
    TextField,
    /// Drop-down choice (`select`)
    Select,
    /// One option of a radio group (`radio`)
    Radio,
    /// Multi-line text input (`textarea`)
    TextArea,
    /// Default container, written without a `type` key
    #[default]
    Paragraph,
    /// Any tag outside the known set
    Other(String),
}

impl NodeType {
    /// Parse a type tag. Unknown tags are preserved as [`NodeType::Other`].
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "text" | "text-field" => Self::TextField,
            "select" => Self::Select,
            "radio" => Self::Radio,
            "textarea" => Self::TextArea,
            "" | "paragraph" => Self::Paragraph,
            other => Self::Other(other.to_string()),
        }
    }

    /// The canonical tag for this type.
    pub fn tag(&self) -> &str {
        match self {
            Self::TextField => "text",
            Self::Select => "select",
            Self::Radio => "radio",
            Self::TextArea => "textarea",
            Self::Paragraph => "paragraph",
            Self::Other(tag) => tag,
        }
    }

    /// Returns true for interactive field types, which must carry a `name`.
    pub const fn is_field(&self) -> bool {
        matches!(
            self,
            Self::TextField | Self::Select | Self::Radio | Self::TextArea
        )
    }

    /// Returns true for field types whose `name` must be unique in the tree.
    ///
    /// Radio options share a name per group instead.
    pub const fn has_exclusive_name(&self) -> bool {
        matches!(self, Self::TextField | Self::Select | Self::TextArea)
    }

    pub const fn is_paragraph(&self) -> bool {
        matches!(self, Self::Paragraph)
    }
}

impl From<String> for NodeType {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

impl From<&str> for NodeType {
    fn from(tag: &str) -> Self {
        Self::from_tag(tag)
    }
}

impl From<NodeType> for String {
    fn from(node_type: NodeType) -> Self {
        match node_type {
            NodeType::Other(tag) => tag,
            known => known.tag().to_string(),
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One entry of a select element's option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Value stored in the field when this option is chosen
    pub value: String,
    /// Text shown to the user
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A literal run of text. Always a leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextNode {
    pub text: String,
    /// Kept only so validation can reject a leaf written with children.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) children: Option<Vec<Node>>,
}

/// A typed node with children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Type tag; omitted for the default container
    #[serde(rename = "type", default, skip_serializing_if = "NodeType::is_paragraph")]
    pub node_type: NodeType,
    /// Field identifier, the key into the field value store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Selectable value of a radio option
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Choices of a select element
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
    /// Ordered child nodes
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element of `node_type` with no field attributes.
    pub const fn new(node_type: NodeType, children: Vec<Node>) -> Self {
        Self {
            node_type,
            name: None,
            value: None,
            options: None,
            children,
        }
    }

    /// Create a default container.
    pub const fn paragraph(children: Vec<Node>) -> Self {
        Self::new(NodeType::Paragraph, children)
    }

    /// Create a named field element.
    pub fn field(node_type: NodeType, name: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(node_type, children)
        }
    }

    /// Create a radio option belonging to group `name`.
    pub fn radio(name: impl Into<String>, value: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::field(NodeType::Radio, name, children)
        }
    }

    /// Create a select field with its options.
    pub fn select(
        name: impl Into<String>,
        options: Vec<SelectOption>,
        children: Vec<Node>,
    ) -> Self {
        Self {
            options: Some(options),
            ..Self::field(NodeType::Select, name, children)
        }
    }

    /// Concatenated text of all descendant text nodes.
    ///
    /// Field elements use this as their placeholder.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    /// Select options, empty for any other element.
    pub fn options(&self) -> &[SelectOption] {
        self.options.as_deref().unwrap_or_default()
    }
}

/// A node of the document tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Text(TextNode),
    Element(Element),
}

impl Node {
    /// Create a text leaf.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(TextNode {
            text: text.into(),
            children: None,
        })
    }

    /// Type tag of an element; `None` for text leaves.
    pub const fn node_type(&self) -> Option<&NodeType> {
        match self {
            Self::Text(_) => None,
            Self::Element(element) => Some(&element.node_type),
        }
    }

    /// Child nodes; always empty for text leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Text(_) => &[],
            Self::Element(element) => &element.children,
        }
    }

    pub const fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Text(_) => None,
            Self::Element(element) => Some(element),
        }
    }

    pub const fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(leaf) => out.push_str(&leaf.text),
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

/// Location of a node: child indices from the top-level node list down.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// Path of the `index`-th child of this node.
    #[must_use]
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{index}")?;
        }
        Ok(())
    }
}

/// A validated document: an ordered list of top-level nodes.
///
/// Documents are immutable. A new version is built from a fresh node list,
/// which is validated again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Document {
    /// Validate `nodes` and wrap them as a document.
    ///
    /// # Errors
    /// Returns [`MalformedTree`](crate::error::MalformedTree) naming the first
    /// offending node.
    pub fn new(nodes: Vec<Node>) -> Result<Self, crate::error::MalformedTree> {
        super::validate::validate(&nodes)?;
        Ok(Self { nodes })
    }

    /// Create an empty document.
    pub const fn empty() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Top-level nodes.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node by path.
    pub fn node_at(&self, path: &NodePath) -> Option<&Node> {
        let (first, rest) = path.indices().split_first()?;
        let mut node = self.nodes.get(*first)?;
        for index in rest {
            node = node.children().get(*index)?;
        }
        Some(node)
    }

    /// All field elements in document order, with their paths.
    pub fn fields(&self) -> Vec<(NodePath, &Element)> {
        let mut out = Vec::new();
        for (index, node) in self.nodes.iter().enumerate() {
            collect_fields(node, NodePath::root().child(index), &mut out);
        }
        out
    }

    /// Total number of nodes, text leaves included.
    pub fn node_count(&self) -> usize {
        self.nodes.iter().map(count_nodes).sum()
    }
}

fn collect_fields<'a>(node: &'a Node, path: NodePath, out: &mut Vec<(NodePath, &'a Element)>) {
    let Node::Element(element) = node else {
        return;
    };
    if element.node_type.is_field() {
        out.push((path.clone(), element));
    }
    for (index, child) in element.children.iter().enumerate() {
        collect_fields(child, path.child(index), out);
    }
}

fn count_nodes(node: &Node) -> usize {
    1 + node.children().iter().map(count_nodes).sum::<usize>()
}
