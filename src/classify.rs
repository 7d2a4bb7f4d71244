//! Inline/void classification of node types.
//!
//! An inline node flows inside running text without forcing a line break.
//! A void node is an atomic unit: its children are presentation placeholders
//! and are never traversed as document content.

use crate::document::{Node, NodeType};

/// Traversal behavior of a node type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Classification {
    pub inline: bool,
    pub void: bool,
}

impl Classification {
    /// Ordinary block container.
    pub const BLOCK: Self = Self {
        inline: false,
        void: false,
    };
}

/// Classify a node type.
///
/// Text inputs and selects sit inside sentences, so they are inline. All
/// three text-bearing fields are void. Radio options, the default container
/// and unknown tags are plain blocks.
pub const fn classify(node_type: &NodeType) -> Classification {
    match node_type {
        NodeType::TextField | NodeType::Select => Classification {
            inline: true,
            void: true,
        },
        NodeType::TextArea => Classification {
            inline: false,
            void: true,
        },
        NodeType::Radio | NodeType::Paragraph | NodeType::Other(_) => Classification::BLOCK,
    }
}

/// Classify a raw type tag.
pub fn classify_tag(tag: &str) -> Classification {
    classify(&NodeType::from_tag(tag))
}

/// Classify a node. Text leaves are neither inline elements nor void.
pub const fn classify_node(node: &Node) -> Classification {
    match node.node_type() {
        Some(node_type) => classify(node_type),
        None => Classification::BLOCK,
    }
}

pub const fn is_inline(node: &Node) -> bool {
    classify_node(node).inline
}

pub const fn is_void(node: &Node) -> bool {
    classify_node(node).void
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Element;

    #[test]
    fn test_text_field_and_select_are_inline_and_void() {
        for tag in ["text", "text-field", "select"] {
            let class = classify_tag(tag);
            assert!(class.inline, "{tag} should be inline");
            assert!(class.void, "{tag} should be void");
        }
    }

    #[test]
    fn test_textarea_is_void_block() {
        assert_eq!(
            classify_tag("textarea"),
            Classification {
                inline: false,
                void: true
            }
        );
    }

    #[test]
    fn test_radio_and_default_are_blocks() {
        assert_eq!(classify_tag("radio"), Classification::BLOCK);
        assert_eq!(classify(&NodeType::Paragraph), Classification::BLOCK);
    }

    #[test]
    fn test_unknown_tag_defaults_to_block() {
        assert_eq!(classify_tag("custom-widget"), Classification::BLOCK);
        assert_eq!(classify_tag("comment"), Classification::BLOCK);
    }

    #[test]
    fn test_classify_node_for_leaf_and_element() {
        assert_eq!(classify_node(&Node::text("x")), Classification::BLOCK);
        let field: Node = Element::field(NodeType::Select, "s", vec![Node::text("")]).into();
        assert!(is_inline(&field));
        assert!(is_void(&field));
        assert!(!is_void(&Node::text("x")));
    }
}
