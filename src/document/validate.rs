//! Structural validation of document trees.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::error::MalformedTree;

use super::types::{Element, Node, NodePath, NodeType};

/// How a field name is held within a tree.
enum Claim<'a> {
    /// Owned by a single text, select or textarea field
    Exclusive(NodePath),
    /// Shared by a radio group; option value to the path that declared it
    Group(HashMap<&'a str, NodePath>),
}

/// Check every structural invariant of a node list.
///
/// # Errors
/// Returns the first violation in document order.
pub fn validate(nodes: &[Node]) -> Result<(), MalformedTree> {
    let mut names: HashMap<&str, Claim<'_>> = HashMap::new();
    for (index, node) in nodes.iter().enumerate() {
        validate_node(node, &NodePath::root().child(index), &mut names)?;
    }
    Ok(())
}

fn validate_node<'a>(
    node: &'a Node,
    path: &NodePath,
    names: &mut HashMap<&'a str, Claim<'a>>,
) -> Result<(), MalformedTree> {
    let element = match node {
        Node::Text(leaf) if leaf.children.is_some() => {
            return Err(MalformedTree::LeafWithChildren { path: path.clone() });
        }
        Node::Text(_) => return Ok(()),
        Node::Element(element) => element,
    };

    check_shape(element, path)?;
    if element.node_type.is_field() {
        claim_name(element, path, names)?;
    }

    for (index, child) in element.children.iter().enumerate() {
        validate_node(child, &path.child(index), names)?;
    }
    Ok(())
}

fn check_shape(element: &Element, path: &NodePath) -> Result<(), MalformedTree> {
    let node_type = &element.node_type;
    if element.children.is_empty() {
        return Err(MalformedTree::EmptyElement {
            path: path.clone(),
            node_type: node_type.clone(),
        });
    }
    if element.value.is_some() && *node_type != NodeType::Radio {
        return Err(MalformedTree::UnexpectedAttribute {
            path: path.clone(),
            node_type: node_type.clone(),
            attribute: "value",
        });
    }
    if element.options.is_some() && *node_type != NodeType::Select {
        return Err(MalformedTree::UnexpectedAttribute {
            path: path.clone(),
            node_type: node_type.clone(),
            attribute: "options",
        });
    }
    Ok(())
}

fn claim_name<'a>(
    element: &'a Element,
    path: &NodePath,
    names: &mut HashMap<&'a str, Claim<'a>>,
) -> Result<(), MalformedTree> {
    let Some(name) = element.name.as_deref() else {
        return Err(MalformedTree::MissingFieldName {
            path: path.clone(),
            node_type: element.node_type.clone(),
        });
    };

    if element.node_type != NodeType::Radio {
        return match names.entry(name) {
            Entry::Vacant(slot) => {
                slot.insert(Claim::Exclusive(path.clone()));
                Ok(())
            }
            Entry::Occupied(existing) => Err(duplicate_name(name, path, existing.get())),
        };
    }

    let Some(value) = element.value.as_deref() else {
        return Err(MalformedTree::MissingRadioValue {
            path: path.clone(),
            name: name.to_string(),
        });
    };

    match names.entry(name).or_insert_with(|| Claim::Group(HashMap::new())) {
        Claim::Exclusive(first) => Err(MalformedTree::DuplicateFieldName {
            path: path.clone(),
            name: name.to_string(),
            first: first.clone(),
        }),
        Claim::Group(values) => match values.entry(value) {
            Entry::Vacant(slot) => {
                slot.insert(path.clone());
                Ok(())
            }
            Entry::Occupied(first) => Err(MalformedTree::DuplicateRadioValue {
                path: path.clone(),
                name: name.to_string(),
                value: value.to_string(),
                first: first.get().clone(),
            }),
        },
    }
}

fn duplicate_name(name: &str, path: &NodePath, claim: &Claim<'_>) -> MalformedTree {
    let first = match claim {
        Claim::Exclusive(first) => first.clone(),
        Claim::Group(values) => values.values().min().cloned().unwrap_or_default(),
    };
    MalformedTree::DuplicateFieldName {
        path: path.clone(),
        name: name.to_string(),
        first,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SelectOption;

    fn field(node_type: NodeType, name: &str) -> Node {
        Element::field(node_type, name, vec![Node::text("")]).into()
    }

    fn radio(name: &str, value: &str) -> Node {
        Element::radio(name, value, vec![Node::text(format!("choice {value}"))]).into()
    }

    #[test]
    fn test_valid_tree_passes() {
        let nodes: Vec<Node> = vec![
            Element::paragraph(vec![
                Node::text("Hello "),
                field(NodeType::TextField, "x"),
                Node::text("!"),
            ])
            .into(),
            radio("r", "1"),
            radio("r", "2"),
            field(NodeType::TextArea, "notes"),
        ];
        assert_eq!(validate(&nodes), Ok(()));
    }

    #[test]
    fn test_empty_element_rejected_with_path() {
        let nodes: Vec<Node> = vec![
            Element::paragraph(vec![Node::text("ok")]).into(),
            Element::paragraph(vec![Element::paragraph(vec![]).into()]).into(),
        ];
        let err = validate(&nodes).unwrap_err();
        assert!(matches!(err, MalformedTree::EmptyElement { .. }));
        assert_eq!(err.path().to_string(), "1.0");
    }

    #[test]
    fn test_duplicate_radio_value_rejected() {
        let nodes: Vec<Node> = vec![radio("g", "1"), radio("g", "1")];
        let err = validate(&nodes).unwrap_err();
        assert_eq!(
            err,
            MalformedTree::DuplicateRadioValue {
                path: NodePath::from(vec![1]),
                name: "g".to_string(),
                value: "1".to_string(),
                first: NodePath::from(vec![0]),
            }
        );
    }

    #[test]
    fn test_same_value_in_different_groups_allowed() {
        let nodes: Vec<Node> = vec![radio("a", "1"), radio("b", "1")];
        assert!(validate(&nodes).is_ok());
    }

    #[test]
    fn test_duplicate_exclusive_name_rejected() {
        let nodes: Vec<Node> = vec![
            field(NodeType::TextField, "x"),
            field(NodeType::TextArea, "x"),
        ];
        let err = validate(&nodes).unwrap_err();
        assert!(matches!(err, MalformedTree::DuplicateFieldName { ref name, .. } if name == "x"));
        assert_eq!(err.path().to_string(), "1");
    }

    #[test]
    fn test_radio_name_colliding_with_text_field_rejected() {
        let nodes: Vec<Node> = vec![field(NodeType::TextField, "x"), radio("x", "1")];
        assert!(matches!(
            validate(&nodes),
            Err(MalformedTree::DuplicateFieldName { .. })
        ));

        let nodes: Vec<Node> = vec![radio("x", "1"), field(NodeType::Select, "x")];
        let err = validate(&nodes).unwrap_err();
        assert!(matches!(
            err,
            MalformedTree::DuplicateFieldName { ref first, .. } if first.to_string() == "0"
        ));
    }

    #[test]
    fn test_field_without_name_rejected() {
        let nodes: Vec<Node> = vec![Element::new(NodeType::TextField, vec![Node::text("")]).into()];
        assert!(matches!(
            validate(&nodes),
            Err(MalformedTree::MissingFieldName { .. })
        ));
    }

    #[test]
    fn test_radio_without_value_rejected() {
        let nodes: Vec<Node> = vec![field(NodeType::Radio, "r")];
        assert!(matches!(
            validate(&nodes),
            Err(MalformedTree::MissingRadioValue { .. })
        ));
    }

    #[test]
    fn test_options_outside_select_rejected() {
        let mut element = Element::field(NodeType::TextField, "x", vec![Node::text("")]);
        element.options = Some(vec![SelectOption::new("1", "One")]);
        let err = validate(&[Node::from(element)]).unwrap_err();
        assert!(matches!(
            err,
            MalformedTree::UnexpectedAttribute { attribute: "options", .. }
        ));
    }

    #[test]
    fn test_value_outside_radio_rejected() {
        let mut element = Element::paragraph(vec![Node::text("p")]);
        element.value = Some("1".to_string());
        assert!(matches!(
            validate(&[Node::from(element)]),
            Err(MalformedTree::UnexpectedAttribute { attribute: "value", .. })
        ));
    }

    #[test]
    fn test_unknown_type_needs_no_name() {
        let nodes: Vec<Node> = vec![
            Element::new(
                NodeType::from_tag("custom-widget"),
                vec![Node::text("a"), Node::text("b")],
            )
            .into(),
        ];
        assert!(validate(&nodes).is_ok());
    }

    #[test]
    fn test_error_message_names_path() {
        let nodes: Vec<Node> = vec![radio("g", "1"), radio("g", "1")];
        let message = validate(&nodes).unwrap_err().to_string();
        assert!(message.contains("at 1"), "got: {message}");
        assert!(message.contains("first used at 0"), "got: {message}");
    }
}
