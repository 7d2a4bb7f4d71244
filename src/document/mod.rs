//! Document tree: nodes, validation and loading.
//!
//! This module handles:
//! - The node data model (text leaves and typed elements)
//! - Structural validation of a tree before it can be serialized
//! - Loading document literals from JSON or JSON5

mod parser;
mod types;
mod validate;

pub use parser::{SourceFormat, parse};
pub(crate) use parser::read_source;
pub use types::{Document, Element, Node, NodePath, NodeType, SelectOption, TextNode};
pub use validate::validate;
