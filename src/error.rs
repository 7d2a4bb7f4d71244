//! Error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::document::{NodePath, NodeType};

/// A structural violation found while validating a document tree.
///
/// Every variant names the path of the offending node.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedTree {
    #[error("{node_type} element at {path} has no children")]
    EmptyElement { path: NodePath, node_type: NodeType },

    #[error("text leaf at {path} has children")]
    LeafWithChildren { path: NodePath },

    #[error("{node_type} field at {path} has no name")]
    MissingFieldName { path: NodePath, node_type: NodeType },

    #[error("radio option at {path} in group {name:?} has no value")]
    MissingRadioValue { path: NodePath, name: String },

    #[error(
        "radio option at {path} repeats value {value:?} of group {name:?} (first used at {first})"
    )]
    DuplicateRadioValue {
        path: NodePath,
        name: String,
        value: String,
        first: NodePath,
    },

    #[error("field name {name:?} at {path} is already used at {first}")]
    DuplicateFieldName {
        path: NodePath,
        name: String,
        first: NodePath,
    },

    #[error("{node_type} element at {path} may not carry `{attribute}`")]
    UnexpectedAttribute {
        path: NodePath,
        node_type: NodeType,
        attribute: &'static str,
    },
}

impl MalformedTree {
    /// Path of the node that failed validation.
    pub const fn path(&self) -> &NodePath {
        match self {
            Self::EmptyElement { path, .. }
            | Self::LeafWithChildren { path }
            | Self::MissingFieldName { path, .. }
            | Self::MissingRadioValue { path, .. }
            | Self::DuplicateRadioValue { path, .. }
            | Self::DuplicateFieldName { path, .. }
            | Self::UnexpectedAttribute { path, .. } => path,
        }
    }
}

/// Failure to load a document or a value snapshot.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid JSON5: {0}")]
    Json5(#[from] json5::Error),

    #[error("expected a JSON object of field values")]
    NotAnObject,

    #[error("field {name:?} has an unsupported value: {reason}")]
    UnsupportedValue { name: String, reason: &'static str },

    #[error("malformed document: {0}")]
    Malformed(#[from] MalformedTree),
}
