//! Document literal parsing with serde.

use std::path::Path;

use crate::error::LoadError;

use super::types::{Document, Node};

/// Text format of a document or value file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    /// JSON5: unquoted keys, single quotes, trailing commas, comments
    Json5,
}

impl SourceFormat {
    /// Pick the format from a file extension. Anything but `.json5` is JSON.
    pub fn for_path(path: &Path) -> Self {
        let is_json5 = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json5"));
        if is_json5 { Self::Json5 } else { Self::Json }
    }

    /// Deserialize `source` in this format.
    ///
    /// # Errors
    /// Returns a syntax or shape error from the underlying parser.
    pub fn parse<T: serde::de::DeserializeOwned>(self, source: &str) -> Result<T, LoadError> {
        match self {
            Self::Json => Ok(serde_json::from_str(source)?),
            Self::Json5 => Ok(json5::from_str(source)?),
        }
    }
}

/// Read a file to a string, tagging I/O failures with the path.
pub(crate) fn read_source(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a document literal: a list of top-level nodes.
///
/// # Errors
/// Returns a syntax error, or [`LoadError::Malformed`] when the tree breaks a
/// structural invariant.
pub fn parse(source: &str, format: SourceFormat) -> Result<Document, LoadError> {
    let nodes: Vec<Node> = format.parse(source)?;
    let document = Document::new(nodes)?;
    tracing::debug!(
        top_level = document.len(),
        nodes = document.node_count(),
        fields = document.fields().len(),
        "parsed document"
    );
    Ok(document)
}

/// Loading and dumping of document literals.
///
/// # Example
///
/// ```
/// use formtext::document::Document;
///
/// let doc = Document::from_json(r#"[{"children":[{"text":"Hi"}]}]"#).unwrap();
/// assert_eq!(doc.len(), 1);
/// ```
impl Document {
    /// Parse a JSON document literal.
    ///
    /// # Errors
    /// See [`parse`].
    pub fn from_json(source: &str) -> Result<Self, LoadError> {
        parse(source, SourceFormat::Json)
    }

    /// Parse a JSON5 document literal.
    ///
    /// # Errors
    /// See [`parse`].
    pub fn from_json5(source: &str) -> Result<Self, LoadError> {
        parse(source, SourceFormat::Json5)
    }

    /// Load a document file, choosing the format from its extension.
    ///
    /// # Errors
    /// Returns [`LoadError::Io`] if the file cannot be read, otherwise see
    /// [`parse`].
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let source = read_source(path)?;
        parse(&source, SourceFormat::for_path(path))
    }

    /// Pretty-printed JSON of the document literal.
    ///
    /// # Errors
    /// Returns a serialization error from `serde_json`.
    pub fn to_json_pretty(&self) -> Result<String, LoadError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
