// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. store::FieldStore)
    clippy::module_name_repetitions
)]

//! # Formtext
//!
//! Rich-text documents with embedded form fields.
//!
//! A document is a tree of text leaves and typed elements. Some element
//! types are interactive fields (text input, select, radio option,
//! textarea) identified by a `name`; their current values live in a
//! separate field value store, never in the tree.
//!
//! ## Architecture
//!
//! - The **classifier** decides per type tag whether a node is inline and
//!   whether it is void
//! - The **serializer** renders a document as plain text, substituting each
//!   field with its live value
//! - The **dispatch table** maps type tags to presentation handlers, with a
//!   fallback for unknown tags
//!
//! ## Modules
//!
//! - [`document`]: Node model, validation and loading
//! - [`classify`]: Inline/void classification
//! - [`serialize`]: Plain-text serialization
//! - [`store`]: Field value store and snapshots
//! - [`dispatch`]: Node-type dispatch table
//! - [`render`]: Terminal form preview
//! - [`config`]: Flag-file configuration
//! - [`watcher`]: File watching

pub mod classify;
pub mod config;
pub mod dispatch;
pub mod document;
pub mod error;
pub mod render;
pub mod serialize;
pub mod store;
pub mod watcher;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::classify::{Classification, classify};
    pub use crate::dispatch::{DispatchTable, HandlerKind};
    pub use crate::document::{Document, Element, Node, NodeType};
    pub use crate::error::{LoadError, MalformedTree};
    pub use crate::serialize::{serialize, serialize_document, serialize_with_store};
    pub use crate::store::{FieldStore, FieldValues, ValueSnapshot};
}
