//! Field value store and the read-only view used by serialization.
//!
//! The document tree only holds field identity (`name`). Current values live
//! here. A serialization pass reads from one [`ValueSnapshot`]; changes made
//! through [`FieldStore`] after the snapshot was taken are not observed by
//! that pass.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;
use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::document::{SourceFormat, read_source};
use crate::error::LoadError;

/// Read access to field values by name.
pub trait FieldValues {
    /// Current value of field `name`, or `None` when no value is set.
    ///
    /// An empty string is a defined value.
    fn resolve(&self, name: &str) -> Option<&str>;
}

impl<S: BuildHasher> FieldValues for HashMap<String, String, S> {
    fn resolve(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl FieldValues for BTreeMap<String, String> {
    fn resolve(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// An immutable set of field values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValueSnapshot {
    values: BTreeMap<String, String>,
}

impl ValueSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Values in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Build a snapshot from a JSON object of field values.
    ///
    /// Strings are kept verbatim, numbers and booleans use their JSON text,
    /// `null` becomes the empty string, and arrays are joined with `,`.
    ///
    /// # Errors
    /// Returns [`LoadError::NotAnObject`] for non-object input and
    /// [`LoadError::UnsupportedValue`] for nested objects.
    pub fn from_value(value: Value) -> Result<Self, LoadError> {
        let Value::Object(map) = value else {
            return Err(LoadError::NotAnObject);
        };
        let mut values = BTreeMap::new();
        for (name, value) in map {
            let text = value_text(&name, &value)?;
            values.insert(name, text);
        }
        Ok(Self { values })
    }

    /// Parse a snapshot from JSON or JSON5 text.
    ///
    /// # Errors
    /// See [`ValueSnapshot::from_value`].
    pub fn parse(source: &str, format: SourceFormat) -> Result<Self, LoadError> {
        Self::from_value(format.parse(source)?)
    }

    /// Load a snapshot file, choosing the format from its extension.
    ///
    /// # Errors
    /// Returns [`LoadError::Io`] if the file cannot be read.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let source = read_source(path)?;
        Self::parse(&source, SourceFormat::for_path(path))
    }
}

impl FieldValues for ValueSnapshot {
    fn resolve(&self, name: &str) -> Option<&str> {
        self.get(name)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ValueSnapshot {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn value_text(name: &str, value: &Value) -> Result<String, LoadError> {
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s.clone()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Array(items) => {
            let parts = items
                .iter()
                .map(|item| match item {
                    Value::Array(_) => Err(LoadError::UnsupportedValue {
                        name: name.to_string(),
                        reason: "nested arrays are not field values",
                    }),
                    other => value_text(name, other),
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(parts.join(","))
        }
        Value::Object(_) => Err(LoadError::UnsupportedValue {
            name: name.to_string(),
            reason: "objects are not field values",
        }),
    }
}

/// A committed change to one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub name: String,
    pub previous: Option<String>,
    pub current: Option<String>,
    /// Store version after the commit
    pub version: u64,
}

/// Handle returned by [`FieldStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&FieldChange)>;

/// Mutable field value store with change notification.
///
/// Every commit that changes at least one value bumps the version and
/// notifies subscribers once per changed field. Writes are copy-on-write, so
/// snapshots handed out earlier keep their contents.
pub struct FieldStore {
    snapshot: Arc<ValueSnapshot>,
    version: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl FieldStore {
    pub fn new() -> Self {
        Self::from_snapshot(ValueSnapshot::default())
    }

    pub fn from_snapshot(snapshot: ValueSnapshot) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
            version: 0,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// The latest committed values.
    pub fn snapshot(&self) -> Arc<ValueSnapshot> {
        Arc::clone(&self.snapshot)
    }

    pub const fn version(&self) -> u64 {
        self.version
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.snapshot.get(name)
    }

    /// Set a field value. Returns false if the value was already current.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
        let name = name.into();
        let value = value.into();
        if self.get(&name) == Some(value.as_str()) {
            return false;
        }
        let previous = Arc::make_mut(&mut self.snapshot)
            .values
            .insert(name.clone(), value.clone());
        self.commit(vec![FieldChange {
            name,
            previous,
            current: Some(value),
            version: 0,
        }]);
        true
    }

    /// Unset a field. Returns false if it had no value.
    pub fn remove(&mut self, name: &str) -> bool {
        if self.get(name).is_none() {
            return false;
        }
        let previous = Arc::make_mut(&mut self.snapshot).values.remove(name);
        self.commit(vec![FieldChange {
            name: name.to_string(),
            previous,
            current: None,
            version: 0,
        }]);
        true
    }

    /// Unset every field.
    pub fn clear(&mut self) {
        self.replace(ValueSnapshot::default());
    }

    /// Replace all values at once, notifying for each field that differs.
    pub fn replace(&mut self, next: ValueSnapshot) {
        let mut changes = Vec::new();
        for (name, value) in &self.snapshot.values {
            if next.get(name) != Some(value.as_str()) {
                changes.push(FieldChange {
                    name: name.clone(),
                    previous: Some(value.clone()),
                    current: next.get(name).map(ToOwned::to_owned),
                    version: 0,
                });
            }
        }
        for (name, value) in &next.values {
            if self.snapshot.get(name).is_none() {
                changes.push(FieldChange {
                    name: name.clone(),
                    previous: None,
                    current: Some(value.clone()),
                    version: 0,
                });
            }
        }
        if changes.is_empty() {
            return;
        }
        changes.sort_by(|a, b| a.name.cmp(&b.name));
        self.snapshot = Arc::new(next);
        self.commit(changes);
    }

    /// Register a callback run after every committed change.
    pub fn subscribe(&mut self, listener: impl FnMut(&FieldChange) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a callback. Returns false for an unknown id.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn commit(&mut self, mut changes: Vec<FieldChange>) {
        self.version += 1;
        for change in &mut changes {
            change.version = self.version;
            tracing::trace!(field = %change.name, version = self.version, "field changed");
        }
        for (_, listener) in &mut self.listeners {
            for change in &changes {
                listener(change);
            }
        }
    }
}

impl Default for FieldStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FieldStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldStore")
            .field("snapshot", &self.snapshot)
            .field("version", &self.version)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
