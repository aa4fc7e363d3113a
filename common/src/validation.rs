//! Field-addressable validation errors.
//!
//! Errors are keyed by a structured [`FieldPath`] (`contentsJsonPairs` → `0` →
//! `id`) and only flattened to the dot-path strings the host UI expects
//! (`contentsJsonPairs.0.id`) at the bridge boundary.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => f.write_str(name),
            PathSegment::Index(index) => write!(f, "{index}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    pub fn field(name: impl Into<String>) -> Self {
        Self(vec![PathSegment::Field(name.into())])
    }

    /// Path of one cell in a row editor: `<editor>.<index>.<column>`.
    pub fn row(editor: &str, index: usize, column: &str) -> Self {
        Self(vec![
            PathSegment::Field(editor.to_string()),
            PathSegment::Index(index),
            PathSegment::Field(column.to_string()),
        ])
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    /// Dot-joined form used by the host UI.
    pub fn to_dot_path(&self) -> String {
        self.0
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_dot_path())
    }
}

/// Union of per-field validation messages. One message per path; a later
/// insert for the same path replaces the earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorTree {
    entries: BTreeMap<FieldPath, String>,
}

impl ErrorTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(path: FieldPath, message: impl Into<String>) -> Self {
        let mut tree = Self::new();
        tree.insert(path, message);
        tree
    }

    pub fn insert(&mut self, path: FieldPath, message: impl Into<String>) {
        self.entries.insert(path, message.into());
    }

    pub fn insert_field(&mut self, name: &str, message: impl Into<String>) {
        self.insert(FieldPath::field(name), message);
    }

    pub fn merge(&mut self, other: ErrorTree) {
        self.entries.extend(other.entries);
    }

    pub fn get(&self, path: &FieldPath) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    /// Message for a top-level field.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.get(&FieldPath::field(name))
    }

    pub fn contains(&self, path: &FieldPath) -> bool {
        self.entries.contains_key(path)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &str)> {
        self.entries.iter().map(|(path, message)| (path, message.as_str()))
    }

    pub fn flatten(&self) -> FlatErrors {
        FlatErrors(
            self.entries
                .iter()
                .map(|(path, message)| (path.to_dot_path(), message.clone()))
                .collect(),
        )
    }
}

/// Dot-path view of an [`ErrorTree`], serialized as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FlatErrors(pub BTreeMap<String, String>);

impl FlatErrors {
    pub fn get(&self, dot_path: &str) -> Option<&str> {
        self.0.get(dot_path).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattens_nested_rows_to_dot_paths() {
        let mut errors = ErrorTree::new();
        errors.insert(FieldPath::row("contentsJsonPairs", 0, "id"), "Please provide an ID.");
        errors.insert_field("value", "The value must be a number or a data element.");

        let flat = errors.flatten();
        assert_eq!(flat.get("contentsJsonPairs.0.id"), Some("Please provide an ID."));
        assert_eq!(
            flat.get("value"),
            Some("The value must be a number or a data element.")
        );
        assert_eq!(flat.0.len(), 2);
    }

    #[test]
    fn merge_unions_and_later_entries_win() {
        let mut left = ErrorTree::single(FieldPath::field("currency"), "first");
        let mut right = ErrorTree::single(FieldPath::field("currency"), "second");
        right.insert_field("status", "bad");
        left.merge(right);

        assert_eq!(left.field("currency"), Some("second"));
        assert_eq!(left.field("status"), Some("bad"));
        assert_eq!(left.len(), 2);
    }
}
