//! Raw/JSON dual-mode editor state.
//!
//! Array-valued parameters (`content_ids`, `contents`) can be typed either as
//! free text (a data element token or JSON array text) or through a row editor.
//! Both representations live side by side; `mode` selects the one that is
//! saved, and switching modes converts the previously active one into the
//! other on a best-effort basis.

use common::json::parse_json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Which representation of a dual-mode field is the source of truth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    #[default]
    Raw,
    Json,
}

/// Shape of one row of a dual-mode editor.
pub trait EditorRow: Clone + Default {
    /// Column names, in display order. The first one is the primary key.
    const COLUMNS: &'static [&'static str];

    /// Builds a row from one element of a parsed raw JSON array.
    fn from_element(element: &Value) -> Self;

    /// Whether the primary key column holds a value.
    fn has_primary_key(&self) -> bool;

    /// A row in which nothing was typed.
    fn is_blank(&self) -> bool;

    /// The element this row contributes when serialized back to raw text,
    /// `None` when it contributes nothing.
    fn to_raw_element(&self) -> Option<Value>;

    fn cell(&self, column: &str) -> Option<&Value>;

    /// Returns `false` when `column` is not one of [`EditorRow::COLUMNS`].
    fn set_cell(&mut self, column: &str, value: Value) -> bool;
}

#[derive(Debug, Clone, PartialEq)]
pub struct DualModeState<R> {
    pub raw: String,
    pub json: Vec<R>,
    pub mode: EditorMode,
}

impl<R> Default for DualModeState<R> {
    fn default() -> Self {
        Self {
            raw: String::new(),
            json: Vec::new(),
            mode: EditorMode::Raw,
        }
    }
}

impl<R: EditorRow> DualModeState<R> {
    /// Initial state for a saved setting: strings (tokens, JSON text) are kept
    /// verbatim, any other value is pretty-printed; the editor starts in raw
    /// mode with no rows.
    pub fn from_setting(value: Option<&Value>) -> Self {
        let raw = match value {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => serde_json::to_string_pretty(other).unwrap_or_default(),
        };
        Self {
            raw,
            ..Self::default()
        }
    }

    /// Switches the source of truth and carries the content over.
    ///
    /// Raw → JSON parses the raw text as an array and maps each element to a
    /// row; unparsable, non-array or empty input yields one empty row.
    /// JSON → raw pretty-prints the non-blank rows, but only when there is more
    /// than one row or the single row has its primary key; otherwise the raw
    /// text is left as it was.
    pub fn switch_mode(&mut self, mode: EditorMode) {
        if self.mode == mode {
            return;
        }

        match mode {
            EditorMode::Json => self.json = self.rows_from_raw(),
            EditorMode::Raw => {
                if let Some(raw) = self.raw_from_rows() {
                    self.raw = raw;
                }
            }
        }
        self.mode = mode;
    }

    fn rows_from_raw(&self) -> Vec<R> {
        let parsed = parse_json(&self.raw);
        let rows: Vec<R> = parsed
            .as_array()
            .map(|items| items.iter().map(R::from_element).collect())
            .unwrap_or_default();

        if rows.is_empty() {
            vec![R::default()]
        } else {
            rows
        }
    }

    fn raw_from_rows(&self) -> Option<String> {
        let worth_serializing = match self.json.as_slice() {
            [] => false,
            [single] => single.has_primary_key(),
            _ => true,
        };
        if !worth_serializing {
            return None;
        }

        let elements: Vec<Value> = self
            .json
            .iter()
            .filter(|row| !row.is_blank())
            .filter_map(R::to_raw_element)
            .collect();
        if elements.is_empty() {
            return Some(String::new());
        }

        Some(serde_json::to_string_pretty(&elements).unwrap_or_default())
    }

    pub fn add_row(&mut self) {
        self.json.push(R::default());
    }

    /// Removes a row; the last remaining row is replaced by an empty one.
    pub fn remove_row(&mut self, index: usize) -> bool {
        if index >= self.json.len() {
            return false;
        }
        self.json.remove(index);
        if self.json.is_empty() {
            self.json.push(R::default());
        }
        true
    }

    pub fn set_cell(&mut self, index: usize, column: &str, value: Value) -> bool {
        self.json
            .get_mut(index)
            .is_some_and(|row| row.set_cell(column, value))
    }

    /// Rows the user actually touched, with their position in the editor.
    pub fn touched_rows(&self) -> impl Iterator<Item = (usize, &R)> {
        self.json.iter().enumerate().filter(|(_, row)| !row.is_blank())
    }
}
