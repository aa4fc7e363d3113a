use serde_json::{Map, Value};

use crate::editor::{ContentIdRow, ContentRow, DualModeState, KeyValueRows};

static EMPTY: Value = Value::Null;

/// Everything a configuration screen edits.
///
/// Plain inputs live in `values`, keyed by their settings name and holding
/// what the user typed (or the value read from the saved settings). The
/// array-valued parameters have their own editor state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub values: Map<String, Value>,
    pub content_ids: DualModeState<ContentIdRow>,
    pub contents: DualModeState<ContentRow>,
    pub parameters: KeyValueRows,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of a plain input; `null` when it was never set.
    pub fn value(&self, name: &str) -> &Value {
        self.values.get(name).unwrap_or(&EMPTY)
    }

    pub fn set_value(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    /// Builder-style variant of [`FormState::set_value`], handy in tests.
    pub fn with_value(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set_value(name, value);
        self
    }
}
