use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::dual_mode::EditorMode;

/// Row editors a message can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RowEditor {
    ContentIds,
    Contents,
    Parameters,
}

impl RowEditor {
    /// Form value name of the raw textarea, for editors that have one.
    pub fn raw_variable(self) -> Option<&'static str> {
        match self {
            RowEditor::ContentIds => Some("contentIdsRaw"),
            RowEditor::Contents => Some("contentsRaw"),
            RowEditor::Parameters => None,
        }
    }

    pub fn for_raw_variable(name: &str) -> Option<Self> {
        [RowEditor::ContentIds, RowEditor::Contents]
            .into_iter()
            .find(|editor| editor.raw_variable() == Some(name))
    }
}

/// Edits the UI sends to a form, tagged by `type` on the wire:
/// `{"type": "switchMode", "editor": "contents", "mode": "json"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FormMsg {
    SetValue {
        name: String,
        value: Value,
    },
    /// Replaces the raw text of a dual-mode editor.
    SetRaw {
        editor: RowEditor,
        text: String,
    },
    SwitchMode {
        editor: RowEditor,
        mode: EditorMode,
    },
    AddRow {
        editor: RowEditor,
    },
    RemoveRow {
        editor: RowEditor,
        index: usize,
    },
    SetCell {
        editor: RowEditor,
        index: usize,
        column: String,
        value: Value,
    },
}
