//! Update function for configuration forms.
//!
//! Elm-style: it receives the current [`FormState`] and a [`FormMsg`], mutates
//! the state and returns whether anything changed so the caller knows if the
//! view needs to re-render. No validation happens here; it only runs when the
//! host asks the bridge to validate.

use common::values::js_string;
use log::debug;
use serde_json::Value;

use super::messages::{FormMsg, RowEditor};
use crate::form::FormState;

/// Applies one edit to `form`.
///
/// Contract
/// - `SetValue` always counts as a change when the value differs. Values
///   named after a raw textarea (`contentIdsRaw`, `contentsRaw`) are routed
///   to that editor's raw text like `SetRaw`.
/// - `SetRaw` on the parameters editor is ignored, it has no raw text.
/// - `SwitchMode` converts between raw text and rows (see
///   [`DualModeState::switch_mode`](super::DualModeState::switch_mode)); the
///   parameters editor has no raw mode and ignores it.
/// - Row edits addressing a missing row or column are ignored.
pub fn update(form: &mut FormState, msg: FormMsg) -> bool {
    match msg {
        FormMsg::SetValue { name, value } => {
            if let Some(editor) = RowEditor::for_raw_variable(&name) {
                let text = match value {
                    Value::Null => String::new(),
                    Value::String(text) => text,
                    other => js_string(&other),
                };
                return set_raw(form, editor, text);
            }
            if form.values.get(&name) == Some(&value) {
                return false;
            }
            form.values.insert(name, value);
            true
        }
        FormMsg::SetRaw { editor, text } => set_raw(form, editor, text),
        FormMsg::SwitchMode { editor, mode } => match editor {
            RowEditor::ContentIds => {
                let changed = form.content_ids.mode != mode;
                form.content_ids.switch_mode(mode);
                changed
            }
            RowEditor::Contents => {
                let changed = form.contents.mode != mode;
                form.contents.switch_mode(mode);
                changed
            }
            RowEditor::Parameters => false,
        },
        FormMsg::AddRow { editor } => {
            match editor {
                RowEditor::ContentIds => form.content_ids.add_row(),
                RowEditor::Contents => form.contents.add_row(),
                RowEditor::Parameters => form.parameters.add_row(),
            }
            true
        }
        FormMsg::RemoveRow { editor, index } => match editor {
            RowEditor::ContentIds => form.content_ids.remove_row(index),
            RowEditor::Contents => form.contents.remove_row(index),
            RowEditor::Parameters => form.parameters.remove_row(index),
        },
        FormMsg::SetCell {
            editor,
            index,
            column,
            value,
        } => {
            let changed = match editor {
                RowEditor::ContentIds => form.content_ids.set_cell(index, &column, value),
                RowEditor::Contents => form.contents.set_cell(index, &column, value),
                RowEditor::Parameters => {
                    let text = match value {
                        Value::Null => String::new(),
                        other => js_string(&other),
                    };
                    form.parameters.set_cell(index, &column, text)
                }
            };
            if !changed {
                debug!("ignored edit of {editor:?} row {index}, column {column:?}");
            }
            changed
        }
    }
}

fn set_raw(form: &mut FormState, editor: RowEditor, text: String) -> bool {
    let raw = match editor {
        RowEditor::ContentIds => &mut form.content_ids.raw,
        RowEditor::Contents => &mut form.contents.raw,
        RowEditor::Parameters => {
            debug!("ignored raw text for {editor:?}");
            return false;
        }
    };
    if *raw == text {
        return false;
    }
    *raw = text;
    true
}
