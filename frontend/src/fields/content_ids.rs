use common::json::parse_json;
use common::ordinal::ordinal_number;
use common::values::{
    cast_to_number_if_string, is_data_element_str, is_number, is_string, is_truthy,
};
use common::{ErrorTree, FieldPath, Settings};
use serde_json::Value;

use super::{FieldManifest, FieldView};
use crate::editor::{ContentIdRow, DualModeState, EditorMode, EditorRow};
use crate::form::FormState;

const KEY: &str = "content_ids";
const RAW: &str = "contentIdsRaw";

pub struct ContentIdsField;

impl ContentIdsField {
    fn selected(form: &FormState) -> Option<Value> {
        let state = &form.content_ids;
        match state.mode {
            EditorMode::Json => {
                let ids: Vec<Value> = state
                    .json
                    .iter()
                    .filter(|row| row.has_primary_key())
                    .map(|row| row.id.clone())
                    .collect();
                (!ids.is_empty()).then_some(Value::Array(ids))
            }
            EditorMode::Raw => {
                let parsed = parse_json(&state.raw);
                if parsed.result {
                    Some(parsed.parsed_json)
                } else {
                    Some(Value::String(state.raw.clone()))
                }
            }
        }
    }
}

impl FieldManifest for ContentIdsField {
    fn key(&self) -> &str {
        KEY
    }

    fn label(&self) -> &str {
        "Content IDs"
    }

    fn description(&self) -> Option<&str> {
        Some(
            "Product IDs associated with the event, such as SKUs (e.g. [\"ABC123\", \
             \"XYZ789\"]). The value must be an array of integers or strings or a data element.",
        )
    }

    fn initial_values(&self, settings: &Settings, form: &mut FormState) {
        let saved = settings.get(KEY).filter(|value| is_truthy(value));
        form.content_ids = DualModeState::from_setting(saved);
    }

    fn settings(&self, form: &FormState, out: &mut Settings) {
        let Some(ids) = Self::selected(form).filter(is_truthy) else {
            return;
        };

        let ids = match ids {
            Value::Array(items) => {
                Value::Array(items.iter().map(cast_to_number_if_string).collect())
            }
            other => other,
        };
        out.insert(KEY, ids);
    }

    fn validate(&self, form: &FormState) -> ErrorTree {
        let state = &form.content_ids;
        if state.mode == EditorMode::Json || state.raw.is_empty() || is_data_element_str(&state.raw)
        {
            return ErrorTree::new();
        }

        let path = FieldPath::field(RAW);
        let parsed = parse_json(&state.raw);
        if !parsed.result {
            return ErrorTree::single(
                path,
                "The field must contain either a data element or a JSON array.",
            );
        }

        let Some(items) = parsed.non_empty_array() else {
            return ErrorTree::single(
                path,
                "The JSON must be an array. \
                 Each item of the array must be a number, string or a data element.",
            );
        };

        match items
            .iter()
            .position(|element| !is_string(element) && !is_number(element))
        {
            Some(index) => ErrorTree::single(
                path,
                format!(
                    "The {} element of the array is not a string, number or data element.",
                    ordinal_number(index + 1)
                ),
            ),
            None => ErrorTree::new(),
        }
    }

    fn render(&self) -> FieldView {
        FieldView::RawJsonEditor {
            label: self.label().to_string(),
            description: self.description().map(str::to_string),
            radio_label: "Select the way you want to provide the content IDs".to_string(),
            type_variable: "contentIdsType".to_string(),
            raw_variable: RAW.to_string(),
            json_variable: "contentIdsJson".to_string(),
            columns: ContentIdRow::COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_form(raw: &str) -> FormState {
        let mut form = FormState::new();
        form.content_ids.raw = raw.to_string();
        form
    }

    fn raw_error(raw: &str) -> Option<String> {
        ContentIdsField
            .validate(&raw_form(raw))
            .field(RAW)
            .map(str::to_string)
    }

    #[test]
    fn accepts_tokens_and_arrays_of_scalars() {
        assert_eq!(raw_error(r#"[1, "ABC", "%a%"]"#), None);
        assert_eq!(raw_error("%ids%"), None);
        assert_eq!(raw_error(""), None);
    }

    #[test]
    fn reports_malformed_raw_text() {
        assert_eq!(
            raw_error("aaaa").as_deref(),
            Some("The field must contain either a data element or a JSON array.")
        );
        assert_eq!(
            raw_error("[]").as_deref(),
            Some(
                "The JSON must be an array. \
                 Each item of the array must be a number, string or a data element."
            )
        );
        assert_eq!(
            raw_error(r#"[{"a": "b"}, 2]"#).as_deref(),
            Some("The 1st element of the array is not a string, number or data element.")
        );
    }

    #[test]
    fn json_mode_is_not_validated() {
        let mut form = raw_form("aaaa");
        form.content_ids.mode = EditorMode::Json;
        assert!(ContentIdsField.validate(&form).is_empty());
    }

    #[test]
    fn raw_array_ids_are_retyped() {
        let mut out = Settings::new();
        ContentIdsField.settings(&raw_form(r#"["12", "ABC"]"#), &mut out);
        assert_eq!(out.get(KEY), Some(&json!([12, "ABC"])));

        let mut out = Settings::new();
        ContentIdsField.settings(&raw_form("%ids%"), &mut out);
        assert_eq!(out.get(KEY), Some(&json!("%ids%")));

        let mut out = Settings::new();
        ContentIdsField.settings(&raw_form(""), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn json_rows_without_id_are_dropped() {
        let mut form = FormState::new();
        form.content_ids.mode = EditorMode::Json;
        form.content_ids.json = vec![ContentIdRow::new("7"), ContentIdRow::new("")];

        let mut out = Settings::new();
        ContentIdsField.settings(&form, &mut out);
        assert_eq!(out.get(KEY), Some(&json!([7])));

        form.content_ids.json = vec![ContentIdRow::default()];
        let mut out = Settings::new();
        ContentIdsField.settings(&form, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn saved_arrays_are_pretty_printed() {
        let settings = Settings::from_value(json!({"content_ids": ["A", 2]})).unwrap();
        let mut form = FormState::new();
        ContentIdsField.initial_values(&settings, &mut form);
        assert_eq!(form.content_ids.raw, "[\n  \"A\",\n  2\n]");
        assert_eq!(form.content_ids.mode, EditorMode::Raw);
        assert!(form.content_ids.json.is_empty());
    }
}
