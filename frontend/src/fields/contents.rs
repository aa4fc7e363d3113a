use common::json::parse_json;
use common::ordinal::ordinal_number;
use common::values::{
    cast_to_number_if_string, is_data_element_str, is_data_element_token, is_number, is_truthy,
};
use common::{ContentItem, ErrorTree, FieldPath, Settings};
use serde_json::Value;

use super::{FieldManifest, FieldView};
use crate::editor::{ContentRow, DualModeState, EditorMode, EditorRow};
use crate::form::FormState;

const KEY: &str = "contents";
const RAW: &str = "contentsRaw";
const JSON_PAIRS: &str = "contentsJsonPairs";

pub struct ContentsField;

/// Whether a quantity is usable as is: a token, or something that casts to a
/// number.
fn is_valid_quantity(quantity: &Value) -> bool {
    is_data_element_token(quantity) || is_number(&cast_to_number_if_string(quantity))
}

fn member<'a>(element: &'a Value, name: &str) -> &'a Value {
    element.get(name).unwrap_or(&Value::Null)
}

impl ContentsField {
    fn selected(form: &FormState) -> Option<Value> {
        let state = &form.contents;
        match state.mode {
            EditorMode::Json => {
                let items: Vec<Value> = state
                    .touched_rows()
                    .map(|(_, row)| ContentItem::normalize(&row.id, &row.quantity).to_value())
                    .collect();
                (!items.is_empty()).then_some(Value::Array(items))
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

    fn validate_rows(form: &FormState, errors: &mut ErrorTree) {
        for (index, row) in form.contents.touched_rows() {
            if !is_truthy(&row.id) {
                errors.insert(FieldPath::row(JSON_PAIRS, index, "id"), "Please provide an ID.");
            }

            let quantity = FieldPath::row(JSON_PAIRS, index, "quantity");
            if !is_truthy(&row.quantity) {
                errors.insert(quantity, "Please provide a value for quantity.");
            } else if !is_valid_quantity(&row.quantity) {
                errors.insert(
                    quantity,
                    "The quantity value must be a number or a data element.",
                );
            }
        }
    }

    fn validate_raw(raw: &str) -> Option<String> {
        if raw.is_empty() || is_data_element_str(raw) {
            return None;
        }

        let parsed = parse_json(raw);
        if !parsed.result {
            return Some("The field must contain either a data element or a JSON array.".into());
        }

        let Some(items) = parsed.non_empty_array() else {
            return Some(
                "The JSON must be an array of JSON objects. \
                 Each object must have the \"id\" and \"quantity\" keys."
                    .into(),
            );
        };

        items.iter().enumerate().find_map(|(index, element)| {
            let ordinal = ordinal_number(index + 1);
            let quantity = member(element, "quantity");
            if !is_truthy(member(element, "id")) {
                Some(format!(
                    "The {ordinal} element of the array doesn't have a value for ID."
                ))
            } else if !is_truthy(quantity) {
                Some(format!(
                    "The {ordinal} element of the array doesn't have a value for quantity."
                ))
            } else if !is_valid_quantity(quantity) {
                Some(format!(
                    "The quantity value of {ordinal} element of the array must be a number \
                     or a data element."
                ))
            } else {
                None
            }
        })
    }
}

impl FieldManifest for ContentsField {
    fn key(&self) -> &str {
        KEY
    }

    fn label(&self) -> &str {
        "Contents"
    }

    fn description(&self) -> Option<&str> {
        Some(
            "An array of JSON objects that contains the quantity and the International \
             Article Number (EAN) when applicable, or other product or content identifier(s). \
             id and quantity are the required fields.",
        )
    }

    fn initial_values(&self, settings: &Settings, form: &mut FormState) {
        let saved = settings.get(KEY).filter(|value| is_truthy(value));
        form.contents = DualModeState::from_setting(saved);
    }

    fn settings(&self, form: &FormState, out: &mut Settings) {
        let Some(contents) = Self::selected(form).filter(is_truthy) else {
            return;
        };

        let contents = match contents {
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(|element| ContentItem::from_element(element).to_value())
                    .collect(),
            ),
            other => other,
        };
        out.insert(KEY, contents);
    }

    fn validate(&self, form: &FormState) -> ErrorTree {
        let mut errors = ErrorTree::new();
        match form.contents.mode {
            EditorMode::Json => Self::validate_rows(form, &mut errors),
            EditorMode::Raw => {
                if let Some(message) = Self::validate_raw(&form.contents.raw) {
                    errors.insert_field(RAW, message);
                }
            }
        }
        errors
    }

    fn render(&self) -> FieldView {
        FieldView::RawJsonEditor {
            label: self.label().to_string(),
            description: self.description().map(str::to_string),
            radio_label: "Select the way you want to provide the content".to_string(),
            type_variable: "contentsType".to_string(),
            raw_variable: RAW.to_string(),
            json_variable: JSON_PAIRS.to_string(),
            columns: ContentRow::COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_error(raw: &str) -> Option<String> {
        let mut form = FormState::new();
        form.contents.raw = raw.to_string();
        ContentsField.validate(&form).field(RAW).map(str::to_string)
    }

    #[test]
    fn an_empty_raw_array_is_not_a_contents_list() {
        for raw in ["[]", " [ ] "] {
            assert_eq!(
                raw_error(raw).as_deref(),
                Some(
                    "The JSON must be an array of JSON objects. \
                     Each object must have the \"id\" and \"quantity\" keys."
                ),
                "{raw}"
            );
        }
    }

    #[test]
    fn raw_validation_reports_the_first_bad_element() {
        assert_eq!(raw_error(r#"[{"id": "A", "quantity": 2}]"#), None);
        assert_eq!(raw_error(r#"[{"id": "A", "quantity": "%q%"}]"#), None);
        assert_eq!(raw_error("%contents%"), None);

        assert_eq!(
            raw_error("{").as_deref(),
            Some("The field must contain either a data element or a JSON array.")
        );
        assert_eq!(
            raw_error("{}").as_deref(),
            Some(
                "The JSON must be an array of JSON objects. \
                 Each object must have the \"id\" and \"quantity\" keys."
            )
        );
        assert_eq!(
            raw_error(r#"[{"id": "A", "quantity": 1}, {"quantity": 1}]"#).as_deref(),
            Some("The 2nd element of the array doesn't have a value for ID.")
        );
        assert_eq!(
            raw_error(r#"[{"id": "A"}]"#).as_deref(),
            Some("The 1st element of the array doesn't have a value for quantity.")
        );
        assert_eq!(
            raw_error(r#"[{"id": "A", "quantity": "many"}]"#).as_deref(),
            Some(
                "The quantity value of 1st element of the array must be a number \
                 or a data element."
            )
        );
    }

    #[test]
    fn json_rows_are_addressed_by_position() {
        let mut form = FormState::new();
        form.contents.mode = EditorMode::Json;
        form.contents.json = vec![
            ContentRow::new("A", 1),
            ContentRow::default(),
            ContentRow::new("", "x"),
            ContentRow::new("B", ""),
        ];

        let errors = ContentsField.validate(&form).flatten();
        assert_eq!(errors.0.len(), 3);
        assert_eq!(errors.get("contentsJsonPairs.2.id"), Some("Please provide an ID."));
        assert_eq!(
            errors.get("contentsJsonPairs.2.quantity"),
            Some("The quantity value must be a number or a data element.")
        );
        assert_eq!(
            errors.get("contentsJsonPairs.3.quantity"),
            Some("Please provide a value for quantity.")
        );
    }

    #[test]
    fn json_rows_are_normalized() {
        let mut form = FormState::new();
        form.contents.mode = EditorMode::Json;
        form.contents.json = vec![
            ContentRow::new(12, "3"),
            ContentRow::default(),
            ContentRow::new("B", "%qty%"),
        ];

        let mut out = Settings::new();
        ContentsField.settings(&form, &mut out);
        assert_eq!(
            out.get(KEY),
            Some(&json!([
                {"id": "12", "quantity": 3},
                {"id": "B", "quantity": "%qty%"}
            ]))
        );
    }

    #[test]
    fn unparsable_raw_text_is_saved_verbatim() {
        let mut form = FormState::new();
        form.contents.raw = "%contents%".into();
        let mut out = Settings::new();
        ContentsField.settings(&form, &mut out);
        assert_eq!(out.get(KEY), Some(&json!("%contents%")));
    }
}
