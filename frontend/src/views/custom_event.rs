use std::collections::HashSet;

use common::values::{is_meaningful, is_truthy};
use common::{ErrorTree, FieldPath, Settings};
use serde_json::{Map, Value};

use crate::editor::KeyValueRows;
use crate::fields::FieldView;
use crate::form::{FormLayout, FormState, View};

const NAME: &str = "name";
const EVENT_ID: &str = "event_id";
const PARAMETERS: &str = "parameters";

/// Screen of the `trackCustom` action: an event name, an optional event id
/// and free key/value parameters.
pub struct CustomEventView;

impl View for CustomEventView {
    fn initial_values(&self, settings: &Settings) -> FormState {
        let mut form = FormState::new();
        for key in [NAME, EVENT_ID] {
            let value = settings
                .get(key)
                .filter(|value| is_meaningful(value))
                .cloned()
                .unwrap_or_else(|| Value::String(String::new()));
            form.set_value(key, value);
        }
        form.parameters = KeyValueRows::from_setting(settings.get(PARAMETERS));
        form
    }

    fn settings(&self, form: &FormState) -> Settings {
        let mut out = Settings::new();

        let name = form.value(NAME);
        if is_meaningful(name) {
            out.insert(NAME, name.clone());
        }

        let parameters = form.parameters.complete_rows();
        if !parameters.is_empty() {
            let rows = parameters
                .into_iter()
                .map(|parameter| {
                    let mut row = Map::new();
                    row.insert("key".to_string(), Value::String(parameter.key));
                    row.insert("value".to_string(), Value::String(parameter.value));
                    Value::Object(row)
                })
                .collect();
            out.insert(PARAMETERS, Value::Array(rows));
        }

        let event_id = form.value(EVENT_ID);
        if is_truthy(event_id) {
            out.insert(EVENT_ID, event_id.clone());
        }
        out
    }

    fn validate(&self, form: &FormState) -> ErrorTree {
        let mut errors = ErrorTree::new();
        if !is_truthy(form.value(NAME)) {
            errors.insert_field(NAME, "Please provide an event name.");
        }

        let mut seen = HashSet::new();
        for (index, row) in form.parameters.rows().iter().enumerate() {
            let key_path = FieldPath::row(PARAMETERS, index, "key");
            if row.key.is_empty() {
                if !row.value.is_empty() {
                    errors.insert(key_path, "Please provide a key name.");
                }
            } else if !seen.insert(row.key.as_str()) {
                errors.insert(key_path, "This key has already been used.");
            }

            if !row.key.is_empty() && row.value.is_empty() {
                errors.insert(
                    FieldPath::row(PARAMETERS, index, "value"),
                    "Please provide a value.",
                );
            }
        }
        errors
    }

    fn layout(&self) -> FormLayout {
        FormLayout {
            fields: vec![
                FieldView::text(NAME, "Event Name", None),
                FieldView::text(EVENT_ID, "Event ID", None),
                FieldView::KeyValueEditor {
                    name: PARAMETERS.to_string(),
                    label: "Parameters".to_string(),
                    columns: vec!["key".to_string(), "value".to_string()],
                },
            ],
            learn_more: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Parameter;
    use serde_json::json;

    fn form_with_rows(rows: Vec<Parameter>) -> FormState {
        let mut form = FormState::new().with_value(NAME, "Custom");
        form.parameters = KeyValueRows::from_rows(rows);
        form
    }

    #[test]
    fn incomplete_parameter_rows_are_dropped() {
        let form = form_with_rows(vec![
            Parameter::new("a", "b"),
            Parameter::new("c", ""),
            Parameter::new("", "d"),
        ])
        .with_value(EVENT_ID, "");

        assert_eq!(
            CustomEventView.settings(&form),
            Settings::from_value(json!({
                "name": "Custom",
                "parameters": [{"key": "a", "value": "b"}]
            }))
            .unwrap()
        );
    }

    #[test]
    fn parameters_are_omitted_when_none_is_complete() {
        let form = form_with_rows(Vec::new()).with_value(EVENT_ID, "%id%");
        let settings = CustomEventView.settings(&form);
        assert!(!settings.contains_key(PARAMETERS));
        assert_eq!(settings.get_str(EVENT_ID), Some("%id%"));
    }

    #[test]
    fn reports_missing_and_duplicate_keys() {
        let form = form_with_rows(vec![
            Parameter::new("a", "1"),
            Parameter::new("a", "2"),
            Parameter::new("", "3"),
            Parameter::new("b", ""),
        ])
        .with_value(NAME, "");

        let errors = CustomEventView.validate(&form).flatten();
        assert_eq!(errors.get("name"), Some("Please provide an event name."));
        assert_eq!(errors.get("parameters.1.key"), Some("This key has already been used."));
        assert_eq!(errors.get("parameters.2.key"), Some("Please provide a key name."));
        assert_eq!(errors.get("parameters.3.value"), Some("Please provide a value."));
        assert_eq!(errors.0.len(), 4);
    }

    #[test]
    fn initial_values_seed_one_empty_row() {
        let form = CustomEventView.initial_values(&Settings::new());
        assert_eq!(form.value(NAME), &json!(""));
        assert_eq!(form.parameters.rows(), &[Parameter::default()]);
    }
}
