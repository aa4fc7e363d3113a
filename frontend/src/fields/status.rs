use common::values::{is_data_element_token, is_meaningful, js_string};
use common::{ErrorTree, FieldPath, Settings};
use serde_json::Value;

use super::{FieldManifest, FieldView};
use crate::form::FormState;

const KEY: &str = "status";

pub struct StatusField;

impl FieldManifest for StatusField {
    fn key(&self) -> &str {
        KEY
    }

    fn label(&self) -> &str {
        "Status"
    }

    fn description(&self) -> Option<&str> {
        Some("Boolean that shows the status of the registration or a data element.")
    }

    /// The input is textual, so booleans are shown as `"true"` / `"false"`.
    fn initial_values(&self, settings: &Settings, form: &mut FormState) {
        let text = settings
            .get(KEY)
            .filter(|value| is_meaningful(value))
            .map(js_string)
            .unwrap_or_default();
        form.set_value(KEY, text);
    }

    fn settings(&self, form: &FormState, out: &mut Settings) {
        let value = form.value(KEY);
        if !is_meaningful(value) {
            return;
        }

        let saved = match value.as_str() {
            Some("true") => Value::Bool(true),
            Some("false") => Value::Bool(false),
            _ => value.clone(),
        };
        out.insert(KEY, saved);
    }

    fn validate(&self, form: &FormState) -> ErrorTree {
        let value = form.value(KEY);
        let valid = is_data_element_token(value)
            || matches!(value, Value::Null | Value::Bool(_))
            || matches!(value.as_str(), Some("" | "true" | "false"));

        if valid {
            ErrorTree::new()
        } else {
            ErrorTree::single(
                FieldPath::field(KEY),
                "The status must be a boolean or a data element.",
            )
        }
    }

    fn render(&self) -> FieldView {
        FieldView::combo_box(KEY, self.label(), self.description(), &["true", "false"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn round_trip(saved: Value) -> (Value, Settings) {
        let settings = Settings::from_value(json!({ "status": saved })).unwrap();
        let mut form = FormState::new();
        StatusField.initial_values(&settings, &mut form);
        let mut out = Settings::new();
        StatusField.settings(&form, &mut out);
        (form.value(KEY).clone(), out)
    }

    #[test]
    fn false_survives_the_round_trip() {
        let (shown, out) = round_trip(json!(false));
        assert_eq!(shown, json!("false"));
        assert_eq!(out.get(KEY), Some(&json!(false)));

        let (shown, out) = round_trip(json!(true));
        assert_eq!(shown, json!("true"));
        assert_eq!(out.get(KEY), Some(&json!(true)));
    }

    #[test]
    fn tokens_pass_through_and_empty_is_omitted() {
        let (_, out) = round_trip(json!("%status%"));
        assert_eq!(out.get(KEY), Some(&json!("%status%")));

        let (shown, out) = round_trip(json!(""));
        assert_eq!(shown, json!(""));
        assert!(out.is_empty());
    }

    #[test]
    fn only_booleans_and_tokens_validate() {
        let form = FormState::new().with_value(KEY, "a");
        assert_eq!(
            StatusField.validate(&form).field(KEY),
            Some("The status must be a boolean or a data element.")
        );
        for accepted in ["true", "false", "%a%", ""] {
            let form = FormState::new().with_value(KEY, accepted);
            assert!(StatusField.validate(&form).is_empty(), "{accepted}");
        }
    }
}
