use common::values::is_truthy;
use common::Settings;
use serde_json::Value;

use super::FieldManifest;
use crate::form::FormState;

pub const KEY: &str = "search_string";
/// Key written by older versions of the Search screen.
pub const LEGACY_KEY: &str = "searchString";

pub struct SearchStringField;

impl FieldManifest for SearchStringField {
    fn key(&self) -> &str {
        KEY
    }

    fn label(&self) -> &str {
        "Search String"
    }

    fn description(&self) -> Option<&str> {
        Some("The string entered by the user for the search.")
    }

    fn initial_values(&self, settings: &Settings, form: &mut FormState) {
        let value = [KEY, LEGACY_KEY]
            .into_iter()
            .filter_map(|key| settings.get(key))
            .find(|value| is_truthy(value))
            .cloned()
            .unwrap_or_else(|| Value::String(String::new()));
        form.set_value(KEY, value);
    }

    fn settings(&self, form: &FormState, out: &mut Settings) {
        let value = form.value(KEY);
        if is_truthy(value) {
            out.insert(KEY, value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_the_legacy_key_and_writes_the_new_one() {
        let settings = Settings::from_value(json!({"searchString": "shoes"})).unwrap();
        let mut form = FormState::new();
        SearchStringField.initial_values(&settings, &mut form);
        assert_eq!(form.value(KEY), &json!("shoes"));

        let mut out = Settings::new();
        SearchStringField.settings(&form, &mut out);
        assert_eq!(out.to_value(), json!({"search_string": "shoes"}));
    }
}
