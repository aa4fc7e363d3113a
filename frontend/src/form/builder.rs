//! Form assemblers.
//!
//! [`FormBuilder`] composes manifest entries for an ordered list of settings
//! keys; keys without an entry fall back to passthrough behavior.
//! [`SimpleFormBuilder`] is the older text-only variant used by the legacy
//! value/currency screen. Its rules are looser (truthy instead of
//! meaningful, so a `0` is dropped) and it never validates.

use common::values::is_truthy;
use common::{ErrorTree, Settings};
use serde_json::Value;

use super::view::{FormLayout, View, LEARN_MORE_URL};
use super::FormState;
use crate::fields::{Field, FieldManifest, FieldView, PassthroughField};

enum FieldEntry {
    Manifest(&'static dyn FieldManifest),
    Passthrough(PassthroughField),
}

impl FieldEntry {
    fn for_key(key: &str) -> Self {
        match Field::from_key(key) {
            Some(field) => FieldEntry::Manifest(field.manifest()),
            None => FieldEntry::Passthrough(PassthroughField::new(key)),
        }
    }

    fn manifest(&self) -> &dyn FieldManifest {
        match self {
            FieldEntry::Manifest(manifest) => *manifest,
            FieldEntry::Passthrough(field) => field,
        }
    }
}

pub struct FormBuilder {
    entries: Vec<FieldEntry>,
}

impl FormBuilder {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            entries: keys
                .into_iter()
                .map(|key| FieldEntry::for_key(key.as_ref()))
                .collect(),
        }
    }

    pub fn from_fields(fields: &[Field]) -> Self {
        Self {
            entries: fields
                .iter()
                .map(|field| FieldEntry::Manifest(field.manifest()))
                .collect(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.manifest().key())
    }

    fn manifests(&self) -> impl Iterator<Item = &dyn FieldManifest> {
        self.entries.iter().map(FieldEntry::manifest)
    }
}

impl View for FormBuilder {
    fn initial_values(&self, settings: &Settings) -> FormState {
        let mut form = FormState::new();
        for manifest in self.manifests() {
            manifest.initial_values(settings, &mut form);
        }
        form
    }

    fn settings(&self, form: &FormState) -> Settings {
        let mut out = Settings::new();
        for manifest in self.manifests() {
            manifest.settings(form, &mut out);
        }
        out
    }

    fn validate(&self, form: &FormState) -> ErrorTree {
        self.manifests()
            .fold(ErrorTree::new(), |mut errors, manifest| {
                errors.merge(manifest.validate(form));
                errors
            })
    }

    fn layout(&self) -> FormLayout {
        FormLayout {
            fields: self.manifests().map(|manifest| manifest.render()).collect(),
            learn_more: Some(LEARN_MORE_URL.to_string()),
        }
    }
}

/// Text-only assembler with truthiness rules.
pub struct SimpleFormBuilder {
    fields: Vec<FieldEntry>,
}

impl SimpleFormBuilder {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            fields: keys
                .into_iter()
                .map(|key| FieldEntry::for_key(key.as_ref()))
                .collect(),
        }
    }
}

impl View for SimpleFormBuilder {
    fn initial_values(&self, settings: &Settings) -> FormState {
        let mut form = FormState::new();
        for entry in &self.fields {
            let key = entry.manifest().key();
            let value = settings
                .get(key)
                .filter(|value| is_truthy(value))
                .cloned()
                .unwrap_or_else(|| Value::String(String::new()));
            form.set_value(key, value);
        }
        form
    }

    fn settings(&self, form: &FormState) -> Settings {
        form.values
            .iter()
            .filter(|(_, value)| is_truthy(value))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    fn validate(&self, _form: &FormState) -> ErrorTree {
        ErrorTree::new()
    }

    fn layout(&self) -> FormLayout {
        let fields = self
            .fields
            .iter()
            .map(|entry| {
                let manifest = entry.manifest();
                FieldView::text(manifest.key(), manifest.label(), manifest.description())
            })
            .collect();
        FormLayout {
            fields,
            learn_more: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn settings(value: Value) -> Settings {
        Settings::from_value(value).unwrap()
    }

    #[test]
    fn unknown_keys_fall_back_to_passthrough() {
        let builder = FormBuilder::new(["value", "custom_key"]);
        let form = builder.initial_values(&settings(json!({"custom_key": "abc", "value": "12"})));

        assert_eq!(form.value("custom_key"), &json!("abc"));
        assert_eq!(form.value("value"), &json!("12"));
        assert_eq!(
            builder.settings(&form),
            settings(json!({"value": 12, "custom_key": "abc"}))
        );
    }

    #[test]
    fn num_items_zero_is_preserved() {
        let builder = FormBuilder::from_fields(&[Field::NumItems]);
        let form = builder.initial_values(&settings(json!({"num_items": 0})));
        assert_eq!(builder.settings(&form).get("num_items"), Some(&json!(0)));
    }

    #[test]
    fn errors_are_unioned_across_entries() {
        let builder = FormBuilder::from_fields(&[Field::Value, Field::Currency, Field::Status]);
        let form = FormState::new()
            .with_value("value", "abc")
            .with_value("currency", "U")
            .with_value("status", "maybe");

        let errors = builder.validate(&form);
        assert_eq!(errors.len(), 3);
        assert!(errors.field("currency").is_some());
    }

    #[test]
    fn layout_follows_key_order() {
        let layout = FormBuilder::new(["currency", "value"]).layout();
        let names: Vec<&str> = layout.fields.iter().map(FieldView::name).collect();
        assert_eq!(names, ["currency", "value"]);
        assert_eq!(layout.learn_more.as_deref(), Some(LEARN_MORE_URL));
    }

    #[test]
    fn simple_builder_drops_falsy_values() {
        let builder = SimpleFormBuilder::new(["value", "currency"]);
        let form = builder.initial_values(&settings(json!({"value": 0, "currency": "USD"})));

        assert_eq!(form.value("value"), &json!(""));
        assert_eq!(builder.settings(&form), settings(json!({"currency": "USD"})));
        assert!(builder.validate(&form).is_empty());
        assert!(builder
            .layout()
            .fields
            .iter()
            .all(|field| matches!(field, FieldView::TextField { .. })));
    }
}
