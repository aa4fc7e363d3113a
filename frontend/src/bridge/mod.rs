//! Extension view lifecycle.
//!
//! The host drives a configuration screen through three calls: `init` with
//! the previously saved settings, `validate` before saving and
//! `getSettings` to collect what gets saved. [`ExtensionBridge`] keeps the
//! form state between those calls and applies user edits to it.
//!
//! Errors stay structured until [`ExtensionBridge::errors`], which flattens
//! them into dot paths for the presentational layer.

pub mod wasm;

use common::{ErrorTree, FlatErrors, Settings};
use log::debug;

use crate::editor::{update, FormMsg};
use crate::form::{FormLayout, FormState, View};
use crate::views::view_for;

pub struct ExtensionBridge {
    view: Box<dyn View>,
    form: FormState,
    errors: ErrorTree,
}

impl ExtensionBridge {
    pub fn new(view: Box<dyn View>) -> Self {
        Self {
            view,
            form: FormState::new(),
            errors: ErrorTree::new(),
        }
    }

    /// Bridge for a screen registered under `name`.
    pub fn for_view(name: &str) -> Option<Self> {
        view_for(name).map(Self::new)
    }

    /// Seeds the form. A first-time configuration has no settings.
    pub fn init(&mut self, settings: Option<Settings>) {
        let settings = settings.unwrap_or_default();
        debug!("initializing view with {} saved setting(s)", settings.len());
        self.form = self.view.initial_values(&settings);
        self.errors = ErrorTree::new();
    }

    pub fn get_settings(&self) -> Settings {
        self.view.settings(&self.form)
    }

    /// Runs the screen's validation and keeps the result for [`Self::errors`].
    pub fn validate(&mut self) -> bool {
        self.errors = self.view.validate(&self.form);
        self.errors.is_empty()
    }

    pub fn errors(&self) -> FlatErrors {
        self.errors.flatten()
    }

    pub fn update(&mut self, msg: FormMsg) -> bool {
        update(&mut self.form, msg)
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn layout(&self) -> FormLayout {
        self.view.layout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{EditorMode, RowEditor};
    use serde_json::json;

    #[test]
    fn validate_keeps_the_last_errors() {
        let mut bridge = ExtensionBridge::for_view("sendPurchaseEvent").unwrap();
        bridge.init(None);
        bridge.update(FormMsg::SetValue {
            name: "value".into(),
            value: json!("abc"),
        });

        assert!(!bridge.validate());
        assert_eq!(
            bridge.errors().get("value"),
            Some("The value must be a number or a data element.")
        );

        bridge.update(FormMsg::SetValue {
            name: "value".into(),
            value: json!("10"),
        });
        assert!(bridge.validate());
        assert!(bridge.errors().0.is_empty());
        assert_eq!(bridge.get_settings().get("value"), Some(&json!(10)));
    }

    #[test]
    fn content_rows_are_edited_through_messages() {
        let mut bridge = ExtensionBridge::for_view("sendAddToCartEvent").unwrap();
        bridge.init(Some(
            Settings::from_value(json!({"contents": [{"id": "A", "quantity": 1}]})).unwrap(),
        ));

        bridge.update(FormMsg::SwitchMode {
            editor: RowEditor::Contents,
            mode: EditorMode::Json,
        });
        bridge.update(FormMsg::AddRow {
            editor: RowEditor::Contents,
        });
        bridge.update(FormMsg::SetCell {
            editor: RowEditor::Contents,
            index: 1,
            column: "quantity".into(),
            value: json!("2"),
        });

        assert!(!bridge.validate());
        assert_eq!(
            bridge.errors().get("contentsJsonPairs.1.id"),
            Some("Please provide an ID.")
        );
    }

    #[test]
    fn raw_text_typed_in_the_textarea_is_validated_and_saved() {
        let mut bridge = ExtensionBridge::for_view("sendPurchaseEvent").unwrap();
        bridge.init(None);

        assert!(bridge.update(FormMsg::SetValue {
            name: "contentIdsRaw".into(),
            value: json!("aaaa"),
        }));
        assert_eq!(bridge.form().content_ids.raw, "aaaa");
        assert!(!bridge.validate());
        assert_eq!(
            bridge.errors().get("contentIdsRaw"),
            Some("The field must contain either a data element or a JSON array.")
        );

        bridge.update(FormMsg::SetRaw {
            editor: RowEditor::ContentIds,
            text: r#"["A", "12"]"#.into(),
        });
        assert!(bridge.validate());
        assert_eq!(
            bridge.get_settings().get("content_ids"),
            Some(&json!(["A", 12]))
        );
    }
}
