use common::values::{is_meaningful, is_truthy};
use common::{ErrorTree, Settings};
use serde_json::Value;

use crate::fields::FieldView;
use crate::form::{FormLayout, FormState, View};

const PIXEL_ID: &str = "pixelId";
const EVENT_ID: &str = "eventId";
const SHOW_EVENT_ID: &str = "showEventIdField";

/// Extension-level configuration: the pixel id, plus the deprecated global
/// event id for installations that still carry one.
pub struct ConfigurationView;

impl View for ConfigurationView {
    fn initial_values(&self, settings: &Settings) -> FormState {
        let mut form = FormState::new();
        for key in [PIXEL_ID, EVENT_ID] {
            let value = settings
                .get(key)
                .filter(|value| is_meaningful(value))
                .cloned()
                .unwrap_or_else(|| Value::String(String::new()));
            form.set_value(key, value);
        }
        let show_event_id = is_truthy(form.value(EVENT_ID));
        form.set_value(SHOW_EVENT_ID, show_event_id);
        form
    }

    fn settings(&self, form: &FormState) -> Settings {
        [PIXEL_ID, EVENT_ID]
            .into_iter()
            .filter(|key| is_truthy(form.value(key)))
            .map(|key| (key.to_string(), form.value(key).clone()))
            .collect()
    }

    fn validate(&self, form: &FormState) -> ErrorTree {
        let mut errors = ErrorTree::new();
        if !is_truthy(form.value(PIXEL_ID)) {
            errors.insert_field(PIXEL_ID, "Please specify a pixel ID.");
        }
        errors
    }

    /// The event id input only shows up through `showEventIdField`, which the
    /// presentational layer reads from the form values.
    fn layout(&self) -> FormLayout {
        FormLayout {
            fields: vec![
                FieldView::text(PIXEL_ID, "Pixel ID", None),
                FieldView::text(
                    EVENT_ID,
                    "Event ID",
                    Some(
                        "This field is deprecated.  Please use the Event ID fields from \
                         inside each action views.",
                    ),
                ),
            ],
            learn_more: None,
        }
    }
}
