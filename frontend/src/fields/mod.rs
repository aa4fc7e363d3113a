//! Per-parameter field manifests.
//!
//! Every event parameter the configuration screens know about has one
//! manifest entry bundling how its form state is initialized from saved
//! settings, how settings are extracted back from the form, how it is
//! validated and how it is rendered. The provided methods of
//! [`FieldManifest`] are the passthrough behavior shared by every entry;
//! entries only override what they need.
//!
//! [`Field`] is the closed registry of entries, looked up by settings key.

use common::values::is_meaningful;
use common::{ErrorTree, Settings};
use serde::Serialize;
use serde_json::Value;

use crate::form::FormState;

mod content_ids;
mod content_type;
mod contents;
mod currency;
mod numeric;
mod search_string;
mod status;
mod text;

pub use content_ids::ContentIdsField;
pub use content_type::{ContentTypeField, CONTENT_TYPES};
pub use contents::ContentsField;
pub use currency::{CurrencyField, CURRENCY_CODES};
pub use numeric::NumericField;
pub use search_string::SearchStringField;
pub use status::StatusField;
pub use text::{PassthroughField, TextField};

/// UI descriptor handed to the presentational layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(
    tag = "component",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum FieldView {
    TextField {
        name: String,
        label: String,
        description: Option<String>,
        supports_data_element: bool,
    },
    ComboBox {
        name: String,
        label: String,
        description: Option<String>,
        items: Vec<String>,
        allows_custom_value: bool,
    },
    RawJsonEditor {
        label: String,
        description: Option<String>,
        radio_label: String,
        type_variable: String,
        raw_variable: String,
        json_variable: String,
        columns: Vec<String>,
    },
    KeyValueEditor {
        name: String,
        label: String,
        columns: Vec<String>,
    },
}

impl FieldView {
    pub fn text(name: &str, label: &str, description: Option<&str>) -> Self {
        FieldView::TextField {
            name: name.to_string(),
            label: label.to_string(),
            description: description.map(str::to_string),
            supports_data_element: true,
        }
    }

    pub fn combo_box(name: &str, label: &str, description: Option<&str>, items: &[&str]) -> Self {
        FieldView::ComboBox {
            name: name.to_string(),
            label: label.to_string(),
            description: description.map(str::to_string),
            items: items.iter().map(|item| item.to_string()).collect(),
            allows_custom_value: true,
        }
    }

    /// Name of the form value or editor the descriptor is bound to.
    pub fn name(&self) -> &str {
        match self {
            FieldView::TextField { name, .. }
            | FieldView::ComboBox { name, .. }
            | FieldView::KeyValueEditor { name, .. } => name,
            FieldView::RawJsonEditor { raw_variable, .. } => raw_variable,
        }
    }
}

/// Manifest entry of one event parameter.
pub trait FieldManifest {
    /// Settings key owned by this entry.
    fn key(&self) -> &str;

    fn label(&self) -> &str;

    fn description(&self) -> Option<&str> {
        None
    }

    /// Seeds the form from saved settings. Defaults to copying the setting
    /// when it is meaningful, an empty string otherwise.
    fn initial_values(&self, settings: &Settings, form: &mut FormState) {
        let value = settings
            .get(self.key())
            .filter(|value| is_meaningful(value))
            .cloned()
            .unwrap_or_else(|| Value::String(String::new()));
        form.set_value(self.key(), value);
    }

    /// Writes this entry's settings. Defaults to copying the form value when
    /// it is meaningful.
    fn settings(&self, form: &FormState, out: &mut Settings) {
        let value = form.value(self.key());
        if is_meaningful(value) {
            out.insert(self.key(), value.clone());
        }
    }

    fn validate(&self, _form: &FormState) -> ErrorTree {
        ErrorTree::new()
    }

    fn render(&self) -> FieldView {
        FieldView::text(self.key(), self.label(), self.description())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Value,
    Currency,
    ContentName,
    ContentCategory,
    ContentType,
    ContentIds,
    Contents,
    NumItems,
    PredictedLtv,
    Status,
    SearchString,
    EventId,
}

impl Field {
    pub const ALL: [Field; 12] = [
        Field::Value,
        Field::Currency,
        Field::ContentName,
        Field::ContentCategory,
        Field::ContentType,
        Field::ContentIds,
        Field::Contents,
        Field::NumItems,
        Field::PredictedLtv,
        Field::Status,
        Field::SearchString,
        Field::EventId,
    ];

    pub fn manifest(self) -> &'static dyn FieldManifest {
        match self {
            Field::Value => &numeric::VALUE,
            Field::Currency => &CurrencyField,
            Field::ContentName => &text::CONTENT_NAME,
            Field::ContentCategory => &text::CONTENT_CATEGORY,
            Field::ContentType => &ContentTypeField,
            Field::ContentIds => &ContentIdsField,
            Field::Contents => &ContentsField,
            Field::NumItems => &numeric::NUM_ITEMS,
            Field::PredictedLtv => &numeric::PREDICTED_LTV,
            Field::Status => &StatusField,
            Field::SearchString => &SearchStringField,
            Field::EventId => &text::EVENT_ID,
        }
    }

    pub fn key(self) -> &'static str {
        self.manifest().key()
    }

    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.key() == key)
    }
}
