use common::values::{is_data_element_token, is_meaningful, is_truthy, number_value, to_number};
use common::{ErrorTree, FieldPath, Settings};
use serde_json::Value;

use super::FieldManifest;
use crate::form::FormState;

/// A parameter saved as a number unless it holds a data element token.
pub struct NumericField {
    pub key: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    /// `num_items` keeps an explicit `0`; monetary values treat it as unset.
    pub keeps_zero: bool,
    pub message: &'static str,
}

pub static VALUE: NumericField = NumericField {
    key: "value",
    label: "Value",
    description: "The value of a user performing this event to the business.",
    keeps_zero: false,
    message: "The value must be a number or a data element.",
};

pub static PREDICTED_LTV: NumericField = NumericField {
    key: "predicted_ltv",
    label: "Predicted lifetime value",
    description: "Predicted lifetime value of a subscriber as defined by the advertiser.",
    keeps_zero: false,
    message: "The value must be a number or a data element.",
};

pub static NUM_ITEMS: NumericField = NumericField {
    key: "num_items",
    label: "Number of items",
    description: "The number of items when checkout was initiated.",
    keeps_zero: true,
    message: "The number of items must be a number or a data element.",
};

impl NumericField {
    fn is_set(&self, value: &Value) -> bool {
        if self.keeps_zero {
            is_meaningful(value)
        } else {
            is_truthy(value)
        }
    }
}

impl FieldManifest for NumericField {
    fn key(&self) -> &str {
        self.key
    }

    fn label(&self) -> &str {
        self.label
    }

    fn description(&self) -> Option<&str> {
        Some(self.description)
    }

    fn settings(&self, form: &FormState, out: &mut Settings) {
        let value = form.value(self.key);
        if !self.is_set(value) {
            return;
        }

        // Text that is not a number, or not a finite one, is saved as typed;
        // validation reports the former.
        let saved = if is_data_element_token(value) {
            value.clone()
        } else {
            to_number(value)
                .and_then(number_value)
                .unwrap_or_else(|| value.clone())
        };
        out.insert(self.key, saved);
    }

    fn validate(&self, form: &FormState) -> ErrorTree {
        let value = form.value(self.key);
        if is_data_element_token(value) || !self.is_set(value) {
            return ErrorTree::new();
        }

        match to_number(value) {
            Some(_) => ErrorTree::new(),
            None => ErrorTree::single(FieldPath::field(self.key), self.message),
        }
    }
}
