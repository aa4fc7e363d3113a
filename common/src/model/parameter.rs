use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::values::js_string;

/// One `{key, value}` pair of a custom event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub key: String,
    pub value: String,
}

impl Parameter {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.key.is_empty() && !self.value.is_empty()
    }

    pub fn is_blank(&self) -> bool {
        self.key.is_empty() && self.value.is_empty()
    }

    /// Reads one element of a saved `parameters` array. Missing members and
    /// non-object elements read as empty strings.
    pub fn from_value(value: &Value) -> Self {
        let member = |name: &str| match value.get(name) {
            None | Some(Value::Null) => String::new(),
            Some(other) => js_string(other),
        };
        Self {
            key: member("key"),
            value: member("value"),
        }
    }
}
