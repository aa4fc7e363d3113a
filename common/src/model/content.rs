use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::values::{cast_to_number_if_string, is_data_element_token, js_string};

/// One element of the `contents` parameter as sent to the pixel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Value>,
}

impl ContentItem {
    /// Normalizes a raw `{id, quantity}` pair: the id becomes a string and the
    /// quantity a number unless it is a data element token.
    pub fn normalize(id: &Value, quantity: &Value) -> Self {
        let id = match id {
            Value::Null => String::new(),
            other => js_string(other),
        };
        let quantity = match quantity {
            Value::Null => None,
            q if is_data_element_token(q) => Some(q.clone()),
            q => Some(cast_to_number_if_string(q)),
        };
        Self { id, quantity }
    }

    /// Same as [`ContentItem::normalize`] for an array element, which may lack
    /// either member.
    pub fn from_element(element: &Value) -> Self {
        Self::normalize(
            element.get("id").unwrap_or(&Value::Null),
            element.get("quantity").unwrap_or(&Value::Null),
        )
    }

    pub fn to_value(&self) -> Value {
        let mut object = Map::new();
        object.insert("id".to_string(), Value::String(self.id.clone()));
        if let Some(quantity) = &self.quantity {
            object.insert("quantity".to_string(), quantity.clone());
        }
        Value::Object(object)
    }
}
