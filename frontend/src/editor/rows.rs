use common::values::{cast_to_number_if_string, is_data_element_token, is_truthy};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::dual_mode::EditorRow;

fn empty_cell() -> Value {
    Value::String(String::new())
}

/// Row of the content IDs editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentIdRow {
    pub id: Value,
}

impl ContentIdRow {
    pub fn new(id: impl Into<Value>) -> Self {
        Self { id: id.into() }
    }
}

impl Default for ContentIdRow {
    fn default() -> Self {
        Self { id: empty_cell() }
    }
}

impl EditorRow for ContentIdRow {
    const COLUMNS: &'static [&'static str] = &["id"];

    fn from_element(element: &Value) -> Self {
        Self {
            id: element.clone(),
        }
    }

    fn has_primary_key(&self) -> bool {
        is_truthy(&self.id)
    }

    fn is_blank(&self) -> bool {
        !is_truthy(&self.id)
    }

    fn to_raw_element(&self) -> Option<Value> {
        self.has_primary_key().then(|| self.id.clone())
    }

    fn cell(&self, column: &str) -> Option<&Value> {
        (column == "id").then_some(&self.id)
    }

    fn set_cell(&mut self, column: &str, value: Value) -> bool {
        if column != "id" {
            return false;
        }
        self.id = value;
        true
    }
}

/// Row of the contents editor: an `{id, quantity}` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRow {
    pub id: Value,
    pub quantity: Value,
}

impl ContentRow {
    pub fn new(id: impl Into<Value>, quantity: impl Into<Value>) -> Self {
        Self {
            id: id.into(),
            quantity: quantity.into(),
        }
    }

    /// The quantity as it is saved: numeric text becomes a number, tokens stay.
    pub fn saved_quantity(&self) -> Value {
        if is_data_element_token(&self.quantity) {
            self.quantity.clone()
        } else {
            cast_to_number_if_string(&self.quantity)
        }
    }
}

impl Default for ContentRow {
    fn default() -> Self {
        Self {
            id: empty_cell(),
            quantity: empty_cell(),
        }
    }
}

impl EditorRow for ContentRow {
    const COLUMNS: &'static [&'static str] = &["id", "quantity"];

    fn from_element(element: &Value) -> Self {
        let member = |name: &str| element.get(name).cloned().unwrap_or_else(empty_cell);
        Self {
            id: member("id"),
            quantity: member("quantity"),
        }
    }

    fn has_primary_key(&self) -> bool {
        is_truthy(&self.id)
    }

    fn is_blank(&self) -> bool {
        !is_truthy(&self.id) && !is_truthy(&self.quantity)
    }

    fn to_raw_element(&self) -> Option<Value> {
        let mut object = Map::new();
        object.insert("id".to_string(), self.id.clone());
        object.insert("quantity".to_string(), self.saved_quantity());
        Some(Value::Object(object))
    }

    fn cell(&self, column: &str) -> Option<&Value> {
        match column {
            "id" => Some(&self.id),
            "quantity" => Some(&self.quantity),
            _ => None,
        }
    }

    fn set_cell(&mut self, column: &str, value: Value) -> bool {
        match column {
            "id" => self.id = value,
            "quantity" => self.quantity = value,
            _ => return false,
        }
        true
    }
}
