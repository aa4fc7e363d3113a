use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SettingsError;

/// Flat, insertion-ordered mapping from a snake_case parameter name to its
/// value, as persisted by the host for one action.
///
/// Keys are only written when they hold a meaningful value; the insertion
/// order is kept, so it is also the order in which parameters are logged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings(Map<String, Value>);

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepts any JSON value coming from the host. `null` reads as empty
    /// settings; anything but an object is rejected.
    pub fn from_value(value: Value) -> Result<Self, SettingsError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::new()),
            Value::Bool(_) => Err(SettingsError::NotAnObject("a boolean")),
            Value::Number(_) => Err(SettingsError::NotAnObject("a number")),
            Value::String(_) => Err(SettingsError::NotAnObject("a string")),
            Value::Array(_) => Err(SettingsError::NotAnObject("an array")),
        }
    }

    pub fn from_json(text: &str) -> Result<Self, SettingsError> {
        Self::from_value(serde_json::from_str(text)?)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Removes a key, keeping the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    /// Copies every entry of `other` into `self`; entries of `other` win.
    pub fn extend(&mut self, other: Settings) {
        self.0.extend(other.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl From<Map<String, Value>> for Settings {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for Settings {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_insertion_order() {
        let mut settings = Settings::new();
        settings.insert("value", json!(5));
        settings.insert("currency", json!("USD"));
        settings.insert("event_id", json!("A"));
        settings.remove("event_id");

        assert_eq!(
            serde_json::to_string(&settings).unwrap(),
            r#"{"value":5,"currency":"USD"}"#
        );
    }

    #[test]
    fn rejects_non_objects() {
        assert!(Settings::from_value(json!([1, 2])).is_err());
        assert!(Settings::from_value(Value::Null).unwrap().is_empty());
        assert!(matches!(
            Settings::from_json("{"),
            Err(SettingsError::Json(_))
        ));
    }
}
