//! Row editor for the `{key, value}` parameters of a custom event.

use common::Parameter;
use serde_json::Value;

/// Parameter rows. The editor always shows at least one row, so an empty
/// list is never observable from the outside.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyValueRows {
    rows: Vec<Parameter>,
}

impl Default for KeyValueRows {
    fn default() -> Self {
        Self {
            rows: vec![Parameter::default()],
        }
    }
}

impl KeyValueRows {
    /// Rows from a saved `parameters` array; one empty row when there are none.
    pub fn from_setting(value: Option<&Value>) -> Self {
        let rows: Vec<Parameter> = value
            .and_then(Value::as_array)
            .map(|items| items.iter().map(Parameter::from_value).collect())
            .unwrap_or_default();
        Self::from_rows(rows)
    }

    pub fn from_rows(rows: Vec<Parameter>) -> Self {
        if rows.is_empty() {
            Self::default()
        } else {
            Self { rows }
        }
    }

    pub fn rows(&self) -> &[Parameter] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Parameter::is_blank)
    }

    pub fn add_row(&mut self) {
        self.rows.push(Parameter::default());
    }

    pub fn remove_row(&mut self, index: usize) -> bool {
        if index >= self.rows.len() {
            return false;
        }
        self.rows.remove(index);
        if self.rows.is_empty() {
            self.rows.push(Parameter::default());
        }
        true
    }

    /// A delete button is offered unless the only row left is empty.
    pub fn can_delete(&self, index: usize) -> bool {
        index < self.rows.len() && !(self.rows.len() == 1 && self.rows[0].is_blank())
    }

    pub fn set_cell(&mut self, index: usize, column: &str, value: String) -> bool {
        let Some(row) = self.rows.get_mut(index) else {
            return false;
        };
        match column {
            "key" => row.key = value,
            "value" => row.value = value,
            _ => return false,
        }
        true
    }

    /// Rows with both a key and a value, in editor order.
    pub fn complete_rows(&self) -> Vec<Parameter> {
        self.rows.iter().filter(|p| p.is_complete()).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn starts_with_one_empty_row() {
        let rows = KeyValueRows::from_setting(None);
        assert_eq!(rows.len(), 1);
        assert!(!rows.can_delete(0));
    }

    #[test]
    fn removing_the_last_row_leaves_an_empty_one() {
        let mut rows = KeyValueRows::from_setting(Some(&json!([{"key": "a", "value": "b"}])));
        assert!(rows.can_delete(0));
        assert!(rows.remove_row(0));
        assert_eq!(rows.rows(), &[Parameter::default()]);
        assert!(!rows.remove_row(3));
    }

    #[test]
    fn keeps_only_complete_rows() {
        let mut rows = KeyValueRows::default();
        rows.set_cell(0, "key", "a".into());
        rows.set_cell(0, "value", "b".into());
        rows.add_row();
        rows.set_cell(1, "value", "c".into());

        assert_eq!(rows.complete_rows(), vec![Parameter::new("a", "b")]);
    }
}
