//! Tolerant JSON parsing for free-text editor fields.

use serde_json::Value;

/// Outcome of [`parse_json`]. `result` is `false` when the text is not valid
/// JSON; `parsed_json` is then `Value::Null`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedJson {
    pub result: bool,
    pub parsed_json: Value,
}

impl ParsedJson {
    /// The parsed array, if the text was valid JSON holding an array.
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        if self.result {
            self.parsed_json.as_array()
        } else {
            None
        }
    }

    /// `Some` only for a parsed array with at least one element.
    pub fn non_empty_array(&self) -> Option<&Vec<Value>> {
        self.as_array().filter(|items| !items.is_empty())
    }
}

/// Parses `text` without ever failing. The caller decides whether the parsed
/// value has the expected shape.
pub fn parse_json(text: &str) -> ParsedJson {
    match serde_json::from_str::<Value>(text) {
        Ok(parsed_json) => ParsedJson {
            result: true,
            parsed_json,
        },
        Err(_) => ParsedJson {
            result: false,
            parsed_json: Value::Null,
        },
    }
}
