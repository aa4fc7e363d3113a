use common::values::{is_data_element_token, is_truthy};
use common::{ErrorTree, FieldPath};

use super::{FieldManifest, FieldView};
use crate::form::FormState;

const KEY: &str = "content_type";

pub const CONTENT_TYPES: &[&str] = &["product", "product_group"];

pub struct ContentTypeField;

impl FieldManifest for ContentTypeField {
    fn key(&self) -> &str {
        KEY
    }

    fn label(&self) -> &str {
        "Content Type"
    }

    fn description(&self) -> Option<&str> {
        Some("Accepted values are product, product_group or a data element.")
    }

    fn validate(&self, form: &FormState) -> ErrorTree {
        let value = form.value(KEY);
        if is_data_element_token(value) {
            return ErrorTree::new();
        }

        let accepted = value.as_str().is_some_and(|kind| CONTENT_TYPES.contains(&kind));
        if !is_truthy(value) || accepted {
            return ErrorTree::new();
        }
        ErrorTree::single(
            FieldPath::field(KEY),
            r#"The accepted values are "product", "product_group" or a data element."#,
        )
    }

    fn render(&self) -> FieldView {
        FieldView::combo_box(KEY, self.label(), self.description(), CONTENT_TYPES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_types_and_tokens() {
        for accepted in ["product", "product_group", "%type%", ""] {
            let form = FormState::new().with_value(KEY, accepted);
            assert!(ContentTypeField.validate(&form).is_empty(), "{accepted}");
        }

        let form = FormState::new().with_value(KEY, "article");
        assert_eq!(
            ContentTypeField.validate(&form).field(KEY),
            Some(r#"The accepted values are "product", "product_group" or a data element."#)
        );
    }
}
