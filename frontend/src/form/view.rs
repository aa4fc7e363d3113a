use common::{ErrorTree, Settings};
use serde::Serialize;

use super::FormState;
use crate::fields::FieldView;

pub const LEARN_MORE_URL: &str =
    "https://developers.facebook.com/docs/meta-pixel/reference#standard-events";

/// What a screen renders: its fields in order and an optional documentation
/// link shown next to the first one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormLayout {
    pub fields: Vec<FieldView>,
    pub learn_more: Option<String>,
}

/// One configuration screen.
pub trait View {
    fn initial_values(&self, settings: &Settings) -> FormState;

    fn settings(&self, form: &FormState) -> Settings;

    fn validate(&self, form: &FormState) -> ErrorTree;

    fn layout(&self) -> FormLayout;
}
