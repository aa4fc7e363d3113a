use common::SettingsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("could not load {url}")]
    ScriptLoad { url: String },

    #[error("JavaScript error: {0}")]
    Js(String),

    #[error("a custom event needs a name")]
    MissingEventName,

    #[error("unknown event {0:?}")]
    UnknownEvent(String),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

impl From<wasm_bindgen::JsValue> for RuntimeError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        RuntimeError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<RuntimeError> for wasm_bindgen::JsValue {
    fn from(err: RuntimeError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
