use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Settings must be a JSON object, got {0}")]
    NotAnObject(&'static str),
    #[error("Malformed settings JSON: {0}")]
    Json(#[from] serde_json::Error),
}
