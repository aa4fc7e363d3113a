use serde::{Deserialize, Serialize};

/// Extension-wide settings saved from the configuration screen and returned
/// by the host's `getExtensionSettings()`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtensionSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pixel_id: Option<String>,
    /// Deprecated default event id. Actions carry their own `event_id` now;
    /// this one is only used when an action does not.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
}

impl ExtensionSettings {
    /// The default event id, ignoring an empty string.
    pub fn default_event_id(&self) -> Option<&str> {
        self.event_id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn pixel_id(&self) -> Option<&str> {
        self.pixel_id.as_deref().filter(|id| !id.is_empty())
    }
}
