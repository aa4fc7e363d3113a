//! Configuration screens, one per extension view.
//!
//! Action screens are assembled from field manifests; the custom event and
//! extension configuration screens have their own rules.

mod actions;
mod configuration;
mod custom_event;

pub use actions::ActionView;
pub use configuration::ConfigurationView;
pub use custom_event::CustomEventView;

use crate::form::View;

pub const CONFIGURATION: &str = "configuration";
pub const CUSTOM_EVENT: &str = "sendCustomEvent";

/// Resolves a screen by the name the host registers it under.
pub fn view_for(name: &str) -> Option<Box<dyn View>> {
    match name {
        CONFIGURATION => Some(Box::new(ConfigurationView)),
        CUSTOM_EVENT => Some(Box::new(CustomEventView)),
        other => ActionView::from_name(other).map(ActionView::into_view),
    }
}
