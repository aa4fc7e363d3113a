//! Configuration screens of the Meta Pixel extension.
//!
//! The tag manager hosts one view per screen: the extension configuration,
//! the custom event action and one action per standard pixel event. Each view
//! turns previously saved settings into form state, keeps it in sync with the
//! user's edits and turns it back into settings, validating along the way.
//!
//! - [`fields`]: per-parameter manifest entries
//! - [`editor`]: raw/JSON dual-mode and key/value row editors, form messages
//! - [`form`]: form state and the assemblers composing manifests into views
//! - [`views`]: the concrete screens
//! - [`bridge`]: the init / getSettings / validate lifecycle and its wasm export

pub mod bridge;
pub mod editor;
pub mod fields;
pub mod form;
pub mod views;

pub use bridge::ExtensionBridge;
pub use form::{FormState, View};
