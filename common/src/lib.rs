//! Shared model and value helpers for the Meta Pixel extension.
//!
//! Used by the configuration views (`pixel-frontend`) to normalize and
//! validate what the user typed, and by the run-time actions
//! (`pixel-runtime`) to read the saved settings back.

pub mod error;
pub mod json;
pub mod model;
pub mod ordinal;
pub mod validation;
pub mod values;

pub use error::SettingsError;
pub use model::{ContentItem, ExtensionSettings, Parameter, Settings};
pub use validation::{ErrorTree, FieldPath, FlatErrors, PathSegment};
