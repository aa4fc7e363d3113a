//! Composition of field manifests into whole configuration screens.

mod builder;
mod state;
mod view;

pub use builder::{FormBuilder, SimpleFormBuilder};
pub use state::FormState;
pub use view::{FormLayout, View, LEARN_MORE_URL};
