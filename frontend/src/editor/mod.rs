//! Editing state for the array-valued parameters and the messages that
//! mutate a form.

mod dual_mode;
mod key_value;
mod messages;
mod rows;
mod update;

pub use dual_mode::{DualModeState, EditorMode, EditorRow};
pub use key_value::KeyValueRows;
pub use messages::{FormMsg, RowEditor};
pub use rows::{ContentIdRow, ContentRow};
pub use update::update;
