mod editor_state;
mod gesture;
mod snapshot;
mod text_edit;
mod transform;

pub use editor_state::{EditorState, StyleProperty};
pub use gesture::Gesture;
pub use snapshot::{CommandFlags, StateSnapshot};
pub use text_edit::PendingTextEdit;
