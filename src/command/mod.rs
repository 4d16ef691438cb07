mod commands;
mod history;

use thiserror::Error;

pub use commands::{AlignEdge, ArrangeDirection, Command};
pub use history::{CommandHistory, HistoryEntry, HISTORY_CAPACITY};

/// Result type for command operations
pub type CommandResult<T = ()> = Result<T, CommandError>;

/// Reasons an edit was refused. None of these are fatal: the public
/// operations log them and leave the document untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("nothing to redo")]
    NothingToRedo,
    #[error("a text edit is in progress")]
    TextEditInProgress,
    #[error("no objects are selected")]
    NoSelection,
    #[error("no gesture is in progress")]
    NoActiveGesture,
    #[error("selection bounds have no area")]
    DegenerateBounds,
    #[error("no text edit is in progress")]
    NoTextEdit,
    #[error("the selection tool is not active")]
    SelectionToolInactive,
    #[error("there are no objects to clear")]
    NothingToClear,
}
