use crate::element::ObjectKind;
use crate::state::StateSnapshot;

#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// Emitted once after every operation on the document model.
    StateChanged(StateSnapshot),
    ToolChanged {
        old: ObjectKind,
        new: ObjectKind,
    },
    HistoryChanged {
        can_undo: bool,
        can_redo: bool,
    },
    /// A text object was loaded into the input overlay. `existing` is false
    /// for a fresh draft.
    TextEditStarted {
        existing: bool,
    },
    TextEditCommitted,
}

impl EditorEvent {
    pub fn name(&self) -> &'static str {
        match self {
            EditorEvent::StateChanged(_) => "state_changed",
            EditorEvent::ToolChanged { .. } => "tool_changed",
            EditorEvent::HistoryChanged { .. } => "history_changed",
            EditorEvent::TextEditStarted { .. } => "text_edit_started",
            EditorEvent::TextEditCommitted => "text_edit_committed",
        }
    }
}
