use egui::{Pos2, Rect};

use super::PendingTextEdit;
use crate::element::{DrawableObject, ObjectKind};
use crate::geometry::Anchor;
use crate::style::StyleDefaults;

/// Which toolbar commands are currently available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandFlags {
    pub undo: bool,
    pub redo: bool,
    pub select_all: bool,
    /// Arrange, align, flip, rotate, duplicate and delete.
    pub edit_object: bool,
    pub clear: bool,
}

/// Everything a view needs to draw the editor, taken after an operation.
#[derive(Debug, Clone, PartialEq)]
pub struct StateSnapshot {
    pub objects: Vec<DrawableObject>,
    pub selection_bounds: Option<Rect>,
    pub anchors: Vec<(Anchor, Pos2)>,
    pub marquee: Option<Rect>,
    pub pending_text_edit: Option<PendingTextEdit>,
    pub current_tool: ObjectKind,
    pub style: StyleDefaults,
    pub flags: CommandFlags,
}

impl StateSnapshot {
    /// True while the selection tool has something selected.
    pub fn is_selecting(&self) -> bool {
        self.current_tool == ObjectKind::Select && self.selection_bounds.is_some()
    }

    pub fn selected_count(&self) -> usize {
        self.objects.iter().filter(|o| o.is_selected()).count()
    }
}
