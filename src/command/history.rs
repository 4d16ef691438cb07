use std::collections::VecDeque;

use super::{Command, CommandError, CommandResult};
use crate::element::DrawableObject;

/// Undo steps kept before the oldest is dropped.
pub const HISTORY_CAPACITY: usize = 15;

/// An edit together with the object list as it was before the edit.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub command: Command,
    pub objects: Vec<DrawableObject>,
}

impl HistoryEntry {
    fn new(command: Command, mut objects: Vec<DrawableObject>) -> Self {
        for object in &mut objects {
            object.is_selected = false;
            object.is_hidden = false;
        }
        Self { command, objects }
    }
}

/// Snapshot based undo/redo stacks.
///
/// Each entry holds a full copy of the object list. Undoing swaps the
/// stored list in and moves the current one onto the redo stack; redoing
/// is the mirror image.
#[derive(Debug, Clone)]
pub struct CommandHistory {
    /// Stack of snapshots that can be restored by undo, oldest first
    undo_stack: VecDeque<HistoryEntry>,
    /// Stack of snapshots that can be restored by redo
    redo_stack: Vec<HistoryEntry>,
    capacity: usize,
}

impl Default for CommandHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandHistory {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            undo_stack: VecDeque::with_capacity(capacity),
            redo_stack: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Record `objects` as the state before `command`. Clears the redo
    /// stack and evicts the oldest entry once over capacity.
    pub fn push(&mut self, command: Command, objects: &[DrawableObject]) {
        self.undo_stack
            .push_back(HistoryEntry::new(command, objects.to_vec()));
        while self.undo_stack.len() > self.capacity {
            if let Some(evicted) = self.undo_stack.pop_front() {
                log::debug!("History full, dropping '{}'", evicted.command.name());
            }
        }
        self.redo_stack.clear();
        log::debug!("Pushed '{}' ({} undo steps)", command.name(), self.undo_stack.len());
    }

    /// Step back. `current` is kept for redo; the returned list replaces it.
    pub fn undo(&mut self, current: &[DrawableObject]) -> CommandResult<Vec<DrawableObject>> {
        let entry = self.undo_stack.pop_back().ok_or(CommandError::NothingToUndo)?;
        log::debug!("Undo '{}'", entry.command.name());
        self.redo_stack
            .push(HistoryEntry::new(entry.command, current.to_vec()));
        Ok(entry.objects)
    }

    /// Step forward again after an undo.
    pub fn redo(&mut self, current: &[DrawableObject]) -> CommandResult<Vec<DrawableObject>> {
        let entry = self.redo_stack.pop().ok_or(CommandError::NothingToRedo)?;
        log::debug!("Redo '{}'", entry.command.name());
        self.undo_stack
            .push_back(HistoryEntry::new(entry.command, current.to_vec()));
        Ok(entry.objects)
    }

    /// Drop the newest entry without making it redoable. Used when an edit
    /// turned out to be a no-op.
    pub fn rollback(&mut self) -> Option<HistoryEntry> {
        let entry = self.undo_stack.pop_back();
        if let Some(entry) = &entry {
            log::debug!("Rolled back '{}'", entry.command.name());
        }
        entry
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Number of undo steps currently held.
    pub fn len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.undo_stack.is_empty()
    }

    /// Undo entries, oldest first.
    pub fn undo_stack(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.undo_stack.iter()
    }

    /// Redo entries, the next one to redo last.
    pub fn redo_stack(&self) -> &[HistoryEntry] {
        &self.redo_stack
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
