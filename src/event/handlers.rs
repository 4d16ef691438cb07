use std::cell::RefCell;
use std::rc::Rc;

use crate::event::{EditorEvent, EventHandler};

/// Logs every event at debug level.
#[derive(Debug, Default)]
pub struct LoggingEventHandler;

impl EventHandler for LoggingEventHandler {
    fn handle_event(&mut self, event: &EditorEvent) {
        match event {
            EditorEvent::StateChanged(snapshot) => log::trace!(
                "State changed: {} objects ({} selected), tool {:?}",
                snapshot.objects.len(),
                snapshot.selected_count(),
                snapshot.current_tool
            ),
            EditorEvent::ToolChanged { old, new } => log::debug!("Tool changed {old:?} -> {new:?}"),
            EditorEvent::HistoryChanged { can_undo, can_redo } => {
                log::debug!("History changed: undo {can_undo}, redo {can_redo}")
            }
            other => log::debug!("{}", other.name()),
        }
    }
}

/// Keeps every event it receives. Clones share the same log, so one copy
/// can be subscribed while another is inspected.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    events: Rc<RefCell<Vec<EditorEvent>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<EditorEvent> {
        self.events.borrow().clone()
    }

    /// Remove and return everything recorded so far.
    pub fn take(&self) -> Vec<EditorEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl EventHandler for EventRecorder {
    fn handle_event(&mut self, event: &EditorEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
