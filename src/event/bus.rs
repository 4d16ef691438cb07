use std::cell::RefCell;
use crate::event::{EditorEvent, EventHandler};

/// A simple event bus for broadcasting editor events to registered handlers
pub struct EventBus {
    handlers: RefCell<Vec<Box<dyn EventHandler>>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &format!("<{} handlers>", self.handlers.borrow().len()))
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Creates a new event bus
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
        }
    }

    /// Subscribe a handler to receive events. Handlers must not subscribe
    /// further handlers from inside `handle_event`.
    pub fn subscribe(&self, handler: impl EventHandler + 'static) {
        self.handlers.borrow_mut().push(Box::new(handler));
    }

    pub fn has_subscribers(&self) -> bool {
        !self.handlers.borrow().is_empty()
    }

    /// Emit an event to all registered handlers
    pub fn emit(&self, event: EditorEvent) {
        log::trace!("Emitting {}", event.name());
        for handler in &mut *self.handlers.borrow_mut() {
            handler.handle_event(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_closures_receive_events() {
        let bus = EventBus::new();
        assert!(!bus.has_subscribers());

        let count = Rc::new(Cell::new(0));
        let seen = count.clone();
        bus.subscribe(move |event: &EditorEvent| {
            if matches!(event, EditorEvent::TextEditCommitted) {
                seen.set(seen.get() + 1);
            }
        });
        assert!(bus.has_subscribers());

        bus.emit(EditorEvent::TextEditCommitted);
        bus.emit(EditorEvent::HistoryChanged { can_undo: true, can_redo: false });
        assert_eq!(count.get(), 1);
    }
}
