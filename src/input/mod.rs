use egui::{Context, Key, Modifiers, PointerButton, Pos2, Rect};

mod router;
pub use router::route_event;

/// Keyboard commands understood by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shortcut {
    Undo,
    Redo,
    SelectAll,
    Duplicate,
    Delete,
    /// Finish the text being typed in the input overlay.
    CommitText,
}

impl Shortcut {
    /// Map a key press to a shortcut. While a text field has focus only
    /// [`Shortcut::CommitText`] is recognised so typing is never hijacked.
    pub fn from_key(key: Key, modifiers: Modifiers, typing: bool) -> Option<Self> {
        if modifiers.command && key == Key::Enter {
            return Some(Shortcut::CommitText);
        }
        if typing {
            return None;
        }
        match key {
            Key::Z if modifiers.command && modifiers.shift => Some(Shortcut::Redo),
            Key::Z if modifiers.command => Some(Shortcut::Undo),
            Key::Y if modifiers.command => Some(Shortcut::Redo),
            Key::A if modifiers.command => Some(Shortcut::SelectAll),
            Key::D if modifiers.command => Some(Shortcut::Duplicate),
            Key::Delete | Key::Backspace if !modifiers.command => Some(Shortcut::Delete),
            _ => None,
        }
    }
}

/// Input the document model consumes, in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDown {
        location: Pos2,
    },
    /// The pointer moved with the primary button held since `start`.
    PointerDragged {
        start: Pos2,
        location: Pos2,
    },
    PointerUp {
        start: Pos2,
        location: Pos2,
    },
    Shortcut(Shortcut),
}

/// Handles converting raw egui input into our domain-specific InputEvents
#[derive(Debug, Default)]
pub struct InputHandler {
    last_pointer_pos: Option<Pos2>,
    /// Where the primary button went down, while it is held.
    press_origin: Option<Pos2>,
    canvas_rect: Option<Rect>,
    /// Areas on top of the canvas, such as the text input overlay, that
    /// must not start gestures.
    blocked_rects: Vec<Rect>,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = Some(rect);
    }

    pub fn block_rect(&mut self, rect: Rect) {
        self.blocked_rects.push(rect);
    }

    pub fn clear_blocked_rects(&mut self) {
        self.blocked_rects.clear();
    }

    pub fn is_pressed(&self) -> bool {
        self.press_origin.is_some()
    }

    fn accepts_press(&self, pos: Pos2) -> bool {
        let in_canvas = self.canvas_rect.is_none_or(|rect| rect.contains(pos));
        in_canvas && !self.blocked_rects.iter().any(|rect| rect.contains(pos))
    }

    /// Process raw egui input and generate our InputEvents
    pub fn process_input(&mut self, ctx: &Context) -> Vec<InputEvent> {
        let mut events = Vec::new();
        let typing = ctx.wants_keyboard_input();

        ctx.input(|input| {
            let pos = input.pointer.latest_pos().or(self.last_pointer_pos);

            if input.pointer.button_pressed(PointerButton::Primary) {
                if let Some(pos) = pos.filter(|p| self.accepts_press(*p)) {
                    self.press_origin = Some(pos);
                    events.push(InputEvent::PointerDown { location: pos });
                }
            }

            if let (Some(start), Some(pos)) = (self.press_origin, pos) {
                let moved = Some(pos) != self.last_pointer_pos;
                if moved && input.pointer.button_down(PointerButton::Primary) {
                    events.push(InputEvent::PointerDragged { start, location: pos });
                }
                if input.pointer.button_released(PointerButton::Primary) {
                    events.push(InputEvent::PointerUp { start, location: pos });
                    self.press_origin = None;
                }
            }
            self.last_pointer_pos = pos;

            for event in &input.raw.events {
                if let egui::Event::Key {
                    key,
                    pressed: true,
                    repeat: false,
                    modifiers,
                    ..
                } = event
                {
                    if let Some(shortcut) = Shortcut::from_key(*key, *modifiers, typing) {
                        events.push(InputEvent::Shortcut(shortcut));
                    }
                }
            }
        });

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortcut_mapping() {
        let cmd = Modifiers::COMMAND;
        let cmd_shift = Modifiers::COMMAND | Modifiers::SHIFT;
        assert_eq!(Shortcut::from_key(Key::Z, cmd, false), Some(Shortcut::Undo));
        assert_eq!(Shortcut::from_key(Key::Z, cmd_shift, false), Some(Shortcut::Redo));
        assert_eq!(Shortcut::from_key(Key::A, cmd, false), Some(Shortcut::SelectAll));
        assert_eq!(Shortcut::from_key(Key::Backspace, Modifiers::NONE, false), Some(Shortcut::Delete));
        assert_eq!(Shortcut::from_key(Key::Z, Modifiers::NONE, false), None);
    }

    #[test]
    fn test_typing_only_allows_commit() {
        assert_eq!(Shortcut::from_key(Key::Z, Modifiers::COMMAND, true), None);
        assert_eq!(Shortcut::from_key(Key::Backspace, Modifiers::NONE, true), None);
        assert_eq!(
            Shortcut::from_key(Key::Enter, Modifiers::COMMAND, true),
            Some(Shortcut::CommitText)
        );
    }

    #[test]
    fn test_blocked_rects_reject_presses() {
        let mut handler = InputHandler::new();
        handler.set_canvas_rect(Rect::from_min_max(Pos2::ZERO, egui::pos2(100.0, 100.0)));
        handler.block_rect(Rect::from_min_max(Pos2::ZERO, egui::pos2(10.0, 10.0)));
        assert!(!handler.accepts_press(egui::pos2(5.0, 5.0)));
        assert!(handler.accepts_press(egui::pos2(50.0, 50.0)));
        assert!(!handler.accepts_press(egui::pos2(150.0, 50.0)));
    }
}
