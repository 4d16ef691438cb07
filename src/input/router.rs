use crate::state::EditorState;

use super::{InputEvent, Shortcut};

/// Apply one input event to the document model.
pub fn route_event(event: &InputEvent, state: &mut EditorState) {
    match *event {
        InputEvent::PointerDown { location } => state.pointer_down(location),
        InputEvent::PointerDragged { start, location } => state.pointer_dragged(start, location),
        InputEvent::PointerUp { start, location } => state.pointer_up(start, location),
        InputEvent::Shortcut(shortcut) => {
            log::debug!("Shortcut {shortcut:?}");
            match shortcut {
                Shortcut::Undo => state.undo(),
                Shortcut::Redo => state.redo(),
                Shortcut::SelectAll => state.select_all(),
                Shortcut::Duplicate => state.duplicate(),
                Shortcut::Delete => state.delete(),
                Shortcut::CommitText => state.commit_text_edit(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ObjectKind;
    use egui::pos2;

    #[test]
    fn test_routes_a_pen_stroke() {
        let mut state = EditorState::default();
        state.set_tool(ObjectKind::Pen);
        let start = pos2(1.0, 1.0);
        for event in [
            InputEvent::PointerDown { location: start },
            InputEvent::PointerDragged { start, location: pos2(2.0, 2.0) },
            InputEvent::PointerUp { start, location: pos2(2.0, 2.0) },
        ] {
            route_event(&event, &mut state);
        }
        assert_eq!(state.objects()[0].points(), &[start, pos2(2.0, 2.0)]);

        route_event(&InputEvent::Shortcut(Shortcut::Undo), &mut state);
        assert!(state.objects().is_empty());
        route_event(&InputEvent::Shortcut(Shortcut::Redo), &mut state);
        assert_eq!(state.objects().len(), 1);
    }
}
