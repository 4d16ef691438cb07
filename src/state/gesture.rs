use egui::{Pos2, Rect, Vec2};

use super::EditorState;
use crate::command::{Command, CommandError, CommandResult};
use crate::element::{factory, DrawableObject, ObjectKind, MIN_SHAPE_LENGTH};
use crate::geometry::{self, Anchor};

/// What the current pointer drag is doing.
///
/// ```text
///          down            drag*            up
/// Idle ──────────► Drawing ─────► Drawing ──────► Idle
///      ├─────────► Moving  ─────► Moving  ──────►
///      ├─────────► Resizing ────► Resizing ─────►
///      ├─────────► Marquee ─────► Marquee ──────►
///      └─────────► PlacingText ─────────────────►
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    /// Extending the object at `index`, a pen stroke or a shape.
    Drawing { index: usize },
    /// Translating the selection. `origin` is the object list at
    /// pointer-down; every drag recomputes from it.
    Moving {
        origin: Vec<DrawableObject>,
        recorded: bool,
    },
    /// Scaling the selection by dragging `anchor` of `bounds`.
    Resizing {
        anchor: Anchor,
        bounds: Rect,
        origin: Vec<DrawableObject>,
        recorded: bool,
    },
    Marquee { start: Pos2, current: Pos2 },
    /// The text tool opened an edit; drags are ignored.
    PlacingText,
}

impl Gesture {
    pub fn is_idle(&self) -> bool {
        matches!(self, Gesture::Idle)
    }

    pub fn marquee(&self) -> Option<Rect> {
        match self {
            Gesture::Marquee { start, current } => Some(Rect::from_two_pos(*start, *current)),
            _ => None,
        }
    }
}

impl EditorState {
    pub fn pointer_down(&mut self, location: Pos2) {
        let result = self.try_pointer_down(location);
        self.finish("pointer down", result);
    }

    pub fn pointer_dragged(&mut self, start: Pos2, location: Pos2) {
        let result = self.try_pointer_dragged(start, location);
        self.finish("pointer drag", result);
    }

    pub fn pointer_up(&mut self, start: Pos2, location: Pos2) {
        let result = self.try_pointer_up(start, location);
        self.finish("pointer up", result);
    }

    pub fn try_pointer_down(&mut self, location: Pos2) -> CommandResult {
        if !self.gesture.is_idle() {
            log::warn!("Pointer down while {}, starting over", self.gesture_name());
            self.abandon_gesture();
        }

        match self.current_tool {
            ObjectKind::Select => self.begin_select(location),
            ObjectKind::Text => return self.begin_text_edit(location),
            ObjectKind::Pen => {
                self.record(Command::Draw(ObjectKind::Pen));
                self.push_new_object(ObjectKind::Pen, vec![location]);
            }
            kind => {
                self.record(Command::Draw(kind));
                self.push_new_object(kind, vec![location, location]);
            }
        }
        log::debug!("Gesture began: {}", self.gesture_name());
        Ok(())
    }

    pub fn try_pointer_dragged(&mut self, start: Pos2, location: Pos2) -> CommandResult {
        match &mut self.gesture {
            Gesture::Idle => Err(CommandError::NoActiveGesture),
            Gesture::PlacingText => Ok(()),
            Gesture::Drawing { index } => {
                let index = *index;
                let object = self
                    .objects
                    .get_mut(index)
                    .ok_or(CommandError::NoActiveGesture)?;
                if object.kind == ObjectKind::Pen {
                    object.points.push(location);
                } else if let Some(end) = object.points.get_mut(1) {
                    *end = location;
                }
                Ok(())
            }
            Gesture::Marquee { current, .. } => {
                *current = location;
                Ok(())
            }
            Gesture::Moving { .. } | Gesture::Resizing { .. } => {
                if location != start {
                    self.record_gesture_origin();
                }
                self.apply_drag(location - start)
            }
        }
    }

    pub fn try_pointer_up(&mut self, start: Pos2, location: Pos2) -> CommandResult {
        let gesture = std::mem::take(&mut self.gesture);
        log::debug!("Gesture ended at {location:?}");
        match gesture {
            Gesture::Idle => Err(CommandError::NoActiveGesture),
            Gesture::PlacingText => Ok(()),
            Gesture::Drawing { index } => {
                let Some(object) = self.objects.get_mut(index) else {
                    return Err(CommandError::NoActiveGesture);
                };
                if object.kind == ObjectKind::Pen {
                    return Ok(());
                }
                if let Some(end) = object.points.get_mut(1) {
                    *end = location;
                }
                self.discard_if_too_short(index);
                Ok(())
            }
            Gesture::Marquee { start: marquee_start, .. } => {
                let rect = Rect::from_two_pos(marquee_start, location);
                for object in &mut self.objects {
                    object.is_selected = object.hit_test_rect(rect);
                }
                log::debug!("Marquee selected {} objects", self.selected_objects().count());
                Ok(())
            }
            Gesture::Moving { origin, recorded } | Gesture::Resizing { origin, recorded, .. }
                if location == start =>
            {
                // Nothing moved: put everything back, including any history
                // entry an intermediate drag recorded.
                if recorded {
                    self.history.rollback();
                }
                self.objects = origin;
                Ok(())
            }
            gesture => {
                self.gesture = gesture;
                self.record_gesture_origin();
                let result = self.apply_drag(location - start);
                self.gesture = Gesture::Idle;
                result
            }
        }
    }

    /// Selection tool pointer-down: resize, move the selection, pick one
    /// object, or start a marquee, in that order.
    fn begin_select(&mut self, location: Pos2) {
        if let Some(bounds) = self.selection_bounds() {
            if let Some(anchor) = geometry::hit_anchor(bounds, location) {
                // A dot or a straight axis-aligned line cannot be scaled.
                self.gesture = if geometry::is_degenerate(bounds) {
                    Gesture::Moving {
                        origin: self.objects.clone(),
                        recorded: false,
                    }
                } else {
                    Gesture::Resizing {
                        anchor,
                        bounds,
                        origin: self.objects.clone(),
                        recorded: false,
                    }
                };
                return;
            }
        }

        let hits_selection = self
            .objects
            .iter()
            .any(|o| o.is_selected && o.hit_test(location));
        if !hits_selection {
            match self.objects.iter().rposition(|o| o.hit_test(location)) {
                Some(index) => {
                    self.clear_selection();
                    self.objects[index].is_selected = true;
                }
                None => {
                    self.clear_selection();
                    self.gesture = Gesture::Marquee {
                        start: location,
                        current: location,
                    };
                    return;
                }
            }
        }
        self.gesture = Gesture::Moving {
            origin: self.objects.clone(),
            recorded: false,
        };
    }

    fn push_new_object(&mut self, kind: ObjectKind, points: Vec<Pos2>) {
        let object = factory::create_shape(
            kind,
            self.style.color,
            self.style.opacity,
            self.style.stroke_width,
            points,
        );
        self.objects.push(object);
        self.gesture = Gesture::Drawing {
            index: self.objects.len() - 1,
        };
    }

    /// The first real movement of a move or resize records the state from
    /// pointer-down, so a plain click leaves history alone.
    fn record_gesture_origin(&mut self) {
        let (command, origin, recorded) = match &mut self.gesture {
            Gesture::Moving { origin, recorded } => (Command::Move, origin, recorded),
            Gesture::Resizing { origin, recorded, .. } => (Command::Resize, origin, recorded),
            _ => return,
        };
        if !*recorded {
            *recorded = true;
            self.history.push(command, origin);
            self.continuous_edit = None;
        }
    }

    /// Re-derive the selected objects from the pointer-down state moved or
    /// scaled by the total drag `delta`.
    fn apply_drag(&mut self, delta: Vec2) -> CommandResult {
        match &self.gesture {
            Gesture::Moving { origin, .. } => {
                for (object, before) in self.objects.iter_mut().zip(origin) {
                    if before.is_selected {
                        object.points = before.points.iter().map(|p| *p + delta).collect();
                    }
                }
                Ok(())
            }
            Gesture::Resizing {
                anchor,
                bounds,
                origin,
                ..
            } => {
                if geometry::is_degenerate(*bounds) {
                    return Err(CommandError::DegenerateBounds);
                }
                let resized = anchor.resize(*bounds, delta);
                for (object, before) in self.objects.iter_mut().zip(origin) {
                    if before.is_selected {
                        object.points = before
                            .points
                            .iter()
                            .map(|p| geometry::scale_point(*p, *bounds, resized))
                            .collect();
                    }
                }
                Ok(())
            }
            _ => Err(CommandError::NoActiveGesture),
        }
    }

    /// Undo the entry pushed at pointer-down without making it redoable.
    /// Ends a gesture that never saw its pointer-up. A shape that is still
    /// too short to keep goes away together with its history entry.
    pub(super) fn abandon_gesture(&mut self) {
        if let Gesture::Drawing { index } = std::mem::take(&mut self.gesture) {
            self.discard_if_too_short(index);
        }
    }

    fn discard_if_too_short(&mut self, index: usize) {
        let Some(object) = self.objects.get(index) else {
            return;
        };
        if object.kind == ObjectKind::Pen {
            return;
        }
        let length = match object.points.as_slice() {
            [a, b, ..] => a.distance(*b),
            _ => 0.0,
        };
        if length < MIN_SHAPE_LENGTH {
            log::debug!("Discarding {} shorter than {MIN_SHAPE_LENGTH}", object.kind.name());
            self.rollback();
        }
    }

    fn rollback(&mut self) {
        if let Some(entry) = self.history.rollback() {
            self.objects = entry.objects;
        }
    }

    fn gesture_name(&self) -> &'static str {
        match self.gesture {
            Gesture::Idle => "idle",
            Gesture::Drawing { .. } => "drawing",
            Gesture::Moving { .. } => "moving",
            Gesture::Resizing { .. } => "resizing",
            Gesture::Marquee { .. } => "marquee",
            Gesture::PlacingText => "placing text",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_marquee_rect_follows_pointer() {
        let mut state = EditorState::default();
        state.set_tool(ObjectKind::Select);
        state.pointer_down(pos2(50.0, 50.0));
        state.pointer_dragged(pos2(50.0, 50.0), pos2(10.0, 20.0));
        assert_eq!(
            state.marquee(),
            Some(Rect::from_min_max(pos2(10.0, 20.0), pos2(50.0, 50.0)))
        );
        state.pointer_up(pos2(50.0, 50.0), pos2(10.0, 20.0));
        assert_eq!(state.marquee(), None);
        assert!(!state.is_gesture_active());
    }

    #[test]
    fn test_stray_drag_and_up_are_inert() {
        let mut state = EditorState::default();
        state.pointer_dragged(pos2(0.0, 0.0), pos2(5.0, 5.0));
        assert_eq!(state.last_rejection(), Some(CommandError::NoActiveGesture));
        state.pointer_up(pos2(0.0, 0.0), pos2(5.0, 5.0));
        assert_eq!(state.last_rejection(), Some(CommandError::NoActiveGesture));
        assert!(state.objects().is_empty());
        assert!(state.history().is_empty());
    }

    #[test]
    fn test_shape_follows_drag() {
        let mut state = EditorState::default();
        state.set_tool(ObjectKind::Arrow);
        state.pointer_down(pos2(0.0, 0.0));
        state.pointer_dragged(pos2(0.0, 0.0), pos2(30.0, 0.0));
        state.pointer_dragged(pos2(0.0, 0.0), pos2(40.0, 10.0));
        assert_eq!(state.objects()[0].points(), &[pos2(0.0, 0.0), pos2(40.0, 10.0)]);
        state.pointer_up(pos2(0.0, 0.0), pos2(40.0, 10.0));
        assert_eq!(state.objects().len(), 1);
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn test_moving_recomputes_from_origin() {
        let mut state = EditorState::default();
        state.set_tool(ObjectKind::LineRect);
        state.pointer_down(pos2(0.0, 0.0));
        state.pointer_up(pos2(0.0, 0.0), pos2(10.0, 10.0));

        state.set_tool(ObjectKind::Select);
        state.pointer_down(pos2(0.0, 5.0));
        for x in 1..=10 {
            state.pointer_dragged(pos2(0.0, 5.0), pos2(x as f32 * 0.1, 5.0));
        }
        state.pointer_up(pos2(0.0, 5.0), pos2(1.0, 5.0));
        assert_eq!(state.objects()[0].points(), &[pos2(1.0, 0.0), pos2(11.0, 10.0)]);
        assert_eq!(state.history().len(), 2);
    }

    #[test]
    fn test_tool_change_mid_drawing_discards_short_shape() {
        let mut state = EditorState::default();
        state.set_tool(ObjectKind::Line);
        state.pointer_down(pos2(20.0, 20.0));
        state.pointer_dragged(pos2(20.0, 20.0), pos2(22.0, 21.0));
        state.set_tool(ObjectKind::Pen);
        assert!(state.objects().is_empty());
        assert!(state.history().is_empty());
        assert!(!state.is_gesture_active());
    }

    #[test]
    fn test_new_pointer_down_keeps_long_abandoned_shape() {
        let mut state = EditorState::default();
        state.set_tool(ObjectKind::LineOval);
        state.pointer_down(pos2(0.0, 0.0));
        state.pointer_down(pos2(100.0, 100.0));
        state.pointer_dragged(pos2(100.0, 100.0), pos2(140.0, 130.0));
        state.pointer_up(pos2(100.0, 100.0), pos2(140.0, 130.0));
        assert_eq!(state.objects().len(), 1);
        assert_eq!(state.objects()[0].points(), &[pos2(100.0, 100.0), pos2(140.0, 130.0)]);
        assert_eq!(state.history().len(), 1);

        state.pointer_down(pos2(200.0, 200.0));
        state.pointer_dragged(pos2(200.0, 200.0), pos2(260.0, 200.0));
        state.on_overlay_closed();
        assert_eq!(state.objects().len(), 2);
        assert_eq!(state.history().len(), 2);
    }
}
