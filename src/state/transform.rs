use egui::Vec2;

use super::EditorState;
use crate::command::{AlignEdge, ArrangeDirection, Command, CommandError, CommandResult};
use crate::element::{DrawableObject, ObjectKind, DUPLICATE_OFFSET};
use crate::geometry::{flip_point, rotate_point, FlipAxis, RotateDirection};

impl EditorState {
    pub fn arrange(&mut self, direction: ArrangeDirection) {
        let result = self.try_arrange(direction);
        self.finish("arrange", result);
    }

    /// Move the selection to the top or bottom of the z-order, keeping its
    /// internal order.
    pub fn try_arrange(&mut self, direction: ArrangeDirection) -> CommandResult {
        self.require_selection()?;
        self.record(Command::Arrange(direction));
        let (selected, rest): (Vec<DrawableObject>, Vec<DrawableObject>) =
            std::mem::take(&mut self.objects)
                .into_iter()
                .partition(|o| o.is_selected);
        self.objects = match direction {
            ArrangeDirection::ToFront => rest.into_iter().chain(selected).collect(),
            ArrangeDirection::ToBack => selected.into_iter().chain(rest).collect(),
        };
        Ok(())
    }

    pub fn align(&mut self, edge: AlignEdge) {
        let result = self.try_align(edge);
        self.finish("align", result);
    }

    /// Line every selected object up with the matching edge or centre of
    /// the selection bounds.
    pub fn try_align(&mut self, edge: AlignEdge) -> CommandResult {
        let bounds = self.require_selection()?;
        self.record(Command::Align(edge));
        for object in self.objects.iter_mut().filter(|o| o.is_selected) {
            let own = object.bounds();
            let delta = match edge {
                AlignEdge::Left => Vec2::new(bounds.min.x - own.min.x, 0.0),
                AlignEdge::HorizontalCenter => Vec2::new(bounds.center().x - own.center().x, 0.0),
                AlignEdge::Right => Vec2::new(bounds.max.x - own.max.x, 0.0),
                AlignEdge::Top => Vec2::new(0.0, bounds.min.y - own.min.y),
                AlignEdge::VerticalCenter => Vec2::new(0.0, bounds.center().y - own.center().y),
                AlignEdge::Bottom => Vec2::new(0.0, bounds.max.y - own.max.y),
            };
            object.translate(delta);
        }
        Ok(())
    }

    pub fn flip(&mut self, axis: FlipAxis) {
        let result = self.try_flip(axis);
        self.finish("flip", result);
    }

    /// Mirror the selection about its centre line.
    pub fn try_flip(&mut self, axis: FlipAxis) -> CommandResult {
        let center = self.require_selection()?.center();
        self.record(Command::Flip(axis));
        for object in self.objects.iter_mut().filter(|o| o.is_selected) {
            object.map_points(|p| flip_point(p, center, axis));
            if object.kind == ObjectKind::Text {
                object.text_orientation = object.text_orientation.flip(axis);
            }
        }
        Ok(())
    }

    pub fn rotate(&mut self, direction: RotateDirection) {
        let result = self.try_rotate(direction);
        self.finish("rotate", result);
    }

    /// Quarter-turn the selection about its centre.
    pub fn try_rotate(&mut self, direction: RotateDirection) -> CommandResult {
        let center = self.require_selection()?.center();
        self.record(Command::Rotate(direction));
        for object in self.objects.iter_mut().filter(|o| o.is_selected) {
            object.map_points(|p| rotate_point(p, center, direction));
            if object.kind == ObjectKind::Text {
                object.text_orientation = object.text_orientation.rotate(direction);
            }
        }
        Ok(())
    }

    pub fn duplicate(&mut self) {
        let result = self.try_duplicate();
        self.finish("duplicate", result);
    }

    /// Append offset copies of the selection; the copies become the
    /// selection.
    pub fn try_duplicate(&mut self) -> CommandResult {
        self.require_selection()?;
        self.record(Command::Duplicate);
        let copies: Vec<DrawableObject> = self
            .selected_objects()
            .map(|o| o.duplicate(DUPLICATE_OFFSET))
            .collect();
        self.clear_selection();
        log::debug!("Duplicated {} objects", copies.len());
        self.objects.extend(copies);
        Ok(())
    }

    pub fn delete(&mut self) {
        let result = self.try_delete();
        self.finish("delete", result);
    }

    pub fn try_delete(&mut self) -> CommandResult {
        self.require_selection()?;
        self.record(Command::Delete);
        self.objects.retain(|o| !o.is_selected);
        Ok(())
    }

    pub fn select_all(&mut self) {
        let result = self.try_select_all();
        self.finish("select all", result);
    }

    /// Selection flags are not part of history, so this records nothing.
    pub fn try_select_all(&mut self) -> CommandResult {
        if self.current_tool != ObjectKind::Select {
            return Err(CommandError::SelectionToolInactive);
        }
        for object in &mut self.objects {
            object.is_selected = true;
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        let result = self.try_clear();
        self.finish("clear", result);
    }

    pub fn try_clear(&mut self) -> CommandResult {
        if self.pending_text_edit.is_some() {
            return Err(CommandError::TextEditInProgress);
        }
        if self.objects.is_empty() {
            return Err(CommandError::NothingToClear);
        }
        self.record(Command::Clear);
        self.objects.clear();
        Ok(())
    }
}
