use egui::{Color32, CursorIcon, Painter, Pos2, Rect, Stroke, Vec2};

use crate::geometry::{Anchor, ANCHOR_HIT_SIZE};

const HANDLE_FILL: Color32 = Color32::WHITE;
const HANDLE_BORDER: Color32 = Color32::from_rgb(30, 120, 255);

pub fn cursor_icon(anchor: Anchor) -> CursorIcon {
    match anchor {
        Anchor::TopLeft | Anchor::BottomRight => CursorIcon::ResizeNwSe,
        Anchor::TopRight | Anchor::BottomLeft => CursorIcon::ResizeNeSw,
        Anchor::Top | Anchor::Bottom => CursorIcon::ResizeVertical,
        Anchor::Left | Anchor::Right => CursorIcon::ResizeHorizontal,
    }
}

/// One of the square handles drawn on the selection box. Dragging is
/// handled by the document model; the widget only paints and picks a cursor.
pub struct ResizeHandle {
    anchor: Anchor,
    position: Pos2,
    size: f32,
}

impl ResizeHandle {
    pub fn new(anchor: Anchor, position: Pos2) -> Self {
        Self {
            anchor,
            position,
            size: ANCHOR_HIT_SIZE,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.position, Vec2::splat(self.size))
    }

    pub fn draw(&self, painter: &Painter) {
        let rect = self.rect();
        painter.rect_filled(rect, 1.0, HANDLE_FILL);
        painter.rect_stroke(rect, 1.0, Stroke::new(1.0, HANDLE_BORDER));
    }

    /// Whether `pos` is over the handle, using the same hit area the
    /// document model uses to start a resize.
    pub fn contains(&self, pos: Pos2) -> bool {
        self.rect().contains(pos)
    }

    pub fn cursor(&self) -> CursorIcon {
        cursor_icon(self.anchor)
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }
}
