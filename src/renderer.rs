use eframe::egui::{self, epaint::TextShape, Color32, FontId, Painter, Pos2, Rect, Shape, Stroke, Vec2};

use crate::element::{estimate_font_size, DrawableObject, ObjectKind, TextMeasure};
use crate::geometry::{hit_testing::arrow_head, Path};
use crate::state::StateSnapshot;
use crate::widgets::ResizeHandle;

const SELECTION_COLOR: Color32 = Color32::from_rgb(30, 120, 255);
const DASH_LENGTH: f32 = 4.0;
const GAP_LENGTH: f32 = 4.0;

/// Measures text with egui's fonts. Only usable once the context has run a
/// frame.
#[derive(Clone)]
pub struct EguiTextMeasure {
    ctx: egui::Context,
}

impl EguiTextMeasure {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx }
    }
}

impl TextMeasure for EguiTextMeasure {
    fn measure(&self, text: &str, font_size: f32) -> Vec2 {
        if text.is_empty() {
            return Vec2::ZERO;
        }
        self.ctx.fonts(|fonts| {
            fonts
                .layout_no_wrap(text.to_owned(), FontId::proportional(font_size), Color32::WHITE)
                .size()
        })
    }
}

/// Paints a [`StateSnapshot`] onto the canvas.
#[derive(Debug, Clone)]
pub struct Renderer {
    selection_stroke: Stroke,
    marquee_stroke: Stroke,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            selection_stroke: Stroke::new(1.0, SELECTION_COLOR),
            marquee_stroke: Stroke::new(1.0, Color32::from_gray(200)),
        }
    }

    /// Objects in z-order, then the marquee and the selection box.
    pub fn render(&self, painter: &Painter, snapshot: &StateSnapshot) {
        for object in snapshot.objects.iter().filter(|o| !o.is_hidden()) {
            self.draw_object(painter, object);
        }

        if let Some(marquee) = snapshot.marquee {
            self.draw_dashed_rect(painter, marquee, self.marquee_stroke);
        }

        if snapshot.is_selecting() {
            if let Some(bounds) = snapshot.selection_bounds {
                self.draw_dashed_rect(painter, bounds, self.selection_stroke);
            }
            for (anchor, position) in &snapshot.anchors {
                ResizeHandle::new(*anchor, *position).draw(painter);
            }
        }
    }

    pub fn draw_object(&self, painter: &Painter, object: &DrawableObject) {
        let color = object.display_color();
        let width = object.stroke_width();
        let stroke = Stroke::new(width, color);
        let points = object.points();

        match object.kind() {
            ObjectKind::Select => self.draw_dashed_rect(painter, object.bounds(), self.marquee_stroke),
            ObjectKind::Pen => match points {
                [] => {}
                [dot] => {
                    painter.circle_filled(*dot, width / 2.0, color);
                }
                _ => {
                    painter.add(Shape::line(points.to_vec(), stroke));
                }
            },
            ObjectKind::Line => {
                if let [a, b, ..] = points {
                    painter.line_segment([*a, *b], stroke);
                }
            }
            ObjectKind::Arrow => {
                if let [tail, tip, ..] = points {
                    self.draw_arrow(painter, *tail, *tip, width, color);
                }
            }
            ObjectKind::FillRect => {
                painter.rect_filled(object.bounds(), 0.0, color);
            }
            ObjectKind::LineRect => {
                painter.rect_stroke(object.bounds(), 0.0, stroke);
            }
            ObjectKind::FillOval => {
                let outline = closed_outline(&object.path());
                painter.add(Shape::convex_polygon(outline, color, Stroke::NONE));
            }
            ObjectKind::LineOval => {
                let outline = closed_outline(&object.path());
                painter.add(Shape::closed_line(outline, stroke));
            }
            ObjectKind::Text => self.draw_text(painter, object, color),
        }
    }

    fn draw_arrow(&self, painter: &Painter, tail: Pos2, tip: Pos2, width: f32, color: Color32) {
        let Some((neck, head)) = arrow_head(tail, tip, width) else {
            return;
        };
        // The shaft only exists when the arrow is longer than its head.
        if (neck - tail).dot(tip - tail) > 0.0 {
            painter.line_segment([tail, neck], Stroke::new(width, color));
            painter.circle_filled(tail, width / 2.0, color);
        }
        painter.add(Shape::convex_polygon(head.to_vec(), color, Stroke::NONE));
    }

    /// Text is laid out at the size its bounds imply and rotated into place.
    /// egui cannot mirror glyphs, so mirrored orientations render unmirrored
    /// inside the same box.
    fn draw_text(&self, painter: &Painter, object: &DrawableObject, color: Color32) {
        if object.text().is_empty() {
            return;
        }
        let bounds = object.bounds();
        let orientation = object.text_orientation();
        let measure = EguiTextMeasure::new(painter.ctx().clone());
        let font_size = estimate_font_size(object.text(), orientation, bounds, &measure);
        let galley = painter.layout_no_wrap(object.text().to_owned(), FontId::proportional(font_size), color);

        let angle = orientation.angle_degrees();
        let pos = match angle as i32 {
            90 => Pos2::new(bounds.max.x, bounds.min.y),
            180 => bounds.max,
            270 => Pos2::new(bounds.min.x, bounds.max.y),
            _ => bounds.min,
        };
        painter.add(TextShape::new(pos, galley, color).with_angle(angle.to_radians()));
    }

    fn draw_dashed_rect(&self, painter: &Painter, rect: Rect, stroke: Stroke) {
        let outline = Path::rect(rect).flatten();
        painter.extend(Shape::dashed_line(&outline, stroke, DASH_LENGTH, GAP_LENGTH));
    }
}

/// Flattened outline without the repeated closing point.
fn closed_outline(path: &Path) -> Vec<Pos2> {
    let mut points = path.flatten();
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::factory;
    use crate::state::EditorState;
    use egui::{pos2, vec2};

    fn sample_state() -> EditorState {
        let mut state = EditorState::default();
        for kind in ObjectKind::ALL.into_iter().filter(|k| *k != ObjectKind::Select && *k != ObjectKind::Text) {
            state.set_tool(kind);
            state.pointer_down(pos2(10.0, 10.0));
            state.pointer_dragged(pos2(10.0, 10.0), pos2(60.0, 40.0));
            state.pointer_up(pos2(10.0, 10.0), pos2(60.0, 40.0));
        }
        state.set_tool(ObjectKind::Select);
        state.select_all();
        state
    }

    #[test]
    fn test_render_basics() {
        let ctx = egui::Context::default();
        let rect = egui::Rect::from_min_size(pos2(0.0, 0.0), vec2(100.0, 100.0));
        let painter = egui::Painter::new(ctx.clone(), egui::LayerId::background(), rect);

        let state = sample_state();
        let snapshot = state.snapshot();
        assert_eq!(snapshot.objects.len(), 7);
        Renderer::new().render(&painter, &snapshot);
    }

    #[test]
    fn test_render_text_inside_a_frame() {
        let ctx = egui::Context::default();
        let text = factory::create_text(
            Color32::WHITE,
            1.0,
            vec![pos2(10.0, 10.0), pos2(110.0, 58.0)],
            "hello",
            crate::element::TextOrientation::Left,
        );
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            let painter = ctx.layer_painter(egui::LayerId::background());
            Renderer::new().draw_object(&painter, &text);

            let size = EguiTextMeasure::new(ctx.clone()).measure("hello", 20.0);
            assert!(size.x > 0.0 && size.y > 0.0);
        });
    }

    #[test]
    fn test_closed_outline_drops_repeat() {
        let outline = closed_outline(&Path::rect(Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0))));
        assert_eq!(outline.len(), 4);
    }
}
