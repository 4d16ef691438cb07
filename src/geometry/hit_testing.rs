use egui::{Pos2, Rect, Vec2};

use super::{bounds, Path};
use crate::element::{DrawableObject, ObjectKind};

/// Minimum pick distance for stroked outlines, in points.
pub const HIT_RADIUS_MIN: f32 = 4.0;

/// Arrow head length as a multiple of the stroke width.
const ARROW_HEAD_LENGTH: f32 = 3.0;
/// Arrow head half-width as a multiple of the stroke width.
const ARROW_HEAD_SPREAD: f32 = 2.0;

/// Distance from `point` to the segment `line_start`..`line_end`.
pub(crate) fn distance_to_line_segment(point: Pos2, line_start: Pos2, line_end: Pos2) -> f32 {
    let line_vec = line_end - line_start;
    let point_vec = point - line_start;

    let length_sq = line_vec.length_sq();
    if length_sq == 0.0 {
        return point_vec.length();
    }

    let t = (point_vec.dot(line_vec) / length_sq).clamp(0.0, 1.0);
    let projection = line_start + line_vec * t;
    (point - projection).length()
}

/// Segment crossing test. Touching endpoints and collinear overlaps count.
pub(crate) fn segments_intersect(a0: Pos2, a1: Pos2, b0: Pos2, b1: Pos2) -> bool {
    let side = |p0: Pos2, p1: Pos2, q: Pos2| (p0.x - p1.x) * (q.y - p0.y) - (p0.y - p1.y) * (q.x - p0.x);

    let (b0_side, b1_side) = (side(a0, a1, b0), side(a0, a1, b1));
    if b0_side == 0.0 && b1_side == 0.0 {
        // Collinear: the segments meet only if their extents overlap.
        let overlaps = |a: f32, b: f32, c: f32, d: f32| a.min(b) <= c.max(d) && c.min(d) <= a.max(b);
        return overlaps(a0.x, a1.x, b0.x, b1.x) && overlaps(a0.y, a1.y, b0.y, b1.y);
    }
    if b0_side * b1_side > 0.0 {
        return false;
    }
    side(b0, b1, a0) * side(b0, b1, a1) <= 0.0
}

/// The concrete outline of `object`, per kind.
pub fn path_for(object: &DrawableObject) -> Path {
    let points = object.points();
    match object.kind() {
        ObjectKind::Select | ObjectKind::Text | ObjectKind::FillRect | ObjectKind::LineRect => {
            Path::rect(bounds(points))
        }
        ObjectKind::FillOval | ObjectKind::LineOval => Path::ellipse(bounds(points)),
        ObjectKind::Pen => match points {
            [] => Path::new(),
            [dot] => {
                let width = object.stroke_width();
                Path::ellipse(Rect::from_center_size(*dot, Vec2::splat(width)))
            }
            _ => Path::polyline(points),
        },
        ObjectKind::Line => Path::polyline(points),
        ObjectKind::Arrow => match points {
            [tail, tip, ..] => arrow_path(*tail, *tip, object.stroke_width()),
            _ => Path::new(),
        },
    }
}

/// Geometry of an arrow's head: the point where the shaft meets the head
/// and the three corners of the head triangle. `None` for a zero-length arrow.
pub fn arrow_head(tail: Pos2, tip: Pos2, stroke_width: f32) -> Option<(Pos2, [Pos2; 3])> {
    if tail == tip {
        return None;
    }
    let back = (tail - tip).normalized();
    let side = Vec2::new(-back.y, back.x);
    let neck = tip + back * (ARROW_HEAD_LENGTH * stroke_width);
    let spread = ARROW_HEAD_SPREAD * stroke_width;
    let point = tip - back * (0.5 * stroke_width);
    Some((neck, [neck - side * spread, point, neck + side * spread]))
}

/// Filled outline of a shaft with a round tail and a triangular head.
fn arrow_path(tail: Pos2, tip: Pos2, stroke_width: f32) -> Path {
    let mut path = Path::new();
    let Some((neck, [head_a, point, head_b])) = arrow_head(tail, tip, stroke_width) else {
        return path;
    };

    if (tail - tip).length() < ARROW_HEAD_LENGTH * stroke_width {
        path.move_to(head_a);
        path.line_to(point);
        path.line_to(head_b);
        path.close();
        return path;
    }

    let back = (tail - tip).normalized();
    let side = Vec2::new(-back.y, back.x);
    let r = 0.5 * stroke_width;
    let angle = back.angle();

    path.move_to(tail - side * r);
    path.line_to(neck - side * r);
    path.line_to(head_a);
    path.line_to(point);
    path.line_to(head_b);
    path.line_to(neck + side * r);
    path.line_to(tail + side * r);
    path.arc_to(tail, r, angle + std::f32::consts::FRAC_PI_2, angle - std::f32::consts::FRAC_PI_2);
    path.close();
    path
}

/// Whether a click at `point` picks `object`.
pub fn hit_test_point(object: &DrawableObject, point: Pos2) -> bool {
    match object.kind() {
        ObjectKind::Pen | ObjectKind::Line | ObjectKind::LineRect | ObjectKind::LineOval => {
            let radius = HIT_RADIUS_MIN.max(0.5 * object.stroke_width());
            path_for(object).intersects_point(point, radius)
        }
        ObjectKind::Text | ObjectKind::Arrow | ObjectKind::FillRect | ObjectKind::FillOval => {
            path_for(object).contains(point)
        }
        ObjectKind::Select => false,
    }
}

/// Whether a marquee `rect` picks `object`: full containment of the
/// object's bounds, or any crossing between the outlines.
pub fn hit_test_rect(object: &DrawableObject, rect: Rect) -> bool {
    if rect.width() <= 0.0 || rect.height() <= 0.0 {
        return false;
    }
    let object_bounds = object.bounds();
    if rect.min.x <= object_bounds.min.x
        && rect.min.y <= object_bounds.min.y
        && object_bounds.max.x <= rect.max.x
        && object_bounds.max.y <= rect.max.y
    {
        return true;
    }
    path_for(object).intersects(&Path::rect(rect))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::factory;
    use egui::{pos2, Color32};

    fn shape(kind: ObjectKind, points: Vec<Pos2>) -> DrawableObject {
        factory::create_shape(kind, Color32::RED, 1.0, 4.0, points)
    }

    #[test]
    fn test_distance_to_segment() {
        let d = distance_to_line_segment(pos2(5.0, 3.0), pos2(0.0, 0.0), pos2(10.0, 0.0));
        assert!((d - 3.0).abs() < 1e-6);
        let d = distance_to_line_segment(pos2(13.0, 4.0), pos2(0.0, 0.0), pos2(10.0, 0.0));
        assert!((d - 5.0).abs() < 1e-6);
        let d = distance_to_line_segment(pos2(3.0, 4.0), pos2(0.0, 0.0), pos2(0.0, 0.0));
        assert!((d - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_segments_intersect() {
        assert!(segments_intersect(pos2(0.0, 0.0), pos2(10.0, 10.0), pos2(0.0, 10.0), pos2(10.0, 0.0)));
        assert!(!segments_intersect(pos2(0.0, 0.0), pos2(10.0, 0.0), pos2(0.0, 5.0), pos2(10.0, 5.0)));
        assert!(segments_intersect(pos2(0.0, 0.0), pos2(10.0, 0.0), pos2(10.0, 0.0), pos2(10.0, 5.0)));
    }

    #[test]
    fn test_collinear_segments_need_overlap() {
        assert!(!segments_intersect(pos2(0.0, 0.0), pos2(120.0, 0.0), pos2(300.0, 0.0), pos2(400.0, 0.0)));
        assert!(!segments_intersect(pos2(0.0, 0.0), pos2(0.0, 10.0), pos2(0.0, 20.0), pos2(0.0, 30.0)));
        assert!(segments_intersect(pos2(0.0, 0.0), pos2(120.0, 0.0), pos2(100.0, 0.0), pos2(400.0, 0.0)));
        assert!(segments_intersect(pos2(0.0, 0.0), pos2(10.0, 0.0), pos2(10.0, 0.0), pos2(20.0, 0.0)));
    }

    #[test]
    fn test_marquee_sharing_a_line_with_far_outline_misses() {
        let line = shape(ObjectKind::Line, vec![pos2(300.0, 0.0), pos2(400.0, 0.0)]);
        let marquee = Rect::from_min_max(pos2(0.0, 0.0), pos2(120.0, 120.0));
        assert!(!hit_test_rect(&line, marquee));

        let rect = shape(ObjectKind::LineRect, vec![pos2(500.0, 120.0), pos2(600.0, 300.0)]);
        assert!(!hit_test_rect(&rect, marquee));

        let crossing = shape(ObjectKind::LineRect, vec![pos2(100.0, 100.0), pos2(200.0, 200.0)]);
        assert!(hit_test_rect(&crossing, marquee));
    }

    #[test]
    fn test_stroked_hit_uses_outline_only() {
        let rect = shape(ObjectKind::LineRect, vec![pos2(0.0, 0.0), pos2(100.0, 100.0)]);
        assert!(hit_test_point(&rect, pos2(2.0, 50.0)));
        assert!(!hit_test_point(&rect, pos2(50.0, 50.0)));

        let filled = shape(ObjectKind::FillRect, vec![pos2(0.0, 0.0), pos2(100.0, 100.0)]);
        assert!(hit_test_point(&filled, pos2(50.0, 50.0)));
    }

    #[test]
    fn test_wide_strokes_widen_the_hit_radius() {
        let thick = factory::create_shape(
            ObjectKind::Line,
            Color32::RED,
            1.0,
            20.0,
            vec![pos2(0.0, 0.0), pos2(100.0, 0.0)],
        );
        assert!(hit_test_point(&thick, pos2(50.0, 9.0)));
        assert!(!hit_test_point(&thick, pos2(50.0, 11.0)));
    }

    #[test]
    fn test_pen_dot_is_hit_near_its_point() {
        let dot = shape(ObjectKind::Pen, vec![pos2(10.0, 10.0)]);
        assert!(hit_test_point(&dot, pos2(11.0, 10.0)));
        assert!(!hit_test_point(&dot, pos2(30.0, 10.0)));
    }

    #[test]
    fn test_arrow_is_filled() {
        let arrow = shape(ObjectKind::Arrow, vec![pos2(0.0, 0.0), pos2(100.0, 0.0)]);
        assert!(hit_test_point(&arrow, pos2(50.0, 0.0)));
        assert!(hit_test_point(&arrow, pos2(95.0, 0.0)));
        assert!(!hit_test_point(&arrow, pos2(50.0, 20.0)));
    }

    #[test]
    fn test_short_arrow_is_just_a_head() {
        let arrow = shape(ObjectKind::Arrow, vec![pos2(0.0, 0.0), pos2(5.0, 0.0)]);
        let points = path_for(&arrow).flatten();
        assert_eq!(points.len(), 4);
        let zero = shape(ObjectKind::Arrow, vec![pos2(1.0, 1.0), pos2(1.0, 1.0)]);
        assert!(path_for(&zero).is_empty());
    }

    #[test]
    fn test_rect_hit_by_containment_or_crossing() {
        let line = shape(ObjectKind::Line, vec![pos2(0.0, 0.0), pos2(100.0, 0.0)]);
        let enclosing = Rect::from_min_max(pos2(-10.0, -10.0), pos2(110.0, 10.0));
        let crossing = Rect::from_min_max(pos2(40.0, -10.0), pos2(60.0, 10.0));
        let apart = Rect::from_min_max(pos2(40.0, 20.0), pos2(60.0, 30.0));
        assert!(hit_test_rect(&line, enclosing));
        assert!(hit_test_rect(&line, crossing));
        assert!(!hit_test_rect(&line, apart));
        assert!(!hit_test_rect(&line, Rect::from_min_max(pos2(50.0, 0.0), pos2(50.0, 0.0))));
    }
}
