use egui::{Pos2, Rect};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlipAxis {
    /// Mirror left/right.
    Horizontal,
    /// Mirror top/bottom.
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotateDirection {
    /// A quarter turn counter-clockwise on screen.
    Left,
    /// A quarter turn clockwise on screen.
    Right,
}

/// Mirror `point` about the line through `center` on `axis`.
pub fn flip_point(point: Pos2, center: Pos2, axis: FlipAxis) -> Pos2 {
    match axis {
        FlipAxis::Horizontal => Pos2::new(2.0 * center.x - point.x, point.y),
        FlipAxis::Vertical => Pos2::new(point.x, 2.0 * center.y - point.y),
    }
}

/// Quarter-turn `point` about `center`. Screen y grows downwards, so a
/// right turn maps +x onto +y.
pub fn rotate_point(point: Pos2, center: Pos2, direction: RotateDirection) -> Pos2 {
    let d = point - center;
    match direction {
        RotateDirection::Right => Pos2::new(center.x - d.y, center.y + d.x),
        RotateDirection::Left => Pos2::new(center.x + d.y, center.y - d.x),
    }
}

/// Map `point` from the `from` box onto the signed `to` box: translate to
/// the origin, scale by the size ratio, translate to the new origin.
///
/// `from` must have non-zero width and height.
pub fn scale_point(point: Pos2, from: Rect, to: Rect) -> Pos2 {
    let sx = to.width() / from.width();
    let sy = to.height() / from.height();
    Pos2::new(
        (point.x - from.min.x) * sx + to.min.x,
        (point.y - from.min.y) * sy + to.min.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    #[test]
    fn test_flip_twice_is_identity() {
        let center = pos2(13.5, 7.25);
        let p = pos2(3.0, 40.0);
        for axis in [FlipAxis::Horizontal, FlipAxis::Vertical] {
            assert_eq!(flip_point(flip_point(p, center, axis), center, axis), p);
        }
    }

    #[test]
    fn test_rotate_right_is_clockwise() {
        let center = pos2(0.0, 0.0);
        assert_eq!(rotate_point(pos2(1.0, 0.0), center, RotateDirection::Right), pos2(0.0, 1.0));
        assert_eq!(rotate_point(pos2(1.0, 0.0), center, RotateDirection::Left), pos2(0.0, -1.0));
    }

    #[test]
    fn test_four_quarter_turns() {
        let center = pos2(5.0, 5.0);
        let p = pos2(9.0, 2.0);
        let mut q = p;
        for _ in 0..4 {
            q = rotate_point(q, center, RotateDirection::Left);
        }
        assert_eq!(q, p);
    }

    #[test]
    fn test_scale_point() {
        let from = Rect::from_min_size(pos2(0.0, 0.0), vec2(10.0, 10.0));
        let to = Rect::from_min_size(pos2(100.0, 100.0), vec2(20.0, -10.0));
        assert_eq!(scale_point(pos2(10.0, 10.0), from, to), pos2(120.0, 90.0));
        assert_eq!(scale_point(pos2(0.0, 0.0), from, to), pos2(100.0, 100.0));
    }
}
