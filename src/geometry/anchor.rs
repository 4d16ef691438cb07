use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::is_degenerate;

/// Side length of the square hit area around each resize handle.
pub const ANCHOR_HIT_SIZE: f32 = 8.0;

/// One of the eight resize handles on a selection's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Anchor {
    TopLeft,
    Top,
    TopRight,
    Left,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl Anchor {
    pub const ALL: [Anchor; 8] = [
        Anchor::TopLeft,
        Anchor::Top,
        Anchor::TopRight,
        Anchor::Left,
        Anchor::Right,
        Anchor::BottomLeft,
        Anchor::Bottom,
        Anchor::BottomRight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Anchor::TopLeft => "top_left",
            Anchor::Top => "top",
            Anchor::TopRight => "top_right",
            Anchor::Left => "left",
            Anchor::Right => "right",
            Anchor::BottomLeft => "bottom_left",
            Anchor::Bottom => "bottom",
            Anchor::BottomRight => "bottom_right",
        }
    }

    /// Handle position on `bounds`.
    pub fn center(&self, bounds: Rect) -> Pos2 {
        let (min, mid, max) = (bounds.min, bounds.center(), bounds.max);
        match self {
            Anchor::TopLeft => Pos2::new(min.x, min.y),
            Anchor::Top => Pos2::new(mid.x, min.y),
            Anchor::TopRight => Pos2::new(max.x, min.y),
            Anchor::Left => Pos2::new(min.x, mid.y),
            Anchor::Right => Pos2::new(max.x, mid.y),
            Anchor::BottomLeft => Pos2::new(min.x, max.y),
            Anchor::Bottom => Pos2::new(mid.x, max.y),
            Anchor::BottomRight => Pos2::new(max.x, max.y),
        }
    }

    /// New signed bounds after dragging this handle by `delta`.
    ///
    /// The edges owned by the handle follow the pointer while the opposite
    /// edges stay put. Dragging past the opposite edge yields a negative
    /// size, which the resize transform turns into a mirror.
    pub fn resize(&self, bounds: Rect, delta: Vec2) -> Rect {
        let mut origin = bounds.min;
        let mut size = bounds.size();
        match self {
            Anchor::TopLeft => {
                origin += delta;
                size -= delta;
            }
            Anchor::Top => {
                origin.y += delta.y;
                size.y -= delta.y;
            }
            Anchor::TopRight => {
                origin.y += delta.y;
                size.x += delta.x;
                size.y -= delta.y;
            }
            Anchor::Left => {
                origin.x += delta.x;
                size.x -= delta.x;
            }
            Anchor::Right => {
                size.x += delta.x;
            }
            Anchor::BottomLeft => {
                origin.x += delta.x;
                size.x -= delta.x;
                size.y += delta.y;
            }
            Anchor::Bottom => {
                size.y += delta.y;
            }
            Anchor::BottomRight => {
                size += delta;
            }
        }
        Rect::from_min_size(origin, size)
    }
}

/// The handle centres for `bounds`. A degenerate box has a single handle at
/// its origin, reported as [`Anchor::TopLeft`].
pub fn anchor_points(bounds: Rect) -> Vec<(Anchor, Pos2)> {
    if is_degenerate(bounds) {
        return vec![(Anchor::TopLeft, bounds.min)];
    }
    Anchor::ALL
        .iter()
        .map(|anchor| (*anchor, anchor.center(bounds)))
        .collect()
}

/// The first handle of `bounds` whose hit square contains `point`.
pub fn hit_anchor(bounds: Rect, point: Pos2) -> Option<Anchor> {
    anchor_points(bounds)
        .into_iter()
        .find(|(_, center)| Rect::from_center_size(*center, Vec2::splat(ANCHOR_HIT_SIZE)).contains(point))
        .map(|(anchor, _)| anchor)
}

/// See [`Anchor::resize`].
pub fn resized_bounds(bounds: Rect, anchor: Anchor, delta: Vec2) -> Rect {
    anchor.resize(bounds, delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, vec2};

    fn sample() -> Rect {
        Rect::from_min_size(pos2(10.0, 20.0), vec2(100.0, 50.0))
    }

    #[test]
    fn test_eight_handles() {
        let anchors = anchor_points(sample());
        assert_eq!(anchors.len(), 8);
        assert_eq!(anchors[1], (Anchor::Top, pos2(60.0, 20.0)));
        assert_eq!(anchors[7], (Anchor::BottomRight, pos2(110.0, 70.0)));
    }

    #[test]
    fn test_degenerate_bounds_have_one_handle() {
        let dot = Rect::from_min_size(pos2(5.0, 5.0), Vec2::ZERO);
        assert_eq!(anchor_points(dot), vec![(Anchor::TopLeft, pos2(5.0, 5.0))]);
    }

    #[test]
    fn test_hit_anchor() {
        assert_eq!(hit_anchor(sample(), pos2(112.0, 68.0)), Some(Anchor::BottomRight));
        assert_eq!(hit_anchor(sample(), pos2(10.0, 45.0)), Some(Anchor::Left));
        assert_eq!(hit_anchor(sample(), pos2(60.0, 45.0)), None);
    }

    #[test]
    fn test_corner_resize_moves_origin_and_shrinks() {
        let rect = resized_bounds(sample(), Anchor::TopLeft, vec2(10.0, 5.0));
        assert_eq!(rect.min, pos2(20.0, 25.0));
        assert_eq!(rect.size(), vec2(90.0, 45.0));

        let rect = resized_bounds(sample(), Anchor::BottomRight, vec2(10.0, 5.0));
        assert_eq!(rect.min, pos2(10.0, 20.0));
        assert_eq!(rect.size(), vec2(110.0, 55.0));
    }

    #[test]
    fn test_edge_resize_touches_one_axis() {
        let rect = resized_bounds(sample(), Anchor::Top, vec2(30.0, 5.0));
        assert_eq!(rect.min, pos2(10.0, 25.0));
        assert_eq!(rect.size(), vec2(100.0, 45.0));

        let rect = resized_bounds(sample(), Anchor::Right, vec2(30.0, 5.0));
        assert_eq!(rect.size(), vec2(130.0, 50.0));
    }

    #[test]
    fn test_dragging_past_the_opposite_edge_goes_negative() {
        let rect = resized_bounds(sample(), Anchor::Right, vec2(-150.0, 0.0));
        assert_eq!(rect.width(), -50.0);
    }
}
