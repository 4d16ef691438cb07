//! Pure geometry shared by the document model and the renderer.
//!
//! Everything here works on egui's `emath` types. A [`Rect`] produced by
//! [`resized_bounds`] may carry a negative width or height (the user dragged
//! a handle past the opposite edge), so code that consumes it must use
//! `min` plus the signed `width()`/`height()` rather than normalising.

use egui::{Pos2, Rect};

mod anchor;
pub mod hit_testing;
mod path;
mod transform;

pub use anchor::{anchor_points, hit_anchor, resized_bounds, Anchor, ANCHOR_HIT_SIZE};
pub use hit_testing::{hit_test_point, hit_test_rect, path_for, HIT_RADIUS_MIN};
pub use path::{Path, PathSegment, CURVE_SEGMENTS};
pub use transform::{flip_point, rotate_point, scale_point, FlipAxis, RotateDirection};

/// Axis-aligned bounding box of `points`, or [`Rect::NOTHING`] when empty.
pub fn bounds(points: &[Pos2]) -> Rect {
    let Some(first) = points.first() else {
        return Rect::NOTHING;
    };

    let mut rect = Rect::from_min_max(*first, *first);
    for point in &points[1..] {
        rect.extend_with(*point);
    }
    rect
}

/// Union of a set of bounding boxes, `None` if the set is empty.
pub fn union_bounds<I>(rects: I) -> Option<Rect>
where
    I: IntoIterator<Item = Rect>,
{
    rects
        .into_iter()
        .reduce(|acc, rect| acc.union(rect))
}

/// A rect with no area on at least one axis (a dot or an axis-aligned line).
pub fn is_degenerate(rect: Rect) -> bool {
    rect.width() == 0.0 || rect.height() == 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_bounds_of_points() {
        let rect = bounds(&[pos2(10.0, 30.0), pos2(-5.0, 2.0), pos2(4.0, 8.0)]);
        assert_eq!(rect.min, pos2(-5.0, 2.0));
        assert_eq!(rect.max, pos2(10.0, 30.0));
    }

    #[test]
    fn test_bounds_of_nothing() {
        assert_eq!(bounds(&[]), Rect::NOTHING);
    }

    #[test]
    fn test_union_bounds() {
        let a = Rect::from_min_max(pos2(0.0, 0.0), pos2(10.0, 10.0));
        let b = Rect::from_min_max(pos2(20.0, -5.0), pos2(30.0, 5.0));
        let union = union_bounds([a, b]).unwrap();
        assert_eq!(union.min, pos2(0.0, -5.0));
        assert_eq!(union.max, pos2(30.0, 10.0));
        assert!(union_bounds(Vec::<Rect>::new()).is_none());
    }

    #[test]
    fn test_degenerate() {
        assert!(is_degenerate(bounds(&[pos2(3.0, 3.0)])));
        assert!(is_degenerate(bounds(&[pos2(0.0, 3.0), pos2(10.0, 3.0)])));
        assert!(!is_degenerate(bounds(&[pos2(0.0, 0.0), pos2(1.0, 1.0)])));
    }
}
