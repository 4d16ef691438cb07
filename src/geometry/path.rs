use egui::{Pos2, Rect, Vec2};

use super::hit_testing::{distance_to_line_segment, segments_intersect};

/// Number of linear pieces a curve segment is flattened into for hit-testing.
pub const CURVE_SEGMENTS: usize = 10;

/// Control-point distance for approximating a quarter circle with a cubic.
const KAPPA: f32 = 0.552_284_8;

/// One drawing instruction of a [`Path`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo(Pos2),
    LineTo(Pos2),
    QuadTo(Pos2, Pos2),
    CubicTo(Pos2, Pos2, Pos2),
    Close,
}

/// Outline of an object, used both for rendering and hit-testing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, point: Pos2) {
        self.segments.push(PathSegment::MoveTo(point));
    }

    pub fn line_to(&mut self, point: Pos2) {
        self.segments.push(PathSegment::LineTo(point));
    }

    pub fn quad_to(&mut self, control: Pos2, to: Pos2) {
        self.segments.push(PathSegment::QuadTo(control, to));
    }

    pub fn cubic_to(&mut self, c1: Pos2, c2: Pos2, to: Pos2) {
        self.segments.push(PathSegment::CubicTo(c1, c2, to));
    }

    pub fn close(&mut self) {
        self.segments.push(PathSegment::Close);
    }

    /// Open polyline through `points`.
    pub fn polyline(points: &[Pos2]) -> Self {
        let mut path = Self::new();
        if let Some((first, rest)) = points.split_first() {
            path.move_to(*first);
            for point in rest {
                path.line_to(*point);
            }
        }
        path
    }

    /// Closed rectangle outline, clockwise from the top-left corner.
    pub fn rect(rect: Rect) -> Self {
        let mut path = Self::new();
        path.move_to(rect.left_top());
        path.line_to(rect.right_top());
        path.line_to(rect.right_bottom());
        path.line_to(rect.left_bottom());
        path.close();
        path
    }

    /// Ellipse inscribed in `rect`, built from four cubic quarter arcs.
    pub fn ellipse(rect: Rect) -> Self {
        let center = rect.center();
        let rx = rect.width() / 2.0;
        let ry = rect.height() / 2.0;
        let kx = rx * KAPPA;
        let ky = ry * KAPPA;

        let right = center + Vec2::new(rx, 0.0);
        let bottom = center + Vec2::new(0.0, ry);
        let left = center - Vec2::new(rx, 0.0);
        let top = center - Vec2::new(0.0, ry);

        let mut path = Self::new();
        path.move_to(right);
        path.cubic_to(right + Vec2::new(0.0, ky), bottom + Vec2::new(kx, 0.0), bottom);
        path.cubic_to(bottom - Vec2::new(kx, 0.0), left + Vec2::new(0.0, ky), left);
        path.cubic_to(left - Vec2::new(0.0, ky), top - Vec2::new(kx, 0.0), top);
        path.cubic_to(top + Vec2::new(kx, 0.0), right - Vec2::new(0.0, ky), right);
        path.close();
        path
    }

    /// Circular arc around `center`, walking from `start` to `end` radians
    /// in steps of at most a quarter turn.
    pub fn arc_to(&mut self, center: Pos2, radius: f32, start: f32, end: f32) {
        let sweep = end - start;
        let steps = (sweep.abs() / std::f32::consts::FRAC_PI_2).ceil().max(1.0) as usize;
        let step = sweep / steps as f32;
        let k = radius * (4.0 / 3.0) * (step / 4.0).tan();

        for i in 0..steps {
            let a = start + step * i as f32;
            let b = a + step;
            let from = center + radius * Vec2::angled(a);
            let to = center + radius * Vec2::angled(b);
            let c1 = from + k * Vec2::new(-a.sin(), a.cos());
            let c2 = to - k * Vec2::new(-b.sin(), b.cos());
            self.cubic_to(c1, c2, to);
        }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Every point of the path in drawing order, with curves flattened into
    /// [`CURVE_SEGMENTS`] pieces and `Close` repeating the first point.
    pub fn flatten(&self) -> Vec<Pos2> {
        let mut points: Vec<Pos2> = Vec::new();
        for segment in &self.segments {
            match *segment {
                PathSegment::MoveTo(p) | PathSegment::LineTo(p) => points.push(p),
                PathSegment::QuadTo(c, to) => {
                    let Some(&from) = points.last() else { continue };
                    points.extend(flatten_cubic(from, c, c, to));
                }
                PathSegment::CubicTo(c1, c2, to) => {
                    let Some(&from) = points.last() else { continue };
                    points.extend(flatten_cubic(from, c1, c2, to));
                }
                PathSegment::Close => {
                    if let Some(&first) = points.first() {
                        points.push(first);
                    }
                }
            }
        }
        points
    }

    /// Even-odd containment test against the flattened outline.
    pub fn contains(&self, point: Pos2) -> bool {
        let polygon = self.flatten();
        if polygon.len() < 3 {
            return false;
        }

        let mut inside = false;
        let mut j = polygon.len() - 1;
        for i in 0..polygon.len() {
            let (a, b) = (polygon[i], polygon[j]);
            if (a.y > point.y) != (b.y > point.y) {
                let x = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
                if point.x < x {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }

    /// True if `point` lies closer than `radius` to any piece of the outline.
    pub fn intersects_point(&self, point: Pos2, radius: f32) -> bool {
        let points = self.flatten();
        points
            .windows(2)
            .any(|pair| distance_to_line_segment(point, pair[0], pair[1]) < radius)
    }

    /// True if any piece of this outline crosses any piece of `other`.
    pub fn intersects(&self, other: &Path) -> bool {
        let ours = self.flatten();
        let theirs = other.flatten();
        if ours.len() < 2 || theirs.len() < 2 {
            return false;
        }

        ours.windows(2).any(|a| {
            theirs
                .windows(2)
                .any(|b| segments_intersect(a[0], a[1], b[0], b[1]))
        })
    }
}

fn cubic_point(p0: Pos2, c1: Pos2, c2: Pos2, p1: Pos2, t: f32) -> Pos2 {
    let u = 1.0 - t;
    let v = p0.to_vec2() * (u * u * u)
        + c1.to_vec2() * (3.0 * u * u * t)
        + c2.to_vec2() * (3.0 * u * t * t)
        + p1.to_vec2() * (t * t * t);
    v.to_pos2()
}

fn flatten_cubic(p0: Pos2, c1: Pos2, c2: Pos2, p1: Pos2) -> impl Iterator<Item = Pos2> {
    (1..=CURVE_SEGMENTS).map(move |i| cubic_point(p0, c1, c2, p1, i as f32 / CURVE_SEGMENTS as f32))
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_rect_path_is_closed() {
        let path = Path::rect(Rect::from_min_max(pos2(0.0, 0.0), pos2(10.0, 5.0)));
        let points = path.flatten();
        assert_eq!(points.len(), 5);
        assert_eq!(points.first(), points.last());
    }

    #[test]
    fn test_curves_are_flattened_into_ten_pieces() {
        let mut path = Path::new();
        path.move_to(pos2(0.0, 0.0));
        path.cubic_to(pos2(0.0, 10.0), pos2(10.0, 10.0), pos2(10.0, 0.0));
        let points = path.flatten();
        assert_eq!(points.len(), 1 + CURVE_SEGMENTS);
        assert_eq!(*points.last().unwrap(), pos2(10.0, 0.0));

        let mut quad = Path::new();
        quad.move_to(pos2(0.0, 0.0));
        quad.quad_to(pos2(5.0, 10.0), pos2(10.0, 0.0));
        assert_eq!(quad.flatten().len(), 1 + CURVE_SEGMENTS);
    }

    #[test]
    fn test_ellipse_stays_on_its_bounds() {
        let rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(20.0, 10.0));
        let path = Path::ellipse(rect);
        for point in path.flatten() {
            assert!(rect.expand(0.01).contains(point), "{point:?} escaped {rect:?}");
        }
        assert!(path.contains(pos2(10.0, 5.0)));
        assert!(!path.contains(pos2(0.5, 0.5)));
    }

    #[test]
    fn test_contains_and_near() {
        let path = Path::rect(Rect::from_min_max(pos2(0.0, 0.0), pos2(10.0, 10.0)));
        assert!(path.contains(pos2(5.0, 5.0)));
        assert!(!path.contains(pos2(15.0, 5.0)));

        let line = Path::polyline(&[pos2(0.0, 0.0), pos2(100.0, 0.0)]);
        assert!(line.intersects_point(pos2(50.0, 3.0), 4.0));
        assert!(!line.intersects_point(pos2(50.0, 5.0), 4.0));
        assert!(!line.contains(pos2(50.0, 0.0)));
    }

    #[test]
    fn test_path_intersection() {
        let marquee = Path::rect(Rect::from_min_max(pos2(40.0, -10.0), pos2(60.0, 10.0)));
        let crossing = Path::polyline(&[pos2(0.0, 0.0), pos2(100.0, 0.0)]);
        let outside = Path::polyline(&[pos2(0.0, 50.0), pos2(100.0, 50.0)]);
        assert!(marquee.intersects(&crossing));
        assert!(!marquee.intersects(&outside));
    }

    #[test]
    fn test_arc_ends_where_requested() {
        let mut path = Path::new();
        let center = pos2(0.0, 0.0);
        path.move_to(pos2(0.0, 1.0));
        path.arc_to(center, 1.0, std::f32::consts::FRAC_PI_2, -std::f32::consts::FRAC_PI_2);
        let last = *path.flatten().last().unwrap();
        assert!((last - pos2(0.0, -1.0)).length() < 1e-4);
    }
}
