use egui::{Color32, Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::geometry::{self, Path};

mod common;
pub(crate) mod text;

pub use common::{DUPLICATE_OFFSET, MAX_STROKE_WIDTH, MIN_SHAPE_LENGTH, TEXT_STROKE_WIDTH};
pub(crate) use common::{clamp_opacity, clamp_stroke_width};
pub use text::{
    estimate_font_size, ApproxTextMeasure, TextMeasure, TextOrientation, DEFAULT_FONT_SIZE,
};

/// What a drawable object is, and equally which tool is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ObjectKind {
    /// The selection tool. As an object it only ever exists as the transient
    /// marquee rectangle.
    Select,
    Text,
    #[default]
    Pen,
    Line,
    Arrow,
    FillRect,
    LineRect,
    FillOval,
    LineOval,
}

impl ObjectKind {
    pub const ALL: [ObjectKind; 9] = [
        ObjectKind::Select,
        ObjectKind::Text,
        ObjectKind::Pen,
        ObjectKind::Line,
        ObjectKind::Arrow,
        ObjectKind::FillRect,
        ObjectKind::LineRect,
        ObjectKind::FillOval,
        ObjectKind::LineOval,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ObjectKind::Select => "Select",
            ObjectKind::Text => "Text",
            ObjectKind::Pen => "Pen",
            ObjectKind::Line => "Line",
            ObjectKind::Arrow => "Arrow",
            ObjectKind::FillRect => "Filled Rectangle",
            ObjectKind::LineRect => "Rectangle",
            ObjectKind::FillOval => "Filled Oval",
            ObjectKind::LineOval => "Oval",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ObjectKind::Select => "⬚",
            ObjectKind::Text => "A",
            ObjectKind::Pen => "✏",
            ObjectKind::Line => "╱",
            ObjectKind::Arrow => "↗",
            ObjectKind::FillRect => "■",
            ObjectKind::LineRect => "□",
            ObjectKind::FillOval => "●",
            ObjectKind::LineOval => "○",
        }
    }

    /// Kinds drawn as an outline of `stroke_width` and picked near that outline.
    pub fn is_stroked(&self) -> bool {
        matches!(
            self,
            ObjectKind::Pen | ObjectKind::Line | ObjectKind::LineRect | ObjectKind::LineOval
        )
    }

    /// Kinds created by dragging out two corner points.
    pub fn is_shape(&self) -> bool {
        matches!(
            self,
            ObjectKind::Line
                | ObjectKind::Arrow
                | ObjectKind::FillRect
                | ObjectKind::LineRect
                | ObjectKind::FillOval
                | ObjectKind::LineOval
        )
    }
}

/// One annotation on the canvas.
///
/// Objects are plain values: every history entry is a clone of the whole
/// object list, so editing never aliases a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawableObject {
    pub(crate) id: String,
    pub(crate) kind: ObjectKind,
    pub(crate) color: Color32,
    pub(crate) opacity: f32,
    pub(crate) stroke_width: f32,
    pub(crate) points: Vec<Pos2>,
    pub(crate) text: String,
    pub(crate) text_orientation: TextOrientation,
    #[serde(skip)]
    pub(crate) is_selected: bool,
    #[serde(skip)]
    pub(crate) is_hidden: bool,
}

impl DrawableObject {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ObjectKind {
        self.kind
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke_width
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn text_orientation(&self) -> TextOrientation {
        self.text_orientation
    }

    pub fn is_selected(&self) -> bool {
        self.is_selected
    }

    /// True while the object is loaded into the text input overlay.
    pub fn is_hidden(&self) -> bool {
        self.is_hidden
    }

    pub fn bounds(&self) -> Rect {
        geometry::bounds(&self.points)
    }

    pub fn path(&self) -> Path {
        geometry::path_for(self)
    }

    /// Colour with the object's opacity applied.
    pub fn display_color(&self) -> Color32 {
        self.color.gamma_multiply(self.opacity)
    }

    pub fn hit_test(&self, pos: Pos2) -> bool {
        geometry::hit_test_point(self, pos)
    }

    pub fn hit_test_rect(&self, rect: Rect) -> bool {
        geometry::hit_test_rect(self, rect)
    }

    pub(crate) fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point += delta;
        }
    }

    pub(crate) fn map_points(&mut self, f: impl Fn(Pos2) -> Pos2) {
        for point in &mut self.points {
            *point = f(*point);
        }
    }

    /// A copy with a fresh id, shifted by `offset`.
    pub(crate) fn duplicate(&self, offset: Vec2) -> Self {
        let mut copy = self.clone();
        copy.id = crate::id_generator::generate_id();
        copy.translate(offset);
        copy
    }
}

/// Factory functions for creating objects
pub mod factory {
    use super::*;
    use crate::id_generator::generate_id;

    /// Create a pen, line, arrow, rectangle or oval. The marquee is also
    /// built here with [`ObjectKind::Select`].
    pub fn create_shape(
        kind: ObjectKind,
        color: Color32,
        opacity: f32,
        stroke_width: f32,
        points: Vec<Pos2>,
    ) -> DrawableObject {
        DrawableObject {
            id: generate_id(),
            kind,
            color,
            opacity: clamp_opacity(opacity),
            stroke_width: clamp_stroke_width(stroke_width),
            points,
            text: String::new(),
            text_orientation: TextOrientation::Up,
            is_selected: false,
            is_hidden: false,
        }
    }

    /// Create a text object spanning `points[0]` to `points[1]`.
    pub fn create_text(
        color: Color32,
        opacity: f32,
        points: Vec<Pos2>,
        text: impl Into<String>,
        orientation: TextOrientation,
    ) -> DrawableObject {
        DrawableObject {
            id: generate_id(),
            kind: ObjectKind::Text,
            color,
            opacity: clamp_opacity(opacity),
            stroke_width: TEXT_STROKE_WIDTH,
            points,
            text: text.into(),
            text_orientation: orientation,
            is_selected: false,
            is_hidden: false,
        }
    }
}
