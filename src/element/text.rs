use egui::{Pos2, Rect, Vec2};
use serde::{Deserialize, Serialize};

use crate::geometry::{FlipAxis, RotateDirection};

/// Font size given to a fresh text edit.
pub const DEFAULT_FONT_SIZE: f32 = 40.0;
const MIN_FONT_SIZE: f32 = 1.0;
const FONT_SIZE_STEP: f32 = 0.1;

/// Rotation and mirroring of a text object, in quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TextOrientation {
    #[default]
    Up,
    Right,
    Down,
    Left,
    UpMirrored,
    RightMirrored,
    DownMirrored,
    LeftMirrored,
}

impl TextOrientation {
    pub fn angle_degrees(&self) -> f32 {
        match self {
            Self::Up | Self::UpMirrored => 0.0,
            Self::Right | Self::RightMirrored => 90.0,
            Self::Down | Self::DownMirrored => 180.0,
            Self::Left | Self::LeftMirrored => 270.0,
        }
    }

    pub fn is_mirrored(&self) -> bool {
        matches!(
            self,
            Self::UpMirrored | Self::RightMirrored | Self::DownMirrored | Self::LeftMirrored
        )
    }

    /// Size of the unrotated text box inside `bounds`.
    pub fn size_of(&self, bounds: Rect) -> Vec2 {
        match self {
            Self::Up | Self::Down | Self::UpMirrored | Self::DownMirrored => {
                Vec2::new(bounds.width(), bounds.height())
            }
            Self::Right | Self::Left | Self::RightMirrored | Self::LeftMirrored => {
                Vec2::new(bounds.height(), bounds.width())
            }
        }
    }

    pub fn rotate(self, direction: RotateDirection) -> Self {
        match direction {
            RotateDirection::Right => match self {
                Self::Up => Self::Right,
                Self::Right => Self::Down,
                Self::Down => Self::Left,
                Self::Left => Self::Up,
                Self::UpMirrored => Self::LeftMirrored,
                Self::RightMirrored => Self::UpMirrored,
                Self::DownMirrored => Self::RightMirrored,
                Self::LeftMirrored => Self::DownMirrored,
            },
            RotateDirection::Left => match self {
                Self::Up => Self::Left,
                Self::Right => Self::Up,
                Self::Down => Self::Right,
                Self::Left => Self::Down,
                Self::UpMirrored => Self::RightMirrored,
                Self::RightMirrored => Self::DownMirrored,
                Self::DownMirrored => Self::LeftMirrored,
                Self::LeftMirrored => Self::UpMirrored,
            },
        }
    }

    pub fn flip(self, axis: FlipAxis) -> Self {
        match axis {
            FlipAxis::Horizontal => match self {
                Self::Up => Self::UpMirrored,
                Self::Right => Self::RightMirrored,
                Self::Down => Self::DownMirrored,
                Self::Left => Self::LeftMirrored,
                Self::UpMirrored => Self::Up,
                Self::RightMirrored => Self::Right,
                Self::DownMirrored => Self::Down,
                Self::LeftMirrored => Self::Left,
            },
            FlipAxis::Vertical => match self {
                Self::Up => Self::DownMirrored,
                Self::Right => Self::LeftMirrored,
                Self::Down => Self::UpMirrored,
                Self::Left => Self::RightMirrored,
                Self::UpMirrored => Self::Down,
                Self::RightMirrored => Self::Left,
                Self::DownMirrored => Self::Up,
                Self::LeftMirrored => Self::Right,
            },
        }
    }

    /// Far corner of a text box of `size` anchored at `position`.
    pub fn end_position(&self, position: Pos2, size: Vec2) -> Pos2 {
        let (x, y) = (position.x, position.y);
        let (w, h) = (size.x, size.y);
        match self {
            Self::Up => Pos2::new(x + w, y + h),
            Self::Right => Pos2::new(x - h, y + w),
            Self::Down => Pos2::new(x - w, y - h),
            Self::Left => Pos2::new(x + h, y - w),
            Self::UpMirrored => Pos2::new(x - w, y + h),
            Self::RightMirrored => Pos2::new(x + h, y + w),
            Self::DownMirrored => Pos2::new(x + w, y - h),
            Self::LeftMirrored => Pos2::new(x - h, y - w),
        }
    }
}

/// Measures laid-out text. The document model only needs sizes; the view
/// layer supplies an implementation backed by its real fonts.
pub trait TextMeasure {
    fn measure(&self, text: &str, font_size: f32) -> Vec2;
}

/// Font-less estimate: fixed advance per character and fixed line height.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxTextMeasure;

impl ApproxTextMeasure {
    const ADVANCE: f32 = 0.6;
    const LINE_HEIGHT: f32 = 1.2;
}

impl TextMeasure for ApproxTextMeasure {
    fn measure(&self, text: &str, font_size: f32) -> Vec2 {
        if text.is_empty() {
            return Vec2::ZERO;
        }
        let lines = text.split('\n');
        let (count, widest) = lines.fold((0usize, 0usize), |(count, widest), line| {
            (count + 1, widest.max(line.chars().count()))
        });
        Vec2::new(
            widest as f32 * Self::ADVANCE * font_size,
            count as f32 * Self::LINE_HEIGHT * font_size,
        )
    }
}

/// Recover the font size a committed text object was laid out with from
/// its bounds: start from the per-line height and find the largest size on
/// a 0.1 grid below it whose measured text fits.
pub fn estimate_font_size(
    text: &str,
    orientation: TextOrientation,
    bounds: Rect,
    measure: &dyn TextMeasure,
) -> f32 {
    let lines = text.split('\n').count().max(1);
    let height = orientation.size_of(bounds).y.abs();
    let line_height = height / lines as f32;
    let start = ((2.0 * (line_height - 0.2078) / 1.176).round() / 2.0).max(MIN_FONT_SIZE);
    if !start.is_finite() {
        return MIN_FONT_SIZE;
    }

    let fits = |size: f32| height >= measure.measure(text, size).y;
    if start <= MIN_FONT_SIZE || fits(start) {
        return start;
    }

    // Bisect over the number of steps down from `start`. Huge boxes put
    // `start` beyond where f32 can resolve a 0.1 step.
    let size_at = |steps: u64| (start - steps as f32 * FONT_SIZE_STEP).max(MIN_FONT_SIZE);
    let (mut too_big, mut fitting) = (0_u64, ((start - MIN_FONT_SIZE) / FONT_SIZE_STEP).ceil() as u64);
    while fitting - too_big > 1 {
        let mid = too_big + (fitting - too_big) / 2;
        if fits(size_at(mid)) {
            fitting = mid;
        } else {
            too_big = mid;
        }
    }
    size_at(fitting)
}
