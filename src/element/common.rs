use egui::Vec2;

// Common constants for all object kinds
pub const DUPLICATE_OFFSET: Vec2 = Vec2::new(20.0, 20.0);
/// Shapes shorter than this on pointer-up are discarded as accidental clicks.
pub const MIN_SHAPE_LENGTH: f32 = 5.0;
pub const TEXT_STROKE_WIDTH: f32 = 1.0;
pub const MAX_STROKE_WIDTH: f32 = 100.0;

pub(crate) fn clamp_opacity(opacity: f32) -> f32 {
    if opacity.is_nan() {
        return 1.0;
    }
    opacity.clamp(0.0, 1.0)
}

pub(crate) fn clamp_stroke_width(width: f32) -> f32 {
    if width.is_nan() {
        return 0.0;
    }
    width.clamp(0.0, MAX_STROKE_WIDTH)
}
