use egui::Color32;
use serde::{Deserialize, Serialize};

pub const PRIMARY_COUNT: usize = 8;
pub const SHADE_COUNT: usize = 5;
/// Number of selectable colour indices.
pub const PALETTE_SIZE: usize = PRIMARY_COUNT * SHADE_COUNT;

const PRIMARIES: [(&str, Color32); PRIMARY_COUNT] = [
    ("White", Color32::from_rgb(255, 255, 255)),
    ("Red", Color32::from_rgb(255, 59, 48)),
    ("Orange", Color32::from_rgb(255, 149, 0)),
    ("Yellow", Color32::from_rgb(255, 214, 10)),
    ("Green", Color32::from_rgb(52, 199, 89)),
    ("Blue", Color32::from_rgb(10, 132, 255)),
    ("Violet", Color32::from_rgb(94, 92, 230)),
    ("Purple", Color32::from_rgb(191, 90, 242)),
];

/// Style applied to new objects and pushed onto the selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StyleDefaults {
    pub color: Color32,
    pub opacity: f32,
    pub stroke_width: f32,
}

impl Default for StyleDefaults {
    fn default() -> Self {
        Self {
            color: PRIMARIES[0].1,
            opacity: 0.8,
            stroke_width: 4.0,
        }
    }
}

/// Linear blend of `color` towards black.
fn darken(color: Color32, fraction: f32) -> Color32 {
    let keep = 1.0 - fraction;
    let channel = |c: u8| (c as f32 * keep).round() as u8;
    Color32::from_rgb(channel(color.r()), channel(color.g()), channel(color.b()))
}

/// Every primary hue with its shades, `palette()[hue][shade]`. Shade `i`
/// is the hue blended towards black by `0.2 * i`.
pub fn palette() -> [[Color32; SHADE_COUNT]; PRIMARY_COUNT] {
    let mut colors = [[Color32::BLACK; SHADE_COUNT]; PRIMARY_COUNT];
    for (row, (_, primary)) in colors.iter_mut().zip(PRIMARIES.iter()) {
        for (i, shade) in row.iter_mut().enumerate() {
            *shade = darken(*primary, 0.2 * i as f32);
        }
    }
    colors
}

pub fn primary_name(hue: usize) -> Option<&'static str> {
    PRIMARIES.get(hue).map(|(name, _)| *name)
}

/// Colour for a stored palette index: hue `index % 8`, shade `index / 8`.
pub fn color_for_index(index: usize) -> Option<Color32> {
    if index >= PALETTE_SIZE {
        return None;
    }
    Some(palette()[index % PRIMARY_COUNT][index / PRIMARY_COUNT])
}

/// Inverse of [`color_for_index`] for palette colours.
pub fn index_for_color(color: Color32) -> Option<usize> {
    (0..PALETTE_SIZE).find(|i| color_for_index(*i) == Some(color))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_shade_is_the_primary() {
        let colors = palette();
        for (hue, (_, primary)) in PRIMARIES.iter().enumerate() {
            assert_eq!(colors[hue][0], *primary);
        }
    }

    #[test]
    fn test_shades_get_darker() {
        let reds = palette()[1];
        for pair in reds.windows(2) {
            assert!(pair[1].r() < pair[0].r());
        }
        assert_eq!(darken(Color32::WHITE, 1.0), Color32::BLACK);
    }

    #[test]
    fn test_index_mapping() {
        assert_eq!(color_for_index(0), Some(Color32::WHITE));
        assert_eq!(color_for_index(1), Some(palette()[1][0]));
        assert_eq!(color_for_index(9), Some(palette()[1][1]));
        assert_eq!(color_for_index(PALETTE_SIZE), None);
        assert_eq!(index_for_color(palette()[3][2]), Some(19));
    }
}
