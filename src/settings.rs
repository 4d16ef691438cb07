use std::fs;
use std::path::Path;

use egui::Color32;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::element::{ObjectKind, MAX_STROKE_WIDTH};
use crate::style::{self, StyleDefaults, PALETTE_SIZE};

/// Errors that can occur while loading or saving settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to access settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Color index {0} is outside the palette")]
    InvalidColorIndex(usize),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Which screen edge the tool bar docks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolbarPosition {
    #[default]
    Top,
    Right,
    Bottom,
    Left,
}

impl ToolbarPosition {
    pub const ALL: [ToolbarPosition; 4] = [
        ToolbarPosition::Top,
        ToolbarPosition::Right,
        ToolbarPosition::Bottom,
        ToolbarPosition::Left,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ToolbarPosition::Top => "Top",
            ToolbarPosition::Right => "Right",
            ToolbarPosition::Bottom => "Bottom",
            ToolbarPosition::Left => "Left",
        }
    }

    pub fn is_vertical(&self) -> bool {
        matches!(self, ToolbarPosition::Left | ToolbarPosition::Right)
    }
}

/// Read-only view of user preferences, consulted when the overlay opens.
pub trait SettingsProvider {
    fn default_color(&self) -> Color32;
    fn default_opacity(&self) -> f32;
    fn default_stroke_width(&self) -> f32;
    fn default_tool(&self) -> ObjectKind;
    /// Remove every object when the overlay closes.
    fn clear_on_close(&self) -> bool;
    fn toolbar_position(&self) -> ToolbarPosition;
    fn background_color(&self) -> Color32;
    fn background_opacity(&self) -> f32;

    fn style_defaults(&self) -> StyleDefaults {
        StyleDefaults {
            color: self.default_color(),
            opacity: self.default_opacity(),
            stroke_width: self.default_stroke_width(),
        }
    }
}

/// Preferences stored as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub color_index: usize,
    pub opacity: f32,
    pub stroke_width: f32,
    pub default_tool: ObjectKind,
    pub clear_on_close: bool,
    pub toolbar_position: ToolbarPosition,
    pub background_color_index: usize,
    pub background_opacity: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color_index: 0,
            opacity: 0.8,
            stroke_width: 4.0,
            default_tool: ObjectKind::Pen,
            clear_on_close: false,
            toolbar_position: ToolbarPosition::Top,
            background_color_index: 0,
            background_opacity: 0.02,
        }
    }
}

impl Settings {
    /// Parse settings from JSON text, rejecting colour indices outside the
    /// palette and clamping the numeric fields.
    pub fn from_json(json: &str) -> SettingsResult<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validated()
    }

    pub fn to_json(&self) -> SettingsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> SettingsResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path`, falling back to defaults on any error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("Using default settings, {} could not be loaded: {err}", path.display());
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> SettingsResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_json()?)?;
        log::debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Check settings that did not come through [`Settings::from_json`],
    /// such as ones restored from app storage. Invalid ones become defaults.
    pub fn sanitized(self) -> Self {
        match self.validated() {
            Ok(settings) => settings,
            Err(err) => {
                log::warn!("Using default settings, stored ones are invalid: {err}");
                Self::default()
            }
        }
    }

    fn validated(mut self) -> SettingsResult<Self> {
        for index in [self.color_index, self.background_color_index] {
            if index >= PALETTE_SIZE {
                return Err(SettingsError::InvalidColorIndex(index));
            }
        }
        self.opacity = crate::element::clamp_opacity(self.opacity);
        self.background_opacity = crate::element::clamp_opacity(self.background_opacity);
        self.stroke_width = crate::element::clamp_stroke_width(self.stroke_width);
        if self.default_tool == ObjectKind::Select {
            // The overlay always opens ready to draw.
            self.default_tool = ObjectKind::Pen;
        }
        Ok(self)
    }
}

impl SettingsProvider for Settings {
    fn default_color(&self) -> Color32 {
        style::color_for_index(self.color_index).unwrap_or(Color32::WHITE)
    }

    fn default_opacity(&self) -> f32 {
        self.opacity
    }

    fn default_stroke_width(&self) -> f32 {
        self.stroke_width.min(MAX_STROKE_WIDTH)
    }

    fn default_tool(&self) -> ObjectKind {
        self.default_tool
    }

    fn clear_on_close(&self) -> bool {
        self.clear_on_close
    }

    fn toolbar_position(&self) -> ToolbarPosition {
        self.toolbar_position
    }

    fn background_color(&self) -> Color32 {
        style::color_for_index(self.background_color_index).unwrap_or(Color32::WHITE)
    }

    fn background_opacity(&self) -> f32 {
        self.background_opacity
    }
}
