use std::path::PathBuf;
use std::rc::Rc;

use crate::event::LoggingEventHandler;
use crate::input::InputHandler;
use crate::panels::{central_panel, tools_panel};
use crate::renderer::{EguiTextMeasure, Renderer};
use crate::settings::Settings;
use crate::state::EditorState;

/// We derive Deserialize/Serialize so the preferences survive restarts.
/// Only the settings are stored; the drawing itself is never persisted.
#[derive(serde::Deserialize, serde::Serialize, Debug, Default)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct ScreenNoteApp {
    settings: Settings,
    /// JSON file given on the command line; takes precedence over eframe
    /// storage and is written back on shutdown.
    #[serde(skip)]
    settings_path: Option<PathBuf>,
    #[serde(skip)]
    state: EditorState,
    #[serde(skip)]
    renderer: Renderer,
    #[serde(skip)]
    input: InputHandler,
    #[serde(skip)]
    overlay_hidden: bool,
    /// Object id of the text edit whose input field already has focus.
    #[serde(skip)]
    focused_edit: Option<String>,
}

impl ScreenNoteApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, settings_path: Option<PathBuf>) -> Self {
        let settings = match &settings_path {
            Some(path) => Settings::load_or_default(path),
            None => cc.storage.and_then(stored_settings).unwrap_or_default(),
        };

        let mut app = Self::with_settings(settings);
        app.settings_path = settings_path;
        app.state
            .set_text_measure(EguiTextMeasure::new(cc.egui_ctx.clone()));
        app
    }

    /// An app around a fresh document, without any eframe context.
    pub fn with_settings(settings: Settings) -> Self {
        let state = EditorState::new(Rc::new(settings.clone()));
        state.events().subscribe(LoggingEventHandler);
        Self {
            settings,
            state,
            ..Default::default()
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn input_mut(&mut self) -> &mut InputHandler {
        &mut self.input
    }

    pub fn is_overlay_visible(&self) -> bool {
        !self.overlay_hidden
    }

    /// Hide the drawing overlay, finishing the current edit, or bring it
    /// back.
    pub fn toggle_overlay(&mut self) {
        self.overlay_hidden = !self.overlay_hidden;
        if self.overlay_hidden {
            self.state.on_overlay_closed();
            self.input = InputHandler::new();
            self.focused_edit = None;
        } else {
            log::info!("Overlay opened");
        }
    }

    pub(crate) fn focused_edit(&self) -> Option<&str> {
        self.focused_edit.as_deref()
    }

    pub(crate) fn set_focused_edit(&mut self, id: Option<String>) {
        self.focused_edit = id;
    }
}

/// Settings saved by a previous run, checked the same way a settings file is.
fn stored_settings(storage: &dyn eframe::Storage) -> Option<Settings> {
    eframe::get_value::<ScreenNoteApp>(storage, eframe::APP_KEY).map(|stored| stored.settings.sanitized())
}

impl eframe::App for ScreenNoteApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if let Some(path) = &self.settings_path {
            if let Err(err) = self.settings.save(path) {
                log::warn!("Could not save settings to {}: {err}", path.display());
            }
        }
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Keep the window itself see-through; only the background fill from
    /// the settings tints the screen.
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        [0.0; 4]
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.toggle_overlay();
        }

        if self.overlay_hidden {
            egui::CentralPanel::default()
                .frame(egui::Frame::none())
                .show(ctx, |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.weak("Press Escape to annotate");
                    });
                });
            return;
        }

        // Side and top panels must be added before the central panel.
        tools_panel(self, ctx);
        central_panel(self, ctx);
    }
}
