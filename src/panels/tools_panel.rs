use egui::{Button, Slider};

use crate::command::{AlignEdge, ArrangeDirection};
use crate::components::{ColorSwatch, ToolButton};
use crate::element::{ObjectKind, MAX_STROKE_WIDTH};
use crate::geometry::{FlipAxis, RotateDirection};
use crate::settings::{SettingsProvider, ToolbarPosition};
use crate::state::StyleProperty;
use crate::style::{self, SHADE_COUNT};
use crate::ScreenNoteApp;

/// The tool bar, docked to the edge the settings ask for.
pub fn tools_panel(app: &mut ScreenNoteApp, ctx: &egui::Context) {
    match app.settings().toolbar_position() {
        ToolbarPosition::Top => {
            egui::TopBottomPanel::top("tools_panel").show(ctx, |ui| {
                ui.horizontal_wrapped(|ui| toolbar(app, ui));
            });
        }
        ToolbarPosition::Bottom => {
            egui::TopBottomPanel::bottom("tools_panel").show(ctx, |ui| {
                ui.horizontal_wrapped(|ui| toolbar(app, ui));
            });
        }
        ToolbarPosition::Left => {
            egui::SidePanel::left("tools_panel")
                .resizable(true)
                .default_width(200.0)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| toolbar(app, ui));
                });
        }
        ToolbarPosition::Right => {
            egui::SidePanel::right("tools_panel")
                .resizable(true)
                .default_width(200.0)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| toolbar(app, ui));
                });
        }
    }
}

fn toolbar(app: &mut ScreenNoteApp, ui: &mut egui::Ui) {
    tool_buttons(app, ui);
    ui.separator();
    palette(app, ui);
    ui.separator();
    style_sliders(app, ui);
    ui.separator();
    edit_buttons(app, ui);
    ui.separator();
    history(app, ui);
}

fn tool_buttons(app: &mut ScreenNoteApp, ui: &mut egui::Ui) {
    let current = app.state().current_tool();
    ui.horizontal_wrapped(|ui| {
        for tool in ObjectKind::ALL {
            if ToolButton::new(tool, tool == current).show(ui).clicked() {
                log::info!("Tool selected from UI: {}", tool.name());
                app.state_mut().set_tool(tool);
            }
        }
    });
}

fn palette(app: &mut ScreenNoteApp, ui: &mut egui::Ui) {
    let palette = style::palette();
    let current = app.state().style().color;

    egui::Grid::new("palette_grid")
        .spacing([2.0, 2.0])
        .show(ui, |ui| {
            for shade in 0..SHADE_COUNT {
                for (hue, shades) in palette.iter().enumerate() {
                    let color = shades[shade];
                    let response = ColorSwatch::new(color, color == current)
                        .show(ui)
                        .on_hover_text(style::primary_name(hue).unwrap_or_default());
                    if response.clicked() {
                        app.state_mut().set_color(color);
                    }
                }
                ui.end_row();
            }
        });
}

fn style_sliders(app: &mut ScreenNoteApp, ui: &mut egui::Ui) {
    let style = app.state().style();

    let mut opacity = style.opacity;
    let response = ui.add(Slider::new(&mut opacity, 0.0..=1.0).text("Opacity"));
    slider_edit(app, &response, StyleProperty::Opacity, opacity);

    let mut width = style.stroke_width;
    let response = ui.add(
        Slider::new(&mut width, 1.0..=MAX_STROKE_WIDTH)
            .logarithmic(true)
            .text("Width"),
    );
    slider_edit(app, &response, StyleProperty::StrokeWidth, width);
}

/// A whole slider drag becomes one undo step; keyboard nudges are one
/// step each.
fn slider_edit(
    app: &mut ScreenNoteApp,
    response: &egui::Response,
    property: StyleProperty,
    value: f32,
) {
    let state = app.state_mut();
    if response.drag_started() {
        state.begin_continuous_edit(property);
    }
    if response.changed() {
        match property {
            StyleProperty::Opacity => state.set_opacity(value),
            StyleProperty::StrokeWidth => state.set_stroke_width(value),
        }
        if !response.dragged() {
            state.end_continuous_edit();
        }
    }
    if response.drag_stopped() {
        state.end_continuous_edit();
    }
}

fn edit_buttons(app: &mut ScreenNoteApp, ui: &mut egui::Ui) {
    let flags = app.state().flags();
    let state = app.state_mut();

    ui.horizontal_wrapped(|ui| {
        ui.add_enabled_ui(flags.edit_object, |ui| {
            if ui.button("⏶ Front").on_hover_text("Bring to front").clicked() {
                state.arrange(ArrangeDirection::ToFront);
            }
            if ui.button("⏷ Back").on_hover_text("Send to back").clicked() {
                state.arrange(ArrangeDirection::ToBack);
            }
            ui.menu_button("Align", |ui| {
                for (i, edge) in AlignEdge::ALL.into_iter().enumerate() {
                    if i > 0 && edge.is_horizontal() != AlignEdge::ALL[i - 1].is_horizontal() {
                        ui.separator();
                    }
                    if ui.button(edge.name()).clicked() {
                        state.align(edge);
                        ui.close_menu();
                    }
                }
            });
            if ui.button("⇔").on_hover_text("Flip horizontally").clicked() {
                state.flip(FlipAxis::Horizontal);
            }
            if ui.button("⇕").on_hover_text("Flip vertically").clicked() {
                state.flip(FlipAxis::Vertical);
            }
            if ui.button("⟲").on_hover_text("Rotate left").clicked() {
                state.rotate(RotateDirection::Left);
            }
            if ui.button("⟳").on_hover_text("Rotate right").clicked() {
                state.rotate(RotateDirection::Right);
            }
            if ui.button("Duplicate").clicked() {
                state.duplicate();
            }
            if ui.button("Delete").clicked() {
                state.delete();
            }
        });

        if ui.add_enabled(flags.select_all, Button::new("Select all")).clicked() {
            state.select_all();
        }
        if ui.add_enabled(flags.clear, Button::new("Clear")).clicked() {
            state.clear();
        }
    });

    ui.horizontal(|ui| {
        if ui.add_enabled(flags.undo, Button::new("Undo")).clicked() {
            state.undo();
        }
        if ui.add_enabled(flags.redo, Button::new("Redo")).clicked() {
            state.redo();
        }
    });
}

fn history(app: &ScreenNoteApp, ui: &mut egui::Ui) {
    let history = app.state().history();
    let undo_names: Vec<String> = history.undo_stack().map(|entry| entry.command.name()).collect();
    let redo_names: Vec<String> = history
        .redo_stack()
        .iter()
        .rev()
        .map(|entry| entry.command.name())
        .collect();

    ui.collapsing("History", |ui| {
        ui.horizontal(|ui| {
            ui.label(format!("Undo stack size: {}", undo_names.len()));
            ui.label(format!("Redo stack size: {}", redo_names.len()));
        });

        egui::Grid::new("command_history_grid")
            .num_columns(2)
            .spacing([40.0, 4.0])
            .striped(true)
            .show(ui, |ui| {
                ui.strong("Undo Stack");
                ui.strong("Redo Stack");
                ui.end_row();

                for i in 0..undo_names.len().max(redo_names.len()) {
                    ui.label(undo_names.get(i).map(String::as_str).unwrap_or_default());
                    ui.label(redo_names.get(i).map(String::as_str).unwrap_or_default());
                    ui.end_row();
                }
            });
    });
}
