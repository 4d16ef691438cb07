use egui::{FontId, Sense};

use crate::element::TextMeasure;
use crate::input::route_event;
use crate::renderer::EguiTextMeasure;
use crate::settings::SettingsProvider;
use crate::widgets::ResizeHandle;
use crate::ScreenNoteApp;

const OVERLAY_MIN_WIDTH: f32 = 40.0;

pub fn central_panel(app: &mut ScreenNoteApp, ctx: &egui::Context) {
    let settings = app.settings();
    let background = settings
        .background_color()
        .gamma_multiply(settings.background_opacity());

    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(background))
        .show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
            app.input_mut().set_canvas_rect(response.rect);

            // The overlay runs first so a click elsewhere commits the old
            // edit before that click is routed.
            app.input_mut().clear_blocked_rects();
            text_overlay(app, ctx);

            for event in app.input_mut().process_input(ctx) {
                route_event(&event, app.state_mut());
            }

            let snapshot = app.state().snapshot();
            if let Some(pos) = response.hover_pos() {
                let hovered = snapshot
                    .anchors
                    .iter()
                    .map(|(anchor, position)| ResizeHandle::new(*anchor, *position))
                    .find(|handle| handle.contains(pos));
                if let Some(handle) = hovered {
                    ctx.set_cursor_icon(handle.cursor());
                }
            }
            app.renderer().render(&painter, &snapshot);
        });
}

/// The input field for the pending text edit, drawn where the text will land.
fn text_overlay(app: &mut ScreenNoteApp, ctx: &egui::Context) {
    let Some(edit) = app.state().pending_text_edit() else {
        app.set_focused_edit(None);
        return;
    };
    let edit_id = edit.object().id().to_owned();
    let font_size = edit.font_size();
    let color = edit.color();
    let mut buffer = edit.buffer().to_owned();
    let width = EguiTextMeasure::new(ctx.clone()).measure(&buffer, font_size).x + font_size;
    let needs_focus = app.focused_edit() != Some(edit_id.as_str());

    let area = egui::Area::new(egui::Id::new("text_input_overlay"))
        .fixed_pos(edit.position())
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.add(
                egui::TextEdit::multiline(&mut buffer)
                    .id(egui::Id::new(("text_input", edit_id.as_str())))
                    .font(FontId::proportional(font_size))
                    .text_color(color)
                    .frame(false)
                    .desired_rows(1)
                    .desired_width(width.max(OVERLAY_MIN_WIDTH)),
            )
        });
    let response = area.inner;
    app.input_mut().block_rect(area.response.rect);

    if needs_focus {
        response.request_focus();
        app.set_focused_edit(Some(edit_id));
    }
    if response.changed() {
        app.state_mut().update_text_buffer(buffer);
    }
    if response.lost_focus() {
        app.state_mut().commit_text_edit();
        app.set_focused_edit(None);
    }
}
