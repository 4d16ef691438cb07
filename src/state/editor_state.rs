//! The live document: objects, tool and style state, selection and history.
//!
//! Every public operation is fail-soft. It runs a fallible `try_*` step,
//! logs and remembers a refusal instead of surfacing it, and then publishes
//! one [`EditorEvent::StateChanged`] so views can redraw.

use std::rc::Rc;

use egui::{Color32, Pos2, Rect};

use super::gesture::Gesture;
use super::snapshot::{CommandFlags, StateSnapshot};
use super::text_edit::PendingTextEdit;
use crate::command::{Command, CommandError, CommandHistory, CommandResult};
use crate::element::{
    clamp_opacity, clamp_stroke_width, ApproxTextMeasure, DrawableObject, ObjectKind, TextMeasure,
};
use crate::event::{EditorEvent, EventBus};
use crate::geometry::{self, Anchor};
use crate::settings::{Settings, SettingsProvider};
use crate::style::StyleDefaults;

/// A style property edited by a slider, where one drag should produce a
/// single undo step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleProperty {
    Opacity,
    StrokeWidth,
}

pub struct EditorState {
    pub(super) objects: Vec<DrawableObject>,
    pub(super) current_tool: ObjectKind,
    pub(super) style: StyleDefaults,
    pub(super) history: CommandHistory,
    pub(super) gesture: Gesture,
    pub(super) pending_text_edit: Option<PendingTextEdit>,
    /// Property whose slider edit has already been recorded in history.
    pub(super) continuous_edit: Option<StyleProperty>,
    pub(super) last_rejection: Option<CommandError>,
    pub(super) text_measure: Box<dyn TextMeasure>,
    settings: Rc<dyn SettingsProvider>,
    event_bus: EventBus,
    history_flags: (bool, bool),
}

impl std::fmt::Debug for EditorState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorState")
            .field("objects", &self.objects.len())
            .field("current_tool", &self.current_tool)
            .field("style", &self.style)
            .field("gesture", &self.gesture)
            .field("pending_text_edit", &self.pending_text_edit.is_some())
            .field("undo_steps", &self.history.len())
            .finish()
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(Rc::new(Settings::default()))
    }
}

impl EditorState {
    /// A fresh document styled from `settings`.
    pub fn new(settings: Rc<dyn SettingsProvider>) -> Self {
        Self {
            objects: Vec::new(),
            current_tool: settings.default_tool(),
            style: settings.style_defaults(),
            history: CommandHistory::new(),
            gesture: Gesture::Idle,
            pending_text_edit: None,
            continuous_edit: None,
            last_rejection: None,
            text_measure: Box::new(ApproxTextMeasure),
            settings,
            event_bus: EventBus::new(),
            history_flags: (false, false),
        }
    }

    /// Replace the text measurer used to size committed text.
    pub fn with_text_measure(mut self, measure: impl TextMeasure + 'static) -> Self {
        self.text_measure = Box::new(measure);
        self
    }

    pub fn set_text_measure(&mut self, measure: impl TextMeasure + 'static) {
        self.text_measure = Box::new(measure);
    }

    pub fn events(&self) -> &EventBus {
        &self.event_bus
    }

    pub fn settings(&self) -> &dyn SettingsProvider {
        self.settings.as_ref()
    }

    /// Swap in new preferences. Only the next [`EditorState::reset`] or a
    /// fresh document picks up the new defaults.
    pub fn set_settings(&mut self, settings: Rc<dyn SettingsProvider>) {
        self.settings = settings;
    }

    pub fn objects(&self) -> &[DrawableObject] {
        &self.objects
    }

    pub fn current_tool(&self) -> ObjectKind {
        self.current_tool
    }

    pub fn style(&self) -> StyleDefaults {
        self.style
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn pending_text_edit(&self) -> Option<&PendingTextEdit> {
        self.pending_text_edit.as_ref()
    }

    /// Why the most recent operation did nothing, if it was refused.
    pub fn last_rejection(&self) -> Option<CommandError> {
        self.last_rejection
    }

    pub fn is_gesture_active(&self) -> bool {
        !self.gesture.is_idle()
    }

    pub fn selected_objects(&self) -> impl Iterator<Item = &DrawableObject> {
        self.objects.iter().filter(|o| o.is_selected)
    }

    pub fn has_selection(&self) -> bool {
        self.objects.iter().any(|o| o.is_selected)
    }

    /// Union of the selected objects' bounds.
    pub fn selection_bounds(&self) -> Option<Rect> {
        geometry::union_bounds(self.selected_objects().map(DrawableObject::bounds))
    }

    /// Resize handle positions for the current selection.
    pub fn anchors(&self) -> Vec<(Anchor, Pos2)> {
        match self.selection_bounds() {
            Some(bounds) if self.current_tool == ObjectKind::Select => geometry::anchor_points(bounds),
            _ => Vec::new(),
        }
    }

    /// The marquee rectangle while one is being dragged.
    pub fn marquee(&self) -> Option<Rect> {
        self.gesture.marquee()
    }

    pub fn is_selecting(&self) -> bool {
        self.current_tool == ObjectKind::Select && self.has_selection()
    }

    pub fn flags(&self) -> CommandFlags {
        let editing_text = self.pending_text_edit.is_some();
        let select_tool = self.current_tool == ObjectKind::Select;
        CommandFlags {
            undo: !editing_text && self.history.can_undo(),
            redo: !editing_text && self.history.can_redo(),
            select_all: select_tool && !self.objects.is_empty(),
            edit_object: self.is_selecting(),
            clear: !editing_text && !self.objects.is_empty(),
        }
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            objects: self.objects.clone(),
            selection_bounds: self.selection_bounds(),
            anchors: self.anchors(),
            marquee: self.marquee(),
            pending_text_edit: self.pending_text_edit.clone(),
            current_tool: self.current_tool,
            style: self.style,
            flags: self.flags(),
        }
    }

    // History

    pub fn undo(&mut self) {
        let result = self.try_undo();
        self.finish("undo", result);
    }

    pub fn try_undo(&mut self) -> CommandResult {
        if self.pending_text_edit.is_some() {
            return Err(CommandError::TextEditInProgress);
        }
        self.objects = self.history.undo(&self.objects)?;
        self.gesture = Gesture::Idle;
        self.continuous_edit = None;
        Ok(())
    }

    pub fn redo(&mut self) {
        let result = self.try_redo();
        self.finish("redo", result);
    }

    pub fn try_redo(&mut self) -> CommandResult {
        if self.pending_text_edit.is_some() {
            return Err(CommandError::TextEditInProgress);
        }
        self.objects = self.history.redo(&self.objects)?;
        self.gesture = Gesture::Idle;
        self.continuous_edit = None;
        Ok(())
    }

    /// Back to an empty document with the settings' default tool and style.
    pub fn reset(&mut self) {
        let old_tool = self.current_tool;
        self.objects.clear();
        self.current_tool = self.settings.default_tool();
        self.style = self.settings.style_defaults();
        self.pending_text_edit = None;
        self.gesture = Gesture::Idle;
        self.continuous_edit = None;
        self.history.clear();
        log::info!("Document reset");
        if old_tool != self.current_tool {
            self.event_bus.emit(EditorEvent::ToolChanged {
                old: old_tool,
                new: self.current_tool,
            });
        }
        self.finish("reset", Ok(()));
    }

    /// The overlay was hidden: finish whatever the user was doing and, when
    /// configured, start over.
    pub fn on_overlay_closed(&mut self) {
        if self.pending_text_edit.is_some() {
            if let Err(err) = self.try_commit_text_edit() {
                log::warn!("Could not commit text edit on close: {err}");
            }
        }
        if !self.gesture.is_idle() {
            log::debug!("Dropping unfinished gesture on close");
            self.abandon_gesture();
        }
        log::info!("Overlay closed");
        if self.settings.clear_on_close() {
            self.reset();
        } else {
            self.finish("close overlay", Ok(()));
        }
    }

    // Tool and style

    pub fn set_tool(&mut self, kind: ObjectKind) {
        let result = self.try_set_tool(kind);
        self.finish("set tool", result);
    }

    pub fn try_set_tool(&mut self, kind: ObjectKind) -> CommandResult {
        if self.current_tool == kind {
            return Ok(());
        }
        if self.pending_text_edit.is_some() {
            self.try_commit_text_edit()?;
        }
        if !self.gesture.is_idle() {
            log::warn!("Tool changed during a gesture, dropping it");
            self.abandon_gesture();
        }
        let old = self.current_tool;
        self.current_tool = kind;
        if kind != ObjectKind::Select {
            self.clear_selection();
        }
        self.continuous_edit = None;
        log::info!("Tool {} -> {}", old.name(), kind.name());
        self.event_bus.emit(EditorEvent::ToolChanged { old, new: kind });
        Ok(())
    }

    /// Set the colour for new objects and recolour the selection.
    pub fn set_color(&mut self, color: Color32) {
        self.style.color = color;
        if self.has_selection() {
            self.record(Command::SetColor);
            for object in self.objects.iter_mut().filter(|o| o.is_selected) {
                object.color = color;
            }
        }
        self.finish("set color", Ok(()));
    }

    /// Start a slider drag. The first value change after this is recorded
    /// as one undo step for the whole drag.
    pub fn begin_continuous_edit(&mut self, property: StyleProperty) {
        if self.has_selection() {
            self.record(match property {
                StyleProperty::Opacity => Command::SetOpacity,
                StyleProperty::StrokeWidth => Command::SetStrokeWidth,
            });
            self.continuous_edit = Some(property);
        }
        self.finish("begin edit", Ok(()));
    }

    pub fn end_continuous_edit(&mut self) {
        self.continuous_edit = None;
    }

    pub fn set_opacity(&mut self, opacity: f32) {
        let opacity = clamp_opacity(opacity);
        self.style.opacity = opacity;
        if self.has_selection() {
            self.record_continuous(StyleProperty::Opacity, Command::SetOpacity);
            for object in self.objects.iter_mut().filter(|o| o.is_selected) {
                object.opacity = opacity;
            }
        }
        self.finish("set opacity", Ok(()));
    }

    pub fn set_stroke_width(&mut self, width: f32) {
        let width = clamp_stroke_width(width);
        self.style.stroke_width = width;
        if self.has_selection() {
            self.record_continuous(StyleProperty::StrokeWidth, Command::SetStrokeWidth);
            for object in self
                .objects
                .iter_mut()
                .filter(|o| o.is_selected && o.kind != ObjectKind::Text)
            {
                object.stroke_width = width;
            }
        }
        self.finish("set stroke width", Ok(()));
    }

    // Helpers shared by the gesture, command and text edit modules

    /// Push the current objects as the state before `command`.
    pub(super) fn record(&mut self, command: Command) {
        self.history.push(command, &self.objects);
        self.continuous_edit = None;
    }

    /// Record once per run of consecutive changes to `property`.
    fn record_continuous(&mut self, property: StyleProperty, command: Command) {
        if self.continuous_edit != Some(property) {
            self.record(command);
            self.continuous_edit = Some(property);
        }
    }

    pub(super) fn clear_selection(&mut self) {
        for object in &mut self.objects {
            object.is_selected = false;
        }
    }

    /// Bounds of the selection when edit commands are allowed.
    pub(super) fn require_selection(&self) -> CommandResult<Rect> {
        if self.current_tool != ObjectKind::Select {
            return Err(CommandError::SelectionToolInactive);
        }
        self.selection_bounds().ok_or(CommandError::NoSelection)
    }

    /// Log a refusal, then publish the resulting state.
    pub(super) fn finish(&mut self, operation: &str, result: CommandResult) {
        match result {
            Ok(()) => self.last_rejection = None,
            Err(err) => {
                log::debug!("{operation} ignored: {err}");
                self.last_rejection = Some(err);
            }
        }
        self.publish();
    }

    fn publish(&mut self) {
        let flags = (self.history.can_undo(), self.history.can_redo());
        if flags != self.history_flags {
            self.history_flags = flags;
            self.event_bus.emit(EditorEvent::HistoryChanged {
                can_undo: flags.0,
                can_redo: flags.1,
            });
        }
        if self.event_bus.has_subscribers() {
            self.event_bus.emit(EditorEvent::StateChanged(self.snapshot()));
        }
    }
}
