use egui::{Color32, Pos2};

use super::gesture::Gesture;
use super::EditorState;
use crate::command::{Command, CommandError, CommandResult};
use crate::element::{
    estimate_font_size, factory, DrawableObject, ObjectKind, TextOrientation, DEFAULT_FONT_SIZE,
};
use crate::event::EditorEvent;

/// A text object loaded into the input overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingTextEdit {
    object: DrawableObject,
    buffer: String,
    font_size: f32,
    /// Id of the committed object being edited, `None` for a new draft.
    target: Option<String>,
}

impl PendingTextEdit {
    /// The object as it was when editing started. For a draft this only
    /// carries the anchor point and style.
    pub fn object(&self) -> &DrawableObject {
        &self.object
    }

    /// The live contents of the input field.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Where the text starts on the canvas.
    pub fn position(&self) -> Pos2 {
        self.object.points().first().copied().unwrap_or(Pos2::ZERO)
    }

    pub fn orientation(&self) -> TextOrientation {
        self.object.text_orientation()
    }

    pub fn color(&self) -> Color32 {
        self.object.display_color()
    }

    pub fn is_new(&self) -> bool {
        self.target.is_none()
    }
}

impl EditorState {
    /// Pointer-down with the text tool: commit any open edit, then open the
    /// topmost text object under `location` or a new draft there.
    pub(super) fn begin_text_edit(&mut self, location: Pos2) -> CommandResult {
        if self.pending_text_edit.is_some() {
            self.try_commit_text_edit()?;
        }

        let hit = self
            .objects
            .iter()
            .rposition(|o| o.kind == ObjectKind::Text && o.hit_test(location));

        let edit = match hit {
            Some(index) => {
                let object = &mut self.objects[index];
                object.is_hidden = true;
                let font_size = estimate_font_size(
                    &object.text,
                    object.text_orientation,
                    object.bounds(),
                    self.text_measure.as_ref(),
                );
                log::debug!("Editing text object {} at font size {font_size:.1}", object.id);
                PendingTextEdit {
                    object: object.clone(),
                    buffer: object.text.clone(),
                    font_size,
                    target: Some(object.id.clone()),
                }
            }
            None => PendingTextEdit {
                object: factory::create_text(
                    self.style.color,
                    self.style.opacity,
                    vec![location],
                    "",
                    TextOrientation::Up,
                ),
                buffer: String::new(),
                font_size: DEFAULT_FONT_SIZE,
                target: None,
            },
        };
        let existing = !edit.is_new();
        self.pending_text_edit = Some(edit);
        self.gesture = Gesture::PlacingText;
        self.events().emit(EditorEvent::TextEditStarted { existing });
        Ok(())
    }

    /// Replace the contents of the open text edit.
    pub fn update_text_buffer(&mut self, text: impl Into<String>) {
        let result = match self.pending_text_edit.as_mut() {
            Some(edit) => {
                edit.buffer = text.into();
                Ok(())
            }
            None => Err(CommandError::NoTextEdit),
        };
        self.finish("update text", result);
    }

    /// Write the open text edit back to the document.
    pub fn commit_text_edit(&mut self) {
        let result = self.try_commit_text_edit();
        self.finish("commit text", result);
    }

    /// An empty buffer deletes an existing object and drops a draft; an
    /// unchanged buffer records nothing.
    pub fn try_commit_text_edit(&mut self) -> CommandResult {
        let edit = self.pending_text_edit.take().ok_or(CommandError::NoTextEdit)?;
        let position = edit.position();
        let size = self.text_measure.measure(&edit.buffer, edit.font_size);

        let existing = edit
            .target
            .as_deref()
            .and_then(|id| self.objects.iter().position(|o| o.id == id));

        match existing {
            Some(index) => {
                self.objects[index].is_hidden = false;
                if edit.buffer.is_empty() {
                    self.record(Command::DeleteText);
                    self.objects.remove(index);
                } else if edit.buffer != self.objects[index].text {
                    let end = self.objects[index]
                        .text_orientation
                        .end_position(position, size);
                    self.record(Command::EditText);
                    let object = &mut self.objects[index];
                    object.points = vec![position, end];
                    object.text = edit.buffer;
                }
            }
            None => {
                if edit.target.is_some() {
                    log::warn!("Edited text object no longer exists, adding it as new text");
                }
                if !edit.buffer.is_empty() {
                    self.record(Command::AddText);
                    self.objects.push(factory::create_text(
                        self.style.color,
                        self.style.opacity,
                        vec![position, position + size],
                        edit.buffer,
                        TextOrientation::Up,
                    ));
                }
            }
        }

        if matches!(self.gesture, Gesture::PlacingText) {
            self.gesture = Gesture::Idle;
        }
        self.events().emit(EditorEvent::TextEditCommitted);
        Ok(())
    }
}
