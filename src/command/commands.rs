use serde::{Deserialize, Serialize};

use crate::element::ObjectKind;
use crate::geometry::{FlipAxis, RotateDirection};

/// Where `arrange` moves the selected objects in the z-order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArrangeDirection {
    ToFront,
    ToBack,
}

/// Which edge or centre line `align` lines the selection up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlignEdge {
    Left,
    HorizontalCenter,
    Right,
    Top,
    VerticalCenter,
    Bottom,
}

impl AlignEdge {
    pub const ALL: [AlignEdge; 6] = [
        AlignEdge::Left,
        AlignEdge::HorizontalCenter,
        AlignEdge::Right,
        AlignEdge::Top,
        AlignEdge::VerticalCenter,
        AlignEdge::Bottom,
    ];

    /// Aligning on this edge moves objects along x only.
    pub fn is_horizontal(&self) -> bool {
        matches!(self, AlignEdge::Left | AlignEdge::HorizontalCenter | AlignEdge::Right)
    }

    pub fn name(&self) -> &'static str {
        match self {
            AlignEdge::Left => "Left",
            AlignEdge::HorizontalCenter => "Center",
            AlignEdge::Right => "Right",
            AlignEdge::Top => "Top",
            AlignEdge::VerticalCenter => "Middle",
            AlignEdge::Bottom => "Bottom",
        }
    }
}

/// The edit an undo entry reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Draw a new pen stroke or shape
    Draw(ObjectKind),
    /// Drag the selection
    Move,
    /// Drag a resize handle of the selection
    Resize,
    AddText,
    EditText,
    DeleteText,
    SetColor,
    SetOpacity,
    SetStrokeWidth,
    Arrange(ArrangeDirection),
    Align(AlignEdge),
    Flip(FlipAxis),
    Rotate(RotateDirection),
    Duplicate,
    Delete,
    Clear,
}

impl Command {
    /// Human readable label for the history list.
    pub fn name(&self) -> String {
        match self {
            Command::Draw(kind) => format!("Draw {}", kind.name()),
            Command::Move => "Move".to_string(),
            Command::Resize => "Resize".to_string(),
            Command::AddText => "Add Text".to_string(),
            Command::EditText => "Edit Text".to_string(),
            Command::DeleteText => "Delete Text".to_string(),
            Command::SetColor => "Change Color".to_string(),
            Command::SetOpacity => "Change Opacity".to_string(),
            Command::SetStrokeWidth => "Change Line Width".to_string(),
            Command::Arrange(ArrangeDirection::ToFront) => "Bring to Front".to_string(),
            Command::Arrange(ArrangeDirection::ToBack) => "Send to Back".to_string(),
            Command::Align(edge) => format!("Align {}", edge.name()),
            Command::Flip(FlipAxis::Horizontal) => "Flip Horizontal".to_string(),
            Command::Flip(FlipAxis::Vertical) => "Flip Vertical".to_string(),
            Command::Rotate(RotateDirection::Left) => "Rotate Left".to_string(),
            Command::Rotate(RotateDirection::Right) => "Rotate Right".to_string(),
            Command::Duplicate => "Duplicate".to_string(),
            Command::Delete => "Delete".to_string(),
            Command::Clear => "Clear".to_string(),
        }
    }
}
