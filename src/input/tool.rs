//! Drawing tool selection.

use crate::draw::ShapeKind;

/// Drawing tool selection.
///
/// The active tool decides which gesture a pointer-down starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// Freehand stroke in the brush color (default)
    #[default]
    Brush,
    /// Freehand stroke that paints the background color
    Eraser,
    /// Rectangle drag with live preview
    Rectangle,
    /// Circle drag with live preview
    Circle,
    /// Places a text-entry overlay
    Text,
    /// Color adjustments only; pointer input does nothing
    Filter,
}

impl Tool {
    pub const ALL: [Tool; 6] = [
        Tool::Brush,
        Tool::Eraser,
        Tool::Rectangle,
        Tool::Circle,
        Tool::Text,
        Tool::Filter,
    ];

    /// Looks up a tool by its toolbar id. Unknown ids yield `None`.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tool| tool.id().eq_ignore_ascii_case(id.trim()))
    }

    pub fn id(self) -> &'static str {
        match self {
            Tool::Brush => "brush",
            Tool::Eraser => "eraser",
            Tool::Rectangle => "rectangle",
            Tool::Circle => "circle",
            Tool::Text => "text",
            Tool::Filter => "filter",
        }
    }

    /// Shape drawn by preview tools.
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            Tool::Rectangle => Some(ShapeKind::Rectangle),
            Tool::Circle => Some(ShapeKind::Circle),
            _ => None,
        }
    }
}
