use std::sync::Arc;

use crate::input::events::{PointerEvent, PointerPhase};
use crate::input::tool::Tool;
use crate::overlay::TextOverlay;
use crate::util::Point;
use log::debug;

use super::{DrawingState, InputState};

impl InputState {
    /// Dispatches a pointer event to the matching handler.
    pub fn on_pointer(&mut self, event: PointerEvent) {
        let Point { x, y } = event.position;
        match event.phase {
            PointerPhase::Down => self.on_pointer_down(x, y),
            PointerPhase::Move => self.on_pointer_move(x, y),
            PointerPhase::Up => self.on_pointer_up(x, y),
            PointerPhase::Leave => self.on_pointer_leave(),
        }
    }

    /// Processes a pointer press.
    ///
    /// # Behavior
    /// - Idle with brush/eraser: starts a stroke at the pointer (nothing is drawn yet)
    /// - Idle with rectangle/circle: captures a snapshot and starts a preview
    /// - Idle with text: opens the text overlay at the pointer
    /// - TextEditing with text: moves the overlay, keeping the draft
    /// - Anything else: ignored
    ///
    /// Does nothing until the canvas has a backing buffer.
    pub fn on_pointer_down(&mut self, x: f64, y: f64) {
        if !self.surface.is_ready() {
            debug!("Pointer down before canvas is ready; ignoring");
            return;
        }

        let point = Point::new(x, y);
        let tool = self.tool_state.active_tool;

        if let DrawingState::TextEditing(overlay) = &mut self.state {
            if tool == Some(Tool::Text) {
                overlay.reanchor(point, &self.layout);
                self.needs_redraw = true;
            }
            return;
        }
        if !self.state.is_idle() {
            debug!("Pointer down during {}; ignoring", self.state.name());
            return;
        }

        let Some(tool) = tool else {
            debug!("No recognized tool selected; pointer down ignored");
            return;
        };

        let settings = Arc::clone(&self.tool_state);
        self.state = match tool {
            Tool::Brush | Tool::Eraser => DrawingState::Stroking {
                tool,
                settings,
                last: point,
            },
            Tool::Rectangle | Tool::Circle => {
                let Some(kind) = tool.shape_kind() else {
                    return;
                };
                if !self.snapshots.capture(&self.surface) {
                    return;
                }
                DrawingState::ShapePreviewing {
                    kind,
                    settings,
                    start: point,
                    last: point,
                }
            }
            Tool::Text => DrawingState::TextEditing(TextOverlay::begin(point, &self.layout)),
            Tool::Filter => return,
        };
        debug!("Pointer down at ({x:.1}, {y:.1}) -> {}", self.state.name());
        self.needs_redraw = true;
    }

    /// Processes pointer motion.
    ///
    /// # Behavior
    /// - Stroking: draws a segment from the last point and advances it
    /// - ShapePreviewing: restores the snapshot, then draws the shape from the
    ///   anchor to the pointer so previews never stack
    /// - Otherwise: ignored
    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        let current = Point::new(x, y);
        match &mut self.state {
            DrawingState::Stroking {
                tool,
                settings,
                last,
            } => {
                self.surface.draw_segment(
                    last.x,
                    last.y,
                    current.x,
                    current.y,
                    settings.brush_color,
                    settings.brush_width,
                    *tool == Tool::Eraser,
                );
                *last = current;
                self.needs_redraw = true;
            }
            DrawingState::ShapePreviewing {
                kind,
                settings,
                start,
                last,
            } => {
                *last = current;
                self.snapshots.restore(&mut self.surface);
                self.surface.commit_shape(
                    *kind,
                    start.x,
                    start.y,
                    current.x,
                    current.y,
                    &settings.shape_style(),
                );
                self.needs_redraw = true;
            }
            DrawingState::Idle | DrawingState::TextEditing(_) => {}
        }
    }

    /// Processes pointer release.
    ///
    /// A shape commits from its anchor to the last moved-to point, not the
    /// release coordinates.
    pub fn on_pointer_up(&mut self, _x: f64, _y: f64) {
        self.end_pointer_gesture();
    }

    /// Pointer left the canvas; ends a gesture exactly like a release.
    pub fn on_pointer_leave(&mut self) {
        self.end_pointer_gesture();
    }

    pub(crate) fn end_pointer_gesture(&mut self) {
        match std::mem::replace(&mut self.state, DrawingState::Idle) {
            DrawingState::Stroking { .. } => {
                debug!("Stroke finished");
            }
            DrawingState::ShapePreviewing {
                kind,
                settings,
                start,
                last,
            } => {
                self.snapshots.restore(&mut self.surface);
                let geometry = self.surface.commit_shape(
                    kind,
                    start.x,
                    start.y,
                    last.x,
                    last.y,
                    &settings.shape_style(),
                );
                self.snapshots.discard();
                debug!("Committed {kind:?}: {geometry:?}");
                self.needs_redraw = true;
            }
            other => {
                // Text editing survives pointer release.
                self.state = other;
            }
        }
    }
}
