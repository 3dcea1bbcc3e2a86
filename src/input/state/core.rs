//! Gesture state machine and editor state.

use std::sync::Arc;

use crate::draw::{CanvasSurface, ShapeKind, SnapshotManager};
use crate::image::ImageLoader;
use crate::input::tool::Tool;
use crate::input::tool_state::ToolState;
use crate::overlay::{OverlayLayout, TextOverlay};
use crate::util::Point;

/// Current gesture.
///
/// Exactly one gesture can be live. Stroke and shape gestures pin the
/// [`ToolState`] that was current on pointer-down, so property changes made
/// mid-gesture only affect the next gesture.
#[derive(Debug)]
pub enum DrawingState {
    /// No gesture in progress
    Idle,
    /// Freehand brush or eraser stroke (pointer held down)
    Stroking {
        /// Brush or eraser
        tool: Tool,
        /// Settings pinned at pointer-down
        settings: Arc<ToolState>,
        /// Last point a segment was drawn to
        last: Point,
    },
    /// Rectangle or circle drag; a snapshot is live for its whole duration
    ShapePreviewing {
        kind: ShapeKind,
        /// Settings pinned at pointer-down
        settings: Arc<ToolState>,
        /// Drag anchor
        start: Point,
        /// Most recent pointer position
        last: Point,
    },
    /// Text overlay is open; ends only through finish or cancel
    TextEditing(TextOverlay),
}

impl DrawingState {
    pub fn is_idle(&self) -> bool {
        matches!(self, DrawingState::Idle)
    }

    /// Whether a pointer is currently held for a stroke or shape.
    pub fn is_pointer_gesture(&self) -> bool {
        matches!(
            self,
            DrawingState::Stroking { .. } | DrawingState::ShapePreviewing { .. }
        )
    }

    /// Short name used in log messages.
    pub fn name(&self) -> &'static str {
        match self {
            DrawingState::Idle => "Idle",
            DrawingState::Stroking { .. } => "Stroking",
            DrawingState::ShapePreviewing { .. } => "ShapePreviewing",
            DrawingState::TextEditing(_) => "TextEditing",
        }
    }
}

/// The editor: canvas, snapshot, tool settings, and the gesture in progress.
///
/// Every pixel mutation flows from a method on this type into
/// [`CanvasSurface`]. Callers feed pointer, touch, and shell events in and
/// check [`needs_redraw`](Self::needs_redraw) to know when to present.
pub struct InputState {
    /// Owner of the pixel buffer
    pub(crate) surface: CanvasSurface,
    /// Single live snapshot for shape previews
    pub(crate) snapshots: SnapshotManager,
    /// Currently published settings
    pub(crate) tool_state: Arc<ToolState>,
    /// Current gesture
    pub state: DrawingState,
    /// Canvas and wrapper positions for the text overlay
    pub(crate) layout: OverlayLayout,
    /// Background PNG decoder, when a tokio runtime is available
    pub(crate) loader: Option<ImageLoader>,
    /// Whether the canvas changed since the last present
    pub needs_redraw: bool,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(ToolState::default())
    }
}

impl InputState {
    /// Creates an editor with no backing buffer yet.
    ///
    /// Gestures are ignored until the first [`resize`](Self::resize). An image
    /// loader is attached automatically when called inside a tokio runtime;
    /// otherwise use [`with_loader`](Self::with_loader).
    pub fn new(tool_state: ToolState) -> Self {
        Self {
            surface: CanvasSurface::new(),
            snapshots: SnapshotManager::new(),
            tool_state: Arc::new(tool_state),
            state: DrawingState::Idle,
            layout: OverlayLayout::default(),
            loader: ImageLoader::from_current(),
            needs_redraw: true,
        }
    }

    /// Replaces the image loader.
    pub fn with_loader(mut self, loader: ImageLoader) -> Self {
        self.loader = Some(loader);
        self
    }

    /// Currently published settings.
    pub fn tool_state(&self) -> Arc<ToolState> {
        Arc::clone(&self.tool_state)
    }

    /// Read access to the canvas.
    pub fn surface(&self) -> &CanvasSurface {
        &self.surface
    }

    pub fn layout(&self) -> OverlayLayout {
        self.layout
    }

    /// Whether a shape preview snapshot is held.
    pub fn has_snapshot(&self) -> bool {
        self.snapshots.is_live()
    }

    /// Open text overlay, if any.
    pub fn text_overlay(&self) -> Option<&TextOverlay> {
        match &self.state {
            DrawingState::TextEditing(overlay) => Some(overlay),
            _ => None,
        }
    }

    /// Reallocates the canvas for a new wrapper size.
    ///
    /// Content is discarded. A stroke or shape gesture in progress is
    /// abandoned (its snapshot no longer fits); an open text overlay stays.
    pub fn resize(&mut self, width: f64, height: f64, device_pixel_ratio: f64) -> bool {
        if !self.surface.resize(width, height, device_pixel_ratio) {
            return false;
        }
        if self.state.is_pointer_gesture() {
            log::debug!("Resize abandoned {} gesture", self.state.name());
            self.state = DrawingState::Idle;
        }
        self.snapshots.discard();
        self.needs_redraw = true;
        true
    }

    /// Records new canvas and wrapper positions.
    pub fn update_layout(&mut self, layout: OverlayLayout) {
        self.layout = layout;
    }

    /// Publishes a new settings value.
    pub(crate) fn publish(&mut self, next: ToolState) {
        if *self.tool_state != next {
            self.tool_state = Arc::new(next);
        }
    }

    /// Leaves the current gesture, restoring and releasing a live preview.
    pub(crate) fn abandon_pointer_gesture(&mut self) {
        match &self.state {
            DrawingState::ShapePreviewing { .. } => {
                self.snapshots.restore(&mut self.surface);
                self.snapshots.discard();
                self.state = DrawingState::Idle;
                self.needs_redraw = true;
            }
            DrawingState::Stroking { .. } => {
                self.state = DrawingState::Idle;
            }
            DrawingState::Idle | DrawingState::TextEditing(_) => {}
        }
    }
}
