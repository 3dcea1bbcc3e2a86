//! Text overlay coordination.
//!
//! The text-entry widget lives in its wrapper's coordinate space while the
//! text is rasterized in canvas space. The two differ by the canvas element's
//! offset inside the wrapper, which the shell reports as an [`OverlayLayout`].
//!
//! The overlay anchor is stored in wrapper space, where the widget actually
//! sits. Canvas coordinates are recovered at commit time with whatever layout
//! is current then.

use crate::draw::{Color, FontDescriptor};
use crate::util::{Point, Rect};
use log::debug;

/// Positions of the canvas element and its wrapper in client coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OverlayLayout {
    pub canvas_origin: Point,
    pub wrapper_origin: Point,
}

impl OverlayLayout {
    pub fn from_rects(canvas: Rect, wrapper: Rect) -> Self {
        Self {
            canvas_origin: canvas.origin(),
            wrapper_origin: wrapper.origin(),
        }
    }

    /// Offset of the canvas element within its wrapper.
    pub fn canvas_offset(&self) -> (f64, f64) {
        (
            self.canvas_origin.x - self.wrapper_origin.x,
            self.canvas_origin.y - self.wrapper_origin.y,
        )
    }

    pub fn canvas_to_overlay(&self, p: Point) -> Point {
        let (dx, dy) = self.canvas_offset();
        p.offset(dx, dy)
    }

    pub fn overlay_to_canvas(&self, p: Point) -> Point {
        let (dx, dy) = self.canvas_offset();
        p.offset(-dx, -dy)
    }
}

/// Whether the widget has been attached to the document yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayPhase {
    /// Shown in state, not yet mounted; focus must wait
    Attaching,
    /// Mounted and focus has been requested
    Attached,
}

/// Instruction for the shell to focus the text widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusRequest {
    /// Select the widget's existing content on focus
    pub select_all: bool,
}

/// Styling for the editing widget.
///
/// Weight and slant are bucketed for CSS; the committed glyphs use the raw
/// axis values instead.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayStyle {
    pub font_size_px: f64,
    pub color: String,
    pub font_weight: u16,
    pub font_style: &'static str,
}

impl OverlayStyle {
    pub fn new(font_size_px: f64, color: Color, font: &FontDescriptor) -> Self {
        Self {
            font_size_px,
            color: color.to_hex(),
            font_weight: css_weight_bucket(font.weight),
            font_style: css_font_style(font.slant),
        }
    }
}

/// Maps a raw `wght` value onto the three CSS weights the widget uses.
pub fn css_weight_bucket(weight: f64) -> u16 {
    if weight <= 60.0 {
        300
    } else if weight <= 80.0 {
        400
    } else {
        600
    }
}

pub fn css_font_style(slant: f64) -> &'static str {
    if slant > 0.0 { "italic" } else { "normal" }
}

/// Text ready to rasterize.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCommit {
    /// Visual top-left of the text in canvas space
    pub position: Point,
    pub text: String,
}

/// An open text-entry overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct TextOverlay {
    anchor: Point,
    draft: String,
    phase: OverlayPhase,
}

impl TextOverlay {
    /// Opens an overlay at a canvas-space point.
    pub fn begin(canvas_point: Point, layout: &OverlayLayout) -> Self {
        let anchor = layout.canvas_to_overlay(canvas_point);
        debug!(
            "Text overlay opened at canvas ({:.1}, {:.1}) -> overlay ({:.1}, {:.1})",
            canvas_point.x, canvas_point.y, anchor.x, anchor.y
        );
        Self {
            anchor,
            draft: String::new(),
            phase: OverlayPhase::Attaching,
        }
    }

    /// Moves the overlay to a new canvas-space point, keeping the draft.
    pub fn reanchor(&mut self, canvas_point: Point, layout: &OverlayLayout) {
        self.anchor = layout.canvas_to_overlay(canvas_point);
    }

    /// Anchor in wrapper space, where the widget is positioned.
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    pub fn canvas_position(&self, layout: &OverlayLayout) -> Point {
        layout.overlay_to_canvas(self.anchor)
    }

    pub fn phase(&self) -> OverlayPhase {
        self.phase
    }

    /// Signals that the widget is mounted.
    ///
    /// Yields a focus request the first time only.
    pub fn attached(&mut self) -> Option<FocusRequest> {
        match self.phase {
            OverlayPhase::Attaching => {
                self.phase = OverlayPhase::Attached;
                Some(FocusRequest { select_all: true })
            }
            OverlayPhase::Attached => None,
        }
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: &str) {
        self.draft.clear();
        self.draft.push_str(text);
    }

    /// Closes the overlay, yielding trimmed text if any remains.
    pub fn into_commit(self, layout: &OverlayLayout) -> Option<TextCommit> {
        let text = self.draft.trim();
        if text.is_empty() {
            return None;
        }
        Some(TextCommit {
            position: self.canvas_position(layout),
            text: text.to_string(),
        })
    }
}
