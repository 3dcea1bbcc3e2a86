//! Shape kinds and drag-to-geometry normalization.

use super::color::Color;

/// Shapes that use preview-then-commit drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    /// Axis-aligned rectangle spanning the drag
    Rectangle,
    /// True circle inscribed around the drag's bounding box
    Circle,
}

/// Fill and outline settings for a committed shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    pub fill: Color,
    pub stroke: Color,
    pub stroke_width: f64,
}

/// Normalized geometry for a shape drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeGeometry {
    Rect {
        /// Top-left X
        x: f64,
        /// Top-left Y
        y: f64,
        /// Width, at least 1
        w: f64,
        /// Height, at least 1
        h: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        /// Radius, at least 1
        radius: f64,
    },
}

impl ShapeGeometry {
    /// Normalizes a drag from `(x0, y0)` to `(x1, y1)`.
    ///
    /// Rectangles anchor at the top-left corner regardless of drag direction,
    /// and both rectangle sides and circle radii are kept at 1px or more so a
    /// click without movement still leaves a visible mark. Circles use the
    /// larger half-extent of the drag, so the result is never an ellipse.
    pub fn from_drag(kind: ShapeKind, x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        let dx = x1 - x0;
        let dy = y1 - y0;
        match kind {
            ShapeKind::Rectangle => ShapeGeometry::Rect {
                x: x0.min(x1),
                y: y0.min(y1),
                w: dx.abs().max(1.0),
                h: dy.abs().max(1.0),
            },
            ShapeKind::Circle => ShapeGeometry::Circle {
                cx: x0 + dx / 2.0,
                cy: y0 + dy / 2.0,
                radius: (dx.abs() / 2.0).max(dy.abs() / 2.0).max(1.0),
            },
        }
    }

    /// Appends this geometry as a closed Cairo path.
    pub(crate) fn trace(&self, ctx: &cairo::Context) {
        match *self {
            ShapeGeometry::Rect { x, y, w, h } => ctx.rectangle(x, y, w, h),
            ShapeGeometry::Circle { cx, cy, radius } => {
                ctx.new_sub_path();
                ctx.arc(cx, cy, radius, 0.0, 2.0 * std::f64::consts::PI);
                ctx.close_path();
            }
        }
    }
}
