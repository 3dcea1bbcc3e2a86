//! Cairo-based rendering functions for strokes, shapes, and text.

use super::color::Color;
use super::font::FontDescriptor;
use super::shape::{ShapeGeometry, ShapeStyle};

/// Renders one round-capped, round-joined line segment.
///
/// Consecutive segments of a stroke overlap at their round caps, which
/// produces the same result as a single round-joined polyline.
pub fn render_segment(
    ctx: &cairo::Context,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
    color: Color,
    width: f64,
) {
    color.apply_to(ctx);
    ctx.set_line_width(width);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    ctx.move_to(x0, y0);
    ctx.line_to(x1, y1);
    let _ = ctx.stroke();
}

/// Renders a filled and outlined shape.
///
/// The fill goes down first so the outline straddles the geometry edge,
/// half inside and half outside.
pub fn render_shape(ctx: &cairo::Context, geometry: &ShapeGeometry, style: &ShapeStyle) {
    ctx.new_path();
    geometry.trace(ctx);
    style.fill.apply_to(ctx);
    let _ = ctx.fill_preserve();

    if style.stroke_width > 0.0 {
        style.stroke.apply_to(ctx);
        ctx.set_line_width(style.stroke_width);
        ctx.set_line_join(cairo::LineJoin::Miter);
        let _ = ctx.stroke();
    } else {
        ctx.new_path();
    }
}

/// Measured vertical metrics of a laid-out text run, in layout units (pixels).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    /// Distance from the layout top to the first baseline
    pub baseline: f64,
    /// Ink extent above the baseline; `None` when nothing visible was laid out
    pub ascent: Option<f64>,
}

impl TextMetrics {
    /// Baseline Y for text whose visual top should sit at `top`.
    ///
    /// Falls back to the font size when the ascent is unmeasurable.
    pub fn baseline_for_top(&self, top: f64, font_size_px: f64) -> f64 {
        top + self.ascent.unwrap_or(font_size_px)
    }
}

/// Measures a Pango layout.
pub fn measure_layout(layout: &pango::Layout) -> TextMetrics {
    let scale = pango::SCALE as f64;
    let (ink_rect, _logical_rect) = layout.extents();
    let baseline = layout.baseline() as f64 / scale;
    let ink_top = ink_rect.y() as f64 / scale;
    let ink_height = ink_rect.height() as f64 / scale;

    let ascent = baseline - ink_top;
    let ascent = (ink_height > 0.0 && ascent > 0.0).then_some(ascent);
    TextMetrics { baseline, ascent }
}

/// Renders a single run of text whose visual top-left is `(x, y)`.
///
/// The first baseline lands at `y + measured ascent` so the insertion point
/// lines up with the top of the typed glyphs rather than their baseline.
#[allow(clippy::too_many_arguments)]
pub fn render_text(
    ctx: &cairo::Context,
    x: f64,
    y: f64,
    text: &str,
    color: Color,
    font_size_px: f64,
    font: &FontDescriptor,
) -> TextMetrics {
    ctx.save().ok();
    ctx.set_antialias(cairo::Antialias::Gray);

    let layout = pangocairo::functions::create_layout(ctx);
    layout.set_font_description(Some(&font.to_pango(font_size_px)));
    layout.set_text(text);

    let metrics = measure_layout(&layout);
    let baseline_y = metrics.baseline_for_top(y, font_size_px);

    // Pango draws from the layout's top-left corner.
    ctx.move_to(x, baseline_y - metrics.baseline);
    color.apply_to(ctx);
    pangocairo::functions::show_layout(ctx, &layout);

    ctx.restore().ok();
    metrics
}

/// Paints the whole clip area with one color, replacing what was there.
pub fn fill_solid(ctx: &cairo::Context, color: Color) {
    ctx.save().ok();
    ctx.set_operator(cairo::Operator::Source);
    color.apply_to(ctx);
    let _ = ctx.paint();
    ctx.restore().ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_uses_measured_ascent() {
        let metrics = TextMetrics {
            baseline: 14.0,
            ascent: Some(11.5),
        };
        assert_eq!(metrics.baseline_for_top(20.0, 16.0), 31.5);
    }

    fn layout_for(text: &str, font_size_px: f64) -> pango::Layout {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 64, 64).unwrap();
        let ctx = cairo::Context::new(&surface).unwrap();
        let layout = pangocairo::functions::create_layout(&ctx);
        let font = FontDescriptor::new("Sans", 400.0, 0.0);
        layout.set_font_description(Some(&font.to_pango(font_size_px)));
        layout.set_text(text);
        layout
    }

    #[test]
    fn visible_text_measures_positive_ascent() {
        let metrics = measure_layout(&layout_for("H", 40.0));
        let ascent = metrics.ascent.expect("glyph has ink");
        assert!(ascent > 0.0 && ascent <= metrics.baseline);
    }

    #[test]
    fn blank_text_has_no_ascent_and_uses_font_size() {
        let metrics = measure_layout(&layout_for("   ", 40.0));
        assert_eq!(metrics.ascent, None);
        assert_eq!(metrics.baseline_for_top(20.0, 40.0), 60.0);
    }

    #[test]
    fn baseline_falls_back_to_font_size() {
        let metrics = TextMetrics {
            baseline: 14.0,
            ascent: None,
        };
        assert_eq!(metrics.baseline_for_top(20.0, 16.0), 36.0);
    }
}
