//! Configuration type definitions.

use super::enums::ColorSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Brush and shape defaults.
///
/// These seed the tool settings when the editor starts; the properties panel
/// changes them at runtime.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Initial tool id (brush, eraser, rectangle, circle, text, filter)
    #[serde(default = "default_tool")]
    pub default_tool: String,

    /// Brush color - a named color, a hex string, or an RGB array like `[255, 0, 0]`
    #[serde(default = "default_black")]
    pub brush_color: ColorSpec,

    /// Brush width in pixels (valid range: 1.0 - 100.0)
    #[serde(default = "default_brush_width")]
    pub brush_width: f64,

    /// Fill color for rectangles and circles
    #[serde(default = "default_black")]
    pub shape_fill_color: ColorSpec,

    /// Outline color for rectangles and circles
    #[serde(default = "default_black")]
    pub shape_stroke_color: ColorSpec,

    /// Outline width in pixels (valid range: 0.0 - 50.0, 0 uses the brush width)
    #[serde(default = "default_shape_stroke_width")]
    pub shape_stroke_width: f64,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_tool: default_tool(),
            brush_color: default_black(),
            brush_width: default_brush_width(),
            shape_fill_color: default_black(),
            shape_stroke_color: default_black(),
            shape_stroke_width: default_shape_stroke_width(),
        }
    }
}

/// Text tool defaults.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct TextConfig {
    /// Text color
    #[serde(default = "default_black")]
    pub color: ColorSpec,

    /// Font size in pixels (valid range: 4.0 - 400.0)
    #[serde(default = "default_font_size")]
    pub font_size: f64,

    /// Variable-font `wght` axis value (valid range: 1.0 - 1000.0)
    /// The editing widget rounds it to CSS weight 300, 400, or 600
    #[serde(default = "default_font_weight")]
    pub font_weight: f64,

    /// Variable-font `slnt` axis value in degrees (valid range: -90.0 - 90.0)
    /// Positive values also select an oblique face
    #[serde(default)]
    pub font_slant: f64,

    /// Font family name (e.g., "Sans", "Serif", "JetBrains Mono")
    #[serde(default = "default_font_family")]
    pub font_family: String,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            color: default_black(),
            font_size: default_font_size(),
            font_weight: default_font_weight(),
            font_slant: 0.0,
            font_family: default_font_family(),
        }
    }
}

/// Canvas size for headless runs.
///
/// Interactive shells size the canvas from their wrapper instead.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Logical width in pixels
    #[serde(default = "default_canvas_width")]
    pub width: f64,

    /// Logical height in pixels
    #[serde(default = "default_canvas_height")]
    pub height: f64,

    /// Device pixel ratio (valid range: 0.5 - 4.0)
    #[serde(default = "default_device_pixel_ratio")]
    pub device_pixel_ratio: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
            device_pixel_ratio: default_device_pixel_ratio(),
        }
    }
}

fn default_tool() -> String {
    "brush".to_string()
}

fn default_black() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_brush_width() -> f64 {
    5.0
}

fn default_shape_stroke_width() -> f64 {
    2.0
}

fn default_font_size() -> f64 {
    16.0
}

fn default_font_weight() -> f64 {
    60.0
}

fn default_font_family() -> String {
    "Sans".to_string()
}

fn default_canvas_width() -> f64 {
    800.0
}

fn default_canvas_height() -> f64 {
    600.0
}

fn default_device_pixel_ratio() -> f64 {
    1.0
}
