//! Immutable tool settings published on every change.

use crate::draw::{BLACK, Color, FontDescriptor, ShapeStyle};
use crate::filter::{self, Adjustments};
use crate::input::tool::Tool;
use serde_json::Value;
use thiserror::Error;

/// Accepted brush width range in logical pixels.
pub const BRUSH_WIDTH_RANGE: (f64, f64) = (1.0, 100.0);
/// Accepted shape outline width range; 0 falls back to the brush width.
pub const SHAPE_STROKE_WIDTH_RANGE: (f64, f64) = (0.0, 50.0);
/// Accepted font size range in pixels.
pub const FONT_SIZE_RANGE: (f64, f64) = (4.0, 400.0);
/// Range of the `wght` font axis.
pub const FONT_WEIGHT_RANGE: (f64, f64) = (1.0, 1000.0);
/// Range of the `slnt` font axis in degrees.
pub const FONT_SLANT_RANGE: (f64, f64) = (-90.0, 90.0);

/// Errors from `onPropertyChange`.
#[derive(Debug, Error, PartialEq)]
pub enum PropertyError {
    #[error("unknown property '{0}'")]
    UnknownProperty(String),

    #[error("invalid value {value} for '{property}': expected {expected}")]
    InvalidValue {
        property: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// A single typed property update.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyChange {
    BrushColor(Color),
    BrushWidth(f64),
    ShapeFillColor(Color),
    ShapeStrokeColor(Color),
    ShapeStrokeWidth(f64),
    TextColor(Color),
    FontSize(f64),
    FontWeight(f64),
    FontSlant(f64),
    FontFamily(String),
    Brightness(f64),
    Contrast(f64),
    Saturation(f64),
}

impl PropertyChange {
    /// Parses a camelCase property name and JSON value.
    ///
    /// Numbers may arrive as JSON numbers or numeric strings (form inputs
    /// report strings); colors are hex strings or palette names.
    pub fn from_json(property: &str, value: &Value) -> Result<Self, PropertyError> {
        let change = match property {
            "brushColor" => Self::BrushColor(color_value("brushColor", value)?),
            "brushWidth" => Self::BrushWidth(number_value("brushWidth", value)?),
            "shapeFillColor" => Self::ShapeFillColor(color_value("shapeFillColor", value)?),
            "shapeStrokeColor" => Self::ShapeStrokeColor(color_value("shapeStrokeColor", value)?),
            "shapeStrokeWidth" => Self::ShapeStrokeWidth(number_value("shapeStrokeWidth", value)?),
            "textColor" => Self::TextColor(color_value("textColor", value)?),
            "fontSize" => Self::FontSize(number_value("fontSize", value)?),
            "fontWeight" => Self::FontWeight(number_value("fontWeight", value)?),
            "fontSlant" => Self::FontSlant(number_value("fontSlant", value)?),
            "fontFamily" => match value.as_str().map(str::trim) {
                Some(family) if !family.is_empty() => Self::FontFamily(family.to_string()),
                _ => return Err(invalid("fontFamily", value, "a non-empty string")),
            },
            "brightness" => Self::Brightness(number_value("brightness", value)?),
            "contrast" => Self::Contrast(number_value("contrast", value)?),
            "saturation" => Self::Saturation(number_value("saturation", value)?),
            other => return Err(PropertyError::UnknownProperty(other.to_string())),
        };
        Ok(change)
    }
}

fn invalid(property: &'static str, value: &Value, expected: &'static str) -> PropertyError {
    PropertyError::InvalidValue {
        property,
        value: value.to_string(),
        expected,
    }
}

fn number_value(property: &'static str, value: &Value) -> Result<f64, PropertyError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid(property, value, "a finite number"))
}

fn color_value(property: &'static str, value: &Value) -> Result<Color, PropertyError> {
    value
        .as_str()
        .and_then(Color::parse)
        .ok_or_else(|| invalid(property, value, "a hex color or palette name"))
}

/// Clamps into range; non-finite values keep `current`.
fn clamp_to(value: f64, (min, max): (f64, f64), current: f64) -> f64 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        current
    }
}

/// Snapshot of every user-adjustable drawing setting.
///
/// Never mutated in place: [`ToolState::with_change`] and
/// [`ToolState::with_tool`] build a new value, and the editor swaps the
/// shared handle. Drawing code reads one value per operation.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolState {
    /// `None` when the shell selected an id this editor does not know
    pub active_tool: Option<Tool>,
    pub brush_color: Color,
    pub brush_width: f64,
    pub shape_fill_color: Color,
    pub shape_stroke_color: Color,
    pub shape_stroke_width: f64,
    pub text_color: Color,
    pub font_size: f64,
    pub font_weight: f64,
    pub font_slant: f64,
    pub font_family: String,
    pub brightness: f64,
    pub contrast: f64,
    pub saturation: f64,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            active_tool: Some(Tool::Brush),
            brush_color: BLACK,
            brush_width: 5.0,
            shape_fill_color: BLACK,
            shape_stroke_color: BLACK,
            shape_stroke_width: 2.0,
            text_color: BLACK,
            font_size: 16.0,
            font_weight: 60.0,
            font_slant: 0.0,
            font_family: "Sans".to_string(),
            brightness: filter::NEUTRAL,
            contrast: filter::NEUTRAL,
            saturation: filter::NEUTRAL,
        }
    }
}

impl ToolState {
    pub fn with_tool(&self, tool: Option<Tool>) -> Self {
        Self {
            active_tool: tool,
            ..self.clone()
        }
    }

    /// Returns a copy with one property replaced, clamped to its range.
    pub fn with_change(&self, change: PropertyChange) -> Self {
        let mut next = self.clone();
        match change {
            PropertyChange::BrushColor(c) => next.brush_color = c,
            PropertyChange::BrushWidth(w) => {
                next.brush_width = clamp_to(w, BRUSH_WIDTH_RANGE, self.brush_width)
            }
            PropertyChange::ShapeFillColor(c) => next.shape_fill_color = c,
            PropertyChange::ShapeStrokeColor(c) => next.shape_stroke_color = c,
            PropertyChange::ShapeStrokeWidth(w) => {
                next.shape_stroke_width =
                    clamp_to(w, SHAPE_STROKE_WIDTH_RANGE, self.shape_stroke_width)
            }
            PropertyChange::TextColor(c) => next.text_color = c,
            PropertyChange::FontSize(s) => {
                next.font_size = clamp_to(s, FONT_SIZE_RANGE, self.font_size)
            }
            PropertyChange::FontWeight(w) => {
                next.font_weight = clamp_to(w, FONT_WEIGHT_RANGE, self.font_weight)
            }
            PropertyChange::FontSlant(s) => {
                next.font_slant = clamp_to(s, FONT_SLANT_RANGE, self.font_slant)
            }
            PropertyChange::FontFamily(f) => next.font_family = f,
            PropertyChange::Brightness(v) => next.brightness = filter::clamp_parameter(v),
            PropertyChange::Contrast(v) => next.contrast = filter::clamp_parameter(v),
            PropertyChange::Saturation(v) => next.saturation = filter::clamp_parameter(v),
        }
        next
    }

    /// Copy with the color adjustments reset to neutral.
    pub fn with_neutral_adjustments(&self) -> Self {
        Self {
            brightness: filter::NEUTRAL,
            contrast: filter::NEUTRAL,
            saturation: filter::NEUTRAL,
            ..self.clone()
        }
    }

    pub fn adjustments(&self) -> Adjustments {
        Adjustments::new(self.brightness, self.contrast, self.saturation)
    }

    /// Fill and outline for the next shape.
    ///
    /// A zero outline width borrows the brush width.
    pub fn shape_style(&self) -> ShapeStyle {
        let stroke_width = if self.shape_stroke_width > 0.0 {
            self.shape_stroke_width
        } else {
            self.brush_width
        };
        ShapeStyle {
            fill: self.shape_fill_color,
            stroke: self.shape_stroke_color,
            stroke_width,
        }
    }

    pub fn font(&self) -> FontDescriptor {
        FontDescriptor::new(self.font_family.clone(), self.font_weight, self.font_slant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::RED;
    use serde_json::json;

    #[test]
    fn parses_numbers_and_numeric_strings() {
        assert_eq!(
            PropertyChange::from_json("brushWidth", &json!(12)),
            Ok(PropertyChange::BrushWidth(12.0))
        );
        assert_eq!(
            PropertyChange::from_json("contrast", &json!("150")),
            Ok(PropertyChange::Contrast(150.0))
        );
    }

    #[test]
    fn parses_colors() {
        assert_eq!(
            PropertyChange::from_json("brushColor", &json!("#ff0000")),
            Ok(PropertyChange::BrushColor(RED))
        );
        assert_eq!(
            PropertyChange::from_json("textColor", &json!("red")),
            Ok(PropertyChange::TextColor(RED))
        );
    }

    #[test]
    fn rejects_unknown_and_ill_typed_values() {
        assert_eq!(
            PropertyChange::from_json("zoomLevel", &json!(2)),
            Err(PropertyError::UnknownProperty("zoomLevel".to_string()))
        );
        assert!(matches!(
            PropertyChange::from_json("brushWidth", &json!(true)),
            Err(PropertyError::InvalidValue {
                property: "brushWidth",
                ..
            })
        ));
        assert!(PropertyChange::from_json("brushColor", &json!("#12")).is_err());
        assert!(PropertyChange::from_json("fontSize", &json!("abc")).is_err());
        assert!(PropertyChange::from_json("fontFamily", &json!("  ")).is_err());
    }

    #[test]
    fn changes_are_clamped() {
        let base = ToolState::default();
        assert_eq!(base.with_change(PropertyChange::BrushWidth(0.0)).brush_width, 1.0);
        assert_eq!(base.with_change(PropertyChange::BrushWidth(500.0)).brush_width, 100.0);
        assert_eq!(base.with_change(PropertyChange::FontSize(1.0)).font_size, 4.0);
        assert_eq!(
            base.with_change(PropertyChange::ShapeStrokeWidth(-3.0))
                .shape_stroke_width,
            0.0
        );
        assert_eq!(base.with_change(PropertyChange::Contrast(900.0)).contrast, 200.0);
    }

    #[test]
    fn non_finite_changes_keep_current_value() {
        let base = ToolState::default();
        assert_eq!(base.with_change(PropertyChange::BrushWidth(f64::NAN)).brush_width, 5.0);
        assert_eq!(base.with_change(PropertyChange::FontSize(f64::INFINITY)).font_size, 16.0);
        assert_eq!(
            base.with_change(PropertyChange::ShapeStrokeWidth(f64::NEG_INFINITY))
                .shape_stroke_width,
            2.0
        );
        assert_eq!(base.with_change(PropertyChange::FontSlant(f64::NAN)).font_slant, 0.0);
    }

    #[test]
    fn zero_outline_width_borrows_brush_width() {
        let state = ToolState::default()
            .with_change(PropertyChange::BrushWidth(12.0))
            .with_change(PropertyChange::ShapeStrokeWidth(0.0));
        assert_eq!(state.shape_stroke_width, 0.0);
        assert_eq!(state.shape_style().stroke_width, 12.0);

        let outlined = state.with_change(PropertyChange::ShapeStrokeWidth(3.0));
        assert_eq!(outlined.shape_style().stroke_width, 3.0);
    }

    #[test]
    fn with_change_leaves_original_untouched() {
        let base = ToolState::default();
        let next = base.with_change(PropertyChange::BrushColor(RED));
        assert_eq!(base.brush_color, BLACK);
        assert_eq!(next.brush_color, RED);
    }

    #[test]
    fn neutral_adjustments_reset_filters_only() {
        let state = ToolState::default()
            .with_change(PropertyChange::Brightness(150.0))
            .with_change(PropertyChange::BrushWidth(9.0));
        let reset = state.with_neutral_adjustments();
        assert!(reset.adjustments().is_neutral());
        assert_eq!(reset.brush_width, 9.0);
    }
}
