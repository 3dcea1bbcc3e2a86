//! Configuration enum types.

use crate::draw::{BLACK, Color};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - a palette name, a hex string, or RGB values.
///
/// # Examples
/// ```toml
/// # Named color
/// brush_color = "red"
///
/// # Hex color
/// brush_color = "#ff8800"
///
/// # Custom RGB color (0-255 per component)
/// brush_color = [255, 128, 0]  # Orange
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Palette name (red, green, blue, yellow, orange, pink, white, black) or
    /// `#rgb` / `#rrggbb` / `#rrggbbaa`
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the color specification to a [`Color`].
    ///
    /// Unparseable strings fall back to black with a warning.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(spec) => Color::parse(spec).unwrap_or_else(|| {
                warn!("Unknown color '{}', using black", spec);
                BLACK
            }),
            ColorSpec::Rgb([r, g, b]) => Color::from_rgba8(*r, *g, *b, 255),
        }
    }

    /// Whether the value names a known color.
    pub fn is_valid(&self) -> bool {
        match self {
            ColorSpec::Name(spec) => Color::parse(spec).is_some(),
            ColorSpec::Rgb(_) => true,
        }
    }
}

impl From<&str> for ColorSpec {
    fn from(spec: &str) -> Self {
        ColorSpec::Name(spec.to_string())
    }
}
