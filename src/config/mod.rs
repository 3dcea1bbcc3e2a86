//! Configuration file support for easel.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/easel/config.toml`. Settings cover brush and shape defaults,
//! text defaults, and the canvas size used for headless runs.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use types::{CanvasConfig, DrawingConfig, TextConfig};

use crate::input::tool::Tool;
use crate::input::tool_state::{
    BRUSH_WIDTH_RANGE, FONT_SIZE_RANGE, FONT_SLANT_RANGE, FONT_WEIGHT_RANGE,
    SHAPE_STROKE_WIDTH_RANGE, ToolState,
};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CANVAS_SIZE_RANGE: (f64, f64) = (1.0, 8192.0);
const DEVICE_PIXEL_RATIO_RANGE: (f64, f64) = (0.5, 4.0);

/// Main configuration structure containing all user settings.
///
/// All fields have defaults and fall back to them when missing from the file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_tool = "brush"
/// brush_color = "#1e90ff"
/// brush_width = 8.0
/// shape_fill_color = "yellow"
/// shape_stroke_color = [0, 0, 0]
/// shape_stroke_width = 2.0
///
/// [text]
/// color = "black"
/// font_size = 24.0
/// font_weight = 80.0
/// font_slant = 0.0
/// font_family = "Sans"
///
/// [canvas]
/// width = 800.0
/// height = 600.0
/// device_pixel_ratio = 1.0
/// ```
#[derive(Debug, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Brush and shape defaults
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Text tool defaults
    #[serde(default)]
    pub text: TextConfig,

    /// Canvas size for headless runs
    #[serde(default)]
    pub canvas: CanvasConfig,
}

/// Clamps `value` into `range`, warning when it was outside.
fn clamp_field(name: &str, value: &mut f64, (min, max): (f64, f64)) {
    if !value.is_finite() {
        warn!("Invalid {name} {value}, using {min:.1}");
        *value = min;
    } else if !(min..=max).contains(value) {
        warn!("Invalid {name} {value:.1}, clamping to {min:.1}-{max:.1} range");
        *value = value.clamp(min, max);
    }
}

fn check_color(name: &str, spec: &mut ColorSpec) {
    if !spec.is_valid() {
        warn!("Invalid {name} {spec:?}, falling back to black");
        *spec = ColorSpec::from("black");
    }
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value (or replaced by
    /// their default) and a warning is logged.
    ///
    /// Validated ranges:
    /// - `brush_width`: 1.0 - 100.0
    /// - `shape_stroke_width`: 0.0 - 50.0
    /// - `font_size`: 4.0 - 400.0
    /// - `font_weight`: 1.0 - 1000.0
    /// - `font_slant`: -90.0 - 90.0
    /// - `canvas.width` / `canvas.height`: 1.0 - 8192.0
    /// - `device_pixel_ratio`: 0.5 - 4.0
    pub fn validate_and_clamp(&mut self) {
        if Tool::from_id(&self.drawing.default_tool).is_none() {
            warn!(
                "Invalid default_tool '{}', falling back to 'brush'",
                self.drawing.default_tool
            );
            self.drawing.default_tool = Tool::Brush.id().to_string();
        }

        clamp_field("brush_width", &mut self.drawing.brush_width, BRUSH_WIDTH_RANGE);
        clamp_field(
            "shape_stroke_width",
            &mut self.drawing.shape_stroke_width,
            SHAPE_STROKE_WIDTH_RANGE,
        );
        check_color("brush_color", &mut self.drawing.brush_color);
        check_color("shape_fill_color", &mut self.drawing.shape_fill_color);
        check_color("shape_stroke_color", &mut self.drawing.shape_stroke_color);

        clamp_field("font_size", &mut self.text.font_size, FONT_SIZE_RANGE);
        clamp_field("font_weight", &mut self.text.font_weight, FONT_WEIGHT_RANGE);
        clamp_field("font_slant", &mut self.text.font_slant, FONT_SLANT_RANGE);
        check_color("text color", &mut self.text.color);
        if self.text.font_family.trim().is_empty() {
            warn!("Empty font_family, falling back to 'Sans'");
            self.text.font_family = "Sans".to_string();
        }

        clamp_field("canvas width", &mut self.canvas.width, CANVAS_SIZE_RANGE);
        clamp_field("canvas height", &mut self.canvas.height, CANVAS_SIZE_RANGE);
        clamp_field(
            "device_pixel_ratio",
            &mut self.canvas.device_pixel_ratio,
            DEVICE_PIXEL_RATIO_RANGE,
        );
    }

    /// Initial tool settings described by this configuration.
    pub fn tool_state(&self) -> ToolState {
        ToolState {
            active_tool: Tool::from_id(&self.drawing.default_tool),
            brush_color: self.drawing.brush_color.to_color(),
            brush_width: self.drawing.brush_width,
            shape_fill_color: self.drawing.shape_fill_color.to_color(),
            shape_stroke_color: self.drawing.shape_stroke_color.to_color(),
            shape_stroke_width: self.drawing.shape_stroke_width,
            text_color: self.text.color.to_color(),
            font_size: self.text.font_size,
            font_weight: self.text.font_weight,
            font_slant: self.text.font_slant,
            font_family: self.text.font_family.clone(),
            ..ToolState::default()
        }
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/easel/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("easel");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default path, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        // Validate and clamp values to acceptable ranges
        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Saves the configuration to `path`, creating parent directories.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created, the config cannot
    /// be serialized, or the file cannot be written.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }
}
