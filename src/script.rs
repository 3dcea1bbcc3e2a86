//! Headless replay of editor sessions.
//!
//! A script is a TOML file with an optional `[canvas]` table and a list of
//! `[[step]]` tables, each tagged by `action`. Steps are fed to an
//! [`InputState`] in order, exactly as a shell would deliver them.
//!
//! ```toml
//! [canvas]
//! width = 200.0
//! height = 120.0
//!
//! [[step]]
//! action = "property"
//! name = "brushColor"
//! value = "#ff0000"
//!
//! [[step]]
//! action = "pointer"
//! phase = "down"
//! x = 10.0
//! y = 10.0
//! ```

use crate::config::CanvasConfig;
use crate::image::encode_png_data_uri;
use crate::input::{InputState, PointerEvent, PointerPhase, TouchEvent, TouchPhase};
use crate::overlay::OverlayLayout;
use crate::util::Point;
use anyhow::{Context, Result, bail};
use log::{debug, info, warn};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Canvas size override for one script.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ScriptCanvas {
    pub width: f64,
    pub height: f64,
    #[serde(default = "default_ratio")]
    pub device_pixel_ratio: f64,
}

fn default_ratio() -> f64 {
    1.0
}

impl From<&CanvasConfig> for ScriptCanvas {
    fn from(config: &CanvasConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            device_pixel_ratio: config.device_pixel_ratio,
        }
    }
}

/// One scripted editor event.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Resize {
        width: f64,
        height: f64,
        #[serde(default = "default_ratio")]
        device_pixel_ratio: f64,
    },
    Layout {
        canvas: [f64; 2],
        wrapper: [f64; 2],
    },
    Tool {
        id: String,
    },
    Property {
        name: String,
        value: serde_json::Value,
    },
    Pointer {
        phase: PointerPhase,
        #[serde(default)]
        x: f64,
        #[serde(default)]
        y: f64,
    },
    Touch {
        phase: TouchPhase,
        #[serde(default)]
        points: Vec<[f64; 2]>,
    },
    /// Replaces the overlay draft
    Text {
        value: String,
    },
    /// Reports the overlay widget as mounted
    Attach,
    FinishText,
    CancelText,
    Filter {
        brightness: f64,
        contrast: f64,
        saturation: f64,
    },
    Clear,
    /// Loads a PNG (path relative to the script) and waits for it to be drawn
    Load {
        path: PathBuf,
    },
}

/// A parsed replay script.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub canvas: Option<ScriptCanvas>,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

/// What a replay did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub steps: usize,
    pub images_drawn: usize,
    pub texts_committed: usize,
    pub rejected_properties: usize,
}

impl Script {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).context("Failed to parse replay script")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::from_toml_str(&source).with_context(|| format!("Invalid script {}", path.display()))
    }

    /// Runs every step against `editor`.
    ///
    /// The canvas is sized from the script's `[canvas]` table, falling back to
    /// `default_canvas`. Relative image paths resolve against `base_dir`.
    ///
    /// # Errors
    /// Returns an error when an image file cannot be read or the image loader
    /// is not running. Rejected property values are logged and counted.
    pub async fn run(
        &self,
        editor: &mut InputState,
        default_canvas: ScriptCanvas,
        base_dir: &Path,
    ) -> Result<RunSummary> {
        let canvas = self.canvas.unwrap_or(default_canvas);
        if !editor.resize(canvas.width, canvas.height, canvas.device_pixel_ratio) {
            bail!(
                "Cannot create a {}x{} canvas",
                canvas.width,
                canvas.height
            );
        }

        let mut summary = RunSummary::default();
        for (index, step) in self.steps.iter().enumerate() {
            debug!("Step {}: {:?}", index + 1, step);
            self.apply(step, editor, base_dir, &mut summary)
                .await
                .with_context(|| format!("Step {} ({:?}) failed", index + 1, step))?;
            summary.steps += 1;
        }

        info!(
            "Replayed {} steps ({} images, {} texts)",
            summary.steps, summary.images_drawn, summary.texts_committed
        );
        Ok(summary)
    }

    async fn apply(
        &self,
        step: &Step,
        editor: &mut InputState,
        base_dir: &Path,
        summary: &mut RunSummary,
    ) -> Result<()> {
        match step {
            Step::Resize {
                width,
                height,
                device_pixel_ratio,
            } => {
                if !editor.resize(*width, *height, *device_pixel_ratio) {
                    warn!("Ignored resize to {width}x{height}");
                }
            }
            Step::Layout { canvas, wrapper } => editor.update_layout(OverlayLayout {
                canvas_origin: Point::new(canvas[0], canvas[1]),
                wrapper_origin: Point::new(wrapper[0], wrapper[1]),
            }),
            Step::Tool { id } => editor.on_tool_selected(id),
            Step::Property { name, value } => {
                if let Err(err) = editor.on_property_change(name, value) {
                    warn!("{err}");
                    summary.rejected_properties += 1;
                }
            }
            Step::Pointer { phase, x, y } => editor.on_pointer(PointerEvent::new(*phase, *x, *y)),
            Step::Touch { phase, points } => {
                let touches = points.iter().map(|[x, y]| Point::new(*x, *y)).collect();
                editor.on_touch(&TouchEvent::new(*phase, touches));
            }
            Step::Text { value } => editor.set_text_draft(value),
            Step::Attach => {
                if editor.overlay_attached().is_none() {
                    debug!("No overlay waiting for focus");
                }
            }
            Step::FinishText => {
                if editor.finish_text_input().is_some() {
                    summary.texts_committed += 1;
                }
            }
            Step::CancelText => editor.cancel_text_input(),
            Step::Filter {
                brightness,
                contrast,
                saturation,
            } => editor.apply_filter(*brightness, *contrast, *saturation),
            Step::Clear => editor.clear_canvas(),
            Step::Load { path } => {
                let path = base_dir.join(path);
                let png = fs::read(&path)
                    .with_context(|| format!("Failed to read image {}", path.display()))?;
                editor.load_image(encode_png_data_uri(&png))?;
                summary.images_drawn += editor.finish_image_loads().await;
            }
        }
        Ok(())
    }
}
