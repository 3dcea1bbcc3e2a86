use crate::image::{ImageError, LoadId, LoadOutcome, encode_png_data_uri};
use crate::input::tool::Tool;
use crate::input::tool_state::{PropertyChange, PropertyError};
use crate::overlay::{FocusRequest, OverlayStyle, TextCommit};
use log::{debug, info, warn};
use serde_json::Value;

use super::{DrawingState, InputState};

impl InputState {
    /// Selects a tool by toolbar id.
    ///
    /// Unknown ids are published as "no tool", which makes pointer input a
    /// no-op until a known tool is chosen.
    pub fn on_tool_selected(&mut self, id: &str) {
        let tool = Tool::from_id(id);
        if tool.is_none() {
            warn!("Unknown tool '{id}'; pointer input disabled until a known tool is selected");
        }
        self.select_tool(tool);
    }

    /// Publishes a new active tool.
    ///
    /// A live shape preview is rolled back and a stroke simply ends. An open
    /// text overlay stays open.
    pub fn select_tool(&mut self, tool: Option<Tool>) {
        if self.tool_state.active_tool == tool {
            return;
        }
        self.abandon_pointer_gesture();
        let next = self.tool_state.with_tool(tool);
        self.publish(next);
        debug!("Active tool: {:?}", tool.map(Tool::id));
    }

    /// Applies a named property change coming from the properties panel.
    ///
    /// On error the published state is left unchanged.
    pub fn on_property_change(&mut self, property: &str, value: &Value) -> Result<(), PropertyError> {
        let change = PropertyChange::from_json(property, value)?;
        self.apply_property(change);
        Ok(())
    }

    pub fn apply_property(&mut self, change: PropertyChange) {
        let next = self.tool_state.with_change(change);
        self.publish(next);
        self.needs_redraw = true;
    }

    /// Exports the canvas as a PNG data URI; `None` before the first resize.
    pub fn get_image_as_base64(&self) -> Option<String> {
        if !self.surface.is_ready() {
            return None;
        }
        match self.surface.export_png() {
            Ok(png) => Some(encode_png_data_uri(&png)),
            Err(err) => {
                warn!("PNG export failed: {err}");
                None
            }
        }
    }

    /// Starts decoding a PNG data URI in the background.
    ///
    /// The decoded image is drawn once [`poll_image_loads`](Self::poll_image_loads)
    /// or [`finish_image_loads`](Self::finish_image_loads) picks it up.
    pub fn load_image(&mut self, data_uri: impl Into<String>) -> Result<LoadId, ImageError> {
        let loader = self.loader.as_mut().ok_or(ImageError::LoaderUnavailable)?;
        let id = loader.request(data_uri);
        debug!("Image load {id:?} queued");
        Ok(id)
    }

    /// Number of image loads not yet applied.
    pub fn pending_image_loads(&self) -> usize {
        self.loader.as_ref().map_or(0, |loader| loader.pending())
    }

    /// Applies every finished load without waiting. Returns how many were drawn.
    pub fn poll_image_loads(&mut self) -> usize {
        let mut drawn = 0;
        while let Some(outcome) = self.loader.as_mut().and_then(|loader| loader.try_next()) {
            if self.apply_loaded_image(outcome) {
                drawn += 1;
            }
        }
        drawn
    }

    /// Waits for all queued loads and applies them in completion order.
    pub async fn finish_image_loads(&mut self) -> usize {
        let mut drawn = 0;
        loop {
            let Some(loader) = self.loader.as_mut() else {
                break;
            };
            let Some(outcome) = loader.next().await else {
                break;
            };
            if self.apply_loaded_image(outcome) {
                drawn += 1;
            }
        }
        drawn
    }

    fn apply_loaded_image(&mut self, outcome: LoadOutcome) -> bool {
        let LoadOutcome { id, result } = outcome;
        let image = match result {
            Ok(image) => image,
            Err(err) => {
                warn!("Image load {id:?} failed: {err}");
                return false;
            }
        };

        // The canvas may have been resized or never created since the request.
        let Some((width, height)) = self.surface.size_px() else {
            debug!("Image load {id:?} finished before the canvas exists; dropping");
            return false;
        };

        self.abandon_pointer_gesture();
        match self.surface.draw_image_stretched(&image) {
            Ok(true) => {
                info!(
                    "Loaded {}x{} image stretched to {width}x{height}",
                    image.width(),
                    image.height()
                );
                self.needs_redraw = true;
                true
            }
            Ok(false) => false,
            Err(err) => {
                warn!("Drawing image {id:?} failed: {err}");
                false
            }
        }
    }

    /// Fills the canvas with the background color.
    pub fn clear_canvas(&mut self) {
        if !self.surface.is_ready() {
            return;
        }
        self.abandon_pointer_gesture();
        self.surface.clear();
        self.needs_redraw = true;
    }

    /// Sets the three adjustments and bakes them into the canvas.
    pub fn apply_filter(&mut self, brightness: f64, contrast: f64, saturation: f64) {
        let next = self
            .tool_state
            .with_change(PropertyChange::Brightness(brightness))
            .with_change(PropertyChange::Contrast(contrast))
            .with_change(PropertyChange::Saturation(saturation));
        self.publish(next);
        self.apply_filters_to_canvas();
    }

    /// Bakes the published adjustments into the canvas, then resets them to
    /// neutral so the preview no longer applies on top.
    pub fn apply_filters_to_canvas(&mut self) {
        let adjustments = self.tool_state.adjustments();
        self.abandon_pointer_gesture();
        let Some(mut buffer) = self.surface.get_buffer() else {
            return;
        };

        adjustments.apply(&mut buffer);
        if let Err(err) = self.surface.put_buffer(&buffer) {
            warn!("Writing filtered pixels failed: {err}");
            return;
        }
        info!("Applied filter: {}", adjustments.css_filter());

        let next = self.tool_state.with_neutral_adjustments();
        self.publish(next);
        self.needs_redraw = true;
    }

    /// Preview descriptor for the published adjustments; the canvas is untouched.
    pub fn get_filter_style(&self) -> String {
        self.tool_state.adjustments().css_filter()
    }

    /// Replaces the overlay's draft text.
    pub fn set_text_draft(&mut self, text: &str) {
        if let DrawingState::TextEditing(overlay) = &mut self.state {
            overlay.set_draft(text);
        }
    }

    /// The shell mounted the text widget; yields the focus request once.
    pub fn overlay_attached(&mut self) -> Option<FocusRequest> {
        match &mut self.state {
            DrawingState::TextEditing(overlay) => overlay.attached(),
            _ => None,
        }
    }

    /// Styling for the text widget from the published settings.
    pub fn overlay_style(&self) -> OverlayStyle {
        let settings = &self.tool_state;
        OverlayStyle::new(settings.font_size, settings.text_color, &settings.font())
    }

    /// Confirms the overlay and rasterizes its text.
    ///
    /// Blank drafts close the overlay without drawing. Returns what was drawn.
    pub fn finish_text_input(&mut self) -> Option<TextCommit> {
        let DrawingState::TextEditing(overlay) =
            std::mem::replace(&mut self.state, DrawingState::Idle)
        else {
            return None;
        };
        self.needs_redraw = true;

        let commit = overlay.into_commit(&self.layout)?;
        let settings = self.tool_state();
        let baseline = self.surface.render_text(
            commit.position.x,
            commit.position.y,
            &commit.text,
            settings.text_color,
            settings.font_size,
            &settings.font(),
        )?;
        debug!(
            "Committed text {:?} at ({:.1}, {:.1}), baseline {baseline:.1}",
            commit.text, commit.position.x, commit.position.y
        );
        Some(commit)
    }

    /// Closes the overlay without drawing.
    pub fn cancel_text_input(&mut self) {
        if matches!(self.state, DrawingState::TextEditing(_)) {
            self.state = DrawingState::Idle;
            self.needs_redraw = true;
        }
    }
}
