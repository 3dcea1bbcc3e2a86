//! The canvas surface: sole owner of the pixel buffer.
//!
//! All pixel mutation goes through [`CanvasSurface`]. Geometry arguments are in
//! logical pixels; every drawing context is scaled by the device pixel ratio,
//! so a 100×100 logical canvas at ratio 2 is backed by 200×200 device pixels.
//! Raw access ([`CanvasSurface::get_buffer`], [`CanvasSurface::put_buffer`])
//! works in device pixels.

use super::color::{Color, WHITE};
use super::font::FontDescriptor;
use super::pixels::PixelBuffer;
use super::render;
use super::shape::{ShapeGeometry, ShapeKind, ShapeStyle};
use log::{debug, warn};
use thiserror::Error;

/// Background the canvas is cleared to; erasing paints with it.
pub const BACKGROUND: Color = WHITE;

/// Errors from raw surface access.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("canvas has no backing buffer yet")]
    NotReady,

    #[error("buffer is {actual_w}x{actual_h}, canvas is {expected_w}x{expected_h}")]
    SizeMismatch {
        expected_w: u32,
        expected_h: u32,
        actual_w: u32,
        actual_h: u32,
    },

    #[error("cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("surface data is borrowed: {0}")]
    Borrow(#[from] cairo::BorrowError),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] cairo::IoError),
}

/// Mutable raster canvas backed by a Cairo image surface.
pub struct CanvasSurface {
    surface: Option<cairo::ImageSurface>,
    logical_width: f64,
    logical_height: f64,
    device_pixel_ratio: f64,
}

impl Default for CanvasSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasSurface {
    /// Creates a surface with no backing buffer; it becomes usable after
    /// the first successful [`resize`](Self::resize).
    pub fn new() -> Self {
        Self {
            surface: None,
            logical_width: 0.0,
            logical_height: 0.0,
            device_pixel_ratio: 1.0,
        }
    }

    /// Whether a backing buffer exists.
    pub fn is_ready(&self) -> bool {
        self.surface.is_some()
    }

    /// Buffer size in device pixels.
    pub fn size_px(&self) -> Option<(u32, u32)> {
        self.surface
            .as_ref()
            .map(|s| (s.width() as u32, s.height() as u32))
    }

    /// Canvas size in logical pixels.
    pub fn logical_size(&self) -> (f64, f64) {
        (self.logical_width, self.logical_height)
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    /// Reallocates the buffer and clears it to opaque white.
    ///
    /// Prior content is discarded. Returns `false` (and changes nothing) when
    /// either dimension is not positive or the allocation fails.
    pub fn resize(&mut self, width: f64, height: f64, device_pixel_ratio: f64) -> bool {
        if !(width > 0.0 && height > 0.0) {
            debug!("Ignoring resize to {width}x{height}");
            return false;
        }

        let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        let px_w = (width * dpr).round().max(1.0) as i32;
        let px_h = (height * dpr).round().max(1.0) as i32;

        let surface = match cairo::ImageSurface::create(cairo::Format::ARgb32, px_w, px_h) {
            Ok(surface) => surface,
            Err(err) => {
                warn!("Failed to allocate {px_w}x{px_h} canvas: {err}");
                return false;
            }
        };

        self.surface = Some(surface);
        self.logical_width = width;
        self.logical_height = height;
        self.device_pixel_ratio = dpr;
        self.clear();

        debug!("Canvas resized to {width}x{height} @ {dpr}x ({px_w}x{px_h} px)");
        true
    }

    /// Fills the whole buffer with the background color.
    pub fn clear(&mut self) {
        self.with_context(false, |ctx| render::fill_solid(ctx, BACKGROUND));
    }

    /// Draws one segment of a freehand stroke.
    ///
    /// Erase mode paints the background color instead of removing alpha.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_segment(
        &mut self,
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        color: Color,
        width: f64,
        erase: bool,
    ) {
        let color = if erase { BACKGROUND } else { color };
        self.with_context(true, |ctx| {
            render::render_segment(ctx, x0, y0, x1, y1, color, width)
        });
    }

    /// Draws a filled and outlined shape for a drag from `(x0, y0)` to `(x1, y1)`.
    ///
    /// Returns the normalized geometry that was drawn.
    pub fn commit_shape(
        &mut self,
        kind: ShapeKind,
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        style: &ShapeStyle,
    ) -> Option<ShapeGeometry> {
        let geometry = ShapeGeometry::from_drag(kind, x0, y0, x1, y1);
        self.with_context(true, |ctx| render::render_shape(ctx, &geometry, style))?;
        Some(geometry)
    }

    /// Rasterizes text with its visual top-left at `(x, y)`.
    ///
    /// Returns the baseline Y the text was placed on.
    #[allow(clippy::too_many_arguments)]
    pub fn render_text(
        &mut self,
        x: f64,
        y: f64,
        text: &str,
        color: Color,
        font_size_px: f64,
        font: &FontDescriptor,
    ) -> Option<f64> {
        self.with_context(true, |ctx| {
            render::render_text(ctx, x, y, text, color, font_size_px, font)
                .baseline_for_top(y, font_size_px)
        })
    }

    /// Copies the full buffer out as straight-alpha RGBA.
    pub fn get_buffer(&self) -> Option<PixelBuffer> {
        let surface = self.surface.as_ref()?;
        surface.flush();

        let width = surface.width() as u32;
        let height = surface.height() as u32;
        let stride = surface.stride() as usize;
        let mut out = None;
        if let Err(err) = surface.with_data(|data| {
            out = Some(PixelBuffer::from_cairo_argb(width, height, stride, data));
        }) {
            warn!("Could not read canvas pixels: {err}");
        }
        out
    }

    /// Overwrites the full buffer. Dimensions must match exactly.
    pub fn put_buffer(&mut self, buffer: &PixelBuffer) -> Result<(), SurfaceError> {
        let surface = self.surface.as_mut().ok_or(SurfaceError::NotReady)?;
        let (expected_w, expected_h) = (surface.width() as u32, surface.height() as u32);
        if (buffer.width(), buffer.height()) != (expected_w, expected_h) {
            return Err(SurfaceError::SizeMismatch {
                expected_w,
                expected_h,
                actual_w: buffer.width(),
                actual_h: buffer.height(),
            });
        }

        surface.flush();
        let stride = surface.stride() as usize;
        let mut data = surface.data()?;
        buffer.write_cairo_argb(stride, &mut data);
        // Dropping the data guard marks the surface dirty.
        drop(data);
        Ok(())
    }

    /// Encodes the buffer as PNG bytes.
    pub fn export_png(&self) -> Result<Vec<u8>, SurfaceError> {
        let surface = self.surface.as_ref().ok_or(SurfaceError::NotReady)?;
        let mut bytes = Vec::new();
        surface.write_to_png(&mut bytes)?;
        Ok(bytes)
    }

    /// Replaces all content with `image`, stretched to the full buffer.
    ///
    /// No aspect ratio is preserved. Returns `false` when there is no buffer.
    pub fn draw_image_stretched(&mut self, image: &PixelBuffer) -> Result<bool, SurfaceError> {
        let Some((dst_w, dst_h)) = self.size_px() else {
            return Ok(false);
        };
        if image.width() == 0 || image.height() == 0 {
            return Ok(false);
        }

        let mut source = cairo::ImageSurface::create(
            cairo::Format::ARgb32,
            image.width() as i32,
            image.height() as i32,
        )?;
        {
            let stride = source.stride() as usize;
            let mut data = source.data()?;
            image.write_cairo_argb(stride, &mut data);
        }

        let drawn = self.with_context(false, |ctx| -> Result<(), cairo::Error> {
            ctx.scale(
                dst_w as f64 / image.width() as f64,
                dst_h as f64 / image.height() as f64,
            );
            ctx.set_source_surface(&source, 0.0, 0.0)?;
            let pattern = ctx.source();
            pattern.set_filter(cairo::Filter::Bilinear);
            pattern.set_extend(cairo::Extend::Pad);
            ctx.set_operator(cairo::Operator::Source);
            ctx.paint()
        });

        match drawn {
            Some(result) => {
                result?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Runs `draw` against a fresh context, optionally scaled to logical pixels.
    ///
    /// The context is dropped before returning so the surface data stays
    /// exclusively owned between operations.
    fn with_context<R>(&self, logical: bool, draw: impl FnOnce(&cairo::Context) -> R) -> Option<R> {
        let surface = self.surface.as_ref()?;
        let ctx = match cairo::Context::new(surface) {
            Ok(ctx) => ctx,
            Err(err) => {
                warn!("Failed to create drawing context: {err}");
                return None;
            }
        };
        if logical {
            ctx.scale(self.device_pixel_ratio, self.device_pixel_ratio);
        }
        let out = draw(&ctx);
        drop(ctx);
        surface.flush();
        Some(out)
    }
}
