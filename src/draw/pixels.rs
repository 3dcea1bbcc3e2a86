//! Straight-alpha RGBA8 pixel buffer used for raw canvas access.
//!
//! Cairo stores `ARgb32` pixels premultiplied in native-endian 32-bit words.
//! [`PixelBuffer`] is the exchange format handed to snapshot, filtering, and
//! image loading code: row-major, four bytes per pixel, no row padding.

use super::color::Color;

/// Width × height × 4 raster with straight (non-premultiplied) alpha.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocates a buffer filled with a single color.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let px = color.to_rgba8();
        let count = width as usize * height as usize;
        let mut data = Vec::with_capacity(count * 4);
        for _ in 0..count {
            data.extend_from_slice(&px);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Wraps raw RGBA bytes; returns `None` if the length does not match.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        if data.len() != width as usize * height as usize * 4 {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Returns the RGBA value at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Overwrites the pixel at `(x, y)`; out-of-range writes are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.data[i..i + 4].copy_from_slice(&rgba);
    }

    /// Converts premultiplied Cairo `ARgb32` rows into a straight-alpha buffer.
    pub(crate) fn from_cairo_argb(width: u32, height: u32, stride: usize, src: &[u8]) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * 4);
        for row in 0..height as usize {
            let line = &src[row * stride..row * stride + width as usize * 4];
            for word in line.chunks_exact(4) {
                let argb = u32::from_ne_bytes([word[0], word[1], word[2], word[3]]);
                let a = (argb >> 24) as u8;
                let r = (argb >> 16) as u8;
                let g = (argb >> 8) as u8;
                let b = argb as u8;
                data.extend_from_slice(&[
                    unpremultiply(r, a),
                    unpremultiply(g, a),
                    unpremultiply(b, a),
                    a,
                ]);
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Writes this buffer into premultiplied Cairo `ARgb32` rows.
    pub(crate) fn write_cairo_argb(&self, stride: usize, dst: &mut [u8]) {
        let row_bytes = self.width as usize * 4;
        for row in 0..self.height as usize {
            let src = &self.data[row * row_bytes..(row + 1) * row_bytes];
            let line = &mut dst[row * stride..row * stride + row_bytes];
            for (px, out) in src.chunks_exact(4).zip(line.chunks_exact_mut(4)) {
                let a = px[3];
                let argb = (a as u32) << 24
                    | (premultiply(px[0], a) as u32) << 16
                    | (premultiply(px[1], a) as u32) << 8
                    | premultiply(px[2], a) as u32;
                out.copy_from_slice(&argb.to_ne_bytes());
            }
        }
    }
}

fn premultiply(channel: u8, alpha: u8) -> u8 {
    ((channel as u32 * alpha as u32 + 127) / 255) as u8
}

fn unpremultiply(channel: u8, alpha: u8) -> u8 {
    match alpha {
        0 => 0,
        255 => channel,
        a => ((channel as u32 * 255 + a as u32 / 2) / a as u32).min(255) as u8,
    }
}
