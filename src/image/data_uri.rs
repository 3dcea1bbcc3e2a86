//! PNG data URI encoding and decoding.

use super::types::{ImageError, ImageFormat};
use crate::draw::PixelBuffer;
use base64::Engine;

const PNG_PREFIX: &str = "data:image/png;base64,";

/// Decoded contents of a `data:` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    /// Media type, `text/plain` when omitted
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Wraps PNG bytes in a `data:image/png;base64,` URI.
pub fn encode_png_data_uri(png: &[u8]) -> String {
    let mut uri = String::with_capacity(PNG_PREFIX.len() + png.len().div_ceil(3) * 4);
    uri.push_str(PNG_PREFIX);
    base64::engine::general_purpose::STANDARD.encode_string(png, &mut uri);
    uri
}

/// Parses a data URI such as `data:image/png;base64,iVBORw0KGgo...`.
///
/// Payloads without `;base64` are percent-decoded; a stray `%` that does not
/// start a valid escape is kept literally, as browsers do.
pub fn parse_data_uri(uri: &str) -> Result<DataUri, ImageError> {
    let rest = uri.trim().strip_prefix("data:").ok_or(ImageError::NotDataUri)?;
    let (metadata, payload) = rest
        .split_once(',')
        .ok_or_else(|| ImageError::MalformedDataUri("missing comma".to_string()))?;

    let mut parts = metadata.split(';');
    let mime = match parts.next() {
        Some(m) if !m.is_empty() => m.to_ascii_lowercase(),
        _ => "text/plain".to_string(),
    };
    let is_base64 = parts.any(|p| p.eq_ignore_ascii_case("base64"));

    let bytes = if is_base64 {
        // Whitespace may sneak in from line-wrapped sources.
        let compact: String = payload.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        base64::engine::general_purpose::STANDARD.decode(compact)?
    } else {
        percent_encoding::percent_decode_str(payload).collect()
    };

    Ok(DataUri { mime, bytes })
}

/// Decodes PNG bytes into a straight-alpha buffer.
pub fn decode_png(bytes: &[u8]) -> Result<PixelBuffer, ImageError> {
    match ImageFormat::from_magic_bytes(bytes) {
        ImageFormat::Png => {}
        other => return Err(ImageError::UnsupportedFormat(other)),
    }

    let mut reader = std::io::Cursor::new(bytes);
    let decoded = cairo::ImageSurface::create_from_png(&mut reader)
        .map_err(|e| ImageError::Decode(e.to_string()))?;
    let (width, height) = (decoded.width(), decoded.height());

    // Normalize RGB24 and friends to ARGB32 so alpha is always defined.
    let target = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)
        .map_err(|e| ImageError::Decode(e.to_string()))?;
    {
        let ctx = cairo::Context::new(&target).map_err(|e| ImageError::Decode(e.to_string()))?;
        ctx.set_source_surface(&decoded, 0.0, 0.0)
            .map_err(|e| ImageError::Decode(e.to_string()))?;
        ctx.set_operator(cairo::Operator::Source);
        ctx.paint().map_err(|e| ImageError::Decode(e.to_string()))?;
    }
    target.flush();

    let stride = target.stride() as usize;
    let mut pixels = None;
    target
        .with_data(|data| {
            pixels = Some(PixelBuffer::from_cairo_argb(
                width as u32,
                height as u32,
                stride,
                data,
            ));
        })
        .map_err(|e| ImageError::Decode(e.to_string()))?;
    pixels.ok_or_else(|| ImageError::Decode("surface had no data".to_string()))
}

/// Parses a data URI and decodes its PNG payload.
pub fn decode_png_data_uri(uri: &str) -> Result<PixelBuffer, ImageError> {
    let parsed = parse_data_uri(uri)?;
    decode_png(&parsed.bytes)
}
