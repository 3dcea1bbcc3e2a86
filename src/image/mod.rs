//! Image import/export: data URIs, PNG decoding, and the async loader.
//!
//! PNG data URIs are the only serialization boundary of the editor. Export is
//! synchronous; import decodes on a blocking worker and hands the pixels back
//! over a channel so the drawing thread never waits on a decode.

pub mod data_uri;
pub mod loader;
pub mod types;

pub use data_uri::{decode_png, decode_png_data_uri, encode_png_data_uri, parse_data_uri};
pub use loader::{ImageLoader, LoadId, LoadOutcome};
pub use types::{ImageError, ImageFormat};
