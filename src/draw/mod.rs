//! Raster drawing primitives (Cairo-based).
//!
//! This module owns everything that touches pixels:
//! - [`CanvasSurface`]: the pixel buffer and its draw operations
//! - [`SnapshotManager`]: capture/restore around shape previews
//! - [`Color`], [`FontDescriptor`], [`ShapeKind`]: drawing parameters
//! - [`PixelBuffer`]: straight-alpha RGBA exchange format
//! - Rendering functions for Cairo contexts

pub mod color;
pub mod font;
pub mod pixels;
pub mod render;
pub mod shape;
pub mod snapshot;
pub mod surface;

// Re-export commonly used types at module level
pub use color::Color;
pub use font::FontDescriptor;
pub use pixels::PixelBuffer;
pub use shape::{ShapeGeometry, ShapeKind, ShapeStyle};
pub use snapshot::{Snapshot, SnapshotManager};
pub use surface::{BACKGROUND, CanvasSurface, SurfaceError};

pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, WHITE, YELLOW};
