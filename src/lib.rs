//! Raster drawing engine for an interactive image editor.
//!
//! The editor keeps one mutable pixel buffer and drives it from pointer and
//! touch input: freehand strokes, shape preview-then-commit, a text overlay,
//! and a brightness / contrast / saturation pipeline. [`InputState`] is the
//! entry point a shell talks to; the remaining modules are reusable on their own.

pub mod config;
pub mod draw;
pub mod filter;
pub mod image;
pub mod input;
pub mod overlay;
pub mod script;
pub mod util;

pub use config::Config;
pub use input::InputState;
