mod actions;
mod core;
mod pointer;
mod touch;
#[cfg(test)]
mod tests;

pub use core::{DrawingState, InputState};
