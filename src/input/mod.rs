//! Input handling and the gesture state machine.
//!
//! This module turns pointer and touch events plus shell requests into canvas
//! operations. It holds the published tool settings and the single gesture in
//! progress (idle, stroking, shape preview, text editing).

pub mod events;
pub mod state;
pub mod tool;
pub mod tool_state;

// Re-export commonly used types at module level
pub use events::{PointerEvent, PointerPhase, TouchEvent, TouchPhase};
pub use state::{DrawingState, InputState};
pub use tool::Tool;
pub use tool_state::{PropertyChange, PropertyError, ToolState};
