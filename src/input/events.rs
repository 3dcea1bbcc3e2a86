//! Pointer and touch event types.
//!
//! Coordinates are canvas-local logical pixels. The shell is responsible for
//! subtracting the canvas element's client offset before dispatching.

use crate::util::Point;
use serde::Deserialize;

/// Pointer event kinds driving the gesture state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    /// Pointer left the canvas; ends a gesture like `Up`
    Leave,
}

/// A single pointer event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub position: Point,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, x: f64, y: f64) -> Self {
        Self {
            phase,
            position: Point::new(x, y),
        }
    }
}

/// Touch event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

impl TouchPhase {
    /// Pointer phase this touch phase maps to.
    pub fn as_pointer(self) -> PointerPhase {
        match self {
            TouchPhase::Start => PointerPhase::Down,
            TouchPhase::Move => PointerPhase::Move,
            TouchPhase::End => PointerPhase::Up,
            TouchPhase::Cancel => PointerPhase::Leave,
        }
    }
}

/// A touch event; only the first contact point drives gestures.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent {
    pub phase: TouchPhase,
    pub touches: Vec<Point>,
}

impl TouchEvent {
    pub fn new(phase: TouchPhase, touches: Vec<Point>) -> Self {
        Self { phase, touches }
    }

    pub fn primary(&self) -> Option<Point> {
        self.touches.first().copied()
    }
}
