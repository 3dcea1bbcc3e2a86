use crate::input::events::{PointerPhase, TouchEvent};

use super::InputState;

impl InputState {
    /// Processes a touch event through the pointer transitions.
    ///
    /// Only the first contact drives the gesture. End and cancel events
    /// carry no position and finish the gesture at its last point.
    ///
    /// Returns `true` when the shell should suppress the platform's default
    /// handling (scroll, pinch zoom) because a gesture owns the touch.
    pub fn on_touch(&mut self, event: &TouchEvent) -> bool {
        match event.phase.as_pointer() {
            PointerPhase::Down => {
                if let Some(p) = event.primary() {
                    self.on_pointer_down(p.x, p.y);
                }
                !self.state.is_idle()
            }
            PointerPhase::Move => {
                if let Some(p) = event.primary() {
                    self.on_pointer_move(p.x, p.y);
                }
                !self.state.is_idle()
            }
            PointerPhase::Up | PointerPhase::Leave => {
                let owned = self.state.is_pointer_gesture();
                self.end_pointer_gesture();
                owned
            }
        }
    }
}
