use crate::action::{Action, Key};
use crate::edge::edge_pan;
use glam::Vec2;

/// Snapshot of what the player is asking for this tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    /// A: turn left in third-person, strafe left otherwise.
    pub left: bool,
    /// D: turn right in third-person, strafe right otherwise.
    pub right: bool,
    /// Edge-pan direction as `(right, forward)`.
    pub pan: Vec2,
    /// Pointer motion collected while dragging.
    pub look: Vec2,
    pub scroll: f32,
    dragging: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a key transition. Returns the action a press fires, if any.
    pub fn key(&mut self, key: Key, pressed: bool) -> Option<Action> {
        match key {
            Key::W => self.forward = pressed,
            Key::S => self.backward = pressed,
            Key::A => self.left = pressed,
            Key::D => self.right = pressed,
            _ => {}
        }
        if pressed { key.action() } else { None }
    }

    pub fn set_dragging(&mut self, dragging: bool) {
        self.dragging = dragging;
    }

    /// Record pointer motion; ignored unless the look button is held.
    pub fn pointer_moved(&mut self, dx: f32, dy: f32) {
        if self.dragging {
            self.look += Vec2::new(dx, dy);
        }
    }

    pub fn scrolled(&mut self, amount: f32) {
        self.scroll += amount;
    }

    /// Update edge panning from the cursor position in window pixels.
    pub fn cursor_at(&mut self, cursor: Vec2, window: Vec2) {
        self.pan = edge_pan(cursor, window);
    }

    /// The cursor left the window; stop panning.
    pub fn cursor_left(&mut self) {
        self.pan = Vec2::ZERO;
    }

    /// Clear the per-tick deltas. Held intents and panning persist.
    pub fn end_tick(&mut self) {
        self.look = Vec2::ZERO;
        self.scroll = 0.0;
    }

    /// Release every held key, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.forward = false;
        self.backward = false;
        self.left = false;
        self.right = false;
        self.dragging = false;
        self.pan = Vec2::ZERO;
        tracing::debug!("released all held input");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_sets_and_release_clears_intent() {
        let mut input = InputState::new();
        assert_eq!(input.key(Key::W, true), None);
        assert!(input.forward);
        input.key(Key::W, false);
        assert!(!input.forward);
    }

    #[test]
    fn action_fires_on_press_only() {
        let mut input = InputState::new();
        assert_eq!(input.key(Key::E, true), Some(Action::Attack));
        assert_eq!(input.key(Key::E, false), None);
    }

    #[test]
    fn look_only_while_dragging() {
        let mut input = InputState::new();
        input.pointer_moved(5.0, 5.0);
        assert_eq!(input.look, Vec2::ZERO);
        input.set_dragging(true);
        input.pointer_moved(5.0, -2.0);
        input.pointer_moved(1.0, 1.0);
        assert_eq!(input.look, Vec2::new(6.0, -1.0));
    }

    #[test]
    fn end_tick_keeps_held_keys() {
        let mut input = InputState::new();
        input.key(Key::A, true);
        input.set_dragging(true);
        input.pointer_moved(3.0, 0.0);
        input.scrolled(1.0);
        input.end_tick();
        assert!(input.left);
        assert_eq!(input.look, Vec2::ZERO);
        assert_eq!(input.scroll, 0.0);
    }

    #[test]
    fn release_all_clears_intents() {
        let mut input = InputState::new();
        input.key(Key::D, true);
        input.cursor_at(Vec2::new(0.0, 100.0), Vec2::new(800.0, 600.0));
        input.release_all();
        assert!(!input.right);
        assert_eq!(input.pan, Vec2::ZERO);
    }
}
