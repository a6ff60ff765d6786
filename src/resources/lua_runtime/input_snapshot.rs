//! Keyboard state as seen by Lua.
//!
//! [`InputSnapshot`] is copied from [`InputState`] once per frame, before the
//! script pass, so every script of a frame observes the same keys.

use rustc_hash::FxHashSet;

use crate::resources::input::InputState;

/// Frozen key codes for one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    held: FxHashSet<i32>,
    pressed: FxHashSet<i32>,
}

impl InputSnapshot {
    pub fn from_input_state(input: &InputState) -> Self {
        Self {
            held: input.held_codes().collect(),
            pressed: input.pressed_codes().collect(),
        }
    }

    /// Whether the key with raylib code `code` is held.
    pub fn key_down(&self, code: i32) -> bool {
        self.held.contains(&code)
    }

    /// Whether the key with raylib code `code` went down this frame.
    pub fn key_pressed(&self, code: i32) -> bool {
        self.pressed.contains(&code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raylib::prelude::KeyboardKey;

    #[test]
    fn test_snapshot_copies_input_state() {
        let mut input = InputState::default();
        input.set_held(KeyboardKey::KEY_I, true);
        input.set_pressed(KeyboardKey::KEY_SPACE, true);

        let snapshot = InputSnapshot::from_input_state(&input);
        assert!(snapshot.key_down(KeyboardKey::KEY_I as i32));
        assert!(!snapshot.key_down(KeyboardKey::KEY_K as i32));
        assert!(snapshot.key_pressed(KeyboardKey::KEY_SPACE as i32));
        assert!(!snapshot.key_pressed(KeyboardKey::KEY_I as i32));
    }

    #[test]
    fn test_snapshot_is_frozen() {
        let mut input = InputState::default();
        input.set_held(KeyboardKey::KEY_I, true);
        let snapshot = InputSnapshot::from_input_state(&input);
        input.clear();
        assert!(snapshot.key_down(KeyboardKey::KEY_I as i32));
    }

    #[test]
    fn test_unknown_codes_are_up() {
        let snapshot = InputSnapshot::default();
        assert!(!snapshot.key_down(-1));
        assert!(!snapshot.key_pressed(100_000));
    }
}
