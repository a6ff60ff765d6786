//! Per-frame keyboard input resource.
//!
//! [`InputState`] holds the raylib key codes that are down this frame and the
//! ones that went down this frame. It is refreshed once per frame by
//! [`update_input_state`](crate::systems::input::update_input_state) and read
//! by the frame binder (through [`KeyState`]), the camera controller, and the
//! script host.
use bevy_ecs::prelude::*;
use raylib::prelude::KeyboardKey;
use rustc_hash::FxHashSet;

use crate::systems::framebinder::KeyState;

/// Resource capturing the keyboard state of the current frame.
///
/// Keys are stored by their integer code so that scripts, which only see
/// numbers, and native systems, which use [`KeyboardKey`], share one view.
#[derive(Resource, Debug, Clone, Default)]
pub struct InputState {
    held: FxHashSet<i32>,
    pressed: FxHashSet<i32>,
}

impl InputState {
    /// Record whether `key` is down this frame.
    pub fn set_held(&mut self, key: KeyboardKey, down: bool) {
        if down {
            self.held.insert(key as i32);
        } else {
            self.held.remove(&(key as i32));
        }
    }

    /// Record whether `key` went down this frame.
    pub fn set_pressed(&mut self, key: KeyboardKey, pressed: bool) {
        if pressed {
            self.pressed.insert(key as i32);
        } else {
            self.pressed.remove(&(key as i32));
        }
    }

    pub fn is_held(&self, key: KeyboardKey) -> bool {
        self.held.contains(&(key as i32))
    }

    pub fn is_pressed(&self, key: KeyboardKey) -> bool {
        self.pressed.contains(&(key as i32))
    }

    /// Held test by raw key code, as used by scripts.
    pub fn is_held_code(&self, code: i32) -> bool {
        self.held.contains(&code)
    }

    pub fn is_pressed_code(&self, code: i32) -> bool {
        self.pressed.contains(&code)
    }

    pub fn held_codes(&self) -> impl Iterator<Item = i32> + '_ {
        self.held.iter().copied()
    }

    pub fn pressed_codes(&self) -> impl Iterator<Item = i32> + '_ {
        self.pressed.iter().copied()
    }

    /// Release every key.
    pub fn clear(&mut self) {
        self.held.clear();
        self.pressed.clear();
    }
}

impl KeyState for InputState {
    fn held(&self, key: KeyboardKey) -> bool {
        self.is_held(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inputstate_default_nothing_held() {
        let input = InputState::default();
        assert!(!input.is_held(KeyboardKey::KEY_I));
        assert!(!input.is_pressed(KeyboardKey::KEY_I));
        assert_eq!(input.held_codes().count(), 0);
    }

    #[test]
    fn test_set_held_and_release() {
        let mut input = InputState::default();
        input.set_held(KeyboardKey::KEY_I, true);
        assert!(input.is_held(KeyboardKey::KEY_I));
        assert!(input.is_held_code(KeyboardKey::KEY_I as i32));
        assert!(!input.is_held(KeyboardKey::KEY_K));

        input.set_held(KeyboardKey::KEY_I, false);
        assert!(!input.is_held(KeyboardKey::KEY_I));
    }

    #[test]
    fn test_pressed_is_tracked_separately_from_held() {
        let mut input = InputState::default();
        input.set_pressed(KeyboardKey::KEY_SPACE, true);
        assert!(input.is_pressed(KeyboardKey::KEY_SPACE));
        assert!(!input.is_held(KeyboardKey::KEY_SPACE));
    }

    #[test]
    fn test_key_state_trait_reads_held() {
        let mut input = InputState::default();
        input.set_held(KeyboardKey::KEY_K, true);
        let keys: &dyn KeyState = &input;
        assert!(keys.held(KeyboardKey::KEY_K));
        assert!(!keys.held(KeyboardKey::KEY_I));
    }

    #[test]
    fn test_clear_releases_everything() {
        let mut input = InputState::default();
        input.set_held(KeyboardKey::KEY_W, true);
        input.set_pressed(KeyboardKey::KEY_W, true);
        input.clear();
        assert!(!input.is_held(KeyboardKey::KEY_W));
        assert!(!input.is_pressed(KeyboardKey::KEY_W));
    }
}
