//! Input systems.
//!
//! - [`update_input_state`] reads hardware input from Raylib each frame and
//!   writes the results into [`crate::resources::input::InputState`].
//! - Pressing F11 triggers [`SwitchDebugEvent`] to toggle the debug overlay.
use bevy_ecs::prelude::*;
use raylib::ffi::KeyboardKey;

use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::input::InputState;
use crate::resources::keycodes::POLLED_KEYS;

/// Key that toggles the debug overlay.
pub const DEBUG_TOGGLE_KEY: KeyboardKey = KeyboardKey::KEY_F11;

/// Poll Raylib for keyboard input and update the `InputState` resource.
pub fn update_input_state(
    mut input: ResMut<InputState>,
    rl: NonSend<raylib::RaylibHandle>,
    mut commands: Commands,
) {
    sample_keys(&mut input, |key| rl.is_key_down(key), |key| rl.is_key_pressed(key));

    if input.is_pressed(DEBUG_TOGGLE_KEY) {
        commands.trigger(SwitchDebugEvent {});
    }
}

/// Refresh every polled key from the given samplers.
pub fn sample_keys(
    input: &mut InputState,
    is_key_down: impl Fn(KeyboardKey) -> bool,
    is_key_pressed: impl Fn(KeyboardKey) -> bool,
) {
    for &(_, key) in POLLED_KEYS {
        input.set_held(key, is_key_down(key));
        input.set_pressed(key, is_key_pressed(key));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_keys_copies_samplers() {
        let mut input = InputState::default();
        sample_keys(
            &mut input,
            |key| key == KeyboardKey::KEY_I,
            |key| key == KeyboardKey::KEY_F11,
        );
        assert!(input.is_held(KeyboardKey::KEY_I));
        assert!(!input.is_held(KeyboardKey::KEY_K));
        assert!(input.is_pressed(KeyboardKey::KEY_F11));
    }

    #[test]
    fn test_sample_keys_releases_previous_frame() {
        let mut input = InputState::default();
        sample_keys(&mut input, |key| key == KeyboardKey::KEY_I, |_| false);
        sample_keys(&mut input, |_| false, |_| false);
        assert!(!input.is_held(KeyboardKey::KEY_I));
    }
}
