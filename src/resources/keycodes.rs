//! Named keyboard keys the host polls every frame.
//!
//! [`POLLED_KEYS`] is both the list sampled by the input system and the
//! contents of the `keys` table exposed to scripts, so a script can only ask
//! about keys that are actually polled.

use raylib::prelude::KeyboardKey;

pub const POLLED_KEYS: &[(&str, KeyboardKey)] = &[
    ("KEY_A", KeyboardKey::KEY_A),
    ("KEY_B", KeyboardKey::KEY_B),
    ("KEY_C", KeyboardKey::KEY_C),
    ("KEY_D", KeyboardKey::KEY_D),
    ("KEY_E", KeyboardKey::KEY_E),
    ("KEY_F", KeyboardKey::KEY_F),
    ("KEY_G", KeyboardKey::KEY_G),
    ("KEY_H", KeyboardKey::KEY_H),
    ("KEY_I", KeyboardKey::KEY_I),
    ("KEY_J", KeyboardKey::KEY_J),
    ("KEY_K", KeyboardKey::KEY_K),
    ("KEY_L", KeyboardKey::KEY_L),
    ("KEY_M", KeyboardKey::KEY_M),
    ("KEY_N", KeyboardKey::KEY_N),
    ("KEY_O", KeyboardKey::KEY_O),
    ("KEY_P", KeyboardKey::KEY_P),
    ("KEY_Q", KeyboardKey::KEY_Q),
    ("KEY_R", KeyboardKey::KEY_R),
    ("KEY_S", KeyboardKey::KEY_S),
    ("KEY_T", KeyboardKey::KEY_T),
    ("KEY_U", KeyboardKey::KEY_U),
    ("KEY_V", KeyboardKey::KEY_V),
    ("KEY_W", KeyboardKey::KEY_W),
    ("KEY_X", KeyboardKey::KEY_X),
    ("KEY_Y", KeyboardKey::KEY_Y),
    ("KEY_Z", KeyboardKey::KEY_Z),
    ("KEY_ZERO", KeyboardKey::KEY_ZERO),
    ("KEY_ONE", KeyboardKey::KEY_ONE),
    ("KEY_TWO", KeyboardKey::KEY_TWO),
    ("KEY_THREE", KeyboardKey::KEY_THREE),
    ("KEY_FOUR", KeyboardKey::KEY_FOUR),
    ("KEY_FIVE", KeyboardKey::KEY_FIVE),
    ("KEY_SIX", KeyboardKey::KEY_SIX),
    ("KEY_SEVEN", KeyboardKey::KEY_SEVEN),
    ("KEY_EIGHT", KeyboardKey::KEY_EIGHT),
    ("KEY_NINE", KeyboardKey::KEY_NINE),
    ("KEY_SPACE", KeyboardKey::KEY_SPACE),
    ("KEY_ENTER", KeyboardKey::KEY_ENTER),
    ("KEY_ESCAPE", KeyboardKey::KEY_ESCAPE),
    ("KEY_TAB", KeyboardKey::KEY_TAB),
    ("KEY_BACKSPACE", KeyboardKey::KEY_BACKSPACE),
    ("KEY_LEFT_SHIFT", KeyboardKey::KEY_LEFT_SHIFT),
    ("KEY_LEFT_CONTROL", KeyboardKey::KEY_LEFT_CONTROL),
    ("KEY_UP", KeyboardKey::KEY_UP),
    ("KEY_DOWN", KeyboardKey::KEY_DOWN),
    ("KEY_LEFT", KeyboardKey::KEY_LEFT),
    ("KEY_RIGHT", KeyboardKey::KEY_RIGHT),
    ("KEY_F1", KeyboardKey::KEY_F1),
    ("KEY_F2", KeyboardKey::KEY_F2),
    ("KEY_F3", KeyboardKey::KEY_F3),
    ("KEY_F4", KeyboardKey::KEY_F4),
    ("KEY_F5", KeyboardKey::KEY_F5),
    ("KEY_F6", KeyboardKey::KEY_F6),
    ("KEY_F7", KeyboardKey::KEY_F7),
    ("KEY_F8", KeyboardKey::KEY_F8),
    ("KEY_F9", KeyboardKey::KEY_F9),
    ("KEY_F10", KeyboardKey::KEY_F10),
    ("KEY_F11", KeyboardKey::KEY_F11),
    ("KEY_F12", KeyboardKey::KEY_F12),
];

/// Look up a polled key by its script-facing name.
pub fn key_by_name(name: &str) -> Option<KeyboardKey> {
    POLLED_KEYS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, key)| *key)
}

/// Script-facing name of a key code, if it is polled.
pub fn name_of_code(code: i32) -> Option<&'static str> {
    POLLED_KEYS
        .iter()
        .find(|(_, key)| *key as i32 == code)
        .map(|(name, _)| *name)
}
