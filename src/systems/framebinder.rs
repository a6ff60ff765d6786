//! Keyboard-driven uniform rescale of tagged objects.
//!
//! Once per frame, [`FrameInputBinder::tick`] checks two keys. While the
//! increase key (`I`) is held the shared [`ScaleState`] accumulator grows by
//! [`SCALE_STEP`]; while the decrease key (`K`) is held it shrinks by the same
//! step. After each adjustment the new value is *broadcast*: every object the
//! [`ObjectDirectory`] reports at that instant gets its scale set to
//! `(x, x, x)`.
//!
//! The two checks are independent. With both keys down the frame performs two
//! broadcasts, first at `x + step`, then at `x`, and the tag list is queried
//! again for the second one.
//!
//! The binder does not clamp the accumulator and does not handle directory
//! failures; a directory decides on its own what an unknown tag means.
//!
//! # Capabilities
//!
//! - [`KeyState`] – "is this key held right now?"
//! - [`ObjectDirectory`] – list current tags, set the scale of a tag
//!
//! [`InputState`] implements [`KeyState`] and the ECS query
//! [`TaggedScaleQuery`] implements [`ObjectDirectory`], which is what
//! [`frame_input_binder_system`] wires together.

use bevy_ecs::prelude::*;
use log::{error, trace};
use raylib::prelude::{KeyboardKey, Vector3};

use crate::components::scale::Scale;
use crate::components::tag::Tag;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::InputState;
use crate::resources::scalestate::ScaleState;

/// Accumulator change per held key per frame.
pub const SCALE_STEP: f32 = 0.01;
/// Key that grows the accumulator while held.
pub const INCREASE_KEY: KeyboardKey = KeyboardKey::KEY_I;
/// Key that shrinks the accumulator while held.
pub const DECREASE_KEY: KeyboardKey = KeyboardKey::KEY_K;

/// Read access to the host's keyboard state.
pub trait KeyState {
    /// Whether `key` is held down during the current frame.
    fn held(&self, key: KeyboardKey) -> bool;
}

/// Tag enumeration and scale mutation provided by the host.
pub trait ObjectDirectory {
    /// Tags of all objects that exist right now. May be empty, may contain
    /// duplicates, order is not significant.
    fn list_tags(&self) -> Vec<String>;

    /// Set the scale of the object addressed by `tag`.
    fn set_scale(&mut self, tag: &str, scale: Vector3);
}

/// Key bindings and step size of the binder.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct FrameInputBinder {
    pub increase: KeyboardKey,
    pub decrease: KeyboardKey,
    pub step: f32,
}

impl Default for FrameInputBinder {
    fn default() -> Self {
        Self {
            increase: INCREASE_KEY,
            decrease: DECREASE_KEY,
            step: SCALE_STEP,
        }
    }
}

impl FrameInputBinder {
    /// Run one frame of the binder.
    ///
    /// Returns how many broadcasts were issued (0, 1 or 2).
    pub fn tick<K, D>(&self, state: &mut ScaleState, keys: &K, directory: &mut D) -> u32
    where
        K: KeyState + ?Sized,
        D: ObjectDirectory + ?Sized,
    {
        let mut broadcasts = 0;

        if keys.held(self.increase) {
            state.x += self.step;
            broadcast(directory, state.x);
            broadcasts += 1;
        }

        if keys.held(self.decrease) {
            state.x -= self.step;
            broadcast(directory, state.x);
            broadcasts += 1;
        }

        broadcasts
    }
}

/// Set every currently listed tag to the uniform scale `x`.
///
/// Returns the number of `set_scale` calls made.
pub fn broadcast<D>(directory: &mut D, x: f32) -> usize
where
    D: ObjectDirectory + ?Sized,
{
    let tags = directory.list_tags();
    let scale = Vector3 { x, y: x, z: x };
    for tag in &tags {
        directory.set_scale(tag, scale);
    }
    trace!("scale broadcast x={} to {} object(s)", x, tags.len());
    tags.len()
}

/// ECS view of every tagged object's scale.
pub type TaggedScaleQuery<'w, 's> = Query<'w, 's, (&'static Tag, &'static mut Scale)>;

impl ObjectDirectory for TaggedScaleQuery<'_, '_> {
    fn list_tags(&self) -> Vec<String> {
        self.iter().map(|(tag, _)| tag.0.clone()).collect()
    }

    fn set_scale(&mut self, tag: &str, scale: Vector3) {
        match self.iter_mut().find(|(t, _)| t.name() == tag) {
            Some((_, mut s)) => s.scale = scale,
            None => error!("No object tagged '{}'", tag),
        }
    }
}

/// Apply the binder to all tagged objects using this frame's [`InputState`].
pub fn frame_input_binder_system(
    binder: Res<FrameInputBinder>,
    input: Res<InputState>,
    mut state: ResMut<ScaleState>,
    mut objects: TaggedScaleQuery,
) {
    binder.tick(&mut *state, &*input, &mut objects);
}

/// Run condition: the binder runs unless [`GameConfig`] disables it.
pub fn binder_enabled(config: Option<Res<GameConfig>>) -> bool {
    config.is_none_or(|c| c.binder_enabled)
}
