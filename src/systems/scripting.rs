//! Systems driving the Lua update scripts.
//!
//! Per frame, in order:
//!
//! 1. [`script_update_system`] refreshes the key and tag snapshots and calls
//!    every script's `update()`.
//! 2. [`console_system`] runs the lines typed in the console, if any.
//! 3. [`apply_script_commands`] applies the queued transform writes.

use bevy_ecs::prelude::*;
use log::error;
use raylib::prelude::Vector3;

use crate::components::rotation::Rotation;
use crate::components::scale::Scale;
use crate::components::tag::Tag;
use crate::components::translation::Translation;
use crate::resources::console::ConsoleBridge;
use crate::resources::input::InputState;
use crate::resources::lua_runtime::{InputSnapshot, LuaRuntime, TransformCmd};

/// Tagged objects whose transform scripts may write.
pub type TransformQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static Tag,
        &'static mut Translation,
        &'static mut Rotation,
        &'static mut Scale,
    ),
>;

/// Run `update()` of every loaded script.
pub fn script_update_system(
    runtime: NonSend<LuaRuntime>,
    input: Res<InputState>,
    tags: Query<&Tag>,
) {
    runtime.update_input_cache(InputSnapshot::from_input_state(&input));
    runtime.update_tags_cache(tags.iter().map(|tag| tag.0.clone()).collect());
    runtime.run_updates();
}

/// Execute console lines in the global Lua environment.
pub fn console_system(runtime: NonSend<LuaRuntime>, console: Option<Res<ConsoleBridge>>) {
    let Some(console) = console else {
        return;
    };
    for line in console.drain() {
        if let Err(e) = runtime.exec_chunk(&line) {
            error!(target: "lua", "{}", e);
        }
    }
}

/// Apply every queued [`TransformCmd`], in queue order.
pub fn apply_script_commands(runtime: NonSend<LuaRuntime>, mut objects: TransformQuery) {
    for cmd in runtime.drain_transform_commands() {
        process_transform_command(&mut objects, cmd);
    }
}

/// Apply one command to the first object carrying its tag.
///
/// Returns `false`, after logging, when no object has the tag.
pub fn process_transform_command(objects: &mut TransformQuery, cmd: TransformCmd) -> bool {
    let Some((_, mut translation, mut rotation, mut scale)) = objects
        .iter_mut()
        .find(|(tag, ..)| tag.name() == cmd.tag())
    else {
        error!("No such tag exists: '{}'", cmd.tag());
        return false;
    };

    match cmd {
        TransformCmd::SetScale { x, y, z, .. } => scale.scale = Vector3::new(x, y, z),
        TransformCmd::SetTranslation { x, y, z, .. } => translation.pos = Vector3::new(x, y, z),
        TransformCmd::SetRotation { x, y, z, .. } => rotation.degrees = Vector3::new(x, y, z),
    }
    true
}
