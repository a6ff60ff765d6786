//! Host systems.
//!
//! Submodules overview
//! - [`camera`] – WASD fly camera
//! - [`framebinder`] – I/K uniform rescale of every tagged object
//! - [`input`] – read the keyboard into [`crate::resources::input::InputState`]
//! - [`render`] – draw the scene, the HUD and the debug overlay with Raylib
//! - [`scripting`] – run Lua update scripts and apply their queued writes
//! - [`time`] – update simulation time and delta

use bevy_ecs::prelude::SystemSet;

pub mod camera;
pub mod framebinder;
pub mod input;
pub mod render;
#[cfg(feature = "lua")]
pub mod scripting;
pub mod time;

/// Ordering of one frame. Configure the sets as a chain.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Sample the keyboard.
    Input,
    /// Native logic: camera and frame binder.
    Logic,
    /// Lua updates, console, queued transform writes.
    Scripts,
    /// Drawing.
    Render,
}
