//! tagscale library.
//!
//! A small 3D host built on raylib and bevy_ecs. Every frame the
//! [`FrameInputBinder`](systems::framebinder::FrameInputBinder) rescales all
//! tagged objects while `I` or `K` is held, and optional Lua scripts can read
//! keys and rewrite the transform of any tagged object.
//!
//! The modules are exposed for the binary and for integration tests.

pub mod components;
pub mod events;
pub mod game;
#[cfg(feature = "lua")]
pub mod luarc_generator;
pub mod resources;
#[cfg(feature = "lua")]
pub mod stub_generator;
pub mod systems;
