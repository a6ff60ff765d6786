//! ECS resources made available to systems.
//!
//! Overview
//! - `camera3d` – shared 3D camera
//! - `console` – channel from the stdin console thread
//! - `debugmode` – presence toggles the debug overlay
//! - `gameconfig` – settings loaded from `config.ini`
//! - `input` – per-frame keyboard state
//! - `keycodes` – named keys that are polled and exposed to scripts
//! - `lua_runtime` – Lua interpreter and loaded update scripts
//! - `scalestate` – accumulator of the frame binder
//! - `worldtime` – simulation time and delta
pub mod camera3d;
pub mod console;
pub mod debugmode;
pub mod gameconfig;
pub mod input;
pub mod keycodes;
#[cfg(feature = "lua")]
pub mod lua_runtime;
pub mod scalestate;
pub mod worldtime;
