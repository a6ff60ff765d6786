//! Lua scripting runtime.
//!
//! Update scripts are plain `*.lua` files loaded from a directory. Each one
//! runs in its own environment table (lookups fall back to the globals) and
//! may define:
//!
//! - `startup()` – called once right after the script is loaded
//! - `update()` – called every frame
//!
//! Scripts talk to the host through the global `engine` table. Reads are
//! served from snapshots refreshed before the script pass, writes are queued
//! as [`TransformCmd`]s and applied by a Rust system afterwards.
//!
//! # Submodules
//!
//! - [`commands`] - commands queued by Lua for the ECS side
//! - [`input_snapshot`] - frozen keyboard state readable from Lua
//! - [`runtime`] - the interpreter, the `engine` table and script lifecycle
//!
//! # Example
//!
//! ```lua
//! local x = 0
//!
//! function update()
//!     if engine.get_key_down(keys.KEY_I) then
//!         x = x + 0.01
//!         for _, tag in ipairs(engine.get_tags()) do
//!             engine.change_scale(tag, x, x, x)
//!         end
//!     end
//! end
//! ```

mod commands;
mod input_snapshot;
mod runtime;

pub use commands::TransformCmd;
pub use input_snapshot::InputSnapshot;
pub use runtime::{ApiFunction, ENGINE_API, LuaRuntime, SCRIPT_CALLBACKS};
