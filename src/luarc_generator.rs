//! Generator for `.luarc.json`, the Lua Language Server configuration.
//!
//! The generated config declares the `engine` and `keys` globals, selects the
//! LuaJIT runtime, and points the workspace library at the generated stubs.

use crate::resources::lua_runtime::LuaRuntime;
use mlua::prelude::*;
use std::path::Path;

/// Generate `.luarc.json` content for scripts run by `runtime`.
///
/// Fails if the runtime is missing the `engine.__meta` table the stubs are
/// built from.
pub fn generate_luarc(runtime: &LuaRuntime, stubs_filename: &str) -> Result<String, String> {
    let engine: LuaTable = runtime
        .lua()
        .globals()
        .get("engine")
        .map_err(|e| format!("Failed to get engine table: {e}"))?;
    let _meta: LuaTable = engine
        .get("__meta")
        .map_err(|e| format!("Failed to get engine.__meta: {e}"))?;

    let content = serde_json::json!({
        "$schema": "https://raw.githubusercontent.com/LuaLS/vscode-lua/master/setting/schema.json",
        "runtime.version": "LuaJIT",
        "diagnostics.globals": ["engine", "keys"],
        "workspace.library": [stubs_filename],
        "completion.autoRequire": false
    });

    serde_json::to_string_pretty(&content)
        .map_err(|e| format!("Failed to serialize .luarc.json: {e}"))
}

/// Write the generated `.luarc.json` content to a file.
pub fn write_luarc(path: &Path, content: &str) -> Result<(), String> {
    std::fs::write(path, content).map_err(|e| format!("Failed to write {}: {e}", path.display()))
}
