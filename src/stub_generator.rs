//! Lua stub generator for EmmyLua / lua-language-server.
//!
//! Reads `engine.__meta` and the `keys` global from the Lua runtime and emits
//! a deterministic `engine.lua` stub file with `---@class`, `---@field`,
//! `---@param`, and `---@return` annotations.

use crate::resources::lua_runtime::LuaRuntime;
use mlua::prelude::*;
use std::fmt::Write as FmtWrite;
use std::path::Path;

/// Category display order for deterministic output.
const CATEGORY_ORDER: &[&str] = &["base", "input", "object"];

/// Human-readable section titles for each category.
fn category_title(cat: &str) -> &str {
    match cat {
        "base" => "Logging Functions",
        "input" => "Keyboard",
        "object" => "Tagged Objects",
        _ => cat,
    }
}

/// Maps a meta type string to the EmmyLua annotation type.
fn lua_type_annotation(meta_type: &str) -> String {
    match meta_type {
        s if s.ends_with('?') => format!("{}|nil", &s[..s.len() - 1]),
        other => other.into(),
    }
}

/// Extracted function metadata.
struct FnMeta {
    name: String,
    description: String,
    category: String,
    params: Vec<(String, String)>,
    returns: Option<String>,
}

/// Extracted callback metadata.
struct CallbackMeta {
    name: String,
    description: String,
}

/// Extract all metadata from `engine.__meta` and generate the stub file content.
pub fn generate_stubs(runtime: &LuaRuntime) -> Result<String, String> {
    let lua = runtime.lua();

    let engine: LuaTable = lua
        .globals()
        .get("engine")
        .map_err(|e| format!("Failed to get engine table: {e}"))?;
    let meta: LuaTable = engine
        .get("__meta")
        .map_err(|e| format!("Failed to get engine.__meta: {e}"))?;
    let keys: LuaTable = lua
        .globals()
        .get("keys")
        .map_err(|e| format!("Failed to get keys table: {e}"))?;

    let functions = extract_functions(&meta).map_err(|e| format!("Functions: {e}"))?;
    let callbacks = extract_callbacks(&meta).map_err(|e| format!("Callbacks: {e}"))?;
    let key_codes = extract_keys(&keys).map_err(|e| format!("Keys: {e}"))?;

    Ok(render_stubs(&functions, &callbacks, &key_codes))
}

/// Write the generated stubs to a file, creating parent directories.
pub fn write_stubs(path: &Path, content: &str) -> Result<(), String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
    }
    std::fs::write(path, content).map_err(|e| format!("Failed to write {}: {e}", path.display()))
}

// --------------- Extraction ---------------

fn extract_functions(meta: &LuaTable) -> Result<Vec<FnMeta>, LuaError> {
    let fns_tbl: LuaTable = meta.get("functions")?;
    let mut result = Vec::new();
    for pair in fns_tbl.pairs::<String, LuaTable>() {
        let (name, tbl) = pair?;
        let description: String = tbl.get("description")?;
        let category: String = tbl.get("category")?;
        let params_tbl: LuaTable = tbl.get("params")?;
        let mut params = Vec::new();
        for p in params_tbl.sequence_values::<LuaTable>() {
            let p = p?;
            let pname: String = p.get("name")?;
            let ptype: String = p.get("type")?;
            params.push((pname, ptype));
        }
        let returns: Option<String> = tbl
            .get::<LuaTable>("returns")
            .ok()
            .and_then(|r| r.get::<String>("type").ok());
        result.push(FnMeta {
            name,
            description,
            category,
            params,
            returns,
        });
    }
    // Sort by category order, then alphabetically within category
    result.sort_by(|a, b| {
        let ca = CATEGORY_ORDER
            .iter()
            .position(|c| *c == a.category)
            .unwrap_or(99);
        let cb = CATEGORY_ORDER
            .iter()
            .position(|c| *c == b.category)
            .unwrap_or(99);
        ca.cmp(&cb).then_with(|| a.name.cmp(&b.name))
    });
    Ok(result)
}

fn extract_callbacks(meta: &LuaTable) -> Result<Vec<CallbackMeta>, LuaError> {
    let cb_tbl: LuaTable = meta.get("callbacks")?;
    let mut result = Vec::new();
    for pair in cb_tbl.pairs::<String, LuaTable>() {
        let (name, tbl) = pair?;
        let description: String = tbl.get("description")?;
        result.push(CallbackMeta { name, description });
    }
    let cb_order = ["startup", "update"];
    result.sort_by_key(|c| cb_order.iter().position(|n| *n == c.name).unwrap_or(99));
    Ok(result)
}

/// Key names and codes, ordered by code then name.
fn extract_keys(keys: &LuaTable) -> Result<Vec<(String, i64)>, LuaError> {
    let mut result = Vec::new();
    for pair in keys.pairs::<String, i64>() {
        result.push(pair?);
    }
    result.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
    Ok(result)
}

// --------------- Rendering ---------------

fn render_stubs(functions: &[FnMeta], callbacks: &[CallbackMeta], keys: &[(String, i64)]) -> String {
    let mut out = String::with_capacity(16 * 1024);

    // Header
    let _ = writeln!(out, "---@meta");
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "-- THIS FILE IS AUTO-GENERATED by `tagscale --create-lua-stubs`."
    );
    let _ = writeln!(
        out,
        "-- DO NOT EDIT MANUALLY. Regenerate from engine.__meta instead."
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "---@class engine");
    let _ = writeln!(out, "---Host API available to update scripts");
    let _ = writeln!(out, "engine = {{}}");
    let _ = writeln!(out);

    render_keys(&mut out, keys);
    render_callbacks(&mut out, callbacks);
    render_functions(&mut out, functions);

    out
}

fn render_keys(out: &mut String, keys: &[(String, i64)]) {
    let _ = writeln!(out, "-- ==================== Key Codes ====================");
    let _ = writeln!(out);
    let _ = writeln!(out, "---Key codes accepted by `engine.get_key_down` and `engine.get_key_pressed`");
    let _ = writeln!(out, "---@class keys");
    for (name, _) in keys {
        let _ = writeln!(out, "---@field {} integer", name);
    }
    let _ = writeln!(out, "keys = {{");
    for (name, code) in keys {
        let _ = writeln!(out, "    {} = {},", name, code);
    }
    let _ = writeln!(out, "}}");
    let _ = writeln!(out);
}

fn render_callbacks(out: &mut String, callbacks: &[CallbackMeta]) {
    let _ = writeln!(
        out,
        "-- ==================== Callback Signatures ===================="
    );
    let _ = writeln!(
        out,
        "-- Define these in a script file; both are optional."
    );
    let _ = writeln!(out);

    for cb in callbacks {
        write_description(out, &cb.description);
        let _ = writeln!(out, "function {}() end", cb.name);
        let _ = writeln!(out);
    }
}

fn render_functions(out: &mut String, functions: &[FnMeta]) {
    let mut current_category = "";

    for f in functions {
        if f.category != current_category {
            current_category = &f.category;
            let title = category_title(current_category);
            let _ = writeln!(out, "-- ==================== {} ====================", title);
            let _ = writeln!(out);
        }
        render_function(out, f);
    }
}

fn render_function(out: &mut String, f: &FnMeta) {
    write_description(out, &f.description);
    for (pname, ptype) in &f.params {
        let _ = writeln!(out, "---@param {} {}", pname, lua_type_annotation(ptype));
    }
    if let Some(ref ret) = f.returns {
        let _ = writeln!(out, "---@return {}", lua_type_annotation(ret));
    }
    let param_names: Vec<&str> = f.params.iter().map(|(n, _)| n.as_str()).collect();
    let _ = writeln!(
        out,
        "function engine.{}({}) end",
        f.name,
        param_names.join(", ")
    );
    let _ = writeln!(out);
}

/// Writes a description as doc-comment lines, handling multi-line descriptions.
fn write_description(out: &mut String, description: &str) {
    for line in description.lines() {
        let _ = writeln!(out, "---{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_type_annotation() {
        assert_eq!(lua_type_annotation("number?"), "number|nil");
        assert_eq!(lua_type_annotation("string[]"), "string[]");
    }

    #[test]
    fn test_unknown_category_title_is_passthrough() {
        assert_eq!(category_title("object"), "Tagged Objects");
        assert_eq!(category_title("misc"), "misc");
    }

    #[test]
    fn test_multiline_description() {
        let mut out = String::new();
        write_description(&mut out, "first\nsecond");
        assert_eq!(out, "---first\n---second\n");
    }
}
