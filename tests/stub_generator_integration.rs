//! Stub and .luarc.json generation from the live runtime.

#![cfg(feature = "lua")]

use tagscale::luarc_generator;
use tagscale::resources::lua_runtime::{ENGINE_API, LuaRuntime};
use tagscale::stub_generator;

#[test]
fn generate_stubs_produces_valid_output() {
    let rt = LuaRuntime::new().unwrap();
    let content = stub_generator::generate_stubs(&rt).unwrap();

    assert!(content.starts_with("---@meta"), "Should start with ---@meta");
    assert!(content.contains("engine = {}"), "Should declare engine table");
}

#[test]
fn generated_stubs_contain_representative_signatures() {
    let rt = LuaRuntime::new().unwrap();
    let content = stub_generator::generate_stubs(&rt).unwrap();

    assert!(content.contains("function engine.log(message)"), "Missing engine.log()");
    assert!(content.contains("---@return boolean\nfunction engine.get_key_down(code)"), "Missing engine.get_key_down()");
    assert!(content.contains("---@return string[]\nfunction engine.get_tags()"), "Missing engine.get_tags()");
    assert!(content.contains("function engine.change_scale(tag, x, y, z)"), "Missing engine.change_scale()");
    assert!(content.contains("function engine.change_rotation(tag, x, y, z)"), "Missing engine.change_rotation()");

    // Callbacks
    assert!(content.contains("function startup() end"), "Missing startup callback");
    assert!(content.contains("function update() end"), "Missing update callback");

    // Keys
    assert!(content.contains("---@class keys"), "Missing keys class");
    assert!(content.contains("    KEY_I = 73,"), "Missing KEY_I code");
    assert!(content.contains("    KEY_K = 75,"), "Missing KEY_K code");
}

#[test]
fn generated_function_set_matches_meta() {
    let rt = LuaRuntime::new().unwrap();
    let content = stub_generator::generate_stubs(&rt).unwrap();

    let stub_count = content.matches("function engine.").count();
    assert_eq!(stub_count, ENGINE_API.len());
    for f in ENGINE_API {
        assert!(
            content.contains(&format!("function engine.{}(", f.name)),
            "Missing stub for engine.{}",
            f.name
        );
    }
}

#[test]
fn stubs_are_deterministic() {
    let a = stub_generator::generate_stubs(&LuaRuntime::new().unwrap()).unwrap();
    let b = stub_generator::generate_stubs(&LuaRuntime::new().unwrap()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn categories_come_in_order() {
    let rt = LuaRuntime::new().unwrap();
    let content = stub_generator::generate_stubs(&rt).unwrap();
    let logging = content.find("Logging Functions").unwrap();
    let keyboard = content.find("==================== Keyboard").unwrap();
    let objects = content.find("Tagged Objects").unwrap();
    assert!(logging < keyboard && keyboard < objects);
}

#[test]
fn write_stubs_creates_parent_directories() {
    let dir = std::env::temp_dir().join("tagscale_stub_test");
    std::fs::remove_dir_all(&dir).ok();
    let path = dir.join("nested").join("engine.lua");

    let rt = LuaRuntime::new().unwrap();
    let content = stub_generator::generate_stubs(&rt).unwrap();
    stub_generator::write_stubs(&path, &content).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), content);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn stub_file_in_scripts_dir_is_not_run() {
    let dir = std::env::temp_dir().join("tagscale_stub_skip_test");
    std::fs::remove_dir_all(&dir).ok();
    std::fs::create_dir_all(&dir).unwrap();

    let rt = LuaRuntime::new().unwrap();
    let content = stub_generator::generate_stubs(&rt).unwrap();
    stub_generator::write_stubs(&dir.join("engine.lua"), &content).unwrap();

    let mut rt = LuaRuntime::new().unwrap();
    assert_eq!(rt.load_script_dir(&dir).unwrap(), 0);
    // The real API is still in place
    rt.exec_chunk(r#"engine.change_scale("a", 1, 1, 1)"#).unwrap();
    assert_eq!(rt.drain_transform_commands().len(), 1);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn luarc_points_at_stubs() {
    let rt = LuaRuntime::new().unwrap();
    let text = luarc_generator::generate_luarc(&rt, "engine.lua").unwrap();
    assert!(text.contains("\"engine.lua\""));
    assert!(text.contains("\"keys\""));
}
