//! Lua runtime core implementation.
//!
//! This module contains the `LuaRuntime` struct which manages the Lua interpreter,
//! the loaded update scripts, and the `engine` table API.

use super::commands::TransformCmd;
use super::input_snapshot::InputSnapshot;
use crate::resources::keycodes::POLLED_KEYS;
use mlua::prelude::*;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, error, info, warn};

/// Shared state accessible from Lua function closures.
/// This is stored in Lua's app_data and allows Lua functions to queue commands.
struct LuaAppData {
    transform_commands: RefCell<Vec<TransformCmd>>,
    /// Cached keyboard state (read-only for Lua).
    /// Updated before the script pass via `update_input_cache()`.
    input_snapshot: RefCell<InputSnapshot>,
    /// Cached tags of all objects (read-only for Lua).
    tags: RefCell<Vec<String>>,
}

/// A script file loaded into its own environment.
struct LoadedScript {
    name: String,
    env: LuaTable,
}

/// Description of one `engine` function, used to build `engine.__meta`.
#[derive(Debug, Clone, Copy)]
pub struct ApiFunction {
    pub name: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    /// `(name, type)` pairs in call order.
    pub params: &'static [(&'static str, &'static str)],
    pub returns: Option<&'static str>,
}

/// Every function registered on the `engine` table.
pub const ENGINE_API: &[ApiFunction] = &[
    ApiFunction {
        name: "log",
        category: "base",
        description: "Log a message at info level.",
        params: &[("message", "string")],
        returns: None,
    },
    ApiFunction {
        name: "log_info",
        category: "base",
        description: "Log a message at info level.",
        params: &[("message", "string")],
        returns: None,
    },
    ApiFunction {
        name: "log_warn",
        category: "base",
        description: "Log a message at warning level.",
        params: &[("message", "string")],
        returns: None,
    },
    ApiFunction {
        name: "log_error",
        category: "base",
        description: "Log a message at error level.",
        params: &[("message", "string")],
        returns: None,
    },
    ApiFunction {
        name: "get_key_down",
        category: "input",
        description: "Whether the key is held this frame.\nUse the codes of the global `keys` table.",
        params: &[("code", "integer")],
        returns: Some("boolean"),
    },
    ApiFunction {
        name: "get_key_pressed",
        category: "input",
        description: "Whether the key went down this frame.",
        params: &[("code", "integer")],
        returns: Some("boolean"),
    },
    ApiFunction {
        name: "get_tags",
        category: "object",
        description: "Tags of every object, as of the start of this frame's script pass.",
        params: &[],
        returns: Some("string[]"),
    },
    ApiFunction {
        name: "change_scale",
        category: "object",
        description: "Set the scale of the first object with `tag`.\nApplied after all scripts have updated.",
        params: &[
            ("tag", "string"),
            ("x", "number"),
            ("y", "number"),
            ("z", "number"),
        ],
        returns: None,
    },
    ApiFunction {
        name: "change_translation",
        category: "object",
        description: "Set the position of the first object with `tag`.\nApplied after all scripts have updated.",
        params: &[
            ("tag", "string"),
            ("x", "number"),
            ("y", "number"),
            ("z", "number"),
        ],
        returns: None,
    },
    ApiFunction {
        name: "change_rotation",
        category: "object",
        description: "Set the rotation (Euler angles in degrees) of the first object with `tag`.\nApplied after all scripts have updated.",
        params: &[
            ("tag", "string"),
            ("x", "number"),
            ("y", "number"),
            ("z", "number"),
        ],
        returns: None,
    },
];

/// Functions a script may define, called by the host.
/// `(name, description)` pairs.
pub const SCRIPT_CALLBACKS: &[(&str, &str)] = &[
    ("startup", "Called once, right after the script file has been loaded."),
    ("update", "Called every frame, before queued transform changes are applied."),
];

/// Resource holding the Lua interpreter state.
///
/// This is a `NonSend` resource because the Lua state is not thread-safe.
/// It should be initialized once at startup and reused throughout the game.
pub struct LuaRuntime {
    lua: Lua,
    scripts: Vec<LoadedScript>,
}

/// Registers a Lua function that pushes a command to a queue in `LuaAppData`.
macro_rules! register_cmd {
    ($engine:expr, $lua:expr, $name:expr, $queue:ident,
     |$args:pat_param| $arg_ty:ty, $cmd:expr) => {
        $engine.set(
            $name,
            $lua.create_function(|lua, $args: $arg_ty| {
                lua.app_data_ref::<LuaAppData>()
                    .ok_or_else(|| LuaError::runtime("LuaAppData not found"))?
                    .$queue
                    .borrow_mut()
                    .push($cmd);
                Ok(())
            })?,
        )?;
    };
}

impl LuaRuntime {
    /// Creates a new Lua runtime and registers the `engine` API and the
    /// `keys` table. No scripts are loaded yet.
    ///
    /// # Errors
    ///
    /// Returns an error if Lua initialization or API registration fails.
    pub fn new() -> LuaResult<Self> {
        let lua = Lua::new();

        lua.set_app_data(LuaAppData {
            transform_commands: RefCell::new(Vec::new()),
            input_snapshot: RefCell::new(InputSnapshot::default()),
            tags: RefCell::new(Vec::new()),
        });

        let runtime = Self {
            lua,
            scripts: Vec::new(),
        };
        runtime.register_base_api()?;
        runtime.register_input_api()?;
        runtime.register_object_api()?;
        runtime.register_keys_table()?;
        runtime.register_meta()?;

        Ok(runtime)
    }

    /// Registers the base `engine` table with logging functions.
    fn register_base_api(&self) -> LuaResult<()> {
        let engine = self.lua.create_table()?;

        // engine.log(message) - General purpose logging
        engine.set(
            "log",
            self.lua.create_function(|_, msg: String| {
                info!(target: "lua", "{}", msg);
                Ok(())
            })?,
        )?;

        engine.set(
            "log_info",
            self.lua.create_function(|_, msg: String| {
                info!(target: "lua", "{}", msg);
                Ok(())
            })?,
        )?;

        engine.set(
            "log_warn",
            self.lua.create_function(|_, msg: String| {
                warn!(target: "lua", "{}", msg);
                Ok(())
            })?,
        )?;

        engine.set(
            "log_error",
            self.lua.create_function(|_, msg: String| {
                error!(target: "lua", "{}", msg);
                Ok(())
            })?,
        )?;

        self.lua.globals().set("engine", engine)?;

        Ok(())
    }

    fn register_input_api(&self) -> LuaResult<()> {
        let engine: LuaTable = self.lua.globals().get("engine")?;

        engine.set(
            "get_key_down",
            self.lua.create_function(|lua, code: i32| {
                Ok(lua
                    .app_data_ref::<LuaAppData>()
                    .map(|data| data.input_snapshot.borrow().key_down(code))
                    .unwrap_or(false))
            })?,
        )?;

        engine.set(
            "get_key_pressed",
            self.lua.create_function(|lua, code: i32| {
                Ok(lua
                    .app_data_ref::<LuaAppData>()
                    .map(|data| data.input_snapshot.borrow().key_pressed(code))
                    .unwrap_or(false))
            })?,
        )?;

        Ok(())
    }

    fn register_object_api(&self) -> LuaResult<()> {
        let engine: LuaTable = self.lua.globals().get("engine")?;

        engine.set(
            "get_tags",
            self.lua.create_function(|lua, ()| {
                Ok(lua
                    .app_data_ref::<LuaAppData>()
                    .map(|data| data.tags.borrow().clone())
                    .unwrap_or_default())
            })?,
        )?;

        register_cmd!(engine, self.lua, "change_scale", transform_commands,
            |(tag, x, y, z)| (String, f32, f32, f32), TransformCmd::SetScale { tag, x, y, z });
        register_cmd!(engine, self.lua, "change_translation", transform_commands,
            |(tag, x, y, z)| (String, f32, f32, f32), TransformCmd::SetTranslation { tag, x, y, z });
        register_cmd!(engine, self.lua, "change_rotation", transform_commands,
            |(tag, x, y, z)| (String, f32, f32, f32), TransformCmd::SetRotation { tag, x, y, z });

        Ok(())
    }

    /// Global `keys` table: key name -> raylib key code.
    fn register_keys_table(&self) -> LuaResult<()> {
        let keys = self.lua.create_table()?;
        for (name, key) in POLLED_KEYS {
            keys.set(*name, *key as i32)?;
        }
        self.lua.globals().set("keys", keys)?;
        Ok(())
    }

    /// Builds `engine.__meta` from [`ENGINE_API`] and [`SCRIPT_CALLBACKS`]
    /// for the stub generator.
    fn register_meta(&self) -> LuaResult<()> {
        let engine: LuaTable = self.lua.globals().get("engine")?;
        let functions = self.lua.create_table()?;

        for f in ENGINE_API {
            let entry = self.lua.create_table()?;
            entry.set("description", f.description)?;
            entry.set("category", f.category)?;

            let params = self.lua.create_table()?;
            for (i, (name, type_name)) in f.params.iter().enumerate() {
                let param = self.lua.create_table()?;
                param.set("name", *name)?;
                param.set("type", *type_name)?;
                params.set(i + 1, param)?;
            }
            entry.set("params", params)?;

            if let Some(ret) = f.returns {
                let returns = self.lua.create_table()?;
                returns.set("type", ret)?;
                entry.set("returns", returns)?;
            }

            functions.set(f.name, entry)?;
        }

        let callbacks = self.lua.create_table()?;
        for (name, description) in SCRIPT_CALLBACKS {
            let entry = self.lua.create_table()?;
            entry.set("description", *description)?;
            callbacks.set(*name, entry)?;
        }

        let meta = self.lua.create_table()?;
        meta.set("functions", functions)?;
        meta.set("callbacks", callbacks)?;
        engine.set("__meta", meta)?;
        Ok(())
    }

    /// Loads every `*.lua` file directly inside `dir`, in file-name order.
    ///
    /// Stub files (first line `---@meta`) are skipped. A script that fails
    /// to load is logged and skipped; the others still load.
    ///
    /// Returns the number of scripts loaded.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    pub fn load_script_dir(&mut self, dir: &Path) -> LuaResult<usize> {
        let entries =
            std::fs::read_dir(dir).map_err(|e| LuaError::ExternalError(Arc::new(e)))?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "lua"))
            .collect();
        paths.sort();

        let mut loaded = 0;
        for path in paths {
            match self.load_script(&path) {
                Ok(true) => loaded += 1,
                Ok(false) => debug!("Skipping stub file {}", path.display()),
                Err(e) => error!("Failed to load script {}: {}", path.display(), e),
            }
        }

        info!("Loaded {} script(s) from {}", loaded, dir.display());
        Ok(loaded)
    }

    /// Loads a script file. Returns `false` for stub files, which are not run.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the chunk fails to run.
    pub fn load_script(&mut self, path: &Path) -> LuaResult<bool> {
        let source =
            std::fs::read_to_string(path).map_err(|e| LuaError::ExternalError(Arc::new(e)))?;
        if source.lines().next().is_some_and(|l| l.trim() == "---@meta") {
            return Ok(false);
        }
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.load_script_source(&name, &source)?;
        Ok(true)
    }

    /// Runs `source` in a fresh environment, then calls its `startup()` if
    /// defined. An error inside `startup()` is logged and the script is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the chunk has syntax errors or fails at top level.
    pub fn load_script_source(&mut self, name: &str, source: &str) -> LuaResult<()> {
        let env: LuaTable = self
            .lua
            .load("return setmetatable({}, { __index = _G })")
            .set_name("script_env")
            .eval()?;

        self.lua
            .load(source)
            .set_name(name)
            .set_environment(env.clone())
            .exec()?;

        if let Some(startup) = env.raw_get::<Option<LuaFunction>>("startup")? {
            if let Err(e) = startup.call::<()>(()) {
                error!("Script '{}' startup failed: {}", name, e);
            }
        }

        info!("Loaded script '{}'", name);
        self.scripts.push(LoadedScript {
            name: name.to_string(),
            env,
        });
        Ok(())
    }

    /// Names of the loaded scripts, in update order.
    pub fn script_names(&self) -> Vec<&str> {
        self.scripts.iter().map(|s| s.name.as_str()).collect()
    }

    /// Calls `update()` of every loaded script that defines one.
    ///
    /// A failing script is logged and does not prevent the others from
    /// running. Returns the number of failed updates.
    pub fn run_updates(&self) -> usize {
        let mut failures = 0;
        for script in &self.scripts {
            let update = match script.env.raw_get::<Option<LuaFunction>>("update") {
                Ok(Some(update)) => update,
                Ok(None) => continue,
                Err(e) => {
                    error!("Script '{}' has an invalid update: {}", script.name, e);
                    failures += 1;
                    continue;
                }
            };
            if let Err(e) = update.call::<()>(()) {
                error!("Script '{}' update failed: {}", script.name, e);
                failures += 1;
            }
        }
        failures
    }

    /// Executes a chunk in the global environment, as typed in the console.
    ///
    /// # Errors
    ///
    /// Returns the syntax or runtime error of the chunk.
    pub fn exec_chunk(&self, source: &str) -> LuaResult<()> {
        self.lua.load(source).set_name("console").exec()
    }

    /// Updates the cached keyboard state that Lua can read.
    /// Call this before the script pass so scripts see this frame's keys.
    pub fn update_input_cache(&self, snapshot: InputSnapshot) {
        if let Some(data) = self.lua.app_data_ref::<LuaAppData>() {
            *data.input_snapshot.borrow_mut() = snapshot;
        }
    }

    /// Updates the cached object tags returned by `engine.get_tags()`.
    pub fn update_tags_cache(&self, tags: Vec<String>) {
        if let Some(data) = self.lua.app_data_ref::<LuaAppData>() {
            *data.tags.borrow_mut() = tags;
        }
    }

    /// Drains all queued transform commands, in queue order.
    pub fn drain_transform_commands(&self) -> Vec<TransformCmd> {
        self.lua
            .app_data_ref::<LuaAppData>()
            .map(|data| data.transform_commands.borrow_mut().drain(..).collect())
            .unwrap_or_default()
    }

    /// Returns a reference to the underlying Lua state.
    pub fn lua(&self) -> &Lua {
        &self.lua
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use raylib::prelude::KeyboardKey;
    use crate::resources::input::InputState;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("tagscale_runtime_{}", name));
        std::fs::remove_dir_all(&dir).ok();
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_engine_functions_match_meta() {
        let rt = LuaRuntime::new().unwrap();
        let engine: LuaTable = rt.lua().globals().get("engine").unwrap();
        for f in ENGINE_API {
            assert!(
                engine.get::<LuaFunction>(f.name).is_ok(),
                "engine.{} is not registered",
                f.name
            );
        }
        let registered: usize = rt
            .lua()
            .load(
                r#"
                local n = 0
                for _, v in pairs(engine) do
                    if type(v) == "function" then n = n + 1 end
                end
                return n
            "#,
            )
            .eval()
            .unwrap();
        assert_eq!(registered, ENGINE_API.len());
    }

    #[test]
    fn test_keys_table() {
        let rt = LuaRuntime::new().unwrap();
        let i: i32 = rt.lua().load("return keys.KEY_I").eval().unwrap();
        let k: i32 = rt.lua().load("return keys.KEY_K").eval().unwrap();
        assert_eq!(i, KeyboardKey::KEY_I as i32);
        assert_eq!(k, KeyboardKey::KEY_K as i32);
    }

    #[test]
    fn test_key_queries_read_snapshot() {
        let rt = LuaRuntime::new().unwrap();
        let mut input = InputState::default();
        input.set_held(KeyboardKey::KEY_I, true);
        rt.update_input_cache(InputSnapshot::from_input_state(&input));

        let down: bool = rt
            .lua()
            .load("return engine.get_key_down(keys.KEY_I)")
            .eval()
            .unwrap();
        let pressed: bool = rt
            .lua()
            .load("return engine.get_key_pressed(keys.KEY_I)")
            .eval()
            .unwrap();
        assert!(down);
        assert!(!pressed);
    }

    #[test]
    fn test_get_tags_returns_cache() {
        let rt = LuaRuntime::new().unwrap();
        rt.update_tags_cache(vec!["cube01".into(), "cube02".into()]);
        let tags: Vec<String> = rt.lua().load("return engine.get_tags()").eval().unwrap();
        assert_eq!(tags, vec!["cube01".to_string(), "cube02".to_string()]);
    }

    #[test]
    fn test_change_functions_queue_in_order() {
        let rt = LuaRuntime::new().unwrap();
        rt.exec_chunk(
            r#"
            engine.change_scale("a", 1, 2, 3)
            engine.change_rotation("b", 0, 90, 0)
            engine.change_translation("a", 0, 0, 0.5)
        "#,
        )
        .unwrap();

        let cmds = rt.drain_transform_commands();
        assert_eq!(
            cmds,
            vec![
                TransformCmd::SetScale {
                    tag: "a".into(),
                    x: 1.0,
                    y: 2.0,
                    z: 3.0
                },
                TransformCmd::SetRotation {
                    tag: "b".into(),
                    x: 0.0,
                    y: 90.0,
                    z: 0.0
                },
                TransformCmd::SetTranslation {
                    tag: "a".into(),
                    x: 0.0,
                    y: 0.0,
                    z: 0.5
                },
            ]
        );
        assert!(rt.drain_transform_commands().is_empty());
    }

    #[test]
    fn test_change_scale_rejects_bad_arguments() {
        let rt = LuaRuntime::new().unwrap();
        assert!(rt.exec_chunk(r#"engine.change_scale("a", "big")"#).is_err());
        assert!(rt.drain_transform_commands().is_empty());
    }

    #[test]
    fn test_startup_runs_once_on_load() {
        let mut rt = LuaRuntime::new().unwrap();
        rt.load_script_source(
            "counter.lua",
            r#"
            count = 0
            function startup() count = count + 10 end
            function update() count = count + 1 end
        "#,
        )
        .unwrap();
        rt.run_updates();
        rt.run_updates();

        let env = &rt.scripts[0].env;
        assert_eq!(env.raw_get::<i32>("count").unwrap(), 12);
    }

    #[test]
    fn test_scripts_do_not_share_globals() {
        let mut rt = LuaRuntime::new().unwrap();
        rt.load_script_source("a.lua", "x = 1 function update() x = x + 1 end")
            .unwrap();
        rt.load_script_source("b.lua", "x = 100 function update() x = x - 1 end")
            .unwrap();
        assert_eq!(rt.run_updates(), 0);

        assert_eq!(rt.scripts[0].env.raw_get::<i32>("x").unwrap(), 2);
        assert_eq!(rt.scripts[1].env.raw_get::<i32>("x").unwrap(), 99);
        let global: LuaValue = rt.lua().globals().get("x").unwrap();
        assert!(global.is_nil());
    }

    #[test]
    fn test_failing_update_does_not_stop_others() {
        let mut rt = LuaRuntime::new().unwrap();
        rt.load_script_source("a.lua", "function update() error('boom') end")
            .unwrap();
        rt.load_script_source(
            "b.lua",
            r#"function update() engine.change_scale("cube01", 2, 2, 2) end"#,
        )
        .unwrap();

        assert_eq!(rt.run_updates(), 1);
        assert_eq!(rt.drain_transform_commands().len(), 1);
    }

    #[test]
    fn test_failing_startup_keeps_script() {
        let mut rt = LuaRuntime::new().unwrap();
        rt.load_script_source(
            "a.lua",
            "function startup() error('no') end function update() end",
        )
        .unwrap();
        assert_eq!(rt.script_names(), vec!["a.lua"]);
        assert_eq!(rt.run_updates(), 0);
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let mut rt = LuaRuntime::new().unwrap();
        assert!(rt.load_script_source("bad.lua", "function (").is_err());
        assert!(rt.script_names().is_empty());
    }

    #[test]
    fn test_load_script_dir_sorted_and_filtered() {
        let dir = temp_dir("load_dir");
        std::fs::write(dir.join("b.lua"), "function update() end").unwrap();
        std::fs::write(dir.join("a.lua"), "function update() end").unwrap();
        std::fs::write(dir.join("broken.lua"), "this is not lua").unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();
        std::fs::write(dir.join("engine.lua"), "---@meta\nengine = {}\n").unwrap();
        std::fs::create_dir_all(dir.join("nested")).unwrap();
        std::fs::write(dir.join("nested").join("c.lua"), "").unwrap();

        let mut rt = LuaRuntime::new().unwrap();
        assert_eq!(rt.load_script_dir(&dir).unwrap(), 2);
        assert_eq!(rt.script_names(), vec!["a.lua", "b.lua"]);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_script_dir_missing() {
        let mut rt = LuaRuntime::new().unwrap();
        assert!(rt.load_script_dir(Path::new("./no/such/scripts")).is_err());
    }
}
