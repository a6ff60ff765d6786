//! tagscale main entry point.
//!
//! Opens a raylib window on a scene of cubes loaded from JSON and runs the
//! frame loop:
//!
//! 1. Sample the keyboard into [`InputState`]
//! 2. Move the camera (WASD) and run the frame binder (I/K rescale)
//! 3. Run the Lua update scripts and apply their queued transform writes
//! 4. Render the scene and the HUD
//!
//! # Running
//!
//! ```sh
//! cargo run --release -- --config ./config.ini --console
//! ```

use std::path::PathBuf;

use bevy_ecs::observer::Observer;
use bevy_ecs::prelude::*;
use clap::Parser;
use log::{error, info, warn};

use tagscale::events::switchdebug::switch_debug_observer;
use tagscale::game::setup_scene;
use tagscale::resources::camera3d::Camera3DRes;
use tagscale::resources::gameconfig::GameConfig;
use tagscale::resources::input::InputState;
use tagscale::resources::scalestate::ScaleState;
use tagscale::resources::worldtime::WorldTime;
use tagscale::systems::FrameSet;
use tagscale::systems::camera::camera_controller;
use tagscale::systems::framebinder::{FrameInputBinder, binder_enabled, frame_input_binder_system};
use tagscale::systems::input::update_input_state;
use tagscale::systems::render::render_system;
use tagscale::systems::time::update_world_time;

#[cfg(feature = "lua")]
use tagscale::resources::console::setup_console;
#[cfg(feature = "lua")]
use tagscale::resources::lua_runtime::LuaRuntime;
#[cfg(feature = "lua")]
use tagscale::systems::scripting::{apply_script_commands, console_system, script_update_system};
#[cfg(feature = "lua")]
use tagscale::{luarc_generator, stub_generator};

/// Rescale tagged 3D objects from the keyboard or from Lua scripts.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./config.ini")]
    config: PathBuf,

    /// Read Lua chunks from stdin and run them on the main thread.
    #[arg(long)]
    console: bool,

    /// Generate Lua LSP stubs from engine metadata and exit.
    /// Optionally provide a path (default: assets/scripts/engine.lua).
    #[cfg(feature = "lua")]
    #[arg(long, value_name = "PATH")]
    create_lua_stubs: Option<Option<PathBuf>>,

    /// Generate .luarc.json for Lua Language Server and exit.
    /// Optionally provide a path (default: assets/scripts/.luarc.json).
    #[cfg(feature = "lua")]
    #[arg(long, value_name = "PATH")]
    create_luarc: Option<Option<PathBuf>>,
}

/// Handle the generator flags. Returns the exit code if one of them was given.
#[cfg(feature = "lua")]
fn run_generators(cli: &Cli) -> Option<i32> {
    if let Some(maybe_path) = &cli.create_lua_stubs {
        let path = maybe_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("assets/scripts/engine.lua"));
        let result = LuaRuntime::new()
            .map_err(|e| format!("Failed to create Lua runtime: {e}"))
            .and_then(|runtime| stub_generator::generate_stubs(&runtime))
            .and_then(|content| stub_generator::write_stubs(&path, &content));
        return Some(match result {
            Ok(()) => {
                println!("Lua stubs written to {}", path.display());
                0
            }
            Err(e) => {
                eprintln!("Error generating stubs: {e}");
                1
            }
        });
    }

    if let Some(maybe_path) = &cli.create_luarc {
        let path = maybe_path
            .clone()
            .unwrap_or_else(|| PathBuf::from("assets/scripts/.luarc.json"));
        let result = LuaRuntime::new()
            .map_err(|e| format!("Failed to create Lua runtime: {e}"))
            .and_then(|runtime| luarc_generator::generate_luarc(&runtime, "engine.lua"))
            .and_then(|content| luarc_generator::write_luarc(&path, &content));
        return Some(match result {
            Ok(()) => {
                println!(".luarc.json written to {}", path.display());
                0
            }
            Err(e) => {
                eprintln!("Error generating .luarc.json: {e}");
                1
            }
        });
    }

    None
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Early-exit: generators need no window
    #[cfg(feature = "lua")]
    if let Some(code) = run_generators(&cli) {
        std::process::exit(code);
    }

    let mut config = GameConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }

    // --------------- Raylib window ---------------
    let mut builder = raylib::init();
    builder
        .size(config.window_width as i32, config.window_height as i32)
        .title("tagscale");
    if config.vsync {
        builder.vsync();
    }
    let (mut rl, thread) = builder.build();
    rl.set_target_fps(config.target_fps);

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(WorldTime::default());
    world.insert_resource(InputState::default());
    world.insert_resource(ScaleState::default());
    world.insert_resource(FrameInputBinder::default());
    world.insert_resource(Camera3DRes::default());

    setup_scene(&mut world, &config.scene_path);

    #[cfg(feature = "lua")]
    {
        match LuaRuntime::new() {
            Ok(mut runtime) => {
                if config.scripts_enabled {
                    if let Err(e) = runtime.load_script_dir(&config.scripts_path) {
                        error!(
                            "Failed to read scripts directory {}: {}",
                            config.scripts_path.display(),
                            e
                        );
                    }
                }
                world.insert_non_send_resource(runtime);
            }
            Err(e) => {
                error!("Failed to create Lua runtime: {}", e);
                std::process::exit(1);
            }
        }
        if cli.console {
            setup_console(&mut world);
        }
    }
    #[cfg(not(feature = "lua"))]
    if cli.console {
        warn!("--console needs the `lua` feature; ignoring");
    }

    world.insert_resource(config);
    world.insert_non_send_resource(rl);
    world.insert_non_send_resource(thread);

    world.spawn(Observer::new(switch_debug_observer));
    world.flush();

    // --------------- Schedule ---------------
    let mut update = Schedule::default();
    update.configure_sets(
        (
            FrameSet::Input,
            FrameSet::Logic,
            FrameSet::Scripts,
            FrameSet::Render,
        )
            .chain(),
    );
    update.add_systems(update_input_state.in_set(FrameSet::Input));
    update.add_systems(camera_controller.in_set(FrameSet::Logic));
    update.add_systems(
        frame_input_binder_system
            .run_if(binder_enabled)
            .in_set(FrameSet::Logic),
    );
    #[cfg(feature = "lua")]
    update.add_systems(
        (script_update_system, console_system, apply_script_commands)
            .chain()
            .in_set(FrameSet::Scripts),
    );
    update.add_systems(render_system.in_set(FrameSet::Render));

    if let Err(e) = update.initialize(&mut world) {
        error!("Failed to initialize schedule: {}", e);
        std::process::exit(1);
    }

    info!("Hold I / K to scale every tagged object");

    // --------------- Main loop ---------------
    while !world
        .non_send_resource::<raylib::RaylibHandle>()
        .window_should_close()
    {
        let dt = world
            .non_send_resource::<raylib::RaylibHandle>()
            .get_frame_time();
        update_world_time(&mut world, dt);

        update.run(&mut world);

        world.clear_trackers();
    }

    info!(
        "Exiting after {} frame(s), scale accumulator at {}",
        world.resource::<WorldTime>().frame_count,
        world.resource::<ScaleState>().x
    );
}
