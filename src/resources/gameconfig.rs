//! Host configuration resource.
//!
//! Settings are loaded from an INI configuration file. Defaults keep the host
//! runnable with no file at all.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1280
//! height = 720
//! target_fps = 60
//! vsync = true
//!
//! [binder]
//! enabled = true
//!
//! [scripts]
//! enabled = true
//! path = ./assets/scripts
//!
//! [scene]
//! path = ./assets/scene.json
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_BINDER_ENABLED: bool = true;
const DEFAULT_SCRIPTS_ENABLED: bool = true;
const DEFAULT_SCRIPTS_PATH: &str = "./assets/scripts";
const DEFAULT_SCENE_PATH: &str = "./assets/scene.json";
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Host configuration resource.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second. This is also the binder's tick rate.
    pub target_fps: u32,
    /// Enable vertical sync.
    pub vsync: bool,
    /// Run the native frame binder (I/K rescale of tagged objects).
    pub binder_enabled: bool,
    /// Load and run Lua update scripts.
    pub scripts_enabled: bool,
    /// Directory scanned for `*.lua` update scripts.
    pub scripts_path: PathBuf,
    /// JSON scene description spawned at startup.
    pub scene_path: PathBuf,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            binder_enabled: DEFAULT_BINDER_ENABLED,
            scripts_enabled: DEFAULT_SCRIPTS_ENABLED,
            scripts_path: PathBuf::from(DEFAULT_SCRIPTS_PATH),
            scene_path: PathBuf::from(DEFAULT_SCENE_PATH),
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    /// Load configuration from INI text instead of a file.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(vsync) = config.getbool("window", "vsync").ok().flatten() {
            self.vsync = vsync;
        }

        // [binder] section
        if let Some(enabled) = config.getbool("binder", "enabled").ok().flatten() {
            self.binder_enabled = enabled;
        }

        // [scripts] section
        if let Some(enabled) = config.getbool("scripts", "enabled").ok().flatten() {
            self.scripts_enabled = enabled;
        }
        if let Some(path) = config.get("scripts", "path") {
            self.scripts_path = PathBuf::from(path);
        }

        // [scene] section
        if let Some(path) = config.get("scene", "path") {
            self.scene_path = PathBuf::from(path);
        }

        info!(
            "Loaded config: {}x{} window, fps={}, vsync={}, binder={}, scripts={} ({:?}), scene={:?}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.vsync,
            self.binder_enabled,
            self.scripts_enabled,
            self.scripts_path,
            self.scene_path
        );
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [window] section
        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "vsync", Some(self.vsync.to_string()));

        // [binder] section
        config.set("binder", "enabled", Some(self.binder_enabled.to_string()));

        // [scripts] section
        config.set("scripts", "enabled", Some(self.scripts_enabled.to_string()));
        config.set(
            "scripts",
            "path",
            Some(self.scripts_path.display().to_string()),
        );

        // [scene] section
        config.set("scene", "path", Some(self.scene_path.display().to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::new();
        assert_eq!(config.window_size(), (1280, 720));
        assert_eq!(config.target_fps, 60);
        assert!(config.binder_enabled);
        assert!(config.scripts_enabled);
        assert_eq!(config.scripts_path, PathBuf::from("./assets/scripts"));
        assert_eq!(config.scene_path, PathBuf::from("./assets/scene.json"));
    }

    #[test]
    fn test_partial_ini_keeps_defaults() {
        let mut config = GameConfig::new();
        config
            .load_from_str("[binder]\nenabled = false\n\n[window]\ntarget_fps = 30\n")
            .unwrap();
        assert!(!config.binder_enabled);
        assert_eq!(config.target_fps, 30);
        assert_eq!(config.window_size(), (1280, 720));
        assert!(config.scripts_enabled);
    }

    #[test]
    fn test_paths_are_overridden() {
        let mut config = GameConfig::new();
        config
            .load_from_str("[scripts]\npath = ./my_scripts\n[scene]\npath = level.json\n")
            .unwrap();
        assert_eq!(config.scripts_path, PathBuf::from("./my_scripts"));
        assert_eq!(config.scene_path, PathBuf::from("level.json"));
    }

    #[test]
    fn test_invalid_values_are_ignored() {
        let mut config = GameConfig::new();
        config
            .load_from_str("[window]\nwidth = wide\nvsync = maybe\n")
            .unwrap();
        assert_eq!(config.window_width, 1280);
        assert!(config.vsync);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut config = GameConfig::with_path("./definitely/not/here.ini");
        assert!(config.load_from_file().is_err());
        assert_eq!(config, GameConfig::with_path("./definitely/not/here.ini"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = std::env::temp_dir().join("tagscale_config_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.ini");

        let mut saved = GameConfig::with_path(&path);
        saved.window_width = 800;
        saved.binder_enabled = false;
        saved.scripts_path = PathBuf::from("scripts");
        saved.save_to_file().unwrap();

        let mut loaded = GameConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        assert_eq!(loaded, saved);

        std::fs::remove_dir_all(&dir).ok();
    }
}
