//! Scene description and world setup.
//!
//! The scene is a JSON file listing the objects to spawn:
//!
//! ```json
//! {
//!   "objects": [
//!     { "tag": "cube01", "translation": [0, 0, 0.5], "rotation": [0, 30, 0],
//!       "scale": [0.5, 0.5, 0.5], "color": [25, 204, 25] },
//!     { "translation": [0, -1, 0], "scale": [6, 0.1, 6] }
//!   ]
//! }
//! ```
//!
//! Every field is optional. Objects without a tag are drawn but cannot be
//! addressed by the binder or by scripts.

use std::path::Path;

use bevy_ecs::prelude::*;
use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::components::rotation::Rotation;
use crate::components::scale::Scale;
use crate::components::tag::Tag;
use crate::components::tint::Tint;
use crate::components::translation::Translation;

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

fn white() -> [u8; 3] {
    [255, 255, 255]
}

/// One object of the scene file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub translation: [f32; 3],
    /// Euler angles in degrees.
    #[serde(default)]
    pub rotation: [f32; 3],
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
    #[serde(default = "white")]
    pub color: [u8; 3],
}

impl Default for SceneObject {
    fn default() -> Self {
        Self {
            tag: None,
            translation: [0.0; 3],
            rotation: [0.0; 3],
            scale: unit_scale(),
            color: white(),
        }
    }
}

/// Contents of a scene file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub objects: Vec<SceneObject>,
}

impl SceneDescription {
    pub fn from_json(text: &str) -> Result<Self, String> {
        serde_json::from_str(text).map_err(|e| format!("Invalid scene: {}", e))
    }

    /// Read and parse a scene file.
    pub fn load(path: &Path) -> Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read scene {}: {}", path.display(), e))?;
        Self::from_json(&text)
    }

    /// Tags of all tagged objects, in file order.
    pub fn tags(&self) -> Vec<&str> {
        self.objects
            .iter()
            .filter_map(|o| o.tag.as_deref())
            .collect()
    }
}

/// Spawn one entity per scene object. Returns the spawned entities in file order.
pub fn spawn_scene(world: &mut World, scene: &SceneDescription) -> Vec<Entity> {
    scene
        .objects
        .iter()
        .map(|object| {
            let [tx, ty, tz] = object.translation;
            let [rx, ry, rz] = object.rotation;
            let [sx, sy, sz] = object.scale;
            let [r, g, b] = object.color;
            let mut entity = world.spawn((
                Translation::new(tx, ty, tz),
                Rotation::new(rx, ry, rz),
                Scale::new(sx, sy, sz),
                Tint::rgb(r, g, b),
            ));
            if let Some(tag) = &object.tag {
                entity.insert(Tag::new(tag.clone()));
            }
            entity.id()
        })
        .collect()
}

/// Load the scene at `path` into `world`.
///
/// A missing or malformed scene is logged and leaves the world empty.
pub fn setup_scene(world: &mut World, path: &Path) -> usize {
    match SceneDescription::load(path) {
        Ok(scene) => {
            let spawned = spawn_scene(world, &scene).len();
            info!(
                "Scene {} loaded: {} object(s), tags {:?}",
                path.display(),
                spawned,
                scene.tags()
            );
            spawned
        }
        Err(e) => {
            error!("{}", e);
            0
        }
    }
}
