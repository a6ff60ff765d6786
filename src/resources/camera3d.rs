//! Shared 3D camera resource.
//!
//! Wraps raylib's [`Camera3D`] so that the camera controller and the renderer
//! agree on a single view. The default looks at the origin from a short
//! distance, which frames the demo scene.

use bevy_ecs::prelude::Resource;
use raylib::prelude::{Camera3D, Vector3};

/// ECS resource that holds the active 3D camera.
#[derive(Resource, Clone, Copy)]
pub struct Camera3DRes(pub Camera3D);

impl Default for Camera3DRes {
    fn default() -> Self {
        Self(Camera3D::perspective(
            Vector3::new(0.0, 2.0, 4.0),
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            45.0,
        ))
    }
}
