use bevy_ecs::prelude::Component;
use raylib::prelude::Vector3;

/// World-space position of an object's center.
#[derive(Component, Clone, Debug, Copy, PartialEq)]
pub struct Translation {
    pub pos: Vector3,
}

impl Translation {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            pos: Vector3 { x, y, z },
        }
    }
}

impl Default for Translation {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}
