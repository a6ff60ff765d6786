use bevy_ecs::prelude::Component;
use raylib::prelude::Vector3;

/// Euler rotation in degrees, applied X, then Y, then Z.
#[derive(Component, Clone, Debug, Copy, PartialEq)]
pub struct Rotation {
    pub degrees: Vector3,
}

impl Rotation {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            degrees: Vector3 { x, y, z },
        }
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}
