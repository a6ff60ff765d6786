//! Fly camera controller.
//!
//! W/S move the camera along its viewing direction projected onto the ground
//! plane, A/D strafe. Camera position and target move together so the view
//! direction is kept.
use bevy_ecs::prelude::*;
use raylib::prelude::{Camera3D, KeyboardKey, Vector3};

use crate::resources::camera3d::Camera3DRes;
use crate::resources::input::InputState;
use crate::resources::worldtime::WorldTime;

/// Camera speed in world units per second.
pub const CAMERA_SPEED: f32 = 4.0;

/// Move the shared camera from WASD input.
pub fn camera_controller(
    input: Res<InputState>,
    time: Res<WorldTime>,
    mut camera: ResMut<Camera3DRes>,
) {
    let (forward, right) = movement_intent(&input);
    if forward == 0.0 && right == 0.0 {
        return;
    }
    move_camera(&mut camera.0, forward, right, CAMERA_SPEED * time.delta);
}

/// Forward/right intent in `-1.0..=1.0` from the WASD keys.
pub fn movement_intent(input: &InputState) -> (f32, f32) {
    let axis = |pos: KeyboardKey, neg: KeyboardKey| {
        let mut v = 0.0;
        if input.is_held(pos) {
            v += 1.0;
        }
        if input.is_held(neg) {
            v -= 1.0;
        }
        v
    };
    (
        axis(KeyboardKey::KEY_W, KeyboardKey::KEY_S),
        axis(KeyboardKey::KEY_D, KeyboardKey::KEY_A),
    )
}

/// Translate `camera` by `distance` along the flattened forward and right axes.
pub fn move_camera(camera: &mut Camera3D, forward: f32, right: f32, distance: f32) {
    let mut fx = camera.target.x - camera.position.x;
    let mut fz = camera.target.z - camera.position.z;
    let len = (fx * fx + fz * fz).sqrt();
    if len <= f32::EPSILON {
        return;
    }
    fx /= len;
    fz /= len;

    // forward x up, with up = +Y
    let (rx, rz) = (-fz, fx);

    let offset = Vector3 {
        x: (fx * forward + rx * right) * distance,
        y: 0.0,
        z: (fz * forward + rz * right) * distance,
    };
    camera.position.x += offset.x;
    camera.position.z += offset.z;
    camera.target.x += offset.x;
    camera.target.z += offset.z;
}
