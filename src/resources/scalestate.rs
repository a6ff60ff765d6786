//! Accumulated uniform scale driven by the frame binder.
//!
//! [`ScaleState`] is owned by the ECS world and handed to
//! [`FrameInputBinder::tick`](crate::systems::framebinder::FrameInputBinder::tick)
//! every frame. It starts at zero, is only written by the binder, and is never
//! clamped: holding a key long enough drives it to any magnitude, including
//! zero and negative scales.

use bevy_ecs::prelude::Resource;

#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct ScaleState {
    pub x: f32,
}

impl ScaleState {
    pub fn new(x: f32) -> Self {
        Self { x }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalestate_starts_at_zero() {
        assert_eq!(ScaleState::default().x, 0.0);
    }
}
