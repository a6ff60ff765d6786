use bevy_ecs::prelude::Component;
use raylib::prelude::Vector3;

/// Per-axis scale factor applied when drawing an object.
///
/// Values are not validated: zero or negative factors are passed through to
/// the renderer as-is.
#[derive(Component, Clone, Debug, Copy, PartialEq)]
pub struct Scale {
    pub scale: Vector3,
}

impl Scale {
    pub fn new(sx: f32, sy: f32, sz: f32) -> Self {
        Self {
            scale: Vector3 {
                x: sx,
                y: sy,
                z: sz,
            },
        }
    }

    /// Same factor on all three axes.
    pub fn uniform(s: f32) -> Self {
        Self::new(s, s, s)
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_default_is_identity() {
        let s = Scale::default();
        assert_eq!(s.scale.x, 1.0);
        assert_eq!(s.scale.y, 1.0);
        assert_eq!(s.scale.z, 1.0);
    }

    #[test]
    fn test_scale_uniform() {
        assert_eq!(Scale::uniform(-0.25), Scale::new(-0.25, -0.25, -0.25));
    }
}
