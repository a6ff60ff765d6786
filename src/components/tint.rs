//! Color tint component for rendering objects.
//!
//! The [`Tint`] component sets the solid color used when drawing an object.
//! Objects without a tint are drawn white.

use bevy_ecs::prelude::Component;
use raylib::prelude::Color;

/// Solid draw color of an object.
#[derive(Component, Clone, Debug, Copy)]
pub struct Tint {
    pub color: Color,
}

impl Tint {
    /// Create a new opaque Tint from RGB values.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            color: Color::new(r, g, b, 255),
        }
    }

    /// Darker variant of the tint, used for wireframe edges.
    pub fn edge(&self) -> Color {
        Color::new(self.color.r / 2, self.color.g / 2, self.color.b / 2, self.color.a)
    }
}

impl Default for Tint {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tint_default_is_white() {
        let tint = Tint::default();
        assert_eq!(tint.color.r, 255);
        assert_eq!(tint.color.g, 255);
        assert_eq!(tint.color.b, 255);
        assert_eq!(tint.color.a, 255);
    }

    #[test]
    fn test_tint_edge_halves_rgb() {
        let tint = Tint::rgb(200, 100, 50);
        let edge = tint.edge();
        assert_eq!((edge.r, edge.g, edge.b, edge.a), (100, 50, 25, 255));
    }
}
