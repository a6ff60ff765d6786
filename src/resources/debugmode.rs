//! Debug overlay toggle resource.
//!
//! While this resource exists the renderer draws the per-object overlay
//! (tags, scales, frame rate). F11 adds or removes it.

use bevy_ecs::prelude::Resource;

/// Marker resource: when present, the debug overlay is drawn.
#[derive(Resource, Clone, Copy, Debug)]
pub struct DebugMode {}
