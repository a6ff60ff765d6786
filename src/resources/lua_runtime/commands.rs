//! Commands queued by Lua scripts.
//!
//! Lua cannot borrow ECS data while a script runs, so mutations are recorded
//! here and applied once the script pass is over.

/// Transform write addressed by object tag.
///
/// Values are absolute, not deltas. Rotation is in degrees.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformCmd {
    SetScale { tag: String, x: f32, y: f32, z: f32 },
    SetTranslation { tag: String, x: f32, y: f32, z: f32 },
    SetRotation { tag: String, x: f32, y: f32, z: f32 },
}

impl TransformCmd {
    /// Tag of the object this command targets.
    pub fn tag(&self) -> &str {
        match self {
            TransformCmd::SetScale { tag, .. }
            | TransformCmd::SetTranslation { tag, .. }
            | TransformCmd::SetRotation { tag, .. } => tag,
        }
    }
}
