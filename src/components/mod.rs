//! ECS components for scene objects.
//!
//! Submodules overview:
//! - [`rotation`] – Euler rotation in degrees
//! - [`scale`] – per-axis scale factor
//! - [`tag`] – string name used to address an object
//! - [`tint`] – draw color
//! - [`translation`] – world-space position

pub mod rotation;
pub mod scale;
pub mod tag;
pub mod tint;
pub mod translation;
