//! Event types and observers.
//!
//! Submodules:
//! - [`switchdebug`] – toggle the debug overlay on/off
pub mod switchdebug;
