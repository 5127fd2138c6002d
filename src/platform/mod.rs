//! Platform abstraction layer
//!
//! Browser bindings live in `web` (wasm32 only). Native hosts drive
//! [`crate::Lab`] directly.

#[cfg(target_arch = "wasm32")]
pub mod web;

/// Default settings file looked up by the native runner
pub const SETTINGS_FILE: &str = "beta_dose_lab.json";
