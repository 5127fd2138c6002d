//! Beta Dose Lab - particle simulation and dose-field engine
//!
//! Models a teaching experiment: a beta source, a PMMA attenuator slab and a
//! movable detector. Two loosely consistent views of the same analytic field
//! are produced: a closed-form dose rate and a particle simulation.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (dose model, emitter, interactions, field)
//! - `clock`: Frame and dose-refresh drivers
//! - `lab`: Controller owning all state, consumed by a UI layer
//! - `renderer`: Renderer-agnostic vertex generation
//! - `narrator`: Seam for the external "explain this reading" collaborator
//! - `settings`: JSON-backed lab configuration

pub mod clock;
pub mod error;
pub mod lab;
pub mod narrator;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use clock::{ClockTicks, SimulationClock};
pub use error::{Error, Result};
pub use lab::{Lab, LabSnapshot, ViewData};
pub use narrator::{FALLBACK_EXPLANATION, Narrator, explain_reading};
pub use settings::Settings;

use glam::Vec2;

/// Lab configuration constants
pub mod consts {
    use glam::Vec2;

    /// Frame driver timestep (display refresh rate)
    pub const FRAME_DT: f32 = 1.0 / 60.0;
    /// Maximum catch-up ticks per frame
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Elapsed time per frame is capped to this (seconds)
    pub const MAX_FRAME_TIME: f32 = 0.1;
    /// Dose display refresh period (seconds)
    pub const DOSE_PERIOD: f32 = 0.5;

    /// Scene dimensions (visual units)
    pub const SCENE_WIDTH: f32 = 800.0;
    pub const SCENE_HEIGHT: f32 = 400.0;
    /// Particles further than this outside the scene are discarded
    pub const BOUNDS_MARGIN: f32 = 20.0;
    /// Beam axis height
    pub const BEAM_Y: f32 = SCENE_HEIGHT / 2.0;
    /// Visual units per centimetre of real distance
    pub const PX_PER_CM: f32 = 3.5;

    /// Source housing mouth (where betas leave the source)
    pub const SOURCE_POS: Vec2 = Vec2::new(60.0, BEAM_Y);

    /// PMMA slab: fixed x-range (thickness) and y-range centred on the beam
    pub const ATTENUATOR_X: f32 = 180.0;
    pub const ATTENUATOR_THICKNESS: f32 = 20.0;
    pub const ATTENUATOR_HEIGHT: f32 = 120.0;

    /// Detector: placed behind the slab, offset by the detector distance
    pub const DETECTOR_GAP: f32 = 10.0;
    pub const DETECTOR_WIDTH: f32 = 40.0;
    pub const DETECTOR_HEIGHT: f32 = 80.0;
    pub const MAX_DISTANCE_CM: f64 = 150.0;

    /// Trail positions kept per particle
    pub const TRAIL_LENGTH: usize = 10;

    /// Beta cone
    pub const BETAS_PER_TICK: usize = 3;
    pub const BETA_SPEED: f32 = 6.0;
    pub const BETA_LATERAL_SPREAD: f32 = 0.8;
    pub const BETA_ORIGIN_JITTER: f32 = 3.0;
    pub const BETA_LIFE: i32 = 200;

    /// Ambient background photons
    pub const BACKGROUND_PROBABILITY: f64 = 0.3;
    pub const BACKGROUND_SPEED_MIN: f32 = 1.5;
    pub const BACKGROUND_SPEED_MAX: f32 = 3.0;
    pub const BACKGROUND_DRIFT: f32 = 1.0;
    pub const BACKGROUND_LIFE: i32 = 400;

    /// Bremsstrahlung photons emitted from the slab
    pub const PHOTON_SPEED: f32 = 4.0;
    /// Total angular spread (±60° around +x)
    pub const PHOTON_CONE: f32 = std::f32::consts::PI / 1.5;
    pub const PHOTON_LIFE: i32 = 400;

    /// Dose model (µSv/h, metres)
    pub const DOSE_K: f64 = 0.170;
    pub const DOSE_MU: f64 = 0.02;
    pub const DOSE_BACKGROUND: f64 = 0.15;
    pub const MIN_DISTANCE_M: f64 = 0.01;
    pub const NOISE_MIN: f64 = 0.98;
    pub const NOISE_MAX: f64 = 1.02;

    /// Heatmap sampling
    pub const FIELD_BLOCK: f32 = 8.0;
    /// Dose mapped to the red end of the colour ramp
    pub const FIELD_MAX_DOSE: f64 = 50.0;
    pub const FIELD_ALPHA: f32 = 0.35;
}

/// Clamp a detector distance into [0, MAX_DISTANCE_CM]; NaN maps to 0
#[inline]
pub fn clamp_distance_cm(cm: f64) -> f64 {
    if cm.is_nan() {
        return 0.0;
    }
    cm.clamp(0.0, consts::MAX_DISTANCE_CM)
}

/// Convert a visual-space length to centimetres
#[inline]
pub fn px_to_cm(px: f32) -> f64 {
    f64::from(px / consts::PX_PER_CM)
}

/// Unit vector at `angle` radians from +x
#[inline]
pub fn direction(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_distance() {
        assert_eq!(clamp_distance_cm(-5.0), 0.0);
        assert_eq!(clamp_distance_cm(80.0), 80.0);
        assert_eq!(clamp_distance_cm(400.0), 150.0);
        assert_eq!(clamp_distance_cm(f64::NAN), 0.0);
    }

    #[test]
    fn test_px_to_cm() {
        assert!((px_to_cm(35.0) - 10.0).abs() < 1e-6);
    }
}
