//! Deterministic simulation module
//!
//! All physics lives here. This module must be pure and deterministic:
//! - One tick per frame-driver step, unit time-step
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod dose;
pub mod emitter;
pub mod field;
pub mod geometry;
pub mod interaction;
pub mod state;
pub mod tick;

pub use dose::{DoseReading, compute_dose, sample_noisy_dose};
pub use emitter::{Edge, emit};
pub use field::{DoseField, Hsla, dose_color, sample_field};
pub use geometry::{Rect, attenuator_center, attenuator_rect, detector_rect};
pub use interaction::{Interaction, Scene, resolve};
pub use state::{LabState, Particle, ParticleKind, SourceState};
pub use tick::{TickReport, tick};
