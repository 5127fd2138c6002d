//! Per-particle motion and interaction resolution
//!
//! Each live particle goes through the same fixed sequence every tick:
//! move, record trail, slab conversion (betas), detector absorption (photons),
//! bounds cleanup, life decrement. All branches are total; nothing here can
//! fail.

use glam::Vec2;
use rand::Rng;

use super::geometry::Rect;
use super::state::{Particle, ParticleKind};
use crate::consts::*;

/// Geometry a tick resolves against
///
/// The detector is recomputed by the caller every tick since the distance
/// can change between ticks.
#[derive(Debug, Clone, Copy)]
pub struct Scene {
    pub attenuator: Rect,
    pub detector: Rect,
    pub bounds: Rect,
}

impl Scene {
    pub fn for_distance(distance_cm: f64) -> Self {
        Self {
            attenuator: super::geometry::attenuator_rect(),
            detector: super::geometry::detector_rect(distance_cm),
            bounds: super::geometry::cleanup_bounds(),
        }
    }
}

/// What happened to a particle this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Moved, nothing else
    None,
    /// Beta converted to a photon in the slab
    Converted,
    /// Photon absorbed by the detector
    Detected,
    /// Left the scene bounds
    Escaped,
    /// Ran out of life
    Expired,
}

/// Bremsstrahlung re-emission velocity: fixed speed, ±60° around +x
pub fn bremsstrahlung_velocity<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    let half = PHOTON_CONE / 2.0;
    let angle = rng.random_range(-half..=half);
    crate::direction(angle) * PHOTON_SPEED
}

/// Advance one particle by one tick
///
/// Life is decremented every tick; a beta converting in the slab is given a
/// fresh photon budget. Callers drop the particle when it is no longer
/// alive afterwards.
pub fn resolve<R: Rng + ?Sized>(
    particle: &mut Particle,
    scene: &Scene,
    rng: &mut R,
) -> Interaction {
    particle.pos += particle.vel;
    particle.record_trail();

    let mut outcome = Interaction::None;

    if particle.kind == ParticleKind::Beta && scene.attenuator.contains(particle.pos) {
        let vel = bremsstrahlung_velocity(rng);
        particle.transition(ParticleKind::Photon, vel, PHOTON_LIFE);
        outcome = Interaction::Converted;
    }

    if particle.kind.is_photon() && scene.detector.contains(particle.pos) {
        particle.expire();
        outcome = Interaction::Detected;
    }

    if !scene.bounds.contains(particle.pos) && outcome != Interaction::Detected {
        particle.expire();
        outcome = Interaction::Escaped;
    }

    particle.life -= 1;
    if !particle.is_alive() && outcome == Interaction::None {
        outcome = Interaction::Expired;
    }

    outcome
}
