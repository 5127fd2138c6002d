//! Particle spawning
//!
//! Two sources feed the store each tick: a directed beta cone from the source
//! housing while it is open, and isotropic ambient photons entering from the
//! scene edges regardless of source state.

use glam::Vec2;
use rand::Rng;

use super::state::{Particle, ParticleKind, SourceState};
use crate::consts::*;

/// Scene edge a background photon enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

impl Edge {
    const ALL: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

    /// Unit vector pointing into the scene
    pub fn inward(self) -> Vec2 {
        match self {
            Edge::Top => Vec2::Y,
            Edge::Right => Vec2::NEG_X,
            Edge::Bottom => Vec2::NEG_Y,
            Edge::Left => Vec2::X,
        }
    }

    /// Point on this edge at fraction `t` along it
    pub fn point_at(self, t: f32) -> Vec2 {
        match self {
            Edge::Top => Vec2::new(t * SCENE_WIDTH, 0.0),
            Edge::Right => Vec2::new(SCENE_WIDTH, t * SCENE_HEIGHT),
            Edge::Bottom => Vec2::new(t * SCENE_WIDTH, SCENE_HEIGHT),
            Edge::Left => Vec2::new(0.0, t * SCENE_HEIGHT),
        }
    }
}

/// New particles for this tick
///
/// `tick` is currently only used for tracing; spawn rates are per-tick
/// constants.
pub fn emit<R: Rng + ?Sized>(source: &SourceState, tick: u64, rng: &mut R) -> Vec<Particle> {
    let mut spawned = Vec::with_capacity(BETAS_PER_TICK + 1);

    if source.source_open {
        for _ in 0..BETAS_PER_TICK {
            spawned.push(spawn_beta(rng));
        }
    }

    if rng.random_bool(BACKGROUND_PROBABILITY) {
        spawned.push(spawn_background(rng));
    }

    log::trace!("tick {}: emitted {} particles", tick, spawned.len());
    spawned
}

/// A beta leaving the housing, mostly along +x
pub fn spawn_beta<R: Rng + ?Sized>(rng: &mut R) -> Particle {
    let jitter = rng.random_range(-BETA_ORIGIN_JITTER..=BETA_ORIGIN_JITTER);
    let lateral = rng.random_range(-BETA_LATERAL_SPREAD..=BETA_LATERAL_SPREAD);
    Particle::new(
        ParticleKind::Beta,
        SOURCE_POS + Vec2::new(0.0, jitter),
        Vec2::new(BETA_SPEED, lateral),
        BETA_LIFE,
    )
}

/// An ambient photon entering from a random edge
pub fn spawn_background<R: Rng + ?Sized>(rng: &mut R) -> Particle {
    let edge = Edge::ALL[rng.random_range(0..Edge::ALL.len())];
    let pos = edge.point_at(rng.random::<f32>());
    let inward = edge.inward();
    let tangent = inward.perp();
    let speed = rng.random_range(BACKGROUND_SPEED_MIN..=BACKGROUND_SPEED_MAX);
    let drift = rng.random_range(-BACKGROUND_DRIFT..=BACKGROUND_DRIFT);
    Particle::new(
        ParticleKind::BackgroundPhoton,
        pos,
        inward * speed + tangent * drift,
        BACKGROUND_LIFE,
    )
}
