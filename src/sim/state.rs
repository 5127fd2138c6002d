//! Simulation state and core types
//!
//! `LabState` is the single explicit owner of every piece of mutable
//! simulation state: source controls, the particle store, the detector count
//! and the RNG.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// What a particle currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleKind {
    /// Electron from the source; converts at the slab
    Beta,
    /// Bremsstrahlung photon emitted by the slab
    Photon,
    /// Ambient photon crossing the scene; never converts
    BackgroundPhoton,
}

impl ParticleKind {
    /// Whether the detector can absorb this kind
    #[inline]
    pub fn is_photon(self) -> bool {
        matches!(self, ParticleKind::Photon | ParticleKind::BackgroundPhoton)
    }
}

/// A particle in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub kind: ParticleKind,
    /// Ticks left; the particle is removed once this reaches zero
    pub life: i32,
    /// Recent positions, oldest first
    pub trail: VecDeque<Vec2>,
}

impl Particle {
    pub fn new(kind: ParticleKind, pos: Vec2, vel: Vec2, life: i32) -> Self {
        Self {
            pos,
            vel,
            kind,
            life,
            trail: VecDeque::with_capacity(TRAIL_LENGTH + 1),
        }
    }

    /// Record current position to trail, evicting the oldest
    pub fn record_trail(&mut self) {
        self.trail.push_back(self.pos);
        while self.trail.len() > TRAIL_LENGTH {
            self.trail.pop_front();
        }
    }

    /// Change kind; the trail belongs to the previous kind and is dropped
    pub fn transition(&mut self, kind: ParticleKind, vel: Vec2, life: i32) {
        self.kind = kind;
        self.vel = vel;
        self.life = life;
        self.trail.clear();
    }

    /// Mark for removal at the end of this tick
    #[inline]
    pub fn expire(&mut self) {
        self.life = 0;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0
    }
}

/// Controls set by the operator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SourceState {
    pub source_open: bool,
    /// Detector distance in cm, always within [0, MAX_DISTANCE_CM]
    pub detector_distance_cm: f64,
}

impl Default for SourceState {
    fn default() -> Self {
        Self {
            source_open: false,
            detector_distance_cm: 80.0,
        }
    }
}

impl SourceState {
    pub fn set_distance(&mut self, cm: f64) {
        self.detector_distance_cm = crate::clamp_distance_cm(cm);
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct LabState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub source: SourceState,
    /// Particles in flight (order carries no meaning)
    pub particles: Vec<Particle>,
    /// Detector absorptions since the last reset
    pub counts: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl LabState {
    /// Create a new lab state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            source: SourceState::default(),
            particles: Vec::new(),
            counts: 0,
            time_ticks: 0,
        }
    }

    /// Clear the particle store and counts; controls and RNG are kept
    pub fn reset(&mut self) {
        self.particles.clear();
        self.counts = 0;
    }

    /// Number of particles of the given kind
    pub fn count_kind(&self, kind: ParticleKind) -> usize {
        self.particles.iter().filter(|p| p.kind == kind).count()
    }
}
