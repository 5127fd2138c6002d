//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Bytes per vertex in an upload buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// View a vertex slice as raw bytes for upload
pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

/// Colors for scene elements
pub mod colors {
    use crate::sim::ParticleKind;

    pub const SCENE_BACKGROUND: [f32; 4] = [0.04, 0.05, 0.08, 1.0];
    pub const SOURCE_HOUSING: [f32; 4] = [0.45, 0.45, 0.5, 1.0];
    pub const SOURCE_OPEN: [f32; 4] = [1.0, 0.85, 0.2, 1.0];
    pub const ATTENUATOR: [f32; 4] = [0.55, 0.8, 0.95, 0.45];
    pub const DETECTOR: [f32; 4] = [0.3, 0.9, 0.45, 0.8];

    pub const BETA: [f32; 4] = [0.35, 0.6, 1.0, 1.0];
    pub const PHOTON: [f32; 4] = [1.0, 0.9, 0.3, 1.0];
    pub const BACKGROUND_PHOTON: [f32; 4] = [0.7, 0.7, 0.75, 0.7];

    /// Head color for a particle kind
    pub fn particle(kind: ParticleKind) -> [f32; 4] {
        match kind {
            ParticleKind::Beta => BETA,
            ParticleKind::Photon => PHOTON,
            ParticleKind::BackgroundPhoton => BACKGROUND_PHOTON,
        }
    }
}
