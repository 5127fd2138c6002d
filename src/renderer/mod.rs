//! Renderer-agnostic render pass
//!
//! Turns the published lab state into a flat triangle list. The host
//! (canvas, WebGPU, anything) uploads `RenderFrame::vertices` as-is.

pub mod shapes;
pub mod vertex;

pub use vertex::{Vertex, colors};

use crate::consts::{SCENE_HEIGHT, SCENE_WIDTH, SOURCE_POS};
use crate::sim::{
    DoseField, LabState, Particle, Rect, attenuator_rect, detector_rect, dose_color,
};

/// Particle head radius
const HEAD_RADIUS: f32 = 2.0;
const HEAD_SEGMENTS: u32 = 6;

/// One frame of geometry
#[derive(Debug, Clone, Default)]
pub struct RenderFrame {
    pub vertices: Vec<Vertex>,
}

impl RenderFrame {
    pub fn as_bytes(&self) -> &[u8] {
        vertex::as_bytes(&self.vertices)
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

/// Source housing, slab and detector
fn fixtures(state: &LabState, out: &mut Vec<Vertex>) {
    let scene = Rect::new(0.0, 0.0, SCENE_WIDTH, SCENE_HEIGHT);
    out.extend(shapes::rect(&scene, colors::SCENE_BACKGROUND));

    let housing = Rect::centered(
        SOURCE_POS - glam::Vec2::new(15.0, 0.0),
        glam::Vec2::new(30.0, 30.0),
    );
    out.extend(shapes::rect(&housing, colors::SOURCE_HOUSING));
    if state.source.source_open {
        out.extend(shapes::circle(SOURCE_POS, 4.0, colors::SOURCE_OPEN, 12));
    }

    out.extend(shapes::rect(&attenuator_rect(), colors::ATTENUATOR));
    out.extend(shapes::rect(
        &detector_rect(state.source.detector_distance_cm),
        colors::DETECTOR,
    ));
}

/// Trails plus a dot at each particle's head
pub fn particles(particles: &[Particle], out: &mut Vec<Vertex>) {
    for particle in particles {
        let color = colors::particle(particle.kind);
        out.extend(shapes::particle_trail(&particle.trail, color));
        out.extend(shapes::circle(particle.pos, HEAD_RADIUS, color, HEAD_SEGMENTS));
    }
}

/// One translucent quad per field block
pub fn heatmap(field: &DoseField, out: &mut Vec<Vertex>) {
    out.reserve(field.values.len() * 6);
    for (column, row, dose) in field.cells() {
        let center = field.block_center(column, row);
        let block = Rect::centered(center, glam::Vec2::splat(field.block_size));
        out.extend(shapes::rect(&block, dose_color(dose).to_rgba()));
    }
}

/// Build the frame for the current view
///
/// With a field the heatmap replaces the particle trails.
pub fn render_pass(state: &LabState, field: Option<&DoseField>) -> RenderFrame {
    let mut vertices = Vec::new();
    fixtures(state, &mut vertices);
    match field {
        Some(field) => heatmap(field, &mut vertices),
        None => particles(&state.particles, &mut vertices),
    }
    RenderFrame { vertices }
}
