//! Shape generation for 2D primitives

use std::collections::VecDeque;

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::Rect;

/// Trail width at the head, in visual units
pub const TRAIL_WIDTH: f32 = 1.5;

/// Generate vertices for a particle trail (oldest first), fading toward the tail
pub fn particle_trail(trail: &VecDeque<Vec2>, color: [f32; 4]) -> Vec<Vertex> {
    if trail.len() < 2 {
        return Vec::new();
    }

    let mut vertices = Vec::with_capacity((trail.len() - 1) * 6);
    let trail_len = trail.len() as f32;

    for (i, (p1, p2)) in trail.iter().zip(trail.iter().skip(1)).enumerate() {
        // 0 at the tail, 1 at the head
        let t1 = (i + 1) as f32 / trail_len;
        let t2 = (i + 2) as f32 / trail_len;

        let color1 = fade(color, t1 * 0.8);
        let color2 = fade(color, t2 * 0.8);

        let width1 = TRAIL_WIDTH * (0.3 + 0.7 * t1);
        let width2 = TRAIL_WIDTH * (0.3 + 0.7 * t2);

        // Direction from p1 to p2
        let dir = (*p2 - *p1).normalize_or_zero();
        // Perpendicular for width
        let perp = Vec2::new(-dir.y, dir.x);

        // Quad corners
        let v1a = *p1 + perp * width1;
        let v1b = *p1 - perp * width1;
        let v2a = *p2 + perp * width2;
        let v2b = *p2 - perp * width2;

        // Two triangles
        vertices.push(Vertex::new(v1a.x, v1a.y, color1));
        vertices.push(Vertex::new(v1b.x, v1b.y, color1));
        vertices.push(Vertex::new(v2a.x, v2a.y, color2));

        vertices.push(Vertex::new(v2a.x, v2a.y, color2));
        vertices.push(Vertex::new(v1b.x, v1b.y, color1));
        vertices.push(Vertex::new(v2b.x, v2b.y, color2));
    }

    vertices
}

fn fade(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], color[3] * alpha]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(r: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let (x0, y0, x1, y1) = (r.min.x, r.min.y, r.max.x, r.max.y);
    vec![
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}
