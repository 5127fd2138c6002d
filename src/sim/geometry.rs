//! Static scene geometry
//!
//! Everything is an axis-aligned rectangle in visual space (x right, y down).
//! Only the detector moves, and its placement is a pure function of the
//! current detector distance so it can be recomputed every tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            max: Vec2::new(x + width, y + height),
        }
    }

    /// Rectangle of the given size centred on `center`
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) / 2.0
    }

    /// Inclusive point containment
    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Grow by `margin` on every side
    pub fn expanded(&self, margin: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(margin),
            max: self.max + Vec2::splat(margin),
        }
    }
}

/// The visible scene
pub fn scene_rect() -> Rect {
    Rect::new(0.0, 0.0, SCENE_WIDTH, SCENE_HEIGHT)
}

/// Bounds outside of which a particle is discarded
pub fn cleanup_bounds() -> Rect {
    scene_rect().expanded(BOUNDS_MARGIN)
}

/// The PMMA slab
pub fn attenuator_rect() -> Rect {
    Rect::new(
        ATTENUATOR_X,
        BEAM_Y - ATTENUATOR_HEIGHT / 2.0,
        ATTENUATOR_THICKNESS,
        ATTENUATOR_HEIGHT,
    )
}

/// Centre of the slab; the heatmap measures distance from here
pub fn attenuator_center() -> Vec2 {
    attenuator_rect().center()
}

/// Detector volume for the given distance (cm, clamped)
pub fn detector_rect(distance_cm: f64) -> Rect {
    let distance = crate::clamp_distance_cm(distance_cm) as f32;
    let left = ATTENUATOR_X + ATTENUATOR_THICKNESS + DETECTOR_GAP + distance * PX_PER_CM;
    Rect::new(
        left,
        BEAM_Y - DETECTOR_HEIGHT / 2.0,
        DETECTOR_WIDTH,
        DETECTOR_HEIGHT,
    )
}
