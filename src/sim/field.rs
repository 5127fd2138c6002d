//! Dose field sampling for the heatmap view
//!
//! Samples the closed-form dose model on a grid of square blocks. Distance is
//! measured from the attenuator centre, not the detector, so the field is a
//! pure function of the source state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::dose::dose_at_metres;
use super::geometry::attenuator_center;
use crate::consts::*;

/// Colour in HSLA (hue degrees, saturation/lightness/alpha in 0-1)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsla {
    pub h: f32,
    pub s: f32,
    pub l: f32,
    pub a: f32,
}

impl Hsla {
    /// Convert to linear RGBA components in 0-1
    pub fn to_rgba(self) -> [f32; 4] {
        let c = (1.0 - (2.0 * self.l - 1.0).abs()) * self.s;
        let h = (self.h.rem_euclid(360.0)) / 60.0;
        let x = c * (1.0 - (h % 2.0 - 1.0).abs());
        let (r, g, b) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = self.l - c / 2.0;
        [r + m, g + m, b + m, self.a]
    }
}

/// Normalised position of `dose` on the log colour ramp (0 = background, 1 = max)
pub fn dose_to_ramp(dose: f64) -> f32 {
    let lo = DOSE_BACKGROUND.log10();
    let hi = FIELD_MAX_DOSE.log10();
    let t = (dose.max(f64::MIN_POSITIVE).log10() - lo) / (hi - lo);
    t.clamp(0.0, 1.0) as f32
}

/// Heatmap colour for a dose value: blue (background) to red (hot)
pub fn dose_color(dose: f64) -> Hsla {
    let t = dose_to_ramp(dose);
    Hsla {
        h: 240.0 * (1.0 - t),
        s: 1.0,
        l: 0.5,
        a: FIELD_ALPHA,
    }
}

/// Sampled dose grid, row-major
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoseField {
    pub columns: usize,
    pub rows: usize,
    pub block_size: f32,
    pub source_open: bool,
    pub values: Vec<f64>,
}

impl DoseField {
    /// Dose of the block at (column, row)
    pub fn get(&self, column: usize, row: usize) -> Option<f64> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.values.get(row * self.columns + column).copied()
    }

    /// Centre of the block at (column, row)
    pub fn block_center(&self, column: usize, row: usize) -> Vec2 {
        Vec2::new(
            (column as f32 + 0.5) * self.block_size,
            (row as f32 + 0.5) * self.block_size,
        )
    }

    /// Block containing `p`, if inside the grid
    pub fn block_at(&self, p: Vec2) -> Option<(usize, usize)> {
        if p.x < 0.0 || p.y < 0.0 {
            return None;
        }
        let column = (p.x / self.block_size) as usize;
        let row = (p.y / self.block_size) as usize;
        (column < self.columns && row < self.rows).then_some((column, row))
    }

    /// Iterate (column, row, dose)
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(i, &v)| (i % self.columns, i / self.columns, v))
    }
}

/// Sample the dose field over the whole scene
pub fn sample_field(source_open: bool) -> DoseField {
    let columns = (SCENE_WIDTH / FIELD_BLOCK).ceil() as usize;
    let rows = (SCENE_HEIGHT / FIELD_BLOCK).ceil() as usize;
    let origin = attenuator_center();

    let mut field = DoseField {
        columns,
        rows,
        block_size: FIELD_BLOCK,
        source_open,
        values: Vec::with_capacity(columns * rows),
    };

    for row in 0..rows {
        for column in 0..columns {
            let value = if source_open {
                let px = field.block_center(column, row).distance(origin);
                dose_at_metres(crate::px_to_cm(px) / 100.0)
            } else {
                DOSE_BACKGROUND
            };
            field.values.push(value);
        }
    }

    field
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_covers_scene() {
        let field = sample_field(true);
        assert_eq!(field.columns, 100);
        assert_eq!(field.rows, 50);
        assert_eq!(field.values.len(), field.columns * field.rows);
    }

    #[test]
    fn test_attenuator_block_is_hottest_when_open() {
        let field = sample_field(true);
        let (column, row) = field
            .block_at(attenuator_center())
            .expect("attenuator is inside the grid");
        let dose = field.get(column, row).unwrap_or_default();
        assert_eq!(dose_to_ramp(dose), 1.0);
        assert_eq!(dose_color(dose).h, 0.0);
        let max = field.values.iter().cloned().fold(f64::MIN, f64::max);
        assert_eq!(dose, max);
    }

    #[test]
    fn test_closed_source_field_is_background() {
        let field = sample_field(false);
        assert!(field.values.iter().all(|&v| v == DOSE_BACKGROUND));
        let (column, row) = field.block_at(attenuator_center()).unwrap_or((0, 0));
        let color = dose_color(field.get(column, row).unwrap_or_default());
        assert_eq!(color.h, 240.0);
        assert_eq!(color.a, FIELD_ALPHA);
    }

    #[test]
    fn test_field_falls_off_with_distance() {
        let field = sample_field(true);
        let (c, r) = field.block_at(attenuator_center()).unwrap_or((0, 0));
        let near = field.get(c + 2, r).unwrap_or_default();
        let far = field.get(c + 40, r).unwrap_or_default();
        assert!(near > far);
        assert!(far > DOSE_BACKGROUND);
    }

    #[test]
    fn test_hsla_to_rgba_endpoints() {
        let red = Hsla { h: 0.0, s: 1.0, l: 0.5, a: 1.0 }.to_rgba();
        let blue = Hsla { h: 240.0, s: 1.0, l: 0.5, a: 0.35 }.to_rgba();
        let close = |a: [f32; 4], b: [f32; 4]| a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-5);
        assert!(close(red, [1.0, 0.0, 0.0, 1.0]));
        assert!(close(blue, [0.0, 0.0, 1.0, 0.35]));
    }

    #[test]
    fn test_ramp_is_log_scaled() {
        assert_eq!(dose_to_ramp(DOSE_BACKGROUND), 0.0);
        assert_eq!(dose_to_ramp(FIELD_MAX_DOSE), 1.0);
        let mid = (DOSE_BACKGROUND * FIELD_MAX_DOSE).sqrt();
        assert!((dose_to_ramp(mid) - 0.5).abs() < 1e-4);
        assert_eq!(dose_to_ramp(0.0), 0.0);
    }
}
