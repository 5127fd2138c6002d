//! Closed-form dose-rate model
//!
//! H*(10) rate in µSv/h at the detector:
//!
//! ```text
//! H(d) = b + K * exp(-mu * d) / d^2     (source open, d in metres, d >= 0.01)
//! H(d) = b                              (source closed)
//! ```
//!
//! Independent of the particle simulation; the two only share geometry.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Pure dose rate (µSv/h) at `distance_cm` from the source
pub fn compute_dose(distance_cm: f64, source_open: bool) -> f64 {
    if !source_open {
        return DOSE_BACKGROUND;
    }
    let d = (crate::clamp_distance_cm(distance_cm) / 100.0).max(MIN_DISTANCE_M);
    dose_at_metres(d)
}

/// Source-open dose at `d` metres (floored at the minimum distance)
#[inline]
pub fn dose_at_metres(d: f64) -> f64 {
    let d = d.max(MIN_DISTANCE_M);
    DOSE_BACKGROUND + DOSE_K * (-DOSE_MU * d).exp() / (d * d)
}

/// Dose with multiplicative detector fluctuation in [NOISE_MIN, NOISE_MAX]
pub fn sample_noisy_dose<R: Rng + ?Sized>(
    distance_cm: f64,
    source_open: bool,
    rng: &mut R,
) -> f64 {
    let factor = rng.random_range(NOISE_MIN..=NOISE_MAX);
    compute_dose(distance_cm, source_open) * factor
}

/// Latest displayed dose value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoseReading {
    pub distance_cm: f64,
    pub source_open: bool,
    /// Model value before noise
    pub pure: f64,
    /// Value shown to the operator
    pub value: f64,
}

impl DoseReading {
    /// Take a noisy sample
    pub fn sample<R: Rng + ?Sized>(distance_cm: f64, source_open: bool, rng: &mut R) -> Self {
        let distance_cm = crate::clamp_distance_cm(distance_cm);
        let pure = compute_dose(distance_cm, source_open);
        let value = sample_noisy_dose(distance_cm, source_open, rng);
        Self {
            distance_cm,
            source_open,
            pure,
            value,
        }
    }

    /// Background-only reading shown right after a reset
    pub fn background(distance_cm: f64) -> Self {
        Self {
            distance_cm: crate::clamp_distance_cm(distance_cm),
            source_open: false,
            pure: DOSE_BACKGROUND,
            value: DOSE_BACKGROUND,
        }
    }

    /// Display string, 3 decimals
    pub fn display(&self) -> String {
        format!("{:.3}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_closed_source_is_background() {
        for d in [0.0, 1.0, 37.5, 80.0, 150.0, -4.0, 9000.0] {
            assert_eq!(compute_dose(d, false), DOSE_BACKGROUND);
        }
    }

    #[test]
    fn test_80cm_reading() {
        let dose = compute_dose(80.0, true);
        assert_eq!(format!("{:.3}", dose), "0.411");
    }

    #[test]
    fn test_minimum_distance_clamp() {
        // 0 cm and 1 cm both land on the 0.01 m floor
        let at_zero = compute_dose(0.0, true);
        let at_one = compute_dose(1.0, true);
        assert_eq!(at_zero, at_one);
        let expected = DOSE_BACKGROUND + DOSE_K * (-DOSE_MU * 0.01f64).exp() / 1e-4;
        assert!((at_one - expected).abs() < 1e-9);
        // Nothing else in range is higher
        for cm in 2..=150 {
            assert!(compute_dose(cm as f64, true) < at_one);
        }
    }

    #[test]
    fn test_noise_bounds() {
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..1000 {
            let pure = compute_dose(50.0, true);
            let noisy = sample_noisy_dose(50.0, true, &mut rng);
            assert!(noisy >= pure * NOISE_MIN - 1e-12);
            assert!(noisy <= pure * NOISE_MAX + 1e-12);
        }
    }

    #[test]
    fn test_reading_display() {
        let reading = DoseReading::background(80.0);
        assert_eq!(reading.display(), "0.150");
        assert!(!reading.source_open);

        let mut rng = Pcg32::seed_from_u64(9);
        let reading = DoseReading::sample(200.0, true, &mut rng);
        assert_eq!(reading.distance_cm, MAX_DISTANCE_CM);
        assert_eq!(reading.display().split('.').nth(1).map(str::len), Some(3));
    }
}
