use beta_dose_lab::consts::*;
use beta_dose_lab::sim::{LabState, compute_dose, sample_noisy_dose, tick};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

proptest! {
    #[test]
    fn dose_strictly_decreasing(d in 1.0f64..149.0, step in 0.05f64..50.0) {
        let far = (d + step).min(MAX_DISTANCE_CM);
        prop_assume!(far > d);
        prop_assert!(compute_dose(d, true) > compute_dose(far, true));
    }

    #[test]
    fn closed_source_is_exactly_background(d in -50.0f64..500.0) {
        prop_assert_eq!(compute_dose(d, false), DOSE_BACKGROUND);
    }

    #[test]
    fn noisy_sample_within_two_percent(
        seed in any::<u64>(),
        d in 0.0f64..150.0,
        open in any::<bool>()
    ) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let pure = compute_dose(d, open);
        let noisy = sample_noisy_dose(d, open, &mut rng);
        prop_assert!((noisy - pure).abs() <= pure * 0.02 + 1e-12);
    }

    #[test]
    fn trails_never_exceed_limit(seed in any::<u64>(), distance in 0.0f64..150.0) {
        let mut state = LabState::new(seed);
        state.source.source_open = true;
        state.source.set_distance(distance);
        for _ in 0..150 {
            tick(&mut state);
            prop_assert!(state.particles.iter().all(|p| p.trail.len() <= TRAIL_LENGTH));
        }
    }

    #[test]
    fn counts_are_monotonic(seed in any::<u64>()) {
        let mut state = LabState::new(seed);
        state.source.source_open = true;
        state.source.set_distance(20.0);
        let mut last = 0;
        for _ in 0..150 {
            let report = tick(&mut state);
            prop_assert_eq!(state.counts, last + report.detected as u64);
            last = state.counts;
        }
    }
}
