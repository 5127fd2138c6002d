//! Frame and dose-refresh drivers
//!
//! Both drivers are fixed-step accumulators fed with wall-clock time by the
//! host loop, so they interleave on one thread and never run concurrently.

use crate::consts::{DOSE_PERIOD, FRAME_DT, MAX_FRAME_TIME, MAX_SUBSTEPS};

/// Work due after advancing the clock
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockTicks {
    /// Simulation ticks to run
    pub frames: u32,
    /// Dose samples to take
    pub dose_samples: u32,
}

impl ClockTicks {
    pub fn is_idle(&self) -> bool {
        self.frames == 0 && self.dose_samples == 0
    }
}

#[derive(Debug, Clone)]
pub struct SimulationClock {
    running: bool,
    frame_dt: f32,
    dose_period: f32,
    frame_accumulator: f32,
    dose_accumulator: f32,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(FRAME_DT, DOSE_PERIOD)
    }
}

impl SimulationClock {
    pub fn new(frame_dt: f32, dose_period: f32) -> Self {
        Self {
            running: false,
            frame_dt,
            dose_period,
            frame_accumulator: 0.0,
            dose_accumulator: 0.0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start both drivers; no-op when already running
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        log::info!(
            "Clock started (frame {:.4}s, dose every {:.3}s)",
            self.frame_dt,
            self.dose_period
        );
    }

    /// Stop both drivers and drop any pending partial step
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.frame_accumulator = 0.0;
        self.dose_accumulator = 0.0;
        log::info!("Clock stopped");
    }

    /// Feed `elapsed` seconds of wall-clock time
    pub fn advance(&mut self, elapsed: f32) -> ClockTicks {
        if !self.running || !elapsed.is_finite() || elapsed <= 0.0 {
            return ClockTicks::default();
        }
        let elapsed = elapsed.min(MAX_FRAME_TIME);

        let mut ticks = ClockTicks::default();

        self.frame_accumulator += elapsed;
        while self.frame_dt > 0.0
            && self.frame_accumulator >= self.frame_dt
            && ticks.frames < MAX_SUBSTEPS
        {
            self.frame_accumulator -= self.frame_dt;
            ticks.frames += 1;
        }
        // Drop backlog we could not catch up on
        if ticks.frames == MAX_SUBSTEPS {
            self.frame_accumulator = self.frame_accumulator.min(self.frame_dt);
        }

        // A non-positive period would never drain the accumulator
        if !(self.dose_period.is_finite() && self.dose_period > 0.0) {
            return ticks;
        }
        self.dose_accumulator += elapsed;
        while self.dose_accumulator >= self.dose_period {
            self.dose_accumulator -= self.dose_period;
            ticks.dose_samples += 1;
        }

        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_clock_is_idle() {
        let mut clock = SimulationClock::default();
        assert!(clock.advance(1.0).is_idle());
    }

    #[test]
    fn test_start_stop_idempotent() {
        let mut clock = SimulationClock::default();
        clock.start();
        clock.start();
        assert!(clock.is_running());
        clock.advance(FRAME_DT * 0.5);
        clock.stop();
        clock.stop();
        assert!(!clock.is_running());
        assert!(clock.advance(0.05).is_idle());
        // Restart does not resurrect the half step from before the stop
        clock.start();
        assert_eq!(clock.advance(FRAME_DT * 0.6).frames, 0);
    }

    #[test]
    fn test_one_frame_per_refresh() {
        let mut clock = SimulationClock::default();
        clock.start();
        let mut frames = 0;
        for _ in 0..60 {
            frames += clock.advance(FRAME_DT + 1e-5).frames;
        }
        assert_eq!(frames, 60);
    }

    #[test]
    fn test_dose_period_independent_of_frames() {
        let mut clock = SimulationClock::default();
        clock.start();
        let mut samples = 0;
        // Two seconds in uneven slices
        for _ in 0..40 {
            samples += clock.advance(0.05 + 1e-6).dose_samples;
        }
        assert_eq!(samples, 4);
    }

    #[test]
    fn test_substeps_capped() {
        let mut clock = SimulationClock::new(0.001, DOSE_PERIOD);
        clock.start();
        assert_eq!(clock.advance(10.0).frames, MAX_SUBSTEPS);
    }

    #[test]
    fn test_zero_dose_period_yields_no_samples() {
        let mut clock = SimulationClock::new(FRAME_DT, 0.0);
        clock.start();
        let ticks = clock.advance(0.016);
        assert_eq!(ticks.dose_samples, 0);

        let mut clock = SimulationClock::new(0.0, f32::NAN);
        clock.start();
        assert!(clock.advance(0.05).is_idle());
    }

    #[test]
    fn test_bad_elapsed_ignored() {
        let mut clock = SimulationClock::default();
        clock.start();
        assert!(clock.advance(f32::NAN).is_idle());
        assert!(clock.advance(-1.0).is_idle());
    }
}
