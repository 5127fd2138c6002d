//! Lab controller
//!
//! Owns every piece of mutable state, receives operator input from the UI
//! layer and publishes readings. All mutation happens through `&mut Lab`, so
//! a host that spreads work over threads has to put the whole lab behind a
//! single lock or a single owning task.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::clock::{ClockTicks, SimulationClock};
use crate::consts::DOSE_BACKGROUND;
use crate::narrator::{Narrator, explain_reading};
use crate::renderer::{RenderFrame, render_pass};
use crate::settings::Settings;
use crate::sim::{DoseField, DoseReading, LabState, ParticleKind, TickReport, sample_field, tick};

/// Particle as published to the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub kind: ParticleKind,
    pub life: i32,
    pub trail: Vec<Vec2>,
}

/// Either the trail view or the heatmap view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ViewData {
    Particles { particles: Vec<ParticleView> },
    Heatmap { field: DoseField },
}

/// Everything the UI needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabSnapshot {
    /// Noisy dose rate, 3 decimals
    pub dose_text: String,
    pub dose_rate: f64,
    pub counts: u64,
    pub detector_distance_cm: f64,
    pub source_open: bool,
    pub heatmap: bool,
    pub time_ticks: u64,
    pub view: ViewData,
}

impl LabSnapshot {
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// What one call to [`Lab::frame`] did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub clock: ClockTicks,
    /// Summed over the ticks run this frame
    pub ticks: TickReport,
}

pub struct Lab {
    state: LabState,
    clock: SimulationClock,
    reading: DoseReading,
    heatmap: bool,
    /// Field for the current source state; rebuilt when the source toggles
    field: Option<DoseField>,
}

impl Lab {
    /// Create a lab from settings, rejecting invalid ones
    pub fn new(settings: &Settings) -> crate::Result<Self> {
        settings.validate()?;
        Ok(Self::build(settings))
    }

    /// Lab with default settings and a fixed seed
    pub fn with_seed(seed: u64) -> Self {
        Self::build(&Settings {
            seed: Some(seed),
            ..Default::default()
        })
    }

    /// Settings must already be valid
    fn build(settings: &Settings) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        let mut state = LabState::new(seed);
        state.source.source_open = settings.source_open;
        state.source.set_distance(settings.detector_distance_cm);

        let reading = DoseReading::background(state.source.detector_distance_cm);
        log::info!(
            "Lab created (seed {}, distance {:.0} cm, source {})",
            seed,
            state.source.detector_distance_cm,
            if state.source.source_open { "open" } else { "closed" }
        );

        Self {
            state,
            clock: SimulationClock::new(settings.frame_dt(), settings.dose_period()),
            reading,
            heatmap: settings.heatmap,
            field: None,
        }
    }

    pub fn state(&self) -> &LabState {
        &self.state
    }

    pub fn reading(&self) -> DoseReading {
        self.reading
    }

    pub fn counts(&self) -> u64 {
        self.state.counts
    }

    pub fn heatmap(&self) -> bool {
        self.heatmap
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    // === Drivers ===

    /// Start both drivers; takes an immediate dose sample on first start
    pub fn start(&mut self) {
        if self.clock.is_running() {
            return;
        }
        self.clock.start();
        self.sample_dose();
    }

    /// Stop both drivers; nothing mutates afterwards until `start`
    pub fn stop(&mut self) {
        self.clock.stop();
    }

    /// Feed wall-clock time and run whatever work is due
    pub fn frame(&mut self, elapsed: f32) -> FrameReport {
        let clock = self.clock.advance(elapsed);
        let mut report = FrameReport {
            clock,
            ..Default::default()
        };

        for _ in 0..clock.frames {
            let t = tick(&mut self.state);
            report.ticks.spawned += t.spawned;
            report.ticks.converted += t.converted;
            report.ticks.detected += t.detected;
            report.ticks.escaped += t.escaped;
            report.ticks.expired += t.expired;
            report.ticks.alive = t.alive;
        }
        for _ in 0..clock.dose_samples {
            self.sample_dose();
        }

        report
    }

    /// Run a single simulation tick regardless of the clock
    pub fn step(&mut self) -> TickReport {
        tick(&mut self.state)
    }

    /// Refresh the displayed dose reading
    pub fn sample_dose(&mut self) -> DoseReading {
        let source = self.state.source;
        self.reading = DoseReading::sample(
            source.detector_distance_cm,
            source.source_open,
            &mut self.state.rng,
        );
        log::debug!(
            "Dose {} µSv/h at {:.0} cm",
            self.reading.display(),
            self.reading.distance_cm
        );
        self.reading
    }

    // === Operator input ===

    pub fn set_detector_distance(&mut self, cm: f64) {
        let before = self.state.source.detector_distance_cm;
        self.state.source.set_distance(cm);
        if self.state.source.detector_distance_cm != cm {
            log::warn!(
                "Detector distance {} cm clamped to {} cm",
                cm,
                self.state.source.detector_distance_cm
            );
        }
        if before != self.state.source.detector_distance_cm {
            log::debug!(
                "Detector moved to {:.0} cm",
                self.state.source.detector_distance_cm
            );
        }
    }

    pub fn set_source_open(&mut self, open: bool) {
        if self.state.source.source_open == open {
            return;
        }
        self.state.source.source_open = open;
        log::info!("Source {}", if open { "opened" } else { "closed" });
    }

    pub fn set_heatmap_mode(&mut self, heatmap: bool) {
        if self.heatmap != heatmap {
            log::info!("View: {}", if heatmap { "heatmap" } else { "particles" });
        }
        self.heatmap = heatmap;
    }

    /// Clear particles and counts; the display falls back to background dose
    pub fn reset(&mut self) {
        self.state.reset();
        self.reading = DoseReading::background(self.state.source.detector_distance_cm);
        log::info!("Lab reset (dose {:.3} µSv/h)", DOSE_BACKGROUND);
    }

    // === Outputs ===

    /// Field for the current source state, sampled on demand
    pub fn field(&mut self) -> &DoseField {
        let open = self.state.source.source_open;
        let field = match self.field.take() {
            Some(field) if field.source_open == open => field,
            _ => sample_field(open),
        };
        self.field.insert(field)
    }

    /// Published state for the current view mode
    pub fn snapshot(&mut self) -> LabSnapshot {
        let view = if self.heatmap {
            ViewData::Heatmap {
                field: self.field().clone(),
            }
        } else {
            ViewData::Particles {
                particles: self
                    .state
                    .particles
                    .iter()
                    .map(|p| ParticleView {
                        pos: p.pos,
                        kind: p.kind,
                        life: p.life,
                        trail: p.trail.iter().copied().collect(),
                    })
                    .collect(),
            }
        };

        LabSnapshot {
            dose_text: self.reading.display(),
            dose_rate: self.reading.value,
            counts: self.state.counts,
            detector_distance_cm: self.state.source.detector_distance_cm,
            source_open: self.state.source.source_open,
            heatmap: self.heatmap,
            time_ticks: self.state.time_ticks,
            view,
        }
    }

    /// Geometry for the current view mode
    pub fn render(&mut self) -> RenderFrame {
        if self.heatmap {
            self.field();
            render_pass(&self.state, self.field.as_ref())
        } else {
            render_pass(&self.state, None)
        }
    }

    /// Narrated explanation of the current reading
    pub fn explain<N: Narrator + ?Sized>(&self, narrator: &N) -> String {
        explain_reading(narrator, self.reading.distance_cm, self.reading.value)
    }
}
