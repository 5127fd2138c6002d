//! Lab settings
//!
//! Loaded from a JSON file; every field is optional and falls back to its
//! default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DOSE_PERIOD, MAX_DISTANCE_CM};
use crate::error::{Error, Result};

/// Lab configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed; `None` picks one at startup
    pub seed: Option<u64>,

    // === Initial controls ===
    /// Detector distance in cm
    pub detector_distance_cm: f64,
    pub source_open: bool,
    /// Start in heatmap view instead of particle trails
    pub heatmap: bool,

    // === Drivers ===
    /// Frame driver rate (display refresh)
    pub frame_hz: f32,
    /// Dose display refresh period in milliseconds
    pub dose_period_ms: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,
            detector_distance_cm: 80.0,
            source_open: false,
            heatmap: false,
            frame_hz: 60.0,
            dose_period_ms: (DOSE_PERIOD * 1000.0) as u32,
        }
    }
}

impl Settings {
    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if !self.detector_distance_cm.is_finite()
            || !(0.0..=MAX_DISTANCE_CM).contains(&self.detector_distance_cm)
        {
            return Err(Error::InvalidSetting(format!(
                "detector_distance_cm must be within [0, {MAX_DISTANCE_CM}], got {}",
                self.detector_distance_cm
            )));
        }
        if !self.frame_hz.is_finite() || self.frame_hz <= 0.0 || !self.frame_dt().is_finite() {
            return Err(Error::InvalidSetting(format!(
                "frame_hz must be > 0 with a finite timestep, got {}",
                self.frame_hz
            )));
        }
        if self.dose_period_ms == 0 {
            return Err(Error::InvalidSetting("dose_period_ms must be > 0".into()));
        }
        Ok(())
    }

    /// Frame driver timestep in seconds
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.frame_hz
    }

    /// Dose refresh period in seconds
    pub fn dose_period(&self) -> f32 {
        self.dose_period_ms as f32 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.dose_period_ms, 500);
        assert!((s.frame_dt() - 1.0 / 60.0).abs() < 1e-6);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let s = Settings::from_json(r#"{ "source_open": true, "seed": 7 }"#).unwrap();
        assert!(s.source_open);
        assert_eq!(s.seed, Some(7));
        assert_eq!(s.detector_distance_cm, 80.0);
        assert!(!s.heatmap);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            Settings::from_json(r#"{ "detector_distance_cm": 400 }"#),
            Err(Error::InvalidSetting(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "frame_hz": 0 }"#),
            Err(Error::InvalidSetting(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "frame_hz": 1e-40 }"#),
            Err(Error::InvalidSetting(_))
        ));
        assert!(matches!(
            Settings::from_json(r#"{ "dose_period_ms": 0 }"#),
            Err(Error::InvalidSetting(_))
        ));
        assert!(matches!(Settings::from_json("{"), Err(Error::Json(_))));
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("beta_dose_lab_{}.json", std::process::id()));
        let settings = Settings {
            seed: Some(3),
            heatmap: true,
            ..Default::default()
        };
        settings.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = Path::new("/definitely/not/here/settings.json");
        assert!(matches!(Settings::load(path), Err(Error::Io(_))));
    }
}
