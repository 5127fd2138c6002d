//! Seam for the external "explain this reading" collaborator
//!
//! The lab never depends on the narration result: any failure degrades to a
//! fixed message and the simulation carries on.

use crate::error::{Error, Result};

/// Shown when the narrator fails
pub const FALLBACK_EXPLANATION: &str =
    "An explanation is not available right now. The reading follows the inverse-square law \
     with a small exponential attenuation term on top of the natural background.";

/// Produces descriptive text for a dose reading
pub trait Narrator {
    fn explain(&self, distance_cm: f64, dose_rate: f64) -> Result<String>;
}

/// Explanation text, or the fallback when the narrator fails or says nothing
pub fn explain_reading<N: Narrator + ?Sized>(
    narrator: &N,
    distance_cm: f64,
    dose_rate: f64,
) -> String {
    let result = narrator.explain(distance_cm, dose_rate).and_then(|text| {
        if text.trim().is_empty() {
            Err(Error::Narrator("empty reply".into()))
        } else {
            Ok(text)
        }
    });
    match result {
        Ok(text) => text,
        Err(e) => {
            log::warn!("Narrator failed ({e}), using fallback text");
            FALLBACK_EXPLANATION.to_string()
        }
    }
}

/// Offline narrator built from the reading alone
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateNarrator;

impl Narrator for TemplateNarrator {
    fn explain(&self, distance_cm: f64, dose_rate: f64) -> Result<String> {
        let ratio = dose_rate / crate::consts::DOSE_BACKGROUND;
        Ok(format!(
            "At {distance_cm:.0} cm the detector reads {dose_rate:.3} µSv/h, \
             {ratio:.1}x the natural background. Doubling the distance roughly \
             quarters the source contribution."
        ))
    }
}
