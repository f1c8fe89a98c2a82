//! Deterministic explanation of the pipeline's decisions.
//!
//! Plain string formatting over the pipeline outputs. Always yields the four
//! steps Lens, Exposure, Focus, Stability, in that order.

use super::classifier::normalize_target;
use super::models::{ExplanationRecord, ExplanationStep, LensChoice, PhoneRecord, SettingsRecord};

pub const EXPECTATION: &str = "You should get a clear image with visible surface details.";
pub const CONFIDENCE: &str = "High";

#[derive(Debug, Clone, Copy, Default)]
pub struct ExplanationComposer;

impl ExplanationComposer {
    pub fn new() -> Self {
        Self
    }

    pub fn compose(
        &self,
        phone: Option<&PhoneRecord>,
        target: &str,
        lens: LensChoice,
        settings: &SettingsRecord,
    ) -> ExplanationRecord {
        let support = if settings.tripod { "Tripod" } else { "Handheld" };
        let summary = format!(
            "{} • ISO {} • {} • {}",
            lens.label(),
            settings.iso,
            settings.shutter,
            support
        );

        let target = normalize_target(target);
        let lens_step = match phone {
            Some(phone) => format!(
                "Use the {} lens on your {} to capture the {} clearly.",
                lens, phone.name, target
            ),
            None => format!("Use the {} lens to capture the {} clearly.", lens, target),
        };

        let exposure_step = if settings.iso == "Auto" && settings.shutter == "Auto" {
            "Leave ISO and shutter speed on Auto.".to_string()
        } else {
            format!(
                "Set ISO to {} and shutter speed to {}.",
                settings.iso, settings.shutter
            )
        };

        let stability_step = if settings.tripod {
            "Use a tripod to keep the phone steady."
        } else {
            "Brace the phone against something steady, or use a tripod if you have one."
        };

        ExplanationRecord {
            summary,
            steps: vec![
                ExplanationStep::new("Lens", lens_step),
                ExplanationStep::new("Exposure", exposure_step),
                ExplanationStep::new("Focus", settings.focus.clone()),
                ExplanationStep::new("Stability", stability_step),
            ],
            expectation: EXPECTATION.to_string(),
            confidence: CONFIDENCE.to_string(),
        }
    }
}
