//! Exposure settings
//!
//! Derives ISO, shutter, focus and tripod advice from the phone, the target
//! category and the chosen lens. A warning is attached exactly when a needed
//! capability is missing or the target is unrecognised.

use tracing::debug;

use super::models::{LensChoice, PhoneRecord, SettingsRecord, TargetCategory};

pub const WARN_PHONE_NOT_FOUND: &str = "Phone specs not found";
pub const WARN_NO_ZOOM: &str = "No optical zoom available. Planet will appear very small.";
pub const WARN_NO_PRO_MODE: &str = "Pro mode not available. Results depend on automatic night mode.";
pub const WARN_UNKNOWN_TARGET: &str = "Target not recognized. Using safe defaults.";

const FOCUS_INFINITY: &str = "Manual → Infinity";

#[derive(Debug, Clone, Copy, Default)]
pub struct SettingsEngine;

impl SettingsEngine {
    pub fn new() -> Self {
        Self
    }

    /// Build a fresh settings record for one request.
    pub fn decide(
        &self,
        phone: Option<&PhoneRecord>,
        category: TargetCategory,
        lens: LensChoice,
    ) -> SettingsRecord {
        let Some(phone) = phone else {
            return SettingsRecord::auto(WARN_PHONE_NOT_FOUND);
        };
        let main = &phone.main_camera;

        let settings = match category {
            TargetCategory::Planet => {
                let telephoto = lens == LensChoice::Telephoto;
                SettingsRecord {
                    mode: "Pro".to_string(),
                    iso: "100-400".to_string(),
                    shutter: "1/60 – 1/125".to_string(),
                    focus: if main.manual_focus {
                        FOCUS_INFINITY
                    } else {
                        "Auto (tap on object)"
                    }
                    .to_string(),
                    tripod: telephoto,
                    warning: (!telephoto).then(|| WARN_NO_ZOOM.to_string()),
                }
            }
            TargetCategory::DeepSky => SettingsRecord {
                mode: "Pro".to_string(),
                iso: "800-1600".to_string(),
                shutter: "10-20 sec".to_string(),
                focus: if main.manual_focus {
                    FOCUS_INFINITY
                } else {
                    "Auto (lock focus)"
                }
                .to_string(),
                tripod: true,
                warning: (!main.pro_mode).then(|| WARN_NO_PRO_MODE.to_string()),
            },
            TargetCategory::FastObject => SettingsRecord {
                mode: "Pro".to_string(),
                iso: "800–1600".to_string(),
                shutter: "5–10 sec".to_string(),
                focus: FOCUS_INFINITY.to_string(),
                tripod: true,
                warning: None,
            },
            TargetCategory::Unknown => SettingsRecord::auto(WARN_UNKNOWN_TARGET),
        };

        debug!(
            phone = %phone.name,
            %category,
            %lens,
            iso = %settings.iso,
            shutter = %settings.shutter,
            warned = settings.warning.is_some(),
            "Decided settings"
        );
        settings
    }
}
