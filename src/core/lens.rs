//! Lens selection
//!
//! Picks the physical camera module for a target category. A telephoto or
//! ultrawide choice is only ever made for a phone that lists that module.

use tracing::debug;

use super::models::{LensChoice, PhoneRecord, TargetCategory};

#[derive(Debug, Clone, Copy, Default)]
pub struct LensSelector;

impl LensSelector {
    pub fn new() -> Self {
        Self
    }

    /// Choose a lens. Unknown phones always get the main camera.
    pub fn select(&self, phone: Option<&PhoneRecord>, category: TargetCategory) -> LensChoice {
        let Some(phone) = phone else {
            return LensChoice::Main;
        };

        let lens = match category {
            TargetCategory::Planet => {
                let has_zoom = phone
                    .telephoto_camera
                    .as_ref()
                    .map_or(false, |tele| tele.reports_available());
                if has_zoom {
                    LensChoice::Telephoto
                } else {
                    LensChoice::Main
                }
            }
            TargetCategory::DeepSky => {
                let manual_wide = phone.ultrawide_camera.as_ref().map_or(false, |wide| {
                    !wide.marked_unavailable() && wide.pro_mode && wide.manual_focus
                });
                if manual_wide {
                    LensChoice::Ultrawide
                } else {
                    LensChoice::Main
                }
            }
            // Presence of the module is enough; its flags are not consulted
            TargetCategory::FastObject => match &phone.ultrawide_camera {
                Some(wide) if !wide.marked_unavailable() => LensChoice::Ultrawide,
                _ => LensChoice::Main,
            },
            TargetCategory::Unknown => LensChoice::Main,
        };

        debug!(phone = %phone.name, %category, %lens, "Selected lens");
        lens
    }
}
