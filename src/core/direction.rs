//! Viewing direction guidance
//!
//! Static table only; nothing here is computed from ephemerides.

use super::classifier::normalize_target;
use super::models::DirectionRecord;

const PLANETS: [&str; 4] = ["jupiter", "saturn", "mars", "venus"];
const STAR_FIELDS: [&str; 2] = ["stars", "milky way"];

fn record(look_direction: &str, altitude: &str, best_time: &str, tip: &str) -> DirectionRecord {
    DirectionRecord {
        look_direction: look_direction.to_string(),
        altitude: altitude.to_string(),
        best_time: best_time.to_string(),
        tip: tip.to_string(),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DirectionLookup;

impl DirectionLookup {
    pub fn new() -> Self {
        Self
    }

    /// Where to point the phone for `target`. Unlisted targets get an
    /// "Unknown" record rather than an error.
    pub fn lookup(&self, target: &str) -> DirectionRecord {
        let name = normalize_target(target);

        if name == "moon" {
            return record(
                "East to South-East",
                "30–60° above the horizon",
                "30–90 minutes after moonrise",
                "Avoid shooting near the horizon to reduce atmospheric blur",
            );
        }
        if PLANETS.contains(&name.as_str()) {
            return record(
                "South",
                "40–70° above the horizon",
                "Late night to early morning",
                "Planets appear sharper when higher in the sky",
            );
        }
        if STAR_FIELDS.contains(&name.as_str()) {
            return record(
                "Away from city lights",
                "Straight up (zenith)",
                "Midnight with no moon",
                "Darker skies give better star visibility",
            );
        }

        record(
            "Unknown",
            "Unknown",
            "Unknown",
            "No specific direction data available for this target.",
        )
    }
}
