//! Prompt text for the explanation backends.

use crate::core::models::{DirectionRecord, LensChoice, SettingsRecord};

/// Free-form "where to look" estimate for a target.
pub fn direction_estimate(target: &str, location: Option<&str>) -> String {
    format!(
        "You are an astronomy assistant.

Target: {target}
Location: {location}

Explain in simple terms:
1. Where in the sky to look (direction)
2. Approximate altitude
3. Best time to observe
4. One practical tip

Be clear, beginner-friendly, and realistic.
Avoid exact degrees if uncertain.
",
        target = target,
        location = location.unwrap_or("Unknown"),
    )
}

/// Friendly rewrite of the static direction table entry.
pub fn direction_explanation(target: &str, direction: &DirectionRecord) -> String {
    format!(
        "You are a friendly astrophotography assistant.

Target: {target}

Direction details:
Look direction: {look}
Altitude: {altitude}
Best time: {best_time}
Tip: {tip}

TASK:
Explain this to a normal user in simple, friendly language.
Do NOT change the direction or time.
Do NOT ask questions.
Keep it short (2-3 lines).
",
        target = target,
        look = direction.look_direction,
        altitude = direction.altitude,
        best_time = direction.best_time,
        tip = direction.tip,
    )
}

/// Narrative for the chosen lens and exposure settings.
pub fn settings_explanation(
    phone_model: Option<&str>,
    target: &str,
    lens: LensChoice,
    settings: &SettingsRecord,
) -> String {
    format!(
        "You are an astrophotography coach for smartphone users.

Phone: {phone}
Target: {target}
Lens: {lens}
ISO: {iso}
Shutter: {shutter}
Focus: {focus}
Tripod: {tripod}
Warning: {warning}

TASK:
Explain in 3-4 short sentences why these settings suit this target on this phone.
Do NOT change any of the values above.
If there is a warning, mention it plainly.
",
        phone = phone_model.unwrap_or("Unknown Phone"),
        target = target,
        lens = lens,
        iso = settings.iso,
        shutter = settings.shutter,
        focus = settings.focus,
        tripod = if settings.tripod { "Yes" } else { "No" },
        warning = settings.warning.as_deref().unwrap_or("None"),
    )
}
