//! Core data models for astro_guide
//!
//! Phone capability records, the closed target/lens enumerations, and the
//! records produced by the decision pipeline.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// =============================================================================
// Capability flags
// =============================================================================

/// Lenient flag decoding for phone datasets.
///
/// Upstream data mixes `true`, `"true"`, `"True"` and the occasional junk
/// value. Everything is normalised to `bool` once, at load time; anything that
/// is not a boolean or a case-insensitive `"true"` reads as `false`.
mod flag {
    use super::*;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawFlag {
        Bool(bool),
        Text(String),
        Other(serde_json::Value),
    }

    impl RawFlag {
        fn truthy(self) -> bool {
            match self {
                RawFlag::Bool(b) => b,
                RawFlag::Text(s) => s.trim().eq_ignore_ascii_case("true"),
                RawFlag::Other(_) => false,
            }
        }
    }

    pub fn required<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<RawFlag>::deserialize(deserializer)?
            .map(RawFlag::truthy)
            .unwrap_or(false))
    }

    pub fn optional<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<RawFlag>::deserialize(deserializer)?.map(RawFlag::truthy))
    }
}

// =============================================================================
// Phone records
// =============================================================================

/// Capabilities of a single physical camera module
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraCapability {
    /// Explicit availability flag (None = not stated by the dataset)
    #[serde(default, deserialize_with = "flag::optional", skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    /// Focus can be set manually (e.g. locked to infinity)
    #[serde(default, deserialize_with = "flag::required")]
    pub manual_focus: bool,
    /// Manual exposure control (ISO/shutter) is available
    #[serde(default, deserialize_with = "flag::required")]
    pub pro_mode: bool,
    /// Sensor resolution, informational only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub megapixels: Option<f32>,
    /// Optical zoom factor relative to the main camera
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optical_zoom: Option<f32>,
}

impl CameraCapability {
    /// Create an empty capability record (all flags off, availability unstated)
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: set the availability flag
    pub fn with_available(mut self, available: bool) -> Self {
        self.available = Some(available);
        self
    }

    /// Builder pattern: set manual focus support
    pub fn with_manual_focus(mut self, manual_focus: bool) -> Self {
        self.manual_focus = manual_focus;
        self
    }

    /// Builder pattern: set pro mode support
    pub fn with_pro_mode(mut self, pro_mode: bool) -> Self {
        self.pro_mode = pro_mode;
        self
    }

    /// The dataset affirmatively reports this camera as available.
    pub fn reports_available(&self) -> bool {
        self.available == Some(true)
    }

    /// The dataset explicitly marks this camera as missing.
    pub fn marked_unavailable(&self) -> bool {
        self.available == Some(false)
    }
}

/// Hardware capability record for one phone model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhoneRecord {
    /// Canonical model name (the catalog key)
    #[serde(default)]
    pub name: String,
    /// Primary wide camera
    #[serde(default)]
    pub main_camera: CameraCapability,
    /// Telephoto module, if the dataset lists one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telephoto_camera: Option<CameraCapability>,
    /// Ultrawide module, if the dataset lists one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ultrawide_camera: Option<CameraCapability>,
}

impl PhoneRecord {
    /// Create a record with a default main camera and no extra modules
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder pattern: set the main camera
    pub fn with_main(mut self, camera: CameraCapability) -> Self {
        self.main_camera = camera;
        self
    }

    /// Builder pattern: set the telephoto camera
    pub fn with_telephoto(mut self, camera: CameraCapability) -> Self {
        self.telephoto_camera = Some(camera);
        self
    }

    /// Builder pattern: set the ultrawide camera
    pub fn with_ultrawide(mut self, camera: CameraCapability) -> Self {
        self.ultrawide_camera = Some(camera);
        self
    }
}

// =============================================================================
// Target category
// =============================================================================

/// Classification bucket for a celestial target
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetCategory {
    /// Moon and planets: small, bright, benefit from optical zoom
    Planet,
    /// Galaxies, nebulae, star fields: faint, need long exposures
    DeepSky,
    /// Meteors, satellites, comets: transient, wide field
    FastObject,
    /// Not in any table
    Unknown,
}

impl TargetCategory {
    /// All categories, in declaration order
    pub const ALL: [TargetCategory; 4] = [
        TargetCategory::Planet,
        TargetCategory::DeepSky,
        TargetCategory::FastObject,
        TargetCategory::Unknown,
    ];

    /// Wire name of this category
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Planet => "planet",
            Self::DeepSky => "deep_sky",
            Self::FastObject => "fast_object",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TargetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Lens choice
// =============================================================================

/// Camera module to activate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LensChoice {
    Main,
    Telephoto,
    Ultrawide,
}

impl LensChoice {
    /// Wire name of this lens
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Telephoto => "telephoto",
            Self::Ultrawide => "ultrawide",
        }
    }

    /// Capitalised display label ("Telephoto")
    pub fn label(&self) -> &'static str {
        match self {
            Self::Main => "Main",
            Self::Telephoto => "Telephoto",
            Self::Ultrawide => "Ultrawide",
        }
    }
}

impl fmt::Display for LensChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Pipeline outputs
// =============================================================================

/// Exposure recommendation for one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsRecord {
    /// Camera app mode ("Pro" or "Auto")
    pub mode: String,
    /// ISO range or "Auto"
    pub iso: String,
    /// Shutter range or "Auto"
    pub shutter: String,
    /// Focus instruction
    pub focus: String,
    /// Whether a tripod is required
    pub tripod: bool,
    /// Advisory shown when a capability is missing or the target is unknown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl SettingsRecord {
    /// Fully automatic settings carrying an advisory
    pub fn auto(warning: impl Into<String>) -> Self {
        Self {
            mode: "Auto".to_string(),
            iso: "Auto".to_string(),
            shutter: "Auto".to_string(),
            focus: "Auto".to_string(),
            tripod: false,
            warning: Some(warning.into()),
        }
    }
}

/// Static viewing guidance for a target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionRecord {
    pub look_direction: String,
    pub altitude: String,
    pub best_time: String,
    pub tip: String,
}

/// One titled instruction in an explanation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplanationStep {
    pub title: String,
    pub instruction: String,
}

impl ExplanationStep {
    pub fn new(title: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            instruction: instruction.into(),
        }
    }
}

/// Deterministic, structured explanation of the pipeline's decisions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplanationRecord {
    pub summary: String,
    pub steps: Vec<ExplanationStep>,
    pub expectation: String,
    pub confidence: String,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn camera(json: &str) -> CameraCapability {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_flags_accept_booleans() {
        let cam = camera(r#"{"available": true, "manual_focus": true, "pro_mode": false}"#);
        assert_eq!(cam.available, Some(true));
        assert!(cam.manual_focus);
        assert!(!cam.pro_mode);
    }

    #[test]
    fn test_flags_accept_strings_case_insensitively() {
        let cam = camera(r#"{"available": "True", "manual_focus": "true", "pro_mode": "TRUE"}"#);
        assert!(cam.reports_available());
        assert!(cam.manual_focus);
        assert!(cam.pro_mode);

        let cam = camera(r#"{"available": "false", "manual_focus": "no"}"#);
        assert!(cam.marked_unavailable());
        assert!(!cam.manual_focus);
    }

    #[test]
    fn test_flags_tolerate_junk_and_null() {
        let cam = camera(r#"{"available": null, "manual_focus": 1, "pro_mode": [true]}"#);
        assert_eq!(cam.available, None);
        assert!(!cam.manual_focus);
        assert!(!cam.pro_mode);
    }

    #[test]
    fn test_missing_flags_default_off() {
        let cam = camera("{}");
        assert_eq!(cam, CameraCapability::default());
        assert!(!cam.reports_available());
        assert!(!cam.marked_unavailable());
    }

    #[test]
    fn test_phone_record_optional_modules() {
        let phone: PhoneRecord = serde_json::from_str(
            r#"{"main_camera": {"manual_focus": true}, "ultrawide_camera": {}}"#,
        )
        .unwrap();
        assert!(phone.main_camera.manual_focus);
        assert!(phone.telephoto_camera.is_none());
        assert_eq!(phone.ultrawide_camera, Some(CameraCapability::default()));
    }

    #[test]
    fn test_phone_record_builders() {
        let phone = PhoneRecord::new("Pixel 8 Pro")
            .with_main(CameraCapability::new().with_manual_focus(true))
            .with_telephoto(CameraCapability::new().with_available(true));
        assert_eq!(phone.name, "Pixel 8 Pro");
        assert!(phone.main_camera.manual_focus);
        assert!(phone.telephoto_camera.unwrap().reports_available());
        assert!(phone.ultrawide_camera.is_none());
    }

    #[test]
    fn test_category_wire_names() {
        assert_eq!(serde_json::to_string(&TargetCategory::DeepSky).unwrap(), "\"deep_sky\"");
        assert_eq!(serde_json::to_string(&TargetCategory::FastObject).unwrap(), "\"fast_object\"");
        for category in TargetCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category));
        }
    }

    #[test]
    fn test_lens_names_and_labels() {
        assert_eq!(serde_json::to_string(&LensChoice::Telephoto).unwrap(), "\"telephoto\"");
        assert_eq!(LensChoice::Ultrawide.label(), "Ultrawide");
        assert_eq!(LensChoice::Main.to_string(), "main");
    }

    #[test]
    fn test_auto_settings() {
        let settings = SettingsRecord::auto("Phone specs not found");
        assert_eq!(settings.iso, "Auto");
        assert_eq!(settings.shutter, "Auto");
        assert_eq!(settings.focus, "Auto");
        assert_eq!(settings.mode, "Auto");
        assert!(!settings.tripod);
        assert_eq!(settings.warning.as_deref(), Some("Phone specs not found"));
    }

    #[test]
    fn test_settings_omit_empty_warning() {
        let mut settings = SettingsRecord::auto("x");
        settings.warning = None;
        let json = serde_json::to_value(&settings).unwrap();
        assert!(json.get("warning").is_none());
    }
}
