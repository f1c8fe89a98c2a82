//! Deterministic offline explainer, used when no AI backend is configured.

use super::{ExplainResult, Explainer};
use crate::core::models::{LensChoice, SettingsRecord};

pub const OFFLINE_MESSAGE: &str = "AI unavailable. Please check the standard guide.";

#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineExplainer;

impl OfflineExplainer {
    pub fn new() -> Self {
        Self
    }

    /// Plain-text rendering of a settings decision.
    pub fn describe_settings(lens: LensChoice, settings: &SettingsRecord) -> String {
        format!(
            "Lens: {}\nISO: {}\nShutter: {}\nFocus: {}\nTripod: {}\n",
            lens,
            settings.iso,
            settings.shutter,
            settings.focus,
            if settings.tripod { "Yes" } else { "No" }
        )
    }
}

impl Explainer for OfflineExplainer {
    fn generate(&self, _prompt: &str) -> ExplainResult<String> {
        Ok(OFFLINE_MESSAGE.to_string())
    }

    fn name(&self) -> &'static str {
        "offline"
    }

    fn is_generative(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_constant() {
        let explainer = OfflineExplainer::new();
        assert_eq!(explainer.generate("anything").unwrap(), OFFLINE_MESSAGE);
        assert_eq!(explainer.generate("").unwrap(), OFFLINE_MESSAGE);
        assert!(!explainer.is_generative());
    }

    #[test]
    fn test_describe_settings() {
        let settings = SettingsRecord::auto("Phone specs not found");
        let text = OfflineExplainer::describe_settings(LensChoice::Main, &settings);
        assert_eq!(
            text,
            "Lens: main\nISO: Auto\nShutter: Auto\nFocus: Auto\nTripod: No\n"
        );
    }
}
