//! Generative explanation backends
//!
//! The decision pipeline never depends on these. They only turn its output
//! into friendlier prose, and every call site has a static fallback.
//!
//! ```text
//! AiConfig → explainer_from_config → Arc<dyn Explainer>
//!                                        ├── GeminiExplainer  (HTTP, fallible)
//!                                        └── OfflineExplainer (deterministic)
//! ```

#[cfg(feature = "gemini")]
pub mod gemini;
pub mod offline;
pub mod prompts;

#[cfg(feature = "gemini")]
pub use gemini::{GeminiConfig, GeminiExplainer};
pub use offline::{OfflineExplainer, OFFLINE_MESSAGE};

use std::sync::Arc;
use tracing::info;

use crate::core::config::{AiBackend, AiConfig};
use crate::core::error::{GuideError, Result};

/// Result type for backend calls
pub type ExplainResult<T> = anyhow::Result<T>;

/// Minimal text-generation capability.
pub trait Explainer: Send + Sync {
    /// Generate text for a prompt. May fail or time out.
    fn generate(&self, prompt: &str) -> ExplainResult<String>;

    /// Backend name for logs
    fn name(&self) -> &'static str;

    /// Whether `generate` produces prose for the prompt. Backends returning
    /// canned text report `false` and the engine uses its static fallbacks.
    fn is_generative(&self) -> bool {
        true
    }
}

/// Build the backend selected by configuration.
///
/// `auto` picks Gemini only when an API key is available and the `gemini`
/// feature is compiled in; otherwise it quietly uses the offline explainer.
pub fn explainer_from_config(config: &AiConfig) -> Result<Arc<dyn Explainer>> {
    let explainer: Arc<dyn Explainer> = match config.backend {
        AiBackend::Offline => Arc::new(OfflineExplainer::new()),
        AiBackend::Gemini => create_gemini(config)?,
        AiBackend::Auto => {
            if cfg!(feature = "gemini") && config.api_key().is_some() {
                create_gemini(config)?
            } else {
                Arc::new(OfflineExplainer::new())
            }
        }
    };
    info!(backend = explainer.name(), "Explanation backend ready");
    Ok(explainer)
}

#[cfg(feature = "gemini")]
fn create_gemini(config: &AiConfig) -> Result<Arc<dyn Explainer>> {
    let api_key = config.api_key().ok_or_else(|| {
        GuideError::explainer(format!(
            "Gemini API key not found. Set 'ai.api_key' in config or the {} environment variable",
            crate::core::config::API_KEY_ENV
        ))
    })?;

    let gemini_config = GeminiConfig {
        api_key: api_key.to_string(),
        model: config.model.clone(),
        timeout_secs: config.timeout_secs,
        max_retries: config.max_retries,
        ..GeminiConfig::default()
    };
    let explainer = GeminiExplainer::new(gemini_config)
        .map_err(|e| GuideError::explainer(format!("{:#}", e)))?;
    Ok(Arc::new(explainer))
}

#[cfg(not(feature = "gemini"))]
fn create_gemini(_config: &AiConfig) -> Result<Arc<dyn Explainer>> {
    Err(GuideError::explainer(
        "Gemini backend requires the 'gemini' feature. Rebuild with --features gemini or use the offline backend.",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offline_backend() {
        let config = AiConfig {
            backend: AiBackend::Offline,
            api_key: Some("ignored".to_string()),
            ..AiConfig::default()
        };
        let explainer = explainer_from_config(&config).unwrap();
        assert_eq!(explainer.name(), "offline");
    }

    #[test]
    fn test_auto_without_key_is_offline() {
        let explainer = explainer_from_config(&AiConfig::default()).unwrap();
        assert_eq!(explainer.name(), "offline");
    }

    #[test]
    fn test_gemini_without_key_fails() {
        let config = AiConfig {
            backend: AiBackend::Gemini,
            ..AiConfig::default()
        };
        let err = explainer_from_config(&config).err().unwrap();
        assert!(matches!(err, GuideError::Explainer { .. }));
    }

    #[cfg(feature = "gemini")]
    #[test]
    fn test_auto_with_key_is_gemini() {
        let config = AiConfig {
            api_key: Some("test-key".to_string()),
            ..AiConfig::default()
        };
        let explainer = explainer_from_config(&config).unwrap();
        assert_eq!(explainer.name(), "gemini");
    }
}
