//! Configuration for astro_guide
//!
//! A JSON file with every field defaulted, plus environment overrides for
//! secrets. Precedence: explicit file, then the per-user default file, then
//! built-in defaults; `GEMINI_API_KEY` always wins over a configured key.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::catalog::{PhoneCatalog, DEFAULT_FUZZY_THRESHOLD};
use super::error::{GuideError, Result, ResultExt};

/// Environment variable holding the Gemini API key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Upper bound for `ai.max_retries`
pub const MAX_RETRIES_LIMIT: u32 = 10;

// =============================================================================
// AI backend selection
// =============================================================================

/// Which explanation backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiBackend {
    /// Gemini when an API key is present, offline otherwise
    #[default]
    Auto,
    Gemini,
    Offline,
}

impl AiBackend {
    /// Parse from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "gemini" | "google" => Some(Self::Gemini),
            "offline" | "none" | "fallback" => Some(Self::Offline),
            _ => None,
        }
    }
}

impl std::fmt::Display for AiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Auto => write!(f, "auto"),
            Self::Gemini => write!(f, "gemini"),
            Self::Offline => write!(f, "offline"),
        }
    }
}

impl std::str::FromStr for AiBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            format!("Invalid AI backend: '{}'. Use: auto, gemini, or offline", s)
        })
    }
}

/// Settings for the generative explanation backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub backend: AiBackend,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            backend: AiBackend::Auto,
            model: "gemini-3-flash-preview".to_string(),
            api_key: None,
            timeout_secs: 30,
            max_retries: 2,
        }
    }
}

impl AiConfig {
    /// Non-empty API key, if any
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref().filter(|key| !key.trim().is_empty())
    }
}

// =============================================================================
// Guide config
// =============================================================================

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuideConfig {
    /// External phone dataset (bundled dataset when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
    /// Minimum similarity for fuzzy phone matches
    pub fuzzy_threshold: f64,
    pub ai: AiConfig,
}

impl Default for GuideConfig {
    fn default() -> Self {
        Self {
            catalog_path: None,
            fuzzy_threshold: DEFAULT_FUZZY_THRESHOLD,
            ai: AiConfig::default(),
        }
    }
}

impl GuideConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file. Errors are fatal: the caller asked for this file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(GuideError::from)
            .context(format!("reading config {}", path.display()))?;
        Self::from_json(&content).context(format!("parsing config {}", path.display()))
    }

    /// Per-user config location (`<config_dir>/astro-guide/config.json`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("astro-guide").join("config.json"))
    }

    /// Load the per-user config if present. A broken file is logged and ignored.
    pub fn load_default() -> Self {
        let Some(path) = Self::default_path().filter(|p| p.exists()) else {
            return Self::default();
        };
        match Self::from_file(&path) {
            Ok(config) => {
                debug!(path = %path.display(), "Loaded config");
                config
            }
            Err(e) => {
                warn!("Ignoring config file: {}", e);
                Self::default()
            }
        }
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(mut self) -> Self {
        self.apply_env(|name| std::env::var(name).ok());
        self
    }

    /// Apply overrides from an arbitrary variable source.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(key) = lookup(API_KEY_ENV).filter(|key| !key.trim().is_empty()) {
            self.ai.api_key = Some(key);
        }
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.fuzzy_threshold) {
            return Err(GuideError::invalid_config(format!(
                "fuzzy_threshold must be between 0 and 1, got {}",
                self.fuzzy_threshold
            )));
        }
        if self.ai.timeout_secs == 0 {
            return Err(GuideError::invalid_config("ai.timeout_secs must be positive"));
        }
        if self.ai.max_retries > MAX_RETRIES_LIMIT {
            return Err(GuideError::invalid_config(format!(
                "ai.max_retries must be at most {}, got {}",
                MAX_RETRIES_LIMIT, self.ai.max_retries
            )));
        }
        if self.ai.model.trim().is_empty() {
            return Err(GuideError::invalid_config("ai.model must not be empty"));
        }
        Ok(())
    }

    /// Build the phone catalog this config points at.
    pub fn load_catalog(&self) -> Result<PhoneCatalog> {
        let catalog = match &self.catalog_path {
            Some(path) => PhoneCatalog::from_file(path)?,
            None => PhoneCatalog::bundled(),
        };
        Ok(catalog.with_threshold(self.fuzzy_threshold))
    }
}
