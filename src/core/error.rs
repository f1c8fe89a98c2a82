//! Error types for astro_guide
//!
//! Errors only arise at I/O edges (catalog files, config files, AI backend
//! construction, request validation). The decision pipeline itself never fails.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for guide operations
pub type Result<T> = std::result::Result<T, GuideError>;

/// Errors that can occur while loading data or serving requests
#[derive(Error, Debug)]
pub enum GuideError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Phone dataset could not be loaded
    #[error("Failed to load phone catalog {path}: {message}")]
    CatalogLoad { path: PathBuf, message: String },

    /// Invalid configuration
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Request rejected at the boundary
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },

    /// AI backend could not be constructed
    #[error("Explainer error: {message}")]
    Explainer { message: String },

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<GuideError>,
    },
}

impl GuideError {
    /// Wrap an error with additional context
    pub fn with_context(self, context: impl Into<String>) -> Self {
        GuideError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        GuideError::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        GuideError::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create an explainer error
    pub fn explainer(message: impl Into<String>) -> Self {
        GuideError::Explainer {
            message: message.into(),
        }
    }
}

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_load_display() {
        let err = GuideError::CatalogLoad {
            path: PathBuf::from("/tmp/phones.json"),
            message: "expected object".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("/tmp/phones.json"));
        assert!(text.contains("expected object"));
    }

    #[test]
    fn test_error_with_context() {
        let err = GuideError::invalid_config("bad threshold");
        let wrapped = err.with_context("loading config");
        assert!(wrapped.to_string().contains("loading config"));
        assert!(wrapped.to_string().contains("bad threshold"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: GuideError = io_err.into();
        assert!(matches!(err, GuideError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err: serde_json::Error = serde_json::from_str::<i32>("not json").unwrap_err();
        let err: GuideError = json_err.into();
        assert!(matches!(err, GuideError::Json(_)));
    }

    #[test]
    fn test_invalid_request_helper() {
        let err = GuideError::invalid_request("target is empty");
        assert!(err.to_string().contains("target is empty"));
        assert!(matches!(err, GuideError::InvalidRequest { .. }));
    }

    #[test]
    fn test_explainer_helper() {
        let err = GuideError::explainer("missing key");
        assert!(matches!(err, GuideError::Explainer { .. }));
    }

    #[test]
    fn test_result_ext_context() {
        let result: Result<()> = Err(GuideError::invalid_config("test"));
        let err = result.context("during startup").unwrap_err();
        assert!(err.to_string().contains("during startup"));
    }
}
