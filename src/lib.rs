//! astro_guide - Smartphone astrophotography settings
//!
//! Given a phone model and a celestial target, this library classifies the
//! target, picks a lens, derives exposure settings and explains the result.
//! It is designed to be consumed by:
//! - The CLI binary (src/bin/astro.rs)
//! - The stdio JSON-RPC server (`astro --server`)
//!
//! # Architecture
//!
//! This crate follows the "Library-First" pattern:
//! - **core/**: The deterministic decision pipeline, no I/O
//! - **ai/**: Optional generative prose, always behind a fallback
//! - **server/**: Request boundary over stdio
//! - **bin/astro.rs**: Thin wrapper that calls the library
//!
//! ```no_run
//! use std::sync::Arc;
//! use astro_guide::{AnalyzeRequest, GuideEngine, PhoneCatalog};
//!
//! let engine = GuideEngine::new(Arc::new(PhoneCatalog::bundled()));
//! let plan = engine.plan("Galaxy S24 Ultra", "Moon");
//! println!("{} lens, ISO {}", plan.lens, plan.settings.iso);
//!
//! let response = engine.analyze(&AnalyzeRequest::new("pixel 8 pro", "jupiter")).unwrap();
//! println!("{}", response.explanation.summary);
//! ```

pub mod ai;
pub mod core;
pub mod logging;
pub mod server;

pub use crate::core::{
    AnalyzeRequest, AnalyzeResponse, GuideConfig, GuideEngine, GuideError, GuidePlan,
    LensChoice, PhoneCatalog, PhoneRecord, SettingsRecord, TargetCategory,
};

/// Crate version, as reported by the CLI and the server handshake
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the version of the astro_guide library
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_matches_manifest() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
        assert!(!VERSION.is_empty());
    }
}
