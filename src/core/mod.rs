//! Core module for astro_guide
//!
//! The decision pipeline and its supporting types. Everything here except
//! config/catalog file loading is pure and synchronous.
//!
//! # Architecture
//!
//! - `models`: Phone records, categories, lenses, pipeline outputs
//! - `error`: Error types using thiserror
//! - `catalog`: Phone lookup (exact → substring → fuzzy)
//! - `classifier`: Target name → category
//! - `lens`: Lens selection
//! - `settings`: Exposure settings
//! - `direction`: Static viewing directions
//! - `explanation`: Deterministic step-by-step explanation
//! - `config`: JSON config with env overrides
//! - `engine`: Request pipeline with optional AI enrichment

pub mod models;
pub mod error;
pub mod catalog;
pub mod classifier;
pub mod lens;
pub mod settings;
pub mod direction;
pub mod explanation;
pub mod config;
pub mod engine;

// Re-export commonly used types
pub use models::{
    CameraCapability, PhoneRecord, TargetCategory, LensChoice, SettingsRecord,
    DirectionRecord, ExplanationRecord, ExplanationStep,
};
pub use error::{GuideError, Result, ResultExt};
pub use catalog::{PhoneCatalog, SimilarityMetric, CharRatio, MatchKind, match_name, DEFAULT_FUZZY_THRESHOLD};
pub use classifier::{TargetClassifier, normalize_target};
pub use lens::LensSelector;
pub use settings::SettingsEngine;
pub use direction::DirectionLookup;
pub use explanation::ExplanationComposer;
pub use config::{GuideConfig, AiConfig, AiBackend};
pub use engine::{
    GuideEngine, GuidePlan, AnalyzeRequest, AnalyzeResponse, DirectionSection, AiDirection,
};
