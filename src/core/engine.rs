//! Guide Engine
//!
//! Runs the full request pipeline:
//!
//! ```text
//! phone_name ──► PhoneCatalog.resolve ─┐
//!                                      ├─► LensSelector ─► SettingsEngine ─► ExplanationComposer
//! target ─────► TargetClassifier ──────┘
//! target ─────► DirectionLookup
//!
//! (optional) Explainer ─► prose enrichment, static fallback on any failure
//! ```
//!
//! The deterministic part ([`GuideEngine::plan`]) performs no I/O. The engine
//! is `Send + Sync` and can serve concurrent requests through a shared handle.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::catalog::PhoneCatalog;
use super::classifier::TargetClassifier;
use super::direction::DirectionLookup;
use super::error::{GuideError, Result};
use super::explanation::ExplanationComposer;
use super::lens::LensSelector;
use super::models::{
    DirectionRecord, ExplanationRecord, LensChoice, SettingsRecord, TargetCategory,
};
use super::settings::SettingsEngine;
use crate::ai::{prompts, Explainer, OfflineExplainer};

pub const AI_DIRECTION_FALLBACK: &str = "Could not retrieve AI direction data.";
pub const DIRECTION_FALLBACK: &str =
    "Point your phone in the suggested direction during the recommended time for best clarity.";

// =============================================================================
// Request / Response
// =============================================================================

/// Input at the request boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub phone_name: String,
    pub target: String,
}

impl AnalyzeRequest {
    pub fn new(phone_name: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            phone_name: phone_name.into(),
            target: target.into(),
        }
    }
}

/// Static direction data plus its prose rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionSection {
    pub data: DirectionRecord,
    pub explanation: String,
}

/// Free-form AI estimate of where to look
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiDirection {
    /// "ai_estimated" when generated, "fallback" otherwise
    pub source: String,
    pub explanation: String,
}

/// Full result for one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    /// Phone name as requested
    pub phone: String,
    /// Catalog key the request resolved to
    pub resolved_phone: Option<String>,
    pub target: String,
    pub category: TargetCategory,
    pub lens: LensChoice,
    pub settings: SettingsRecord,
    pub explanation: ExplanationRecord,
    pub direction: DirectionSection,
    pub direction_ai: AiDirection,
    pub ai_summary: String,
}

/// Deterministic pipeline output, before any enrichment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuidePlan {
    pub resolved_phone: Option<String>,
    pub category: TargetCategory,
    pub lens: LensChoice,
    pub settings: SettingsRecord,
    pub direction: DirectionRecord,
    pub explanation: ExplanationRecord,
}

// =============================================================================
// Guide Engine
// =============================================================================

pub struct GuideEngine {
    catalog: Arc<PhoneCatalog>,
    classifier: TargetClassifier,
    selector: LensSelector,
    settings: SettingsEngine,
    directions: DirectionLookup,
    composer: ExplanationComposer,
    explainer: Option<Arc<dyn Explainer>>,
}

impl GuideEngine {
    /// Create an engine over a shared catalog, with no AI enrichment.
    pub fn new(catalog: Arc<PhoneCatalog>) -> Self {
        Self {
            catalog,
            classifier: TargetClassifier::new(),
            selector: LensSelector::new(),
            settings: SettingsEngine::new(),
            directions: DirectionLookup::new(),
            composer: ExplanationComposer::new(),
            explainer: None,
        }
    }

    /// Attach an explanation backend.
    pub fn with_explainer(mut self, explainer: Arc<dyn Explainer>) -> Self {
        self.explainer = Some(explainer);
        self
    }

    pub fn catalog(&self) -> &PhoneCatalog {
        &self.catalog
    }

    pub fn classifier(&self) -> &TargetClassifier {
        &self.classifier
    }

    /// Name of the attached backend, if any
    pub fn explainer_name(&self) -> Option<&'static str> {
        self.explainer.as_ref().map(|e| e.name())
    }

    /// Run the deterministic pipeline. Never fails.
    pub fn plan(&self, phone_name: &str, target: &str) -> GuidePlan {
        let phone = self.catalog.resolve(phone_name.trim());
        if phone.is_none() {
            info!(phone = phone_name, "Phone not in catalog, using generic defaults");
        }

        let category = self.classifier.classify(target);
        let lens = self.selector.select(phone, category);
        let settings = self.settings.decide(phone, category, lens);
        let explanation = self.composer.compose(phone, target, lens, &settings);
        let direction = self.directions.lookup(target);

        GuidePlan {
            resolved_phone: phone.map(|p| p.name.clone()),
            category,
            lens,
            settings,
            direction,
            explanation,
        }
    }

    /// Validate a request, run the pipeline and enrich the result.
    pub fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse> {
        let phone_name = request.phone_name.trim();
        let target = request.target.trim();
        if phone_name.is_empty() {
            return Err(GuideError::invalid_request("phone_name must not be empty"));
        }
        if target.is_empty() {
            return Err(GuideError::invalid_request("target must not be empty"));
        }

        let plan = self.plan(phone_name, target);

        let direction_ai = match self.enrich("direction estimate", || {
            prompts::direction_estimate(target, None)
        }) {
            Some(text) => AiDirection {
                source: "ai_estimated".to_string(),
                explanation: text,
            },
            None => AiDirection {
                source: "fallback".to_string(),
                explanation: AI_DIRECTION_FALLBACK.to_string(),
            },
        };

        let direction_text = self
            .enrich("direction explanation", || {
                prompts::direction_explanation(target, &plan.direction)
            })
            .unwrap_or_else(|| DIRECTION_FALLBACK.to_string());

        let ai_summary = self
            .enrich("settings explanation", || {
                prompts::settings_explanation(
                    plan.resolved_phone.as_deref(),
                    target,
                    plan.lens,
                    &plan.settings,
                )
            })
            .unwrap_or_else(|| OfflineExplainer::describe_settings(plan.lens, &plan.settings));

        Ok(AnalyzeResponse {
            phone: phone_name.to_string(),
            resolved_phone: plan.resolved_phone,
            target: target.to_string(),
            category: plan.category,
            lens: plan.lens,
            settings: plan.settings,
            explanation: plan.explanation,
            direction: DirectionSection {
                data: plan.direction,
                explanation: direction_text,
            },
            direction_ai,
            ai_summary,
        })
    }

    /// Ask the backend for prose. A non-generative backend, any failure or
    /// an empty answer yields `None`.
    fn enrich(&self, purpose: &str, prompt: impl FnOnce() -> String) -> Option<String> {
        let explainer = self.explainer.as_ref().filter(|e| e.is_generative())?;
        match explainer.generate(&prompt()) {
            Ok(text) if !text.trim().is_empty() => {
                debug!(backend = explainer.name(), purpose, "Enrichment succeeded");
                Some(text.trim().to_string())
            }
            Ok(_) => {
                warn!(backend = explainer.name(), purpose, "Backend returned empty text");
                None
            }
            Err(e) => {
                warn!(backend = explainer.name(), purpose, "Backend failed: {:#}", e);
                None
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
