//! Google Gemini backend (blocking HTTP).

use anyhow::{anyhow, Context};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::warn;

use super::{ExplainResult, Explainer};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
const BACKOFF_BASE_MS: u64 = 500;
const BACKOFF_MAX_MS: u64 = 8_000;

/// Configuration for the Gemini backend
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    /// API root, overridable for proxies and tests
    pub base_url: String,
    pub timeout_secs: u64,
    /// Extra attempts after the first failure
    pub max_retries: u32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            base_url: GEMINI_API_BASE.to_string(),
            timeout_secs: 30,
            max_retries: 2,
        }
    }
}

pub struct GeminiExplainer {
    config: GeminiConfig,
    client: Client,
}

impl GeminiExplainer {
    pub fn new(config: GeminiConfig) -> anyhow::Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(anyhow!("Gemini API key is required"));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { config, client })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn send_request(&self, prompt: &str) -> anyhow::Result<String> {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                std::thread::sleep(backoff_delay(attempt));
            }

            match self.try_request(prompt) {
                Ok(text) => return Ok(text),
                Err(e) => {
                    if attempt < self.config.max_retries {
                        warn!(
                            "Gemini request failed (attempt {}/{}), retrying: {:#}",
                            attempt + 1,
                            self.config.max_retries.saturating_add(1),
                            e
                        );
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow!("All retry attempts failed")))
    }

    fn try_request(&self, prompt: &str) -> anyhow::Result<String> {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .context("Failed to send request to Gemini API")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow!("Gemini API error ({}): {}", status, error_text));
        }

        let body: GenerateResponse = response
            .json()
            .context("Failed to parse Gemini API response")?;
        extract_text(body)
    }
}

impl Explainer for GeminiExplainer {
    fn generate(&self, prompt: &str) -> ExplainResult<String> {
        self.send_request(prompt)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

/// Delay before retry `attempt` (1-based): 500ms, 1s, 2s, ... capped at 8s.
fn backoff_delay(attempt: u32) -> Duration {
    let factor = 2u64.saturating_pow(attempt.saturating_sub(1));
    Duration::from_millis(BACKOFF_BASE_MS.saturating_mul(factor).min(BACKOFF_MAX_MS))
}

/// Join the text parts of the first candidate.
fn extract_text(response: GenerateResponse) -> anyhow::Result<String> {
    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("Gemini returned no candidates"))?;

    let text: String = candidate
        .content
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    let text = text.trim();
    if text.is_empty() {
        return Err(anyhow!("Gemini returned an empty response"));
    }
    Ok(text.to_string())
}

// Gemini API types

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}
