//! Phone Catalog
//!
//! Read-only mapping from phone model name to capability record, with a
//! cascading lookup for free-text queries:
//!
//! ```text
//! query → exact key → substring (shortest key wins) → fuzzy ratio ≥ threshold → absent
//! ```
//!
//! The catalog is built once and shared by reference; nothing mutates it after
//! construction. A miss is a normal outcome, never an error.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use similar::TextDiff;
use tracing::{debug, error, info};

use super::error::{GuideError, Result};
use super::models::PhoneRecord;

/// Phone dataset compiled into the binary
const BUNDLED_PHONES: &str = include_str!("../../data/phones.json");

/// Minimum similarity for a fuzzy match to be accepted
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.5;

// =============================================================================
// Similarity
// =============================================================================

/// String similarity in `[0.0, 1.0]`, used for the fuzzy step of the lookup.
pub trait SimilarityMetric: Send + Sync {
    fn similarity(&self, a: &str, b: &str) -> f64;
}

/// Character-level diff ratio: `2 * matches / (len(a) + len(b))`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CharRatio;

impl SimilarityMetric for CharRatio {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        if a.is_empty() && b.is_empty() {
            return 1.0;
        }
        TextDiff::from_chars(a, b).ratio() as f64
    }
}

/// How a query was matched to a catalog key
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchKind {
    Exact,
    Substring,
    Fuzzy { score: f64 },
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Substring => write!(f, "substring"),
            Self::Fuzzy { score } => write!(f, "fuzzy ({:.2})", score),
        }
    }
}

/// Resolve a free-text query against a fixed set of names.
///
/// Pure function over the key set; the catalog delegates to it. Keys are
/// visited in iteration order, so ties on length or score go to the first key.
pub fn match_name<'a, I>(
    keys: I,
    query: &str,
    metric: &dyn SimilarityMetric,
    threshold: f64,
) -> Option<(&'a str, MatchKind)>
where
    I: IntoIterator<Item = &'a str>,
    I::IntoIter: Clone,
{
    let keys = keys.into_iter();
    let query = query.trim();

    if let Some(key) = keys.clone().find(|key| *key == query) {
        return Some((key, MatchKind::Exact));
    }

    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    // Shortest containing key is taken as the base model ("S24" over "S24 Ultra")
    let substring = keys
        .clone()
        .filter(|key| key.to_lowercase().contains(&needle))
        .min_by_key(|key| key.chars().count());
    if let Some(key) = substring {
        return Some((key, MatchKind::Substring));
    }

    let mut best: Option<(&'a str, f64)> = None;
    for key in keys {
        let score = metric.similarity(&needle, &key.to_lowercase());
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((key, score));
        }
    }

    best.filter(|(_, score)| *score >= threshold)
        .map(|(key, score)| (key, MatchKind::Fuzzy { score }))
}

// =============================================================================
// Phone Catalog
// =============================================================================

/// Immutable phone capability database.
pub struct PhoneCatalog {
    phones: BTreeMap<String, PhoneRecord>,
    metric: Box<dyn SimilarityMetric>,
    threshold: f64,
}

impl fmt::Debug for PhoneCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhoneCatalog")
            .field("phones", &self.phones.len())
            .field("threshold", &self.threshold)
            .finish()
    }
}

impl Default for PhoneCatalog {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl PhoneCatalog {
    /// Build a catalog from records, keyed by their `name`.
    pub fn new(phones: impl IntoIterator<Item = PhoneRecord>) -> Self {
        Self {
            phones: phones
                .into_iter()
                .map(|phone| (phone.name.clone(), phone))
                .collect(),
            metric: Box::new(CharRatio),
            threshold: DEFAULT_FUZZY_THRESHOLD,
        }
    }

    /// Parse a `{ "<model>": { ...capabilities } }` dataset.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, PhoneRecord> = serde_json::from_str(json)?;
        Ok(Self::new(raw.into_iter().map(|(name, mut phone)| {
            phone.name = name;
            phone
        })))
    }

    /// Load a dataset from disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| GuideError::CatalogLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let catalog = Self::from_json_str(&content).map_err(|e| GuideError::CatalogLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        info!(path = %path.display(), phones = catalog.len(), "Loaded phone catalog");
        Ok(catalog)
    }

    /// The dataset shipped with the crate.
    pub fn bundled() -> Self {
        match Self::from_json_str(BUNDLED_PHONES) {
            Ok(catalog) => catalog,
            Err(e) => {
                error!("Bundled phone dataset is malformed: {}", e);
                Self::default()
            }
        }
    }

    /// Builder pattern: swap the similarity metric
    pub fn with_metric(mut self, metric: impl SimilarityMetric + 'static) -> Self {
        self.metric = Box::new(metric);
        self
    }

    /// Builder pattern: set the fuzzy acceptance threshold
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Fuzzy acceptance threshold
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Number of phone models
    pub fn len(&self) -> usize {
        self.phones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phones.is_empty()
    }

    /// Model names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> + Clone {
        self.phones.keys().map(String::as_str)
    }

    /// Exact, case-sensitive lookup
    pub fn get(&self, name: &str) -> Option<&PhoneRecord> {
        self.phones.get(name)
    }

    /// Resolve a free-text query to the best matching record.
    pub fn resolve(&self, query: &str) -> Option<&PhoneRecord> {
        self.resolve_with_kind(query).map(|(phone, _)| phone)
    }

    /// Resolve and report which lookup step succeeded.
    pub fn resolve_with_kind(&self, query: &str) -> Option<(&PhoneRecord, MatchKind)> {
        let found = match_name(self.names(), query, self.metric.as_ref(), self.threshold);
        match found {
            Some((key, kind)) => {
                debug!(query, matched = key, via = %kind, "Resolved phone");
                self.phones.get(key).map(|phone| (phone, kind))
            }
            None => {
                debug!(query, "No phone matched");
                None
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
