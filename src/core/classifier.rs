//! Target classification
//!
//! Maps a target name to a [`TargetCategory`] by exact membership in static
//! tables. Names are lowercased and trimmed first; there is no partial match.

use std::collections::HashSet;

use lazy_static::lazy_static;
use tracing::debug;

use super::models::TargetCategory;

lazy_static! {
    static ref PLANETS: HashSet<&'static str> = [
        "moon", "mercury", "venus", "earth", "mars", "jupiter", "saturn", "uranus", "neptune",
    ]
    .into_iter()
    .collect();

    static ref DEEP_SKY: HashSet<&'static str> = [
        "andromeda",
        "orion nebula",
        "pleiades",
        "whirlpool galaxy",
        "eagle nebula",
        "sombrero galaxy",
        "milky way",
        "stars",
        "galaxy",
    ]
    .into_iter()
    .collect();

    static ref FAST_OBJECTS: HashSet<&'static str> =
        ["meteor", "meteor shower", "satellite", "comet"].into_iter().collect();
}

/// Lowercase and trim a target name before any table lookup.
pub fn normalize_target(target: &str) -> String {
    target.trim().to_lowercase()
}

/// Stateless classifier over the built-in target tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct TargetClassifier;

impl TargetClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Classify a free-text target name.
    pub fn classify(&self, target: &str) -> TargetCategory {
        let name = normalize_target(target);
        let category = if PLANETS.contains(name.as_str()) {
            TargetCategory::Planet
        } else if DEEP_SKY.contains(name.as_str()) {
            TargetCategory::DeepSky
        } else if FAST_OBJECTS.contains(name.as_str()) {
            TargetCategory::FastObject
        } else {
            TargetCategory::Unknown
        };
        debug!(target = %name, %category, "Classified target");
        category
    }

    /// Every name the classifier recognises, with its category.
    pub fn known_targets(&self) -> Vec<(&'static str, TargetCategory)> {
        let mut targets: Vec<_> = PLANETS
            .iter()
            .map(|name| (*name, TargetCategory::Planet))
            .chain(DEEP_SKY.iter().map(|name| (*name, TargetCategory::DeepSky)))
            .chain(FAST_OBJECTS.iter().map(|name| (*name, TargetCategory::FastObject)))
            .collect();
        targets.sort();
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_planets() {
        let classifier = TargetClassifier::new();
        for name in ["moon", "Jupiter", "SATURN", "mars", "venus", "neptune"] {
            assert_eq!(classifier.classify(name), TargetCategory::Planet, "{}", name);
        }
    }

    #[test]
    fn test_classify_deep_sky() {
        let classifier = TargetClassifier::new();
        assert_eq!(classifier.classify("andromeda"), TargetCategory::DeepSky);
        assert_eq!(classifier.classify("Milky Way"), TargetCategory::DeepSky);
        assert_eq!(classifier.classify("Orion Nebula"), TargetCategory::DeepSky);
    }

    #[test]
    fn test_classify_fast_objects() {
        let classifier = TargetClassifier::new();
        assert_eq!(classifier.classify("meteor shower"), TargetCategory::FastObject);
        assert_eq!(classifier.classify("Comet"), TargetCategory::FastObject);
    }

    #[test]
    fn test_classify_unknown() {
        let classifier = TargetClassifier::new();
        assert_eq!(classifier.classify("banana"), TargetCategory::Unknown);
        assert_eq!(classifier.classify(""), TargetCategory::Unknown);
    }

    #[test]
    fn test_no_partial_matching() {
        let classifier = TargetClassifier::new();
        assert_eq!(classifier.classify("the moon"), TargetCategory::Unknown);
        assert_eq!(classifier.classify("andromeda galaxy"), TargetCategory::Unknown);
        assert_eq!(classifier.classify("meteors"), TargetCategory::Unknown);
    }

    #[test]
    fn test_classify_normalizes_input() {
        let classifier = TargetClassifier::new();
        let expected = classifier.classify("moon");
        assert_eq!(classifier.classify("Moon"), expected);
        assert_eq!(classifier.classify(" moon "), expected);
        assert_eq!(classifier.classify("\tMOON\n"), expected);
    }

    #[test]
    fn test_tables_are_disjoint() {
        let targets = TargetClassifier::new().known_targets();
        let mut names: Vec<_> = targets.iter().map(|(name, _)| *name).collect();
        names.dedup();
        assert_eq!(names.len(), targets.len());
    }

    #[test]
    fn test_known_targets_roundtrip() {
        let classifier = TargetClassifier::new();
        for (name, category) in classifier.known_targets() {
            assert_eq!(classifier.classify(name), category);
        }
    }
}
