//! Score thresholds, impact categories, and the score<->category mapping.

use serde::{Deserialize, Serialize};

/// A four-tuple of strictly increasing thresholds used by a single
/// analytic stage (beacon, long-connection, strobe, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreThresholds {
    pub base: i32,
    pub low: i32,
    pub med: i32,
    pub high: i32,
}

impl ScoreThresholds {
    #[must_use]
    pub fn new(base: i32, low: i32, med: i32, high: i32) -> Self {
        Self { base, low, med, high }
    }

    /// Validate strictly-increasing-and-unique ordering plus the
    /// configured range bounds. `min`/`max` of `None` (or a negative
    /// `max`) mean "unbounded" on that side.
    ///
    /// Returns a list of human-readable violation messages; empty means
    /// valid.
    #[must_use]
    pub fn validate(&self, min: Option<i32>, max: Option<i32>) -> Vec<String> {
        let mut errors = Vec::new();
        if !(self.base < self.low) {
            errors.push(format!(
                "score thresholds: base ({}) must be < low ({})",
                self.base, self.low
            ));
        }
        if !(self.low < self.med) {
            errors.push(format!(
                "score thresholds: low ({}) must be < med ({})",
                self.low, self.med
            ));
        }
        if !(self.med < self.high) {
            errors.push(format!(
                "score thresholds: med ({}) must be < high ({})",
                self.med, self.high
            ));
        }
        if let Some(min) = min {
            if min >= 0 && self.base < min {
                errors.push(format!(
                    "score thresholds: base ({}) must be >= configured min ({})",
                    self.base, min
                ));
            }
        }
        if let Some(max) = max {
            if max >= 0 && self.high > max {
                errors.push(format!(
                    "score thresholds: high ({}) must be <= configured max ({})",
                    self.high, max
                ));
            }
        }
        errors
    }
}

/// Coarse severity bucket. `Critical` is never user-supplied; it is only
/// reachable after modifier accumulation in scoring (see
/// [`category_from_score`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactCategory {
    None,
    Low,
    Medium,
    High,
    Critical,
}

/// The subset of [`ImpactCategory`] a user may supply in configuration.
/// `Critical` is excluded — see `rita-config`'s validator, which rejects
/// it explicitly rather than silently coercing it.
#[must_use]
pub fn is_user_assignable(category: ImpactCategory) -> bool {
    !matches!(category, ImpactCategory::Critical)
}

/// A (category, score) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreImpact {
    pub category: ImpactCategory,
    pub score: f64,
}

/// Map a user-assignable impact category to its base numeric score.
#[must_use]
pub fn score_from_impact_category(category: ImpactCategory) -> f64 {
    match category {
        ImpactCategory::None => 0.2,
        ImpactCategory::Low => 0.4,
        ImpactCategory::Medium => 0.6,
        ImpactCategory::High => 0.8,
        // Not user-reachable; keeps the mapping total rather than
        // partial so callers never need to `unwrap` it.
        ImpactCategory::Critical => 1.0,
    }
}

/// Inverse of [`score_from_impact_category`]: bucket a final numeric score
/// back into its impact category.
///
/// Buckets: `(0, 0.2] -> None`, `(0.2, 0.4] -> Low`, `(0.4, 0.6] -> Medium`,
/// `(0.6, 1.0] -> High`. A score of exactly `0.0` or below also maps to
/// `None`.
#[must_use]
pub fn category_from_score(score: f64) -> ImpactCategory {
    if score > 0.6 {
        ImpactCategory::High
    } else if score > 0.4 {
        ImpactCategory::Medium
    } else if score > 0.2 {
        ImpactCategory::Low
    } else {
        ImpactCategory::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn valid_thresholds_pass() {
        let t = ScoreThresholds::new(50, 75, 90, 100);
        assert!(t.validate(Some(0), Some(100)).is_empty());
    }

    #[test]
    fn non_increasing_base_low_is_rejected() {
        let t = ScoreThresholds::new(75, 75, 90, 100);
        let errs = t.validate(None, None);
        assert!(errs.iter().any(|e| e.contains("base") && e.contains("low")));
    }

    #[test]
    fn high_exceeding_configured_max_is_rejected() {
        let t = ScoreThresholds::new(0, 1, 2, 3);
        let errs = t.validate(None, Some(2));
        assert!(errs.iter().any(|e| e.contains("high")));
    }

    #[test]
    fn roundtrip_for_user_assignable_categories() {
        for category in [
            ImpactCategory::None,
            ImpactCategory::Low,
            ImpactCategory::Medium,
            ImpactCategory::High,
        ] {
            let score = score_from_impact_category(category);
            assert_eq!(category_from_score(score), category);
        }
    }

    proptest! {
        #[test]
        fn threshold_validation_never_panics(base: i32, low: i32, med: i32, high: i32, min: i32, max: i32) {
            let t = ScoreThresholds::new(base, low, med, high);
            let _ = t.validate(Some(min), Some(max));
        }
    }
}
