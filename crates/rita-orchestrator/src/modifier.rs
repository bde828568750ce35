//! Modifier stages (§4.9 step 3). Each modifier is a caller-supplied
//! mutation against `threat_mixtape` (prevalence, first-seen age, missing
//! headers, rare signatures, MIME/URI mismatch, threat-intel size — see
//! the glossary's "Modifier" entry) applying a score delta. The
//! orchestrator does not compute the deltas; it runs them in the order
//! supplied and guarantees the cumulative result is clamped into `[0,
//! 1]` once every modifier has run.

use rita_error::Result;
use rita_store::Session;

#[derive(Debug, Clone)]
pub struct ModifierStage {
    pub name: String,
    pub sql: String,
}

impl ModifierStage {
    #[must_use]
    pub fn new(name: impl Into<String>, sql: impl Into<String>) -> Self {
        Self { name: name.into(), sql: sql.into() }
    }
}

/// Clamp a score (or score delta accumulation) into `[0, 1]`.
#[must_use]
pub fn clamp_unit(score: f64) -> f64 {
    score.clamp(0.0, 1.0)
}

/// Run every modifier in the order supplied, then clamp `total_score`
/// into `[0, 1]` across every row touched this run (`modifiers` may have
/// pushed it outside that range; this is the backstop the design spec's
/// "cumulative magnitude is clamped" language requires regardless of how
/// many modifiers ran or in what combination).
pub async fn apply_modifiers(session: &Session, dataset: &str, modifiers: &[ModifierStage]) -> Result<()> {
    for modifier in modifiers {
        session.execute(&modifier.sql).await?;
        tracing::debug!(modifier = modifier.name.as_str(), "modifier stage complete");
    }
    let clamp_sql = format!(
        "ALTER TABLE {dataset}.threat_mixtape UPDATE total_score = \
         least(1.0, greatest(0.0, total_score)) WHERE total_score < 0.0 OR total_score > 1.0"
    );
    session.execute(&clamp_sql).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_unit_caps_both_ends() {
        assert_eq!(clamp_unit(-0.3), 0.0);
        assert_eq!(clamp_unit(1.7), 1.0);
        assert_eq!(clamp_unit(0.42), 0.42);
    }
}
