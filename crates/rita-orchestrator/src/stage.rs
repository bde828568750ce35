//! External analytic stages (§4.9 step 2). The orchestrator never embeds
//! analytic SQL itself — each stage is a caller-supplied query (or the
//! contents of a caller-supplied file) that the orchestrator runs in the
//! fixed order the design spec requires, writing its own rows into
//! `threat_mixtape`.

use rita_error::Result;
use rita_store::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalyticStageKind {
    Beacon,
    LongConnection,
    Strobe,
    ThreatIntel,
    C2Dns,
}

impl AnalyticStageKind {
    /// The fixed invocation order, exactly as the design spec lists it.
    pub const ORDER: [AnalyticStageKind; 5] = [
        AnalyticStageKind::Beacon,
        AnalyticStageKind::LongConnection,
        AnalyticStageKind::Strobe,
        AnalyticStageKind::ThreatIntel,
        AnalyticStageKind::C2Dns,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            AnalyticStageKind::Beacon => "beacon",
            AnalyticStageKind::LongConnection => "long_connection",
            AnalyticStageKind::Strobe => "strobe",
            AnalyticStageKind::ThreatIntel => "threat_intel",
            AnalyticStageKind::C2Dns => "c2_dns",
        }
    }
}

/// One caller-supplied analytic stage: an opaque query that inserts rows
/// into `threat_mixtape`.
#[derive(Debug, Clone)]
pub struct AnalyticStage {
    pub kind: AnalyticStageKind,
    pub sql: String,
}

impl AnalyticStage {
    #[must_use]
    pub fn new(kind: AnalyticStageKind, sql: impl Into<String>) -> Self {
        Self { kind, sql: sql.into() }
    }
}

/// Run every stage present in `stages` in [`AnalyticStageKind::ORDER`],
/// regardless of the order they were supplied in. A stage kind with no
/// entry in `stages` is skipped, not an error — not every dataset run
/// enables every analytic stage.
///
/// Returns the names of the stages actually run, in execution order.
pub async fn run_analytic_stages(session: &Session, stages: &[AnalyticStage]) -> Result<Vec<&'static str>> {
    let mut ran = Vec::with_capacity(stages.len());
    for kind in AnalyticStageKind::ORDER {
        if let Some(stage) = stages.iter().find(|s| s.kind == kind) {
            session.execute(&stage.sql).await?;
            tracing::debug!(stage = kind.name(), "analytic stage complete");
            ran.push(kind.name());
        }
    }
    Ok(ran)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_matches_spec_sequence() {
        let names: Vec<_> = AnalyticStageKind::ORDER.iter().map(|k| k.name()).collect();
        assert_eq!(names, ["beacon", "long_connection", "strobe", "threat_intel", "c2_dns"]);
    }
}
