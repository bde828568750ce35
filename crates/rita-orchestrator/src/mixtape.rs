//! Final score -> impact category mapping (§4.9 step 3, tail; §3). This
//! is the one piece of "analytic" logic the orchestrator performs itself
//! rather than delegating to caller-supplied SQL, since the mapping is a
//! pure function this workspace already owns (`rita_types::score`).

use clickhouse::Row;
use rita_error::Result;
use rita_store::Session;
use rita_types::score::{category_from_score, ImpactCategory};
use serde::Deserialize;

#[derive(Debug, Clone, Row, Deserialize)]
struct ScoreRow {
    fingerprint: [u8; 16],
    total_score: f64,
}

fn category_literal(category: ImpactCategory) -> &'static str {
    match category {
        ImpactCategory::None => "none",
        ImpactCategory::Low => "low",
        ImpactCategory::Medium => "medium",
        ImpactCategory::High => "high",
        ImpactCategory::Critical => "critical",
    }
}

fn hex_literal(bytes: [u8; 16]) -> String {
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    format!("unhex('{hex}')")
}

/// Recompute `impact_category` from `total_score` for every row inserted
/// during this run (`analyzed_at` scopes the update to the current pass,
/// so historical rows are left untouched). Rows are grouped by the
/// category their final score lands in, so each category is written with
/// a single mutation rather than one per row.
pub async fn finalize_impact_categories(session: &Session, dataset: &str, analyzed_at: i64) -> Result<u64> {
    let sql = format!(
        "SELECT fingerprint, total_score FROM {dataset}.threat_mixtape WHERE analyzed_at = {analyzed_at}"
    );
    let rows: Vec<ScoreRow> = session.query(&sql).await?;
    let mut by_category: Vec<(ImpactCategory, Vec<[u8; 16]>)> = Vec::new();
    for row in &rows {
        let category = category_from_score(row.total_score);
        match by_category.iter_mut().find(|(c, _)| *c == category) {
            Some((_, fps)) => fps.push(row.fingerprint),
            None => by_category.push((category, vec![row.fingerprint])),
        }
    }
    for (category, fingerprints) in &by_category {
        let values = fingerprints.iter().map(|fp| hex_literal(*fp)).collect::<Vec<_>>().join(", ");
        let sql = format!(
            "ALTER TABLE {dataset}.threat_mixtape UPDATE impact_category = '{cat}' \
             WHERE analyzed_at = {analyzed_at} AND fingerprint IN ({values})",
            cat = category_literal(*category),
        );
        session.execute(&sql).await?;
    }
    Ok(rows.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_literal_round_trips_bytes() {
        let bytes = [0xDEu8, 0xAD, 0xBE, 0xEF, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1];
        assert_eq!(hex_literal(bytes), "unhex('deadbeef000000000000000000000001')");
    }

    #[test]
    fn category_literal_excludes_nothing() {
        for c in [
            ImpactCategory::None,
            ImpactCategory::Low,
            ImpactCategory::Medium,
            ImpactCategory::High,
            ImpactCategory::Critical,
        ] {
            assert!(!category_literal(c).is_empty());
        }
    }
}
