//! Scoring and modifier orchestrator (§4.9): the consumer of the
//! timestamp/network-size layer. Resets scratch tables, runs the
//! external analytic stages in fixed order, applies modifier stages, and
//! finalizes each row's impact category from its clamped total score.

mod mixtape;
mod modifier;
mod reset;
mod stage;

pub use mixtape::finalize_impact_categories;
pub use modifier::{apply_modifiers, clamp_unit, ModifierStage};
pub use reset::{reset_temp_tables, RESET_TABLES};
pub use stage::{run_analytic_stages, AnalyticStage, AnalyticStageKind};

use rita_error::Result;
use rita_store::Session;

/// One full orchestrator pass over `dataset`: reset, analytic stages,
/// modifiers, finalize. `analyzed_at` is the microsecond timestamp this
/// run's rows are stamped with, used to scope the finalize step.
pub async fn run_cycle(
    session: &Session,
    dataset: &str,
    analytic_stages: &[AnalyticStage],
    modifiers: &[ModifierStage],
    analyzed_at: i64,
) -> Result<CycleSummary> {
    reset_temp_tables(session, dataset).await?;
    let stages_run = run_analytic_stages(session, analytic_stages).await?;
    apply_modifiers(session, dataset, modifiers).await?;
    let rows_finalized = finalize_impact_categories(session, dataset, analyzed_at).await?;
    Ok(CycleSummary { stages_run, modifiers_run: modifiers.len(), rows_finalized })
}

#[derive(Debug, Clone)]
pub struct CycleSummary {
    pub stages_run: Vec<&'static str>,
    pub modifiers_run: usize,
    pub rows_finalized: u64,
}
