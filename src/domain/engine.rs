//! Computation pass: validate, group, build ledgers, project, aggregate.

use crate::domain::error::AccrualError;
use crate::domain::event::ContributionEvent;
use crate::domain::grouping::group_by_investor;
use crate::domain::ledger::{build_ledger, LedgerRow};
use crate::domain::params::EngineParams;
use crate::domain::stats::{InvestorSummary, PortfolioStats};
use crate::domain::timeseries::{project_time_series, TimeSeriesPoint};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Read-only snapshot produced by one pass over `(events, daily_rate, as_of)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputationResult {
    pub ledger: BTreeMap<String, Vec<LedgerRow>>,
    pub series: Vec<TimeSeriesPoint>,
    pub stats: PortfolioStats,
    pub investors: Vec<InvestorSummary>,
}

impl ComputationResult {
    /// All ledger rows, by investor id then chronologically.
    pub fn rows(&self) -> impl Iterator<Item = &LedgerRow> {
        self.ledger.values().flatten()
    }

    pub fn row_count(&self) -> usize {
        self.ledger.values().map(Vec::len).sum()
    }
}

/// Run the full pipeline.
///
/// Every event is validated before any ledger is built; a single invalid event
/// rejects the whole pass.
pub fn compute(
    events: &[ContributionEvent],
    params: &EngineParams,
) -> Result<ComputationResult, AccrualError> {
    for event in events {
        event.validate()?;
    }

    let groups = group_by_investor(events);
    debug!(investors = groups.len(), "events grouped");

    let ledger: BTreeMap<String, Vec<LedgerRow>> = groups
        .iter()
        .map(|(investor_id, events)| (investor_id.clone(), build_ledger(events, params)))
        .collect();

    let series = project_time_series(&ledger);
    debug!(dates = series.len(), "time series projected");
    let stats = PortfolioStats::compute(&ledger);
    let investors = InvestorSummary::compute_per_investor(&ledger, stats.total_balance);

    info!(
        events = events.len(),
        investors = stats.investor_count,
        dates = series.len(),
        as_of = %params.as_of(),
        net_contributed = stats.net_contributed,
        interest = stats.total_interest_accrued,
        "computation pass complete"
    );

    Ok(ComputationResult {
        ledger,
        series,
        stats,
        investors,
    })
}
