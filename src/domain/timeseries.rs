//! Portfolio-wide time series on a shared calendar axis.

use crate::domain::ledger::LedgerRow;
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub cumulative_contributed: f64,
    pub cumulative_interest: f64,
    pub total_balance: f64,
}

#[derive(Debug, Clone, Copy, Default)]
struct DateDelta {
    contributed: f64,
    interest: f64,
}

/// Collapse every investor's ledger onto one chronologically ordered series.
///
/// One point per distinct event date. Contributions are clamped at zero and
/// interest never decreases. The first point's interest is exactly zero: no
/// capital has been held for any time before it.
pub fn project_time_series(ledgers: &BTreeMap<String, Vec<LedgerRow>>) -> Vec<TimeSeriesPoint> {
    let mut by_date: BTreeMap<NaiveDate, DateDelta> = BTreeMap::new();
    for row in ledgers.values().flatten() {
        let delta = by_date.entry(row.date).or_default();
        delta.contributed += row.signed_amount;
        delta.interest += row.period_interest;
    }

    let mut series = Vec::with_capacity(by_date.len());
    let mut contributed = 0.0_f64;
    let mut interest = 0.0_f64;

    for (i, (date, delta)) in by_date.into_iter().enumerate() {
        contributed = (contributed + delta.contributed).max(0.0);
        interest = if i == 0 {
            0.0
        } else {
            interest.max(interest + delta.interest)
        };
        series.push(TimeSeriesPoint {
            date,
            cumulative_contributed: contributed,
            cumulative_interest: interest,
            total_balance: contributed + interest,
        });
    }
    series
}
