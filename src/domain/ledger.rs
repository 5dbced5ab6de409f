//! Per-investor ledger construction.
//!
//! The ledger is an ordered fold over one investor's chronologically sorted
//! events. [`LedgerState`] carries the running balance and totals from one
//! event to the next; [`LedgerState::apply`] consumes one event and yields the
//! next state together with the event's [`LedgerRow`].
//!
//! Interest for an event accrues on the balance *after* the event is applied,
//! for the holding period up to the next event (or `as_of` for the most recent
//! event). Interest on intermediate events rolls into the principal of the next
//! period; interest on the last event is reported but not rolled.

use crate::domain::compounding::{compound_interest, days_between};
use crate::domain::event::{ContributionEvent, EventKind};
use crate::domain::params::EngineParams;
use chrono::NaiveDate;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRow {
    pub id: String,
    pub investor_id: String,
    pub investor_name: String,
    pub date: NaiveDate,
    pub kind: EventKind,
    pub opening_balance: f64,
    pub signed_amount: f64,
    pub balance_after_event: f64,
    pub cumulative_contributed: f64,
    pub period_days: i64,
    pub period_interest: f64,
    pub cumulative_interest_accrued: f64,
    pub closing_balance: f64,
}

/// State carried between consecutive events of one investor.
///
/// `cumulative_contributed` is the signed running net of deposits minus
/// withdrawals and may go negative after an overdrawn withdrawal.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LedgerState {
    pub balance: f64,
    pub cumulative_contributed: f64,
    pub cumulative_interest: f64,
}

impl LedgerState {
    /// Apply one event whose holding period ends at `period_end`.
    ///
    /// `is_last` marks the investor's most recent event: its interest is
    /// reported in the row but not rolled into the returned state's balance.
    pub fn apply(
        self,
        event: &ContributionEvent,
        period_end: NaiveDate,
        is_last: bool,
        daily_rate: f64,
    ) -> (LedgerState, LedgerRow) {
        let opening_balance = self.balance;
        let signed_amount = event.signed_amount();

        let raw_balance = opening_balance + signed_amount;
        if raw_balance < 0.0 {
            warn!(
                event_id = %event.id,
                investor_id = %event.investor_id,
                shortfall = -raw_balance,
                "withdrawal exceeds balance, flooring at zero"
            );
        }
        let balance = raw_balance.max(0.0);
        // the carried net stays signed; only the reported value is floored
        let net_contributed = self.cumulative_contributed + signed_amount;

        let period_days = days_between(event.date, period_end);
        let period_interest = compound_interest(balance, daily_rate, period_days);
        let cumulative_interest = self.cumulative_interest + period_interest;

        let row = LedgerRow {
            id: event.id.clone(),
            investor_id: event.investor_id.clone(),
            investor_name: event.investor_name.clone(),
            date: event.date,
            kind: event.kind,
            opening_balance,
            signed_amount,
            balance_after_event: balance,
            cumulative_contributed: net_contributed.max(0.0),
            period_days,
            period_interest,
            cumulative_interest_accrued: cumulative_interest,
            closing_balance: balance + period_interest,
        };

        let next = LedgerState {
            balance: if is_last { balance } else { balance + period_interest },
            cumulative_contributed: net_contributed,
            cumulative_interest,
        };
        (next, row)
    }
}

/// Build the ledger for one investor's chronologically sorted events.
pub fn build_ledger(events: &[ContributionEvent], params: &EngineParams) -> Vec<LedgerRow> {
    let mut rows = Vec::with_capacity(events.len());
    let mut state = LedgerState::default();

    for (i, event) in events.iter().enumerate() {
        let next = events.get(i + 1);
        let period_end = next.map(|e| e.date).unwrap_or_else(|| params.as_of());
        if next.is_none() && period_end < event.date {
            warn!(
                investor_id = %event.investor_id,
                event_date = %event.date,
                as_of = %period_end,
                "as_of precedes latest event, holding period clamped to zero days"
            );
        }
        let (new_state, row) = state.apply(event, period_end, next.is_none(), params.daily_rate());
        state = new_state;
        rows.push(row);
    }

    if let Some(last) = rows.last() {
        debug!(
            investor_id = %last.investor_id,
            events = rows.len(),
            contributed = last.cumulative_contributed,
            interest = last.cumulative_interest_accrued,
            "ledger built"
        );
    }
    rows
}
