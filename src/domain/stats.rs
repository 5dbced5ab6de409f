//! Portfolio-level statistics and per-investor summaries.

use crate::domain::event::EventKind;
use crate::domain::ledger::LedgerRow;
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PortfolioStats {
    pub net_contributed: f64,
    pub total_interest_accrued: f64,
    pub total_balance: f64,
    pub investor_count: usize,
    pub return_percentage: f64,
    pub average_per_investor: f64,
}

impl PortfolioStats {
    /// Aggregate using only each investor's last ledger row.
    ///
    /// Every row already holds running totals, so summing an investor's rows
    /// would count earlier contributions and interest more than once.
    pub fn compute(ledgers: &BTreeMap<String, Vec<LedgerRow>>) -> Self {
        let mut net_contributed = 0.0_f64;
        let mut total_interest_accrued = 0.0_f64;
        let mut investor_count = 0usize;

        for last in ledgers.values().filter_map(|rows| rows.last()) {
            net_contributed += last.cumulative_contributed;
            total_interest_accrued += last.cumulative_interest_accrued;
            investor_count += 1;
        }

        let return_percentage = if net_contributed != 0.0 {
            total_interest_accrued / net_contributed * 100.0
        } else {
            0.0
        };

        let average_per_investor = if investor_count > 0 {
            net_contributed / investor_count as f64
        } else {
            0.0
        };

        PortfolioStats {
            net_contributed,
            total_interest_accrued,
            total_balance: net_contributed + total_interest_accrued,
            investor_count,
            return_percentage,
            average_per_investor,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvestorSummary {
    pub investor_id: String,
    pub investor_name: String,
    pub event_count: usize,
    pub deposit_count: usize,
    pub withdrawal_count: usize,
    pub total_deposited: f64,
    pub total_withdrawn: f64,
    pub net_contributed: f64,
    pub interest_accrued: f64,
    pub current_balance: f64,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub share_of_portfolio: f64,
}

impl InvestorSummary {
    /// One summary per investor with at least one row, in investor id order.
    pub fn compute_per_investor(
        ledgers: &BTreeMap<String, Vec<LedgerRow>>,
        portfolio_balance: f64,
    ) -> Vec<InvestorSummary> {
        ledgers
            .values()
            .filter_map(|rows| Self::from_rows(rows, portfolio_balance))
            .collect()
    }

    fn from_rows(rows: &[LedgerRow], portfolio_balance: f64) -> Option<InvestorSummary> {
        let first = rows.first()?;
        let last = rows.last()?;

        let mut deposit_count = 0;
        let mut withdrawal_count = 0;
        let mut total_deposited = 0.0;
        let mut total_withdrawn = 0.0;
        for row in rows {
            match row.kind {
                EventKind::Deposit => {
                    deposit_count += 1;
                    total_deposited += row.signed_amount;
                }
                EventKind::Withdrawal => {
                    withdrawal_count += 1;
                    total_withdrawn += row.signed_amount.abs();
                }
            }
        }

        let current_balance = last.cumulative_contributed + last.cumulative_interest_accrued;
        let share_of_portfolio = if portfolio_balance > 0.0 {
            current_balance / portfolio_balance
        } else {
            0.0
        };

        Some(InvestorSummary {
            investor_id: last.investor_id.clone(),
            investor_name: last.investor_name.clone(),
            event_count: rows.len(),
            deposit_count,
            withdrawal_count,
            total_deposited,
            total_withdrawn,
            net_contributed: last.cumulative_contributed,
            interest_accrued: last.cumulative_interest_accrued,
            current_balance,
            first_date: first.date,
            last_date: last.date,
            share_of_portfolio,
        })
    }
}
