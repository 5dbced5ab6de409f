//! Contribution events: one deposit or withdrawal for one investor on one date.

use crate::domain::error::AccrualError;
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Deposit,
    Withdrawal,
}

impl EventKind {
    pub fn sign(self) -> f64 {
        match self {
            EventKind::Deposit => 1.0,
            EventKind::Withdrawal => -1.0,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Deposit => write!(f, "deposit"),
            EventKind::Withdrawal => write!(f, "withdrawal"),
        }
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deposit" | "contribution" => Ok(EventKind::Deposit),
            "withdrawal" | "withdraw" => Ok(EventKind::Withdrawal),
            other => Err(format!("unknown event kind '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContributionEvent {
    pub id: String,
    pub investor_id: String,
    pub investor_name: String,
    pub date: NaiveDate,
    pub amount: f64,
    pub kind: EventKind,
}

impl ContributionEvent {
    /// Build an event, rejecting amounts that are not strictly positive and finite.
    pub fn new(
        id: impl Into<String>,
        investor_id: impl Into<String>,
        investor_name: impl Into<String>,
        date: NaiveDate,
        amount: f64,
        kind: EventKind,
    ) -> Result<Self, AccrualError> {
        let event = ContributionEvent {
            id: id.into(),
            investor_id: investor_id.into(),
            investor_name: investor_name.into(),
            date,
            amount,
            kind,
        };
        event.validate()?;
        Ok(event)
    }

    pub fn validate(&self) -> Result<(), AccrualError> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(AccrualError::InvalidAmount {
                event_id: self.id.clone(),
                amount: self.amount,
            });
        }
        Ok(())
    }

    /// +amount for deposits, -amount for withdrawals.
    pub fn signed_amount(&self) -> f64 {
        self.kind.sign() * self.amount
    }
}
