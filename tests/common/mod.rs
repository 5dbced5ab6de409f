#![allow(dead_code)]

use accrual::domain::error::AccrualError;
pub use accrual::domain::event::{ContributionEvent, EventKind};
use accrual::domain::params::EngineParams;
use accrual::ports::event_port::EventPort;
use chrono::NaiveDate;

pub struct MockEventPort {
    pub events: Vec<ContributionEvent>,
    pub error: Option<String>,
}

impl MockEventPort {
    pub fn new() -> Self {
        Self {
            events: Vec::new(),
            error: None,
        }
    }

    pub fn with_events(mut self, events: Vec<ContributionEvent>) -> Self {
        self.events.extend(events);
        self
    }

    pub fn with_error(mut self, reason: &str) -> Self {
        self.error = Some(reason.to_string());
        self
    }
}

impl EventPort for MockEventPort {
    fn fetch_events(&self) -> Result<Vec<ContributionEvent>, AccrualError> {
        if let Some(reason) = &self.error {
            return Err(AccrualError::EventSource {
                reason: reason.clone(),
            });
        }
        Ok(self.events.clone())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Day `n` counted from 2024-01-01.
pub fn day(n: i64) -> NaiveDate {
    date(2024, 1, 1) + chrono::Duration::days(n)
}

pub fn deposit(id: &str, investor: &str, on: i64, amount: f64) -> ContributionEvent {
    make_event(id, investor, on, amount, EventKind::Deposit)
}

pub fn withdrawal(id: &str, investor: &str, on: i64, amount: f64) -> ContributionEvent {
    make_event(id, investor, on, amount, EventKind::Withdrawal)
}

pub fn make_event(
    id: &str,
    investor: &str,
    on: i64,
    amount: f64,
    kind: EventKind,
) -> ContributionEvent {
    ContributionEvent::new(id, investor, format!("Investor {investor}"), day(on), amount, kind)
        .unwrap()
}

pub fn params(daily_rate: f64, as_of: i64) -> EngineParams {
    EngineParams::new(daily_rate, day(as_of)).unwrap()
}

pub const EVENTS_HEADER: &str = "id,investor_id,investor_name,date,kind,amount\n";
