//! CSV file event adapter.
//!
//! Expected header: `id,investor_id,investor_name,date,kind,amount`. Columns may
//! appear in any order; surrounding whitespace is ignored. Dates are
//! `YYYY-MM-DD`, kinds are `deposit` or `withdrawal`.

use crate::domain::config_validation::DATE_FORMAT;
use crate::domain::error::AccrualError;
use crate::domain::event::{ContributionEvent, EventKind};
use crate::ports::event_port::EventPort;
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::io::Read;
use std::path::PathBuf;

pub struct CsvEventAdapter {
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct EventRecord {
    id: String,
    investor_id: String,
    investor_name: String,
    date: String,
    kind: String,
    amount: String,
}

impl CsvEventAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl EventPort for CsvEventAdapter {
    fn fetch_events(&self) -> Result<Vec<ContributionEvent>, AccrualError> {
        let file = fs::File::open(&self.path).map_err(|e| AccrualError::EventSource {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;
        let events = parse_events(file)?;
        tracing::debug!(path = %self.path.display(), events = events.len(), "events loaded");
        Ok(events)
    }
}

/// Parse events from CSV. Any malformed record rejects the whole input.
pub fn parse_events<R: Read>(reader: R) -> Result<Vec<ContributionEvent>, AccrualError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut events = Vec::new();

    for (line, result) in rdr.deserialize::<EventRecord>().enumerate() {
        let record = result.map_err(|e| AccrualError::EventSource {
            reason: format!("CSV parse error at record {}: {}", line + 1, e),
        })?;
        events.push(to_event(record)?);
    }
    Ok(events)
}

fn to_event(record: EventRecord) -> Result<ContributionEvent, AccrualError> {
    if record.id.is_empty() || record.investor_id.is_empty() {
        return Err(AccrualError::EventSource {
            reason: format!(
                "record with id '{}' is missing an id or investor_id",
                record.id
            ),
        });
    }

    let date = NaiveDate::parse_from_str(&record.date, DATE_FORMAT).map_err(|_| {
        AccrualError::InvalidDate {
            event_id: record.id.clone(),
            value: record.date.clone(),
        }
    })?;

    let kind: EventKind = record.kind.parse().map_err(|_| AccrualError::InvalidKind {
        event_id: record.id.clone(),
        value: record.kind.clone(),
    })?;

    let amount: f64 = record
        .amount
        .parse()
        .map_err(|_| AccrualError::MalformedAmount {
            event_id: record.id.clone(),
            value: record.amount.clone(),
        })?;

    ContributionEvent::new(
        record.id,
        record.investor_id,
        record.investor_name,
        date,
        amount,
        kind,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HEADER: &str = "id,investor_id,investor_name,date,kind,amount\n";

    fn setup_test_data(body: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.csv");
        fs::write(&path, format!("{HEADER}{body}")).unwrap();
        (dir, path)
    }

    #[test]
    fn fetch_events_returns_correct_data() {
        let (_dir, path) = setup_test_data(
            "e1,inv-1,Alice,2024-01-15,deposit,1000.00\n\
             e2,inv-2,Bob,2024-01-16,Deposit,250.5\n\
             e3,inv-1,Alice,2024-02-01,withdrawal,100\n",
        );
        let events = CsvEventAdapter::new(path).fetch_events().unwrap();

        assert_eq!(events.len(), 3);
        assert_eq!(events[0].id, "e1");
        assert_eq!(events[0].investor_id, "inv-1");
        assert_eq!(events[0].investor_name, "Alice");
        assert_eq!(events[0].date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        assert_eq!(events[0].kind, EventKind::Deposit);
        assert_eq!(events[0].amount, 1000.0);
        assert_eq!(events[1].amount, 250.5);
        assert_eq!(events[2].kind, EventKind::Withdrawal);
    }

    #[test]
    fn preserves_file_order() {
        let (_dir, path) = setup_test_data(
            "b,inv-1,Alice,2024-03-01,deposit,1\n\
             a,inv-1,Alice,2024-01-01,deposit,1\n",
        );
        let events = CsvEventAdapter::new(path).fetch_events().unwrap();
        let ids: Vec<_> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn columns_in_any_order_and_trimmed() {
        let csv = "amount , kind, date, investor_name, investor_id, id\n\
                   75 , withdrawal , 2024-05-05 , Carol , inv-3 , x9\n";
        let events = parse_events(csv.as_bytes()).unwrap();
        assert_eq!(events[0].id, "x9");
        assert_eq!(events[0].amount, 75.0);
        assert_eq!(events[0].kind, EventKind::Withdrawal);
    }

    #[test]
    fn header_only_is_empty() {
        let events = parse_events(HEADER.as_bytes()).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn invalid_date_rejected() {
        let csv = format!("{HEADER}e1,inv-1,Alice,15/01/2024,deposit,10\n");
        let err = parse_events(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, AccrualError::InvalidDate { event_id, value }
            if event_id == "e1" && value == "15/01/2024"));
    }

    #[test]
    fn invalid_kind_rejected() {
        let csv = format!("{HEADER}e1,inv-1,Alice,2024-01-15,transfer,10\n");
        let err = parse_events(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, AccrualError::InvalidKind { value, .. } if value == "transfer"));
    }

    #[test]
    fn non_positive_amount_rejected() {
        let csv = format!("{HEADER}e1,inv-1,Alice,2024-01-15,deposit,0\n");
        let err = parse_events(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, AccrualError::InvalidAmount { .. }));

        let csv = format!("{HEADER}e1,inv-1,Alice,2024-01-15,deposit,-20\n");
        assert!(parse_events(csv.as_bytes()).is_err());
    }

    #[test]
    fn non_numeric_amount_rejected() {
        let csv = format!("{HEADER}e1,inv-1,Alice,2024-01-15,deposit,lots\n");
        let err = parse_events(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, AccrualError::MalformedAmount { ref value, .. } if value == "lots"));
        assert!(err.is_invalid_input());
    }

    #[test]
    fn missing_column_rejected() {
        let csv = "id,investor_id,date,kind,amount\ne1,inv-1,2024-01-15,deposit,10\n";
        let err = parse_events(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, AccrualError::EventSource { .. }));
    }

    #[test]
    fn missing_investor_id_rejected() {
        let csv = format!("{HEADER}e1,,Alice,2024-01-15,deposit,10\n");
        assert!(matches!(
            parse_events(csv.as_bytes()),
            Err(AccrualError::EventSource { .. })
        ));
    }

    #[test]
    fn missing_file_is_event_source_error() {
        let adapter = CsvEventAdapter::new(PathBuf::from("/nonexistent/events.csv"));
        assert!(matches!(
            adapter.fetch_events(),
            Err(AccrualError::EventSource { .. })
        ));
    }
}
