//! Configuration validation.
//!
//! Validates the `[engine]` section before any events are loaded.

use crate::domain::error::AccrualError;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Which of the two mutually exclusive rate keys the config uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RateSetting {
    Daily(f64),
    Annual(f64),
}

/// Validate `[engine]`, returning the rate setting it read.
pub fn validate_engine_config(config: &dyn ConfigPort) -> Result<RateSetting, AccrualError> {
    let rate = read_rate(config)?;
    validate_as_of(config)?;
    Ok(rate)
}

/// Read and validate the configured rate.
///
/// Exactly one of `daily_rate` / `annual_rate` must be present, parse as a
/// finite number, and stay above -1.
pub fn read_rate(config: &dyn ConfigPort) -> Result<RateSetting, AccrualError> {
    let daily = non_empty(config.get_string("engine", "daily_rate"));
    let annual = non_empty(config.get_string("engine", "annual_rate"));

    match (daily, annual) {
        (Some(_), Some(_)) => Err(AccrualError::ConfigInvalid {
            section: "engine".to_string(),
            key: "annual_rate".to_string(),
            reason: "set either daily_rate or annual_rate, not both".to_string(),
        }),
        (None, None) => Err(AccrualError::ConfigMissing {
            section: "engine".to_string(),
            key: "daily_rate".to_string(),
        }),
        (Some(s), None) => parse_rate(&s, "daily_rate").map(RateSetting::Daily),
        (None, Some(s)) => parse_rate(&s, "annual_rate").map(RateSetting::Annual),
    }
}

fn parse_rate(value: &str, key: &str) -> Result<f64, AccrualError> {
    let rate: f64 = value.trim().parse().map_err(|_| AccrualError::ConfigInvalid {
        section: "engine".to_string(),
        key: key.to_string(),
        reason: format!("'{}' is not a number", value.trim()),
    })?;
    if !rate.is_finite() {
        return Err(AccrualError::ConfigInvalid {
            section: "engine".to_string(),
            key: key.to_string(),
            reason: format!("{key} must be finite"),
        });
    }
    if rate <= -1.0 {
        return Err(AccrualError::ConfigInvalid {
            section: "engine".to_string(),
            key: key.to_string(),
            reason: format!("{key} must be greater than -1"),
        });
    }
    Ok(rate)
}

fn validate_as_of(config: &dyn ConfigPort) -> Result<(), AccrualError> {
    match non_empty(config.get_string("engine", "as_of")) {
        Some(s) => parse_date(&s, "engine", "as_of").map(|_| ()),
        // may be supplied on the command line instead
        None => Ok(()),
    }
}

pub fn parse_date(value: &str, section: &str, key: &str) -> Result<NaiveDate, AccrualError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| AccrualError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: format!("invalid {key} format, expected YYYY-MM-DD"),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
