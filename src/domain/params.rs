//! Engine parameters for one computation pass.

use crate::domain::compounding::{annual_rate_from_daily, daily_rate_from_annual};
use crate::domain::error::AccrualError;
use chrono::NaiveDate;

/// Validated `(daily_rate, as_of)` pair.
///
/// `as_of` is the evaluation date for each investor's open holding period; it
/// is always supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineParams {
    daily_rate: f64,
    as_of: NaiveDate,
}

impl EngineParams {
    pub fn new(daily_rate: f64, as_of: NaiveDate) -> Result<Self, AccrualError> {
        // rates at or below -100% per day make the growth factor undefined
        if !daily_rate.is_finite() || daily_rate <= -1.0 {
            return Err(AccrualError::InvalidRate {
                kind: "daily",
                value: daily_rate,
            });
        }
        Ok(Self { daily_rate, as_of })
    }

    pub fn from_annual_rate(annual_rate: f64, as_of: NaiveDate) -> Result<Self, AccrualError> {
        if !annual_rate.is_finite() || annual_rate <= -1.0 {
            return Err(AccrualError::InvalidRate {
                kind: "annual",
                value: annual_rate,
            });
        }
        Self::new(daily_rate_from_annual(annual_rate), as_of)
    }

    pub fn daily_rate(&self) -> f64 {
        self.daily_rate
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    pub fn effective_annual_rate(&self) -> f64 {
        annual_rate_from_daily(self.daily_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    #[test]
    fn accepts_typical_rate() {
        let params = EngineParams::new(0.0003945, as_of()).unwrap();
        assert_eq!(params.daily_rate(), 0.0003945);
        assert_eq!(params.as_of(), as_of());
    }

    #[test]
    fn accepts_zero_and_negative_rates() {
        assert!(EngineParams::new(0.0, as_of()).is_ok());
        assert!(EngineParams::new(-0.0001, as_of()).is_ok());
    }

    #[test]
    fn rejects_non_finite_rates() {
        for rate in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = EngineParams::new(rate, as_of()).unwrap_err();
            assert!(matches!(err, AccrualError::InvalidRate { .. }));
        }
    }

    #[test]
    fn rejects_rate_at_or_below_minus_one() {
        assert!(EngineParams::new(-1.0, as_of()).is_err());
        assert!(EngineParams::new(-2.5, as_of()).is_err());
    }

    #[test]
    fn from_annual_rate_converts() {
        let params = EngineParams::from_annual_rate(0.154, as_of()).unwrap();
        assert!((params.effective_annual_rate() - 0.154).abs() < 1e-12);
        assert!(params.daily_rate() > 0.0003 && params.daily_rate() < 0.0005);
    }

    #[test]
    fn rate_errors_name_their_kind() {
        let err = EngineParams::from_annual_rate(-1.0, as_of()).unwrap_err();
        assert!(matches!(err, AccrualError::InvalidRate { kind: "annual", .. }));
        let err = EngineParams::new(-1.0, as_of()).unwrap_err();
        assert!(matches!(err, AccrualError::InvalidRate { kind: "daily", .. }));
    }

    #[test]
    fn from_annual_rate_rejects_nan() {
        assert!(EngineParams::from_annual_rate(f64::NAN, as_of()).is_err());
    }
}
