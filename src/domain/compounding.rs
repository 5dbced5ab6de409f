//! Daily compounding primitives and rate conversions.

use chrono::NaiveDate;

pub const DAYS_PER_YEAR: f64 = 365.0;

/// Whole calendar days from `start` to `end`, clamped at zero.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days().max(0)
}

/// Growth factor minus one: (1 + r)^days - 1.
///
/// Evaluated as `expm1(days * ln1p(r))`, which keeps precision for the small
/// daily rates this engine works with.
pub fn growth(daily_rate: f64, days: i64) -> f64 {
    if days <= 0 {
        return 0.0;
    }
    (days as f64 * daily_rate.ln_1p()).exp_m1()
}

/// Interest earned by `principal` compounding daily for `days` days.
pub fn compound_interest(principal: f64, daily_rate: f64, days: i64) -> f64 {
    if days <= 0 {
        return 0.0;
    }
    principal * growth(daily_rate, days)
}

/// Daily rate equivalent to an effective annual rate.
pub fn daily_rate_from_annual(annual_rate: f64) -> f64 {
    (annual_rate.ln_1p() / DAYS_PER_YEAR).exp_m1()
}

/// Effective annual rate produced by compounding `daily_rate` for a year.
pub fn annual_rate_from_daily(daily_rate: f64) -> f64 {
    (DAYS_PER_YEAR * daily_rate.ln_1p()).exp_m1()
}
