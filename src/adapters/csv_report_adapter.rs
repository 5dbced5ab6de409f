//! CSV report adapter implementing ReportPort.
//!
//! Writes `ledger.csv`, `series.csv`, `investors.csv` and `summary.csv` into the
//! output directory. Monetary values are rounded for presentation only; the
//! computation result itself is never modified.

use crate::domain::engine::ComputationResult;
use crate::domain::error::AccrualError;
use crate::domain::params::EngineParams;
use crate::ports::config_port::ConfigPort;
use crate::ports::report_port::ReportPort;
use serde::Serialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_DECIMALS: u32 = 2;

pub struct CsvReportAdapter {
    decimals: u32,
    include_ledger: bool,
}

#[derive(Serialize)]
struct LedgerRecord<'a> {
    id: &'a str,
    investor_id: &'a str,
    investor_name: &'a str,
    date: String,
    kind: String,
    opening_balance: f64,
    signed_amount: f64,
    balance_after_event: f64,
    cumulative_contributed: f64,
    period_days: i64,
    period_interest: f64,
    cumulative_interest_accrued: f64,
    closing_balance: f64,
}

#[derive(Serialize)]
struct SeriesRecord {
    date: String,
    cumulative_contributed: f64,
    cumulative_interest: f64,
    total_balance: f64,
}

#[derive(Serialize)]
struct InvestorRecord<'a> {
    investor_id: &'a str,
    investor_name: &'a str,
    events: usize,
    deposits: usize,
    withdrawals: usize,
    total_deposited: f64,
    total_withdrawn: f64,
    net_contributed: f64,
    interest_accrued: f64,
    current_balance: f64,
    first_date: String,
    last_date: String,
    share_pct: f64,
}

#[derive(Serialize)]
struct SummaryRecord {
    metric: &'static str,
    value: String,
}

impl Default for CsvReportAdapter {
    fn default() -> Self {
        Self::new(DEFAULT_DECIMALS, true)
    }
}

impl CsvReportAdapter {
    pub fn new(decimals: u32, include_ledger: bool) -> Self {
        Self {
            decimals,
            include_ledger,
        }
    }

    /// Reads `[report] decimals` and `[report] include_ledger`.
    pub fn from_config(config: &dyn ConfigPort) -> Self {
        let decimals = config
            .get_int("report", "decimals", DEFAULT_DECIMALS as i64)
            .clamp(0, 10) as u32;
        let include_ledger = config.get_bool("report", "include_ledger", true);
        Self::new(decimals, include_ledger)
    }

    fn round(&self, value: f64) -> f64 {
        let factor = 10f64.powi(self.decimals as i32);
        (value * factor).round() / factor
    }

    fn write_ledger(&self, result: &ComputationResult, path: &Path) -> Result<(), AccrualError> {
        let mut wtr = open_writer(path)?;
        for row in result.rows() {
            let record = LedgerRecord {
                id: &row.id,
                investor_id: &row.investor_id,
                investor_name: &row.investor_name,
                date: row.date.to_string(),
                kind: row.kind.to_string(),
                opening_balance: self.round(row.opening_balance),
                signed_amount: self.round(row.signed_amount),
                balance_after_event: self.round(row.balance_after_event),
                cumulative_contributed: self.round(row.cumulative_contributed),
                period_days: row.period_days,
                period_interest: self.round(row.period_interest),
                cumulative_interest_accrued: self.round(row.cumulative_interest_accrued),
                closing_balance: self.round(row.closing_balance),
            };
            wtr.serialize(record).map_err(report_err)?;
        }
        wtr.flush()?;
        Ok(())
    }

    fn write_series(&self, result: &ComputationResult, path: &Path) -> Result<(), AccrualError> {
        let mut wtr = open_writer(path)?;
        for point in &result.series {
            wtr.serialize(SeriesRecord {
                date: point.date.to_string(),
                cumulative_contributed: self.round(point.cumulative_contributed),
                cumulative_interest: self.round(point.cumulative_interest),
                total_balance: self.round(point.total_balance),
            })
            .map_err(report_err)?;
        }
        wtr.flush()?;
        Ok(())
    }

    fn write_investors(&self, result: &ComputationResult, path: &Path) -> Result<(), AccrualError> {
        let mut wtr = open_writer(path)?;
        for s in &result.investors {
            wtr.serialize(InvestorRecord {
                investor_id: &s.investor_id,
                investor_name: &s.investor_name,
                events: s.event_count,
                deposits: s.deposit_count,
                withdrawals: s.withdrawal_count,
                total_deposited: self.round(s.total_deposited),
                total_withdrawn: self.round(s.total_withdrawn),
                net_contributed: self.round(s.net_contributed),
                interest_accrued: self.round(s.interest_accrued),
                current_balance: self.round(s.current_balance),
                first_date: s.first_date.to_string(),
                last_date: s.last_date.to_string(),
                share_pct: self.round(s.share_of_portfolio * 100.0),
            })
            .map_err(report_err)?;
        }
        wtr.flush()?;
        Ok(())
    }

    fn write_summary(
        &self,
        result: &ComputationResult,
        params: &EngineParams,
        path: &Path,
    ) -> Result<(), AccrualError> {
        let stats = &result.stats;
        let rows = [
            ("as_of", params.as_of().to_string()),
            ("daily_rate", params.daily_rate().to_string()),
            (
                "effective_annual_rate_pct",
                format!("{:.4}", params.effective_annual_rate() * 100.0),
            ),
            ("investor_count", stats.investor_count.to_string()),
            ("net_contributed", self.format(stats.net_contributed)),
            ("total_interest_accrued", self.format(stats.total_interest_accrued)),
            ("total_balance", self.format(stats.total_balance)),
            ("return_percentage", format!("{:.4}", stats.return_percentage)),
            ("average_per_investor", self.format(stats.average_per_investor)),
        ];

        let mut wtr = open_writer(path)?;
        for (metric, value) in rows {
            wtr.serialize(SummaryRecord { metric, value })
                .map_err(report_err)?;
        }
        wtr.flush()?;
        Ok(())
    }

    fn format(&self, value: f64) -> String {
        format!("{:.*}", self.decimals as usize, value)
    }
}

impl ReportPort for CsvReportAdapter {
    fn write(
        &self,
        result: &ComputationResult,
        params: &EngineParams,
        output_dir: &Path,
    ) -> Result<(), AccrualError> {
        fs::create_dir_all(output_dir).map_err(|e| AccrualError::Report {
            reason: format!("failed to create {}: {}", output_dir.display(), e),
        })?;

        if self.include_ledger {
            self.write_ledger(result, &output_dir.join("ledger.csv"))?;
        }
        self.write_series(result, &output_dir.join("series.csv"))?;
        self.write_investors(result, &output_dir.join("investors.csv"))?;
        self.write_summary(result, params, &output_dir.join("summary.csv"))?;

        tracing::info!(
            dir = %output_dir.display(),
            rows = result.row_count(),
            points = result.series.len(),
            "reports written"
        );
        Ok(())
    }
}

fn open_writer(path: &Path) -> Result<csv::Writer<fs::File>, AccrualError> {
    csv::Writer::from_path(path).map_err(|e| AccrualError::Report {
        reason: format!("failed to open {}: {}", path.display(), e),
    })
}

fn report_err(e: csv::Error) -> AccrualError {
    AccrualError::Report {
        reason: e.to_string(),
    }
}
