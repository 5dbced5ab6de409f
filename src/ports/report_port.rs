//! Report generation port trait.

use crate::domain::engine::ComputationResult;
use crate::domain::error::AccrualError;
use crate::domain::params::EngineParams;
use std::path::Path;

/// Port for writing computation results.
pub trait ReportPort {
    fn write(
        &self,
        result: &ComputationResult,
        params: &EngineParams,
        output_dir: &Path,
    ) -> Result<(), AccrualError>;
}
