//! Core domain types and logic.

pub mod event;
pub mod grouping;
pub mod compounding;
pub mod params;
pub mod ledger;
pub mod timeseries;
pub mod stats;
pub mod engine;
pub mod config_validation;
pub mod error;
