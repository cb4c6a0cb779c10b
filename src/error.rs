//! Error type shared by every planner entry point

use thiserror::Error;

/// Failures reported by the planning engine
///
/// Structurally invalid numeric inputs and unknown enum values fail fast.
/// Incomplete data (a missing optional profile field, a zero-rate annuity)
/// never produces an error; those cases take a defined default branch.
#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("Invalid amount for {field}: {value} (must be a positive, finite number)")]
    InvalidAmount { field: &'static str, value: f64 },

    #[error("Invalid horizon: {value} (must be a positive whole number of periods)")]
    InvalidHorizon { value: i64 },

    #[error("Invalid rate: {value}% would drive the growth factor to zero or below")]
    InvalidRate { value: f64 },

    #[error("Unknown asset class: {0}")]
    UnknownAssetClass(String),

    #[error("Invalid allocation for {asset_class}: {pct}% (must lie within 0-100)")]
    InvalidAllocation { asset_class: String, pct: f64 },

    #[error("Unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("Rate table error: {0}")]
    RateTable(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result alias used across the crate
pub type PlannerResult<T> = Result<T, PlannerError>;

/// Reject non-positive or non-finite monetary amounts
pub(crate) fn require_positive(field: &'static str, value: f64) -> PlannerResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(PlannerError::InvalidAmount { field, value })
    }
}
