//! Projection engine for lump-sum and recurring investments

mod growth;
mod result;
mod sip;

pub use growth::{
    compound, default_comparison_set, Compounding, GrowthProjector, ProjectionConfig,
    ProjectionRequest, StressBanding, MIN_GROWTH_FACTOR,
};
pub use result::{ProjectionResult, StressBand, StressScenarios};
pub use sip::{
    compare_lump_sum, compare_sip_to_lump_sum, compute_sip, LumpSumResult, SipComparison,
    SipRequest, SipResult, Strategy, YearlyRow, MAX_HORIZON_YEARS,
};
