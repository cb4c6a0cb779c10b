//! Output structures for growth projections

use crate::rates::{AssetClass, Tier};
use serde::{Deserialize, Serialize};

/// Future value of one rate scenario
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressBand {
    pub rate_pct: f64,
    pub future_value: f64,
    pub roi_pct: f64,
}

/// Optimistic and pessimistic scenarios bracketing the base case
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressScenarios {
    pub optimistic: StressBand,
    pub pessimistic: StressBand,
}

/// Result of projecting a single lump-sum investment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub asset_class: AssetClass,
    pub amount: f64,
    pub horizon_months: u32,
    pub risk_tier: Tier,
    pub liquidity_tier: Tier,

    /// Annual rate after any zone adjustment, in percent
    pub base_rate_pct: f64,

    pub future_value: f64,
    pub total_returns: f64,
    pub roi_percentage: f64,

    /// True when a scenario's growth factor hit the minimum-growth clamp
    pub rate_clamped: bool,

    pub stress: StressScenarios,
}

impl ProjectionResult {
    /// Width of the stress range in currency
    pub fn stress_spread(&self) -> f64 {
        self.stress.optimistic.future_value - self.stress.pessimistic.future_value
    }

    /// Whether the base case lies inside its stress range
    pub fn is_bracketed(&self) -> bool {
        self.stress.pessimistic.future_value <= self.future_value
            && self.future_value <= self.stress.optimistic.future_value
    }
}
