//! Lump-sum growth projection with stress bands

use super::result::{ProjectionResult, StressBand, StressScenarios};
use crate::error::{require_positive, PlannerError, PlannerResult};
use crate::rates::{AssetClass, RateTable, ZoneContext};
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Smallest per-period growth factor the projector will compound.
///
/// Rates at or below -100% (annual) would otherwise raise a non-positive base
/// to a fractional power. Such factors are clamped to this value and the
/// result is flagged with `rate_clamped`.
pub const MIN_GROWTH_FACTOR: f64 = 0.01;

/// How optimistic/pessimistic rates are derived from the base rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StressBanding {
    /// rate ± spread, pessimistic floored at `floor_pct`
    Additive { spread_pct: f64, floor_pct: f64 },
    /// rate × factor
    Multiplicative {
        optimistic_factor: f64,
        pessimistic_factor: f64,
    },
}

impl StressBanding {
    /// ±3 points, pessimistic floor of 1%
    pub const fn additive() -> Self {
        StressBanding::Additive {
            spread_pct: 3.0,
            floor_pct: 1.0,
        }
    }

    /// ×1.2 optimistic, ×0.7 pessimistic
    pub const fn multiplicative() -> Self {
        StressBanding::Multiplicative {
            optimistic_factor: 1.2,
            pessimistic_factor: 0.7,
        }
    }

    /// (optimistic, pessimistic) rates for a base rate
    ///
    /// The additive pessimistic rate never exceeds the base rate, so a base
    /// below the floor keeps its own rate as the pessimistic case.
    pub fn rates(&self, base_rate_pct: f64) -> (f64, f64) {
        match *self {
            StressBanding::Additive { spread_pct, floor_pct } => (
                base_rate_pct + spread_pct,
                (base_rate_pct - spread_pct).max(floor_pct).min(base_rate_pct),
            ),
            StressBanding::Multiplicative {
                optimistic_factor,
                pessimistic_factor,
            } => (
                base_rate_pct * optimistic_factor,
                base_rate_pct * pessimistic_factor,
            ),
        }
    }
}

impl Default for StressBanding {
    fn default() -> Self {
        Self::additive()
    }
}

/// Compounding convention for the annual rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compounding {
    /// (1 + r)^(months / 12)
    #[default]
    Annual,
    /// (1 + r / 12)^months
    Monthly,
}

/// Configuration for a projection run
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectionConfig {
    pub stress: StressBanding,
    pub compounding: Compounding,
}

impl ProjectionConfig {
    /// Zone ROI convention: monthly compounding, multiplicative stress bands
    pub fn zone_roi() -> Self {
        Self {
            stress: StressBanding::multiplicative(),
            compounding: Compounding::Monthly,
        }
    }
}

/// Inputs for a single projection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRequest {
    pub amount: f64,
    pub horizon_months: u32,
    pub asset_class: AssetClass,
    #[serde(default)]
    pub zone_context: Option<ZoneContext>,
}

/// Compounded value of `amount` at an annual rate
///
/// Returns the future value and whether the growth factor was clamped.
pub fn compound(
    amount: f64,
    annual_rate_pct: f64,
    horizon_months: u32,
    compounding: Compounding,
) -> (f64, bool) {
    let (factor, periods) = match compounding {
        Compounding::Annual => (1.0 + annual_rate_pct / 100.0, horizon_months as f64 / 12.0),
        Compounding::Monthly => (1.0 + annual_rate_pct / 1200.0, horizon_months as f64),
    };

    let clamped = factor < MIN_GROWTH_FACTOR;
    let factor = factor.max(MIN_GROWTH_FACTOR);
    (amount * factor.powf(periods), clamped)
}

/// Projects lump-sum investments against a shared rate table
#[derive(Debug, Clone)]
pub struct GrowthProjector {
    rates: Arc<RateTable>,
    config: ProjectionConfig,
}

impl GrowthProjector {
    pub fn new(rates: Arc<RateTable>, config: ProjectionConfig) -> Self {
        Self { rates, config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Project `amount` over `horizon_months` in one asset class
    pub fn project(
        &self,
        amount: f64,
        horizon_months: u32,
        asset_class: AssetClass,
        zone: Option<&ZoneContext>,
    ) -> PlannerResult<ProjectionResult> {
        let amount = require_positive("amount", amount)?;
        if horizon_months == 0 {
            return Err(PlannerError::InvalidHorizon { value: 0 });
        }

        let profile = self.rates.lookup(asset_class)?;
        let base_rate = self.rates.resolve_rate(asset_class, zone)?;

        let (future_value, base_clamped) = self.grow(amount, base_rate, horizon_months);
        let total_returns = future_value - amount;

        let (optimistic_rate, pessimistic_rate) = self.config.stress.rates(base_rate);
        let (optimistic, optimistic_clamped) = self.band(amount, optimistic_rate, horizon_months);
        let (pessimistic, pessimistic_clamped) = self.band(amount, pessimistic_rate, horizon_months);

        let rate_clamped = base_clamped || optimistic_clamped || pessimistic_clamped;
        if rate_clamped {
            debug!(
                "Growth factor clamped to {} for {} at {:.2}% over {} months",
                MIN_GROWTH_FACTOR, asset_class, base_rate, horizon_months
            );
        }

        Ok(ProjectionResult {
            asset_class,
            amount,
            horizon_months,
            risk_tier: profile.risk_tier,
            liquidity_tier: profile.liquidity_tier,
            base_rate_pct: base_rate,
            future_value,
            total_returns,
            roi_percentage: roi(amount, future_value),
            rate_clamped,
            stress: StressScenarios { optimistic, pessimistic },
        })
    }

    /// Project a request record
    pub fn project_request(&self, request: &ProjectionRequest) -> PlannerResult<ProjectionResult> {
        self.project(
            request.amount,
            request.horizon_months,
            request.asset_class,
            request.zone_context.as_ref(),
        )
    }

    /// Project the same amount across several classes, best ROI first
    ///
    /// Real estate is only meaningful with a zone and is skipped without one.
    pub fn compare(
        &self,
        amount: f64,
        horizon_months: u32,
        zone: Option<&ZoneContext>,
        classes: &[AssetClass],
    ) -> PlannerResult<Vec<ProjectionResult>> {
        let candidates: Vec<AssetClass> = classes
            .iter()
            .copied()
            .filter(|class| *class != AssetClass::RealEstate || zone.is_some())
            .collect();
        debug!("Comparing {} asset classes over {} months", candidates.len(), horizon_months);

        let mut results = candidates
            .par_iter()
            .map(|class| self.project(amount, horizon_months, *class, zone))
            .collect::<PlannerResult<Vec<_>>>()?;

        results.sort_by(|a, b| b.roi_percentage.total_cmp(&a.roi_percentage));
        Ok(results)
    }

    fn grow(&self, amount: f64, rate_pct: f64, horizon_months: u32) -> (f64, bool) {
        compound(amount, rate_pct, horizon_months, self.config.compounding)
    }

    fn band(&self, amount: f64, rate_pct: f64, horizon_months: u32) -> (StressBand, bool) {
        let (future_value, clamped) = self.grow(amount, rate_pct, horizon_months);
        let band = StressBand {
            rate_pct,
            future_value,
            roi_pct: roi(amount, future_value),
        };
        (band, clamped)
    }
}

/// Classes compared by default: the six core planning options
pub fn default_comparison_set() -> [AssetClass; 6] {
    [
        AssetClass::RealEstate,
        AssetClass::Sip,
        AssetClass::Stocks,
        AssetClass::FixedDeposit,
        AssetClass::Gold,
        AssetClass::Ppf,
    ]
}

fn roi(principal: f64, future_value: f64) -> f64 {
    (future_value - principal) / principal * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::{Confidence, Outlook, RateProfile, Tier};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn projector() -> GrowthProjector {
        GrowthProjector::new(Arc::new(RateTable::default_table()), ProjectionConfig::default())
    }

    #[test]
    fn test_real_estate_high_zone_example() {
        let zone = ZoneContext::new(Outlook::High, Confidence::High);
        let result = projector()
            .project(1_000_000.0, 60, AssetClass::RealEstate, Some(&zone))
            .unwrap();

        assert_relative_eq!(result.base_rate_pct, 14.0);
        assert_abs_diff_eq!(result.future_value, 1_925_414.58, epsilon = 0.01);
        assert_abs_diff_eq!(result.total_returns, 925_414.58, epsilon = 0.01);
        assert_abs_diff_eq!(result.roi_percentage, 92.541458, epsilon = 1e-5);
        assert!(!result.rate_clamped);
    }

    #[test]
    fn test_additive_stress_bands() {
        let result = projector().project(100_000.0, 24, AssetClass::Stocks, None).unwrap();

        assert_eq!(result.stress.optimistic.rate_pct, 18.0);
        assert_eq!(result.stress.pessimistic.rate_pct, 12.0);
        assert_abs_diff_eq!(result.stress.optimistic.future_value, 100_000.0 * 1.18_f64.powi(2), epsilon = 1e-6);
        assert_abs_diff_eq!(result.stress.pessimistic.future_value, 100_000.0 * 1.12_f64.powi(2), epsilon = 1e-6);
        assert!(result.is_bracketed());
    }

    #[test]
    fn test_pessimistic_floor() {
        let (optimistic, pessimistic) = StressBanding::additive().rates(2.5);
        assert_eq!(optimistic, 5.5);
        assert_eq!(pessimistic, 1.0);
    }

    #[test]
    fn test_pessimistic_floor_never_exceeds_low_base_rate() {
        let (optimistic, pessimistic) = StressBanding::additive().rates(0.5);
        assert_eq!(optimistic, 3.5);
        assert_eq!(pessimistic, 0.5);

        let mut profiles: Vec<RateProfile> = RateTable::default_table().iter().cloned().collect();
        for profile in profiles.iter_mut() {
            if profile.asset_class == AssetClass::Gold {
                profile.base_annual_rate_pct = 0.5;
            }
        }
        let table = RateTable::from_profiles(profiles).unwrap();
        let projector = GrowthProjector::new(Arc::new(table), ProjectionConfig::default());

        let result = projector.project(1_000.0, 60, AssetClass::Gold, None).unwrap();
        assert_eq!(result.stress.pessimistic.rate_pct, 0.5);
        assert_abs_diff_eq!(result.stress.pessimistic.future_value, result.future_value, epsilon = 1e-9);
        assert!(result.is_bracketed());
        assert!(result.stress.optimistic.future_value > result.future_value);
    }

    #[test]
    fn test_default_config() {
        let config = ProjectionConfig::default();
        assert_eq!(config.compounding, Compounding::Annual);
        assert_eq!(config.stress, StressBanding::additive());

        let parsed: ProjectionConfig = serde_json::from_str(
            r#"{"stress": {"kind": "additive", "spread_pct": 3.0, "floor_pct": 1.0}, "compounding": "monthly"}"#,
        )
        .unwrap();
        assert_eq!(parsed.compounding, Compounding::Monthly);
    }

    #[test]
    fn test_multiplicative_stress_bands() {
        let config = ProjectionConfig {
            stress: StressBanding::multiplicative(),
            ..Default::default()
        };
        let projector = GrowthProjector::new(Arc::new(RateTable::default_table()), config);
        let result = projector.project(50_000.0, 36, AssetClass::Sip, None).unwrap();

        assert_relative_eq!(result.stress.optimistic.rate_pct, 14.4);
        assert_relative_eq!(result.stress.pessimistic.rate_pct, 8.4);
        assert!(result.is_bracketed());
    }

    #[test]
    fn test_stress_ordering_holds_for_every_class() {
        for config in [ProjectionConfig::default(), ProjectionConfig::zone_roi()] {
            let projector = GrowthProjector::new(Arc::new(RateTable::default_table()), config);
            for class in AssetClass::ALL {
                for months in [1, 6, 12, 37, 120] {
                    let result = projector.project(10_000.0, months, class, None).unwrap();
                    assert!(result.is_bracketed(), "{} over {} months", class, months);
                }
            }
        }
    }

    #[test]
    fn test_monotonic_in_amount() {
        let projector = projector();
        let mut previous = 0.0;
        for amount in [1.0, 10.0, 1_000.0, 25_000.0, 1_000_000.0] {
            let fv = projector.project(amount, 18, AssetClass::Gold, None).unwrap().future_value;
            assert!(fv > previous);
            previous = fv;
        }
    }

    #[test]
    fn test_fractional_years() {
        let result = projector().project(1_000.0, 18, AssetClass::FixedDeposit, None).unwrap();
        assert_abs_diff_eq!(result.future_value, 1_000.0 * 1.065_f64.powf(1.5), epsilon = 1e-9);
    }

    #[test]
    fn test_monthly_compounding() {
        let projector = GrowthProjector::new(Arc::new(RateTable::default_table()), ProjectionConfig::zone_roi());
        let result = projector.project(1_000.0, 12, AssetClass::Stocks, None).unwrap();
        assert_abs_diff_eq!(result.future_value, 1_000.0 * (1.0 + 0.15 / 12.0_f64).powi(12), epsilon = 1e-9);
    }

    #[test]
    fn test_invalid_inputs() {
        let projector = projector();
        assert!(matches!(
            projector.project(0.0, 12, AssetClass::Gold, None),
            Err(PlannerError::InvalidAmount { .. })
        ));
        assert!(matches!(
            projector.project(-100.0, 12, AssetClass::Gold, None),
            Err(PlannerError::InvalidAmount { .. })
        ));
        assert!(matches!(
            projector.project(100.0, 0, AssetClass::Gold, None),
            Err(PlannerError::InvalidHorizon { value: 0 })
        ));
    }

    #[test]
    fn test_negative_rate_declines_and_extreme_rate_clamps() {
        let mut profiles: Vec<RateProfile> = RateTable::default_table().iter().cloned().collect();
        for profile in profiles.iter_mut() {
            if profile.asset_class == AssetClass::Gold {
                profile.base_annual_rate_pct = -5.0;
            }
            if profile.asset_class == AssetClass::Bonds {
                profile.base_annual_rate_pct = -150.0;
            }
        }
        let table = RateTable::from_profiles(profiles).unwrap();
        let projector = GrowthProjector::new(Arc::new(table), ProjectionConfig::default());

        let declining = projector.project(1_000.0, 24, AssetClass::Gold, None).unwrap();
        assert!(declining.future_value < 1_000.0);
        assert!(!declining.rate_clamped);
        assert_eq!(declining.stress.pessimistic.rate_pct, -5.0);
        assert!(declining.is_bracketed());

        let clamped = projector.project(1_000.0, 24, AssetClass::Bonds, None).unwrap();
        assert!(clamped.rate_clamped);
        assert!(clamped.future_value.is_finite());
        assert_abs_diff_eq!(clamped.future_value, 1_000.0 * MIN_GROWTH_FACTOR.powi(2), epsilon = 1e-9);
        assert_eq!(clamped.risk_tier, Tier::Low);
    }

    #[test]
    fn test_compare_sorted_and_skips_real_estate_without_zone() {
        let projector = projector();
        let results = projector.compare(100_000.0, 60, None, &default_comparison_set()).unwrap();

        assert_eq!(results.len(), 5);
        assert!(results.iter().all(|r| r.asset_class != AssetClass::RealEstate));
        assert_eq!(results[0].asset_class, AssetClass::Stocks);
        assert!(results.windows(2).all(|w| w[0].roi_percentage >= w[1].roi_percentage));

        let zone = ZoneContext::new(Outlook::High, Confidence::High);
        let with_zone = projector.compare(100_000.0, 60, Some(&zone), &default_comparison_set()).unwrap();
        assert_eq!(with_zone.len(), 6);
        assert_eq!(with_zone[0].asset_class, AssetClass::Stocks);
        assert_eq!(with_zone[1].asset_class, AssetClass::RealEstate);
    }

    #[test]
    fn test_project_request() {
        let request: ProjectionRequest = serde_json::from_str(
            r#"{"amount": 5000, "horizon_months": 12, "asset_class": "ppf"}"#,
        )
        .unwrap();
        let result = projector().project_request(&request).unwrap();
        assert_abs_diff_eq!(result.future_value, 5_000.0 * 1.071, epsilon = 1e-9);
    }
}
