//! Systematic investment plan (recurring monthly contribution) calculator
//!
//! Contributions are made at the start of each month (annuity-due), so every
//! instalment earns a full month of growth in the month it is paid.

use crate::error::{require_positive, PlannerError, PlannerResult};
use serde::{Deserialize, Serialize};

/// Longest SIP or lump-sum horizon accepted, in years
pub const MAX_HORIZON_YEARS: u32 = 100;

/// Inputs for a SIP calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SipRequest {
    pub monthly_contribution: f64,
    pub annual_return_pct: f64,
    pub years: u32,
}

/// Position at the end of one contribution year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyRow {
    pub year: u32,
    pub invested_cumulative: f64,
    pub value: f64,
    pub returns: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SipResult {
    pub monthly_contribution: f64,
    pub annual_return_pct: f64,
    pub years: u32,
    pub future_value: f64,
    pub total_invested: f64,
    pub total_returns: f64,
    pub roi_pct: f64,
    pub yearly_breakdown: Vec<YearlyRow>,
}

/// Single up-front investment compounded annually
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LumpSumResult {
    pub principal: f64,
    pub future_value: f64,
    pub total_returns: f64,
    pub roi_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Strategy {
    Sip,
    LumpSum,
}

/// SIP against investing the same total up front
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SipComparison {
    pub sip: SipResult,
    pub lump_sum: LumpSumResult,
    pub recommendation: Strategy,
}

impl SipRequest {
    pub fn compute(&self) -> PlannerResult<SipResult> {
        compute_sip(self.monthly_contribution, self.annual_return_pct, self.years)
    }
}

/// Future value of a monthly contribution held for `years`
pub fn compute_sip(
    monthly_contribution: f64,
    annual_return_pct: f64,
    years: u32,
) -> PlannerResult<SipResult> {
    let contribution = require_positive("monthly_contribution", monthly_contribution)?;
    let years = check_years(years)?;
    let monthly_rate = monthly_rate(annual_return_pct)?;

    let yearly_breakdown: Vec<YearlyRow> = (1..=years)
        .map(|year| {
            let months = year * 12;
            let invested_cumulative = contribution * months as f64;
            let value = annuity_due(contribution, monthly_rate, months);
            YearlyRow {
                year,
                invested_cumulative,
                value,
                returns: value - invested_cumulative,
            }
        })
        .collect();

    let total_invested = contribution * (years * 12) as f64;
    let future_value = annuity_due(contribution, monthly_rate, years * 12);
    let total_returns = future_value - total_invested;

    Ok(SipResult {
        monthly_contribution: contribution,
        annual_return_pct,
        years,
        future_value,
        total_invested,
        total_returns,
        roi_pct: total_returns / total_invested * 100.0,
        yearly_breakdown,
    })
}

/// Future value of `principal` compounded annually for `years`
pub fn compare_lump_sum(
    principal: f64,
    annual_return_pct: f64,
    years: u32,
) -> PlannerResult<LumpSumResult> {
    let principal = require_positive("principal", principal)?;
    let years = check_years(years)?;
    if 1.0 + annual_return_pct / 100.0 <= 0.0 {
        return Err(PlannerError::InvalidRate {
            value: annual_return_pct,
        });
    }

    let future_value = principal * (1.0 + annual_return_pct / 100.0).powi(years as i32);
    let total_returns = future_value - principal;
    Ok(LumpSumResult {
        principal,
        future_value,
        total_returns,
        roi_pct: total_returns / principal * 100.0,
    })
}

/// Run a SIP and a lump sum of the same total, and pick the larger outcome
///
/// Lump sum is only recommended when it ends strictly ahead.
pub fn compare_sip_to_lump_sum(
    monthly_contribution: f64,
    annual_return_pct: f64,
    years: u32,
) -> PlannerResult<SipComparison> {
    let sip = compute_sip(monthly_contribution, annual_return_pct, years)?;
    let lump_sum = compare_lump_sum(sip.total_invested, annual_return_pct, years)?;

    let recommendation = if lump_sum.future_value > sip.future_value {
        Strategy::LumpSum
    } else {
        Strategy::Sip
    };

    Ok(SipComparison {
        sip,
        lump_sum,
        recommendation,
    })
}

/// Horizons must be between one year and `MAX_HORIZON_YEARS`
fn check_years(years: u32) -> PlannerResult<u32> {
    if years == 0 || years > MAX_HORIZON_YEARS {
        return Err(PlannerError::InvalidHorizon {
            value: i64::from(years),
        });
    }
    Ok(years)
}

fn monthly_rate(annual_return_pct: f64) -> PlannerResult<f64> {
    let rate = annual_return_pct / 12.0 / 100.0;
    if !rate.is_finite() || 1.0 + rate <= 0.0 {
        return Err(PlannerError::InvalidRate {
            value: annual_return_pct,
        });
    }
    Ok(rate)
}

fn annuity_due(contribution: f64, monthly_rate: f64, months: u32) -> f64 {
    if monthly_rate == 0.0 {
        return contribution * months as f64;
    }
    let growth = (1.0 + monthly_rate).powi(months as i32);
    contribution * ((growth - 1.0) / monthly_rate) * (1.0 + monthly_rate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_zero_rate_is_linear() {
        let result = compute_sip(1000.0, 0.0, 5).unwrap();
        assert_eq!(result.future_value, 60_000.0);
        assert_eq!(result.total_invested, 60_000.0);
        assert_eq!(result.total_returns, 0.0);
        assert_eq!(result.roi_pct, 0.0);
    }

    #[test]
    fn test_total_invested_is_exact() {
        let result = compute_sip(2500.0, 11.0, 7).unwrap();
        assert_eq!(result.total_invested, 2500.0 * 7.0 * 12.0);
    }

    #[test]
    fn test_known_value() {
        // 10,000/month at 12% for 10 years
        let result = compute_sip(10_000.0, 12.0, 10).unwrap();
        let r: f64 = 0.01;
        let expected = 10_000.0 * ((1.01_f64.powi(120) - 1.0) / r) * 1.01;
        assert_relative_eq!(result.future_value, expected, max_relative = 1e-12);
        assert_abs_diff_eq!(result.future_value, 2_323_390.76, epsilon = 1.0);
    }

    #[test]
    fn test_breakdown_shape() {
        let result = compute_sip(5000.0, 9.0, 6).unwrap();
        assert_eq!(result.yearly_breakdown.len(), 6);
        assert!(result
            .yearly_breakdown
            .windows(2)
            .all(|w| w[0].invested_cumulative < w[1].invested_cumulative && w[0].value < w[1].value));

        let last = result.yearly_breakdown.last().unwrap();
        assert_eq!(last.year, 6);
        assert_eq!(last.invested_cumulative, result.total_invested);
        assert_relative_eq!(last.value, result.future_value);
    }

    #[test]
    fn test_negative_rate() {
        let result = compute_sip(1000.0, -6.0, 2).unwrap();
        assert!(result.future_value < result.total_invested);
        assert!(result.future_value > 0.0);

        assert!(matches!(
            compute_sip(1000.0, -1200.0, 2),
            Err(PlannerError::InvalidRate { .. })
        ));
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(matches!(
            compute_sip(0.0, 12.0, 5),
            Err(PlannerError::InvalidAmount { field: "monthly_contribution", .. })
        ));
        assert!(matches!(
            compute_sip(1000.0, 12.0, 0),
            Err(PlannerError::InvalidHorizon { value: 0 })
        ));
        assert!(matches!(
            compare_lump_sum(-1.0, 12.0, 5),
            Err(PlannerError::InvalidAmount { field: "principal", .. })
        ));
    }

    #[test]
    fn test_horizon_upper_bound() {
        let longest = compute_sip(100.0, 8.0, MAX_HORIZON_YEARS).unwrap();
        assert_eq!(longest.yearly_breakdown.len(), MAX_HORIZON_YEARS as usize);
        assert!(longest.future_value.is_finite());

        let lump_sum = compare_lump_sum(1000.0, 10.0, MAX_HORIZON_YEARS).unwrap();
        assert_relative_eq!(lump_sum.future_value, 1000.0 * 1.1_f64.powi(100), max_relative = 1e-12);

        assert!(matches!(
            compare_lump_sum(1000.0, 10.0, 3_000_000_000),
            Err(PlannerError::InvalidHorizon { value: 3_000_000_000 })
        ));
        assert!(matches!(
            compute_sip(1000.0, 12.0, 400_000_000),
            Err(PlannerError::InvalidHorizon { value: 400_000_000 })
        ));
        assert!(matches!(
            compare_sip_to_lump_sum(1000.0, 12.0, MAX_HORIZON_YEARS + 1),
            Err(PlannerError::InvalidHorizon { value: 101 })
        ));
    }

    #[test]
    fn test_lump_sum() {
        let result = compare_lump_sum(100_000.0, 10.0, 3).unwrap();
        assert_abs_diff_eq!(result.future_value, 133_100.0, epsilon = 1e-6);
        assert_abs_diff_eq!(result.roi_pct, 33.1, epsilon = 1e-9);
    }

    #[test]
    fn test_lump_sum_wins_at_positive_rate() {
        let comparison = compare_sip_to_lump_sum(10_000.0, 12.0, 10).unwrap();
        assert_eq!(comparison.lump_sum.principal, comparison.sip.total_invested);
        assert_eq!(comparison.recommendation, Strategy::LumpSum);
    }

    #[test]
    fn test_tie_favours_sip() {
        let comparison = compare_sip_to_lump_sum(1000.0, 0.0, 4).unwrap();
        assert_eq!(comparison.sip.future_value, comparison.lump_sum.future_value);
        assert_eq!(comparison.recommendation, Strategy::Sip);
    }

    #[test]
    fn test_request_and_serialization() {
        let request = SipRequest {
            monthly_contribution: 1000.0,
            annual_return_pct: 0.0,
            years: 1,
        };
        let result = request.compute().unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["yearly_breakdown"][0]["invested_cumulative"], 12_000.0);

        let strategy = serde_json::to_string(&Strategy::LumpSum).unwrap();
        assert_eq!(strategy, "\"LUMP_SUM\"");
    }
}
