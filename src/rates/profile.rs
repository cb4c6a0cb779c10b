//! Per-class rate profiles and the built-in default table

use super::asset_class::{AssetClass, Tier};
use serde::{Deserialize, Serialize};

/// Return, risk and liquidity characteristics of one asset class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateProfile {
    pub asset_class: AssetClass,

    /// Nominal annual return, in percent (12.0 = 12%)
    pub base_annual_rate_pct: f64,

    pub risk_tier: Tier,

    pub liquidity_tier: Tier,

    /// Contribution of this class to a portfolio risk score, in [0, 1]
    pub risk_weight: f64,
}

impl RateProfile {
    pub fn new(
        asset_class: AssetClass,
        base_annual_rate_pct: f64,
        risk_tier: Tier,
        liquidity_tier: Tier,
        risk_weight: f64,
    ) -> Self {
        Self {
            asset_class,
            base_annual_rate_pct,
            risk_tier,
            liquidity_tier,
            risk_weight,
        }
    }
}

/// Built-in profiles, one per asset class
pub(crate) fn default_profiles() -> Vec<RateProfile> {
    use AssetClass::*;
    use Tier::*;

    vec![
        RateProfile::new(RealEstate, 12.0, Medium, Low, 0.6),
        RateProfile::new(Sip, 12.0, Medium, Medium, 0.5),
        RateProfile::new(Stocks, 15.0, High, High, 0.8),
        RateProfile::new(FixedDeposit, 6.5, Low, Low, 0.1),
        RateProfile::new(Gold, 8.0, Low, High, 0.3),
        RateProfile::new(Ppf, 7.1, Low, Low, 0.1),
        RateProfile::new(DebtFunds, 7.5, Low, Medium, 0.2),
        RateProfile::new(IndexFunds, 11.0, Medium, High, 0.6),
        RateProfile::new(FlexiCap, 13.0, High, High, 0.7),
        RateProfile::new(Reits, 9.0, Medium, Medium, 0.5),
        RateProfile::new(GoldEtf, 8.0, Low, High, 0.3),
        RateProfile::new(Bonds, 7.0, Low, Medium, 0.15),
    ]
}
