//! Risk assessment of a single prospective investment

use super::profile::RiskProfile;
use super::scorer::RiskTiering;
use crate::error::{require_positive, PlannerError, PlannerResult};
use crate::rates::{AssetClass, Confidence, Outlook, Tier, ZoneContext};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Amount above which concentration risk is added
pub const LARGE_INVESTMENT_THRESHOLD: f64 = 5_000_000.0;

/// Real-estate amount above which REITs are suggested
pub const REIT_SUGGESTION_THRESHOLD: f64 = 2_000_000.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentAssessment {
    pub risk_score: u32,
    pub risk_tier: Tier,
    pub description: String,
    pub risk_factors: Vec<String>,
    pub mitigation_strategies: Vec<String>,
    pub assessed_at: DateTime<Utc>,
}

/// Score the risk of putting `amount` into one asset class
///
/// Points accumulate per factor and are capped at 100.
pub fn assess_investment(
    asset_class: AssetClass,
    amount: f64,
    horizon_months: u32,
    zone: Option<&ZoneContext>,
    profile: RiskProfile,
) -> PlannerResult<InvestmentAssessment> {
    let amount = require_positive("amount", amount)?;
    if horizon_months == 0 {
        return Err(PlannerError::InvalidHorizon { value: 0 });
    }

    let mut score = 0u32;
    let mut factors = Vec::new();
    let mut add = |points: u32, factor: &str| {
        score += points;
        factors.push(factor.to_string());
    };

    if let Some(zone) = zone {
        match zone.confidence {
            Confidence::Low => add(20, "Low confidence in zone outlook"),
            Confidence::Medium => add(10, "Moderate confidence in zone performance"),
            Confidence::High => {}
        }
        if zone.outlook == Outlook::Low {
            add(15, "Zone has low growth outlook");
        }
    }

    match asset_class {
        AssetClass::RealEstate => add(15, "Real estate liquidity constraints"),
        AssetClass::Stocks => add(25, "High market volatility in equity investments"),
        _ => {}
    }

    if horizon_months < 36 {
        add(20, "Short investment horizon increases risk");
    } else if horizon_months > 120 {
        add(5, "Long-term market uncertainty");
    }

    if amount > LARGE_INVESTMENT_THRESHOLD {
        add(10, "Large investment amount concentration risk");
    }

    if profile == RiskProfile::Conservative
        && matches!(asset_class, AssetClass::Stocks | AssetClass::RealEstate)
    {
        add(15, "Investment type misaligned with conservative risk profile");
    }

    let risk_score = score.min(100);
    let risk_tier = RiskTiering::Assessment.tier(risk_score as f64);
    let description = match risk_tier {
        Tier::Low => "Low risk investment with stable returns expected",
        Tier::Medium => "Moderate risk with balanced return potential",
        Tier::High => "High risk investment requiring careful monitoring",
    };

    let mut mitigation_strategies = Vec::new();
    if risk_score > 50 {
        mitigation_strategies.extend(
            [
                "Consider diversifying across multiple asset classes",
                "Implement systematic investment approach to reduce timing risk",
                "Regular portfolio review and rebalancing",
            ]
            .map(String::from),
        );
    }
    if asset_class == AssetClass::RealEstate && amount > REIT_SUGGESTION_THRESHOLD {
        mitigation_strategies.push("Consider REITs for better liquidity and diversification".to_string());
    }

    Ok(InvestmentAssessment {
        risk_score,
        risk_tier,
        description: description.to_string(),
        risk_factors: factors,
        mitigation_strategies,
        assessed_at: Utc::now(),
    })
}
