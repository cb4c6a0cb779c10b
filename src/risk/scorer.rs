//! Portfolio risk scoring

use super::allocation::AllocationMix;
use crate::advice::{ActionItem, ActionKind, Priority};
use crate::error::PlannerResult;
use crate::rates::{RateTable, Tier};
use serde::{Deserialize, Serialize};

/// Score thresholds for mapping a 0-100 risk score to a tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTiering {
    /// ≤30 LOW, ≤70 MEDIUM, otherwise HIGH
    #[default]
    Portfolio,
    /// ≤30 LOW, ≤60 MEDIUM, otherwise HIGH
    Assessment,
}

impl RiskTiering {
    pub fn medium_ceiling(&self) -> f64 {
        match self {
            RiskTiering::Portfolio => 70.0,
            RiskTiering::Assessment => 60.0,
        }
    }

    pub fn tier(&self, score: f64) -> Tier {
        if score <= 30.0 {
            Tier::Low
        } else if score <= self.medium_ceiling() {
            Tier::Medium
        } else {
            Tier::High
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskScore {
    /// Weighted risk, 0-100, two decimals
    pub score: f64,
    pub tier: Tier,
    pub diversification_score: u32,
    pub volatility_estimate: f64,
}

/// Weighted risk score of an allocation
///
/// Each class contributes its share of the mix total times its risk weight.
/// An empty or all-zero mix scores 0.
pub fn score_allocation(
    rates: &RateTable,
    mix: &AllocationMix,
    tiering: RiskTiering,
) -> PlannerResult<RiskScore> {
    let total = mix.total();

    let mut raw = 0.0;
    if total > 0.0 {
        for (class, pct) in mix.iter() {
            raw += pct / total * rates.risk_weight(class)? * 100.0;
        }
    }

    let score = round2(raw);
    Ok(RiskScore {
        score,
        tier: tiering.tier(score),
        diversification_score: diversification_score(mix.active_classes().count()),
        volatility_estimate: round2(score * 0.3),
    })
}

/// Diversification credit for the number of classes actually held
pub fn diversification_score(active_classes: usize) -> u32 {
    match active_classes {
        0 => 0,
        1 => 20,
        2 => 40,
        3 | 4 => 60,
        _ => 90,
    }
}

/// Follow-up actions for a scored portfolio
pub fn risk_advice(risk: &RiskScore) -> Vec<ActionItem> {
    let mut actions = Vec::new();

    if risk.score > 70.0 {
        actions.push(ActionItem::new(
            ActionKind::ReduceRisk,
            "Consider Risk Reduction",
            "Your portfolio has high risk. Consider adding low-risk assets like FDs or PPF.",
            Priority::High,
        ));
    }
    if risk.score < 30.0 {
        actions.push(ActionItem::new(
            ActionKind::IncreaseReturns,
            "Consider Higher Returns",
            "Your portfolio is very conservative. Consider adding growth assets for better returns.",
            Priority::Medium,
        ));
    }
    if risk.diversification_score < 50 {
        actions.push(ActionItem::new(
            ActionKind::Diversify,
            "Diversify Portfolio",
            "Add more asset classes to reduce concentration risk.",
            Priority::Medium,
        ));
    }

    actions
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
