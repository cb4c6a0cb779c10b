//! Fixed portfolio templates per risk profile

use crate::rates::{AssetClass, Confidence};
use crate::risk::{AllocationMix, RiskProfile};
use serde::{Deserialize, Serialize};

/// A named model portfolio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioTemplate {
    pub name: String,
    pub allocation: AllocationMix,
    pub rationale: Vec<String>,
    pub confidence: Confidence,
}

impl PortfolioTemplate {
    fn fixed(
        name: &str,
        allocation: &[(AssetClass, f64)],
        rationale: [&str; 3],
        confidence: Confidence,
    ) -> Self {
        Self {
            name: name.to_string(),
            allocation: AllocationMix::from_static(allocation),
            rationale: rationale.map(String::from).to_vec(),
            confidence,
        }
    }

    /// Whether the allocation adds up to 100% within `tolerance` points
    pub fn is_complete(&self, tolerance: f64) -> bool {
        (self.allocation.total() - 100.0).abs() <= tolerance
    }
}

/// Model portfolios for a risk profile, most suitable first
pub fn recommend(profile: RiskProfile) -> Vec<PortfolioTemplate> {
    use AssetClass::*;

    match profile {
        RiskProfile::Conservative => vec![
            PortfolioTemplate::fixed(
                "Conservative",
                &[(DebtFunds, 60.0), (IndexFunds, 25.0), (GoldEtf, 15.0)],
                ["Capital preservation focus", "Low volatility", "Steady returns"],
                Confidence::High,
            ),
            PortfolioTemplate::fixed(
                "Ultra Conservative",
                &[(DebtFunds, 70.0), (IndexFunds, 20.0), (GoldEtf, 10.0)],
                ["Maximum safety", "Minimal risk", "Predictable returns"],
                Confidence::High,
            ),
        ],
        RiskProfile::Moderate => vec![
            PortfolioTemplate::fixed(
                "Recommended",
                &[(IndexFunds, 40.0), (FlexiCap, 25.0), (DebtFunds, 20.0), (GoldEtf, 15.0)],
                ["Balanced risk-return", "Diversified portfolio", "Suitable for moderate risk"],
                Confidence::High,
            ),
            PortfolioTemplate::fixed(
                "Conservative",
                &[(DebtFunds, 40.0), (IndexFunds, 35.0), (GoldEtf, 25.0)],
                ["Lower risk approach", "Stable returns", "Capital protection"],
                Confidence::High,
            ),
            PortfolioTemplate::fixed(
                "Growth",
                &[(FlexiCap, 35.0), (IndexFunds, 35.0), (Reits, 20.0), (GoldEtf, 10.0)],
                ["Higher growth potential", "Equity focused", "Long-term gains"],
                Confidence::Medium,
            ),
        ],
        RiskProfile::Growth => vec![
            PortfolioTemplate::fixed(
                "Growth",
                &[(FlexiCap, 40.0), (IndexFunds, 35.0), (Reits, 15.0), (GoldEtf, 10.0)],
                ["High growth potential", "Diversified equity exposure", "Long-term wealth creation"],
                Confidence::Medium,
            ),
            PortfolioTemplate::fixed(
                "Aggressive Growth",
                &[(FlexiCap, 50.0), (IndexFunds, 30.0), (Reits, 20.0)],
                ["Maximum growth focus", "Higher risk tolerance", "Long investment horizon"],
                Confidence::Medium,
            ),
        ],
    }
}
