//! Advice derived from a ranked asset comparison

use crate::projection::ProjectionResult;
use crate::rates::AssetClass;
use crate::risk::{AllocationMix, RiskProfile};
use serde::{Deserialize, Serialize};

/// Number of top suitable classes split evenly in the balanced suggestion
const BALANCED_SPLIT: usize = 3;

/// Horizon, in months, from which long-term growth classes are suggested
pub const LONG_TERM_HORIZON_MONTHS: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComparisonAdviceKind {
    TopPerformer,
    Balanced,
    LongTerm,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonAdvice {
    pub kind: ComparisonAdviceKind,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_class: Option<AssetClass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allocation: Option<AllocationMix>,
    pub rationale: String,
}

/// Turn comparison results (best ROI first) into suggestions for a profile
///
/// Results whose risk tier the profile does not accept are dropped; if that
/// leaves nothing, every result is considered.
pub fn advise_on_comparison(
    results: &[ProjectionResult],
    profile: RiskProfile,
    horizon_months: u32,
) -> Vec<ComparisonAdvice> {
    let mut suitable: Vec<&ProjectionResult> = results
        .iter()
        .filter(|r| profile.accepts(r.risk_tier))
        .collect();
    if suitable.is_empty() {
        suitable = results.iter().collect();
    }

    let mut advice = Vec::new();

    if let Some(top) = suitable.first() {
        advice.push(ComparisonAdvice {
            kind: ComparisonAdviceKind::TopPerformer,
            title: format!("Highest Returns: {}", top.asset_class.display_name()),
            description: format!(
                "Expected {:.1}% returns over {} months",
                top.roi_percentage, horizon_months
            ),
            asset_class: Some(top.asset_class),
            allocation: None,
            rationale: format!(
                "Best ROI potential with {} risk",
                top.risk_tier.as_str().to_ascii_lowercase()
            ),
        });
    }

    if suitable.len() >= 2 {
        let picks = &suitable[..suitable.len().min(BALANCED_SPLIT)];
        let share = (100 / picks.len()) as f64;
        let pairs: Vec<(AssetClass, f64)> = picks.iter().map(|r| (r.asset_class, share)).collect();
        advice.push(ComparisonAdvice {
            kind: ComparisonAdviceKind::Balanced,
            title: "Diversified Portfolio".to_string(),
            description: format!("Split investment across {} asset classes", picks.len()),
            asset_class: None,
            allocation: Some(AllocationMix::from_static(&pairs)),
            rationale: "Reduces risk through diversification".to_string(),
        });
    }

    if horizon_months >= LONG_TERM_HORIZON_MONTHS {
        if let Some(long_term) = suitable.iter().find(|r| r.asset_class.is_long_term_growth()) {
            advice.push(ComparisonAdvice {
                kind: ComparisonAdviceKind::LongTerm,
                title: "Long-term Growth Strategy".to_string(),
                description: format!(
                    "Focus on {} for long-term wealth creation",
                    long_term.asset_class.display_name()
                ),
                asset_class: Some(long_term.asset_class),
                allocation: None,
                rationale: "Long investment horizon allows for higher growth potential".to_string(),
            });
        }
    }

    advice
}
