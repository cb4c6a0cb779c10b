//! Portfolio and single-investment risk scoring

mod allocation;
mod assessment;
mod profile;
mod rebalance;
mod scorer;

pub use allocation::AllocationMix;
pub use assessment::{
    assess_investment, InvestmentAssessment, LARGE_INVESTMENT_THRESHOLD, REIT_SUGGESTION_THRESHOLD,
};
pub use profile::RiskProfile;
pub use rebalance::{rebalance, RebalanceAction, TradeSide, REBALANCE_THRESHOLD};
pub use scorer::{diversification_score, risk_advice, score_allocation, RiskScore, RiskTiering};
