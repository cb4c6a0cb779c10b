//! Wealth Planner - deterministic projection and risk-scoring engine for personal finance
//!
//! This library provides:
//! - Lump-sum growth projections with stress-tested return ranges
//! - SIP (recurring contribution) and lump-sum comparisons
//! - Portfolio and single-investment risk scoring
//! - Financial health scoring and investment capacity analysis
//! - Rule-based portfolio recommendations with an optional advisory provider

pub mod advice;
pub mod advisory;
pub mod error;
pub mod health;
pub mod planner;
pub mod projection;
pub mod rates;
pub mod risk;

// Re-export commonly used types
pub use error::{PlannerError, PlannerResult};
pub use planner::Planner;
pub use rates::{AssetClass, RateTable, Tier, ZoneContext};
pub use projection::{ProjectionConfig, ProjectionResult, SipResult};
pub use risk::{AllocationMix, RiskProfile, RiskScore};
pub use health::{HealthInputs, HealthScore};
pub use advisory::PortfolioTemplate;
