//! Financial health scoring and investment capacity

mod capacity;
mod scorer;

pub use capacity::{
    analyze_expenses, investment_capacity, recommended_expense_pct, CapacityReport,
    CategoryAnalysis, ExpenseAnalysis, ExpenseStatus, EMERGENCY_FUND_MIN, SIP_SUGGESTION_CAP,
    SIP_SUGGESTION_MIN,
};
pub use scorer::{score_health, AssetHoldings, HealthFactor, HealthInputs, HealthScore, Rating};
