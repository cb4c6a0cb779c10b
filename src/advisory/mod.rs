//! Portfolio recommendations: fixed templates, comparison advice, provider seam

mod comparison;
mod provider;
mod templates;

pub use comparison::{
    advise_on_comparison, ComparisonAdvice, ComparisonAdviceKind, LONG_TERM_HORIZON_MONTHS,
};
pub use provider::{
    AdvisoryError, AdvisoryProvider, AdvisoryRequest, Advisor, RecommendationSource,
    Recommendations, ALLOCATION_TOLERANCE,
};
pub use templates::{recommend, PortfolioTemplate};
