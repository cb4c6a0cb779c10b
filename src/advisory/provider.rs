//! Optional external advisory service with deterministic fallback

use super::templates::{recommend, PortfolioTemplate};
use crate::risk::RiskProfile;
use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Allowed deviation, in percentage points, of a provider allocation from 100
pub const ALLOCATION_TOLERANCE: f64 = 1.0;

#[derive(Debug, Error)]
pub enum AdvisoryError {
    #[error("advisory service unavailable: {0}")]
    Unavailable(String),

    #[error("advisory service timed out")]
    Timeout,

    #[error("malformed advisory response: {0}")]
    Malformed(String),
}

/// What the caller is asking the provider for
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AdvisoryRequest {
    pub risk_profile: RiskProfile,
    #[serde(default)]
    pub investment_amount: Option<f64>,
    #[serde(default)]
    pub horizon_months: Option<u32>,
}

impl AdvisoryRequest {
    pub fn for_profile(risk_profile: RiskProfile) -> Self {
        Self {
            risk_profile,
            ..Default::default()
        }
    }
}

/// External source of portfolio suggestions
///
/// Implementations own their transport, timeout and retry policy.
pub trait AdvisoryProvider: Send + Sync {
    /// Short name used in log lines
    fn provider_name(&self) -> &'static str;

    /// Suggested portfolios for the request
    ///
    /// # Errors
    ///
    /// Returns an error when the service cannot produce an answer.
    fn portfolios(&self, request: &AdvisoryRequest) -> Result<Vec<PortfolioTemplate>, AdvisoryError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationSource {
    Provider,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    pub portfolios: Vec<PortfolioTemplate>,
    pub source: RecommendationSource,
    pub generated_at: DateTime<Utc>,
}

/// Produces recommendations, preferring a provider when one is configured
#[derive(Clone, Default)]
pub struct Advisor {
    provider: Option<Arc<dyn AdvisoryProvider>>,
}

impl Advisor {
    pub fn new(provider: Arc<dyn AdvisoryProvider>) -> Self {
        Self {
            provider: Some(provider),
        }
    }

    /// Advisor that always answers from the fixed templates
    pub fn fallback_only() -> Self {
        Self::default()
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Portfolios for the request; never fails
    ///
    /// Provider errors, empty answers and allocations that do not add up to
    /// 100% fall back to the fixed templates for the risk profile.
    pub fn recommend(&self, request: &AdvisoryRequest) -> Recommendations {
        if let Some(provider) = &self.provider {
            match provider.portfolios(request) {
                Ok(portfolios) => match validate(&portfolios) {
                    Ok(()) => {
                        debug!(
                            "{} returned {} portfolios",
                            provider.provider_name(),
                            portfolios.len()
                        );
                        return Recommendations {
                            portfolios,
                            source: RecommendationSource::Provider,
                            generated_at: Utc::now(),
                        };
                    }
                    Err(err) => warn!(
                        "Rejected {} response, using default templates: {}",
                        provider.provider_name(),
                        err
                    ),
                },
                Err(err) => warn!(
                    "{} failed, using default templates: {}",
                    provider.provider_name(),
                    err
                ),
            }
        }

        Recommendations {
            portfolios: recommend(request.risk_profile),
            source: RecommendationSource::Fallback,
            generated_at: Utc::now(),
        }
    }
}

impl std::fmt::Debug for Advisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Advisor")
            .field(
                "provider",
                &self.provider.as_ref().map(|p| p.provider_name()),
            )
            .finish()
    }
}

fn validate(portfolios: &[PortfolioTemplate]) -> Result<(), AdvisoryError> {
    if portfolios.is_empty() {
        return Err(AdvisoryError::Malformed("no portfolios".to_string()));
    }
    if let Some(bad) = portfolios.iter().find(|p| !p.is_complete(ALLOCATION_TOLERANCE)) {
        return Err(AdvisoryError::Malformed(format!(
            "allocation for {} sums to {}",
            bad.name,
            bad.allocation.total()
        )));
    }
    Ok(())
}
