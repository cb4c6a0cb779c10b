//! Investor risk appetite

use crate::error::PlannerError;
use crate::rates::Tier;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskProfile {
    Conservative,
    #[default]
    Moderate,
    Growth,
}

impl RiskProfile {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskProfile::Conservative => "CONSERVATIVE",
            RiskProfile::Moderate => "MODERATE",
            RiskProfile::Growth => "GROWTH",
        }
    }

    /// Whether an investment of the given risk tier suits this profile
    pub fn accepts(&self, risk_tier: Tier) -> bool {
        match self {
            RiskProfile::Conservative => risk_tier != Tier::High,
            RiskProfile::Moderate => true,
            RiskProfile::Growth => risk_tier != Tier::Low,
        }
    }
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskProfile {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CONSERVATIVE" => Ok(RiskProfile::Conservative),
            "MODERATE" => Ok(RiskProfile::Moderate),
            "GROWTH" => Ok(RiskProfile::Growth),
            _ => Err(PlannerError::UnknownVariant {
                kind: "risk profile",
                value: s.to_string(),
            }),
        }
    }
}
