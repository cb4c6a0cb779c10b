//! Zone context used to adjust real-estate returns

use crate::error::PlannerError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Market outlook published for a zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outlook {
    Low,
    Moderate,
    High,
}

impl Outlook {
    /// Additive adjustment to the real-estate base rate (percentage points)
    pub fn rate_offset(&self) -> f64 {
        match self {
            Outlook::High => 2.0,
            Outlook::Moderate => 0.0,
            Outlook::Low => -2.0,
        }
    }
}

impl FromStr for Outlook {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(Outlook::Low),
            "MODERATE" => Ok(Outlook::Moderate),
            "HIGH" => Ok(Outlook::High),
            _ => Err(PlannerError::UnknownVariant {
                kind: "outlook",
                value: s.to_string(),
            }),
        }
    }
}

/// Confidence in a zone's outlook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    /// Multiplier applied to the final resolved real-estate rate
    pub fn rate_multiplier(&self) -> f64 {
        match self {
            Confidence::High => 1.0,
            Confidence::Medium => 0.9,
            Confidence::Low => 0.8,
        }
    }
}

impl FromStr for Confidence {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(Confidence::Low),
            "MEDIUM" => Ok(Confidence::Medium),
            "HIGH" => Ok(Confidence::High),
            _ => Err(PlannerError::UnknownVariant {
                kind: "confidence",
                value: s.to_string(),
            }),
        }
    }
}

/// Outlook and confidence for the zone an investment sits in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneContext {
    pub outlook: Outlook,
    pub confidence: Confidence,
}

impl ZoneContext {
    pub fn new(outlook: Outlook, confidence: Confidence) -> Self {
        Self { outlook, confidence }
    }

    /// Apply the outlook offset, then the confidence multiplier
    pub fn adjust(&self, base_rate_pct: f64) -> f64 {
        (base_rate_pct + self.outlook.rate_offset()) * self.confidence.rate_multiplier()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_adjust_offset_then_multiplier() {
        let zone = ZoneContext::new(Outlook::High, Confidence::High);
        assert_relative_eq!(zone.adjust(12.0), 14.0);

        let zone = ZoneContext::new(Outlook::Low, Confidence::Medium);
        assert_relative_eq!(zone.adjust(12.0), 9.0);

        let zone = ZoneContext::new(Outlook::Moderate, Confidence::Low);
        assert_relative_eq!(zone.adjust(12.0), 9.6);
    }

    #[test]
    fn test_parse() {
        assert_eq!("high".parse::<Outlook>().unwrap(), Outlook::High);
        assert_eq!("Medium".parse::<Confidence>().unwrap(), Confidence::Medium);
        assert!("MEDIUM".parse::<Outlook>().is_err());
        assert!("MODERATE".parse::<Confidence>().is_err());
    }
}
