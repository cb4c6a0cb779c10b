//! Asset class and tier enumerations

use crate::error::PlannerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Investable asset classes known to the rate table
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    RealEstate,
    /// Systematic investment plan into equity mutual funds
    Sip,
    Stocks,
    FixedDeposit,
    Gold,
    /// Public Provident Fund
    Ppf,
    DebtFunds,
    IndexFunds,
    FlexiCap,
    Reits,
    GoldEtf,
    Bonds,
}

impl AssetClass {
    /// Every supported class, in rate-table order
    pub const ALL: [AssetClass; 12] = [
        AssetClass::RealEstate,
        AssetClass::Sip,
        AssetClass::Stocks,
        AssetClass::FixedDeposit,
        AssetClass::Gold,
        AssetClass::Ppf,
        AssetClass::DebtFunds,
        AssetClass::IndexFunds,
        AssetClass::FlexiCap,
        AssetClass::Reits,
        AssetClass::GoldEtf,
        AssetClass::Bonds,
    ];

    /// Wire name (snake_case)
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetClass::RealEstate => "real_estate",
            AssetClass::Sip => "sip",
            AssetClass::Stocks => "stocks",
            AssetClass::FixedDeposit => "fixed_deposit",
            AssetClass::Gold => "gold",
            AssetClass::Ppf => "ppf",
            AssetClass::DebtFunds => "debt_funds",
            AssetClass::IndexFunds => "index_funds",
            AssetClass::FlexiCap => "flexi_cap",
            AssetClass::Reits => "reits",
            AssetClass::GoldEtf => "gold_etf",
            AssetClass::Bonds => "bonds",
        }
    }

    /// Human-readable name, e.g. "Fixed Deposit"
    pub fn display_name(&self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Classes suited to a long (5+ year) horizon
    pub fn is_long_term_growth(&self) -> bool {
        matches!(self, AssetClass::RealEstate | AssetClass::Sip | AssetClass::Stocks)
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetClass {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        AssetClass::ALL
            .iter()
            .copied()
            .find(|class| class.as_str() == normalized)
            .ok_or_else(|| PlannerError::UnknownAssetClass(s.to_string()))
    }
}

/// Three-level grading used for risk and liquidity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Low => "LOW",
            Tier::Medium => "MEDIUM",
            Tier::High => "HIGH",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "LOW" => Ok(Tier::Low),
            "MEDIUM" => Ok(Tier::Medium),
            "HIGH" => Ok(Tier::High),
            _ => Err(PlannerError::UnknownVariant {
                kind: "tier",
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_every_class() {
        for class in AssetClass::ALL {
            assert_eq!(class.as_str().parse::<AssetClass>().unwrap(), class);
        }
    }

    #[test]
    fn test_parse_is_lenient_on_case_and_separators() {
        assert_eq!("Real Estate".parse::<AssetClass>().unwrap(), AssetClass::RealEstate);
        assert_eq!("GOLD-ETF".parse::<AssetClass>().unwrap(), AssetClass::GoldEtf);
    }

    #[test]
    fn test_unknown_class() {
        let err = "crypto".parse::<AssetClass>().unwrap_err();
        assert!(matches!(err, PlannerError::UnknownAssetClass(name) if name == "crypto"));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(AssetClass::FixedDeposit.display_name(), "Fixed Deposit");
        assert_eq!(AssetClass::Ppf.display_name(), "Ppf");
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&AssetClass::IndexFunds).unwrap();
        assert_eq!(json, "\"index_funds\"");
        let tier: Tier = serde_json::from_str("\"MEDIUM\"").unwrap();
        assert_eq!(tier, Tier::Medium);
    }
}
