//! Allocation mix: asset class to percentage of a portfolio

use crate::error::{PlannerError, PlannerResult};
use crate::rates::AssetClass;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Percentages per asset class, each within [0, 100]
///
/// The entries need not sum to exactly 100. Scoring normalizes by the sum.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<AssetClass, f64>", into = "BTreeMap<AssetClass, f64>")]
pub struct AllocationMix(BTreeMap<AssetClass, f64>);

impl AllocationMix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from (class, pct) pairs; repeated classes are summed
    pub fn from_pairs<I>(pairs: I) -> PlannerResult<Self>
    where
        I: IntoIterator<Item = (AssetClass, f64)>,
    {
        let mut mix = Self::new();
        for (class, pct) in pairs {
            mix.add(class, pct)?;
        }
        Ok(mix)
    }

    /// Build from (name, pct) pairs, parsing each name
    pub fn from_names<'a, I>(pairs: I) -> PlannerResult<Self>
    where
        I: IntoIterator<Item = (&'a str, f64)>,
    {
        let mut mix = Self::new();
        for (name, pct) in pairs {
            mix.add(name.parse()?, pct)?;
        }
        Ok(mix)
    }

    /// Convert holdings in currency into percentages of their total
    ///
    /// A zero total yields an empty mix.
    pub fn from_amounts<I>(amounts: I) -> PlannerResult<Self>
    where
        I: IntoIterator<Item = (AssetClass, f64)>,
    {
        let mut holdings: BTreeMap<AssetClass, f64> = BTreeMap::new();
        for (class, amount) in amounts {
            if !amount.is_finite() || amount < 0.0 {
                return Err(PlannerError::InvalidAmount {
                    field: "holding",
                    value: amount,
                });
            }
            *holdings.entry(class).or_insert(0.0) += amount;
        }

        let total: f64 = holdings.values().sum();
        if total <= 0.0 {
            return Ok(Self::new());
        }

        Ok(Self(
            holdings
                .into_iter()
                .map(|(class, amount)| (class, amount / total * 100.0))
                .collect(),
        ))
    }

    /// Build from fixed in-crate percentages known to be within range
    pub(crate) fn from_static(pairs: &[(AssetClass, f64)]) -> Self {
        debug_assert!(pairs.iter().all(|(_, pct)| (0.0..=100.0).contains(pct)));
        Self(pairs.iter().copied().collect())
    }

    /// Set a class percentage, replacing any previous value
    pub fn insert(&mut self, class: AssetClass, pct: f64) -> PlannerResult<()> {
        self.0.insert(class, validate_pct(class, pct)?);
        Ok(())
    }

    fn add(&mut self, class: AssetClass, pct: f64) -> PlannerResult<()> {
        let current = self.0.get(&class).copied().unwrap_or(0.0);
        self.insert(class, current + validate_pct(class, pct)?)
    }

    pub fn get(&self, class: AssetClass) -> Option<f64> {
        self.0.get(&class).copied()
    }

    /// Sum of all percentages
    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    /// Classes holding a non-zero share
    pub fn active_classes(&self) -> impl Iterator<Item = AssetClass> + '_ {
        self.0
            .iter()
            .filter(|(_, pct)| **pct > 0.0)
            .map(|(class, _)| *class)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AssetClass, f64)> + '_ {
        self.0.iter().map(|(class, pct)| (*class, *pct))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<BTreeMap<AssetClass, f64>> for AllocationMix {
    type Error = PlannerError;

    fn try_from(map: BTreeMap<AssetClass, f64>) -> Result<Self, Self::Error> {
        Self::from_pairs(map)
    }
}

impl From<AllocationMix> for BTreeMap<AssetClass, f64> {
    fn from(mix: AllocationMix) -> Self {
        mix.0
    }
}

fn validate_pct(class: AssetClass, pct: f64) -> PlannerResult<f64> {
    if pct.is_finite() && (0.0..=100.0).contains(&pct) {
        Ok(pct)
    } else {
        Err(PlannerError::InvalidAllocation {
            asset_class: class.to_string(),
            pct,
        })
    }
}
