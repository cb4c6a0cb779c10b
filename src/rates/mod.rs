//! Rate table: expected returns, risk and liquidity per asset class

mod asset_class;
mod profile;
mod zone;
pub mod loader;

pub use asset_class::{AssetClass, Tier};
pub use profile::RateProfile;
pub use zone::{Confidence, Outlook, ZoneContext};

use crate::error::{PlannerError, PlannerResult};
use log::info;
use std::collections::BTreeMap;
use std::path::Path;

/// Immutable lookup of rate profiles, one per asset class
///
/// Built once at startup (from defaults or CSV) and shared read-only.
#[derive(Debug, Clone)]
pub struct RateTable {
    profiles: BTreeMap<AssetClass, RateProfile>,
}

impl RateTable {
    /// Built-in table matching the published planning rates
    pub fn default_table() -> Self {
        let profiles = profile::default_profiles()
            .into_iter()
            .map(|p| (p.asset_class, p))
            .collect();
        Self { profiles }
    }

    /// Build a table from explicit profiles
    ///
    /// Every asset class must appear exactly once.
    pub fn from_profiles(profiles: Vec<RateProfile>) -> PlannerResult<Self> {
        let mut table = BTreeMap::new();
        for profile in profiles {
            let class = profile.asset_class;
            if table.insert(class, profile).is_some() {
                return Err(PlannerError::RateTable(format!(
                    "duplicate entry for {}",
                    class
                )));
            }
        }

        let missing: Vec<&str> = AssetClass::ALL
            .iter()
            .filter(|class| !table.contains_key(*class))
            .map(|class| class.as_str())
            .collect();
        if !missing.is_empty() {
            return Err(PlannerError::RateTable(format!(
                "missing entries for {}",
                missing.join(", ")
            )));
        }

        Ok(Self { profiles: table })
    }

    /// Load the table from CSV in the default location (data/rates/)
    pub fn from_csv() -> PlannerResult<Self> {
        Self::from_csv_path(Path::new(loader::DEFAULT_RATES_PATH))
    }

    /// Load the table from CSV in a specific directory
    pub fn from_csv_path(path: &Path) -> PlannerResult<Self> {
        let profiles = loader::load_rate_profiles(path)?;
        let table = Self::from_profiles(profiles)?;
        info!("Loaded {} rate profiles from {}", table.len(), path.display());
        Ok(table)
    }

    /// Profile for an asset class
    pub fn lookup(&self, asset_class: AssetClass) -> PlannerResult<&RateProfile> {
        self.profiles
            .get(&asset_class)
            .ok_or_else(|| PlannerError::UnknownAssetClass(asset_class.to_string()))
    }

    /// Profile for an asset class given by name
    pub fn lookup_name(&self, name: &str) -> PlannerResult<&RateProfile> {
        self.lookup(name.parse()?)
    }

    /// Annual rate for a class, with the zone adjustment applied to real estate
    pub fn resolve_rate(
        &self,
        asset_class: AssetClass,
        zone: Option<&ZoneContext>,
    ) -> PlannerResult<f64> {
        let base = self.lookup(asset_class)?.base_annual_rate_pct;
        Ok(match (asset_class, zone) {
            (AssetClass::RealEstate, Some(zone)) => zone.adjust(base),
            _ => base,
        })
    }

    /// Risk weight used by the portfolio scorer
    pub fn risk_weight(&self, asset_class: AssetClass) -> PlannerResult<f64> {
        Ok(self.lookup(asset_class)?.risk_weight)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Iterate profiles in asset-class order
    pub fn iter(&self) -> impl Iterator<Item = &RateProfile> {
        self.profiles.values()
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::default_table()
    }
}
