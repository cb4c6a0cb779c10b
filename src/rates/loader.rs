//! CSV-based rate table loader
//!
//! Loads rate profiles from `rate_table.csv` in data/rates/

use super::asset_class::{AssetClass, Tier};
use super::profile::RateProfile;
use crate::error::{PlannerError, PlannerResult};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default path to the rates directory
pub const DEFAULT_RATES_PATH: &str = "data/rates";

/// File name of the rate table inside the rates directory
pub const RATE_TABLE_FILE: &str = "rate_table.csv";

/// Raw CSV row matching rate_table.csv columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    asset_class: String,
    base_annual_rate_pct: f64,
    risk_tier: String,
    liquidity_tier: String,
    risk_weight: f64,
}

impl CsvRow {
    fn into_profile(self) -> PlannerResult<RateProfile> {
        let asset_class: AssetClass = self.asset_class.parse()?;
        let risk_tier: Tier = self.risk_tier.parse()?;
        let liquidity_tier: Tier = self.liquidity_tier.parse()?;

        if !self.base_annual_rate_pct.is_finite() {
            return Err(PlannerError::RateTable(format!(
                "non-finite rate for {}",
                asset_class
            )));
        }
        if !(0.0..=1.0).contains(&self.risk_weight) {
            return Err(PlannerError::RateTable(format!(
                "risk weight {} for {} outside [0, 1]",
                self.risk_weight, asset_class
            )));
        }

        Ok(RateProfile::new(
            asset_class,
            self.base_annual_rate_pct,
            risk_tier,
            liquidity_tier,
            self.risk_weight,
        ))
    }
}

/// Load rate profiles from `rate_table.csv` in the given directory
pub fn load_rate_profiles(path: &Path) -> PlannerResult<Vec<RateProfile>> {
    let file = File::open(path.join(RATE_TABLE_FILE))?;
    load_rate_profiles_from_reader(file)
}

/// Load rate profiles from any reader producing CSV with a header row
pub fn load_rate_profiles_from_reader<R: Read>(reader: R) -> PlannerResult<Vec<RateProfile>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut profiles = Vec::new();
    for result in reader.deserialize::<CsvRow>() {
        profiles.push(result?.into_profile()?);
    }

    Ok(profiles)
}
