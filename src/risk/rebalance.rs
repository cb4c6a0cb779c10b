//! Trades that move current holdings toward a target allocation

use super::allocation::AllocationMix;
use crate::error::{PlannerError, PlannerResult};
use crate::rates::AssetClass;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Differences at or below this amount are left alone
pub const REBALANCE_THRESHOLD: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeSide {
    Buy,
    Sell,
}

/// One trade for a class named in the target mix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RebalanceAction {
    pub asset_class: AssetClass,
    pub current_amount: f64,
    pub target_amount: f64,
    pub side: TradeSide,
    /// Absolute size of the trade
    pub amount: f64,
}

/// Trades needed to bring `holdings` to `target`
///
/// Targets are percentages of the whole portfolio value, including classes
/// the target mix does not name. Those classes get no action of their own.
/// Actions come out in asset-class order.
pub fn rebalance<I>(holdings: I, target: &AllocationMix) -> PlannerResult<Vec<RebalanceAction>>
where
    I: IntoIterator<Item = (AssetClass, f64)>,
{
    let mut current: BTreeMap<AssetClass, f64> = BTreeMap::new();
    for (class, amount) in holdings {
        if !amount.is_finite() || amount < 0.0 {
            return Err(PlannerError::InvalidAmount {
                field: "holding",
                value: amount,
            });
        }
        *current.entry(class).or_insert(0.0) += amount;
    }
    let total: f64 = current.values().sum();

    let actions: Vec<RebalanceAction> = target
        .iter()
        .filter_map(|(class, pct)| {
            let current_amount = current.get(&class).copied().unwrap_or(0.0);
            let target_amount = total * pct / 100.0;
            let diff = target_amount - current_amount;
            if diff.abs() <= REBALANCE_THRESHOLD {
                return None;
            }
            Some(RebalanceAction {
                asset_class: class,
                current_amount,
                target_amount,
                side: if diff > 0.0 { TradeSide::Buy } else { TradeSide::Sell },
                amount: diff.abs(),
            })
        })
        .collect();

    debug!(
        "Rebalancing {:.2} across {} target classes: {} trades",
        total,
        target.len(),
        actions.len()
    );
    Ok(actions)
}
