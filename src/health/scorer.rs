//! Composite financial health score

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Current holdings, in currency, across the six tracked buckets
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetHoldings {
    pub savings: f64,
    pub mutual_funds: f64,
    pub stocks: f64,
    pub gold: f64,
    pub epf: f64,
    pub real_estate: f64,
}

impl AssetHoldings {
    fn buckets(&self) -> [f64; 6] {
        [
            self.savings,
            self.mutual_funds,
            self.stocks,
            self.gold,
            self.epf,
            self.real_estate,
        ]
    }

    pub fn total(&self) -> f64 {
        self.buckets().iter().sum()
    }

    /// Number of buckets holding a positive balance
    pub fn non_zero_buckets(&self) -> usize {
        self.buckets().iter().filter(|value| **value > 0.0).count()
    }
}

/// Inputs to the health score; any missing figure skips its factor
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthInputs {
    pub monthly_income: Option<f64>,
    pub monthly_expenses: Option<f64>,
    pub liabilities: Option<f64>,
    pub assets: Option<AssetHoldings>,
    pub goal_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthFactor {
    Income,
    ExpenseRatio,
    Diversification,
    Debt,
    GoalPlanning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rating {
    Excellent,
    Good,
    Average,
    #[serde(rename = "Below Average")]
    BelowAverage,
    Poor,
}

impl Rating {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Excellent => "Excellent",
            Rating::Good => "Good",
            Rating::Average => "Average",
            Rating::BelowAverage => "Below Average",
            Rating::Poor => "Poor",
        }
    }

    /// Overall rating for a total score
    pub fn for_score(score: u32) -> Self {
        match score {
            85.. => Rating::Excellent,
            70..=84 => Rating::Good,
            55..=69 => Rating::Average,
            40..=54 => Rating::BelowAverage,
            _ => Rating::Poor,
        }
    }

    fn needs_attention(&self) -> bool {
        matches!(self, Rating::Average | Rating::Poor)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthScore {
    pub score: u32,
    pub rating: Rating,
    pub factor_ratings: BTreeMap<HealthFactor, Rating>,
    pub recommendations: Vec<String>,
}

impl HealthScore {
    pub fn factor(&self, factor: HealthFactor) -> Option<Rating> {
        self.factor_ratings.get(&factor).copied()
    }
}

/// Score income, spending, diversification, debt and goal planning
pub fn score_health(inputs: &HealthInputs) -> HealthScore {
    let mut score = 0;
    let mut factor_ratings = BTreeMap::new();
    let mut record = |factor: HealthFactor, (points, rating): (u32, Rating)| {
        score += points;
        factor_ratings.insert(factor, rating);
    };

    let income = inputs.monthly_income.filter(|v| *v > 0.0);
    let expenses = inputs.monthly_expenses.filter(|v| *v > 0.0);

    if let Some(income) = income {
        record(HealthFactor::Income, income_band(income));
    }

    if let (Some(income), Some(expenses)) = (income, expenses) {
        record(HealthFactor::ExpenseRatio, expense_band(expenses / income));
    }

    if let Some(assets) = inputs.assets.filter(|a| a.total() > 0.0) {
        record(
            HealthFactor::Diversification,
            diversification_band(assets.non_zero_buckets()),
        );
    }

    let liabilities = inputs.liabilities.filter(|v| *v > 0.0);
    let debt = match (liabilities, income) {
        (Some(liabilities), Some(income)) => debt_band(liabilities / (income * 12.0)),
        _ => (20, Rating::Excellent),
    };
    record(HealthFactor::Debt, debt);

    record(HealthFactor::GoalPlanning, goal_band(inputs.goal_count));

    let score = score.min(100);
    let recommendations = health_recommendations(score, &factor_ratings);

    HealthScore {
        score,
        rating: Rating::for_score(score),
        factor_ratings,
        recommendations,
    }
}

fn income_band(income: f64) -> (u32, Rating) {
    if income >= 100_000.0 {
        (20, Rating::Excellent)
    } else if income >= 50_000.0 {
        (15, Rating::Good)
    } else if income >= 25_000.0 {
        (10, Rating::Average)
    } else {
        (5, Rating::BelowAverage)
    }
}

fn expense_band(ratio: f64) -> (u32, Rating) {
    if ratio <= 0.5 {
        (20, Rating::Excellent)
    } else if ratio <= 0.7 {
        (15, Rating::Good)
    } else if ratio <= 0.9 {
        (10, Rating::Average)
    } else {
        (5, Rating::Poor)
    }
}

fn diversification_band(buckets: usize) -> (u32, Rating) {
    match buckets {
        4.. => (30, Rating::Excellent),
        3 => (20, Rating::Good),
        2 => (15, Rating::Average),
        _ => (10, Rating::Poor),
    }
}

/// Liabilities as a multiple of annual income
fn debt_band(debt_to_annual_income: f64) -> (u32, Rating) {
    if debt_to_annual_income <= 2.0 {
        (20, Rating::Excellent)
    } else if debt_to_annual_income <= 4.0 {
        (15, Rating::Good)
    } else if debt_to_annual_income <= 6.0 {
        (10, Rating::Average)
    } else {
        (5, Rating::Poor)
    }
}

fn goal_band(goals: u32) -> (u32, Rating) {
    match goals {
        3.. => (10, Rating::Excellent),
        2 => (8, Rating::Good),
        1 => (5, Rating::Average),
        0 => (0, Rating::Poor),
    }
}

fn health_recommendations(score: u32, factors: &BTreeMap<HealthFactor, Rating>) -> Vec<String> {
    let advice = [
        (HealthFactor::ExpenseRatio, "Reduce monthly expenses to improve savings rate"),
        (HealthFactor::Diversification, "Diversify investments across different asset classes"),
        (HealthFactor::Debt, "Focus on reducing debt burden"),
        (HealthFactor::GoalPlanning, "Set clear financial goals with timelines"),
    ];

    let mut recommendations: Vec<String> = advice
        .iter()
        .filter(|(factor, _)| factors.get(factor).is_some_and(Rating::needs_attention))
        .map(|(_, text)| text.to_string())
        .collect();

    if score < 70 {
        recommendations.push("Consider consulting a financial advisor".to_string());
    }
    recommendations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn holdings(buckets: usize) -> AssetHoldings {
        let mut values = [0.0; 6];
        for value in values.iter_mut().take(buckets) {
            *value = 10_000.0;
        }
        AssetHoldings {
            savings: values[0],
            mutual_funds: values[1],
            stocks: values[2],
            gold: values[3],
            epf: values[4],
            real_estate: values[5],
        }
    }

    #[test]
    fn test_strong_profile() {
        let inputs = HealthInputs {
            monthly_income: Some(150_000.0),
            monthly_expenses: Some(60_000.0),
            liabilities: Some(1_000_000.0),
            assets: Some(holdings(5)),
            goal_count: 3,
        };
        let health = score_health(&inputs);

        assert_eq!(health.score, 100);
        assert_eq!(health.rating, Rating::Excellent);
        assert_eq!(health.factor(HealthFactor::Debt), Some(Rating::Excellent));
        assert!(health.recommendations.is_empty());
    }

    #[test]
    fn test_empty_inputs_use_defaults() {
        let health = score_health(&HealthInputs::default());

        // debt default 20, goals 0
        assert_eq!(health.score, 20);
        assert_eq!(health.rating, Rating::Poor);
        assert_eq!(health.factor(HealthFactor::Income), None);
        assert_eq!(health.factor(HealthFactor::ExpenseRatio), None);
        assert_eq!(health.factor(HealthFactor::Diversification), None);
        assert_eq!(health.factor(HealthFactor::Debt), Some(Rating::Excellent));
        assert_eq!(health.factor(HealthFactor::GoalPlanning), Some(Rating::Poor));
        assert_eq!(
            health.recommendations,
            vec![
                "Set clear financial goals with timelines".to_string(),
                "Consider consulting a financial advisor".to_string(),
            ]
        );
    }

    #[test]
    fn test_liabilities_without_income_score_full_debt() {
        let inputs = HealthInputs {
            liabilities: Some(5_000_000.0),
            ..Default::default()
        };
        let health = score_health(&inputs);
        assert_eq!(health.factor(HealthFactor::Debt), Some(Rating::Excellent));
    }

    #[test]
    fn test_debt_bands_against_annual_income() {
        let base = HealthInputs {
            monthly_income: Some(50_000.0),
            ..Default::default()
        };
        let cases = [
            (1_200_000.0, Rating::Excellent),
            (1_800_000.0, Rating::Good),
            (3_000_000.0, Rating::Average),
            (4_000_000.0, Rating::Poor),
        ];
        for (liabilities, expected) in cases {
            let inputs = HealthInputs {
                liabilities: Some(liabilities),
                ..base
            };
            assert_eq!(score_health(&inputs).factor(HealthFactor::Debt), Some(expected));
        }
    }

    #[test]
    fn test_income_and_expense_bands() {
        let inputs = HealthInputs {
            monthly_income: Some(30_000.0),
            monthly_expenses: Some(28_000.0),
            assets: Some(holdings(2)),
            goal_count: 1,
            ..Default::default()
        };
        let health = score_health(&inputs);

        assert_eq!(health.factor(HealthFactor::Income), Some(Rating::Average));
        assert_eq!(health.factor(HealthFactor::ExpenseRatio), Some(Rating::Poor));
        assert_eq!(health.factor(HealthFactor::Diversification), Some(Rating::Average));
        // 10 + 5 + 15 + 20 + 5
        assert_eq!(health.score, 55);
        assert_eq!(health.rating, Rating::Average);
        assert_eq!(health.recommendations.len(), 4);
    }

    #[test]
    fn test_zero_assets_skip_diversification() {
        let inputs = HealthInputs {
            assets: Some(AssetHoldings::default()),
            ..Default::default()
        };
        assert_eq!(score_health(&inputs).factor(HealthFactor::Diversification), None);
    }

    #[test]
    fn test_score_always_in_range() {
        for income in [None, Some(0.0), Some(10_000.0), Some(500_000.0)] {
            for expenses in [None, Some(1.0), Some(1_000_000.0)] {
                for goals in 0..5 {
                    let inputs = HealthInputs {
                        monthly_income: income,
                        monthly_expenses: expenses,
                        liabilities: Some(100_000.0),
                        assets: Some(holdings(goals as usize)),
                        goal_count: goals,
                    };
                    assert!(score_health(&inputs).score <= 100);
                }
            }
        }
    }

    #[test]
    fn test_rating_bands_and_serde() {
        assert_eq!(Rating::for_score(85), Rating::Excellent);
        assert_eq!(Rating::for_score(84), Rating::Good);
        assert_eq!(Rating::for_score(55), Rating::Average);
        assert_eq!(Rating::for_score(40), Rating::BelowAverage);
        assert_eq!(Rating::for_score(39), Rating::Poor);
        assert_eq!(serde_json::to_string(&Rating::BelowAverage).unwrap(), "\"Below Average\"");
    }

    #[test]
    fn test_inputs_deserialize_with_missing_fields() {
        let inputs: HealthInputs =
            serde_json::from_str(r#"{"monthly_income": 80000, "assets": {"stocks": 5000}}"#).unwrap();
        assert_eq!(inputs.monthly_income, Some(80_000.0));
        assert_eq!(inputs.assets.unwrap().non_zero_buckets(), 1);
        assert_eq!(inputs.goal_count, 0);
    }
}
