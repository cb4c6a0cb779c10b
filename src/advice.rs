//! Action items shared by the risk and health modules

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionKind {
    ReduceRisk,
    IncreaseReturns,
    Diversify,
    ExpenseReduction,
    IncreaseSavings,
    GoodStart,
    Excellent,
    SipRecommendation,
    EmergencyFund,
    ReduceExpense,
}

/// A single suggested next step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionItem {
    pub kind: ActionKind,
    pub title: String,
    pub description: String,
    pub priority: Priority,

    /// Suggested monthly amount, when the action has one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

impl ActionItem {
    pub fn new(
        kind: ActionKind,
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
    ) -> Self {
        Self {
            kind,
            title: title.into(),
            description: description.into(),
            priority,
            amount: None,
        }
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = Some(amount);
        self
    }
}
