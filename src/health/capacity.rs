//! Monthly investment capacity and expense breakdown

use crate::advice::{ActionItem, ActionKind, Priority};
use crate::error::{PlannerError, PlannerResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Smallest monthly surplus for which a SIP is suggested
pub const SIP_SUGGESTION_MIN: f64 = 5_000.0;

/// Smallest monthly surplus for which an emergency fund is suggested
pub const EMERGENCY_FUND_MIN: f64 = 10_000.0;

/// Upper bound on the suggested monthly SIP
pub const SIP_SUGGESTION_CAP: f64 = 25_000.0;

/// Recommended share of income, in percent, for an expense category
///
/// Unlisted categories get 10%.
pub fn recommended_expense_pct(category: &str) -> f64 {
    match category.trim().to_ascii_lowercase().as_str() {
        "housing" => 30.0,
        "food" => 15.0,
        "transportation" => 15.0,
        "utilities" => 10.0,
        "entertainment" => 10.0,
        "healthcare" => 5.0,
        "miscellaneous" => 15.0,
        _ => 10.0,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseStatus {
    Over,
    Optimal,
    Under,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAnalysis {
    pub category: String,
    pub amount: f64,
    pub pct_of_income: f64,
    pub recommended_pct: f64,
    pub status: ExpenseStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseAnalysis {
    pub total_expenses: f64,
    pub expense_ratio_pct: f64,
    pub categories: Vec<CategoryAnalysis>,
    pub actions: Vec<ActionItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityReport {
    pub monthly_income: f64,
    pub total_expenses: f64,
    pub available_for_investment: f64,
    pub investment_pct: f64,
    pub actions: Vec<ActionItem>,
    pub expense_analysis: ExpenseAnalysis,
}

/// How much of a monthly income is free to invest, and what to do with it
pub fn investment_capacity(
    monthly_income: f64,
    expenses: &BTreeMap<String, f64>,
) -> PlannerResult<CapacityReport> {
    require_non_negative("monthly_income", monthly_income)?;
    for amount in expenses.values() {
        require_non_negative("expense", *amount)?;
    }

    let total_expenses: f64 = expenses.values().sum();
    let available = monthly_income - total_expenses;

    Ok(CapacityReport {
        monthly_income,
        total_expenses,
        available_for_investment: available,
        investment_pct: pct_of(available, monthly_income),
        actions: capacity_actions(monthly_income, available),
        expense_analysis: analyze_expenses(monthly_income, expenses),
    })
}

/// Per-category spending against recommended shares of income
pub fn analyze_expenses(monthly_income: f64, expenses: &BTreeMap<String, f64>) -> ExpenseAnalysis {
    let total_expenses: f64 = expenses.values().sum();
    let mut categories = Vec::with_capacity(expenses.len());
    let mut actions = Vec::new();

    for (category, amount) in expenses {
        let pct = pct_of(*amount, monthly_income);
        let recommended = recommended_expense_pct(category);
        let status = if pct > recommended {
            ExpenseStatus::Over
        } else if pct < recommended * 0.5 {
            ExpenseStatus::Under
        } else {
            ExpenseStatus::Optimal
        };

        if status == ExpenseStatus::Over {
            let excess = amount - monthly_income * recommended / 100.0;
            actions.push(
                ActionItem::new(
                    ActionKind::ReduceExpense,
                    format!("Reduce {} spending", category),
                    format!("Consider reducing {} expenses by ₹{:.0}", category, excess),
                    Priority::Medium,
                )
                .with_amount(excess),
            );
        }

        categories.push(CategoryAnalysis {
            category: category.clone(),
            amount: *amount,
            pct_of_income: pct,
            recommended_pct: recommended,
            status,
        });
    }

    ExpenseAnalysis {
        total_expenses,
        expense_ratio_pct: pct_of(total_expenses, monthly_income),
        categories,
        actions,
    }
}

fn capacity_actions(monthly_income: f64, available: f64) -> Vec<ActionItem> {
    if available <= 0.0 {
        return vec![ActionItem::new(
            ActionKind::ExpenseReduction,
            "Reduce Expenses First",
            "Your expenses exceed income. Focus on expense reduction before investing.",
            Priority::High,
        )];
    }

    let mut actions = Vec::new();
    let savings_pct = pct_of(available, monthly_income);

    actions.push(if savings_pct < 10.0 {
        ActionItem::new(
            ActionKind::IncreaseSavings,
            "Increase Savings Rate",
            format!("Currently saving {:.1}%. Aim for at least 20%.", savings_pct),
            Priority::High,
        )
    } else if savings_pct < 20.0 {
        ActionItem::new(
            ActionKind::GoodStart,
            "Good Savings Rate",
            format!("Saving {:.1}% is good. Consider increasing to 25-30%.", savings_pct),
            Priority::Medium,
        )
    } else {
        ActionItem::new(
            ActionKind::Excellent,
            "Excellent Savings Rate",
            format!("Saving {:.1}% is excellent. Focus on optimal allocation.", savings_pct),
            Priority::Low,
        )
    });

    if available >= SIP_SUGGESTION_MIN {
        let sip = (available * 0.7).min(SIP_SUGGESTION_CAP);
        actions.push(
            ActionItem::new(
                ActionKind::SipRecommendation,
                "Start SIP Investment",
                format!("Start with ₹{:.0}/month in equity mutual funds", sip),
                Priority::Medium,
            )
            .with_amount(sip),
        );
    }

    if available >= EMERGENCY_FUND_MIN {
        let reserve = available * 0.3;
        actions.push(
            ActionItem::new(
                ActionKind::EmergencyFund,
                "Build Emergency Fund",
                format!("Keep ₹{:.0}/month for emergency fund (6 months expenses)", reserve),
                Priority::High,
            )
            .with_amount(reserve),
        );
    }

    actions
}

fn pct_of(amount: f64, income: f64) -> f64 {
    if income > 0.0 {
        amount / income * 100.0
    } else {
        0.0
    }
}

fn require_non_negative(field: &'static str, value: f64) -> PlannerResult<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(PlannerError::InvalidAmount { field, value })
    }
}
