use finassist_core::{BudgetPolicy, Category, Transaction};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::stats::CategoryStats;

/// Rounds to two decimal places. Non-finite values pass through.
pub fn round2(value: f64) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp(2))
        .and_then(|d| d.to_f64())
        .unwrap_or(value)
}

/// `part / whole` as a percentage, or 0 when `whole` is 0.
fn percent_of(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    part / whole * 100.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategorySpending {
    /// Mean absolute amount of one expense in the category.
    pub average_amount: f64,
    pub percentage_of_total: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HistoricalAnalysis {
    pub categories: BTreeMap<Category, CategorySpending>,
    pub total_expenses: f64,
}

/// Groups every expense by category and derives its mean and share.
pub fn analyze_historical_spending(transactions: &[Transaction]) -> HistoricalAnalysis {
    let mut amounts: BTreeMap<Category, Vec<f64>> = BTreeMap::new();
    for tx in transactions.iter().filter(|t| t.is_expense()) {
        amounts
            .entry(tx.category_or_other())
            .or_default()
            .push(tx.amount.abs());
    }

    let total: f64 = amounts.values().flatten().sum();

    let categories = amounts
        .into_iter()
        .map(|(category, values)| {
            let sum: f64 = values.iter().sum();
            let spending = CategorySpending {
                average_amount: round2(sum / values.len() as f64),
                percentage_of_total: round2(percent_of(sum, total)),
            };
            (category, spending)
        })
        .collect();

    HistoricalAnalysis {
        categories,
        total_expenses: round2(total),
    }
}

/// Per-category spending ceilings plus a savings target, which is kept apart
/// from the category limits.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BudgetTemplate {
    pub limits: BTreeMap<Category, f64>,
    pub savings_goal: f64,
}

impl BudgetTemplate {
    /// Sum of all limits including the savings goal.
    pub fn total(&self) -> f64 {
        self.limits.values().sum::<f64>() + self.savings_goal
    }
}

pub fn create_budget_template(analysis: &HistoricalAnalysis, policy: &BudgetPolicy) -> BudgetTemplate {
    let limits = analysis
        .categories
        .iter()
        .map(|(&category, spending)| (category, round2(spending.average_amount * policy.limit_ratio)))
        .collect();

    BudgetTemplate {
        limits,
        savings_goal: round2(analysis.total_expenses * policy.savings_ratio),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recommendation {
    WithinBudget,
    OverBudget,
    ReduceSpending { category: Category, excess_percent: f64 },
    SavingsGoal { amount: f64 },
    TopSpending { category: Category, amount: f64 },
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recommendation::WithinBudget => write!(f, "You are within budget"),
            Recommendation::OverBudget => write!(f, "Overall budget exceeded"),
            Recommendation::ReduceSpending { category, excess_percent } => {
                write!(f, "Try cutting spending on {category} by {excess_percent:.0}%")
            }
            Recommendation::SavingsGoal { amount } => {
                write!(f, "Goal: save {amount:.0} by the end of the month")
            }
            Recommendation::TopSpending { category, amount } => {
                write!(f, "Largest spending is in '{category}': {amount:.2}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetComparison {
    pub recommendations: Vec<Recommendation>,
    pub total_budget: f64,
    pub total_actual: f64,
    pub savings_goal: f64,
}

/// Overage of `actual` over `limit` in percent. A zero limit yields 0.
pub fn excess_percent(actual: f64, limit: f64) -> f64 {
    percent_of(actual - limit, limit)
}

/// Checks fresh spending against a template. The first recommendation is the
/// overall verdict; one `ReduceSpending` follows per category over its limit.
pub fn compare_budget_vs_actual(budget: &BudgetTemplate, transactions: &[Transaction]) -> BudgetComparison {
    let mut actual: BTreeMap<Category, f64> = BTreeMap::new();
    for tx in transactions.iter().filter(|t| t.is_expense()) {
        *actual.entry(tx.category_or_other()).or_insert(0.0) += tx.amount.abs();
    }

    let total_budget = budget.total();
    let total_actual: f64 = actual.values().sum();

    let mut recommendations = vec![if total_actual <= total_budget {
        Recommendation::WithinBudget
    } else {
        Recommendation::OverBudget
    }];

    for (&category, &limit) in &budget.limits {
        let spent = actual.get(&category).copied().unwrap_or(0.0);
        if spent > limit {
            recommendations.push(Recommendation::ReduceSpending {
                category,
                excess_percent: excess_percent(spent, limit),
            });
        }
    }

    if budget.savings_goal > 0.0 {
        recommendations.push(Recommendation::SavingsGoal {
            amount: budget.savings_goal,
        });
    }

    tracing::debug!(
        "Budget {:.2} vs actual {:.2}: {} recommendations",
        total_budget,
        total_actual,
        recommendations.len()
    );

    BudgetComparison {
        recommendations,
        total_budget: round2(total_budget),
        total_actual: round2(total_actual),
        savings_goal: budget.savings_goal,
    }
}

/// Splits a batch at its latest `YYYY-MM`: returns that month, every
/// earlier transaction and the latest month's transactions. `None` when
/// fewer than two months are present. Undated transactions are left out.
pub fn split_latest_month(
    transactions: &[Transaction],
) -> Option<(String, Vec<Transaction>, Vec<Transaction>)> {
    let latest = transactions.iter().filter_map(Transaction::month_key).max()?;
    let (current, earlier): (Vec<Transaction>, Vec<Transaction>) = transactions
        .iter()
        .filter(|tx| tx.month_key().is_some())
        .cloned()
        .partition(|tx| tx.month_key().as_deref() == Some(latest.as_str()));

    if earlier.is_empty() {
        return None;
    }
    Some((latest, earlier, current))
}

/// Points at the category with the largest absolute expense sum.
pub fn top_spending(category_stats: &CategoryStats) -> Option<Recommendation> {
    category_stats
        .expenses_ranked()
        .first()
        .map(|&(category, amount)| Recommendation::TopSpending {
            category,
            amount: amount.abs(),
        })
}
