use finassist_core::{Category, Transaction};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MonthlyStats {
    pub income: f64,
    /// Signed: zero or negative.
    pub expenses: f64,
    pub balance: f64,
}

/// Headline figures over a transaction set. `largest_expenses` borrows from
/// the set it was computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicStats<'a> {
    pub total_income: f64,
    /// Absolute value of all outflows.
    pub total_expenses: f64,
    pub balance: f64,
    pub transaction_count: usize,
    /// Most negative first.
    pub largest_expenses: Vec<&'a Transaction>,
    /// Keyed by `YYYY-MM`.
    pub monthly: BTreeMap<String, MonthlyStats>,
}

impl BasicStats<'_> {
    /// Balance as a percentage of income, when there was any income.
    pub fn savings_rate(&self) -> Option<f64> {
        (self.total_income > 0.0).then(|| self.balance / self.total_income * 100.0)
    }
}

pub fn calculate_basic_stats(transactions: &[Transaction], top_n: usize) -> BasicStats<'_> {
    let mut income = 0.0;
    let mut expenses = 0.0;
    let mut largest_expenses = Vec::new();
    let mut monthly: BTreeMap<String, MonthlyStats> = BTreeMap::new();

    for tx in transactions {
        if tx.is_income() {
            income += tx.amount;
        } else {
            expenses += tx.amount;
            largest_expenses.push(tx);
        }

        if let Some(month) = tx.month_key() {
            let entry = monthly.entry(month).or_default();
            if tx.is_income() {
                entry.income += tx.amount;
            } else {
                entry.expenses += tx.amount;
            }
            entry.balance = entry.income + entry.expenses;
        }
    }

    largest_expenses.sort_by(|a, b| a.amount.total_cmp(&b.amount));
    largest_expenses.truncate(top_n);

    BasicStats {
        total_income: income,
        total_expenses: expenses.abs(),
        balance: income + expenses,
        transaction_count: transactions.len(),
        largest_expenses,
        monthly,
    }
}

/// Signed sums per category, split by direction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryStats {
    pub expenses_by_category: BTreeMap<Category, f64>,
    pub income_by_category: BTreeMap<Category, f64>,
}

impl CategoryStats {
    /// Percentage of `total_expenses` spent in `category`; 0 when there were
    /// no expenses.
    pub fn expense_share(&self, category: Category, total_expenses: f64) -> f64 {
        if total_expenses == 0.0 {
            return 0.0;
        }
        let spent = self.expenses_by_category.get(&category).copied().unwrap_or(0.0);
        spent.abs() / total_expenses * 100.0
    }

    /// Expense categories, largest spend first.
    pub fn expenses_ranked(&self) -> Vec<(Category, f64)> {
        let mut ranked: Vec<(Category, f64)> = self
            .expenses_by_category
            .iter()
            .map(|(&c, &amount)| (c, amount))
            .collect();
        ranked.sort_by(|a, b| b.1.abs().total_cmp(&a.1.abs()));
        ranked
    }
}

/// Transactions without a category are counted under `другое`.
pub fn calculate_by_category(transactions: &[Transaction]) -> CategoryStats {
    let mut stats = CategoryStats::default();
    for tx in transactions {
        let bucket = if tx.is_expense() {
            &mut stats.expenses_by_category
        } else {
            &mut stats.income_by_category
        };
        *bucket.entry(tx.category_or_other()).or_insert(0.0) += tx.amount;
    }
    stats
}
