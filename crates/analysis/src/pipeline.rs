use finassist_core::{AnalysisConfig, Transaction};
use finassist_import::{CategorizationSummary, Categorizer};
use serde::Serialize;

use crate::budget::{
    analyze_historical_spending, compare_budget_vs_actual, create_budget_template,
    split_latest_month, top_spending, BudgetComparison, BudgetTemplate, HistoricalAnalysis,
    Recommendation,
};
use crate::stats::{calculate_basic_stats, calculate_by_category, BasicStats, CategoryStats};

/// Runs categorization and every aggregation over one batch of transactions.
pub struct Pipeline {
    config: AnalysisConfig,
    categorizer: Categorizer,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl Pipeline {
    pub fn new(config: AnalysisConfig) -> Self {
        let categorizer = Categorizer::new(config.taxonomy());
        Self { config, categorizer }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn run(&self, transactions: &[Transaction]) -> Analysis {
        let categorized = self.categorizer.categorize_all(transactions);

        let categorization = CategorizationSummary::from_transactions(&categorized);
        let category_stats = calculate_by_category(&categorized);
        let history = analyze_historical_spending(&categorized);
        let budget = create_budget_template(&history, &self.config.budget);
        let latest_month = self.check_latest_month(&categorized);
        let top_spending = top_spending(&category_stats);

        Analysis {
            largest_expenses: self.config.largest_expenses,
            transactions: categorized,
            categorization,
            category_stats,
            history,
            budget,
            latest_month,
            top_spending,
        }
    }

    /// Categorizes `actual` and checks it against a template built from a
    /// different period.
    pub fn compare(&self, budget: &BudgetTemplate, actual: &[Transaction]) -> BudgetComparison {
        compare_budget_vs_actual(budget, &self.categorizer.categorize_all(actual))
    }

    /// Budgets from every month before the latest one and checks the latest
    /// month against it. `categorized` must already carry categories.
    fn check_latest_month(&self, categorized: &[Transaction]) -> Option<MonthCheck> {
        let (month, earlier, current) = split_latest_month(categorized)?;
        let history = analyze_historical_spending(&earlier);
        let budget = create_budget_template(&history, &self.config.budget);
        let comparison = compare_budget_vs_actual(&budget, &current);
        Some(MonthCheck {
            month,
            budget,
            comparison,
        })
    }
}

/// The latest month of a batch checked against the months before it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthCheck {
    /// `YYYY-MM`.
    pub month: String,
    /// Template derived from the earlier months only.
    pub budget: BudgetTemplate,
    pub comparison: BudgetComparison,
}

/// Everything derived from one batch. Owns the categorized transactions so
/// that borrowed snapshots can be taken from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    #[serde(skip)]
    largest_expenses: usize,
    pub transactions: Vec<Transaction>,
    pub categorization: CategorizationSummary,
    pub category_stats: CategoryStats,
    pub history: HistoricalAnalysis,
    /// Template for the next period, derived from the whole batch.
    pub budget: BudgetTemplate,
    /// `None` when the batch covers a single month.
    pub latest_month: Option<MonthCheck>,
    pub top_spending: Option<Recommendation>,
}

impl Analysis {
    pub fn basic_stats(&self) -> BasicStats<'_> {
        calculate_basic_stats(&self.transactions, self.largest_expenses)
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// A serializable view with the basic stats included.
    pub fn report(&self) -> Report<'_> {
        Report {
            basic_stats: self.basic_stats(),
            analysis: self,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub basic_stats: BasicStats<'a>,
    #[serde(flatten)]
    pub analysis: &'a Analysis,
}

#[cfg(test)]
mod tests {
    use super::*;
    use finassist_core::Category;
    use finassist_import::sample_transactions;

    #[test]
    fn sample_pipeline() {
        let analysis = Pipeline::default().run(&sample_transactions());
        assert_eq!(analysis.transactions.len(), 8);
        assert!(analysis.transactions.iter().all(|t| t.category.is_some()));

        let stats = analysis.basic_stats();
        assert_eq!(stats.total_income, 55000.0);
        assert_eq!(stats.total_expenses, 6450.5);
        assert_eq!(stats.balance, 48549.5);
        assert_eq!(stats.largest_expenses.len(), 5);
        assert_eq!(stats.largest_expenses[0].description, "Магнит косметик");

        assert_eq!(analysis.category_stats.expenses_by_category[&Category::Food], -3700.5);
        assert_eq!(analysis.categorization.recognized, 8);
        assert_eq!(analysis.history.total_expenses, 6450.5);
        assert_eq!(analysis.budget.savings_goal, 645.05);
        assert_eq!(
            analysis.top_spending,
            Some(Recommendation::TopSpending {
                category: Category::Food,
                amount: 3700.5,
            })
        );
    }

    #[test]
    fn empty_batch_is_trivial() {
        let analysis = Pipeline::default().run(&[]);
        assert!(analysis.is_empty());
        let stats = analysis.basic_stats();
        assert_eq!(stats.balance, 0.0);
        assert!(analysis.history.categories.is_empty());
        assert_eq!(analysis.latest_month, None);
        assert_eq!(analysis.top_spending, None);
    }

    #[test]
    fn config_controls_top_n() {
        let config = AnalysisConfig {
            largest_expenses: 2,
            ..AnalysisConfig::default()
        };
        let analysis = Pipeline::new(config).run(&sample_transactions());
        assert_eq!(analysis.basic_stats().largest_expenses.len(), 2);
    }

    #[test]
    fn report_serializes() {
        let analysis = Pipeline::default().run(&sample_transactions());
        let value = serde_json::to_value(analysis.report()).unwrap();
        assert_eq!(value["basic_stats"]["transaction_count"], 8);
        assert!(value["transactions"].is_array());
        assert_eq!(value["budget"]["savings_goal"], 645.05);
        assert!(value["latest_month"].is_null());
    }

    #[test]
    fn single_month_has_no_check() {
        let analysis = Pipeline::default().run(&sample_transactions());
        assert_eq!(analysis.latest_month, None);
    }

    #[test]
    fn latest_month_checked_against_earlier_months() {
        let txs = vec![
            Transaction::new("2024-01-05", -100.0, "Такси"),
            Transaction::new("2024-01-06", -100.0, "Аптека"),
            Transaction::new("2024-01-07", -100.0, "Кино"),
            Transaction::new("2024-02-05", -50.0, "Такси"),
            Transaction::new("2024-02-06", -200.0, "Аптека"),
        ];
        let analysis = Pipeline::default().run(&txs);
        let check = analysis.latest_month.unwrap();
        assert_eq!(check.month, "2024-02");
        assert_eq!(check.budget.limits[&Category::Transport], 90.0);
        assert_eq!(check.budget.savings_goal, 30.0);

        let comparison = check.comparison;
        assert_eq!(comparison.total_actual, 250.0);
        assert_eq!(comparison.total_budget, 300.0);
        assert_eq!(comparison.recommendations.len(), 3);
        assert_eq!(comparison.recommendations[0], Recommendation::WithinBudget);
        assert!(matches!(
            comparison.recommendations[1],
            Recommendation::ReduceSpending { category: Category::Health, .. }
        ));
        assert_eq!(comparison.recommendations[2], Recommendation::SavingsGoal { amount: 30.0 });
    }

    #[test]
    fn compare_categorizes_fresh_batch() {
        let pipeline = Pipeline::default();
        let history = pipeline.run(&[
            Transaction::new("2024-01-05", -100.0, "Такси"),
            Transaction::new("2024-01-06", -300.0, "Такси"),
        ]);
        let comparison = pipeline.compare(
            &history.budget,
            &[Transaction::new("2024-02-05", -150.0, "Такси")],
        );
        assert_eq!(
            comparison.recommendations,
            vec![
                Recommendation::WithinBudget,
                Recommendation::SavingsGoal { amount: 40.0 },
            ]
        );
    }
}
