pub mod budget;
pub mod pipeline;
pub mod stats;

pub use budget::{
    analyze_historical_spending, compare_budget_vs_actual, create_budget_template,
    split_latest_month, top_spending, BudgetComparison, BudgetTemplate, CategorySpending,
    HistoricalAnalysis, Recommendation,
};
pub use pipeline::{Analysis, MonthCheck, Pipeline, Report};
pub use stats::{calculate_basic_stats, calculate_by_category, BasicStats, CategoryStats, MonthlyStats};
