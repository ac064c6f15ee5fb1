pub mod category;
pub mod config;
pub mod transaction;

pub use category::{Category, Taxonomy, UnknownCategory};
pub use config::{AnalysisConfig, BudgetPolicy, ConfigError};
pub use transaction::{Transaction, TransactionType, DEFAULT_DESCRIPTION};
