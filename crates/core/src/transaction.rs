use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;

pub const DEFAULT_DESCRIPTION: &str = "No description";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    /// Non-negative amounts are inflows.
    pub fn from_amount(amount: f64) -> Self {
        if amount >= 0.0 {
            TransactionType::Income
        } else {
            TransactionType::Expense
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Income => write!(f, "income"),
            TransactionType::Expense => write!(f, "expense"),
        }
    }
}

/// A normalized transaction. `kind` always agrees with the sign of `amount`;
/// `category` stays empty until the categorizer has seen the transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: String,
    pub amount: f64,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl Transaction {
    pub fn new(date: impl Into<String>, amount: f64, description: impl Into<String>) -> Self {
        let description = description.into();
        Transaction {
            date: date.into(),
            amount,
            description: if description.is_empty() {
                DEFAULT_DESCRIPTION.to_string()
            } else {
                description
            },
            kind: TransactionType::from_amount(amount),
            category: None,
        }
    }

    pub fn with_category(self, category: Category) -> Self {
        Transaction {
            category: Some(category),
            ..self
        }
    }

    pub fn is_income(&self) -> bool {
        self.amount >= 0.0
    }

    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    /// The category, or `другое` when the transaction was never categorized.
    pub fn category_or_other(&self) -> Category {
        self.category.unwrap_or(Category::Other)
    }

    /// `YYYY-MM` prefix of the date, if the date is long enough to have one.
    pub fn month_key(&self) -> Option<String> {
        let key: String = self.date.chars().take(7).collect();
        (key.chars().count() == 7).then_some(key)
    }
}
