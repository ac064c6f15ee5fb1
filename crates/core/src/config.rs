use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

use super::category::{Category, Taxonomy, UnknownCategory};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategory),
    #[error("Invalid budget ratio for {name}: {value}")]
    InvalidRatio { name: &'static str, value: f64 },
    #[error("Fallback category '{0}' cannot have keywords")]
    FallbackKeywords(Category),
}

/// How a budget template is derived from historical spending.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetPolicy {
    /// Share of a category's historical mean suggested as its limit.
    pub limit_ratio: f64,
    /// Share of total historical expenses set aside as savings.
    pub savings_ratio: f64,
}

impl Default for BudgetPolicy {
    fn default() -> Self {
        Self {
            limit_ratio: 0.9,
            savings_ratio: 0.1,
        }
    }
}

/// Analysis settings, usually loaded from a `finassist.toml`:
///
/// ```toml
/// largest_expenses = 5
///
/// [budget]
/// limit_ratio = 0.9
/// savings_ratio = 0.1
///
/// [keywords]
/// "еда" = ["вкусвилл"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub largest_expenses: usize,
    pub budget: BudgetPolicy,
    /// Extra keywords keyed by category label.
    pub keywords: BTreeMap<String, Vec<String>>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            largest_expenses: 5,
            budget: BudgetPolicy::default(),
            keywords: BTreeMap::new(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_toml(toml_content: &str) -> Result<Self, ConfigError> {
        let config: AnalysisConfig = toml::from_str(toml_content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let ratios = [
            ("limit_ratio", self.budget.limit_ratio),
            ("savings_ratio", self.budget.savings_ratio),
        ];
        for (name, value) in ratios {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidRatio { name, value });
            }
        }
        for label in self.keywords.keys() {
            let category = label.parse::<Category>()?;
            if category.is_fallback() {
                return Err(ConfigError::FallbackKeywords(category));
            }
        }
        Ok(())
    }

    /// Built-in taxonomy with the configured extra keywords appended.
    /// Labels that do not name a category are skipped.
    pub fn taxonomy(&self) -> Taxonomy {
        let mut taxonomy = Taxonomy::default();
        for (label, words) in &self.keywords {
            if let Ok(category) = label.parse::<Category>() {
                taxonomy.extend(category, words);
            }
        }
        taxonomy
    }
}
