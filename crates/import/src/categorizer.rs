use finassist_core::{Category, Taxonomy, Transaction};
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::OnceLock;

fn punctuation() -> &'static Regex {
    static R: OnceLock<Regex> = OnceLock::new();
    R.get_or_init(|| Regex::new(r"[^\w\s]").expect("invalid regex"))
}

/// Both lowercase renderings of a description that keywords are matched
/// against.
struct Haystack {
    lower: String,
    /// `lower` with punctuation replaced by spaces.
    clean: String,
}

impl Haystack {
    fn new(description: &str) -> Self {
        let lower = description.to_lowercase();
        let clean = punctuation().replace_all(&lower, " ").into_owned();
        Self { lower, clean }
    }

    fn contains(&self, needle: &str) -> bool {
        self.lower.contains(needle) || self.clean.contains(needle)
    }
}

/// Assigns exactly one category to a transaction using ordered keyword passes.
pub struct Categorizer {
    taxonomy: Taxonomy,
}

impl Default for Categorizer {
    fn default() -> Self {
        Self::new(Taxonomy::default())
    }
}

impl Categorizer {
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self { taxonomy }
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Inflows are matched against income categories only, outflows against
    /// expense categories only. Ties go to the earliest declared category.
    ///
    /// The all-words pass never finds anything the loose pass missed, since
    /// the loose pass already accepts any single word of a keyword. It is
    /// kept as the documented last resort before `другое`.
    pub fn categorize(&self, description: &str, amount: f64) -> Category {
        let hay = Haystack::new(description);

        if amount >= 0.0 {
            self.match_income(&hay).unwrap_or(Category::OtherIncome)
        } else {
            self.match_expense_loose(&hay)
                .or_else(|| self.match_expense_all_words(&hay))
                .unwrap_or(Category::Other)
        }
    }

    fn match_income(&self, hay: &Haystack) -> Option<Category> {
        self.taxonomy
            .income()
            .find(|(_, keywords)| keywords.iter().any(|kw| hay.contains(kw)))
            .map(|(c, _)| c)
    }

    /// A keyword matches when it, or any single word of it, occurs in the
    /// description.
    fn match_expense_loose(&self, hay: &Haystack) -> Option<Category> {
        self.taxonomy
            .expenses()
            .find(|(_, keywords)| {
                keywords.iter().any(|kw| {
                    hay.contains(kw) || kw.split_whitespace().any(|word| hay.contains(word))
                })
            })
            .map(|(c, _)| c)
    }

    /// Multi-word keywords whose every word occurs in the description.
    fn match_expense_all_words(&self, hay: &Haystack) -> Option<Category> {
        self.taxonomy
            .expenses()
            .find(|(_, keywords)| {
                keywords.iter().any(|kw| {
                    let words: Vec<&str> = kw.split_whitespace().collect();
                    words.len() > 1 && words.iter().all(|w| hay.lower.contains(w))
                })
            })
            .map(|(c, _)| c)
    }

    /// Returns categorized copies; the input is left untouched.
    pub fn categorize_all(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        let categorized: Vec<Transaction> = transactions
            .iter()
            .map(|tx| {
                let category = self.categorize(&tx.description, tx.amount);
                tx.clone().with_category(category)
            })
            .collect();
        tracing::info!("Categorized {} transactions", categorized.len());
        categorized
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryTally {
    pub count: usize,
    /// Signed sum of the amounts.
    pub total_amount: f64,
}

/// How well a categorized set was recognised.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategorizationSummary {
    pub by_category: BTreeMap<Category, CategoryTally>,
    pub total: usize,
    /// Transactions that landed anywhere but `другое`. A transaction that
    /// was never categorized counts as `другое` and so as unrecognized.
    pub recognized: usize,
}

impl CategorizationSummary {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut summary = Self {
            total: transactions.len(),
            ..Self::default()
        };
        for tx in transactions {
            let category = tx.category_or_other();
            let tally = summary.by_category.entry(category).or_default();
            tally.count += 1;
            tally.total_amount += tx.amount;
            if category != Category::Other {
                summary.recognized += 1;
            }
        }
        summary
    }

    pub fn unrecognized(&self) -> usize {
        self.total - self.recognized
    }

    /// Share of recognised transactions in percent; 0 for an empty set.
    pub fn recognition_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.recognized as f64 / self.total as f64 * 100.0
    }
}
