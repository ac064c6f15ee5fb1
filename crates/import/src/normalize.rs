//! Maps one raw record with arbitrary field names onto a canonical
//! [`Transaction`].

use chrono::NaiveDate;
use finassist_core::{Transaction, DEFAULT_DESCRIPTION};
use std::collections::HashMap;

/// Where a raw record came from. Field aliases and direction vocabularies
/// differ between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Delimiter-separated rows with a header line.
    Tabular,
    /// Objects from a structured document.
    Record,
}

struct FieldAliases {
    date: &'static [&'static str],
    amount: &'static [&'static str],
    description: &'static [&'static str],
    direction: &'static [&'static str],
    debit_tokens: &'static [&'static str],
    credit_tokens: &'static [&'static str],
}

const TABULAR_ALIASES: FieldAliases = FieldAliases {
    date: &["date", "дата", "data", "transaction_date"],
    amount: &["amount", "сумма", "sum", "transaction_amount"],
    description: &["description", "описание", "comment", "назначение", "merchant"],
    direction: &["type", "тип", "debit/credit"],
    debit_tokens: &["debit", "расход", "списание", "-"],
    credit_tokens: &["credit", "доход", "пополнение", "+"],
};

const RECORD_ALIASES: FieldAliases = FieldAliases {
    date: &["date", "дата", "transactionDate", "timestamp"],
    amount: &["amount", "сумма", "sum", "value"],
    description: &["description", "описание", "comment", "message", "details"],
    direction: &["type"],
    debit_tokens: &["debit", "expense", "расход", "outcome"],
    credit_tokens: &["credit", "income", "доход", "revenue"],
};

impl SourceKind {
    fn aliases(self) -> &'static FieldAliases {
        match self {
            SourceKind::Tabular => &TABULAR_ALIASES,
            SourceKind::Record => &RECORD_ALIASES,
        }
    }
}

/// Date patterns in priority order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y", "%m/%d/%Y", "%Y.%m.%d"];

/// Field name to raw textual value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
    fields: HashMap<String, String>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// True when every value is blank.
    pub fn is_blank(&self) -> bool {
        self.fields.values().all(|v| v.trim().is_empty())
    }

    /// First alias holding a non-empty value.
    fn first_present(&self, aliases: &[&str]) -> Option<&str> {
        aliases
            .iter()
            .filter_map(|alias| self.get(alias))
            .find(|value| !value.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Normalizes one record, or returns `None` when it has no date or no usable
/// amount.
pub fn normalize(record: &RawRecord, kind: SourceKind) -> Option<Transaction> {
    let aliases = kind.aliases();

    let date = normalize_date(record.first_present(aliases.date)?);
    if date.is_empty() {
        return None;
    }

    let amount = parse_amount(record.first_present(aliases.amount)?)?;
    let amount = apply_direction(amount, record.first_present(aliases.direction), aliases);

    let description = record
        .first_present(aliases.description)
        .unwrap_or(DEFAULT_DESCRIPTION);

    Some(Transaction::new(date, amount, description))
}

/// Reformats a date to `YYYY-MM-DD`. Any time-of-day suffix after the first
/// space is dropped. A value no pattern accepts is returned as is.
pub fn normalize_date(raw: &str) -> String {
    let token = raw.trim().split(' ').next().unwrap_or_default();

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(token, fmt).ok())
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| token.to_string())
}

/// Parses an amount that may use `,` as the decimal separator and spaces as
/// thousands separators.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if !is_numeric(&cleaned) {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

fn is_numeric(s: &str) -> bool {
    let body = s.strip_prefix('-').unwrap_or(s);
    let digits = body.chars().filter(char::is_ascii_digit).count();
    let dots = body.chars().filter(|&c| c == '.').count();
    digits > 0 && dots <= 1 && digits + dots == body.chars().count()
}

fn apply_direction(amount: f64, direction: Option<&str>, aliases: &FieldAliases) -> f64 {
    let Some(direction) = direction else {
        return amount;
    };
    let direction = direction.to_lowercase();

    if aliases.debit_tokens.iter().any(|t| direction.contains(t)) {
        -amount.abs()
    } else if aliases.credit_tokens.iter().any(|t| direction.contains(t)) {
        amount.abs()
    } else {
        amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finassist_core::TransactionType;

    fn record(pairs: &[(&str, &str)]) -> RawRecord {
        pairs.iter().map(|&(k, v)| (k, v)).collect()
    }

    // ── normalize_date ────────────────────────────────────────────────────────

    #[test]
    fn iso_date_is_unchanged() {
        assert_eq!(normalize_date("2024-01-15"), "2024-01-15");
    }

    #[test]
    fn dotted_day_first() {
        assert_eq!(normalize_date("15.01.2024"), "2024-01-15");
    }

    #[test]
    fn slash_prefers_day_first() {
        assert_eq!(normalize_date("03/04/2024"), "2024-04-03");
    }

    #[test]
    fn slash_falls_back_to_month_first() {
        assert_eq!(normalize_date("01/15/2024"), "2024-01-15");
    }

    #[test]
    fn dotted_year_first() {
        assert_eq!(normalize_date("2024.01.15"), "2024-01-15");
    }

    #[test]
    fn time_suffix_is_dropped() {
        assert_eq!(normalize_date("15.01.2024 13:45:00"), "2024-01-15");
    }

    #[test]
    fn unparseable_date_is_kept() {
        assert_eq!(normalize_date("  yesterday "), "yesterday");
    }

    // ── parse_amount ──────────────────────────────────────────────────────────

    #[test]
    fn amount_with_comma_and_spaces() {
        assert_eq!(parse_amount("1 234,50"), Some(1234.5));
    }

    #[test]
    fn amount_with_non_breaking_space() {
        assert_eq!(parse_amount("12\u{a0}000"), Some(12000.0));
    }

    #[test]
    fn negative_amount() {
        assert_eq!(parse_amount("-50.25"), Some(-50.25));
    }

    #[test]
    fn amount_rejects_garbage() {
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("$10"), None);
        assert_eq!(parse_amount("1.2.3"), None);
        assert_eq!(parse_amount("1,234.50"), None);
        assert_eq!(parse_amount("-"), None);
        assert_eq!(parse_amount("."), None);
        assert_eq!(parse_amount("1-2"), None);
        assert_eq!(parse_amount(""), None);
    }

    // ── normalize ─────────────────────────────────────────────────────────────

    #[test]
    fn russian_expense_record() {
        let raw = record(&[("date", "15.01.2024"), ("amount", "1 234,50"), ("type", "расход")]);
        let tx = normalize(&raw, SourceKind::Record).unwrap();
        assert_eq!(tx.date, "2024-01-15");
        assert_eq!(tx.amount, -1234.5);
        assert_eq!(tx.kind, TransactionType::Expense);
        assert_eq!(tx.description, DEFAULT_DESCRIPTION);
    }

    #[test]
    fn tabular_aliases_in_russian() {
        let raw = record(&[
            ("дата", "2024-02-01"),
            ("сумма", "500"),
            ("тип", "Списание"),
            ("назначение", "Аптека"),
        ]);
        let tx = normalize(&raw, SourceKind::Tabular).unwrap();
        assert_eq!(tx.amount, -500.0);
        assert_eq!(tx.description, "Аптека");
    }

    #[test]
    fn credit_forces_positive() {
        let raw = record(&[("date", "2024-02-01"), ("amount", "-75"), ("debit/credit", "credit")]);
        let tx = normalize(&raw, SourceKind::Tabular).unwrap();
        assert_eq!(tx.amount, 75.0);
        assert_eq!(tx.kind, TransactionType::Income);
    }

    #[test]
    fn unknown_direction_keeps_sign() {
        let raw = record(&[("date", "2024-02-01"), ("amount", "-75"), ("type", "transfer")]);
        assert_eq!(normalize(&raw, SourceKind::Record).unwrap().amount, -75.0);
    }

    #[test]
    fn record_direction_vocabulary_differs_from_tabular() {
        let raw = record(&[("date", "2024-02-01"), ("amount", "75"), ("type", "outcome")]);
        assert_eq!(normalize(&raw, SourceKind::Record).unwrap().amount, -75.0);
        assert_eq!(normalize(&raw, SourceKind::Tabular).unwrap().amount, 75.0);
    }

    #[test]
    fn first_non_empty_alias_wins() {
        let raw = record(&[
            ("date", ""),
            ("дата", "2024-03-05"),
            ("amount", "10"),
            ("сумма", "20"),
        ]);
        let tx = normalize(&raw, SourceKind::Tabular).unwrap();
        assert_eq!(tx.date, "2024-03-05");
        assert_eq!(tx.amount, 10.0);
    }

    #[test]
    fn record_keys_are_case_sensitive() {
        let raw = record(&[("transactionDate", "2024-03-05"), ("value", "10")]);
        assert!(normalize(&raw, SourceKind::Record).is_some());
        assert!(normalize(&raw, SourceKind::Tabular).is_none());
    }

    #[test]
    fn missing_date_is_rejected() {
        let raw = record(&[("amount", "10")]);
        assert!(normalize(&raw, SourceKind::Tabular).is_none());
    }

    #[test]
    fn blank_date_is_rejected() {
        let raw = record(&[("date", "   "), ("amount", "10")]);
        assert!(normalize(&raw, SourceKind::Tabular).is_none());
    }

    #[test]
    fn invalid_amount_is_rejected() {
        let raw = record(&[("date", "2024-01-01"), ("amount", "ten")]);
        assert!(normalize(&raw, SourceKind::Tabular).is_none());
    }

    #[test]
    fn type_always_matches_sign() {
        for (amount, direction) in [("5", "доход"), ("5", "расход"), ("-5", ""), ("5", "+")] {
            let raw = record(&[("date", "2024-01-01"), ("amount", amount), ("type", direction)]);
            let tx = normalize(&raw, SourceKind::Tabular).unwrap();
            assert_eq!(tx.kind, TransactionType::from_amount(tx.amount));
        }
    }

    #[test]
    fn blank_record_detection() {
        assert!(record(&[("date", " "), ("amount", "")]).is_blank());
        assert!(!record(&[("date", "x")]).is_blank());
    }
}
