use finassist_core::Transaction;
use serde_json::{Map, Value};

use crate::importer::ImportError;
use crate::normalize::{normalize, RawRecord, SourceKind};

/// Converts one JSON object into a raw record. Strings and non-zero numbers
/// are kept as text. `null`, booleans, numeric zero and nested values are
/// treated as absent, so a later alias can supply the field.
pub fn raw_record(object: &Map<String, Value>) -> RawRecord {
    object
        .iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) if n.as_f64() == Some(0.0) => return None,
                Value::Number(n) => n.to_string(),
                _ => return None,
            };
            Some((key.as_str(), text))
        })
        .collect()
}

/// Parses a JSON document holding either an array of transaction objects or
/// a single object. Elements that are not objects, or do not normalize, are
/// dropped.
pub fn read_records(text: &str) -> Result<Vec<Transaction>, ImportError> {
    let document: Value = serde_json::from_str(text)?;

    let items = match document {
        Value::Array(items) => items,
        object @ Value::Object(_) => vec![object],
        _ => return Err(ImportError::NotARecordSet),
    };
    let total = items.len();

    let transactions: Vec<Transaction> = items
        .iter()
        .filter_map(Value::as_object)
        .map(raw_record)
        .filter_map(|r| normalize(&r, SourceKind::Record))
        .collect();

    if transactions.len() < total {
        tracing::debug!(
            "Dropped {} malformed JSON records",
            total - transactions.len()
        );
    }

    Ok(transactions)
}
