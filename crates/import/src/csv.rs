use finassist_core::Transaction;

use crate::importer::ImportError;
use crate::normalize::{normalize, RawRecord, SourceKind};

/// Number of leading characters inspected when guessing the delimiter.
const DELIMITER_SAMPLE_CHARS: usize = 1024;

/// `;` if the leading sample contains one, `,` otherwise.
pub fn detect_delimiter(text: &str) -> u8 {
    if text.chars().take(DELIMITER_SAMPLE_CHARS).any(|c| c == ';') {
        b';'
    } else {
        b','
    }
}

/// Splits delimited text into raw records keyed by the lowercased, trimmed
/// header names. Rows shorter or longer than the header are accepted; rows
/// whose values are all blank are skipped.
pub fn parse_records(text: &str) -> Result<Vec<RawRecord>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(detect_delimiter(text))
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result?;
        let record: RawRecord = headers
            .iter()
            .zip(row.iter())
            .map(|(h, v)| (h.as_str(), v))
            .collect();
        if record.is_blank() {
            continue;
        }
        records.push(record);
    }

    Ok(records)
}

/// Parses delimited text and normalizes every row, dropping rows that do not
/// normalize.
pub fn read_tabular(text: &str) -> Result<Vec<Transaction>, ImportError> {
    let records = parse_records(text)?;
    let total = records.len();

    let transactions: Vec<Transaction> = records
        .iter()
        .filter_map(|r| normalize(r, SourceKind::Tabular))
        .collect();

    if transactions.len() < total {
        tracing::debug!(
            "Dropped {} malformed tabular rows",
            total - transactions.len()
        );
    }

    Ok(transactions)
}
