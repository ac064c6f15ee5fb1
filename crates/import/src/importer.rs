use finassist_core::Transaction;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("File not found: {0}")]
    MissingFile(PathBuf),
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("JSON document is neither an object nor an array")]
    NotARecordSet,
}

/// Structural kind of an input file, decided by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Json,
}

impl FileFormat {
    pub fn from_path(path: &Path) -> Result<Self, ImportError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_lowercase();
        match ext.as_str() {
            "csv" => Ok(FileFormat::Csv),
            "json" => Ok(FileFormat::Json),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }

    pub fn read(self, text: &str) -> Result<Vec<Transaction>, ImportError> {
        match self {
            FileFormat::Csv => crate::csv::read_tabular(text),
            FileFormat::Json => crate::json::read_records(text),
        }
    }
}

/// Imports a CSV or JSON file, keeping only transactions with a date and a
/// non-zero amount.
pub fn try_import(path: &Path) -> Result<Vec<Transaction>, ImportError> {
    if !path.exists() {
        return Err(ImportError::MissingFile(path.to_path_buf()));
    }
    let format = FileFormat::from_path(path)?;
    let text = std::fs::read_to_string(path)?;

    let transactions = keep_valid(format.read(&text)?);
    tracing::info!(
        "Successfully imported {} transactions from {}",
        transactions.len(),
        path.display()
    );
    Ok(transactions)
}

/// Like [`try_import`], but every failure is logged and degrades to an empty
/// list. Callers must read an empty result as "no data".
pub fn import_financial_data(path: &Path) -> Vec<Transaction> {
    match try_import(path) {
        Ok(transactions) => transactions,
        Err(e) => {
            tracing::warn!("Import of {} failed: {e}", path.display());
            Vec::new()
        }
    }
}

fn keep_valid(transactions: Vec<Transaction>) -> Vec<Transaction> {
    transactions
        .into_iter()
        .filter(|tx| !tx.date.is_empty() && tx.amount != 0.0)
        .collect()
}
