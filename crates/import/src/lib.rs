pub mod categorizer;
pub mod csv;
pub mod importer;
pub mod json;
pub mod normalize;
pub mod sample;

pub use categorizer::{CategorizationSummary, Categorizer, CategoryTally};
pub use importer::{import_financial_data, try_import, FileFormat, ImportError};
pub use normalize::{normalize, normalize_date, parse_amount, RawRecord, SourceKind};
pub use sample::sample_transactions;
