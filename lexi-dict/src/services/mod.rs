//! Bulk CSV import
//!
//! `import_parser` turns an upload into normalized rows without touching
//! storage; `reconciler` persists those rows in one transaction.

pub mod import_parser;
pub mod reconciler;

pub use import_parser::{parse_import, validate_upload, ImportRow, ImportRows, IMPORT_COLUMNS};
pub use reconciler::{ImportSummary, Reconciler};

use lexi_common::ValidationError;
use thiserror::Error;

/// Import failure kinds
///
/// Every variant is fatal to the whole file; none leaves partial writes.
#[derive(Debug, Error)]
pub enum ImportError {
    /// Filename or size rejected before parsing
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),

    /// Header row is not one of the accepted column layouts
    #[error("Unsupported columns [{}]; expected [{}]", .columns.join(", "), IMPORT_COLUMNS.join(", "))]
    SchemaMismatch { columns: Vec<String> },

    /// At least one cell is empty or missing
    #[error("Incomplete data: row {row} has no value for column '{column}'")]
    IncompleteData { row: usize, column: String },

    /// Bytes could not be decoded as CSV
    #[error("Malformed CSV file: {0}")]
    MalformedFile(String),

    /// A language created by the import failed validation
    #[error("Invalid language data in row {row}: {source}")]
    InvalidLanguageData { row: usize, source: ValidationError },

    /// A word, hint or translation failed validation
    #[error("Invalid word data in row {row}: {source}")]
    InvalidWordData { row: usize, source: ValidationError },

    /// Storage failure during reconciliation
    #[error("Storage error during import: {0}")]
    Storage(#[from] lexi_common::Error),
}

impl From<sqlx::Error> for ImportError {
    fn from(err: sqlx::Error) -> Self {
        ImportError::Storage(lexi_common::Error::Database(err))
    }
}

impl ImportError {
    /// Stable machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            ImportError::InvalidUpload(_) => "INVALID_UPLOAD",
            ImportError::SchemaMismatch { .. } => "SCHEMA_MISMATCH",
            ImportError::IncompleteData { .. } => "INCOMPLETE_DATA",
            ImportError::MalformedFile(_) => "MALFORMED_FILE",
            ImportError::InvalidLanguageData { .. } => "INVALID_LANGUAGE_DATA",
            ImportError::InvalidWordData { .. } => "INVALID_WORD_DATA",
            ImportError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Whether the failure was caused by the uploaded content
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ImportError::Storage(_))
    }
}
