//! Tabular import parser
//!
//! Decodes an uploaded CSV file into normalized [`ImportRow`]s. The whole
//! file is checked before any row is handed out: a header that is not an
//! accepted layout, or any empty cell anywhere, rejects the file.

use lexi_common::text::capitalize;

use super::ImportError;

/// The import column layout
pub const IMPORT_COLUMNS: [&str; 6] = [
    "Word",
    "WordLanguage",
    "Description",
    "Hint",
    "Translation",
    "TranslationLanguage",
];

/// Header layouts the parser accepts (ordered, case-sensitive)
///
/// Every layout must name all of [`IMPORT_COLUMNS`]; layouts may differ in
/// column order.
pub const ACCEPTED_SCHEMAS: &[&[&str]] = &[&IMPORT_COLUMNS];

/// One normalized data row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRow {
    /// 1-based data row number (the header is not counted)
    pub row: usize,
    pub word: String,
    pub word_language: String,
    pub description: String,
    pub hint: String,
    pub translation: String,
    pub translation_language: String,
}

/// Rows of a validated upload, consumed once
#[derive(Debug)]
pub struct ImportRows {
    inner: std::vec::IntoIter<ImportRow>,
}

impl Iterator for ImportRows {
    type Item = ImportRow;

    fn next(&mut self) -> Option<ImportRow> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for ImportRows {}

/// Positions of each field within an accepted header
struct ColumnMap {
    word: usize,
    word_language: usize,
    description: usize,
    hint: usize,
    translation: usize,
    translation_language: usize,
}

impl ColumnMap {
    fn resolve(headers: &[String]) -> Option<Self> {
        let index = |name: &str| headers.iter().position(|h| h == name);
        Some(Self {
            word: index("Word")?,
            word_language: index("WordLanguage")?,
            description: index("Description")?,
            hint: index("Hint")?,
            translation: index("Translation")?,
            translation_language: index("TranslationLanguage")?,
        })
    }
}

/// Check the upload's filename and size before it is parsed
///
/// The trailing extension must be exactly `csv` and the size must be
/// strictly below `max_bytes`.
pub fn validate_upload(filename: &str, size: usize, max_bytes: usize) -> Result<(), ImportError> {
    let extension = filename.rsplit_once('.').map(|(_, ext)| ext);
    if extension != Some("csv") {
        return Err(ImportError::InvalidUpload(format!(
            "File '{}' must have a .csv extension",
            filename
        )));
    }

    if size >= max_bytes {
        return Err(ImportError::InvalidUpload(format!(
            "File size {} is not allowed; it must be under {} bytes",
            size, max_bytes
        )));
    }

    Ok(())
}

fn is_accepted(headers: &[String]) -> bool {
    ACCEPTED_SCHEMAS
        .iter()
        .any(|schema| schema.iter().copied().eq(headers.iter().map(String::as_str)))
}

/// Parse an uploaded CSV file into normalized rows
pub fn parse_import(data: &[u8]) -> Result<ImportRows, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Fields)
        .from_reader(data);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| ImportError::MalformedFile(e.to_string()))?
        .iter()
        .enumerate()
        .map(|(i, h)| {
            if i == 0 {
                h.trim_start_matches('\u{feff}').to_string()
            } else {
                h.to_string()
            }
        })
        .collect();

    if !is_accepted(&headers) {
        return Err(ImportError::SchemaMismatch { columns: headers });
    }
    let columns = ColumnMap::resolve(&headers).ok_or_else(|| ImportError::SchemaMismatch {
        columns: headers.clone(),
    })?;

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let row = i + 1;
        let record = record.map_err(|e| ImportError::MalformedFile(e.to_string()))?;

        if record.len() > headers.len() {
            return Err(ImportError::MalformedFile(format!(
                "row {} has {} cells but the header has {} columns",
                row,
                record.len(),
                headers.len()
            )));
        }

        for (col, name) in headers.iter().enumerate() {
            if record.get(col).map_or(true, str::is_empty) {
                return Err(ImportError::IncompleteData {
                    row,
                    column: name.clone(),
                });
            }
        }

        let cell = |idx: usize| capitalize(record.get(idx).unwrap_or_default());
        rows.push(ImportRow {
            row,
            word: cell(columns.word),
            word_language: cell(columns.word_language),
            description: cell(columns.description),
            hint: cell(columns.hint),
            translation: cell(columns.translation),
            translation_language: cell(columns.translation_language),
        });
    }

    tracing::debug!(rows = rows.len(), "Parsed import file");

    Ok(ImportRows {
        inner: rows.into_iter(),
    })
}
