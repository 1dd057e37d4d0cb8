//! Import reconciliation
//!
//! Persists parsed import rows for one user inside a single transaction.
//! Languages named by a row are reused when the user already has them
//! (ignoring case) and created otherwise.

use std::collections::HashSet;

use lexi_common::models::{Language, NewHint, NewLanguage, NewTranslation, NewWord};
use lexi_common::text::name_key;
use lexi_common::{Error, ValidationError};
use sqlx::{Pool, Sqlite, SqliteConnection};
use uuid::Uuid;

use super::import_parser::{ImportRow, ImportRows};
use super::ImportError;
use crate::db::{hints, languages, translations, words};

/// Outcome of a committed import
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    /// Rows turned into a word, hint and translation
    pub rows_applied: usize,
    /// Languages that did not exist before the import
    pub languages_created: usize,
}

/// Import reconciler
pub struct Reconciler {
    db: Pool<Sqlite>,
}

impl Reconciler {
    pub fn new(db: Pool<Sqlite>) -> Self {
        Self { db }
    }

    /// Apply every row for `user_id`, or none of them
    ///
    /// **Algorithm:**
    /// 1. Begin transaction, snapshot the user's language name keys
    /// 2. For each row: ensure both languages exist, then insert the word,
    ///    its hint and its translation
    /// 3. Commit if every row succeeded, otherwise roll back and return the
    ///    first failure
    pub async fn import(
        &self,
        user_id: Uuid,
        rows: ImportRows,
    ) -> Result<ImportSummary, ImportError> {
        tracing::debug!(user_id = %user_id, rows = rows.len(), "Reconciling import");

        let mut tx = self.db.begin().await?;

        match apply_rows(&mut *tx, user_id, rows).await {
            Ok(summary) => {
                tx.commit().await?;

                tracing::info!(
                    user_id = %user_id,
                    rows_applied = summary.rows_applied,
                    languages_created = summary.languages_created,
                    "Import complete"
                );

                Ok(summary)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!(error = %rollback_err, "Import rollback failed");
                }

                tracing::warn!(
                    user_id = %user_id,
                    code = err.code(),
                    error = %err,
                    "Import rejected, nothing persisted"
                );

                Err(err)
            }
        }
    }
}

async fn apply_rows(
    conn: &mut SqliteConnection,
    user_id: Uuid,
    rows: ImportRows,
) -> Result<ImportSummary, ImportError> {
    let mut known = languages::language_name_keys(conn, user_id).await?;
    let mut summary = ImportSummary {
        rows_applied: 0,
        languages_created: 0,
    };

    for row in rows {
        for name in [&row.word_language, &row.translation_language] {
            if ensure_language(conn, user_id, name, row.row, &mut known).await? {
                summary.languages_created += 1;
            }
        }

        let word_language = resolve_language(conn, user_id, &row.word_language).await?;
        let translation_language =
            resolve_language(conn, user_id, &row.translation_language).await?;

        apply_row(conn, user_id, &row, &word_language, &translation_language).await?;
        summary.rows_applied += 1;
    }

    Ok(summary)
}

/// Make sure the user has a language called `name`; returns true if created
async fn ensure_language(
    conn: &mut SqliteConnection,
    user_id: Uuid,
    name: &str,
    row: usize,
    known: &mut HashSet<String>,
) -> Result<bool, ImportError> {
    let key = name_key(name);
    if known.contains(&key) {
        return Ok(false);
    }

    if languages::find_language_by_name(conn, user_id, name)
        .await?
        .is_some()
    {
        known.insert(key);
        return Ok(false);
    }

    let candidate = NewLanguage::new(user_id, name);
    candidate
        .validate()
        .map_err(|source| ImportError::InvalidLanguageData { row, source })?;

    let language = languages::insert_language(conn, &candidate).await?;
    tracing::debug!(row, language_id = %language.id, name = %language.name, "Created language");

    known.insert(key);
    Ok(true)
}

async fn resolve_language(
    conn: &mut SqliteConnection,
    user_id: Uuid,
    name: &str,
) -> Result<Language, ImportError> {
    languages::find_language_by_name(conn, user_id, name)
        .await?
        .ok_or_else(|| {
            ImportError::Storage(Error::Internal(format!(
                "Language '{}' missing after it was ensured",
                name
            )))
        })
}

async fn apply_row(
    conn: &mut SqliteConnection,
    user_id: Uuid,
    row: &ImportRow,
    word_language: &Language,
    translation_language: &Language,
) -> Result<(), ImportError> {
    let invalid = |source: ValidationError| ImportError::InvalidWordData {
        row: row.row,
        source,
    };

    let new_word = NewWord {
        user_id,
        text: row.word.clone(),
        language_id: word_language.id,
        description: row.description.clone(),
    };
    new_word.validate().map_err(invalid)?;
    let word = words::insert_word(conn, &new_word).await?;

    let new_hint = NewHint {
        user_id,
        word_id: word.id,
        text: row.hint.clone(),
    };
    new_hint.validate().map_err(invalid)?;
    hints::insert_hint(conn, &new_hint).await?;

    let new_translation = NewTranslation {
        user_id,
        word_id: word.id,
        language_id: translation_language.id,
        text: row.translation.clone(),
    };
    new_translation.validate().map_err(invalid)?;
    translations::insert_translation(conn, &new_translation).await?;

    Ok(())
}
