//! Language persistence
//!
//! Names are matched case-insensitively through the `name_key` column.

use std::collections::HashSet;

use lexi_common::models::{Language, NewLanguage};
use lexi_common::text::name_key;
use lexi_common::time::{from_db_timestamp, now, to_db_timestamp};
use lexi_common::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use uuid::Uuid;

use super::parse_guid;

fn language_from_row(row: &SqliteRow) -> Result<Language> {
    Ok(Language {
        id: parse_guid(&row.try_get::<String, _>("guid")?)?,
        user_id: parse_guid(&row.try_get::<String, _>("user_id")?)?,
        name: row.try_get("name")?,
        created_at: from_db_timestamp(&row.try_get::<String, _>("created_at")?)?,
    })
}

/// Insert a language candidate
///
/// Callers validate first; a case-insensitive duplicate surfaces as a
/// unique-constraint error (see [`super::is_unique_violation`]).
pub async fn insert_language(conn: &mut SqliteConnection, new: &NewLanguage) -> Result<Language> {
    let language = Language {
        id: Uuid::new_v4(),
        user_id: new.user_id,
        name: new.name.clone(),
        created_at: now(),
    };

    sqlx::query(
        "INSERT INTO languages (guid, user_id, name, name_key, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(language.id.to_string())
    .bind(language.user_id.to_string())
    .bind(&language.name)
    .bind(new.name_key())
    .bind(to_db_timestamp(language.created_at))
    .execute(&mut *conn)
    .await?;

    Ok(language)
}

/// Load a language by id regardless of owner
pub async fn find_language(conn: &mut SqliteConnection, id: Uuid) -> Result<Option<Language>> {
    let row = sqlx::query("SELECT guid, user_id, name, created_at FROM languages WHERE guid = ?")
        .bind(id.to_string())
        .fetch_optional(&mut *conn)
        .await?;

    row.as_ref().map(language_from_row).transpose()
}

/// Case-insensitive lookup of one user's language by name
pub async fn find_language_by_name(
    conn: &mut SqliteConnection,
    user_id: Uuid,
    name: &str,
) -> Result<Option<Language>> {
    let row = sqlx::query(
        "SELECT guid, user_id, name, created_at FROM languages WHERE user_id = ? AND name_key = ?",
    )
    .bind(user_id.to_string())
    .bind(name_key(name))
    .fetch_optional(&mut *conn)
    .await?;

    row.as_ref().map(language_from_row).transpose()
}

/// Name keys of every language the user owns
pub async fn language_name_keys(
    conn: &mut SqliteConnection,
    user_id: Uuid,
) -> Result<HashSet<String>> {
    let keys: Vec<String> = sqlx::query_scalar("SELECT name_key FROM languages WHERE user_id = ?")
        .bind(user_id.to_string())
        .fetch_all(&mut *conn)
        .await?;

    Ok(keys.into_iter().collect())
}

/// Whether the user already has a language with this name (ignoring case)
///
/// `except` excludes one language, so a rename to a case variant of its own
/// name is allowed.
pub async fn name_taken(
    conn: &mut SqliteConnection,
    user_id: Uuid,
    name: &str,
    except: Option<Uuid>,
) -> Result<bool> {
    let taken: bool = sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM languages WHERE user_id = ? AND name_key = ? AND guid != ?)",
    )
    .bind(user_id.to_string())
    .bind(name_key(name))
    .bind(except.map(|id| id.to_string()).unwrap_or_default())
    .fetch_one(&mut *conn)
    .await?;

    Ok(taken)
}

pub async fn count_languages(conn: &mut SqliteConnection, user_id: Uuid) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM languages WHERE user_id = ?")
        .bind(user_id.to_string())
        .fetch_one(&mut *conn)
        .await?;

    Ok(count)
}

/// One page of the user's languages, newest first
pub async fn list_languages(
    conn: &mut SqliteConnection,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<Language>> {
    let rows = sqlx::query(
        r#"
        SELECT guid, user_id, name, created_at
        FROM languages
        WHERE user_id = ?
        ORDER BY created_at DESC, rowid DESC
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(user_id.to_string())
    .bind(limit)
    .bind(offset)
    .fetch_all(&mut *conn)
    .await?;

    rows.iter().map(language_from_row).collect()
}

/// All of the user's languages, newest first
pub async fn all_languages(conn: &mut SqliteConnection, user_id: Uuid) -> Result<Vec<Language>> {
    let rows = sqlx::query(
        r#"
        SELECT guid, user_id, name, created_at
        FROM languages
        WHERE user_id = ?
        ORDER BY created_at DESC, rowid DESC
        "#,
    )
    .bind(user_id.to_string())
    .fetch_all(&mut *conn)
    .await?;

    rows.iter().map(language_from_row).collect()
}

pub async fn rename_language(conn: &mut SqliteConnection, id: Uuid, name: &str) -> Result<()> {
    sqlx::query("UPDATE languages SET name = ?, name_key = ? WHERE guid = ?")
        .bind(name)
        .bind(name_key(name))
        .bind(id.to_string())
        .execute(&mut *conn)
        .await?;

    Ok(())
}

/// Delete a language; words and translations referencing it cascade
pub async fn delete_language(conn: &mut SqliteConnection, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM languages WHERE guid = ?")
        .bind(id.to_string())
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}
