//! Word persistence

use lexi_common::models::{NewWord, Word};
use lexi_common::time::{from_db_timestamp, now, to_db_timestamp};
use lexi_common::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use uuid::Uuid;

use super::parse_guid;

fn word_from_row(row: &SqliteRow) -> Result<Word> {
    Ok(Word {
        id: parse_guid(&row.try_get::<String, _>("guid")?)?,
        user_id: parse_guid(&row.try_get::<String, _>("user_id")?)?,
        text: row.try_get("text")?,
        language_id: parse_guid(&row.try_get::<String, _>("language_id")?)?,
        description: row.try_get("description")?,
        created_at: from_db_timestamp(&row.try_get::<String, _>("created_at")?)?,
    })
}

pub async fn insert_word(conn: &mut SqliteConnection, new: &NewWord) -> Result<Word> {
    let word = Word {
        id: Uuid::new_v4(),
        user_id: new.user_id,
        text: new.text.clone(),
        language_id: new.language_id,
        description: new.description.clone(),
        created_at: now(),
    };

    sqlx::query(
        r#"
        INSERT INTO words (guid, user_id, language_id, text, description, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(word.id.to_string())
    .bind(word.user_id.to_string())
    .bind(word.language_id.to_string())
    .bind(&word.text)
    .bind(&word.description)
    .bind(to_db_timestamp(word.created_at))
    .execute(&mut *conn)
    .await?;

    Ok(word)
}

/// Load a word by id regardless of owner
pub async fn find_word(conn: &mut SqliteConnection, id: Uuid) -> Result<Option<Word>> {
    let row = sqlx::query(
        "SELECT guid, user_id, language_id, text, description, created_at FROM words WHERE guid = ?",
    )
    .bind(id.to_string())
    .fetch_optional(&mut *conn)
    .await?;

    row.as_ref().map(word_from_row).transpose()
}

pub async fn count_words(conn: &mut SqliteConnection, user_id: Uuid) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM words WHERE user_id = ?")
        .bind(user_id.to_string())
        .fetch_one(&mut *conn)
        .await?;

    Ok(count)
}

/// One page of the user's words, newest first
pub async fn list_words(
    conn: &mut SqliteConnection,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> Result<Vec<Word>> {
    let rows = sqlx::query(
        r#"
        SELECT guid, user_id, language_id, text, description, created_at
        FROM words
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

    rows.iter().map(word_from_row).collect()
}

pub async fn update_word(
    conn: &mut SqliteConnection,
    id: Uuid,
    text: &str,
    language_id: Uuid,
    description: &str,
) -> Result<()> {
    sqlx::query("UPDATE words SET text = ?, language_id = ?, description = ? WHERE guid = ?")
        .bind(text)
        .bind(language_id.to_string())
        .bind(description)
        .bind(id.to_string())
        .execute(&mut *conn)
        .await?;

    Ok(())
}

/// Delete a word; its hints and translations cascade
pub async fn delete_word(conn: &mut SqliteConnection, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM words WHERE guid = ?")
        .bind(id.to_string())
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}
