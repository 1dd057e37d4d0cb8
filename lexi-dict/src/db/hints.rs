//! Hint persistence

use lexi_common::models::{Hint, NewHint};
use lexi_common::time::{from_db_timestamp, now, to_db_timestamp};
use lexi_common::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use uuid::Uuid;

use super::parse_guid;

fn hint_from_row(row: &SqliteRow) -> Result<Hint> {
    Ok(Hint {
        id: parse_guid(&row.try_get::<String, _>("guid")?)?,
        user_id: parse_guid(&row.try_get::<String, _>("user_id")?)?,
        word_id: parse_guid(&row.try_get::<String, _>("word_id")?)?,
        text: row.try_get("text")?,
        created_at: from_db_timestamp(&row.try_get::<String, _>("created_at")?)?,
    })
}

pub async fn insert_hint(conn: &mut SqliteConnection, new: &NewHint) -> Result<Hint> {
    let hint = Hint {
        id: Uuid::new_v4(),
        user_id: new.user_id,
        word_id: new.word_id,
        text: new.text.clone(),
        created_at: now(),
    };

    sqlx::query(
        "INSERT INTO hints (guid, user_id, word_id, text, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(hint.id.to_string())
    .bind(hint.user_id.to_string())
    .bind(hint.word_id.to_string())
    .bind(&hint.text)
    .bind(to_db_timestamp(hint.created_at))
    .execute(&mut *conn)
    .await?;

    Ok(hint)
}

/// Hints of a word owned by `user_id`, oldest first
pub async fn hints_for_word(
    conn: &mut SqliteConnection,
    user_id: Uuid,
    word_id: Uuid,
) -> Result<Vec<Hint>> {
    let rows = sqlx::query(
        r#"
        SELECT guid, user_id, word_id, text, created_at
        FROM hints
        WHERE word_id = ? AND user_id = ?
        ORDER BY created_at, rowid
        "#,
    )
    .bind(word_id.to_string())
    .bind(user_id.to_string())
    .fetch_all(&mut *conn)
    .await?;

    rows.iter().map(hint_from_row).collect()
}

pub async fn update_hint(conn: &mut SqliteConnection, id: Uuid, text: &str) -> Result<()> {
    sqlx::query("UPDATE hints SET text = ? WHERE guid = ?")
        .bind(text)
        .bind(id.to_string())
        .execute(&mut *conn)
        .await?;

    Ok(())
}
