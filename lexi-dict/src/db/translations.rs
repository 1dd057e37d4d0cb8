//! Translation persistence

use lexi_common::models::{NewTranslation, Translation};
use lexi_common::time::{from_db_timestamp, now, to_db_timestamp};
use lexi_common::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use uuid::Uuid;

use super::parse_guid;

fn translation_from_row(row: &SqliteRow) -> Result<Translation> {
    Ok(Translation {
        id: parse_guid(&row.try_get::<String, _>("guid")?)?,
        user_id: parse_guid(&row.try_get::<String, _>("user_id")?)?,
        word_id: parse_guid(&row.try_get::<String, _>("word_id")?)?,
        language_id: parse_guid(&row.try_get::<String, _>("language_id")?)?,
        text: row.try_get("text")?,
        created_at: from_db_timestamp(&row.try_get::<String, _>("created_at")?)?,
    })
}

pub async fn insert_translation(
    conn: &mut SqliteConnection,
    new: &NewTranslation,
) -> Result<Translation> {
    let translation = Translation {
        id: Uuid::new_v4(),
        user_id: new.user_id,
        word_id: new.word_id,
        language_id: new.language_id,
        text: new.text.clone(),
        created_at: now(),
    };

    sqlx::query(
        r#"
        INSERT INTO translations (guid, user_id, word_id, language_id, text, created_at)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(translation.id.to_string())
    .bind(translation.user_id.to_string())
    .bind(translation.word_id.to_string())
    .bind(translation.language_id.to_string())
    .bind(&translation.text)
    .bind(to_db_timestamp(translation.created_at))
    .execute(&mut *conn)
    .await?;

    Ok(translation)
}

/// Translations of a word owned by `user_id`, oldest first
pub async fn translations_for_word(
    conn: &mut SqliteConnection,
    user_id: Uuid,
    word_id: Uuid,
) -> Result<Vec<Translation>> {
    let rows = sqlx::query(
        r#"
        SELECT guid, user_id, word_id, language_id, text, created_at
        FROM translations
        WHERE word_id = ? AND user_id = ?
        ORDER BY created_at, rowid
        "#,
    )
    .bind(word_id.to_string())
    .bind(user_id.to_string())
    .fetch_all(&mut *conn)
    .await?;

    rows.iter().map(translation_from_row).collect()
}

pub async fn update_translation(
    conn: &mut SqliteConnection,
    id: Uuid,
    text: &str,
    language_id: Uuid,
) -> Result<()> {
    sqlx::query("UPDATE translations SET text = ?, language_id = ? WHERE guid = ?")
        .bind(text)
        .bind(language_id.to_string())
        .bind(id.to_string())
        .execute(&mut *conn)
        .await?;

    Ok(())
}
