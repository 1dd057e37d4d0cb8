//! User account persistence

use lexi_common::models::{NewUser, User};
use lexi_common::time::{from_db_timestamp, now, to_db_timestamp};
use lexi_common::Result;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqliteConnection};
use uuid::Uuid;

use super::parse_guid;

fn user_from_row(row: &SqliteRow) -> Result<User> {
    Ok(User {
        id: parse_guid(&row.try_get::<String, _>("guid")?)?,
        username: row.try_get("username")?,
        created_at: from_db_timestamp(&row.try_get::<String, _>("created_at")?)?,
    })
}

/// Insert a validated user with the digest of their API token
pub async fn insert_user(
    conn: &mut SqliteConnection,
    new: &NewUser,
    token_hash: &str,
) -> Result<User> {
    let user = User {
        id: Uuid::new_v4(),
        username: new.username.clone(),
        created_at: now(),
    };

    sqlx::query("INSERT INTO users (guid, username, token_hash, created_at) VALUES (?, ?, ?, ?)")
        .bind(user.id.to_string())
        .bind(&user.username)
        .bind(token_hash)
        .bind(to_db_timestamp(user.created_at))
        .execute(&mut *conn)
        .await?;

    Ok(user)
}

/// Resolve the user holding an API token digest
pub async fn find_user_by_token_hash(
    conn: &mut SqliteConnection,
    token_hash: &str,
) -> Result<Option<User>> {
    let row = sqlx::query("SELECT guid, username, created_at FROM users WHERE token_hash = ?")
        .bind(token_hash)
        .fetch_optional(&mut *conn)
        .await?;

    row.as_ref().map(user_from_row).transpose()
}

pub async fn username_taken(conn: &mut SqliteConnection, username: &str) -> Result<bool> {
    let taken: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = ?)")
        .bind(username)
        .fetch_one(&mut *conn)
        .await?;

    Ok(taken)
}
