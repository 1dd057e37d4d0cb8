//! Dictionary overview

use axum::{extract::State, Json};
use lexi_common::models::{Language, Word};
use serde::Serialize;

use super::auth::CurrentUser;
use crate::db::{languages, words};
use crate::error::ApiResult;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct DictionaryIndex {
    pub recent_words: Vec<Word>,
    pub languages: Vec<Language>,
}

/// GET /api/dictionary
///
/// The caller's newest words (up to `recent_word_count`) and all of their
/// languages, newest first.
pub async fn index(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Json<DictionaryIndex>> {
    let mut conn = state.db.acquire().await?;

    let recent_words =
        words::list_words(&mut conn, user.id, state.settings.recent_word_count, 0).await?;
    let languages = languages::all_languages(&mut conn, user.id).await?;

    Ok(Json(DictionaryIndex {
        recent_words,
        languages,
    }))
}
