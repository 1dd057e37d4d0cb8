//! Word CRUD handlers
//!
//! A word is always created and edited together with one hint and one
//! translation, inside a single transaction.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use lexi_common::models::{Hint, Language, NewHint, NewTranslation, NewWord, Translation, Word};
use serde::{Deserialize, Serialize};
use sqlx::SqliteConnection;
use tracing::info;
use uuid::Uuid;

use super::auth::{authorize_owner, CurrentUser};
use super::{parse_id, PageQuery};
use crate::db::{hints, languages, translations, words};
use crate::error::{ApiError, ApiResult};
use crate::pagination::{calculate_pagination, parse_page, Page};
use crate::AppState;

/// Word, hint and translation submitted together
#[derive(Debug, Deserialize)]
pub struct WordForm {
    pub word: String,
    pub word_language: Uuid,
    pub description: String,
    pub hint: String,
    pub translation: String,
    pub translation_language: Uuid,
}

impl WordForm {
    fn candidates(&self, user_id: Uuid, word_id: Uuid) -> (NewWord, NewHint, NewTranslation) {
        (
            NewWord {
                user_id,
                text: self.word.trim().to_string(),
                language_id: self.word_language,
                description: self.description.trim().to_string(),
            },
            NewHint {
                user_id,
                word_id,
                text: self.hint.trim().to_string(),
            },
            NewTranslation {
                user_id,
                word_id,
                language_id: self.translation_language,
                text: self.translation.trim().to_string(),
            },
        )
    }
}

#[derive(Debug, Serialize)]
pub struct WordDetail {
    pub word: Word,
    pub language: Language,
    pub hints: Vec<Hint>,
    pub translations: Vec<Translation>,
}

async fn owned_word(conn: &mut SqliteConnection, id: Uuid, user: &CurrentUser) -> ApiResult<Word> {
    let word = words::find_word(conn, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Word {} not found", id)))?;
    authorize_owner(word.user_id, user)?;
    Ok(word)
}

/// Language chosen in a form must be one of the caller's own
async fn form_language(
    conn: &mut SqliteConnection,
    id: Uuid,
    user: &CurrentUser,
    field: &str,
) -> ApiResult<Language> {
    match languages::find_language(conn, id).await? {
        Some(language) if language.user_id == user.id => Ok(language),
        _ => Err(ApiError::BadRequest(format!(
            "Select a valid choice for {}; that language is not available",
            field
        ))),
    }
}

async fn word_detail_for(
    conn: &mut SqliteConnection,
    word: Word,
    user: &CurrentUser,
) -> ApiResult<WordDetail> {
    let language = languages::find_language(conn, word.language_id)
        .await?
        .ok_or_else(|| ApiError::Internal(format!("Word {} has no language", word.id)))?;
    let hints = hints::hints_for_word(conn, user.id, word.id).await?;
    let translations = translations::translations_for_word(conn, user.id, word.id).await?;

    Ok(WordDetail {
        word,
        language,
        hints,
        translations,
    })
}

/// GET /api/words?page=
pub async fn list_words(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<Page<Word>>> {
    let mut conn = state.db.acquire().await?;

    let total = words::count_words(&mut conn, user.id).await?;
    let pagination = calculate_pagination(
        total,
        parse_page(query.page.as_deref()),
        state.settings.page_size,
    );
    let items =
        words::list_words(&mut conn, user.id, pagination.page_size, pagination.offset).await?;

    Ok(Json(Page::new(pagination, items)))
}

/// POST /api/words
pub async fn add_word(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(form): Json<WordForm>,
) -> ApiResult<(StatusCode, Json<WordDetail>)> {
    let (new_word, mut new_hint, mut new_translation) = form.candidates(user.id, Uuid::nil());
    new_word.validate()?;
    new_hint.validate()?;
    new_translation.validate()?;

    let mut tx = state.db.begin().await?;
    form_language(&mut tx, form.word_language, &user, "word_language").await?;
    form_language(&mut tx, form.translation_language, &user, "translation_language").await?;

    let word = words::insert_word(&mut tx, &new_word).await?;
    new_hint.word_id = word.id;
    new_translation.word_id = word.id;
    hints::insert_hint(&mut tx, &new_hint).await?;
    translations::insert_translation(&mut tx, &new_translation).await?;

    let detail = word_detail_for(&mut tx, word, &user).await?;
    tx.commit().await?;

    info!(user_id = %user.id, word_id = %detail.word.id, "Word added");

    Ok((StatusCode::CREATED, Json(detail)))
}

/// GET /api/words/:id
pub async fn word_detail(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<WordDetail>> {
    let id = parse_id(&id)?;
    let mut conn = state.db.acquire().await?;
    let word = owned_word(&mut conn, id, &user).await?;

    Ok(Json(word_detail_for(&mut conn, word, &user).await?))
}

/// PUT /api/words/:id
///
/// Updates the word with its first hint and first translation, adding
/// either one if the word has none.
pub async fn edit_word(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(form): Json<WordForm>,
) -> ApiResult<Json<WordDetail>> {
    let id = parse_id(&id)?;

    let mut tx = state.db.begin().await?;
    let word = owned_word(&mut tx, id, &user).await?;

    let (new_word, new_hint, new_translation) = form.candidates(user.id, word.id);
    new_word.validate()?;
    new_hint.validate()?;
    new_translation.validate()?;
    form_language(&mut tx, form.word_language, &user, "word_language").await?;
    form_language(&mut tx, form.translation_language, &user, "translation_language").await?;

    words::update_word(
        &mut tx,
        id,
        &new_word.text,
        new_word.language_id,
        &new_word.description,
    )
    .await?;

    match hints::hints_for_word(&mut tx, user.id, id).await?.first() {
        Some(hint) => hints::update_hint(&mut tx, hint.id, &new_hint.text).await?,
        None => {
            hints::insert_hint(&mut tx, &new_hint).await?;
        }
    }

    match translations::translations_for_word(&mut tx, user.id, id)
        .await?
        .first()
    {
        Some(translation) => {
            translations::update_translation(
                &mut tx,
                translation.id,
                &new_translation.text,
                new_translation.language_id,
            )
            .await?
        }
        None => {
            translations::insert_translation(&mut tx, &new_translation).await?;
        }
    }

    let word = owned_word(&mut tx, id, &user).await?;
    let detail = word_detail_for(&mut tx, word, &user).await?;
    tx.commit().await?;

    info!(user_id = %user.id, word_id = %id, "Word updated");

    Ok(Json(detail))
}

/// DELETE /api/words/:id
pub async fn delete_word(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;
    let mut conn = state.db.acquire().await?;
    owned_word(&mut conn, id, &user).await?;

    words::delete_word(&mut conn, id).await?;
    info!(user_id = %user.id, word_id = %id, "Word deleted");

    Ok(StatusCode::NO_CONTENT)
}
