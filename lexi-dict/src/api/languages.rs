//! Language CRUD handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use lexi_common::models::{Language, NewLanguage};
use serde::Deserialize;
use sqlx::SqliteConnection;
use tracing::info;
use uuid::Uuid;

use super::auth::{authorize_owner, CurrentUser};
use super::{parse_id, PageQuery};
use crate::db::{is_unique_violation, languages};
use crate::error::{ApiError, ApiResult};
use crate::pagination::{calculate_pagination, parse_page, Page};
use crate::AppState;

const DUPLICATE_LANGUAGE: &str = "Language with that name already exists!";

#[derive(Debug, Deserialize)]
pub struct LanguageForm {
    pub name: String,
}

fn duplicate(err: lexi_common::Error) -> ApiError {
    if is_unique_violation(&err) {
        ApiError::Conflict(DUPLICATE_LANGUAGE.to_string())
    } else {
        err.into()
    }
}

/// Load a language and check that `user` owns it
pub(crate) async fn owned_language(
    conn: &mut SqliteConnection,
    id: Uuid,
    user: &CurrentUser,
) -> ApiResult<Language> {
    let language = languages::find_language(conn, id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Language {} not found", id)))?;
    authorize_owner(language.user_id, user)?;
    Ok(language)
}

/// GET /api/languages?page=
pub async fn list_languages(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<Page<Language>>> {
    let mut conn = state.db.acquire().await?;

    let total = languages::count_languages(&mut conn, user.id).await?;
    let pagination = calculate_pagination(
        total,
        parse_page(query.page.as_deref()),
        state.settings.page_size,
    );
    let items =
        languages::list_languages(&mut conn, user.id, pagination.page_size, pagination.offset)
            .await?;

    Ok(Json(Page::new(pagination, items)))
}

/// POST /api/languages
pub async fn add_language(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(form): Json<LanguageForm>,
) -> ApiResult<(StatusCode, Json<Language>)> {
    let candidate = NewLanguage::new(user.id, form.name.trim());
    candidate.validate()?;

    let mut conn = state.db.acquire().await?;
    if languages::name_taken(&mut conn, user.id, &candidate.name, None).await? {
        return Err(ApiError::Conflict(DUPLICATE_LANGUAGE.to_string()));
    }

    let language = languages::insert_language(&mut conn, &candidate)
        .await
        .map_err(duplicate)?;

    info!(user_id = %user.id, language_id = %language.id, name = %language.name, "Language added");

    Ok((StatusCode::CREATED, Json(language)))
}

/// GET /api/languages/:id
pub async fn language_detail(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<Json<Language>> {
    let id = parse_id(&id)?;
    let mut conn = state.db.acquire().await?;
    Ok(Json(owned_language(&mut conn, id, &user).await?))
}

/// PUT /api/languages/:id
pub async fn edit_language(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(form): Json<LanguageForm>,
) -> ApiResult<Json<Language>> {
    let id = parse_id(&id)?;
    let mut conn = state.db.acquire().await?;
    let mut language = owned_language(&mut conn, id, &user).await?;

    let candidate = NewLanguage::new(user.id, form.name.trim());
    candidate.validate()?;

    if languages::name_taken(&mut conn, user.id, &candidate.name, Some(id)).await? {
        return Err(ApiError::Conflict(DUPLICATE_LANGUAGE.to_string()));
    }

    languages::rename_language(&mut conn, id, &candidate.name)
        .await
        .map_err(duplicate)?;
    language.name = candidate.name;

    info!(user_id = %user.id, language_id = %id, name = %language.name, "Language renamed");

    Ok(Json(language))
}

/// DELETE /api/languages/:id
///
/// Words in this language, and translations into it, are removed too.
pub async fn delete_language(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let id = parse_id(&id)?;
    let mut conn = state.db.acquire().await?;
    owned_language(&mut conn, id, &user).await?;

    languages::delete_language(&mut conn, id).await?;
    info!(user_id = %user.id, language_id = %id, "Language deleted");

    Ok(StatusCode::NO_CONTENT)
}
