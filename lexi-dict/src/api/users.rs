//! Account sign-up

use axum::{extract::State, http::StatusCode, Json};
use lexi_common::models::{NewUser, User};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::auth::{generate_token, hash_token};
use crate::db::{is_unique_violation, users};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SignUpRequest {
    pub username: String,
}

/// The token is only ever returned here
#[derive(Debug, Serialize)]
pub struct SignUpResponse {
    pub user: User,
    pub token: String,
}

fn username_conflict() -> ApiError {
    ApiError::Conflict("A user with that username already exists".to_string())
}

/// POST /api/users
pub async fn sign_up(
    State(state): State<AppState>,
    Json(req): Json<SignUpRequest>,
) -> ApiResult<(StatusCode, Json<SignUpResponse>)> {
    let candidate = NewUser {
        username: req.username.trim().to_string(),
    };
    candidate.validate()?;

    let mut conn = state.db.acquire().await?;
    if users::username_taken(&mut conn, &candidate.username).await? {
        return Err(username_conflict());
    }

    let token = generate_token();
    let user = users::insert_user(&mut conn, &candidate, &hash_token(&token))
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                username_conflict()
            } else {
                e.into()
            }
        })?;

    info!(user_id = %user.id, username = %user.username, "User signed up");

    Ok((StatusCode::CREATED, Json(SignUpResponse { user, token })))
}
