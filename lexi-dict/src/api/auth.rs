//! Bearer-token authentication and ownership checks
//!
//! Tokens are issued once at sign-up; only their SHA-256 digest is stored.
//! Protected routes run [`require_user`], which resolves the token to a
//! [`CurrentUser`] and stores it in the request extensions.

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use rand::Rng;
use sha2::{Digest, Sha256};
use tracing::debug;
use uuid::Uuid;

use crate::db::users;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Authenticated caller, available to handlers as an extractor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))
    }
}

/// Generate a new random API token (64 hex characters)
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::thread_rng().gen();
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// SHA-256 digest of a token, as stored in `users.token_hash`
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Authentication middleware
///
/// Returns 401 Unauthorized if the token is missing or unknown.
///
/// **Note:** This is applied to protected routes only.
/// `/health` and sign-up do NOT use this middleware.
pub async fn require_user(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let digest = bearer_token(request.headers())
        .map(hash_token)
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

    // Connection is released before the handler runs
    let user = {
        let mut conn = state.db.acquire().await?;
        users::find_user_by_token_hash(&mut conn, &digest).await?
    };

    let user = user.ok_or_else(|| {
        debug!("Rejected unknown API token");
        ApiError::Unauthorized("Invalid API token".to_string())
    })?;

    request.extensions_mut().insert(CurrentUser {
        id: user.id,
        username: user.username,
    });

    Ok(next.run(request).await)
}

/// Ownership check run before reading or mutating a row
pub fn authorize_owner(owner_id: Uuid, user: &CurrentUser) -> ApiResult<()> {
    if owner_id == user.id {
        Ok(())
    } else {
        Err(ApiError::Forbidden(
            "You do not have permission to access this item".to_string(),
        ))
    }
}
