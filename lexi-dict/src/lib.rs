//! lexi-dict library - personal vocabulary dictionary service
//!
//! Words, languages, hints and translations per user, edited through a
//! JSON API or imported in bulk from CSV.

use axum::extract::DefaultBodyLimit;
use axum::Router;
use lexi_common::config::DictionarySettings;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod cli;
pub mod db;
pub mod error;
pub mod pagination;
pub mod services;

pub use error::{ApiError, ApiResult};

/// Room for multipart boundaries and headers around the file itself
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    pub settings: DictionarySettings,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, settings: DictionarySettings) -> Self {
        Self { db, settings }
    }
}

/// Build application router
///
/// Everything under `/api` requires a bearer token except sign-up.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{get, post};

    let upload_limit = state
        .settings
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    // Protected routes (require authentication)
    let protected = Router::new()
        .route("/api/dictionary", get(api::index))
        .route("/api/words", get(api::list_words).post(api::add_word))
        .route(
            "/api/words/import",
            post(api::add_words_from_file).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/api/words/:id",
            get(api::word_detail)
                .put(api::edit_word)
                .delete(api::delete_word),
        )
        .route(
            "/api/languages",
            get(api::list_languages).post(api::add_language),
        )
        .route(
            "/api/languages/:id",
            get(api::language_detail)
                .put(api::edit_language)
                .delete(api::delete_language),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            api::require_user,
        ));

    // Public routes (no authentication)
    let public = Router::new()
        .route("/api/users", post(api::sign_up))
        .merge(api::health_routes());

    // Combine routers
    Router::new()
        .merge(protected)
        .merge(public)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
