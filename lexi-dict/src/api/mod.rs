//! HTTP API handlers for lexi-dict

pub mod auth;
pub mod dictionary;
pub mod health;
pub mod import;
pub mod languages;
pub mod users;
pub mod words;

pub use auth::{require_user, CurrentUser};
pub use dictionary::index;
pub use health::health_routes;
pub use import::add_words_from_file;
pub use languages::{add_language, delete_language, edit_language, language_detail, list_languages};
pub use users::sign_up;
pub use words::{add_word, delete_word, edit_word, list_words, word_detail};

use serde::Deserialize;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// `?page=` on list endpoints, kept raw so bad values fall back to page 1
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
}

/// Parse an id path segment; anything that is not a UUID cannot exist
pub(crate) fn parse_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound(format!("No item with id '{}'", raw)))
}
