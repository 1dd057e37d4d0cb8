//! Dictionary entity models
//!
//! Persisted records (`Language`, `Word`, `Hint`, `Translation`) and the
//! unsaved candidates (`New*`) that must pass `validate()` before insert.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;
use crate::text::name_key;

/// Maximum length (characters) of short text fields
pub const MAX_TEXT_LEN: usize = 300;

/// Maximum length (characters) of a username
pub const MAX_USERNAME_LEN: usize = 150;

fn check_text(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }
    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::TooLong { field, max, len });
    }
    Ok(())
}

/// Account that owns dictionary entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub language_id: Uuid,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hint {
    pub id: Uuid,
    pub user_id: Uuid,
    pub word_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub word_id: Uuid,
    pub language_id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Unsaved user candidate
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_text("username", &self.username, MAX_USERNAME_LEN)
    }
}

/// Unsaved language candidate
#[derive(Debug, Clone)]
pub struct NewLanguage {
    pub user_id: Uuid,
    pub name: String,
}

impl NewLanguage {
    pub fn new(user_id: Uuid, name: impl Into<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        check_text("name", &self.name, MAX_TEXT_LEN)
    }

    /// Case-insensitive key used by the per-user uniqueness index
    pub fn name_key(&self) -> String {
        name_key(&self.name)
    }
}

/// Unsaved word candidate
#[derive(Debug, Clone)]
pub struct NewWord {
    pub user_id: Uuid,
    pub text: String,
    pub language_id: Uuid,
    pub description: String,
}

impl NewWord {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_text("word", &self.text, MAX_TEXT_LEN)?;
        if self.description.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "description",
            });
        }
        Ok(())
    }
}

/// Unsaved hint candidate
#[derive(Debug, Clone)]
pub struct NewHint {
    pub user_id: Uuid,
    pub word_id: Uuid,
    pub text: String,
}

impl NewHint {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_text("hint", &self.text, MAX_TEXT_LEN)
    }
}

/// Unsaved translation candidate
#[derive(Debug, Clone)]
pub struct NewTranslation {
    pub user_id: Uuid,
    pub word_id: Uuid,
    pub language_id: Uuid,
    pub text: String,
}

impl NewTranslation {
    pub fn validate(&self) -> Result<(), ValidationError> {
        check_text("translation", &self.text, MAX_TEXT_LEN)
    }
}
