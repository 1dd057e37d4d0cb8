//! Bulk word import from an uploaded CSV file

use axum::{
    body::Bytes,
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;

use super::auth::CurrentUser;
use crate::error::{ApiError, ApiResult};
use crate::services::{parse_import, validate_upload, ImportError, Reconciler};
use crate::AppState;

/// Multipart field carrying the file
pub const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub status: &'static str,
    pub rows_applied: usize,
    pub languages_created: usize,
    pub message: String,
}

fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ImportError::InvalidUpload("File is too large".to_string()).into()
    } else {
        ApiError::BadRequest(err.body_text())
    }
}

/// Pull the filename and contents of the upload field
async fn read_upload(multipart: &mut Multipart) -> ApiResult<(String, Bytes)> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await.map_err(multipart_error)?;
        return Ok((filename, data));
    }

    Err(ImportError::InvalidUpload(format!("No '{}' field in upload", UPLOAD_FIELD)).into())
}

/// POST /api/words/import
///
/// The whole file is applied or nothing is.
pub async fn add_words_from_file(
    State(state): State<AppState>,
    user: CurrentUser,
    mut multipart: Multipart,
) -> ApiResult<Json<ImportResponse>> {
    let (filename, data) = read_upload(&mut multipart).await?;
    info!(
        user_id = %user.id,
        filename = %filename,
        bytes = data.len(),
        "Import upload received"
    );

    validate_upload(&filename, data.len(), state.settings.max_upload_bytes)?;
    let rows = parse_import(&data)?;
    let summary = Reconciler::new(state.db.clone()).import(user.id, rows).await?;

    Ok(Json(ImportResponse {
        status: "imported",
        rows_applied: summary.rows_applied,
        languages_created: summary.languages_created,
        message: format!("Import complete, {} rows applied", summary.rows_applied),
    }))
}
