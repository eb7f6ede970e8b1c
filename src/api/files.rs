//! File upload endpoint
//!
//! Accepts a multipart form with a `file` field, stores it under the
//! configured upload directory and returns the public URL. Book uploads
//! and id-card scans go through here first; the returned URL is then
//! posted as `file_url` / `id_card_url`.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// Upload response carrying the public URL of the stored file
#[derive(Serialize, ToSchema)]
pub struct FileUploadResponse {
    pub url: String,
}

/// Upload a file (jpg, jpeg, png, pdf, doc, docx)
#[utoipa::path(
    post,
    path = "/files",
    tag = "files",
    responses(
        (status = 200, description = "File stored", body = FileUploadResponse),
        (status = 400, description = "No file or disallowed type"),
        (status = 500, description = "Storage failure")
    )
)]
pub async fn upload_file(
    State(state): State<crate::AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<FileUploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation("Missing file name".to_string()))?;

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read file: {}", e)))?;

        let url = state.services.storage.store(&file_name, &data).await?;
        return Ok(Json(FileUploadResponse { url }));
    }

    Err(AppError::Validation("No file uploaded".to_string()))
}
