use axum::{
    extract::{Multipart, State},
    response::IntoResponse,
    Json,
};

use crate::dto::UploadResponse;
use crate::error::ApiError;
use crate::services::upload::save_uploaded_files;
use crate::state::AppState;

/// POST /upload - accept multipart files, rebuild the corpus index
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    tracing::info!("Processing upload request");

    let mut files: Vec<(String, Vec<u8>)> = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::bad_request("Failed to parse multipart form").with_details(e.to_string())
    })? {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };

        let data = field.bytes().await.map_err(|e| {
            ApiError::bad_request("Failed to read file data").with_details(e.to_string())
        })?;

        tracing::info!(filename = %filename, size = data.len(), "Received file");
        files.push((filename, data.to_vec()));
    }

    if files.is_empty() {
        return Err(ApiError::bad_request("No files uploaded"));
    }

    let saved = save_uploaded_files(&files, &state.upload_dir).map_err(|e| {
        tracing::error!(error = %e, "Failed to store uploaded files");
        ApiError::internal("Failed to store uploaded files").with_details(e.to_string())
    })?;

    let summary = state.pipeline.load(&state.upload_dir).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to index uploaded documents");
        ApiError::from(e)
    })?;

    tracing::info!(
        files = saved,
        documents = summary.documents,
        chunks = summary.chunks,
        "Upload processed"
    );

    Ok(Json(UploadResponse {
        message: "Files uploaded and processed.".to_string(),
        documents: summary.documents,
        chunks: summary.chunks,
    }))
}
