//! File upload handlers.

use axum::{
    extract::{Multipart, State},
    Json,
};
use std::sync::Arc;

use crate::file::FileKind;
use crate::web::dto::{ApiResponse, UploadBatchResponse, UploadOutcome, UploadResponse};
use crate::web::error::ApiError;
use crate::web::handlers::AppState;
use crate::web::middleware::CurrentUser;

/// One file pulled out of a multipart body.
struct IncomingFile {
    filename: String,
    mime_type: Option<String>,
    data: Vec<u8>,
}

/// Collect all file parts from a multipart body.
async fn collect_files(mut multipart: Multipart) -> Result<Vec<IncomingFile>, ApiError> {
    let mut files = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::debug!("Failed to read multipart field: {}", e);
        ApiError::bad_request("Invalid multipart data")
    })? {
        // Parts without a filename are form fields, not uploads
        let Some(filename) = field.file_name().map(|f| f.to_string()) else {
            continue;
        };
        let mime_type = field.content_type().map(|m| m.to_string());

        let data = field.bytes().await.map_err(|e| {
            tracing::debug!("Failed to read multipart field body: {}", e);
            ApiError::bad_request("Invalid multipart data")
        })?;

        files.push(IncomingFile {
            filename,
            mime_type,
            data: data.to_vec(),
        });
    }

    Ok(files)
}

/// Store one incoming file and describe it.
fn store_file(state: &AppState, file: &IncomingFile) -> Result<UploadResponse, ApiError> {
    if file.data.len() as u64 > state.max_upload_bytes {
        return Err(ApiError::payload_too_large("File too large"));
    }

    let stored_name = state.storage.save(&file.data, &file.filename).map_err(|e| {
        tracing::error!("Failed to store upload: {}", e);
        ApiError::internal("Failed to store file")
    })?;

    let mime_type = file.mime_type.clone().unwrap_or_else(|| {
        mime_guess::from_path(&file.filename)
            .first_or_octet_stream()
            .to_string()
    });

    Ok(UploadResponse {
        url: format!("/uploads/{stored_name}"),
        filename: file.filename.clone(),
        size: file.data.len() as u64,
        kind: FileKind::from_name(&file.filename),
        mime_type,
    })
}

/// POST /api/upload - Store a single file.
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    CurrentUser { user_id }: CurrentUser,
    multipart: Multipart,
) -> Result<Json<ApiResponse<UploadResponse>>, ApiError> {
    let files = collect_files(multipart).await?;
    let file = files
        .first()
        .ok_or_else(|| ApiError::bad_request("No file in request"))?;

    let response = store_file(&state, file)?;
    tracing::info!(
        filename = %file.filename,
        size = file.data.len(),
        user_id = %user_id,
        "File uploaded"
    );

    Ok(Json(ApiResponse::new(response)))
}

/// POST /api/upload/multiple - Store several files, reporting per-file outcomes.
pub async fn upload_files(
    State(state): State<Arc<AppState>>,
    CurrentUser { user_id }: CurrentUser,
    multipart: Multipart,
) -> Result<Json<ApiResponse<UploadBatchResponse>>, ApiError> {
    let files = collect_files(multipart).await?;

    if files.is_empty() {
        return Err(ApiError::bad_request("No files in request"));
    }
    if files.len() > state.max_files_per_upload {
        return Err(ApiError::bad_request(format!(
            "At most {} files per upload",
            state.max_files_per_upload
        )));
    }

    let outcomes = files
        .iter()
        .map(|file| match store_file(&state, file) {
            Ok(response) => {
                tracing::info!(
                    filename = %file.filename,
                    size = file.data.len(),
                    user_id = %user_id,
                    "File uploaded"
                );
                UploadOutcome::Stored(response)
            }
            Err(e) => UploadOutcome::Failed {
                error: format!("Failed to upload {}: {}", file.filename, e),
            },
        })
        .collect();

    Ok(Json(ApiResponse::new(UploadBatchResponse {
        files: outcomes,
    })))
}
