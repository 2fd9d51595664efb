//! Video upload and download endpoints (/upload-video, /videos/*)

use axum::{
    Json, Router,
    body::Body,
    extract::{Multipart, Path, Request, State},
    http::{HeaderValue, StatusCode, header},
    response::Response,
    routing::{get, post},
};
use serde::Serialize;
use std::io;
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::{error, info};

use crate::AppState;
use crate::constants::UPLOAD_SUCCESS_MESSAGE;
use crate::domain::records;
use crate::models::VideoRecord;
use crate::services::error::LogErr;
use crate::storage::{self, StorageError};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/upload-video", post(upload_video))
        .route("/videos/{filename}", get(serve_video))
}

#[derive(Serialize)]
struct UploadResponse {
    message: &'static str,
    inserted_id: String,
    download_url: String,
}

struct UploadedFile {
    filename: String,
    data: axum::body::Bytes,
}

/// POST /upload-video - Store a video file and record a vlog pointing at it
/// Accepts multipart form data with:
/// - "user_id" (required)
/// - "video_title" and "note" (optional)
/// - "file" with a filename
async fn upload_video(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, StatusCode> {
    let mut user_id = None;
    let mut video_title = None;
    let mut note = None;
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .log_status("Multipart field error", StatusCode::BAD_REQUEST)?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "user_id" => {
                user_id = Some(field.text().await.log_status("Read user_id", StatusCode::BAD_REQUEST)?)
            }
            "video_title" => {
                video_title =
                    Some(field.text().await.log_status("Read video_title", StatusCode::BAD_REQUEST)?)
            }
            "note" => note = Some(field.text().await.log_status("Read note", StatusCode::BAD_REQUEST)?),
            "file" => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or(StatusCode::UNPROCESSABLE_ENTITY)?;
                let data = field
                    .bytes()
                    .await
                    .log_status("Read upload bytes", StatusCode::BAD_REQUEST)?;
                file = Some(UploadedFile { filename, data });
            }
            _ => continue,
        }
    }

    let user_id = user_id.ok_or(StatusCode::UNPROCESSABLE_ENTITY)?;
    let file = file.ok_or(StatusCode::UNPROCESSABLE_ENTITY)?;

    let full_path = storage::save_upload(&state.upload_dir, &file.filename, &file.data)
        .await
        .map_err(|e| match e {
            StorageError::InvalidFilename(_) => {
                tracing::warn!("Rejected upload: {}", e);
                StatusCode::BAD_REQUEST
            }
            other => {
                error!("Failed to write upload {:?}: {}", file.filename, other);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        })?;
    info!("Saved {} bytes to {:?}", file.data.len(), full_path);

    let download_url = storage::reference_path(&file.filename);
    let vlog = VideoRecord {
        user_id,
        video_title,
        video_url: Some(download_url.clone()),
        note,
    };

    // The file stays on disk even if the insert fails
    let inserted_id = records::create_record(state.store.as_ref(), &vlog)
        .await
        .map_err(|e| {
            error!("Insert vlog for upload {:?} failed: {}", full_path, e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(UploadResponse {
        message: UPLOAD_SUCCESS_MESSAGE,
        inserted_id,
        download_url,
    }))
}

/// GET /videos/:filename - Stream an uploaded file
/// Range requests are answered with 206 so players can seek.
async fn serve_video(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
    request: Request,
) -> Result<Response, StatusCode> {
    let path = storage::resolve_upload(&state.upload_dir, &filename)
        .await
        .map_err(|e| match e {
            StorageError::InvalidFilename(_) | StorageError::OutsideUploadDir => StatusCode::FORBIDDEN,
            // Silent - expected for missing files
            StorageError::Io(ref io_err) if io_err.kind() == io::ErrorKind::NotFound => {
                StatusCode::NOT_FOUND
            }
            StorageError::Io(io_err) => {
                error!("Failed to resolve upload {:?}: {}", filename, io_err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        })?;

    let mut response = match ServeFile::new(&path).oneshot(request).await {
        Ok(response) => response.map(Body::new),
        Err(never) => match never {},
    };

    // Same-name uploads replace content, so clients must revalidate
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    Ok(response)
}
