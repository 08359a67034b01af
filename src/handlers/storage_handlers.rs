//! HTTP handlers for object and versioning operations.
//! Validates required inputs at the boundary, delegates one call to
//! `StorageService`, and maps the outcome to a status plus JSON or stream
//! body. Backend error detail never reaches the response.

use crate::{
    errors::AppError,
    services::storage_service::StorageService,
};
use axum::{
    Json,
    body::Body,
    extract::{Multipart, Path, State, rejection::JsonRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use tokio_util::io::ReaderStream;

/// Request body for `DELETE /`.
#[derive(Debug, Deserialize)]
pub struct DeleteObjectRequest {
    pub key: String,
}

/// Request body for `GET /version`.
#[derive(Debug, Deserialize)]
pub struct ListVersionsRequest {
    pub key: String,
}

/// Request body for `POST /version`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreVersionRequest {
    pub key: String,
    pub version_id: String,
}

/// GET `/` — list the full bucket contents.
pub async fn list_objects(
    State(storage): State<StorageService>,
) -> Result<impl IntoResponse, AppError> {
    let objects = storage
        .list_all()
        .await
        .map_err(|_| AppError::operation_failed("Failed to retrieve file list"))?;

    Ok((StatusCode::OK, Json(objects)))
}

/// POST `/` — upload a single file from the multipart field `file`.
///
/// The stored key is server-generated; the original filename survives only
/// in object metadata.
pub async fn upload_object(
    State(storage): State<StorageService>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::bad_request("Invalid multipart payload"))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let original_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|_| AppError::bad_request("Invalid multipart payload"))?;

        let uploaded = storage
            .upload(data, &original_name, &content_type)
            .await
            .map_err(|_| AppError::operation_failed("Failed to upload file"))?;

        return Ok((StatusCode::OK, Json(uploaded)));
    }

    Err(AppError::bad_request("No file provided"))
}

/// GET `/{key}` — download an object as a streaming attachment.
pub async fn download_object(
    State(storage): State<StorageService>,
    Path(key): Path<String>,
) -> Result<Response, AppError> {
    let object = storage
        .download(&key)
        .await
        .map_err(|_| AppError::operation_failed("Failed to download file"))?;

    let stream = ReaderStream::new(object.body.into_async_read());
    let mut response = Response::new(Body::from_stream(stream));
    *response.status_mut() = StatusCode::OK;

    let headers = response.headers_mut();
    let content_type = object
        .content_type
        .unwrap_or_else(|| "application/octet-stream".into());
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(&content_type)
            .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream")),
    );
    if let Some(length) = object.content_length {
        headers.insert(
            header::CONTENT_LENGTH,
            HeaderValue::from_str(&length.to_string())
                .unwrap_or_else(|_| HeaderValue::from_static("0")),
        );
    }
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename={}", key))
            .unwrap_or_else(|_| HeaderValue::from_static("attachment")),
    );

    Ok(response)
}

/// DELETE `/` — remove the current version of the object named in the body.
pub async fn delete_object(
    State(storage): State<StorageService>,
    payload: Result<Json<DeleteObjectRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload.map_err(|_| AppError::bad_request("Key is required"))?;

    storage
        .delete(&req.key)
        .await
        .map_err(|_| AppError::operation_failed("Failed to delete file"))?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "File deleted successfully" })),
    ))
}

/// PUT `/version` — enable versioning on the configured bucket.
pub async fn enable_versioning(
    State(storage): State<StorageService>,
) -> Result<impl IntoResponse, AppError> {
    storage
        .enable_versioning()
        .await
        .map_err(|_| AppError::operation_failed("Failed to enable versioning"))?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Versioning enabled successfully" })),
    ))
}

/// GET `/version` — list all versions of the key named in the body.
pub async fn list_versions(
    State(storage): State<StorageService>,
    payload: Result<Json<ListVersionsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) = payload.map_err(|_| AppError::bad_request("Key is required"))?;

    let versions = storage
        .list_versions(&req.key)
        .await
        .map_err(|_| AppError::operation_failed("Failed to list object versions"))?;

    Ok((StatusCode::OK, Json(versions)))
}

/// POST `/version` — promote a historical version to latest.
pub async fn restore_version(
    State(storage): State<StorageService>,
    payload: Result<Json<RestoreVersionRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(req) =
        payload.map_err(|_| AppError::bad_request("Key and versionId are required"))?;

    storage
        .restore_version(&req.key, &req.version_id)
        .await
        .map_err(|_| AppError::operation_failed("Failed to restore version"))?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Version restored successfully" })),
    ))
}
