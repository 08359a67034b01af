//! Defines routes for all object-storage gateway operations.
//!
//! ## Structure
//! - **Object endpoints**
//!   - `GET    /`          — list all objects in the bucket
//!   - `POST   /`          — upload a file (multipart field `file`)
//!   - `DELETE /`          — delete an object (key in JSON body)
//!   - `GET    /{key}`     — download an object as an attachment
//!
//! - **Versioning endpoints**
//!   - `PUT    /version`   — enable bucket versioning
//!   - `GET    /version`   — list versions of a key (key in JSON body)
//!   - `POST   /version`   — restore a version (key + versionId in JSON body)
//!
//! `/version` is a static segment, so it takes precedence over the
//! `/{key}` download capture.

use crate::{
    handlers::{
        health_handlers::{healthz, readyz},
        storage_handlers::{
            delete_object, download_object, enable_versioning, list_objects, list_versions,
            restore_version, upload_object,
        },
    },
    services::storage_service::StorageService,
};
use axum::{
    Router,
    routing::get,
};

/// Build and return the router for all gateway routes.
///
/// The router carries shared state (`StorageService`) to all handlers; the
/// multipart parsing for uploads happens inside the upload handler via
/// axum's `Multipart` extractor.
pub fn routes() -> Router<StorageService> {
    Router::new()
        // health endpoints (mounted at root)
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // versioning endpoints
        .route(
            "/version",
            get(list_versions)
                .put(enable_versioning)
                .post(restore_version),
        )
        // object endpoints
        .route(
            "/",
            get(list_objects).post(upload_object).delete(delete_object),
        )
        .route("/{key}", get(download_object))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::AppConfig,
        services::storage_service::{StorageService, build_client},
    };
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    /// Service wired to an endpoint nothing listens on. Validation paths
    /// never reach it; backend paths fail fast with connection refused.
    fn test_service() -> StorageService {
        let cfg = AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            endpoint: "http://127.0.0.1:1".into(),
            access_key_id: "test".into(),
            secret_access_key: "test".into(),
            region: "us-east-1".into(),
            bucket: "test-bucket".into(),
        };
        StorageService::new(build_client(&cfg), cfg.bucket.clone())
    }

    async fn send(request: Request<Body>) -> (StatusCode, Value) {
        let app = routes().with_state(test_service());
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn multipart_request(field_name: &str) -> Request<Body> {
        let boundary = "gateway-test-boundary";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"{field_name}\"; filename=\"hello.txt\"\r\n\
             Content-Type: text/plain\r\n\r\n\
             hello\r\n\
             --{boundary}--\r\n"
        );
        Request::builder()
            .method("POST")
            .uri("/")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn healthz_is_ok() {
        let request = Request::builder()
            .uri("/healthz")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn upload_without_file_field_is_400() {
        let (status, body) = send(multipart_request("attachment")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "message": "No file provided" }));
    }

    #[tokio::test]
    async fn upload_backend_failure_is_generic_500() {
        let (status, body) = send(multipart_request("file")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "message": "Failed to upload file" }));
    }

    #[tokio::test]
    async fn list_versions_without_key_is_400() {
        let (status, body) = send(json_request("GET", "/version", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "message": "Key is required" }));
    }

    #[tokio::test]
    async fn list_versions_without_body_is_400() {
        let request = Request::builder()
            .method("GET")
            .uri("/version")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "message": "Key is required" }));
    }

    #[tokio::test]
    async fn restore_version_without_version_id_is_400() {
        let (status, body) =
            send(json_request("POST", "/version", json!({ "key": "a.txt" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "message": "Key and versionId are required" }));
    }

    #[tokio::test]
    async fn delete_without_key_is_400() {
        let (status, body) = send(json_request("DELETE", "/", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "message": "Key is required" }));
    }

    #[tokio::test]
    async fn delete_backend_failure_is_generic_500() {
        let (status, body) =
            send(json_request("DELETE", "/", json!({ "key": "missing.txt" }))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "message": "Failed to delete file" }));
    }

    #[tokio::test]
    async fn download_backend_failure_is_generic_500_not_404() {
        let request = Request::builder()
            .uri("/missing.txt")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(request).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "message": "Failed to download file" }));
    }
}
