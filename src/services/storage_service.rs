//! src/services/storage_service.rs
//!
//! StorageService — one method per backend command, each a single round-trip
//! to the S3-compatible store. This file intentionally holds **no** local
//! state beyond the client handle and bucket name; durability, versioning,
//! and consistency are entirely the backend's concern.

use crate::{
    config::AppConfig,
    models::{
        object::{ObjectDownload, ObjectSummary, UploadedFile},
        version::ObjectVersionInfo,
    },
};
use aws_sdk_s3::{
    Client,
    config::{BehaviorVersion, Credentials, Region, retry::RetryConfig},
    primitives::ByteStream,
    types::{BucketVersioningStatus, ObjectVersion, VersioningConfiguration},
};
use bytes::Bytes;
use rand::Rng;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("backend {operation} request failed")]
    Backend { operation: &'static str },
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Every object is stamped with this owner id until the gateway has auth.
/// TODO: take the user id from the authenticated request once auth lands.
const PLACEHOLDER_USER_ID: &str = "123456";

/// StorageService provides the gateway's seven backend operations:
/// - List the bucket (single page, no continuation handling)
/// - Upload an object under a freshly generated key
/// - Download / delete an object by key
/// - Enable bucket versioning
/// - List the versions of one key
/// - Restore a historical version by copying it over the current object
///
/// The struct is cheap to clone (the SDK client is internally shared) and is
/// safe for concurrent reuse across in-flight requests.
#[derive(Clone)]
pub struct StorageService {
    client: Client,
    bucket: String,
}

/// Build the backend client from explicit configuration.
///
/// Retries are deliberately disabled: the gateway performs exactly one
/// backend round-trip per inbound request. `force_path_style` keeps the
/// client compatible with MinIO/LocalStack-style endpoints.
pub fn build_client(cfg: &AppConfig) -> Client {
    let credentials = Credentials::new(
        cfg.access_key_id.clone(),
        cfg.secret_access_key.clone(),
        None,
        None,
        "storage-gateway",
    );

    let s3_config = aws_sdk_s3::Config::builder()
        .behavior_version(BehaviorVersion::latest())
        .endpoint_url(cfg.endpoint.clone())
        .region(Region::new(cfg.region.clone()))
        .credentials_provider(credentials)
        .retry_config(RetryConfig::disabled())
        .force_path_style(true)
        .build();

    Client::from_conf(s3_config)
}

impl StorageService {
    /// Create a new StorageService over a pre-built client and bucket name.
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// List the full bucket contents.
    ///
    /// Single `ListObjectsV2` page only; large buckets truncate to the
    /// backend's default page size.
    pub async fn list_all(&self) -> StorageResult<Vec<ObjectSummary>> {
        let output = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|err| backend_error("list-objects", err))?;

        let objects: Vec<ObjectSummary> = output
            .contents
            .unwrap_or_default()
            .into_iter()
            .map(ObjectSummary::from)
            .collect();

        debug!(count = objects.len(), "listed bucket contents");
        Ok(objects)
    }

    /// Store an uploaded file under a freshly generated key.
    ///
    /// The key is 16 random bytes as lowercase hex plus the original file
    /// extension. No overwrite check is performed; at 128 bits of randomness
    /// a collision is negligible.
    pub async fn upload(
        &self,
        data: Bytes,
        original_name: &str,
        content_type: &str,
    ) -> StorageResult<UploadedFile> {
        let key = generate_key(original_name);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .metadata("originalFilename", original_name)
            .metadata("userId", PLACEHOLDER_USER_ID)
            .send()
            .await
            .map_err(|err| backend_error("put-object", err))?;

        debug!(key = %key, original_name, "stored object");
        Ok(UploadedFile { file_name: key })
    }

    /// Fetch an object for streaming out.
    ///
    /// A missing key surfaces as a backend error; the gateway does not
    /// distinguish not-found from other failures.
    pub async fn download(&self, key: &str) -> StorageResult<ObjectDownload> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| backend_error("get-object", err))?;

        Ok(ObjectDownload {
            content_type: output.content_type,
            content_length: output.content_length,
            body: output.body,
        })
    }

    /// Remove the current version of the object at `key`.
    pub async fn delete(&self, key: &str) -> StorageResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| backend_error("delete-object", err))?;

        debug!(key, "deleted object");
        Ok(())
    }

    /// Set bucket versioning to `Enabled`. Idempotent at the backend.
    pub async fn enable_versioning(&self) -> StorageResult<()> {
        let configuration = VersioningConfiguration::builder()
            .status(BucketVersioningStatus::Enabled)
            .build();

        self.client
            .put_bucket_versioning()
            .bucket(&self.bucket)
            .versioning_configuration(configuration)
            .send()
            .await
            .map_err(|err| backend_error("put-bucket-versioning", err))?;

        debug!(bucket = %self.bucket, "enabled bucket versioning");
        Ok(())
    }

    /// List all versions of exactly `key`.
    ///
    /// The backend lists by prefix, so the result is filtered to entries
    /// whose key equals `key` — `a.txt.bak` never shows up when listing
    /// versions of `a.txt`. Returns an empty list when the key has none.
    pub async fn list_versions(&self, key: &str) -> StorageResult<Vec<ObjectVersionInfo>> {
        let output = self
            .client
            .list_object_versions()
            .bucket(&self.bucket)
            .prefix(key)
            .send()
            .await
            .map_err(|err| backend_error("list-object-versions", err))?;

        Ok(exact_key_versions(output.versions.unwrap_or_default(), key))
    }

    /// Promote a historical version to latest.
    ///
    /// One copy-with-source-version-id call, not a read-then-write.
    pub async fn restore_version(&self, key: &str, version_id: &str) -> StorageResult<()> {
        let copy_source = format!("{}/{}?versionId={}", self.bucket, key, version_id);

        self.client
            .copy_object()
            .bucket(&self.bucket)
            .copy_source(copy_source)
            .key(key)
            .send()
            .await
            .map_err(|err| backend_error("copy-object", err))?;

        debug!(key, version_id, "restored object version");
        Ok(())
    }

    /// Readiness probe: one minimal listing against the configured bucket.
    pub async fn probe_bucket(&self) -> StorageResult<()> {
        self.client
            .list_objects_v2()
            .bucket(&self.bucket)
            .max_keys(1)
            .send()
            .await
            .map_err(|err| backend_error("list-objects", err))?;

        Ok(())
    }
}

/// Log a failed backend call with context and collapse it into the single
/// client-observable error kind. Detail stays server-side.
fn backend_error<E: std::fmt::Debug>(operation: &'static str, err: E) -> StorageError {
    error!(operation, error = ?err, "backend request failed");
    StorageError::Backend { operation }
}

/// Generate an object key: 16 random bytes as hex plus the original
/// extension (with its dot), or bare hex when the name has no extension.
fn generate_key(original_name: &str) -> String {
    let mut raw = [0u8; 16];
    rand::thread_rng().fill(&mut raw[..]);
    let mut key = hex::encode(raw);

    if let Some(ext) = Path::new(original_name).extension() {
        key.push('.');
        key.push_str(&ext.to_string_lossy());
    }

    key
}

/// Keep only versions whose key exactly equals `key`.
fn exact_key_versions(versions: Vec<ObjectVersion>, key: &str) -> Vec<ObjectVersionInfo> {
    versions
        .into_iter()
        .filter(|version| version.key.as_deref() == Some(key))
        .map(ObjectVersionInfo::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_lower_hex(s: &str) -> bool {
        s.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
    }

    #[test]
    fn generated_key_is_hex_plus_extension() {
        let key = generate_key("report.txt");
        let (stem, ext) = key.split_at(32);
        assert!(is_lower_hex(stem));
        assert_eq!(ext, ".txt");
    }

    #[test]
    fn generated_key_keeps_only_last_extension() {
        let key = generate_key("archive.tar.gz");
        assert!(key.ends_with(".gz"));
        assert!(!key.contains(".tar."));
        assert_eq!(key.len(), 32 + ".gz".len());
    }

    #[test]
    fn generated_key_without_extension_is_bare_hex() {
        let key = generate_key("Makefile");
        assert_eq!(key.len(), 32);
        assert!(is_lower_hex(&key));
    }

    #[test]
    fn generated_keys_are_distinct() {
        assert_ne!(generate_key("a.txt"), generate_key("a.txt"));
    }

    #[test]
    fn version_filter_is_exact_match_not_prefix() {
        let versions = vec![
            ObjectVersion::builder()
                .key("a.txt")
                .version_id("v1")
                .is_latest(false)
                .size(3)
                .build(),
            ObjectVersion::builder()
                .key("a.txt.bak")
                .version_id("v9")
                .is_latest(true)
                .size(9)
                .build(),
            ObjectVersion::builder()
                .key("a.txt")
                .version_id("v2")
                .is_latest(true)
                .size(5)
                .build(),
        ];

        let filtered = exact_key_versions(versions, "a.txt");
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|v| v.version_id.as_deref() != Some("v9")));
        assert_eq!(filtered[1].is_latest, Some(true));
    }

    #[test]
    fn version_filter_returns_empty_for_unknown_key() {
        let versions = vec![
            ObjectVersion::builder()
                .key("a.txt")
                .version_id("v1")
                .build(),
        ];
        assert!(exact_key_versions(versions, "b.txt").is_empty());
    }
}
