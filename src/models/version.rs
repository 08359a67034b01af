//! Represents one historical version of an object.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::to_utc;

/// A version descriptor as returned by the backend's version listing.
///
/// Ordering and retention are fully delegated to the backend; this type only
/// reshapes the entry for the JSON response.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ObjectVersionInfo {
    /// Backend-assigned version identifier.
    pub version_id: Option<String>,

    /// Timestamp when this version was written.
    pub last_modified: Option<DateTime<Utc>>,

    /// Whether this is the current version of the object.
    pub is_latest: Option<bool>,

    /// Size in bytes of this version.
    pub size: Option<i64>,
}

impl From<aws_sdk_s3::types::ObjectVersion> for ObjectVersionInfo {
    fn from(version: aws_sdk_s3::types::ObjectVersion) -> Self {
        Self {
            version_id: version.version_id,
            last_modified: to_utc(version.last_modified),
            is_latest: version.is_latest,
            size: version.size,
        }
    }
}
