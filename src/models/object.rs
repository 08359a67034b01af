//! Represents an object (file) stored in the backend bucket.

use aws_sdk_s3::primitives::ByteStream;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::to_utc;

/// A single entry in a bucket listing.
///
/// An object corresponds to a stored file or binary content, addressed by its
/// key. The summary carries metadata only, never the content bytes.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ObjectSummary {
    /// Object key (identifier within the bucket).
    pub key: String,

    /// Size in bytes, as reported by the backend.
    pub size: Option<i64>,

    /// Timestamp when the object was last modified.
    pub last_modified: Option<DateTime<Utc>>,

    /// Backend checksum for integrity verification.
    pub etag: Option<String>,
}

impl From<aws_sdk_s3::types::Object> for ObjectSummary {
    fn from(obj: aws_sdk_s3::types::Object) -> Self {
        Self {
            key: obj.key.unwrap_or_default(),
            size: obj.size,
            last_modified: to_utc(obj.last_modified),
            etag: obj.e_tag,
        }
    }
}

/// Upload result returned to the client: the server-generated key.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub file_name: String,
}

/// A downloaded object ready to be streamed out to the client.
pub struct ObjectDownload {
    /// Content type (MIME type) stored with the object.
    pub content_type: Option<String>,

    /// Content length in bytes, if the backend reported one.
    pub content_length: Option<i64>,

    /// The object payload as a byte stream.
    pub body: ByteStream,
}
