//! Response DTOs for the storage gateway.
//!
//! These are explicit typed views over the backend SDK's output shapes.
//! They serialize as camelCase JSON and never expose raw backend types to
//! clients.

pub mod object;
pub mod version;

use aws_sdk_s3::primitives::DateTime as BackendDateTime;
use chrono::{DateTime, Utc};

/// Convert a backend timestamp into a chrono UTC timestamp.
pub(crate) fn to_utc(value: Option<BackendDateTime>) -> Option<DateTime<Utc>> {
    value.and_then(|ts| DateTime::from_timestamp(ts.secs(), ts.subsec_nanos()))
}
