use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::BlobError;
use crate::types::SignedUrl;

/// Content-addressed storage of video bytes, keyed by record id.
///
/// Implementations must be `Send + Sync`. Blob existence and metadata
/// existence are independent facts; callers re-check existence rather
/// than trusting an earlier snapshot.
#[async_trait]
pub trait VideoStore: Send + Sync {
    /// Store video bytes under `id`, overwriting any previous object.
    async fn put(&self, id: i64, data: Bytes, content_type: &str) -> Result<(), BlobError>;

    /// Whether an object is present under `id`. A backing-store "not
    /// found" is `Ok(false)`; any other failure is an error.
    async fn exists(&self, id: i64) -> Result<bool, BlobError>;

    /// Remove the object under `id`. Deleting a missing object is not an
    /// error. Only the cancellation policy uses this.
    async fn delete(&self, id: i64) -> Result<(), BlobError>;

    /// Issue a download URL for `id`, valid for `ttl` from issuance.
    async fn download_url(&self, id: i64, ttl: Duration) -> Result<SignedUrl, BlobError>;
}
