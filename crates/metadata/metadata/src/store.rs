use async_trait::async_trait;

use bliss_core::{RequestProjection, RequestRecord, RequestView, ResponseRecord};

use crate::error::MetadataError;

/// Key-value persistence of request and response records.
///
/// Implementations must be `Send + Sync` and safe for concurrent access.
/// TTL enforcement is the store's own job: the coordinator writes
/// `expire_at` and never sweeps.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Upsert a request record keyed by its id. Last writer wins.
    async fn put_request(&self, record: &RequestRecord) -> Result<i64, MetadataError>;

    /// Point lookup of a request, projecting the given field subset.
    /// Returns `Ok(None)` when the key does not exist or has expired.
    async fn get_request(
        &self,
        id: i64,
        projection: RequestProjection,
    ) -> Result<Option<RequestView>, MetadataError>;

    /// Delete a request record. Deleting a non-existent key is not an
    /// error.
    async fn delete_request(&self, id: i64) -> Result<(), MetadataError>;

    /// Upsert a response record keyed by its id.
    async fn put_response(&self, record: &ResponseRecord) -> Result<i64, MetadataError>;
}
