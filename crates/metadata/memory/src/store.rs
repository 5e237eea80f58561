use async_trait::async_trait;
use dashmap::DashMap;

use bliss_core::{RequestProjection, RequestRecord, RequestView, ResponseRecord};
use bliss_metadata::error::MetadataError;
use bliss_metadata::store::RecordStore;

/// In-memory [`RecordStore`] with lazy TTL eviction.
///
/// Expired records are removed when read, simulating the backing store's
/// own TTL reaper. Requests and responses live in separate maps because
/// their id spaces are independent.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    requests: DashMap<i64, RequestRecord>,
    responses: DashMap<i64, ResponseRecord>,
}

impl MemoryRecordStore {
    /// Create a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Direct response lookup, for test assertions.
    pub fn response(&self, id: i64) -> Option<ResponseRecord> {
        self.responses.get(&id).map(|r| r.clone())
    }

    /// Number of live request records, for test assertions.
    pub fn request_count(&self) -> usize {
        self.requests.len()
    }

    fn now_epoch() -> i64 {
        chrono::Utc::now().timestamp()
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn put_request(&self, record: &RequestRecord) -> Result<i64, MetadataError> {
        self.requests.insert(record.id, record.clone());
        Ok(record.id)
    }

    async fn get_request(
        &self,
        id: i64,
        projection: RequestProjection,
    ) -> Result<Option<RequestView>, MetadataError> {
        // Lazy TTL eviction: expired records read as missing.
        if let Some(record) = self.requests.get(&id) {
            if record.expire_at <= Self::now_epoch() {
                drop(record);
                self.requests.remove(&id);
                return Ok(None);
            }
            return Ok(Some(RequestView::project(&record, projection)));
        }
        Ok(None)
    }

    async fn delete_request(&self, id: i64) -> Result<(), MetadataError> {
        self.requests.remove(&id);
        Ok(())
    }

    async fn put_response(&self, record: &ResponseRecord) -> Result<i64, MetadataError> {
        self.responses.insert(record.id, record.clone());
        Ok(record.id)
    }
}
