use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;

use bliss_blob::error::BlobError;
use bliss_blob::store::VideoStore;
use bliss_blob::types::SignedUrl;

/// A stored video object.
#[derive(Debug, Clone)]
struct StoredVideo {
    data: Bytes,
    content_type: String,
}

/// In-memory [`VideoStore`]. The "bucket" name only shows up in the fake
/// download URLs it issues.
#[derive(Debug)]
pub struct MemoryVideoStore {
    bucket: String,
    objects: DashMap<i64, StoredVideo>,
}

impl MemoryVideoStore {
    /// Create an empty store issuing URLs under `bucket`.
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            objects: DashMap::new(),
        }
    }

    /// The stored bytes for `id`, for test assertions.
    pub fn bytes(&self, id: i64) -> Option<Bytes> {
        self.objects.get(&id).map(|o| o.data.clone())
    }

    /// The stored content type for `id`, for test assertions.
    pub fn content_type(&self, id: i64) -> Option<String> {
        self.objects.get(&id).map(|o| o.content_type.clone())
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the store holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[async_trait]
impl VideoStore for MemoryVideoStore {
    async fn put(&self, id: i64, data: Bytes, content_type: &str) -> Result<(), BlobError> {
        self.objects.insert(
            id,
            StoredVideo {
                data,
                content_type: content_type.to_owned(),
            },
        );
        Ok(())
    }

    async fn exists(&self, id: i64) -> Result<bool, BlobError> {
        Ok(self.objects.contains_key(&id))
    }

    async fn delete(&self, id: i64) -> Result<(), BlobError> {
        self.objects.remove(&id);
        Ok(())
    }

    async fn download_url(&self, id: i64, ttl: Duration) -> Result<SignedUrl, BlobError> {
        Ok(SignedUrl {
            url: format!("memory://{}/{id}?Expires={}", self.bucket, ttl.as_secs()),
            expires_in: ttl,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_exists_delete_cycle() {
        let store = MemoryVideoStore::new("request-videos");
        assert!(!store.exists(1).await.unwrap());

        store
            .put(1, Bytes::from_static(b"mp4-bytes"), "video/mp4")
            .await
            .unwrap();
        assert!(store.exists(1).await.unwrap());
        assert_eq!(store.content_type(1).as_deref(), Some("video/mp4"));

        store.delete(1).await.unwrap();
        assert!(!store.exists(1).await.unwrap());
        // Deleting again is fine.
        store.delete(1).await.unwrap();
    }

    #[tokio::test]
    async fn put_overwrites() {
        let store = MemoryVideoStore::new("request-videos");
        store
            .put(2, Bytes::from_static(b"v1"), "video/mp4")
            .await
            .unwrap();
        store
            .put(2, Bytes::from_static(b"v2"), "video/webm")
            .await
            .unwrap();
        assert_eq!(store.bytes(2).unwrap(), Bytes::from_static(b"v2"));
        assert_eq!(store.content_type(2).as_deref(), Some("video/webm"));
    }

    #[tokio::test]
    async fn download_url_names_bucket_and_key() {
        let store = MemoryVideoStore::new("response-output");
        let signed = store
            .download_url(7, Duration::from_secs(300))
            .await
            .unwrap();
        assert_eq!(signed.url, "memory://response-output/7?Expires=300");
        assert_eq!(signed.expires_in, Duration::from_secs(300));
    }
}
