use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::{debug, error, info, instrument};

use bliss_blob::error::BlobError;
use bliss_blob::store::VideoStore;
use bliss_blob::types::SignedUrl;

use crate::config::S3VideoConfig;

/// S3-backed [`VideoStore`] that issues download URLs by presigning
/// `GetObject` directly against the bucket.
pub struct S3VideoStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl std::fmt::Debug for S3VideoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3VideoStore")
            .field("bucket", &self.bucket)
            .field("client", &"<S3Client>")
            .finish()
    }
}

impl S3VideoStore {
    /// Create a new store by building an AWS SDK client from the
    /// standard environment credential chain.
    pub async fn new(config: &S3VideoConfig) -> Self {
        let client = build_client(config).await;
        Self::from_client(client, config)
    }

    /// Create a store from an existing S3 client.
    pub fn from_client(client: aws_sdk_s3::Client, config: &S3VideoConfig) -> Self {
        Self {
            client,
            bucket: config.bucket.clone(),
        }
    }

    /// The bucket this store writes to.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Object key for a record id.
    fn object_key(id: i64) -> String {
        id.to_string()
    }
}

#[async_trait]
impl VideoStore for S3VideoStore {
    #[instrument(skip(self, data), fields(bucket = %self.bucket, id = id, size = data.len()))]
    async fn put(&self, id: i64, data: Bytes, content_type: &str) -> Result<(), BlobError> {
        debug!("uploading video to S3");
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(Self::object_key(id))
            .body(ByteStream::from(data))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "S3 put_object failed");
                BlobError::Storage(e.to_string())
            })?;
        info!("video uploaded");
        Ok(())
    }

    #[instrument(skip(self), fields(bucket = %self.bucket, id = id))]
    async fn exists(&self, id: i64) -> Result<bool, BlobError> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(Self::object_key(id))
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_not_found() {
                    Ok(false)
                } else {
                    error!(error = %service_err, "S3 head_object failed");
                    Err(BlobError::Storage(service_err.to_string()))
                }
            }
        }
    }

    #[instrument(skip(self), fields(bucket = %self.bucket, id = id))]
    async fn delete(&self, id: i64) -> Result<(), BlobError> {
        // DeleteObject succeeds on a missing key, so this is idempotent.
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(Self::object_key(id))
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "S3 delete_object failed");
                BlobError::Storage(e.to_string())
            })?;
        info!("video deleted");
        Ok(())
    }

    #[instrument(skip(self), fields(bucket = %self.bucket, id = id, ttl_secs = ttl.as_secs()))]
    async fn download_url(&self, id: i64, ttl: Duration) -> Result<SignedUrl, BlobError> {
        let presigning = PresigningConfig::expires_in(ttl)
            .map_err(|e| BlobError::Signing(e.to_string()))?;

        let presigned = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(Self::object_key(id))
            .presigned(presigning)
            .await
            .map_err(|e| {
                error!(error = %e, "S3 presigning failed");
                BlobError::Signing(e.to_string())
            })?;

        debug!("presigned download url issued");
        Ok(SignedUrl {
            url: presigned.uri().to_string(),
            expires_in: ttl,
        })
    }
}

/// Build an AWS S3 [`Client`](aws_sdk_s3::Client) from the provided
/// configuration.
pub async fn build_client(config: &S3VideoConfig) -> aws_sdk_s3::Client {
    let mut loader = aws_config::from_env().region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        debug!(endpoint = %endpoint, "using custom S3 endpoint");
        loader = loader.endpoint_url(endpoint);
    }

    let sdk_config = loader.load().await;
    aws_sdk_s3::Client::new(&sdk_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_key_is_the_id() {
        assert_eq!(S3VideoStore::object_key(42), "42");
        assert_eq!(S3VideoStore::object_key(880_831_800), "880831800");
    }
}
