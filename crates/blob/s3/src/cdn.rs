use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use bytes::Bytes;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::debug;

use bliss_blob::error::BlobError;
use bliss_blob::signer::UrlSigner;
use bliss_blob::store::VideoStore;
use bliss_blob::types::SignedUrl;

use crate::config::CdnConfig;
use crate::store::S3VideoStore;

/// [`UrlSigner`] producing time-limited, tamper-evident URLs of the form
/// `{url}?Expires={ts}&Key-Pair-Id={id}&Signature={mac}`.
///
/// The signature is an HMAC-SHA256 over the URL and its expiry, encoded
/// URL-safe base64. The edge holding the same secret rejects any URL
/// whose signature does not match or whose expiry has passed.
pub struct HmacUrlSigner {
    key_pair_id: String,
    secret: Vec<u8>,
}

impl std::fmt::Debug for HmacUrlSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacUrlSigner")
            .field("key_pair_id", &self.key_pair_id)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl HmacUrlSigner {
    /// Create a signer from the CDN key material.
    pub fn new(key_pair_id: impl Into<String>, secret: impl Into<Vec<u8>>) -> Self {
        Self {
            key_pair_id: key_pair_id.into(),
            secret: secret.into(),
        }
    }
}

impl UrlSigner for HmacUrlSigner {
    fn sign(&self, resource_url: &str, expires_at: i64) -> Result<String, BlobError> {
        let unsigned = format!(
            "{resource_url}?Expires={expires_at}&Key-Pair-Id={}",
            self.key_pair_id
        );

        let mut mac = Hmac::<Sha256>::new_from_slice(&self.secret)
            .map_err(|e| BlobError::Signing(e.to_string()))?;
        mac.update(unsigned.as_bytes());
        let signature =
            base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

        Ok(format!("{unsigned}&Signature={signature}"))
    }
}

/// [`VideoStore`] for transcoded response videos.
///
/// Bytes live in the post-transcode S3 output bucket (delegated to an
/// inner [`S3VideoStore`]), but download URLs point at the CDN edge and
/// are signed with the CDN's own key, a separate signing domain from the
/// bucket presigner.
pub struct CdnVideoStore {
    store: S3VideoStore,
    base_url: String,
    signer: Arc<dyn UrlSigner>,
}

impl std::fmt::Debug for CdnVideoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CdnVideoStore")
            .field("store", &self.store)
            .field("base_url", &self.base_url)
            .field("signer", &"<UrlSigner>")
            .finish()
    }
}

impl CdnVideoStore {
    /// Create a store over the output bucket, issuing CDN-signed URLs
    /// with the config's key material.
    pub fn new(store: S3VideoStore, config: &CdnConfig) -> Self {
        let signer = Arc::new(HmacUrlSigner::new(
            config.key_pair_id.clone(),
            config.secret.clone(),
        ));
        Self::with_signer(store, config.base_url.clone(), signer)
    }

    /// Create a store with an explicit signer implementation.
    pub fn with_signer(
        store: S3VideoStore,
        base_url: impl Into<String>,
        signer: Arc<dyn UrlSigner>,
    ) -> Self {
        Self {
            store,
            base_url: base_url.into(),
            signer,
        }
    }

    /// CDN resource URL for a record id.
    fn resource_url(&self, id: i64) -> String {
        format!("{}/{id}", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl VideoStore for CdnVideoStore {
    async fn put(&self, id: i64, data: Bytes, content_type: &str) -> Result<(), BlobError> {
        self.store.put(id, data, content_type).await
    }

    async fn exists(&self, id: i64) -> Result<bool, BlobError> {
        self.store.exists(id).await
    }

    async fn delete(&self, id: i64) -> Result<(), BlobError> {
        self.store.delete(id).await
    }

    async fn download_url(&self, id: i64, ttl: Duration) -> Result<SignedUrl, BlobError> {
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        let expires_at = chrono::Utc::now().timestamp().saturating_add(ttl_secs);

        let url = self.signer.sign(&self.resource_url(id), expires_at)?;
        debug!(id = id, expires_at = expires_at, "cdn download url issued");

        Ok(SignedUrl {
            url,
            expires_in: ttl,
        })
    }
}
