/// Configuration for an [`S3VideoStore`](crate::S3VideoStore).
///
/// Deployments supply bucket names through `BLISS_REQUEST_BUCKET`,
/// `BLISS_RESPONSE_BUCKET`, and `BLISS_RESPONSE_OUTPUT_BUCKET`.
#[derive(Debug, Clone)]
pub struct S3VideoConfig {
    /// S3 bucket holding the video objects.
    pub bucket: String,

    /// AWS region (e.g. `"us-east-2"`).
    pub region: String,

    /// Optional endpoint URL override for local development (e.g.
    /// `LocalStack`).
    pub endpoint_url: Option<String>,
}

impl S3VideoConfig {
    /// Create a config for the given bucket and region.
    pub fn new(bucket: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            region: region.into(),
            endpoint_url: None,
        }
    }

    /// Set the endpoint URL override.
    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }
}

/// Configuration for a [`CdnVideoStore`](crate::CdnVideoStore).
///
/// Deployments supply the base URL through `BLISS_RESPONSE_CDN_URL`; the
/// key pair id and secret belong to the CDN's signing domain, not the
/// bucket.
#[derive(Clone)]
pub struct CdnConfig {
    /// Base URL of the CDN distribution fronting the output bucket.
    pub base_url: String,

    /// Identifier of the signing key pair, carried in issued URLs.
    pub key_pair_id: String,

    /// Signing secret. Never logged.
    pub secret: Vec<u8>,
}

impl std::fmt::Debug for CdnConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CdnConfig")
            .field("base_url", &self.base_url)
            .field("key_pair_id", &self.key_pair_id)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl CdnConfig {
    /// Create a config for the given distribution and key material.
    pub fn new(
        base_url: impl Into<String>,
        key_pair_id: impl Into<String>,
        secret: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            key_pair_id: key_pair_id.into(),
            secret: secret.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s3_config_builder() {
        let cfg = S3VideoConfig::new("bliss-request-videos", "us-east-2")
            .with_endpoint_url("http://localhost:4566");
        assert_eq!(cfg.bucket, "bliss-request-videos");
        assert_eq!(cfg.region, "us-east-2");
        assert_eq!(cfg.endpoint_url.as_deref(), Some("http://localhost:4566"));
    }

    #[test]
    fn cdn_config_debug_redacts_secret() {
        let cfg = CdnConfig::new("https://cdn.example.com", "KP123", b"topsecret".to_vec());
        let debug = format!("{cfg:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("topsecret"));
        assert!(debug.contains("KP123"));
    }
}
