/// Opaque URL signing capability, as offered by a CDN edge.
///
/// A distinct signing domain from the bucket presigner: the key material
/// lives with the CDN, not the bucket. Implementations take a fully
/// formed resource URL and return it with an attached, tamper-evident
/// expiry.
pub trait UrlSigner: Send + Sync {
    /// Sign `resource_url` so it stays valid until `expires_at` (unix
    /// seconds).
    fn sign(&self, resource_url: &str, expires_at: i64) -> Result<String, crate::BlobError>;
}
