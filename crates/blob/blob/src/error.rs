use thiserror::Error;

/// Errors from video blob storage operations.
#[derive(Debug, Error)]
pub enum BlobError {
    /// No object is stored under the given key.
    #[error("video not found: {0}")]
    NotFound(i64),

    /// Transport or auth failure talking to the backing store. Not
    /// retried internally; propagated to the caller.
    #[error("video storage error: {0}")]
    Storage(String),

    /// A signed URL could not be produced.
    #[error("url signing error: {0}")]
    Signing(String),
}
