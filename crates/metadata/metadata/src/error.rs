use thiserror::Error;

/// Errors from metadata store operations.
///
/// An absent key is *not* an error; lookups return `Ok(None)` for it.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// Transport or auth failure talking to the backing store.
    #[error("metadata backend error: {0}")]
    Backend(String),

    /// A stored item could not be decoded into a record.
    #[error("metadata serialization error: {0}")]
    Serialization(String),

    /// The store could not be reached or configured.
    #[error("metadata connection error: {0}")]
    Connection(String),
}
