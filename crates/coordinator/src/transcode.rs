use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Failure of the external transcoding operation.
#[derive(Debug, Error)]
#[error("transmux failed: {0}")]
pub struct TranscodeError(pub String);

/// Opaque external transcoding capability.
///
/// The coordinator submits the raw response bytes and stores whatever
/// comes back in the output location; the codec work itself is somebody
/// else's problem.
#[async_trait]
pub trait Transcoder: Send + Sync {
    /// Transmux `data` into a delivery-ready rendition.
    async fn transmux(&self, data: Bytes, content_type: &str) -> Result<Bytes, TranscodeError>;
}

/// [`Transcoder`] that returns the input unchanged.
///
/// The current pipeline pushes the same stream to the output bucket and
/// leaves format conversion to a later stage.
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughTranscoder;

#[async_trait]
impl Transcoder for PassthroughTranscoder {
    async fn transmux(&self, data: Bytes, _content_type: &str) -> Result<Bytes, TranscodeError> {
        Ok(data)
    }
}
