use thiserror::Error;

use bliss_blob::BlobError;
use bliss_metadata::MetadataError;

use crate::transcode::TranscodeError;

/// Failure of a lifecycle workflow.
///
/// Every variant carries a human-readable message; [`BlissError::code`]
/// supplies the machine-readable code. Callers never see raw transport
/// errors: adapter failures are stringified at the adapter boundary and
/// wrapped here.
///
/// Notification failures are deliberately absent: publishing is
/// best-effort and surfaces as a `notified = false` receipt field, never
/// as an error.
#[derive(Debug, Error)]
pub enum BlissError {
    /// A required field was missing or empty at the boundary. The
    /// workflow never started.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The blob store failed mid-workflow. Remaining steps were aborted;
    /// completed steps are not compensated.
    #[error("storage failure: {0}")]
    Storage(String),

    /// The metadata store failed mid-workflow. Remaining steps were
    /// aborted; completed steps are not compensated.
    #[error("metadata failure: {0}")]
    Metadata(String),

    /// A referenced id or blob does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The external transcoder rejected the video.
    #[error("transcode failure: {0}")]
    Transcode(String),

    /// The coordinator was assembled without a required collaborator.
    #[error("invalid configuration: {0}")]
    Configuration(String),
}

impl BlissError {
    /// Machine-readable code for this failure.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "BLISS_VALIDATION_FAILED",
            Self::Storage(_) => "BLISS_STORAGE_FAILED",
            Self::Metadata(_) => "BLISS_METADATA_FAILED",
            Self::NotFound(_) => "BLISS_NOT_FOUND",
            Self::Transcode(_) => "BLISS_TRANSCODE_FAILED",
            Self::Configuration(_) => "BLISS_CONFIGURATION_INVALID",
        }
    }
}

impl From<BlobError> for BlissError {
    fn from(err: BlobError) -> Self {
        match err {
            BlobError::NotFound(id) => Self::NotFound(format!("video {id} does not exist")),
            BlobError::Storage(msg) | BlobError::Signing(msg) => Self::Storage(msg),
        }
    }
}

impl From<MetadataError> for BlissError {
    fn from(err: MetadataError) -> Self {
        Self::Metadata(err.to_string())
    }
}

impl From<TranscodeError> for BlissError {
    fn from(err: TranscodeError) -> Self {
        Self::Transcode(err.to_string())
    }
}
