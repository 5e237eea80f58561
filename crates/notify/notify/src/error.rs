use thiserror::Error;

/// Errors from notification publishing.
///
/// The coordinator catches these, logs them, and reports a boolean
/// outcome instead of failing the enclosing workflow.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The backing topic rejected the publish or was unreachable.
    #[error("publish failed: {0}")]
    Publish(String),

    /// The event could not be serialized to a message body.
    #[error("event serialization failed: {0}")]
    Serialization(String),
}
