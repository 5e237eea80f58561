use async_trait::async_trait;

use bliss_core::LifecycleEvent;

use crate::error::NotifyError;

/// Fan-out of lifecycle events to a publish/subscribe topic.
///
/// Implementations route each event kind to its own topic and return the
/// backend's message id on success.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish `event` to the topic for its kind.
    async fn publish(&self, event: &LifecycleEvent) -> Result<String, NotifyError>;
}
