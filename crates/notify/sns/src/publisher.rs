use async_trait::async_trait;
use tracing::{debug, error, info, instrument};

use bliss_core::{EventKind, LifecycleEvent};
use bliss_notify::error::NotifyError;
use bliss_notify::publisher::EventPublisher;

use crate::config::SnsNotifierConfig;

/// SNS-backed [`EventPublisher`] routing each event kind to its
/// configured topic ARN.
pub struct SnsPublisher {
    config: SnsNotifierConfig,
    client: aws_sdk_sns::Client,
}

impl std::fmt::Debug for SnsPublisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnsPublisher")
            .field("config", &self.config)
            .field("client", &"<SnsClient>")
            .finish()
    }
}

impl SnsPublisher {
    /// Create a publisher by building an AWS SDK client from the
    /// standard environment credential chain.
    pub async fn new(config: SnsNotifierConfig) -> Self {
        let client = build_client(&config).await;
        Self { config, client }
    }

    /// Create a publisher from an existing SNS client.
    pub fn from_client(client: aws_sdk_sns::Client, config: SnsNotifierConfig) -> Self {
        Self { config, client }
    }

    /// Topic ARN for an event kind.
    fn topic_arn(&self, kind: EventKind) -> &str {
        match kind {
            EventKind::RequestReceived => &self.config.request_topic_arn,
            EventKind::ResponseSent => &self.config.response_topic_arn,
            EventKind::RequestCanceled => &self.config.cancel_topic_arn,
        }
    }
}

#[async_trait]
impl EventPublisher for SnsPublisher {
    #[instrument(skip(self, event), fields(kind = %event.kind()))]
    async fn publish(&self, event: &LifecycleEvent) -> Result<String, NotifyError> {
        let topic_arn = self.topic_arn(event.kind());
        let message =
            serde_json::to_string(event).map_err(|e| NotifyError::Serialization(e.to_string()))?;

        debug!(topic_arn = %topic_arn, "publishing lifecycle event to SNS");

        let result = self
            .client
            .publish()
            .topic_arn(topic_arn)
            .message(message)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, topic_arn = %topic_arn, "SNS publish failed");
                NotifyError::Publish(e.to_string())
            })?;

        let message_id = result.message_id().unwrap_or("unknown").to_owned();
        info!(message_id = %message_id, topic_arn = %topic_arn, "lifecycle event published");
        Ok(message_id)
    }
}

/// Build an AWS SNS [`Client`](aws_sdk_sns::Client) from the provided
/// configuration.
pub async fn build_client(config: &SnsNotifierConfig) -> aws_sdk_sns::Client {
    let mut loader = aws_config::from_env().region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        debug!(endpoint = %endpoint, "using custom SNS endpoint");
        loader = loader.endpoint_url(endpoint);
    }

    let sdk_config = loader.load().await;
    aws_sdk_sns::Client::new(&sdk_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn publisher() -> SnsPublisher {
        let config =
            SnsNotifierConfig::new("us-east-2", "arn:request", "arn:response", "arn:cancel");
        // A client built from a bare config never dials out; routing is
        // testable without a network.
        let client = aws_sdk_sns::Client::from_conf(
            aws_sdk_sns::Config::builder()
                .behavior_version(aws_sdk_sns::config::BehaviorVersion::latest())
                .build(),
        );
        SnsPublisher::from_client(client, config)
    }

    #[test]
    fn each_kind_routes_to_its_topic() {
        let publisher = publisher();
        assert_eq!(publisher.topic_arn(EventKind::RequestReceived), "arn:request");
        assert_eq!(publisher.topic_arn(EventKind::ResponseSent), "arn:response");
        assert_eq!(publisher.topic_arn(EventKind::RequestCanceled), "arn:cancel");
    }
}
