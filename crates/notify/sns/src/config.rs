/// Configuration for the SNS lifecycle publisher.
///
/// One topic ARN per event kind. Deployments supply these through
/// `BLISS_REQUEST_SNS_ARN`, `BLISS_RESPONSE_SNS_ARN`, and
/// `BLISS_REQUEST_CANCEL_SNS_ARN`.
#[derive(Debug, Clone)]
pub struct SnsNotifierConfig {
    /// AWS region (e.g. `"us-east-2"`).
    pub region: String,

    /// Optional endpoint URL override for local development (e.g.
    /// `LocalStack`).
    pub endpoint_url: Option<String>,

    /// Topic for request-received events.
    pub request_topic_arn: String,

    /// Topic for response-sent events.
    pub response_topic_arn: String,

    /// Topic for request-canceled events.
    pub cancel_topic_arn: String,
}

impl SnsNotifierConfig {
    /// Create a config with the given region and topic ARNs.
    pub fn new(
        region: impl Into<String>,
        request_topic_arn: impl Into<String>,
        response_topic_arn: impl Into<String>,
        cancel_topic_arn: impl Into<String>,
    ) -> Self {
        Self {
            region: region.into(),
            endpoint_url: None,
            request_topic_arn: request_topic_arn.into(),
            response_topic_arn: response_topic_arn.into(),
            cancel_topic_arn: cancel_topic_arn.into(),
        }
    }

    /// Set the endpoint URL override.
    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_all_topics() {
        let cfg = SnsNotifierConfig::new(
            "us-east-2",
            "arn:aws:sns:us-east-2:123:bliss-request",
            "arn:aws:sns:us-east-2:123:bliss-response",
            "arn:aws:sns:us-east-2:123:bliss-cancel",
        )
        .with_endpoint_url("http://localhost:4566");

        assert_eq!(cfg.region, "us-east-2");
        assert!(cfg.request_topic_arn.ends_with("bliss-request"));
        assert!(cfg.response_topic_arn.ends_with("bliss-response"));
        assert!(cfg.cancel_topic_arn.ends_with("bliss-cancel"));
        assert_eq!(cfg.endpoint_url.as_deref(), Some("http://localhost:4566"));
    }
}
