use std::time::Duration;

/// Tunable policy for the lifecycle coordinator.
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Record time-to-live; `expire_at` is always creation plus this.
    /// Current policy is one hour.
    pub record_ttl: Duration,

    /// Validity window of request video download URLs.
    pub request_url_ttl: Duration,

    /// Validity window of response video download URLs.
    pub response_url_ttl: Duration,

    /// Whether cancellation also deletes the request video blob. Off by
    /// default: orphaned blobs are an accepted storage cost, and the
    /// right policy is unresolved.
    pub delete_video_on_cancel: bool,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            record_ttl: Duration::from_secs(60 * 60),
            request_url_ttl: Duration::from_secs(60 * 5),
            response_url_ttl: Duration::from_secs(60 * 60),
            delete_video_on_cancel: false,
        }
    }
}

impl CoordinatorConfig {
    /// Set the record time-to-live.
    #[must_use]
    pub fn with_record_ttl(mut self, ttl: Duration) -> Self {
        self.record_ttl = ttl;
        self
    }

    /// Set the request video URL validity window.
    #[must_use]
    pub fn with_request_url_ttl(mut self, ttl: Duration) -> Self {
        self.request_url_ttl = ttl;
        self
    }

    /// Set the response video URL validity window.
    #[must_use]
    pub fn with_response_url_ttl(mut self, ttl: Duration) -> Self {
        self.response_url_ttl = ttl;
        self
    }

    /// Also delete the request video blob on cancellation.
    #[must_use]
    pub fn with_delete_video_on_cancel(mut self, delete: bool) -> Self {
        self.delete_video_on_cancel = delete;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_current_policy() {
        let config = CoordinatorConfig::default();
        assert_eq!(config.record_ttl, Duration::from_secs(3600));
        assert_eq!(config.request_url_ttl, Duration::from_secs(300));
        assert_eq!(config.response_url_ttl, Duration::from_secs(3600));
        assert!(!config.delete_video_on_cancel);
    }

    #[test]
    fn builder_chain() {
        let config = CoordinatorConfig::default()
            .with_record_ttl(Duration::from_secs(7 * 24 * 3600))
            .with_delete_video_on_cancel(true);
        assert_eq!(config.record_ttl, Duration::from_secs(7 * 24 * 3600));
        assert!(config.delete_video_on_cancel);
    }
}
