use std::sync::Arc;

use bytes::Bytes;
use tokio::sync::oneshot;
use tracing::{debug, error, info, instrument};

use bliss_blob::{SignedUrl, VideoStore};
use bliss_core::{Clock, IdAllocator, LifecycleEvent, RequestProjection, RequestRecord,
    RequestView, ResponseRecord, SystemClock};
use bliss_metadata::RecordStore;
use bliss_notify::EventPublisher;

use crate::config::CoordinatorConfig;
use crate::error::BlissError;
use crate::receipt::{CancelReceipt, RequestReceipt, ResponseReceipt};
use crate::transcode::{PassthroughTranscoder, Transcoder};

/// Sequences the request/response lifecycle across three stores that
/// share no transaction boundary.
///
/// Ordering is the whole contract: blob writes happen strictly before
/// the metadata write that makes them discoverable, the metadata write
/// happens strictly before the notification, and a step failure aborts
/// everything after it without compensating what already ran. The
/// reachable partial states are therefore only "orphan blob, no record"
/// and "record written, no notification" — never a record pointing at a
/// video that was not fully uploaded.
///
/// The coordinator holds no per-request state; all collaborators are
/// injected trait objects, so one instance serves any number of
/// concurrent workflows.
pub struct BlissCoordinator {
    ids: IdAllocator,
    records: Arc<dyn RecordStore>,
    request_videos: Arc<dyn VideoStore>,
    response_videos: Arc<dyn VideoStore>,
    response_output: Arc<dyn VideoStore>,
    publisher: Arc<dyn EventPublisher>,
    transcoder: Arc<dyn Transcoder>,
    config: CoordinatorConfig,
}

impl std::fmt::Debug for BlissCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlissCoordinator")
            .field("ids", &self.ids)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl BlissCoordinator {
    /// Start assembling a coordinator.
    pub fn builder() -> CoordinatorBuilder {
        CoordinatorBuilder::default()
    }

    /// Record a data-only request and notify the responder.
    ///
    /// The payload is stored verbatim; `video_present` starts false and
    /// flips if a video is uploaded for this id later.
    #[instrument(skip(self, payload), fields(requester = %requester, responder = %responder))]
    pub async fn submit_data_request(
        &self,
        requester: &str,
        responder: &str,
        payload: serde_json::Value,
    ) -> Result<RequestReceipt, BlissError> {
        require("requester", requester)?;
        require("responder", responder)?;

        let lease = self.ids.allocate();
        let record = RequestRecord {
            id: lease.id,
            requester: requester.to_owned(),
            responder: responder.to_owned(),
            payload: Some(payload),
            video_present: false,
            expire_at: lease.expires_at,
        };
        self.records.put_request(&record).await?;
        debug!(request_id = lease.id, "data request recorded");

        let notified = self
            .notify(LifecycleEvent::RequestReceived {
                request_id: lease.id,
                requester: requester.to_owned(),
                responder: responder.to_owned(),
            })
            .await;

        info!(request_id = lease.id, notified, "data request submitted");
        Ok(RequestReceipt {
            request_id: lease.id,
            expires_at: lease.expires_at,
            notified,
        })
    }

    /// Upload a request video, record the request, and notify the
    /// responder.
    ///
    /// The blob write precedes the metadata write; if the upload fails
    /// no record is created, and if the record write fails the orphaned
    /// blob is left behind for the store's lifecycle rules to reap.
    #[instrument(skip(self, data), fields(requester = %requester, responder = %responder, bytes = data.len()))]
    pub async fn submit_video_request(
        &self,
        requester: &str,
        responder: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<RequestReceipt, BlissError> {
        require("requester", requester)?;
        require("responder", responder)?;
        if data.is_empty() {
            return Err(BlissError::Validation("video data is empty".to_owned()));
        }

        let lease = self.ids.allocate();
        self.request_videos
            .put(lease.id, data, content_type)
            .await?;
        debug!(request_id = lease.id, "request video uploaded");

        let record = RequestRecord {
            id: lease.id,
            requester: requester.to_owned(),
            responder: responder.to_owned(),
            payload: None,
            video_present: true,
            expire_at: lease.expires_at,
        };
        self.records.put_request(&record).await?;

        let notified = self
            .notify(LifecycleEvent::RequestReceived {
                request_id: lease.id,
                requester: requester.to_owned(),
                responder: responder.to_owned(),
            })
            .await;

        info!(request_id = lease.id, notified, "video request submitted");
        Ok(RequestReceipt {
            request_id: lease.id,
            expires_at: lease.expires_at,
            notified,
        })
    }

    /// Produce a short-lived download URL for a request video.
    ///
    /// Checks blob existence first so absence surfaces as
    /// [`BlissError::NotFound`] rather than a signed URL to nothing.
    #[instrument(skip(self))]
    pub async fn fetch_request_video_url(&self, request_id: i64) -> Result<SignedUrl, BlissError> {
        if !self.request_videos.exists(request_id).await? {
            return Err(BlissError::NotFound(format!(
                "no video uploaded for request {request_id}"
            )));
        }
        let url = self
            .request_videos
            .download_url(request_id, self.config.request_url_ttl)
            .await?;
        debug!(request_id, "request video URL issued");
        Ok(url)
    }

    /// Fetch the requester identity for a request, or `None` when the
    /// record is absent or expired.
    #[instrument(skip(self))]
    pub async fn fetch_request_data(
        &self,
        request_id: i64,
    ) -> Result<Option<RequestView>, BlissError> {
        let view = self
            .records
            .get_request(request_id, RequestProjection::Requester)
            .await?;
        Ok(view)
    }

    /// Cancel a pending request: delete its record, optionally its video
    /// blob, and notify.
    ///
    /// Idempotent — canceling an id with no record still succeeds and
    /// still publishes, since the record may simply have expired first.
    #[instrument(skip(self))]
    pub async fn cancel_request(&self, request_id: i64) -> Result<CancelReceipt, BlissError> {
        self.records.delete_request(request_id).await?;

        let mut video_deleted = false;
        if self.config.delete_video_on_cancel {
            self.request_videos.delete(request_id).await?;
            video_deleted = true;
        }

        let requested_at = IdAllocator::issued_at(request_id);
        let (request_date, request_time_millis) = LifecycleEvent::date_time_fields(requested_at);
        let notified = self
            .notify(LifecycleEvent::RequestCanceled {
                request_id,
                request_date,
                request_time_millis,
            })
            .await;

        info!(request_id, video_deleted, notified, "request canceled");
        Ok(CancelReceipt {
            request_id,
            video_deleted,
            notified,
        })
    }

    /// Fulfill a request with a response video.
    ///
    /// Uploads the raw video, transmuxes it into the delivery rendition,
    /// stores that in the output location, records the response, and
    /// notifies the requester. `request_id` is taken on faith: no lookup
    /// verifies it, so a response to a canceled or never-issued request
    /// is recorded all the same.
    #[instrument(skip(self, data), fields(requester = %requester, responder = %responder, bytes = data.len()))]
    pub async fn submit_response(
        &self,
        request_id: i64,
        requester: &str,
        responder: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<ResponseReceipt, BlissError> {
        require("requester", requester)?;
        require("responder", responder)?;
        if data.is_empty() {
            return Err(BlissError::Validation("video data is empty".to_owned()));
        }

        let lease = self.ids.allocate();
        self.response_videos
            .put(lease.id, data.clone(), content_type)
            .await?;
        debug!(response_id = lease.id, "raw response video uploaded");

        let rendition = self.transcoder.transmux(data, content_type).await?;
        self.response_output
            .put(lease.id, rendition, content_type)
            .await?;
        debug!(response_id = lease.id, "delivery rendition stored");

        let record = ResponseRecord {
            id: lease.id,
            request_id,
            requester: requester.to_owned(),
            responder: responder.to_owned(),
            expire_at: lease.expires_at,
        };
        self.records.put_response(&record).await?;

        let requested_at = IdAllocator::issued_at(request_id);
        let (request_date, request_time_millis) = LifecycleEvent::date_time_fields(requested_at);
        let notified = self
            .notify(LifecycleEvent::ResponseSent {
                response_id: lease.id,
                requester: requester.to_owned(),
                responder: responder.to_owned(),
                request_date,
                request_time_millis,
            })
            .await;

        info!(response_id = lease.id, request_id, notified, "response submitted");
        Ok(ResponseReceipt {
            response_id: lease.id,
            request_id,
            expires_at: lease.expires_at,
            notified,
        })
    }

    /// Produce a download URL for a delivery-ready response video.
    #[instrument(skip(self))]
    pub async fn fetch_response_video_url(
        &self,
        response_id: i64,
    ) -> Result<SignedUrl, BlissError> {
        if !self.response_output.exists(response_id).await? {
            return Err(BlissError::NotFound(format!(
                "no delivery video for response {response_id}"
            )));
        }
        let url = self
            .response_output
            .download_url(response_id, self.config.response_url_ttl)
            .await?;
        debug!(response_id, "response video URL issued");
        Ok(url)
    }

    /// Publish a lifecycle event from a spawned task.
    ///
    /// The publish runs detached so a caller dropping mid-await cannot
    /// cancel an already dispatched notification; the oneshot only
    /// reports whether it landed. Failures are logged and swallowed —
    /// the store writes already committed, and the workflow's outcome
    /// must not depend on the notification channel.
    async fn notify(&self, event: LifecycleEvent) -> bool {
        let publisher = Arc::clone(&self.publisher);
        let (done_tx, done_rx) = oneshot::channel();
        tokio::spawn(async move {
            let kind = event.kind();
            let outcome = publisher.publish(&event).await;
            match &outcome {
                Ok(message_id) => {
                    debug!(%kind, message_id = %message_id, "lifecycle event published");
                }
                Err(err) => {
                    error!(%kind, error = %err, "lifecycle event publish failed");
                }
            }
            let _ = done_tx.send(outcome.is_ok());
        });
        done_rx.await.unwrap_or(false)
    }
}

fn require(field: &str, value: &str) -> Result<(), BlissError> {
    if value.trim().is_empty() {
        return Err(BlissError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Assembles a [`BlissCoordinator`] from injected collaborators.
///
/// The stores and the publisher are required; the clock, transcoder,
/// and config fall back to production defaults.
#[derive(Default)]
pub struct CoordinatorBuilder {
    clock: Option<Arc<dyn Clock>>,
    records: Option<Arc<dyn RecordStore>>,
    request_videos: Option<Arc<dyn VideoStore>>,
    response_videos: Option<Arc<dyn VideoStore>>,
    response_output: Option<Arc<dyn VideoStore>>,
    publisher: Option<Arc<dyn EventPublisher>>,
    transcoder: Option<Arc<dyn Transcoder>>,
    config: Option<CoordinatorConfig>,
}

impl std::fmt::Debug for CoordinatorBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoordinatorBuilder")
            .field("has_records", &self.records.is_some())
            .field("has_request_videos", &self.request_videos.is_some())
            .field("has_response_videos", &self.response_videos.is_some())
            .field("has_response_output", &self.response_output.is_some())
            .field("has_publisher", &self.publisher.is_some())
            .finish_non_exhaustive()
    }
}

impl CoordinatorBuilder {
    /// Override the wall clock (tests inject a manual one).
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set the metadata record store.
    #[must_use]
    pub fn records(mut self, records: Arc<dyn RecordStore>) -> Self {
        self.records = Some(records);
        self
    }

    /// Set the request video blob store.
    #[must_use]
    pub fn request_videos(mut self, store: Arc<dyn VideoStore>) -> Self {
        self.request_videos = Some(store);
        self
    }

    /// Set the raw response video blob store.
    #[must_use]
    pub fn response_videos(mut self, store: Arc<dyn VideoStore>) -> Self {
        self.response_videos = Some(store);
        self
    }

    /// Set the delivery-ready response video store.
    #[must_use]
    pub fn response_output(mut self, store: Arc<dyn VideoStore>) -> Self {
        self.response_output = Some(store);
        self
    }

    /// Set the lifecycle event publisher.
    #[must_use]
    pub fn publisher(mut self, publisher: Arc<dyn EventPublisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    /// Override the transcoder (defaults to passthrough).
    #[must_use]
    pub fn transcoder(mut self, transcoder: Arc<dyn Transcoder>) -> Self {
        self.transcoder = Some(transcoder);
        self
    }

    /// Override the policy config (defaults to production values).
    #[must_use]
    pub fn config(mut self, config: CoordinatorConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Finish assembly, failing if a required collaborator is missing.
    pub fn build(self) -> Result<BlissCoordinator, BlissError> {
        let records = self.records.ok_or_else(|| missing("record store"))?;
        let request_videos = self
            .request_videos
            .ok_or_else(|| missing("request video store"))?;
        let response_videos = self
            .response_videos
            .ok_or_else(|| missing("response video store"))?;
        let response_output = self
            .response_output
            .ok_or_else(|| missing("response output store"))?;
        let publisher = self.publisher.ok_or_else(|| missing("event publisher"))?;

        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let config = self.config.unwrap_or_default();
        let ttl_secs = i64::try_from(config.record_ttl.as_secs()).unwrap_or(i64::MAX);

        Ok(BlissCoordinator {
            ids: IdAllocator::with_ttl(clock, ttl_secs),
            records,
            request_videos,
            response_videos,
            response_output,
            publisher,
            transcoder: self
                .transcoder
                .unwrap_or_else(|| Arc::new(PassthroughTranscoder)),
            config,
        })
    }
}

fn missing(what: &str) -> BlissError {
    BlissError::Configuration(format!("{what} is required"))
}
