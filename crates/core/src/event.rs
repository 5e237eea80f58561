use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle event fanned out to the notification topic.
///
/// Serialized as a flat JSON object with a kind tag, matching the wire
/// schema consumed by the downstream notification service (which turns
/// these into push notifications). Request date/time fields are derived
/// by inverting the request id back to its creation instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "MESSAGE")]
pub enum LifecycleEvent {
    /// A client submitted a request (with or without a video).
    #[serde(rename = "BLISS_REQUEST_RECEIVED")]
    RequestReceived {
        #[serde(rename = "BLISS_REQUEST_ID")]
        request_id: i64,
        #[serde(rename = "BLISS_REQUESTER")]
        requester: String,
        #[serde(rename = "BLISS_RESPONDER")]
        responder: String,
    },
    /// A responder fulfilled a request with a video reply.
    #[serde(rename = "BLISS_RESPONSE_SENT")]
    ResponseSent {
        #[serde(rename = "BLISS_RESPONSE_ID")]
        response_id: i64,
        #[serde(rename = "BLISS_REQUESTER")]
        requester: String,
        #[serde(rename = "BLISS_RESPONDER")]
        responder: String,
        #[serde(rename = "BLISS_REQUEST_DATE")]
        request_date: String,
        #[serde(rename = "BLISS_REQUEST_TIME")]
        request_time_millis: i64,
    },
    /// A client canceled a pending request.
    #[serde(rename = "BLISS_REQUEST_CANCELED")]
    RequestCanceled {
        #[serde(rename = "BLISS_REQUEST_ID")]
        request_id: i64,
        #[serde(rename = "BLISS_REQUEST_DATE")]
        request_date: String,
        #[serde(rename = "BLISS_REQUEST_TIME")]
        request_time_millis: i64,
    },
}

/// Discriminant of a [`LifecycleEvent`]; publishers route on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    RequestReceived,
    ResponseSent,
    RequestCanceled,
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::RequestReceived => "BLISS_REQUEST_RECEIVED",
            Self::ResponseSent => "BLISS_RESPONSE_SENT",
            Self::RequestCanceled => "BLISS_REQUEST_CANCELED",
        };
        f.write_str(name)
    }
}

impl LifecycleEvent {
    /// The event's kind tag.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::RequestReceived { .. } => EventKind::RequestReceived,
            Self::ResponseSent { .. } => EventKind::ResponseSent,
            Self::RequestCanceled { .. } => EventKind::RequestCanceled,
        }
    }

    /// Split an instant into the wire date/time pair.
    pub fn date_time_fields(at: DateTime<Utc>) -> (String, i64) {
        (at.format("%Y-%m-%d").to_string(), at.timestamp_millis())
    }
}
