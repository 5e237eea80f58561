use serde::{Deserialize, Serialize};

/// A client's ask for a video message, persisted in the metadata store.
///
/// Created once on submission and never mutated in place, except that a
/// later video upload flips `video_present`. Deleted on explicit
/// cancellation, or reaped by the store after `expire_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestRecord {
    /// Time-derived identifier; also the blob key and the table key.
    pub id: i64,
    /// The requesting client's identity.
    pub requester: String,
    /// The responding celebrity's identity.
    pub responder: String,
    /// Free-form structured data supplied by the client. Present for
    /// data-only requests.
    pub payload: Option<serde_json::Value>,
    /// True once a request video has been uploaded.
    pub video_present: bool,
    /// Unix timestamp after which the store may delete the record.
    pub expire_at: i64,
}

/// A responder's video reply, persisted in the metadata store.
///
/// Immutable once written. `request_id` is a lookup back-reference only;
/// no referential integrity is enforced across stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRecord {
    /// Time-derived identifier, independent of the request id space.
    pub id: i64,
    /// Id of the originating request.
    pub request_id: i64,
    /// Copied from the originating request for notification purposes.
    pub requester: String,
    /// Copied from the originating request for notification purposes.
    pub responder: String,
    /// Unix timestamp after which the store may delete the record.
    pub expire_at: i64,
}

/// Field subset to fetch on a request point lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestProjection {
    /// Every stored field.
    Full,
    /// Only the requester identity.
    Requester,
}

/// A possibly partial view of a [`RequestRecord`], as returned by a
/// projected point lookup. Fields outside the projection are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestView {
    pub id: i64,
    pub requester: Option<String>,
    pub responder: Option<String>,
    pub payload: Option<serde_json::Value>,
    pub video_present: Option<bool>,
    pub expire_at: Option<i64>,
}

impl RequestView {
    /// Project a full record down to the requested field subset.
    pub fn project(record: &RequestRecord, projection: RequestProjection) -> Self {
        match projection {
            RequestProjection::Full => Self {
                id: record.id,
                requester: Some(record.requester.clone()),
                responder: Some(record.responder.clone()),
                payload: record.payload.clone(),
                video_present: Some(record.video_present),
                expire_at: Some(record.expire_at),
            },
            RequestProjection::Requester => Self {
                id: record.id,
                requester: Some(record.requester.clone()),
                ..Self::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> RequestRecord {
        RequestRecord {
            id: 42,
            requester: "c1".to_owned(),
            responder: "starX".to_owned(),
            payload: Some(serde_json::json!({"note": "hi"})),
            video_present: false,
            expire_at: 880_835_400,
        }
    }

    #[test]
    fn full_projection_keeps_everything() {
        let view = RequestView::project(&record(), RequestProjection::Full);
        assert_eq!(view.id, 42);
        assert_eq!(view.requester.as_deref(), Some("c1"));
        assert_eq!(view.responder.as_deref(), Some("starX"));
        assert_eq!(view.video_present, Some(false));
        assert_eq!(view.expire_at, Some(880_835_400));
        assert!(view.payload.is_some());
    }

    #[test]
    fn requester_projection_drops_the_rest() {
        let view = RequestView::project(&record(), RequestProjection::Requester);
        assert_eq!(view.id, 42);
        assert_eq!(view.requester.as_deref(), Some("c1"));
        assert!(view.responder.is_none());
        assert!(view.payload.is_none());
        assert!(view.video_present.is_none());
        assert!(view.expire_at.is_none());
    }

    #[test]
    fn request_record_serde_roundtrip() {
        let json = serde_json::to_string(&record()).unwrap();
        let back: RequestRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record());
    }
}
