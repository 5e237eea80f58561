use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use tracing::debug;

use bliss_core::{RequestProjection, RequestRecord, RequestView, ResponseRecord};
use bliss_metadata::error::MetadataError;
use bliss_metadata::store::RecordStore;

use crate::config::DynamoMetadataConfig;

// Canonical attribute names. Earlier deployments also used
// `BLISS_REQUEST_ID` for the table key in places; `BLISS_ID` is the
// canonical spelling here.
const ATTR_REQUEST_ID: &str = "BLISS_ID";
const ATTR_RESPONSE_ID: &str = "BLISS_RESPONSE_ID";
const ATTR_RESPONSE_REQUEST_ID: &str = "BLISS_REQUEST_ID";
const ATTR_REQUESTER: &str = "BLISS_REQUESTER";
const ATTR_RESPONDER: &str = "BLISS_RESPONDER";
const ATTR_REQUEST_DATA: &str = "BLISS_REQUEST_DATA";
const ATTR_VIDEO_EXISTS: &str = "VIDEO_EXISTS";
const ATTR_EXPIRE_TIME: &str = "EXPIRE_TIME";

/// `DynamoDB`-backed implementation of [`RecordStore`].
///
/// Items are flat attributes with no nested documents; the free-form
/// request payload is stored as a JSON string. `EXPIRE_TIME` holds epoch
/// seconds for the table's native TTL, and expired items read as missing
/// regardless of whether the reaper has caught up.
pub struct DynamoRecordStore {
    client: Client,
    request_table: String,
    response_table: String,
}

impl std::fmt::Debug for DynamoRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamoRecordStore")
            .field("request_table", &self.request_table)
            .field("response_table", &self.response_table)
            .field("client", &"<DynamoDbClient>")
            .finish()
    }
}

impl DynamoRecordStore {
    /// Create a new store from the provided configuration, loading AWS
    /// credentials from the standard environment chain.
    pub async fn new(config: &DynamoMetadataConfig) -> Self {
        let client = build_client(config).await;
        Self::from_client(client, config)
    }

    /// Create a store from an existing `DynamoDB` client.
    pub fn from_client(client: Client, config: &DynamoMetadataConfig) -> Self {
        Self {
            client,
            request_table: config.request_table.clone(),
            response_table: config.response_table.clone(),
        }
    }

    fn now_epoch() -> i64 {
        chrono::Utc::now().timestamp()
    }

    /// Check if an item is expired based on its `EXPIRE_TIME` attribute.
    fn is_expired(item: &HashMap<String, AttributeValue>) -> bool {
        if let Some(AttributeValue::N(expires_str)) = item.get(ATTR_EXPIRE_TIME)
            && let Ok(expire_at) = expires_str.parse::<i64>()
        {
            return expire_at <= Self::now_epoch();
        }
        false
    }
}

#[async_trait]
impl RecordStore for DynamoRecordStore {
    async fn put_request(&self, record: &RequestRecord) -> Result<i64, MetadataError> {
        let item = request_to_item(record)?;
        self.client
            .put_item()
            .table_name(&self.request_table)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| MetadataError::Backend(e.to_string()))?;
        Ok(record.id)
    }

    async fn get_request(
        &self,
        id: i64,
        projection: RequestProjection,
    ) -> Result<Option<RequestView>, MetadataError> {
        let mut get = self
            .client
            .get_item()
            .table_name(&self.request_table)
            .key(ATTR_REQUEST_ID, AttributeValue::N(id.to_string()));

        // EXPIRE_TIME rides along so the expiry check works even under a
        // narrow projection.
        if let RequestProjection::Requester = projection {
            get = get.projection_expression(format!(
                "{ATTR_REQUEST_ID}, {ATTR_REQUESTER}, {ATTR_EXPIRE_TIME}"
            ));
        }

        let result = get
            .send()
            .await
            .map_err(|e| MetadataError::Backend(e.to_string()))?;

        let Some(item) = result.item() else {
            return Ok(None);
        };

        // Expired items read as missing even before the TTL reaper runs.
        if Self::is_expired(item) {
            return Ok(None);
        }

        item_to_view(item, projection).map(Some)
    }

    async fn delete_request(&self, id: i64) -> Result<(), MetadataError> {
        // DeleteItem on a missing key succeeds, which gives us idempotent
        // cancellation for free.
        self.client
            .delete_item()
            .table_name(&self.request_table)
            .key(ATTR_REQUEST_ID, AttributeValue::N(id.to_string()))
            .send()
            .await
            .map_err(|e| MetadataError::Backend(e.to_string()))?;
        Ok(())
    }

    async fn put_response(&self, record: &ResponseRecord) -> Result<i64, MetadataError> {
        self.client
            .put_item()
            .table_name(&self.response_table)
            .set_item(Some(response_to_item(record)))
            .send()
            .await
            .map_err(|e| MetadataError::Backend(e.to_string()))?;
        Ok(record.id)
    }
}

/// Map a request record to a flat attribute item.
fn request_to_item(
    record: &RequestRecord,
) -> Result<HashMap<String, AttributeValue>, MetadataError> {
    let mut item = HashMap::from([
        (
            ATTR_REQUEST_ID.to_owned(),
            AttributeValue::N(record.id.to_string()),
        ),
        (
            ATTR_REQUESTER.to_owned(),
            AttributeValue::S(record.requester.clone()),
        ),
        (
            ATTR_RESPONDER.to_owned(),
            AttributeValue::S(record.responder.clone()),
        ),
        (
            ATTR_VIDEO_EXISTS.to_owned(),
            AttributeValue::Bool(record.video_present),
        ),
        (
            ATTR_EXPIRE_TIME.to_owned(),
            AttributeValue::N(record.expire_at.to_string()),
        ),
    ]);

    if let Some(ref payload) = record.payload {
        let json = serde_json::to_string(payload)
            .map_err(|e| MetadataError::Serialization(e.to_string()))?;
        item.insert(ATTR_REQUEST_DATA.to_owned(), AttributeValue::S(json));
    }

    Ok(item)
}

/// Map a response record to a flat attribute item.
fn response_to_item(record: &ResponseRecord) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (
            ATTR_RESPONSE_ID.to_owned(),
            AttributeValue::N(record.id.to_string()),
        ),
        (
            ATTR_RESPONSE_REQUEST_ID.to_owned(),
            AttributeValue::N(record.request_id.to_string()),
        ),
        (
            ATTR_REQUESTER.to_owned(),
            AttributeValue::S(record.requester.clone()),
        ),
        (
            ATTR_RESPONDER.to_owned(),
            AttributeValue::S(record.responder.clone()),
        ),
        (
            ATTR_EXPIRE_TIME.to_owned(),
            AttributeValue::N(record.expire_at.to_string()),
        ),
    ])
}

/// Decode a fetched item into a (possibly partial) request view.
fn item_to_view(
    item: &HashMap<String, AttributeValue>,
    projection: RequestProjection,
) -> Result<RequestView, MetadataError> {
    let id = get_number(item, ATTR_REQUEST_ID)?
        .ok_or_else(|| MetadataError::Serialization(format!("item missing {ATTR_REQUEST_ID}")))?;

    let mut view = RequestView {
        id,
        requester: get_string(item, ATTR_REQUESTER),
        ..RequestView::default()
    };

    if let RequestProjection::Full = projection {
        view.responder = get_string(item, ATTR_RESPONDER);
        view.video_present = match item.get(ATTR_VIDEO_EXISTS) {
            Some(AttributeValue::Bool(b)) => Some(*b),
            _ => None,
        };
        view.expire_at = get_number(item, ATTR_EXPIRE_TIME)?;
        if let Some(json) = get_string(item, ATTR_REQUEST_DATA) {
            let payload = serde_json::from_str(&json)
                .map_err(|e| MetadataError::Serialization(e.to_string()))?;
            view.payload = Some(payload);
        }
    }

    Ok(view)
}

fn get_string(item: &HashMap<String, AttributeValue>, attr: &str) -> Option<String> {
    match item.get(attr) {
        Some(AttributeValue::S(s)) => Some(s.clone()),
        _ => None,
    }
}

fn get_number(
    item: &HashMap<String, AttributeValue>,
    attr: &str,
) -> Result<Option<i64>, MetadataError> {
    match item.get(attr) {
        Some(AttributeValue::N(n)) => n
            .parse::<i64>()
            .map(Some)
            .map_err(|e| MetadataError::Serialization(format!("{attr}: {e}"))),
        _ => Ok(None),
    }
}

/// Build an AWS `DynamoDB` [`Client`] from the provided configuration.
pub async fn build_client(config: &DynamoMetadataConfig) -> Client {
    let mut loader = aws_config::from_env().region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        debug!(endpoint = %endpoint, "using custom DynamoDB endpoint");
        loader = loader.endpoint_url(endpoint);
    }

    let sdk_config = loader.load().await;
    Client::new(&sdk_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RequestRecord {
        RequestRecord {
            id: 4242,
            requester: "c1".to_owned(),
            responder: "starX".to_owned(),
            payload: Some(serde_json::json!({"note": "hi"})),
            video_present: false,
            expire_at: 880_839_042,
        }
    }

    #[test]
    fn request_item_has_canonical_attributes() {
        let item = request_to_item(&request()).unwrap();
        assert_eq!(item[ATTR_REQUEST_ID], AttributeValue::N("4242".to_owned()));
        assert_eq!(item[ATTR_REQUESTER], AttributeValue::S("c1".to_owned()));
        assert_eq!(item[ATTR_RESPONDER], AttributeValue::S("starX".to_owned()));
        assert_eq!(item[ATTR_VIDEO_EXISTS], AttributeValue::Bool(false));
        assert_eq!(
            item[ATTR_EXPIRE_TIME],
            AttributeValue::N("880839042".to_owned())
        );
        assert!(matches!(item[ATTR_REQUEST_DATA], AttributeValue::S(_)));
    }

    #[test]
    fn video_request_item_omits_payload() {
        let mut record = request();
        record.payload = None;
        record.video_present = true;
        let item = request_to_item(&record).unwrap();
        assert!(!item.contains_key(ATTR_REQUEST_DATA));
        assert_eq!(item[ATTR_VIDEO_EXISTS], AttributeValue::Bool(true));
    }

    #[test]
    fn item_roundtrips_to_full_view() {
        let item = request_to_item(&request()).unwrap();
        let view = item_to_view(&item, RequestProjection::Full).unwrap();
        assert_eq!(view.id, 4242);
        assert_eq!(view.requester.as_deref(), Some("c1"));
        assert_eq!(view.responder.as_deref(), Some("starX"));
        assert_eq!(view.video_present, Some(false));
        assert_eq!(view.expire_at, Some(880_839_042));
        assert_eq!(view.payload, Some(serde_json::json!({"note": "hi"})));
    }

    #[test]
    fn projected_item_decodes_to_partial_view() {
        // Simulate what the projection expression actually returns.
        let item = HashMap::from([
            (
                ATTR_REQUEST_ID.to_owned(),
                AttributeValue::N("7".to_owned()),
            ),
            (
                ATTR_REQUESTER.to_owned(),
                AttributeValue::S("c9".to_owned()),
            ),
            (
                ATTR_EXPIRE_TIME.to_owned(),
                AttributeValue::N("880839042".to_owned()),
            ),
        ]);
        let view = item_to_view(&item, RequestProjection::Requester).unwrap();
        assert_eq!(view.requester.as_deref(), Some("c9"));
        assert!(view.responder.is_none());
        assert!(view.expire_at.is_none());
    }

    #[test]
    fn garbled_number_is_a_serialization_error() {
        let item = HashMap::from([(
            ATTR_REQUEST_ID.to_owned(),
            AttributeValue::N("not-a-number".to_owned()),
        )]);
        let err = item_to_view(&item, RequestProjection::Full).unwrap_err();
        assert!(matches!(err, MetadataError::Serialization(_)));
    }

    #[test]
    fn expiry_check_reads_expire_time() {
        let mut record = request();
        record.expire_at = 1;
        let item = request_to_item(&record).unwrap();
        assert!(DynamoRecordStore::is_expired(&item));

        record.expire_at = i64::MAX;
        let item = request_to_item(&record).unwrap();
        assert!(!DynamoRecordStore::is_expired(&item));
    }

    #[test]
    fn response_item_references_the_request() {
        let record = ResponseRecord {
            id: 9,
            request_id: 4242,
            requester: "c1".to_owned(),
            responder: "starX".to_owned(),
            expire_at: 880_839_042,
        };
        let item = response_to_item(&record);
        assert_eq!(item[ATTR_RESPONSE_ID], AttributeValue::N("9".to_owned()));
        assert_eq!(
            item[ATTR_RESPONSE_REQUEST_ID],
            AttributeValue::N("4242".to_owned())
        );
    }
}
