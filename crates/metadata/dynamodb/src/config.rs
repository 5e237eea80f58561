/// Configuration for the `DynamoDB` metadata store backend.
///
/// Requests and responses live in separate tables because their id
/// spaces are independent and may collide numerically. Deployments
/// supply the request table name through `BLISS_REQUEST_DB_TABLE_NAME`.
#[derive(Debug, Clone)]
pub struct DynamoMetadataConfig {
    /// Table holding request records, keyed by `BLISS_ID`.
    pub request_table: String,

    /// Table holding response records, keyed by `BLISS_RESPONSE_ID`.
    pub response_table: String,

    /// AWS region (e.g. `"us-east-2"`).
    pub region: String,

    /// Optional endpoint URL for local development (e.g. `DynamoDB` Local).
    pub endpoint_url: Option<String>,
}

impl Default for DynamoMetadataConfig {
    fn default() -> Self {
        Self {
            request_table: String::from("bliss_requests"),
            response_table: String::from("bliss_responses"),
            region: String::from("us-east-2"),
            endpoint_url: None,
        }
    }
}

impl DynamoMetadataConfig {
    /// Create a config with the given table names and region.
    pub fn new(
        request_table: impl Into<String>,
        response_table: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            request_table: request_table.into(),
            response_table: response_table.into(),
            region: region.into(),
            endpoint_url: None,
        }
    }

    /// Set the endpoint URL override (for `DynamoDB` Local).
    #[must_use]
    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }
}
